//! Visual-mode selections.
//!
//! A [`Selection`] is never stored. It is derived from the anchor that was
//! dropped when VISUAL mode started and the live cursor (the head):
//!
//! ```text
//! anchor=(0,2) head=(0,7): "he[llo w]orld"
//! anchor=(0,7) head=(0,2): "he[llo w]orld"   same selection
//! ```
//!
//! Both ends are inclusive: the character under `end` is selected.

use serde::{
  Deserialize,
  Serialize,
};

use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
  pub start: Position,
  pub end:   Position,
}

impl Selection {
  /// Normalize an anchor/head pair so that `start <= end`.
  pub fn new(anchor: Position, head: Position) -> Self {
    if anchor <= head {
      Self {
        start: anchor,
        end:   head,
      }
    } else {
      Self {
        start: head,
        end:   anchor,
      }
    }
  }

  pub fn point(pos: Position) -> Self {
    Self::new(pos, pos)
  }

  pub fn is_single_line(&self) -> bool {
    self.start.row == self.end.row
  }

  pub fn contains(&self, pos: Position) -> bool {
    self.start <= pos && pos <= self.end
  }
}
