//! Direction of a scan along a line.
//!
//! Used by the character-find operators (`f` scans [`Direction::Forward`],
//! `F` scans [`Direction::Backward`]) and by the pending action that waits
//! for their argument.

use serde::{
  Deserialize,
  Serialize,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  /// Toward the end of the line.
  Forward,
  /// Toward the start of the line.
  Backward,
}

impl Direction {
  pub const fn reverse(self) -> Self {
    match self {
      Direction::Forward => Direction::Backward,
      Direction::Backward => Direction::Forward,
    }
  }
}
