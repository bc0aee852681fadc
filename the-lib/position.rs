use serde::{
  Deserialize,
  Serialize,
};

/// A single point in a buffer: 0-indexed row and column, where one column is
/// one `char`.
///
/// Ordering is row-major, so `a < b` means `a` comes first in the text.
/// A position is not validated on its own; whoever holds it clamps it
/// against the line it points into.
#[derive(
  Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
  pub row: usize,
  pub col: usize,
}

impl Position {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn zero() -> Self {
    Self { row: 0, col: 0 }
  }

  pub const fn is_zero(&self) -> bool {
    self.row == 0 && self.col == 0
  }
}

impl From<(usize, usize)> for Position {
  fn from(value: (usize, usize)) -> Self {
    Position::new(value.0, value.1)
  }
}
