use std::fmt;

use serde::{
  Deserialize,
  Serialize,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  #[default]
  Normal,
  Insert,
  Visual,
  Command,
}

impl Mode {
  pub const ALL: [Mode; 4] = [Mode::Normal, Mode::Insert, Mode::Visual, Mode::Command];

  pub const fn as_str(self) -> &'static str {
    match self {
      Mode::Normal => "NORMAL",
      Mode::Insert => "INSERT",
      Mode::Visual => "VISUAL",
      Mode::Command => "COMMAND",
    }
  }

  /// Largest column the cursor may occupy on a line of `line_len` chars.
  ///
  /// INSERT allows the slot just past the last character; every other mode
  /// keeps the cursor on a character (or column 0 on an empty line).
  pub const fn max_col(self, line_len: usize) -> usize {
    match self {
      Mode::Insert => line_len,
      _ => line_len.saturating_sub(1),
    }
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_max_col() {
    assert_eq!(Mode::Insert.max_col(5), 5);
    assert_eq!(Mode::Normal.max_col(5), 4);
    assert_eq!(Mode::Visual.max_col(0), 0);
    assert_eq!(Mode::Insert.max_col(0), 0);
  }

  #[test]
  fn test_display() {
    assert_eq!(Mode::Normal.to_string(), "NORMAL");
    assert_eq!(Mode::Command.to_string(), "COMMAND");
  }
}
