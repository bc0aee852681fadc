//! Cursor movement over a [`Buffer`].
//!
//! The cursor is a plain `(row, col)` pair. Every motion takes the buffer it
//! moves over, and the vertical and rightward ones also take the current
//! [`Mode`], because the last legal column depends on it: INSERT may sit one
//! past the final character, the other modes must sit on a character.
//!
//! Word motions come in two flavours:
//!
//! ```text
//! word: runs of one class (word chars or punctuation)
//!   foo bar-baz  qux
//!   ^   ^  ^^    ^        w stops
//!
//! WORD: runs of anything that is not whitespace
//!   foo bar-baz  qux
//!   ^   ^        ^        W stops
//! ```
//!
//! A line break counts as whitespace, so word motions keep scanning onto the
//! next (or previous) row instead of stopping at the end of a line.

use the_core::chars::{
  CharCategory,
  LongWordCategory,
  categorize_char,
  categorize_long_word_char,
};

use crate::{
  buffer::Buffer,
  mode::Mode,
  movement::Direction,
  position::Position,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
  pub row: usize,
  pub col: usize,
}

/// Which classifier a word motion uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
  Word,
  Long,
}

impl Run {
  fn class(self, ch: Option<char>) -> CharCategory {
    match self {
      Run::Word => categorize_char(ch),
      Run::Long => {
        match categorize_long_word_char(ch) {
          LongWordCategory::Whitespace => CharCategory::Whitespace,
          LongWordCategory::NonWhitespace => CharCategory::Word,
        }
      },
    }
  }
}

impl Cursor {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn position(&self) -> Position {
    Position::new(self.row, self.col)
  }

  pub fn move_up(&mut self, buffer: &Buffer, mode: Mode) {
    self.row = self.row.saturating_sub(1);
    self.clamp(buffer, mode);
  }

  pub fn move_down(&mut self, buffer: &Buffer, mode: Mode) {
    self.row = self.row.saturating_add(1);
    self.clamp(buffer, mode);
  }

  pub fn move_left(&mut self) {
    self.col = self.col.saturating_sub(1);
  }

  pub fn move_right(&mut self, buffer: &Buffer, mode: Mode) {
    let max = mode.max_col(buffer.line_len(self.row));
    self.col = self.col.saturating_add(1).min(max);
  }

  pub fn move_to_start_of_line(&mut self) {
    self.col = 0;
  }

  pub fn move_to_end_of_line(&mut self, buffer: &Buffer) {
    self.col = buffer.line_len(self.row).saturating_sub(1);
  }

  /// Jump to the next `ch` after the cursor on the current line. Returns
  /// whether the cursor moved.
  pub fn find_char(&mut self, buffer: &Buffer, ch: char) -> bool {
    let Some(line) = buffer.line(self.row) else {
      return false;
    };
    let from = self.col.saturating_add(1);
    match line.chars().skip(from).position(|c| c == ch) {
      Some(offset) => {
        self.col = from + offset;
        true
      },
      None => false,
    }
  }

  /// Jump to the previous `ch` before the cursor on the current line.
  pub fn find_char_backward(&mut self, buffer: &Buffer, ch: char) -> bool {
    let Some(line) = buffer.line(self.row) else {
      return false;
    };
    let found = line
      .chars()
      .take(self.col)
      .enumerate()
      .filter(|&(_, c)| c == ch)
      .last();
    match found {
      Some((col, _)) => {
        self.col = col;
        true
      },
      None => false,
    }
  }

  pub fn find(&mut self, buffer: &Buffer, ch: char, direction: Direction) -> bool {
    match direction {
      Direction::Forward => self.find_char(buffer, ch),
      Direction::Backward => self.find_char_backward(buffer, ch),
    }
  }

  pub fn forward_word(&mut self, buffer: &Buffer) {
    self.forward(buffer, Run::Word);
  }

  pub fn backward_word(&mut self, buffer: &Buffer) {
    self.backward(buffer, Run::Word);
  }

  pub fn end_of_word(&mut self, buffer: &Buffer) {
    self.end(buffer, Run::Word);
  }

  pub fn forward_long_word(&mut self, buffer: &Buffer) {
    self.forward(buffer, Run::Long);
  }

  pub fn backward_long_word(&mut self, buffer: &Buffer) {
    self.backward(buffer, Run::Long);
  }

  pub fn end_of_long_word(&mut self, buffer: &Buffer) {
    self.end(buffer, Run::Long);
  }

  fn forward(&mut self, buffer: &Buffer, run: Run) {
    let rows = buffer.line_count();
    if self.row >= rows {
      return;
    }
    let (mut row, mut col) = (self.row, self.col);

    let start = run.class(buffer.char_at(row, col));
    if start != CharCategory::Whitespace {
      while run.class(buffer.char_at(row, col)) == start {
        col += 1;
      }
    }

    loop {
      let len = buffer.line_len(row);
      if col >= len {
        if row + 1 < rows {
          row += 1;
          col = 0;
          continue;
        }
        col = len.saturating_sub(1);
        break;
      }
      if run.class(buffer.char_at(row, col)) != CharCategory::Whitespace {
        break;
      }
      col += 1;
    }

    self.row = row;
    self.col = col;
  }

  fn backward(&mut self, buffer: &Buffer, run: Run) {
    let rows = buffer.line_count();
    if rows == 0 {
      return;
    }
    let mut row = self.row.min(rows - 1);
    let mut col = self.col.min(buffer.line_len(row));

    loop {
      if col == 0 {
        if row == 0 {
          self.row = 0;
          self.col = 0;
          return;
        }
        row -= 1;
        col = buffer.line_len(row);
        continue;
      }
      col -= 1;
      if run.class(buffer.char_at(row, col)) != CharCategory::Whitespace {
        break;
      }
    }

    let class = run.class(buffer.char_at(row, col));
    while col > 0 && run.class(buffer.char_at(row, col - 1)) == class {
      col -= 1;
    }

    self.row = row;
    self.col = col;
  }

  fn end(&mut self, buffer: &Buffer, run: Run) {
    let rows = buffer.line_count();
    if self.row >= rows {
      return;
    }
    let (mut row, mut col) = (self.row, self.col.saturating_add(1));

    loop {
      let len = buffer.line_len(row);
      if col >= len {
        if row + 1 < rows {
          row += 1;
          col = 0;
          continue;
        }
        // Nothing left to land on. WORD stays put, word settles on the
        // last character of the buffer.
        if run == Run::Word {
          self.row = row;
          self.col = len.saturating_sub(1);
        }
        return;
      }
      if run.class(buffer.char_at(row, col)) != CharCategory::Whitespace {
        break;
      }
      col += 1;
    }

    let class = run.class(buffer.char_at(row, col));
    while run.class(buffer.char_at(row, col + 1)) == class {
      col += 1;
    }

    self.row = row;
    self.col = col;
  }

  /// Pull the column back onto the current line for `mode`.
  pub(crate) fn clamp_col(&mut self, buffer: &Buffer, mode: Mode) {
    self.col = self.col.min(mode.max_col(buffer.line_len(self.row)));
  }

  /// Pull both row and column back inside `buffer`.
  pub fn clamp(&mut self, buffer: &Buffer, mode: Mode) {
    self.row = self.row.min(buffer.line_count().saturating_sub(1));
    self.clamp_col(buffer, mode);
  }
}

impl From<Position> for Cursor {
  fn from(pos: Position) -> Self {
    Self::new(pos.row, pos.col)
  }
}
