//! Editor command types used by keymaps and the dispatcher.

use the_lib::movement::Direction as FindDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordMotion {
  NextWordStart,
  PrevWordStart,
  NextWordEnd,
  NextLongWordStart,
  PrevLongWordStart,
  NextLongWordEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
  InsertMode,
  NormalMode,
  VisualMode,
  ExitVisualMode,
  CommandMode,
  NextBuffer,
  PrevBuffer,
  Move(Direction),
  Word(WordMotion),
  GotoFileStart,
  GotoLineStart,
  GotoLineEnd,
  FindChar(FindDirection),
  Yank,
  Paste,
  PasteOverSelection,
  DeleteSelection,
  InsertNewline,
  DeleteCharBackward,
  InsertTab,
  InsertChar(char),
}

impl Command {
  #[must_use]
  pub const fn insert_mode() -> Self {
    Self::InsertMode
  }

  #[must_use]
  pub const fn normal_mode() -> Self {
    Self::NormalMode
  }

  #[must_use]
  pub const fn visual_mode() -> Self {
    Self::VisualMode
  }

  #[must_use]
  pub const fn exit_visual_mode() -> Self {
    Self::ExitVisualMode
  }

  #[must_use]
  pub const fn command_mode() -> Self {
    Self::CommandMode
  }

  #[must_use]
  pub const fn next_buffer() -> Self {
    Self::NextBuffer
  }

  #[must_use]
  pub const fn prev_buffer() -> Self {
    Self::PrevBuffer
  }

  #[must_use]
  pub const fn move_char_left() -> Self {
    Self::Move(Direction::Left)
  }

  #[must_use]
  pub const fn move_char_right() -> Self {
    Self::Move(Direction::Right)
  }

  #[must_use]
  pub const fn move_line_up() -> Self {
    Self::Move(Direction::Up)
  }

  #[must_use]
  pub const fn move_line_down() -> Self {
    Self::Move(Direction::Down)
  }

  #[must_use]
  pub const fn move_next_word_start() -> Self {
    Self::Word(WordMotion::NextWordStart)
  }

  #[must_use]
  pub const fn move_prev_word_start() -> Self {
    Self::Word(WordMotion::PrevWordStart)
  }

  #[must_use]
  pub const fn move_next_word_end() -> Self {
    Self::Word(WordMotion::NextWordEnd)
  }

  #[must_use]
  pub const fn move_next_long_word_start() -> Self {
    Self::Word(WordMotion::NextLongWordStart)
  }

  #[must_use]
  pub const fn move_prev_long_word_start() -> Self {
    Self::Word(WordMotion::PrevLongWordStart)
  }

  #[must_use]
  pub const fn move_next_long_word_end() -> Self {
    Self::Word(WordMotion::NextLongWordEnd)
  }

  #[must_use]
  pub const fn goto_file_start() -> Self {
    Self::GotoFileStart
  }

  #[must_use]
  pub const fn goto_line_start() -> Self {
    Self::GotoLineStart
  }

  #[must_use]
  pub const fn goto_line_end() -> Self {
    Self::GotoLineEnd
  }

  #[must_use]
  pub const fn find_next_char() -> Self {
    Self::FindChar(FindDirection::Forward)
  }

  #[must_use]
  pub const fn find_prev_char() -> Self {
    Self::FindChar(FindDirection::Backward)
  }

  #[must_use]
  pub const fn yank() -> Self {
    Self::Yank
  }

  #[must_use]
  pub const fn paste() -> Self {
    Self::Paste
  }

  #[must_use]
  pub const fn paste_over_selection() -> Self {
    Self::PasteOverSelection
  }

  #[must_use]
  pub const fn delete_selection() -> Self {
    Self::DeleteSelection
  }

  #[must_use]
  pub const fn insert_newline() -> Self {
    Self::InsertNewline
  }

  #[must_use]
  pub const fn delete_char_backward() -> Self {
    Self::DeleteCharBackward
  }

  #[must_use]
  pub const fn insert_tab() -> Self {
    Self::InsertTab
  }

  /// The configuration name of this command.
  pub const fn name(self) -> &'static str {
    match self {
      Self::InsertMode => "insert_mode",
      Self::NormalMode => "normal_mode",
      Self::VisualMode => "visual_mode",
      Self::ExitVisualMode => "exit_visual_mode",
      Self::CommandMode => "command_mode",
      Self::NextBuffer => "next_buffer",
      Self::PrevBuffer => "prev_buffer",
      Self::Move(Direction::Left) => "move_char_left",
      Self::Move(Direction::Right) => "move_char_right",
      Self::Move(Direction::Up) => "move_line_up",
      Self::Move(Direction::Down) => "move_line_down",
      Self::Word(WordMotion::NextWordStart) => "move_next_word_start",
      Self::Word(WordMotion::PrevWordStart) => "move_prev_word_start",
      Self::Word(WordMotion::NextWordEnd) => "move_next_word_end",
      Self::Word(WordMotion::NextLongWordStart) => "move_next_long_word_start",
      Self::Word(WordMotion::PrevLongWordStart) => "move_prev_long_word_start",
      Self::Word(WordMotion::NextLongWordEnd) => "move_next_long_word_end",
      Self::GotoFileStart => "goto_file_start",
      Self::GotoLineStart => "goto_line_start",
      Self::GotoLineEnd => "goto_line_end",
      Self::FindChar(FindDirection::Forward) => "find_next_char",
      Self::FindChar(FindDirection::Backward) => "find_prev_char",
      Self::Yank => "yank",
      Self::Paste => "paste",
      Self::PasteOverSelection => "paste_over_selection",
      Self::DeleteSelection => "delete_selection",
      Self::InsertNewline => "insert_newline",
      Self::DeleteCharBackward => "delete_char_backward",
      Self::InsertTab => "insert_tab",
      Self::InsertChar(_) => "insert_char",
    }
  }

  /// One-line help text shown next to a binding.
  pub const fn description(self) -> &'static str {
    match self {
      Self::InsertMode => "Enter insert mode",
      Self::NormalMode => "Return to normal mode",
      Self::VisualMode => "Enter visual mode",
      Self::ExitVisualMode => "Exit visual mode",
      Self::CommandMode => "Enter command mode",
      Self::NextBuffer => "Cycle to next buffer",
      Self::PrevBuffer => "Cycle to previous buffer",
      Self::Move(Direction::Left) => "Move left",
      Self::Move(Direction::Right) => "Move right",
      Self::Move(Direction::Up) => "Move up",
      Self::Move(Direction::Down) => "Move down",
      Self::Word(WordMotion::NextWordStart) => "Move to start of next word",
      Self::Word(WordMotion::PrevWordStart) => "Move to start of previous word",
      Self::Word(WordMotion::NextWordEnd) => "Move to end of word",
      Self::Word(WordMotion::NextLongWordStart) => "Move to start of next WORD",
      Self::Word(WordMotion::PrevLongWordStart) => "Move to start of previous WORD",
      Self::Word(WordMotion::NextLongWordEnd) => "Move to end of WORD",
      Self::GotoFileStart => "Go to first line",
      Self::GotoLineStart => "Go to start of line",
      Self::GotoLineEnd => "Go to end of line",
      Self::FindChar(FindDirection::Forward) => "Find next character on line",
      Self::FindChar(FindDirection::Backward) => "Find previous character on line",
      Self::Yank => "Yank (copy) selection",
      Self::Paste => "Paste from clipboard",
      Self::PasteOverSelection => "Paste over selection",
      Self::DeleteSelection => "Delete selection",
      Self::InsertNewline => "Split line at cursor",
      Self::DeleteCharBackward => "Delete character before cursor",
      Self::InsertTab => "Insert spaces",
      Self::InsertChar(_) => "Insert character",
    }
  }
}
