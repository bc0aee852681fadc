//! Key handling on top of `the-lib`.
//!
//! Raw key events become tokens ([`KeyEvent::token`]), tokens are resolved
//! against per-mode [`Keymaps`] by the [`InputDispatcher`], and matched
//! bindings run a [`Command`] against the [`the_lib::editor::Editor`].

mod command;
mod command_types;
mod config;
mod default;
mod dispatcher;
mod input;
mod keymap;
mod timeout;

pub use command::{
  command_from_name,
  execute,
};
pub use command_types::{
  Command,
  Direction,
  WordMotion,
};
pub use config::{
  Config,
  ConfigError,
};
pub use default::default;
pub use dispatcher::{
  DispatchOutcome,
  DispatchState,
  InputDispatcher,
};
pub use input::{
  Key,
  KeyEvent,
  Modifiers,
};
pub use keymap::{
  IntoModes,
  KeyAction,
  Keymap,
  Keymaps,
};
pub use timeout::{
  SequenceTimeout,
  TimerEvent,
};
