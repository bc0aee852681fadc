//! Key sequence bindings per mode.
//!
//! Sequences are strings in keymap notation (see [`crate::KeyEvent::token`]):
//! `"gg"`, `"]b"`, `"<C-w>"`. A bracketed token always counts as a single
//! key, so `"<"` is not considered a prefix of `"<Esc>"`.

use std::collections::HashMap;

use smallvec::SmallVec;
use the_lib::{
  editor::Editor,
  mode::Mode,
};

use crate::{
  Command,
  execute,
};

/// What a binding does when its sequence is typed.
#[derive(Debug, Clone, Copy)]
pub enum KeyAction {
  Command(Command),
  /// Arbitrary behaviour registered from outside this crate.
  Execute(fn(&mut Editor)),
}

impl KeyAction {
  pub fn run(self, editor: &mut Editor) {
    match self {
      KeyAction::Command(command) => execute(editor, command),
      KeyAction::Execute(f) => f(editor),
    }
  }
}

impl From<Command> for KeyAction {
  fn from(command: Command) -> Self {
    Self::Command(command)
  }
}

#[derive(Debug, Clone)]
pub struct Keymap {
  pub action:      KeyAction,
  pub description: Option<String>,
}

impl Keymap {
  pub fn new(action: KeyAction) -> Self {
    Self {
      action,
      description: None,
    }
  }

  #[must_use]
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }
}

impl From<KeyAction> for Keymap {
  fn from(action: KeyAction) -> Self {
    Self::new(action)
  }
}

impl From<Command> for Keymap {
  fn from(command: Command) -> Self {
    Self::new(KeyAction::Command(command)).with_description(command.description())
  }
}

/// One mode or several at once.
pub trait IntoModes {
  fn into_modes(self) -> SmallVec<[Mode; 4]>;
}

impl IntoModes for Mode {
  fn into_modes(self) -> SmallVec<[Mode; 4]> {
    SmallVec::from_slice(&[self])
  }
}

impl<const N: usize> IntoModes for [Mode; N] {
  fn into_modes(self) -> SmallVec<[Mode; 4]> {
    SmallVec::from_slice(&self)
  }
}

impl IntoModes for &[Mode] {
  fn into_modes(self) -> SmallVec<[Mode; 4]> {
    SmallVec::from_slice(self)
  }
}

/// Split a sequence into its keys, keeping bracketed tokens whole.
pub(crate) fn split_keys(sequence: &str) -> Vec<&str> {
  let mut keys = Vec::new();
  let mut rest = sequence;
  while let Some(c) = rest.chars().next() {
    let len = match rest.find('>') {
      Some(end) if c == '<' && end > 1 && !rest[1..end].contains('<') => end + 1,
      _ => c.len_utf8(),
    };
    keys.push(&rest[..len]);
    rest = &rest[len..];
  }
  keys
}

#[derive(Debug, Clone, Default)]
pub struct Keymaps {
  map: HashMap<Mode, HashMap<String, Keymap>>,
}

impl Keymaps {
  pub fn new() -> Self {
    Self::default()
  }

  /// Bind `sequence` in every mode of `modes`, replacing earlier bindings of
  /// the same sequence.
  pub fn set(&mut self, modes: impl IntoModes, sequence: &str, keymap: impl Into<Keymap>) {
    let keymap = keymap.into();
    for mode in modes.into_modes() {
      self
        .map
        .entry(mode)
        .or_default()
        .insert(sequence.to_string(), keymap.clone());
    }
  }

  pub fn get(&self, mode: Mode, sequence: &str) -> Option<&Keymap> {
    self.map.get(&mode)?.get(sequence)
  }

  /// Whether a longer binding in `mode` starts with `sequence`.
  ///
  /// The comparison is per key, not per byte: a bracketed token such as
  /// `<Esc>` is one key, so `"<"` is not a prefix of it even though the
  /// strings would match with `starts_with`.
  pub fn has_prefix(&self, mode: Mode, sequence: &str) -> bool {
    let Some(bindings) = self.map.get(&mode) else {
      return false;
    };
    let typed = split_keys(sequence);
    bindings.keys().any(|bound| {
      if bound.len() <= sequence.len() || !bound.starts_with(sequence) {
        return false;
      }
      let keys = split_keys(bound);
      keys.len() > typed.len() && keys[..typed.len()] == typed[..]
    })
  }

  pub fn remove(&mut self, mode: Mode, sequence: &str) -> Option<Keymap> {
    self.map.get_mut(&mode)?.remove(sequence)
  }

  /// Bindings of `mode` sorted by sequence.
  pub fn bindings(&self, mode: Mode) -> Vec<(&str, &Keymap)> {
    let mut bindings: Vec<_> = self
      .map
      .get(&mode)
      .into_iter()
      .flatten()
      .map(|(sequence, keymap)| (sequence.as_str(), keymap))
      .collect();
    bindings.sort_by(|a, b| a.0.cmp(b.0));
    bindings
  }

  /// Total number of bindings across all modes.
  pub fn len(&self) -> usize {
    self.map.values().map(HashMap::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Bind several sequences at once:
///
/// ```ignore
/// keymap!(keymaps, [Mode::Normal, Mode::Visual], {
///   "h" | "<Left>" => move_char_left,
///   "gg"           => goto_file_start,
/// });
/// ```
///
/// Every name on the right is a [`Command`] constructor.
#[macro_export]
macro_rules! keymap {
  ($keymaps:expr, $modes:expr, { $($($key:literal)|+ => $cmd:ident),* $(,)? }) => {{
    let keymaps: &mut $crate::Keymaps = $keymaps;
    $($(
      keymaps.set($modes, $key, $crate::Command::$cmd());
    )+)*
  }};
}
