//! User configuration: editor options plus extra key bindings.
//!
//! ```toml
//! [editor]
//! tab-width = 2
//! sequence-timeout = 500
//!
//! [keys.normal]
//! "<C-n>" = "next_buffer"
//! "x"     = "delete_selection"
//! ```
//!
//! User bindings are layered over [`crate::default`], replacing any default
//! binding with the same sequence.

use std::{
  collections::{
    BTreeMap,
    HashMap,
  },
  path::Path,
};

use serde::Deserialize;
use the_lib::{
  editor::EditorConfig,
  mode::Mode,
};
use thiserror::Error;

use crate::{
  Keymaps,
  command_from_name,
  default,
};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config: {0}")]
  Io(#[from] std::io::Error),
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("unknown command `{command}` bound to `{sequence}` in {mode} mode")]
  UnknownCommand {
    mode:     Mode,
    sequence: String,
    command:  String,
  },
  #[error("empty key sequence in {mode} mode")]
  EmptySequence { mode: Mode },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub editor: EditorConfig,
  /// Sequence to command name, per mode.
  pub keys:   HashMap<Mode, BTreeMap<String, String>>,
}

impl Config {
  pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(source)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path.as_ref())?;
    let config = Self::from_toml(&source)?;
    tracing::debug!(path = %path.as_ref().display(), "loaded config");
    Ok(config)
  }

  /// The default keymaps with the user bindings applied.
  pub fn keymaps(&self) -> Result<Keymaps, ConfigError> {
    let mut keymaps = default();
    for (&mode, bindings) in &self.keys {
      for (sequence, name) in bindings {
        if sequence.is_empty() {
          return Err(ConfigError::EmptySequence { mode });
        }
        let command = command_from_name(name).ok_or_else(|| {
          ConfigError::UnknownCommand {
            mode,
            sequence: sequence.clone(),
            command: name.clone(),
          }
        })?;
        keymaps.set(mode, sequence, command);
      }
    }
    Ok(keymaps)
  }
}
