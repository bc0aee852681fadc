//! Clipboard abstraction.
//!
//! The lib only defines the interface, the error type and two in-process
//! providers. Hosts that talk to a system clipboard implement
//! [`ClipboardProvider`] themselves.

use std::{
  borrow::Cow,
  sync::Mutex,
};

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardType {
  Clipboard,
  Selection,
}

#[derive(Debug, Error)]
pub enum ClipboardError {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error("clipboard provider does not support reading")]
  ReadingNotSupported,
  #[error("clipboard is empty")]
  Empty,
  #[error("clipboard state was poisoned by a panicking writer")]
  Poisoned,
  #[error("clipboard error: {0}")]
  Platform(String),
}

pub type Result<T> = std::result::Result<T, ClipboardError>;

pub trait ClipboardProvider: Send + Sync {
  fn name(&self) -> Cow<'_, str>;
  fn get_contents(&self, clipboard_type: ClipboardType) -> Result<String>;
  fn set_contents(&self, content: &str, clipboard_type: ClipboardType) -> Result<()>;
}

/// Drops writes and refuses reads.
#[derive(Debug, Default)]
pub struct NoClipboard;

impl ClipboardProvider for NoClipboard {
  fn name(&self) -> Cow<'_, str> {
    "none".into()
  }

  fn get_contents(&self, _clipboard_type: ClipboardType) -> Result<String> {
    Err(ClipboardError::ReadingNotSupported)
  }

  fn set_contents(&self, _content: &str, _clipboard_type: ClipboardType) -> Result<()> {
    Ok(())
  }
}

/// Keeps one register per [`ClipboardType`] in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
  clipboard: Mutex<Option<String>>,
  selection: Mutex<Option<String>>,
}

impl MemoryClipboard {
  pub fn new() -> Self {
    Self::default()
  }

  fn register(&self, clipboard_type: ClipboardType) -> &Mutex<Option<String>> {
    match clipboard_type {
      ClipboardType::Clipboard => &self.clipboard,
      ClipboardType::Selection => &self.selection,
    }
  }
}

impl ClipboardProvider for MemoryClipboard {
  fn name(&self) -> Cow<'_, str> {
    "memory".into()
  }

  fn get_contents(&self, clipboard_type: ClipboardType) -> Result<String> {
    let register = self
      .register(clipboard_type)
      .lock()
      .map_err(|_| ClipboardError::Poisoned)?;
    register.clone().ok_or(ClipboardError::Empty)
  }

  fn set_contents(&self, content: &str, clipboard_type: ClipboardType) -> Result<()> {
    let mut register = self
      .register(clipboard_type)
      .lock()
      .map_err(|_| ClipboardError::Poisoned)?;
    *register = Some(content.to_string());
    Ok(())
  }
}
