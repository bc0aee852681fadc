//! Editing state shared by every key handler.
//!
//! There is exactly one [`Editor`] per editing session. It owns the open
//! buffers, the mode, the cursor, the pending operator and the VISUAL anchor,
//! and it is handed by `&mut` to whoever needs it. Every piece of state lives
//! in a [`Signal`], and each effective change is also published on the
//! editor's [`EventBus`] as an [`EditorEvent`] so renderers and status lines
//! can follow along without polling.
//!
//! Writes that leave a value unchanged publish nothing.

use std::{
  fmt,
  time::Duration,
};

use serde::{
  Deserialize,
  Serialize,
};
use the_event::{
  Event,
  EventBus,
  ListenerId,
  Signal,
};

use crate::{
  buffer::Buffer,
  clipboard::{
    ClipboardProvider,
    MemoryClipboard,
  },
  cursor::Cursor,
  mode::Mode,
  movement::Direction,
  position::Position,
  registry::BufferRegistry,
  selection::Selection,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EditorConfig {
  /// Number of spaces inserted by `<Tab>` in INSERT mode.
  pub tab_width:        usize,
  /// How long an ambiguous key sequence waits for its next key, in
  /// milliseconds.
  pub sequence_timeout: u64,
}

impl Default for EditorConfig {
  fn default() -> Self {
    Self {
      tab_width:        4,
      sequence_timeout: 300,
    }
  }
}

impl EditorConfig {
  pub fn sequence_timeout_duration(&self) -> Duration {
    Duration::from_millis(self.sequence_timeout)
  }
}

/// An operator waiting for one more key as its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingAction {
  /// `f` / `F`: jump to the next typed character on the line.
  FindChar { direction: Direction },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
  ModeChanged { from: Mode, to: Mode },
  CursorMoved(Position),
  BufferChanged { name: String },
  BufferAdded { name: String },
  BufferRemoved { name: String },
  BufferPinned { name: String },
  BufferUnpinned { name: String },
  ActiveBufferChanged(Option<String>),
  PendingActionChanged(Option<PendingAction>),
  SelectionAnchorChanged(Option<Position>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorEventKind {
  ModeChanged,
  CursorMoved,
  BufferChanged,
  BufferAdded,
  BufferRemoved,
  BufferPinned,
  BufferUnpinned,
  ActiveBufferChanged,
  PendingActionChanged,
  SelectionAnchorChanged,
}

impl Event for EditorEvent {
  type Kind = EditorEventKind;

  fn kind(&self) -> EditorEventKind {
    match self {
      EditorEvent::ModeChanged { .. } => EditorEventKind::ModeChanged,
      EditorEvent::CursorMoved(_) => EditorEventKind::CursorMoved,
      EditorEvent::BufferChanged { .. } => EditorEventKind::BufferChanged,
      EditorEvent::BufferAdded { .. } => EditorEventKind::BufferAdded,
      EditorEvent::BufferRemoved { .. } => EditorEventKind::BufferRemoved,
      EditorEvent::BufferPinned { .. } => EditorEventKind::BufferPinned,
      EditorEvent::BufferUnpinned { .. } => EditorEventKind::BufferUnpinned,
      EditorEvent::ActiveBufferChanged(_) => EditorEventKind::ActiveBufferChanged,
      EditorEvent::PendingActionChanged(_) => EditorEventKind::PendingActionChanged,
      EditorEvent::SelectionAnchorChanged(_) => EditorEventKind::SelectionAnchorChanged,
    }
  }
}

pub struct Editor {
  buffers:   BufferRegistry,
  active:    Signal<Option<String>>,
  mode:      Signal<Mode>,
  cursor:    Signal<Cursor>,
  pending:   Signal<Option<PendingAction>>,
  anchor:    Signal<Option<Position>>,
  events:    EventBus<EditorEvent>,
  clipboard: Box<dyn ClipboardProvider>,
  config:    EditorConfig,
}

impl Editor {
  pub fn new(config: EditorConfig) -> Self {
    Self {
      buffers: BufferRegistry::new(),
      active: Signal::new(None),
      mode: Signal::new(Mode::Normal),
      cursor: Signal::new(Cursor::default()),
      pending: Signal::new(None),
      anchor: Signal::new(None),
      events: EventBus::new(),
      clipboard: Box::new(MemoryClipboard::new()),
      config,
    }
  }

  pub fn with_clipboard(mut self, clipboard: impl ClipboardProvider + 'static) -> Self {
    self.clipboard = Box::new(clipboard);
    self
  }

  pub fn config(&self) -> &EditorConfig {
    &self.config
  }

  pub fn set_config(&mut self, config: EditorConfig) {
    self.config = config;
  }

  pub fn clipboard(&self) -> &dyn ClipboardProvider {
    self.clipboard.as_ref()
  }

  pub fn events_mut(&mut self) -> &mut EventBus<EditorEvent> {
    &mut self.events
  }

  /// Shorthand for subscribing to one kind of event.
  pub fn on(
    &mut self,
    kind: EditorEventKind,
    listener: impl FnMut(&EditorEvent) + 'static,
  ) -> ListenerId {
    self.events.on(kind, listener)
  }

  fn emit(&mut self, event: EditorEvent) {
    self.events.emit(&event);
  }

  pub fn mode(&self) -> Mode {
    *self.mode.get()
  }

  /// Switch modes. Leaving INSERT pulls the cursor back off the virtual
  /// column past the end of the line.
  pub fn set_mode(&mut self, mode: Mode) -> bool {
    let from = self.mode();
    if !self.mode.set(mode) {
      return false;
    }
    self.emit(EditorEvent::ModeChanged { from, to: mode });
    if from == Mode::Insert {
      self.clamp_cursor();
    }
    true
  }

  pub fn cursor(&self) -> Cursor {
    *self.cursor.get()
  }

  pub fn set_cursor(&mut self, cursor: Cursor) -> bool {
    if !self.cursor.set(cursor) {
      return false;
    }
    self.emit(EditorEvent::CursorMoved(cursor.position()));
    true
  }

  pub fn pending_action(&self) -> Option<PendingAction> {
    *self.pending.get()
  }

  pub fn set_pending_action(&mut self, action: Option<PendingAction>) -> bool {
    if !self.pending.set(action) {
      return false;
    }
    self.emit(EditorEvent::PendingActionChanged(action));
    true
  }

  /// Take the pending action, leaving none behind.
  pub fn take_pending_action(&mut self) -> Option<PendingAction> {
    let action = self.pending_action();
    self.set_pending_action(None);
    action
  }

  pub fn selection_anchor(&self) -> Option<Position> {
    *self.anchor.get()
  }

  pub fn set_selection_anchor(&mut self, anchor: Option<Position>) -> bool {
    if !self.anchor.set(anchor) {
      return false;
    }
    self.emit(EditorEvent::SelectionAnchorChanged(anchor));
    true
  }

  /// The span between the anchor and the cursor, if an anchor is set.
  pub fn selection(&self) -> Option<Selection> {
    let anchor = self.selection_anchor()?;
    Some(Selection::new(anchor, self.cursor().position()))
  }

  pub fn buffers(&self) -> &BufferRegistry {
    &self.buffers
  }

  pub fn active_buffer_name(&self) -> Option<&str> {
    self.active.get().as_deref()
  }

  pub fn active_buffer(&self) -> Option<&Buffer> {
    self.buffers.get(self.active_buffer_name()?)
  }

  /// Make `name` the active buffer. Unknown names are ignored.
  pub fn set_active_buffer(&mut self, name: &str) -> bool {
    if !self.buffers.contains(name) {
      tracing::debug!(buffer = name, "ignoring switch to unknown buffer");
      return false;
    }
    self.activate(Some(name.to_string()))
  }

  fn activate(&mut self, name: Option<String>) -> bool {
    if !self.active.set(name.clone()) {
      return false;
    }
    self.emit(EditorEvent::ActiveBufferChanged(name));
    self.clamp_cursor();
    true
  }

  /// Register a buffer. The first buffer opened becomes active. Opening a
  /// buffer under a name that is already taken replaces its content.
  pub fn open_buffer(&mut self, buffer: Buffer) {
    let name = buffer.name().to_string();
    if self.buffers.add(buffer).is_some() {
      self.emit(EditorEvent::BufferChanged { name: name.clone() });
      if self.active_buffer_name() == Some(name.as_str()) {
        self.clamp_cursor();
      }
    } else {
      self.emit(EditorEvent::BufferAdded { name: name.clone() });
    }

    if self.active_buffer_name().is_none() {
      self.activate(Some(name));
    }
  }

  /// Close a buffer. Closing the active one activates the buffer opened after
  /// it, or nothing when it was the last one.
  pub fn close_buffer(&mut self, name: &str) -> Option<Buffer> {
    let successor = self
      .buffers
      .next_after(name)
      .filter(|next| *next != name)
      .map(String::from);
    let buffer = self.buffers.remove(name)?;
    self.emit(EditorEvent::BufferRemoved {
      name: name.to_string(),
    });

    if self.active_buffer_name() == Some(name) {
      self.activate(successor);
    }
    Some(buffer)
  }

  pub fn pin_buffer(&mut self, name: &str) -> bool {
    if !self.buffers.pin(name) {
      return false;
    }
    self.emit(EditorEvent::BufferPinned {
      name: name.to_string(),
    });
    true
  }

  pub fn unpin_buffer(&mut self, name: &str) -> bool {
    if !self.buffers.unpin(name) {
      return false;
    }
    self.emit(EditorEvent::BufferUnpinned {
      name: name.to_string(),
    });
    true
  }

  /// Run a cursor motion against the active buffer and publish where the
  /// cursor ended up. Does nothing without an active buffer.
  pub fn motion(&mut self, f: impl FnOnce(&mut Cursor, &Buffer, Mode)) -> bool {
    let mode = self.mode();
    let mut cursor = self.cursor();
    let Some(buffer) = self.active_buffer() else {
      return false;
    };
    f(&mut cursor, buffer, mode);
    self.set_cursor(cursor)
  }

  /// Run a mutation against the active buffer together with the cursor.
  ///
  /// Returns `None` without running `f` when there is no active buffer or
  /// it is readonly. `BufferChanged` is published when the buffer's
  /// revision moved.
  pub fn edit<R>(&mut self, f: impl FnOnce(&mut Buffer, &mut Cursor) -> R) -> Option<R> {
    let name = self.active_buffer_name()?.to_string();
    let mut cursor = self.cursor();
    let buffer = self.buffers.get_mut(&name)?;
    if buffer.is_readonly() {
      tracing::debug!(buffer = %name, "ignoring edit of readonly buffer");
      return None;
    }

    let revision = buffer.revision();
    let result = f(buffer, &mut cursor);
    let changed = buffer.revision() != revision;

    if changed {
      self.emit(EditorEvent::BufferChanged { name });
    }
    self.set_cursor(cursor);
    Some(result)
  }

  fn clamp_cursor(&mut self) {
    let mode = self.mode();
    let mut cursor = self.cursor();
    match self.active_buffer() {
      Some(buffer) => cursor.clamp(buffer, mode),
      None => cursor = Cursor::default(),
    }
    self.set_cursor(cursor);
  }
}

impl Default for Editor {
  fn default() -> Self {
    Self::new(EditorConfig::default())
  }
}

impl fmt::Debug for Editor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Editor")
      .field("buffers", &self.buffers.len())
      .field("active", self.active.get())
      .field("mode", self.mode.get())
      .field("cursor", self.cursor.get())
      .field("pending", self.pending.get())
      .field("anchor", self.anchor.get())
      .field("clipboard", &self.clipboard.name())
      .field("config", &self.config)
      .finish()
  }
}
