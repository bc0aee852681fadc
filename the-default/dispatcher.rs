//! Key sequence resolution.
//!
//! The dispatcher turns key tokens into keymap invocations. It is a small
//! state machine:
//!
//! ```text
//!            exact match, no longer binding / invalid
//!        +------------------------------------------+
//!        v                                          |
//!      Idle --- prefix (or exact + prefix) ---> Accumulating
//!        ^                                          |
//!        +------ debounce deadline passes ----------+
//!                (run exact match, if any)
//! ```
//!
//! Two inputs bypass the queue entirely: a key typed while an operator waits
//! for its argument (after `f` / `F`), and every key typed in INSERT mode.
//!
//! Time is never read from a clock here. Callers pass `now` into every
//! method, and either poll with [`InputDispatcher::poll_timeout`] or let a
//! [`SequenceTimeout`](crate::SequenceTimeout) call back through
//! [`InputDispatcher::expire`].

use std::time::Duration;

use smallvec::SmallVec;
use the_event::send_blocking;
use the_lib::{
  editor::{
    Editor,
    EditorConfig,
    PendingAction,
  },
  mode::Mode,
};
use tokio::{
  sync::mpsc::Sender,
  time::Instant,
};

use crate::{
  Command,
  KeyEvent,
  Keymaps,
  TimerEvent,
  execute,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
  Idle,
  Accumulating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
  /// The key produced no token, or nothing was due.
  Ignored,
  /// A binding ran.
  Executed,
  /// INSERT mode inserted the typed character.
  Inserted,
  /// The sequence may continue; waiting for more keys.
  Pending,
  /// The sequence matched nothing and was dropped.
  Cancelled,
  /// The key was taken as the argument of a pending operator.
  ArgumentConsumed,
}

#[derive(Debug)]
pub struct InputDispatcher {
  queue:      SmallVec<[String; 4]>,
  deadline:   Option<Instant>,
  generation: u64,
  timeout:    Duration,
  timer:      Option<Sender<TimerEvent>>,
}

impl Default for InputDispatcher {
  fn default() -> Self {
    Self::from_config(&EditorConfig::default())
  }
}

impl InputDispatcher {
  pub fn new(timeout: Duration) -> Self {
    Self {
      queue: SmallVec::new(),
      deadline: None,
      generation: 0,
      timeout,
      timer: None,
    }
  }

  pub fn from_config(config: &EditorConfig) -> Self {
    Self::new(config.sequence_timeout_duration())
  }

  /// Report every arm and cancel to an async timer.
  #[must_use]
  pub fn with_timer(mut self, timer: Sender<TimerEvent>) -> Self {
    self.timer = Some(timer);
    self
  }

  pub fn timeout(&self) -> Duration {
    self.timeout
  }

  pub fn set_timeout(&mut self, timeout: Duration) {
    self.timeout = timeout;
  }

  pub fn state(&self) -> DispatchState {
    if self.queue.is_empty() {
      DispatchState::Idle
    } else {
      DispatchState::Accumulating
    }
  }

  /// Keys typed so far in the current sequence.
  pub fn pending_keys(&self) -> &[String] {
    &self.queue
  }

  pub fn deadline(&self) -> Option<Instant> {
    self.deadline
  }

  /// Generation of the most recent arm. Timer notifications carrying an
  /// older generation are stale.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn handle_key(
    &mut self,
    editor: &mut Editor,
    keymaps: &Keymaps,
    event: KeyEvent,
    now: Instant,
  ) -> DispatchOutcome {
    match event.token() {
      Some(token) => self.handle_token(editor, keymaps, &token, now),
      None => DispatchOutcome::Ignored,
    }
  }

  pub fn handle_token(
    &mut self,
    editor: &mut Editor,
    keymaps: &Keymaps,
    token: &str,
    now: Instant,
  ) -> DispatchOutcome {
    // A window that lapsed before this key arrived is settled first, so the
    // key starts a fresh sequence.
    if self.deadline.is_some_and(|deadline| now >= deadline) {
      self.resolve(editor, keymaps);
    }

    if let Some(action) = editor.take_pending_action() {
      self.reset();
      apply_argument(editor, action, token);
      return DispatchOutcome::ArgumentConsumed;
    }

    if editor.mode() == Mode::Insert {
      self.reset();
      if let Some(keymap) = keymaps.get(Mode::Insert, token) {
        keymap.action.run(editor);
        return DispatchOutcome::Executed;
      }
      return match single_char(token) {
        Some(ch) if !ch.is_control() => {
          execute(editor, Command::InsertChar(ch));
          DispatchOutcome::Inserted
        },
        _ => DispatchOutcome::Ignored,
      };
    }

    self.queue.push(token.to_string());
    let mode = editor.mode();
    let sequence = self.sequence();
    let exact = keymaps.get(mode, &sequence).map(|keymap| keymap.action);
    let is_prefix = keymaps.has_prefix(mode, &sequence);

    match exact {
      Some(action) if !is_prefix => {
        self.reset();
        action.run(editor);
        DispatchOutcome::Executed
      },
      _ if is_prefix => {
        self.arm(now);
        DispatchOutcome::Pending
      },
      _ => {
        tracing::debug!(%mode, %sequence, "dropping unbound key sequence");
        self.reset();
        DispatchOutcome::Cancelled
      },
    }
  }

  /// Resolve the sequence if its deadline has passed at `now`.
  pub fn poll_timeout(
    &mut self,
    editor: &mut Editor,
    keymaps: &Keymaps,
    now: Instant,
  ) -> DispatchOutcome {
    match self.deadline {
      Some(deadline) if now >= deadline => self.resolve(editor, keymaps),
      _ => DispatchOutcome::Ignored,
    }
  }

  /// Resolve the sequence for a timer that fired for `generation`. Stale
  /// generations are ignored.
  pub fn expire(
    &mut self,
    editor: &mut Editor,
    keymaps: &Keymaps,
    generation: u64,
  ) -> DispatchOutcome {
    if generation != self.generation || self.deadline.is_none() {
      return DispatchOutcome::Ignored;
    }
    self.resolve(editor, keymaps)
  }

  /// Drop the current sequence without running anything.
  pub fn reset(&mut self) {
    self.queue.clear();
    if self.deadline.take().is_some() {
      self.notify(TimerEvent::Cancel);
    }
  }

  fn sequence(&self) -> String {
    self.queue.concat()
  }

  fn resolve(&mut self, editor: &mut Editor, keymaps: &Keymaps) -> DispatchOutcome {
    let sequence = self.sequence();
    let action = keymaps
      .get(editor.mode(), &sequence)
      .map(|keymap| keymap.action);
    self.queue.clear();
    self.deadline = None;

    match action {
      Some(action) => {
        action.run(editor);
        DispatchOutcome::Executed
      },
      None => {
        tracing::debug!(%sequence, "key sequence timed out without a binding");
        DispatchOutcome::Cancelled
      },
    }
  }

  fn arm(&mut self, now: Instant) {
    self.generation = self.generation.wrapping_add(1);
    let deadline = now + self.timeout;
    self.deadline = Some(deadline);
    self.notify(TimerEvent::Arm {
      generation: self.generation,
      deadline,
    });
  }

  fn notify(&self, event: TimerEvent) {
    if let Some(timer) = &self.timer {
      send_blocking(timer, event);
    }
  }
}

fn apply_argument(editor: &mut Editor, action: PendingAction, token: &str) {
  match action {
    PendingAction::FindChar { direction } => {
      let Some(ch) = single_char(token) else {
        tracing::debug!(token, "find expects a single character");
        return;
      };
      editor.motion(|cursor, buffer, _| {
        cursor.find(buffer, ch, direction);
      });
    },
  }
}

fn single_char(token: &str) -> Option<char> {
  let mut chars = token.chars();
  match (chars.next(), chars.next()) {
    (Some(ch), None) => Some(ch),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use the_lib::buffer::Buffer;

  use super::*;
  use crate::default;

  const TIMEOUT: Duration = Duration::from_millis(300);

  fn setup(content: &str) -> (Editor, Keymaps, InputDispatcher) {
    let mut editor = Editor::default();
    editor.open_buffer(Buffer::new("main", content));
    (editor, default(), InputDispatcher::new(TIMEOUT))
  }

  #[test]
  fn test_single_key_runs_immediately() {
    let (mut editor, keymaps, mut dispatcher) = setup("foo bar");
    let now = Instant::now();
    assert_eq!(
      dispatcher.handle_token(&mut editor, &keymaps, "w", now),
      DispatchOutcome::Executed
    );
    assert_eq!(editor.cursor().col, 4);
    assert_eq!(dispatcher.state(), DispatchState::Idle);
    assert_eq!(dispatcher.deadline(), None);
  }

  #[test]
  fn test_prefix_waits_for_next_key() {
    let (mut editor, keymaps, mut dispatcher) = setup("one\ntwo");
    editor.set_cursor(the_lib::cursor::Cursor::new(1, 2));
    let now = Instant::now();

    assert_eq!(
      dispatcher.handle_token(&mut editor, &keymaps, "g", now),
      DispatchOutcome::Pending
    );
    assert_eq!(dispatcher.state(), DispatchState::Accumulating);
    assert_eq!(dispatcher.pending_keys(), ["g"]);
    assert_eq!(dispatcher.deadline(), Some(now + TIMEOUT));

    assert_eq!(
      dispatcher.handle_token(&mut editor, &keymaps, "g", now + TIMEOUT / 2),
      DispatchOutcome::Executed
    );
    assert_eq!(editor.cursor().row, 0);
    assert_eq!(dispatcher.state(), DispatchState::Idle);
  }

  #[test]
  fn test_invalid_sequence_is_dropped() {
    let (mut editor, keymaps, mut dispatcher) = setup("abc");
    let now = Instant::now();
    dispatcher.handle_token(&mut editor, &keymaps, "g", now);
    assert_eq!(
      dispatcher.handle_token(&mut editor, &keymaps, "x", now),
      DispatchOutcome::Cancelled
    );
    assert_eq!(dispatcher.state(), DispatchState::Idle);
    assert_eq!(
      dispatcher.handle_token(&mut editor, &keymaps, "Q", now),
      DispatchOutcome::Cancelled
    );
  }

  #[test]
  fn test_poll_timeout_respects_deadline() {
    let (mut editor, keymaps, mut dispatcher) = setup("abc");
    let now = Instant::now();
    dispatcher.handle_token(&mut editor, &keymaps, "[", now);

    assert_eq!(
      dispatcher.poll_timeout(&mut editor, &keymaps, now + TIMEOUT / 2),
      DispatchOutcome::Ignored
    );
    assert_eq!(dispatcher.state(), DispatchState::Accumulating);

    // "[" alone is bound to nothing.
    assert_eq!(
      dispatcher.poll_timeout(&mut editor, &keymaps, now + TIMEOUT),
      DispatchOutcome::Cancelled
    );
    assert_eq!(dispatcher.state(), DispatchState::Idle);
  }

  #[test]
  fn test_stale_generation_is_ignored() {
    let (mut editor, keymaps, mut dispatcher) = setup("abc");
    let now = Instant::now();
    dispatcher.handle_token(&mut editor, &keymaps, "g", now);
    let first = dispatcher.generation();
    dispatcher.handle_token(&mut editor, &keymaps, "g", now);

    assert_eq!(
      dispatcher.expire(&mut editor, &keymaps, first),
      DispatchOutcome::Ignored
    );

    dispatcher.handle_token(&mut editor, &keymaps, "]", now);
    assert_eq!(
      dispatcher.expire(&mut editor, &keymaps, first),
      DispatchOutcome::Ignored
    );
    let current = dispatcher.generation();
    assert_eq!(
      dispatcher.expire(&mut editor, &keymaps, current),
      DispatchOutcome::Cancelled
    );
    assert_eq!(
      dispatcher.expire(&mut editor, &keymaps, current),
      DispatchOutcome::Ignored
    );
  }

  #[test]
  fn test_unmapped_insert_keys() {
    let (mut editor, keymaps, mut dispatcher) = setup("");
    let now = Instant::now();
    dispatcher.handle_token(&mut editor, &keymaps, "i", now);
    assert_eq!(editor.mode(), Mode::Insert);

    assert_eq!(
      dispatcher.handle_token(&mut editor, &keymaps, "<C-a>", now),
      DispatchOutcome::Ignored
    );
    assert_eq!(
      dispatcher.handle_token(&mut editor, &keymaps, "\u{7}", now),
      DispatchOutcome::Ignored
    );
    assert_eq!(
      editor.active_buffer().map(Buffer::text),
      Some(String::new())
    );
  }

  #[test]
  fn test_argument_must_be_single_char() {
    let (mut editor, keymaps, mut dispatcher) = setup("a<b");
    let now = Instant::now();
    dispatcher.handle_token(&mut editor, &keymaps, "f", now);
    assert_eq!(
      dispatcher.handle_token(&mut editor, &keymaps, "<Esc>", now),
      DispatchOutcome::ArgumentConsumed
    );
    assert_eq!(editor.cursor().col, 0);
    assert_eq!(editor.pending_action(), None);
  }
}
