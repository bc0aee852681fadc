use std::time::Duration;

use quickcheck::{
  TestResult,
  quickcheck,
};
use the_default::{
  Command,
  DispatchOutcome,
  DispatchState,
  InputDispatcher,
  Key,
  KeyEvent,
  Keymaps,
  SequenceTimeout,
  default,
};
use the_event::AsyncHook;
use the_lib::{
  buffer::Buffer,
  cursor::Cursor,
  editor::Editor,
  mode::Mode,
};
use tokio::{
  sync::mpsc,
  time::Instant,
};

const TIMEOUT: Duration = Duration::from_millis(300);

fn editor_with(content: &str) -> Editor {
  let mut editor = Editor::default();
  editor.open_buffer(Buffer::new("main", content));
  editor
}

fn text(editor: &Editor) -> String {
  editor
    .active_buffer()
    .map(Buffer::text)
    .unwrap_or_default()
}

fn position(editor: &Editor) -> (usize, usize) {
  let cursor = editor.cursor();
  (cursor.row, cursor.col)
}

/// Default keymaps plus a lone `g` that jumps to the end of the line, so
/// `g` is both a binding and a prefix of `gg`.
fn ambiguous_keymaps() -> Keymaps {
  let mut keymaps = default();
  keymaps.set(Mode::Normal, "g", Command::GotoLineEnd);
  keymaps
}

fn type_keys(
  dispatcher: &mut InputDispatcher,
  editor: &mut Editor,
  keymaps: &Keymaps,
  keys: &[KeyEvent],
  now: Instant,
) -> Vec<DispatchOutcome> {
  keys
    .iter()
    .map(|&key| dispatcher.handle_key(editor, keymaps, key, now))
    .collect()
}

#[test]
fn lone_prefix_fires_after_timeout() {
  let keymaps = ambiguous_keymaps();
  let mut editor = editor_with("hello\nworld");
  editor.set_cursor(Cursor::new(1, 0));
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let start = Instant::now();

  assert_eq!(
    dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('g'), start),
    DispatchOutcome::Pending
  );
  assert_eq!(position(&editor), (1, 0));

  assert_eq!(
    dispatcher.poll_timeout(&mut editor, &keymaps, start + TIMEOUT - Duration::from_millis(1)),
    DispatchOutcome::Ignored
  );
  assert_eq!(position(&editor), (1, 0));

  assert_eq!(
    dispatcher.poll_timeout(&mut editor, &keymaps, start + TIMEOUT),
    DispatchOutcome::Executed
  );
  assert_eq!(position(&editor), (1, 4));
  assert_eq!(dispatcher.state(), DispatchState::Idle);
}

#[test]
fn longer_sequence_wins_over_its_prefix() {
  let keymaps = ambiguous_keymaps();
  let mut editor = editor_with("hello\nworld");
  editor.set_cursor(Cursor::new(1, 0));
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let start = Instant::now();

  let outcomes = type_keys(
    &mut dispatcher,
    &mut editor,
    &keymaps,
    &[KeyEvent::char('g'), KeyEvent::char('g')],
    start,
  );
  assert_eq!(outcomes, [DispatchOutcome::Pending, DispatchOutcome::Executed]);
  assert_eq!(position(&editor), (0, 0));

  // Nothing left to fire once the deadline passes.
  assert_eq!(
    dispatcher.poll_timeout(&mut editor, &keymaps, start + TIMEOUT * 2),
    DispatchOutcome::Ignored
  );
  assert_eq!(position(&editor), (0, 0));
}

#[test]
fn key_after_lapsed_window_starts_fresh_sequence() {
  let mut editor = editor_with("one\ntwo");
  editor.set_cursor(Cursor::new(1, 2));
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let keymaps = default();
  let start = Instant::now();

  assert_eq!(
    dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('g'), start),
    DispatchOutcome::Pending
  );
  assert_eq!(
    dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('g'), start + TIMEOUT * 2),
    DispatchOutcome::Pending
  );
  assert_eq!(position(&editor), (1, 2));
  assert_eq!(dispatcher.pending_keys(), ["g"]);
  assert_eq!(dispatcher.deadline(), Some(start + TIMEOUT * 3));
}

#[test]
fn lapsed_prefix_runs_before_next_key() {
  let mut editor = editor_with("hello\nworld");
  editor.set_cursor(Cursor::new(1, 0));
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let keymaps = ambiguous_keymaps();
  let start = Instant::now();

  dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('g'), start);
  assert_eq!(
    dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('g'), start + TIMEOUT * 2),
    DispatchOutcome::Pending
  );
  // The first `g` ran on its own; `gg` never did.
  assert_eq!(position(&editor), (1, 4));
  assert_eq!(dispatcher.pending_keys(), ["g"]);

  assert_eq!(
    dispatcher.poll_timeout(&mut editor, &keymaps, start + TIMEOUT * 3),
    DispatchOutcome::Executed
  );
  assert_eq!(position(&editor), (1, 4));
}

#[test]
fn find_char_consumes_next_key() {
  let keymaps = default();
  let mut editor = editor_with("abcxdx");
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let now = Instant::now();

  let outcomes = type_keys(
    &mut dispatcher,
    &mut editor,
    &keymaps,
    &[KeyEvent::char('f'), KeyEvent::char('x')],
    now,
  );
  assert_eq!(outcomes, [
    DispatchOutcome::Executed,
    DispatchOutcome::ArgumentConsumed
  ]);
  assert_eq!(position(&editor), (0, 3));

  // A miss leaves the cursor alone but still clears the pending operator.
  type_keys(
    &mut dispatcher,
    &mut editor,
    &keymaps,
    &[KeyEvent::char('f'), KeyEvent::char('z')],
    now,
  );
  assert_eq!(position(&editor), (0, 3));
  assert_eq!(editor.pending_action(), None);

  // The argument is never interpreted as a binding.
  type_keys(
    &mut dispatcher,
    &mut editor,
    &keymaps,
    &[KeyEvent::char('F'), KeyEvent::char('i')],
    now,
  );
  assert_eq!(editor.mode(), Mode::Normal);

  type_keys(
    &mut dispatcher,
    &mut editor,
    &keymaps,
    &[KeyEvent::char('F'), KeyEvent::char('a')],
    now,
  );
  assert_eq!(position(&editor), (0, 0));
}

#[test]
fn unnamed_key_is_ignored_while_argument_pending() {
  let keymaps = default();
  let mut editor = editor_with("abc");
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let now = Instant::now();

  dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('f'), now);
  assert_eq!(
    dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::new(Key::Home), now),
    DispatchOutcome::Ignored
  );
  assert!(editor.pending_action().is_some());

  dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('c'), now);
  assert_eq!(position(&editor), (0, 2));
}

#[test]
fn insert_mode_session() {
  let keymaps = default();
  let mut editor = editor_with("");
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let now = Instant::now();

  let keys = [
    KeyEvent::char('i'),
    KeyEvent::char('h'),
    KeyEvent::char('i'),
    KeyEvent::new(Key::Enter),
    KeyEvent::new(Key::Tab),
    KeyEvent::char('x'),
    KeyEvent::new(Key::Backspace),
    KeyEvent::new(Key::Escape),
  ];
  let outcomes = type_keys(&mut dispatcher, &mut editor, &keymaps, &keys, now);

  assert_eq!(outcomes, [
    DispatchOutcome::Executed,
    DispatchOutcome::Inserted,
    DispatchOutcome::Inserted,
    DispatchOutcome::Executed,
    DispatchOutcome::Executed,
    DispatchOutcome::Inserted,
    DispatchOutcome::Executed,
    DispatchOutcome::Executed,
  ]);
  assert_eq!(text(&editor), "hi\n    ");
  assert_eq!(editor.mode(), Mode::Normal);
  assert_eq!(position(&editor), (1, 3));
}

#[test]
fn insert_binding_shadows_typing() {
  let mut keymaps = default();
  keymaps.set(Mode::Insert, "j", Command::NormalMode);
  let mut editor = editor_with("");
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let now = Instant::now();

  dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('i'), now);
  assert_eq!(
    dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('j'), now),
    DispatchOutcome::Executed
  );
  assert_eq!(text(&editor), "");
  assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn printable_chars_insert_exactly_once() {
  fn prop(ch: char) -> TestResult {
    if ch.is_control() {
      return TestResult::discard();
    }
    let keymaps = default();
    let mut editor = editor_with("");
    let mut dispatcher = InputDispatcher::new(TIMEOUT);
    let now = Instant::now();

    dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('i'), now);
    let outcome = dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char(ch), now);

    TestResult::from_bool(
      outcome == DispatchOutcome::Inserted
        && text(&editor) == ch.to_string()
        && position(&editor) == (0, 1)
        && dispatcher.state() == DispatchState::Idle,
    )
  }
  quickcheck(prop as fn(char) -> TestResult);
}

#[test]
fn visual_yank_then_paste() {
  let keymaps = default();
  let mut editor = editor_with("hello world");
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let now = Instant::now();

  let keys = [
    KeyEvent::char('v'),
    KeyEvent::new(Key::Right),
    KeyEvent::new(Key::Right),
    KeyEvent::char('y'),
    KeyEvent::char('$'),
    KeyEvent::char('p'),
  ];
  type_keys(&mut dispatcher, &mut editor, &keymaps, &keys, now);

  assert_eq!(editor.mode(), Mode::Normal);
  assert_eq!(editor.selection(), None);
  assert_eq!(text(&editor), "hello worlheld");
}

#[test]
fn visual_delete_and_replace() {
  let keymaps = default();
  let mut editor = editor_with("one two three");
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let now = Instant::now();

  // Yank "one", then select "two" and paste over it.
  let right = KeyEvent::new(Key::Right);
  let keys = [
    KeyEvent::char('v'),
    right,
    right,
    KeyEvent::char('y'),
    KeyEvent::char('w'),
    KeyEvent::char('v'),
    right,
    right,
    KeyEvent::char('p'),
  ];
  type_keys(&mut dispatcher, &mut editor, &keymaps, &keys, now);
  assert_eq!(text(&editor), "one one three");
  assert_eq!(position(&editor), (0, 4));

  let keys = [
    KeyEvent::char('w'),
    KeyEvent::char('v'),
    right,
    right,
    right,
    right,
    KeyEvent::char('d'),
  ];
  type_keys(&mut dispatcher, &mut editor, &keymaps, &keys, now);
  assert_eq!(text(&editor), "one one ");
  assert_eq!(position(&editor), (0, 7));
  assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn buffer_cycling() {
  let keymaps = default();
  let mut editor = Editor::default();
  for name in ["a", "b", "c"] {
    editor.open_buffer(Buffer::new(name, name));
  }
  let mut dispatcher = InputDispatcher::new(TIMEOUT);
  let now = Instant::now();

  let keys = [']', 'b'].map(KeyEvent::char);
  type_keys(&mut dispatcher, &mut editor, &keymaps, &keys, now);
  assert_eq!(editor.active_buffer_name(), Some("b"));

  let keys = ['[', 'b', '[', 'b'].map(KeyEvent::char);
  type_keys(&mut dispatcher, &mut editor, &keymaps, &keys, now);
  assert_eq!(editor.active_buffer_name(), Some("c"));
}

#[tokio::test(start_paused = true)]
async fn background_timer_resolves_sequence() {
  let keymaps = ambiguous_keymaps();
  let mut editor = editor_with("hello");
  let (expired_tx, mut expired) = mpsc::channel(4);
  let timer = SequenceTimeout::new(expired_tx).spawn();
  let mut dispatcher = InputDispatcher::new(TIMEOUT).with_timer(timer);

  let start = Instant::now();
  dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('g'), start);

  let generation = expired.recv().await.unwrap();
  assert!(Instant::now() >= start + TIMEOUT);
  assert_eq!(generation, dispatcher.generation());
  assert_eq!(
    dispatcher.expire(&mut editor, &keymaps, generation),
    DispatchOutcome::Executed
  );
  assert_eq!(position(&editor), (0, 4));
}

#[tokio::test(start_paused = true)]
async fn completed_sequence_cancels_background_timer() {
  let keymaps = ambiguous_keymaps();
  let mut editor = editor_with("hello");
  let (expired_tx, mut expired) = mpsc::channel(4);
  let timer = SequenceTimeout::new(expired_tx).spawn();
  let mut dispatcher = InputDispatcher::new(TIMEOUT).with_timer(timer);

  let now = Instant::now();
  dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('g'), now);
  dispatcher.handle_key(&mut editor, &keymaps, KeyEvent::char('g'), now);

  let waited = tokio::time::timeout(TIMEOUT * 10, expired.recv()).await;
  assert!(waited.is_err());
  assert_eq!(position(&editor), (0, 0));
}
