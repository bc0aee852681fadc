//! Debounced handlers driven by a background tokio task.

use std::time::Duration;

use futures_executor::block_on;
use tokio::{
  sync::mpsc::{
    self,
    Sender,
    error::TrySendError,
  },
  time::Instant,
};

/// Upper bound for blocking on a full channel from synchronous code.
const SEND_TIMEOUT_MS: u64 = 2;

const CHANNEL_CAPACITY: usize = 128;

/// A handler that receives events on its own task and may postpone its work
/// until events stop arriving for a while.
///
/// Every event passes through [`AsyncHook::handle_event`], which returns the
/// deadline to wait for (or `None` to disarm). When a deadline passes
/// without a new event, [`AsyncHook::finish_debounce`] runs.
pub trait AsyncHook: Send + 'static + Sized {
  type Event: Send + 'static;

  /// Called for every received event with the currently armed deadline.
  /// Returning `Some` keeps or replaces the deadline, `None` disarms it.
  fn handle_event(&mut self, event: Self::Event, deadline: Option<Instant>) -> Option<Instant>;

  /// Called once an armed deadline passes with no newer event.
  fn finish_debounce(&mut self);

  /// Start the hook on the current tokio runtime.
  ///
  /// Outside of a runtime no worker is started and events sent to the
  /// returned channel are never handled.
  fn spawn(self) -> Sender<Self::Event> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    if tokio::runtime::Handle::try_current().is_ok() {
      tokio::spawn(run(self, rx));
    }
    tx
  }
}

/// Worker loop: wait for the next event, or for the deadline when one is
/// armed. Exits when every sender is dropped.
async fn run<Hook: AsyncHook>(mut hook: Hook, mut rx: mpsc::Receiver<Hook::Event>) {
  let mut deadline = None;
  loop {
    let event = match deadline {
      Some(at) => match tokio::time::timeout_at(at, rx.recv()).await {
        Ok(event) => event,
        Err(_) => {
          hook.finish_debounce();
          deadline = None;
          continue;
        },
      },
      None => rx.recv().await,
    };
    let Some(event) = event else {
      break;
    };
    deadline = hook.handle_event(event, deadline);
  }
}

/// Send from synchronous code, blocking at most a couple of milliseconds
/// when the channel is full. The event is dropped if it still does not fit.
pub fn send_blocking<T>(tx: &Sender<T>, data: T) {
  match tx.try_send(data) {
    Ok(()) => {},
    // Full: wait briefly for the worker to drain.
    Err(TrySendError::Full(data)) => {
      if block_on(tx.send_timeout(data, Duration::from_millis(SEND_TIMEOUT_MS))).is_err() {
        log::warn!("hook channel full, dropping event");
      }
    },
    Err(TrySendError::Closed(_)) => {
      log::warn!("attempted to send to a closed hook channel");
    },
  }
}

/// Send without blocking. Returns whether the event was queued.
pub fn try_send<T>(tx: &Sender<T>, data: T) -> bool {
  tx.try_send(data).is_ok()
}
