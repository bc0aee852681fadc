//! Background timer that resolves ambiguous key sequences.
//!
//! The dispatcher itself never sleeps. When it starts waiting for the next
//! key it sends [`TimerEvent::Arm`] to a [`SequenceTimeout`] running on a
//! tokio task. If no newer event arrives before the deadline, the hook sends
//! the armed generation back on its output channel and the host hands it to
//! [`crate::InputDispatcher::expire`].

use the_event::AsyncHook;
use tokio::{
  sync::mpsc::Sender,
  time::Instant,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
  Arm { generation: u64, deadline: Instant },
  Cancel,
}

#[derive(Debug)]
pub struct SequenceTimeout {
  generation: u64,
  expired:    Sender<u64>,
}

impl SequenceTimeout {
  pub fn new(expired: Sender<u64>) -> Self {
    Self {
      generation: 0,
      expired,
    }
  }
}

impl AsyncHook for SequenceTimeout {
  type Event = TimerEvent;

  fn handle_event(&mut self, event: TimerEvent, _deadline: Option<Instant>) -> Option<Instant> {
    match event {
      TimerEvent::Arm {
        generation,
        deadline,
      } => {
        self.generation = generation;
        Some(deadline)
      },
      TimerEvent::Cancel => None,
    }
  }

  fn finish_debounce(&mut self) {
    if let Err(err) = self.expired.try_send(self.generation) {
      tracing::warn!(generation = self.generation, "dropping sequence timeout: {err}");
    }
  }
}
