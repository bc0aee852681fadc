//! Change propagation for editor state.
//!
//! - [`Signal`]: a value cell with synchronous change subscribers.
//! - [`EventBus`]: typed publish/subscribe keyed by an event's kind.
//! - [`AsyncHook`]: debounced handlers running on a tokio task.

mod bus;
mod debounce;
mod signal;

pub use bus::{
  Event,
  EventBus,
  ListenerId,
};
pub use debounce::{
  AsyncHook,
  send_blocking,
  try_send,
};
pub use signal::{
  Signal,
  SubscriptionId,
};
