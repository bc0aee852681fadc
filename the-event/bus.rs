//! Typed publish/subscribe.
//!
//! Events are a closed enum implementing [`Event`]; listeners register for a
//! single kind with [`EventBus::on`] or for everything with
//! [`EventBus::on_any`].

use std::{
  fmt,
  hash::Hash,
};

use hashbrown::HashMap;

pub trait Event {
  type Kind: Copy + Eq + Hash + fmt::Debug;

  fn kind(&self) -> Self::Kind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

pub struct EventBus<E: Event> {
  listeners: HashMap<E::Kind, Vec<(ListenerId, Listener<E>)>>,
  any:       Vec<(ListenerId, Listener<E>)>,
  next_id:   u64,
}

impl<E: Event> EventBus<E> {
  pub fn new() -> Self {
    Self {
      listeners: HashMap::new(),
      any:       Vec::new(),
      next_id:   0,
    }
  }

  pub fn on(&mut self, kind: E::Kind, listener: impl FnMut(&E) + 'static) -> ListenerId {
    let id = self.next_listener_id();
    self
      .listeners
      .entry(kind)
      .or_default()
      .push((id, Box::new(listener)));
    id
  }

  pub fn on_any(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
    let id = self.next_listener_id();
    self.any.push((id, Box::new(listener)));
    id
  }

  pub fn off(&mut self, id: ListenerId) -> bool {
    let before = self.any.len();
    self.any.retain(|(listener, _)| *listener != id);
    if self.any.len() != before {
      return true;
    }

    for listeners in self.listeners.values_mut() {
      let before = listeners.len();
      listeners.retain(|(listener, _)| *listener != id);
      if listeners.len() != before {
        return true;
      }
    }
    false
  }

  /// Deliver `event` to the listeners of its kind, then to catch-all
  /// listeners, each group in registration order.
  pub fn emit(&mut self, event: &E) {
    if let Some(listeners) = self.listeners.get_mut(&event.kind()) {
      for (_, listener) in listeners.iter_mut() {
        listener(event);
      }
    }
    for (_, listener) in self.any.iter_mut() {
      listener(event);
    }
  }

  pub fn listener_count(&self) -> usize {
    self.any.len() + self.listeners.values().map(Vec::len).sum::<usize>()
  }

  fn next_listener_id(&mut self) -> ListenerId {
    let id = ListenerId(self.next_id);
    self.next_id += 1;
    id
  }
}

impl<E: Event> Default for EventBus<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: Event> fmt::Debug for EventBus<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EventBus")
      .field("kinds", &self.listeners.keys().collect::<Vec<_>>())
      .field("listeners", &self.listener_count())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::{
    cell::RefCell,
    rc::Rc,
  };

  use super::*;

  #[derive(Debug, Clone, PartialEq)]
  enum TestEvent {
    Ping(u32),
    Pong,
  }

  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  enum TestKind {
    Ping,
    Pong,
  }

  impl Event for TestEvent {
    type Kind = TestKind;

    fn kind(&self) -> TestKind {
      match self {
        TestEvent::Ping(_) => TestKind::Ping,
        TestEvent::Pong => TestKind::Pong,
      }
    }
  }

  #[test]
  fn test_emit_routes_by_kind() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bus = EventBus::<TestEvent>::new();

    let sink = log.clone();
    bus.on(TestKind::Ping, move |event| {
      sink.borrow_mut().push(format!("ping:{event:?}"))
    });
    let sink = log.clone();
    bus.on_any(move |event| sink.borrow_mut().push(format!("any:{event:?}")));

    bus.emit(&TestEvent::Ping(7));
    bus.emit(&TestEvent::Pong);

    assert_eq!(*log.borrow(), vec![
      "ping:Ping(7)".to_string(),
      "any:Ping(7)".to_string(),
      "any:Pong".to_string(),
    ]);
  }

  #[test]
  fn test_off_removes_listener() {
    let count = Rc::new(RefCell::new(0));
    let mut bus = EventBus::<TestEvent>::new();

    let sink = count.clone();
    let id = bus.on(TestKind::Pong, move |_| *sink.borrow_mut() += 1);
    assert_eq!(bus.listener_count(), 1);

    bus.emit(&TestEvent::Pong);
    assert!(bus.off(id));
    assert!(!bus.off(id));
    bus.emit(&TestEvent::Pong);

    assert_eq!(*count.borrow(), 1);
    assert_eq!(bus.listener_count(), 0);
  }
}
