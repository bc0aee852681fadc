use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A mutable cell that tells its subscribers about every change.
///
/// Subscribers run synchronously inside [`Signal::set`] and
/// [`Signal::update`], so a write is visible to everyone before the call
/// returns. The `version` counter advances once per observed change and can
/// be used to cache values derived from the cell.
pub struct Signal<T> {
  value:       T,
  version:     u64,
  next_id:     u64,
  subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

impl<T> Signal<T> {
  pub fn new(value: T) -> Self {
    Self {
      value,
      version: 0,
      next_id: 0,
      subscribers: Vec::new(),
    }
  }

  pub fn get(&self) -> &T {
    &self.value
  }

  pub fn version(&self) -> u64 {
    self.version
  }

  /// Mutate the value in place. Always counts as a change.
  pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
    let result = f(&mut self.value);
    self.notify();
    result
  }

  pub fn subscribe(&mut self, subscriber: impl FnMut(&T) + 'static) -> SubscriptionId {
    let id = SubscriptionId(self.next_id);
    self.next_id += 1;
    self.subscribers.push((id, Box::new(subscriber)));
    id
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    let before = self.subscribers.len();
    self.subscribers.retain(|(sub, _)| *sub != id);
    self.subscribers.len() != before
  }

  pub fn subscriber_count(&self) -> usize {
    self.subscribers.len()
  }

  fn notify(&mut self) {
    self.version += 1;
    for (_, subscriber) in &mut self.subscribers {
      subscriber(&self.value);
    }
  }
}

impl<T: PartialEq> Signal<T> {
  /// Replace the value. Subscribers only hear about it when it differs from
  /// the current one. Returns whether anything changed.
  pub fn set(&mut self, value: T) -> bool {
    if self.value == value {
      return false;
    }
    self.value = value;
    self.notify();
    true
  }
}

impl<T: Default> Default for Signal<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Signal")
      .field("value", &self.value)
      .field("version", &self.version)
      .field("subscribers", &self.subscribers.len())
      .finish()
  }
}
