//! The set of open buffers, keyed by name in the order they were opened.

use indexmap::{
  IndexMap,
  IndexSet,
};

use crate::buffer::Buffer;

#[derive(Debug, Default)]
pub struct BufferRegistry {
  buffers: IndexMap<String, Buffer>,
  pinned:  IndexSet<String>,
}

impl BufferRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `buffer` under its own name, replacing any buffer with the same
  /// name. Returns the replaced buffer.
  pub fn add(&mut self, buffer: Buffer) -> Option<Buffer> {
    self.buffers.insert(buffer.name().to_string(), buffer)
  }

  /// Remove a buffer, keeping the order of the remaining ones. A removed
  /// buffer is no longer pinned.
  pub fn remove(&mut self, name: &str) -> Option<Buffer> {
    self.pinned.shift_remove(name);
    self.buffers.shift_remove(name)
  }

  pub fn get(&self, name: &str) -> Option<&Buffer> {
    self.buffers.get(name)
  }

  pub fn get_mut(&mut self, name: &str) -> Option<&mut Buffer> {
    self.buffers.get_mut(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.buffers.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.buffers.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
    self.buffers.values()
  }

  pub fn len(&self) -> usize {
    self.buffers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffers.is_empty()
  }

  /// Pin an open buffer. Returns `false` when it is unknown or already
  /// pinned.
  pub fn pin(&mut self, name: &str) -> bool {
    self.buffers.contains_key(name) && self.pinned.insert(name.to_string())
  }

  pub fn unpin(&mut self, name: &str) -> bool {
    self.pinned.shift_remove(name)
  }

  pub fn is_pinned(&self, name: &str) -> bool {
    self.pinned.contains(name)
  }

  /// Pinned buffers in the order they were pinned.
  pub fn pinned(&self) -> impl Iterator<Item = &Buffer> {
    self.pinned.iter().filter_map(|name| self.buffers.get(name))
  }

  /// The buffer opened after `name`, wrapping around to the first one.
  pub fn next_after(&self, name: &str) -> Option<&str> {
    let idx = self.buffers.get_index_of(name)?;
    let next = (idx + 1) % self.buffers.len();
    self.buffers.get_index(next).map(|(name, _)| name.as_str())
  }

  /// The buffer opened before `name`, wrapping around to the last one.
  pub fn prev_before(&self, name: &str) -> Option<&str> {
    let idx = self.buffers.get_index_of(name)?;
    let prev = idx.checked_sub(1).unwrap_or(self.buffers.len() - 1);
    self.buffers.get_index(prev).map(|(name, _)| name.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn registry(names: &[&str]) -> BufferRegistry {
    let mut registry = BufferRegistry::new();
    for name in names {
      registry.add(Buffer::new(*name, ""));
    }
    registry
  }

  #[test]
  fn test_add_replaces_same_name() {
    let mut registry = registry(&["a", "b"]);
    let old = registry.add(Buffer::new("a", "new"));
    assert_eq!(old.map(|buf| buf.text()), Some(String::new()));
    assert_eq!(registry.get("a").map(Buffer::text), Some("new".to_string()));
    assert_eq!(registry.names().collect::<Vec<_>>(), ["a", "b"]);
  }

  #[test]
  fn test_remove_keeps_order_and_unpins() {
    let mut registry = registry(&["a", "b", "c"]);
    assert!(registry.pin("b"));
    assert!(registry.remove("b").is_some());
    assert!(registry.remove("b").is_none());
    assert!(!registry.is_pinned("b"));
    assert_eq!(registry.names().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(registry.len(), 2);
  }

  #[test]
  fn test_pinning() {
    let mut registry = registry(&["a", "b", "c"]);
    assert!(registry.pin("c"));
    assert!(registry.pin("a"));
    assert!(!registry.pin("a"));
    assert!(!registry.pin("missing"));

    let pinned: Vec<_> = registry.pinned().map(Buffer::name).collect();
    assert_eq!(pinned, ["c", "a"]);

    assert!(registry.unpin("c"));
    assert!(!registry.unpin("c"));
    assert!(!registry.is_pinned("c"));
    assert!(registry.is_pinned("a"));
  }

  #[test]
  fn test_cycling_wraps() {
    let registry = registry(&["a", "b", "c"]);
    assert_eq!(registry.next_after("a"), Some("b"));
    assert_eq!(registry.next_after("c"), Some("a"));
    assert_eq!(registry.prev_before("a"), Some("c"));
    assert_eq!(registry.prev_before("b"), Some("a"));
    assert_eq!(registry.next_after("missing"), None);

    let single = self::registry(&["only"]);
    assert_eq!(single.next_after("only"), Some("only"));
    assert_eq!(single.prev_before("only"), Some("only"));
  }
}
