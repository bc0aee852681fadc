//! Input event types and their keymap notation.
//!
//! A [`KeyEvent`] is turned into the token used in key sequences with
//! [`KeyEvent::token`]:
//!
//! | event            | token       |
//! |------------------|-------------|
//! | `a`              | `a`         |
//! | shift + `A`      | `A`         |
//! | escape           | `<Esc>`     |
//! | ctrl + `w`       | `<C-w>`     |
//! | alt + enter      | `<A-Enter>` |
//! | ctrl + alt + `x` | `<C-x>`     |
//! | home             | none        |
//!
//! Only one modifier is ever encoded: ctrl wins over alt, alt over meta.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
  bits: u8,
}

impl Modifiers {
  pub const CTRL: u8 = 0b0000_0001;
  pub const ALT: u8 = 0b0000_0010;
  pub const SHIFT: u8 = 0b0000_0100;
  pub const META: u8 = 0b0000_1000;

  #[must_use]
  pub const fn empty() -> Self {
    Self { bits: 0 }
  }

  #[must_use]
  pub const fn from_bits(bits: u8) -> Self {
    Self { bits }
  }

  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.bits == 0
  }

  #[must_use]
  pub const fn ctrl(self) -> bool {
    (self.bits & Self::CTRL) != 0
  }

  #[must_use]
  pub const fn alt(self) -> bool {
    (self.bits & Self::ALT) != 0
  }

  #[must_use]
  pub const fn shift(self) -> bool {
    (self.bits & Self::SHIFT) != 0
  }

  #[must_use]
  pub const fn meta(self) -> bool {
    (self.bits & Self::META) != 0
  }

  pub fn insert(&mut self, bits: u8) {
    self.bits |= bits;
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  Char(char),
  Enter,
  Escape,
  Backspace,
  Tab,
  Delete,
  Insert,
  Home,
  End,
  PageUp,
  PageDown,
  Left,
  Right,
  Up,
  Down,
  F(u8),
}

impl Key {
  /// Name used inside a bracketed token.
  fn name(self) -> String {
    match self {
      Key::Char(c) => c.to_string(),
      Key::Enter => "Enter".to_string(),
      Key::Escape => "Esc".to_string(),
      Key::Backspace => "BS".to_string(),
      Key::Tab => "Tab".to_string(),
      Key::Delete => "Del".to_string(),
      Key::Insert => "Insert".to_string(),
      Key::Home => "Home".to_string(),
      Key::End => "End".to_string(),
      Key::PageUp => "PageUp".to_string(),
      Key::PageDown => "PageDown".to_string(),
      Key::Left => "Left".to_string(),
      Key::Right => "Right".to_string(),
      Key::Up => "Up".to_string(),
      Key::Down => "Down".to_string(),
      Key::F(n) => format!("F{n}"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
  pub key:       Key,
  pub modifiers: Modifiers,
}

impl KeyEvent {
  #[must_use]
  pub const fn new(key: Key) -> Self {
    Self {
      key,
      modifiers: Modifiers::empty(),
    }
  }

  #[must_use]
  pub const fn char(c: char) -> Self {
    Self::new(Key::Char(c))
  }

  #[must_use]
  pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
    self.modifiers = modifiers;
    self
  }

  /// The keymap token for this event, or `None` for keys that have no
  /// notation without a modifier.
  pub fn token(&self) -> Option<String> {
    let prefix = if self.modifiers.ctrl() {
      Some('C')
    } else if self.modifiers.alt() {
      Some('A')
    } else if self.modifiers.meta() {
      Some('M')
    } else {
      None
    };

    if let Some(prefix) = prefix {
      return Some(format!("<{prefix}-{}>", self.key.name()));
    }

    let token = match self.key {
      Key::Char(c) => return Some(c.to_string()),
      Key::Escape => "<Esc>",
      Key::Enter => "<Enter>",
      Key::Tab => "<Tab>",
      Key::Backspace => "<BS>",
      Key::Up => "<Up>",
      Key::Down => "<Down>",
      Key::Left => "<Left>",
      Key::Right => "<Right>",
      _ => return None,
    };
    Some(token.to_string())
  }
}

impl From<Key> for KeyEvent {
  fn from(key: Key) -> Self {
    Self::new(key)
  }
}
