//! Character classification for word motions.
//!
//! `w`, `b` and `e` style motions split text into runs of one
//! [`CharCategory`]. The capitalised variants (`W`, `B`, `E`) only care about
//! whitespace and use [`LongWordCategory`] instead.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharCategory {
  Whitespace,
  Word,
  Punctuation,
}

/// Two-way split used by WORD motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LongWordCategory {
  Whitespace,
  NonWhitespace,
}

/// Classify a character for word motions.
///
/// A missing character (past the end of a line) counts as whitespace, which
/// is what lets motions treat line boundaries as word boundaries.
pub fn categorize_char(ch: Option<char>) -> CharCategory {
  match ch {
    None => CharCategory::Whitespace,
    Some(c) if char_is_whitespace(c) => CharCategory::Whitespace,
    Some(c) if char_is_word(c) => CharCategory::Word,
    Some(_) => CharCategory::Punctuation,
  }
}

pub fn categorize_long_word_char(ch: Option<char>) -> LongWordCategory {
  match ch {
    Some(c) if !char_is_whitespace(c) => LongWordCategory::NonWhitespace,
    _ => LongWordCategory::Whitespace,
  }
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  ch.is_whitespace()
}

#[inline]
pub fn char_is_word(ch: char) -> bool {
  ch.is_alphanumeric() || ch == '_'
}
