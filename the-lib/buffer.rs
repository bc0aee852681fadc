//! Line-oriented text storage for a single document.
//!
//! A [`Buffer`] is a list of lines that always holds at least one (possibly
//! empty) line. Columns count `char`s, and every mutation primitive is
//! defensive: out-of-range rows, a readonly buffer or an empty range make the
//! call a no-op instead of an error.
//!
//! Insertion always happens *before* the given column, so typing at the
//! cursor column and then advancing the cursor by one leaves it right after
//! the new character.

use serde::{
  Deserialize,
  Serialize,
};
use the_event::{
  Signal,
  SubscriptionId,
};

use crate::{
  position::Position,
  selection::Selection,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
  pub readonly: bool,
  pub filetype: String,
}

impl Default for BufferConfig {
  fn default() -> Self {
    Self {
      readonly: false,
      filetype: "text".to_string(),
    }
  }
}

#[derive(Debug)]
pub struct Buffer {
  name:   String,
  config: BufferConfig,
  lines:  Signal<Vec<String>>,
}

/// Byte offset of column `col` in `line`, clamped to the end of the line.
fn byte_index(line: &str, col: usize) -> usize {
  line
    .char_indices()
    .nth(col)
    .map_or(line.len(), |(idx, _)| idx)
}

fn char_len(line: &str) -> usize {
  line.chars().count()
}

impl Buffer {
  pub fn new(name: impl Into<String>, content: &str) -> Self {
    Self::with_config(name, content, BufferConfig::default())
  }

  pub fn with_config(name: impl Into<String>, content: &str, config: BufferConfig) -> Self {
    let lines = content.split('\n').map(String::from).collect();
    Self {
      name: name.into(),
      config,
      lines: Signal::new(lines),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn config(&self) -> &BufferConfig {
    &self.config
  }

  pub fn is_readonly(&self) -> bool {
    self.config.readonly
  }

  pub fn filetype(&self) -> &str {
    &self.config.filetype
  }

  pub fn lines(&self) -> &[String] {
    self.lines.get()
  }

  pub fn line(&self, row: usize) -> Option<&str> {
    self.lines.get().get(row).map(String::as_str)
  }

  pub fn line_count(&self) -> usize {
    self.lines.get().len()
  }

  /// Length of `row` in chars, 0 for a missing row.
  pub fn line_len(&self, row: usize) -> usize {
    self.line(row).map_or(0, char_len)
  }

  pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
    self.line(row)?.chars().nth(col)
  }

  pub fn text(&self) -> String {
    self.lines.get().join("\n")
  }

  /// Advances on every mutation that went through.
  pub fn revision(&self) -> u64 {
    self.lines.version()
  }

  pub fn subscribe(&mut self, mut subscriber: impl FnMut(&[String]) + 'static) -> SubscriptionId {
    self
      .lines
      .subscribe(move |lines: &Vec<String>| subscriber(lines))
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    self.lines.unsubscribe(id)
  }

  fn can_edit(&self, row: usize) -> bool {
    !self.config.readonly && row < self.line_count()
  }

  /// Insert `ch` before column `col`. A column past the end appends.
  pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> bool {
    if ch == '\n' {
      return self.split_line(row, col);
    }
    if !self.can_edit(row) {
      return false;
    }
    self.lines.update(|lines| {
      let line = &mut lines[row];
      let idx = byte_index(line, col);
      line.insert(idx, ch);
    });
    true
  }

  /// Insert single-line `text` before column `col`. Text containing line
  /// breaks is handed to [`Buffer::paste_text_at`].
  pub fn insert_text(&mut self, row: usize, col: usize, text: &str) -> bool {
    if text.contains('\n') {
      return self.paste_text_at(row, col, text);
    }
    if text.is_empty() || !self.can_edit(row) {
      return false;
    }
    self.lines.update(|lines| {
      let line = &mut lines[row];
      let idx = byte_index(line, col);
      line.insert_str(idx, text);
    });
    true
  }

  /// Break `row` in two at `col`.
  pub fn split_line(&mut self, row: usize, col: usize) -> bool {
    if !self.can_edit(row) {
      return false;
    }
    self.lines.update(|lines| {
      let line = &mut lines[row];
      let after = line.split_off(byte_index(line, col));
      lines.insert(row + 1, after);
    });
    true
  }

  /// Backspace: remove the character just before `col`.
  pub fn delete_char(&mut self, row: usize, col: usize) -> bool {
    if col == 0 || !self.can_edit(row) {
      return false;
    }
    let line = &self.lines.get()[row];
    let from = byte_index(line, col - 1);
    let to = byte_index(line, col);
    if from == to {
      return false;
    }
    self.lines.update(|lines| {
      lines[row].replace_range(from..to, "");
    });
    true
  }

  /// Append line `row` to the line above it and remove it.
  ///
  /// Returns the join column, i.e. the old length of the previous line.
  pub fn merge_with_previous_line(&mut self, row: usize) -> Option<usize> {
    if row == 0 || !self.can_edit(row) {
      return None;
    }
    let join = self.line_len(row - 1);
    self.lines.update(|lines| {
      let current = lines.remove(row);
      lines[row - 1].push_str(&current);
    });
    Some(join)
  }

  /// Delete the inclusive range covered by `selection` and return the
  /// position where the removed text started. A start column past the end
  /// of its line comes back clamped to the line length.
  pub fn delete_selection(&mut self, selection: &Selection) -> Position {
    let Selection { start, end } = *selection;
    let at = Position::new(start.row, start.col.min(self.line_len(start.row)));
    if !self.can_edit(end.row) {
      return at;
    }

    if start.row == end.row {
      let line = &self.lines.get()[start.row];
      let from = byte_index(line, start.col);
      let to = byte_index(line, end.col.saturating_add(1));
      if from < to {
        self.lines.update(|lines| {
          lines[start.row].replace_range(from..to, "");
        });
      }
      return at;
    }

    self.lines.update(|lines| {
      let end_line = &lines[end.row];
      let tail = end_line[byte_index(end_line, end.col.saturating_add(1))..].to_string();
      let head = &mut lines[start.row];
      head.truncate(byte_index(head, start.col));
      head.push_str(&tail);
      lines.drain(start.row + 1..=end.row);
    });
    at
  }

  /// Insert `text`, which may span several lines, before `(row, col)`.
  ///
  /// The first line of `text` is joined to the part of the line before
  /// `col`, the last one to the part after it, and any lines in between are
  /// inserted whole.
  pub fn paste_text_at(&mut self, row: usize, col: usize, text: &str) -> bool {
    if text.is_empty() || !self.can_edit(row) {
      return false;
    }
    self.lines.update(|lines| {
      let line = &mut lines[row];
      let after = line.split_off(byte_index(line, col));

      let mut segments = text.split('\n');
      if let Some(first) = segments.next() {
        line.push_str(first);
      }

      let mut rest: Vec<String> = segments.map(String::from).collect();
      match rest.last_mut() {
        Some(last) => {
          last.push_str(&after);
          lines.splice(row + 1..row + 1, rest);
        },
        None => lines[row].push_str(&after),
      }
    });
    true
  }

  /// Insert whole lines below `row`.
  pub fn insert_lines<I, S>(&mut self, row: usize, new_lines: I) -> bool
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    if !self.can_edit(row) {
      return false;
    }
    let new_lines: Vec<String> = new_lines.into_iter().map(Into::into).collect();
    if new_lines.is_empty() {
      return false;
    }
    self.lines.update(|lines| {
      lines.splice(row + 1..row + 1, new_lines);
    });
    true
  }

  /// The text covered by `selection`, both ends included, with rows joined
  /// by `\n`. Empty when the selection points past the last line.
  pub fn text_from_selection(&self, selection: &Selection) -> String {
    let Selection { start, end } = *selection;
    let lines = self.lines.get();
    if end.row >= lines.len() {
      return String::new();
    }

    let end_line = &lines[end.row];
    let end_idx = byte_index(end_line, end.col.saturating_add(1));

    if start.row == end.row {
      let from = byte_index(end_line, start.col);
      return end_line.get(from..end_idx).unwrap_or_default().to_string();
    }

    let start_line = &lines[start.row];
    let mut text = String::new();
    text.push_str(&start_line[byte_index(start_line, start.col)..]);
    text.push('\n');
    for line in &lines[start.row + 1..end.row] {
      text.push_str(line);
      text.push('\n');
    }
    text.push_str(&end_line[..end_idx]);
    text
  }
}
