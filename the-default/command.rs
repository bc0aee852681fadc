//! Command execution against the editor state.

use the_lib::{
  clipboard::{
    ClipboardError,
    ClipboardType,
  },
  cursor::Cursor,
  editor::{
    Editor,
    PendingAction,
  },
  mode::Mode,
};

use crate::{
  Command,
  Direction,
  WordMotion,
};

pub fn command_from_name(name: &str) -> Option<Command> {
  match name {
    "insert_mode" => Some(Command::insert_mode()),
    "normal_mode" => Some(Command::normal_mode()),
    "visual_mode" | "select_mode" => Some(Command::visual_mode()),
    "exit_visual_mode" => Some(Command::exit_visual_mode()),
    "command_mode" => Some(Command::command_mode()),

    "next_buffer" | "goto_next_buffer" => Some(Command::next_buffer()),
    "prev_buffer" | "goto_previous_buffer" => Some(Command::prev_buffer()),

    "move_char_left" => Some(Command::move_char_left()),
    "move_char_right" => Some(Command::move_char_right()),
    "move_line_up" | "move_char_up" | "move_visual_line_up" => Some(Command::move_line_up()),
    "move_line_down" | "move_char_down" | "move_visual_line_down" => {
      Some(Command::move_line_down())
    },

    "move_next_word_start" => Some(Command::move_next_word_start()),
    "move_prev_word_start" => Some(Command::move_prev_word_start()),
    "move_next_word_end" => Some(Command::move_next_word_end()),
    "move_next_long_word_start" => Some(Command::move_next_long_word_start()),
    "move_prev_long_word_start" => Some(Command::move_prev_long_word_start()),
    "move_next_long_word_end" => Some(Command::move_next_long_word_end()),

    "goto_file_start" => Some(Command::goto_file_start()),
    "goto_line_start" => Some(Command::goto_line_start()),
    "goto_line_end" => Some(Command::goto_line_end()),
    "find_next_char" => Some(Command::find_next_char()),
    "find_prev_char" => Some(Command::find_prev_char()),

    "yank" => Some(Command::yank()),
    "paste" | "paste_after" => Some(Command::paste()),
    "paste_over_selection" | "replace_with_yanked" => Some(Command::paste_over_selection()),
    "delete_selection" => Some(Command::delete_selection()),

    "insert_newline" => Some(Command::insert_newline()),
    "delete_char_backward" => Some(Command::delete_char_backward()),
    "insert_tab" => Some(Command::insert_tab()),

    _ => None,
  }
}

pub fn execute(editor: &mut Editor, command: Command) {
  match command {
    Command::InsertMode => {
      if editor.active_buffer().is_some_and(|buffer| !buffer.is_readonly()) {
        editor.set_mode(Mode::Insert);
      }
    },
    Command::NormalMode => {
      editor.set_mode(Mode::Normal);
    },
    Command::VisualMode => {
      let anchor = editor.cursor().position();
      editor.set_selection_anchor(Some(anchor));
      editor.set_mode(Mode::Visual);
    },
    Command::ExitVisualMode => exit_visual(editor),
    Command::CommandMode => {
      editor.set_mode(Mode::Command);
      editor.set_selection_anchor(None);
    },
    Command::NextBuffer => cycle_buffer(editor, true),
    Command::PrevBuffer => cycle_buffer(editor, false),
    Command::Move(direction) => {
      editor.motion(|cursor, buffer, mode| {
        match direction {
          Direction::Up => cursor.move_up(buffer, mode),
          Direction::Down => cursor.move_down(buffer, mode),
          Direction::Left => cursor.move_left(),
          Direction::Right => cursor.move_right(buffer, mode),
        }
      });
    },
    Command::Word(kind) => {
      editor.motion(|cursor, buffer, _| {
        match kind {
          WordMotion::NextWordStart => cursor.forward_word(buffer),
          WordMotion::PrevWordStart => cursor.backward_word(buffer),
          WordMotion::NextWordEnd => cursor.end_of_word(buffer),
          WordMotion::NextLongWordStart => cursor.forward_long_word(buffer),
          WordMotion::PrevLongWordStart => cursor.backward_long_word(buffer),
          WordMotion::NextLongWordEnd => cursor.end_of_long_word(buffer),
        }
      });
    },
    Command::GotoFileStart => {
      editor.motion(|cursor, buffer, mode| {
        cursor.row = 0;
        cursor.clamp(buffer, mode);
      });
    },
    Command::GotoLineStart => {
      editor.motion(|cursor, _, _| cursor.move_to_start_of_line());
    },
    Command::GotoLineEnd => {
      editor.motion(|cursor, buffer, _| cursor.move_to_end_of_line(buffer));
    },
    Command::FindChar(direction) => {
      editor.set_pending_action(Some(PendingAction::FindChar { direction }));
    },
    Command::Yank => yank(editor),
    Command::Paste => paste(editor),
    Command::PasteOverSelection => paste_over_selection(editor),
    Command::DeleteSelection => delete_selection(editor),
    Command::InsertNewline => {
      editor.edit(|buffer, cursor| {
        if buffer.split_line(cursor.row, cursor.col) {
          cursor.row += 1;
          cursor.col = 0;
        }
      });
    },
    Command::DeleteCharBackward => {
      editor.edit(|buffer, cursor| {
        if cursor.col > 0 {
          if buffer.delete_char(cursor.row, cursor.col) {
            cursor.col -= 1;
          }
        } else if let Some(join) = buffer.merge_with_previous_line(cursor.row) {
          cursor.row -= 1;
          cursor.col = join;
        }
      });
    },
    Command::InsertTab => {
      let width = editor.config().tab_width;
      let spaces = " ".repeat(width);
      editor.edit(|buffer, cursor| {
        if buffer.insert_text(cursor.row, cursor.col, &spaces) {
          cursor.col += width;
        }
      });
    },
    Command::InsertChar(ch) => {
      editor.edit(|buffer, cursor| {
        if buffer.insert_char(cursor.row, cursor.col, ch) {
          cursor.col += 1;
        }
      });
    },
  }
}

fn exit_visual(editor: &mut Editor) {
  editor.set_mode(Mode::Normal);
  editor.set_selection_anchor(None);
}

fn cycle_buffer(editor: &mut Editor, forward: bool) {
  let Some(current) = editor.active_buffer_name() else {
    return;
  };
  let target = if forward {
    editor.buffers().next_after(current)
  } else {
    editor.buffers().prev_before(current)
  }
  .map(String::from);

  if let Some(target) = target {
    editor.set_active_buffer(&target);
  }
}

/// Read the clipboard, logging failures. An empty clipboard reads as
/// nothing to paste.
fn read_clipboard(editor: &Editor) -> Option<String> {
  match editor.clipboard().get_contents(ClipboardType::Clipboard) {
    Ok(text) if text.is_empty() => None,
    Ok(text) => Some(text),
    Err(ClipboardError::Empty) => {
      tracing::debug!("nothing to paste");
      None
    },
    Err(err) => {
      tracing::warn!(
        provider = %editor.clipboard().name(),
        "failed to read clipboard: {err}"
      );
      None
    },
  }
}

fn yank(editor: &mut Editor) {
  let text = editor
    .selection()
    .zip(editor.active_buffer())
    .map(|(selection, buffer)| buffer.text_from_selection(&selection));

  if let Some(text) = text
    && let Err(err) = editor
      .clipboard()
      .set_contents(&text, ClipboardType::Clipboard)
  {
    tracing::warn!(
      provider = %editor.clipboard().name(),
      "failed to yank selection: {err}"
    );
  }
  exit_visual(editor);
}

fn paste(editor: &mut Editor) {
  let Some(text) = read_clipboard(editor) else {
    return;
  };
  let mode = editor.mode();

  if text.contains('\n') {
    let text = text.strip_suffix('\n').unwrap_or(&text);
    editor.edit(|buffer, cursor| {
      if buffer.insert_lines(cursor.row, text.split('\n')) {
        cursor.row += 1;
        cursor.col = 0;
      }
    });
  } else {
    editor.edit(|buffer, cursor| {
      if buffer.insert_text(cursor.row, cursor.col, &text) {
        cursor.col += text.chars().count();
        cursor.clamp(buffer, mode);
      }
    });
  }
}

fn paste_over_selection(editor: &mut Editor) {
  let Some(selection) = editor.selection() else {
    return;
  };
  let Some(text) = read_clipboard(editor) else {
    return;
  };

  editor.edit(|buffer, cursor| {
    let at = buffer.delete_selection(&selection);
    buffer.paste_text_at(at.row, at.col, &text);
    *cursor = Cursor::from(at);
    cursor.clamp(buffer, Mode::Normal);
  });
  exit_visual(editor);
}

fn delete_selection(editor: &mut Editor) {
  let Some(selection) = editor.selection() else {
    return;
  };

  editor.edit(|buffer, cursor| {
    *cursor = Cursor::from(buffer.delete_selection(&selection));
    cursor.clamp(buffer, Mode::Normal);
  });
  exit_visual(editor);
}
