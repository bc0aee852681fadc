use the_lib::mode::Mode;

use crate::{
  Keymaps,
  keymap,
};

const MOTION_MODES: [Mode; 3] = [Mode::Normal, Mode::Insert, Mode::Visual];
const COMMAND_LINE_MODES: [Mode; 2] = [Mode::Normal, Mode::Visual];

pub fn default() -> Keymaps {
  let mut keymaps = Keymaps::new();

  keymap!(&mut keymaps, Mode::Normal, {
    "i"  => insert_mode,
    "v"  => visual_mode,
    "]b" => next_buffer,
    "[b" => prev_buffer,
    "p"  => paste,
    "h"  => move_char_left,
    "j"  => move_line_down,
    "k"  => move_line_up,
    "l"  => move_char_right,
    "w"  => move_next_word_start,
    "b"  => move_prev_word_start,
    "e"  => move_next_word_end,
    "W"  => move_next_long_word_start,
    "B"  => move_prev_long_word_start,
    "E"  => move_next_long_word_end,
    "gg" => goto_file_start,
    "0"  => goto_line_start,
    "$"  => goto_line_end,
    "f"  => find_next_char,
    "F"  => find_prev_char,
  });

  keymap!(&mut keymaps, COMMAND_LINE_MODES, {
    ":" => command_mode,
  });

  keymap!(&mut keymaps, MOTION_MODES, {
    "<Left>"  => move_char_left,
    "<Down>"  => move_line_down,
    "<Up>"    => move_line_up,
    "<Right>" => move_char_right,
  });

  keymap!(&mut keymaps, Mode::Insert, {
    "<Esc>"   => normal_mode,
    "<Enter>" => insert_newline,
    "<BS>"    => delete_char_backward,
    "<Tab>"   => insert_tab,
  });

  keymap!(&mut keymaps, Mode::Visual, {
    "<Esc>" => exit_visual_mode,
    "y"     => yank,
    "p"     => paste_over_selection,
    "d"     => delete_selection,
  });

  keymap!(&mut keymaps, Mode::Command, {
    "<Esc>" => normal_mode,
  });

  keymaps
}
