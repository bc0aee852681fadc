//! Editing model: buffers, cursor motions and the shared editor state.
//!
//! Nothing in here knows about keys. Input handling lives in `the-default`,
//! which drives the types below through [`editor::Editor`].

pub mod buffer;
pub mod clipboard;
pub mod cursor;
pub mod editor;
pub mod mode;
pub mod movement;
pub mod position;
pub mod registry;
pub mod selection;
