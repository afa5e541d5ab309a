//! Terminal input module.
//!
//! This module is intentionally independent of the simulation. It maps
//! `crossterm` key events into [`crate::types::GameAction`] while in the mine
//! and into [`crate::types::MenuKey`] on the surface screens. Every key press
//! is consumed on its own; there are no chords and no key repeat handling.

pub mod map;

pub use tui_miner_types as types;

pub use map::{handle_key_event, handle_menu_key, is_confirm, should_quit};
