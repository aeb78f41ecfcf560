//! Terminal input mapping.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Auto-repeat
//! is left to the terminal: every press or repeat event is one action.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
