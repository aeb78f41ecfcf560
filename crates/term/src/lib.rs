//! Terminal presentation for the game.
//!
//! A small game-oriented rendering layer: [`GameView`] turns a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`Frame`] of colored
//! glyphs (pure, testable), and [`TerminalRenderer`] flushes frames through
//! crossterm.

pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use game_view::{Frame, GameView, Glyph, Rgb};
pub use renderer::{encode_full_into, TerminalRenderer};
