//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules. It has **no dependencies** on UI,
//! timers or I/O:
//!
//! - **Deterministic**: a state plus an input always yields the same successor
//!   (the piece randomizer is seeded and lives inside the state)
//! - **Functional updates**: every transition takes `&self` and returns a new
//!   [`GameState`]; rejected moves return an identical copy
//! - **Zero-allocation**: fixed-size board and shape matrices
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision check, locking and line clearing
//! - [`pieces`]: shape matrices, spawn placement and rotation
//! - [`rng`]: uniform random piece selection
//! - [`scoring`]: line/drop points, level and gravity cadence
//! - [`game_state`]: active piece, transitions, top-out
//! - [`snapshot`]: serializable read-only view for presentation
//!
//! # Rules
//!
//! - **Uniform randomizer**: each kind has probability 1/7 on every draw; no bag
//! - **Simple rotation**: 90° matrix rotation, accepted only if it fits in place
//! - **Scoring**: `[0, 100, 300, 500, 800] * (level + 1)`, +1 per soft-drop row,
//!   +2 per hard-drop row
//! - **Level**: `lines / 10`
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//!
//! let game = GameState::new(12345);
//! let game = game.move_right().rotate();
//! let game = game.hard_drop().unwrap();
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.piece_id(), 2);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{clear_lines, create_empty_board, is_valid, Board, ClearedRows};
pub use game_state::{spawn, GameState, Phase, Tetromino};
pub use pieces::{get_shape, rotate, Shape};
pub use rng::{random_kind, PieceRandomizer};
pub use scoring::{calculate_drop_score, calculate_line_score, ScoreError};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
