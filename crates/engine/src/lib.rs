//! Session driver for the rules engine.
//!
//! The core crate is timer-free: it only knows how to compute the next state.
//! A [`Session`] owns the one live [`GameState`](blockfall_core::GameState),
//! accumulates frame time into gravity ticks at the level's cadence, handles
//! pause and restart, and applies queued player intents one at a time so that
//! gravity and input can never interleave inside a transition.
//!
//! ```
//! use blockfall_engine::Session;
//! use blockfall_types::GameAction;
//!
//! let mut session = Session::new(7);
//! session.queue_action(GameAction::HardDrop);
//! session.update(16).unwrap();
//! assert_eq!(session.state().piece_id(), 2);
//! ```

pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use session::Session;
