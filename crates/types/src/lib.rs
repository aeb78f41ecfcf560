//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the rules engine, the session
//! driver, the terminal view and any external presentation layer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Gravity
//!
//! The gravity interval shrinks by 100ms per level and is floored at 100ms:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 900ms |
//! | 5 | 500ms |
//! | 9+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.color(), "#ff00ff");
//! assert_eq!(PieceKind::T.cell_code(), 3);
//! assert_ne!(GameAction::Pause, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Board height as a `usize`, for array lengths.
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Board width as a `usize`, for array lengths.
pub const BOARD_COLS: usize = BOARD_WIDTH as usize;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0 (one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Fastest gravity interval, reached at level 9
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per row descended with a soft drop
pub const SOFT_DROP_POINTS_PER_ROW: u32 = 1;

/// Points per row descended with a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table, indexed by lines cleared in one lock (0-4).
///
/// Points are multiplied by `level + 1`.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each kind has a display color used only by presentation:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Magenta
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in cell-code order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Display color as a CSS hex string.
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color(), "#00ffff");
    /// assert_eq!(PieceKind::L.color(), "#ff8800");
    /// ```
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#00ffff",
            PieceKind::O => "#ffff00",
            PieceKind::T => "#ff00ff",
            PieceKind::S => "#00ff00",
            PieceKind::Z => "#ff0000",
            PieceKind::J => "#0000ff",
            PieceKind::L => "#ff8800",
        }
    }

    /// Display color as RGB bytes (same palette as [`PieceKind::color`]).
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            PieceKind::I => [0x00, 0xff, 0xff],
            PieceKind::O => [0xff, 0xff, 0x00],
            PieceKind::T => [0xff, 0x00, 0xff],
            PieceKind::S => [0x00, 0xff, 0x00],
            PieceKind::Z => [0xff, 0x00, 0x00],
            PieceKind::J => [0x00, 0x00, 0xff],
            PieceKind::L => [0xff, 0x88, 0x00],
        }
    }

    /// Compact board encoding: 1-7 in [`PieceKind::ALL`] order (0 is empty).
    pub fn cell_code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::cell_code`].
    pub fn from_cell_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// Player intents and host commands
///
/// Movement actions are rules-engine transitions. `Pause` and `Restart` are
/// session commands and never reach the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (+1 point)
    SoftDrop,
    /// Drop piece to its landing row and lock it (+2 points per row)
    HardDrop,
    /// Rotate piece 90° (no wall kicks)
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a new game
    Restart,
}

/// Event recorded by the rules engine each time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points from the line-clear table (already level-multiplied).
    pub line_clear_score: u32,
    /// Hard drop distance bonus awarded with this lock (0 for gravity locks).
    pub drop_bonus: u32,
    /// The replacement piece did not fit and the game ended.
    pub topped_out: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_codes_roundtrip_for_every_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_cell_code(kind.cell_code()), Some(kind));
        }
        assert_eq!(PieceKind::from_cell_code(0), None);
        assert_eq!(PieceKind::from_cell_code(8), None);
    }

    #[test]
    fn hex_and_rgb_palettes_agree() {
        for kind in PieceKind::ALL {
            let [r, g, b] = kind.rgb();
            assert_eq!(kind.color(), format!("#{:02x}{:02x}{:02x}", r, g, b));
        }
    }

    #[test]
    fn json_names_match_the_host_protocol() {
        assert_eq!(serde_json::to_string(&PieceKind::T).unwrap(), "\"t\"");
        assert_eq!(
            serde_json::to_string(&GameAction::HardDrop).unwrap(),
            "\"hardDrop\""
        );
        let kind: PieceKind = serde_json::from_str("\"l\"").unwrap();
        assert_eq!(kind, PieceKind::L);
        assert!(serde_json::from_str::<GameAction>("\"hold\"").is_err());
    }

    #[test]
    fn score_table_matches_rules() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(BASE_DROP_MS - 9 * DROP_STEP_MS, DROP_INTERVAL_MIN_MS);
    }
}
