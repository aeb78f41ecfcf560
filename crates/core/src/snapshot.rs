//! Read-only view of a game for presentation layers.
//!
//! `GameSnapshot` is `Copy` and serde-serializable so a host in another
//! language can consume it as JSON.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::game_state::Tetromino;
use crate::pieces::{Shape, MAX_SHAPE_DIM};
use crate::types::{Cell, LockEvent, PieceKind, BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rows: u8,
    pub cols: u8,
    /// Shape matrix padded to 4x4 (1 = occupied)
    pub shape: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            rows: value.shape.rows(),
            cols: value.shape.cols(),
            shape: value.shape.to_u8_grid(),
        }
    }
}

impl ActiveSnapshot {
    /// Rebuild the shape matrix
    pub fn shape(&self) -> Shape {
        let cols = (self.cols as usize).min(MAX_SHAPE_DIM);
        let rows: ArrayVec<&[u8], MAX_SHAPE_DIM> = self
            .shape
            .iter()
            .take(self.rows as usize)
            .map(|row| &row[..cols])
            .collect();
        Shape::from_rows(&rows)
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape()
            .minos()
            .into_iter()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// 0 = empty, 1-7 = [`PieceKind::cell_code`]
    pub board: [[u8; BOARD_COLS]; BOARD_ROWS],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
    pub piece_id: u32,
    pub seed: u64,
    pub last_event: Option<LockEvent>,
}

impl GameSnapshot {
    /// Whether gameplay input is currently accepted
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Locked cell at (x, y); `None` when out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let code = *self.board.get(y as usize)?.get(x as usize)?;
        Some(PieceKind::from_cell_code(code))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_COLS]; BOARD_ROWS],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            level: 0,
            drop_interval_ms: 0,
            paused: false,
            game_over: false,
            piece_id: 0,
            seed: 0,
            last_event: None,
        }
    }
}
