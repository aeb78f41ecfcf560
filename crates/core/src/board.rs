//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or tagged with the kind
//! of the piece that locked there. Uses a flat array for cache locality and
//! zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are legal positions for falling pieces; they
//! are only checked against the side walls.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_COLS, BOARD_HEIGHT, BOARD_ROWS, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_COLS * BOARD_ROWS;

/// Row indices removed by a line clear, top to bottom
pub type ClearedRows = ArrayVec<u8, BOARD_ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * BOARD_COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a shape fits with its top-left corner at (x, y).
    ///
    /// For every occupied shape cell: the column must lie in `[0, WIDTH)`,
    /// the row must be above the floor, and rows inside the board must be
    /// empty. Rows above the top edge are never checked against contents.
    pub fn fits(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.minos().iter().all(|&(dx, dy)| {
            let px = x as i16 + dx as i16;
            let py = y as i16 + dy as i16;
            if px < 0 || px >= BOARD_WIDTH as i16 || py >= BOARD_HEIGHT as i16 {
                return false;
            }
            py < 0 || !self.is_occupied(px as i8, py as i8)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        let start = y * BOARD_COLS;
        self.cells[start..start + BOARD_COLS]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Clear all full rows and return the row indices that were cleared (top to bottom).
    ///
    /// Surviving rows keep their order and settle at the bottom; the freed
    /// rows at the top become empty. Two-pointer pass, no allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = BOARD_ROWS;

        // Scan from bottom to top
        for read_y in (0..BOARD_ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * BOARD_COLS;
                    self.cells
                        .copy_within(src_start..src_start + BOARD_COLS, write_y * BOARD_COLS);
                }
            }
        }

        for cell in &mut self.cells[..write_y * BOARD_COLS] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Write a shape's occupied cells into the board, tagged with `kind`.
    ///
    /// Cells outside the board (in particular rows above the top edge) are
    /// skipped. Returns the number of cells written.
    pub fn lock_piece(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        shape
            .minos()
            .iter()
            .filter(|&&(dx, dy)| self.set(x + dx, y + dy, Some(kind)))
            .count()
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_COLS)
    }

    /// Encode into a u8 grid (0 = empty, 1-7 = [`PieceKind::cell_code`]).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_COLS]; BOARD_ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.map_or(0, |kind| kind.cell_code());
            }
        }
    }

    /// Build a board from a u8 grid (inverse of [`Board::write_u8_grid`]).
    /// Unknown codes become empty cells.
    pub fn from_u8_grid(grid: &[[u8; BOARD_COLS]; BOARD_ROWS]) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                board.cells[y * BOARD_COLS + x] = PieceKind::from_cell_code(code);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh empty board.
pub fn create_empty_board() -> Board {
    Board::new()
}

/// Check whether `shape` fits on `board` with its top-left corner at (x, y).
pub fn is_valid(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
    board.fits(shape, x, y)
}

/// Remove full rows from a copy of `board`, returning it with the cleared count.
pub fn clear_lines(board: &Board) -> (Board, usize) {
    let mut next = board.clone();
    let cleared = next.clear_full_rows().len();
    (next, cleared)
}
