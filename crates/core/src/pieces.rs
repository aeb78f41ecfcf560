//! Pieces module - tetromino shape matrices, spawning and rotation
//!
//! Shapes are small binary matrices (at most 4x4). A piece in play carries its
//! own copy of the matrix; rotating replaces the whole matrix. There are no
//! kick tables: a rotation either fits at the current anchor or is rejected.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest shape dimension (the I piece is 4x4)
pub const MAX_SHAPE_DIM: usize = 4;

/// Offset of a single mino relative to the shape's top-left corner, as (dx, dy)
pub type MinoOffset = (i8, i8);

/// Occupied cells of a shape
pub type Minos = ArrayVec<MinoOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Binary shape matrix with explicit dimensions.
///
/// Cells outside `rows x cols` are always empty, so two shapes compare equal
/// exactly when they have the same dimensions and occupied pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Anything beyond 4 rows or 4 columns is ignored; short rows are padded
    /// with empty cells.
    ///
    /// ```
    /// use blockfall_core::pieces::Shape;
    ///
    /// let bar = Shape::from_rows(&[&[1, 1, 1]]);
    /// assert_eq!((bar.rows(), bar.cols()), (1, 3));
    /// assert!(bar.is_filled(0, 2));
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let n_rows = rows.len().min(MAX_SHAPE_DIM);
        let n_cols = rows
            .iter()
            .take(n_rows)
            .map(|row| row.len())
            .max()
            .unwrap_or(0)
            .min(MAX_SHAPE_DIM);

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().take(n_rows).enumerate() {
            for (c, &v) in row.iter().take(n_cols).enumerate() {
                cells[r][c] = v != 0;
            }
        }

        Self {
            rows: n_rows as u8,
            cols: n_cols as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at (row, col) is occupied. Out-of-range cells are empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < MAX_SHAPE_DIM && col < MAX_SHAPE_DIM && self.cells[row][col]
    }

    /// Occupied cells as (dx, dy) offsets, row-major.
    pub fn minos(&self) -> Minos {
        let mut out = Minos::new();
        for r in 0..self.rows as usize {
            for c in 0..self.cols as usize {
                if self.cells[r][c] {
                    out.push((c as i8, r as i8));
                }
            }
        }
        out
    }

    /// Index of the lowest row containing an occupied cell.
    pub fn lowest_filled_row(&self) -> Option<u8> {
        (0..self.rows)
            .rev()
            .find(|&r| self.cells[r as usize].iter().any(|&filled| filled))
    }

    /// Rotate 90°: output row `c` is input column `c` read bottom to top.
    pub fn rotated(&self) -> Shape {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (c, out_row) in cells.iter_mut().enumerate().take(cols) {
            for (k, out_cell) in out_row.iter_mut().enumerate().take(rows) {
                *out_cell = self.cells[rows - 1 - k][c];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Matrix as 0/1 bytes, padded to 4x4 (for snapshots).
    pub fn to_u8_grid(&self) -> [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM] {
        let mut out = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &filled) in row.iter().enumerate() {
                out[r][c] = filled as u8;
            }
        }
        out
    }
}

/// Get the spawn template for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
    }
}

/// Rotate a shape matrix 90° (free-function form of [`Shape::rotated`]).
pub fn rotate(shape: &Shape) -> Shape {
    shape.rotated()
}

/// Spawn column for a shape: horizontally centered, rounded down.
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH as i8 - shape.cols() as i8).div_euclid(2)
}

/// Spawn row for every piece
pub const SPAWN_Y: i8 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_dimensions() {
        assert_eq!((get_shape(PieceKind::I).rows(), get_shape(PieceKind::I).cols()), (4, 4));
        assert_eq!((get_shape(PieceKind::O).rows(), get_shape(PieceKind::O).cols()), (2, 2));
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            let shape = get_shape(kind);
            assert_eq!((shape.rows(), shape.cols()), (3, 3), "{:?}", kind);
        }
    }

    #[test]
    fn test_every_template_has_four_minos() {
        for kind in PieceKind::ALL {
            assert_eq!(get_shape(kind).minos().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_t_piece() {
        // .#.    .#.
        // ###    .##
        // ...    .#.
        let rotated = get_shape(PieceKind::T).rotated();
        assert_eq!(
            rotated,
            Shape::from_rows(&[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]])
        );
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let bar = Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]);
        let rotated = bar.rotated();
        assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
        assert_eq!(rotated, Shape::from_rows(&[&[1, 1], &[0, 1], &[0, 1]]));
    }

    #[test]
    fn test_from_rows_pads_and_truncates() {
        let ragged = Shape::from_rows(&[&[1], &[1, 1, 1, 1, 1]]);
        assert_eq!((ragged.rows(), ragged.cols()), (2, 4));
        assert!(!ragged.is_filled(0, 1));
        assert!(ragged.is_filled(1, 3));
        assert!(!ragged.is_filled(1, 4));

        let empty = Shape::from_rows(&[]);
        assert_eq!((empty.rows(), empty.cols()), (0, 0));
        assert!(empty.minos().is_empty());
        assert_eq!(empty.lowest_filled_row(), None);
    }

    #[test]
    fn test_spawn_x_centers_shapes() {
        assert_eq!(spawn_x(&get_shape(PieceKind::I)), 3);
        assert_eq!(spawn_x(&get_shape(PieceKind::O)), 4);
        assert_eq!(spawn_x(&get_shape(PieceKind::T)), 3);
    }

    #[test]
    fn test_lowest_filled_row() {
        assert_eq!(get_shape(PieceKind::I).lowest_filled_row(), Some(1));
        assert_eq!(get_shape(PieceKind::O).lowest_filled_row(), Some(1));
        assert_eq!(get_shape(PieceKind::T).lowest_filled_row(), Some(1));
    }
}
