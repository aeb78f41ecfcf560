//! Board tests - collision and line clearing through the public API

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use blockfall::core::{clear_lines, create_empty_board, get_shape, is_valid, Board};
use blockfall::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn random_board(seed: u64, density: f64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = create_empty_board();
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if rng.gen_bool(density) {
                board.set(x, y, Some(PieceKind::ALL[rng.gen_range(0..7)]));
            }
        }
    }
    board
}

fn rows_of(board: &Board) -> Vec<Vec<Cell>> {
    board.rows().map(|row| row.to_vec()).collect()
}

#[test]
fn test_empty_board() {
    let board = create_empty_board();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_count(), 0);
    assert_eq!(board.get(0, 0), Some(None));
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_is_valid_matches_cell_rule() {
    for seed in 0..8 {
        let board = random_board(seed, 0.3);
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            for y in -4..(BOARD_HEIGHT as i8 + 2) {
                for x in -4..(BOARD_WIDTH as i8 + 2) {
                    let blocked = shape.minos().iter().any(|&(dx, dy)| {
                        let (cx, cy) = (x + dx, y + dy);
                        cx < 0
                            || cx >= BOARD_WIDTH as i8
                            || cy >= BOARD_HEIGHT as i8
                            || (cy >= 0 && board.get(cx, cy) != Some(None))
                    });
                    assert_eq!(
                        is_valid(&board, &shape, x, y),
                        !blocked,
                        "{:?} at ({}, {}) seed {}",
                        kind,
                        x,
                        y,
                        seed
                    );
                }
            }
        }
    }
}

#[test]
fn test_rows_above_top_are_not_checked() {
    let mut board = create_empty_board();
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, 1, Some(PieceKind::J));
    }
    // I occupies shape row 1, i.e. board row 0 when anchored at y = -1.
    assert!(is_valid(&board, &get_shape(PieceKind::I), 3, -1));
    assert!(!is_valid(&board, &get_shape(PieceKind::I), 3, 0));
}

#[test]
fn test_clear_lines_without_full_rows_is_identity() {
    for seed in 0..8u64 {
        // Dense board with one hole per row, so no row is ever full.
        let mut board = random_board(seed, 0.9);
        for y in 0..BOARD_HEIGHT as i8 {
            let gap = (y as u64 * 3 + seed) % BOARD_WIDTH as u64;
            board.set(gap as i8, y, None);
        }
        assert!((0..BOARD_HEIGHT as usize).all(|y| !board.is_row_full(y)));
        assert!(board.filled_count() > 0);

        let (cleared, count) = clear_lines(&board);
        assert_eq!(count, 0, "seed {}", seed);
        assert_eq!(cleared, board, "seed {}", seed);
    }

    let (cleared, count) = clear_lines(&create_empty_board());
    assert_eq!(count, 0);
    assert_eq!(cleared, create_empty_board());
}

#[test]
fn test_clear_lines_removes_k_rows() {
    for k in 0..=4usize {
        let mut board = create_empty_board();
        let full_rows = [19i8, 17, 15, 13];
        for &y in &full_rows[..k] {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y, Some(PieceKind::I));
            }
        }
        // Partial rows with distinct markers so ordering can be checked.
        for (i, y) in (10..20i8).enumerate() {
            if !full_rows[..k].contains(&y) {
                board.set(i as i8 % BOARD_WIDTH as i8, y, Some(PieceKind::T));
            }
        }

        let before = rows_of(&board);
        let (cleared, count) = clear_lines(&board);
        assert_eq!(count, k);
        assert_eq!(cleared.height(), BOARD_HEIGHT);
        assert_eq!(rows_of(&board), before, "input board is untouched");

        let mut expected: Vec<Vec<Cell>> = vec![vec![None; BOARD_WIDTH as usize]; k];
        expected.extend(
            before
                .iter()
                .filter(|row| row.iter().any(|c| c.is_none()))
                .cloned(),
        );
        assert_eq!(rows_of(&cleared), expected, "k = {}", k);
    }
}

#[test]
fn test_lock_piece_skips_rows_above_board() {
    let mut board = Board::new();
    let written = board.lock_piece(&get_shape(PieceKind::T), 3, -1, PieceKind::T);
    // Only the T's bottom row (shape row 1) lands on board row 0.
    assert_eq!(written, 3);
    assert_eq!(board.filled_count(), 3);
    assert_eq!(board.get(4, 0), Some(Some(PieceKind::T)));
}
