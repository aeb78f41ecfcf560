//! Game state module - the complete rules engine state
//!
//! Ties together the board, the active and next pieces, the randomizer and the
//! score counters. Every transition takes `&self` and returns a new state; a
//! rejected move or rotation returns an identical copy. The engine has no
//! timers: the host decides when to call [`GameState::tick`].

use crate::board::Board;
use crate::pieces::{get_shape, spawn_x, Shape, SPAWN_Y};
use crate::rng::PieceRandomizer;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms, ScoreError,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockEvent, PieceKind};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Current orientation, replaced wholesale on rotation
    pub shape: Shape,
    /// Column of the shape's top-left cell
    pub x: i8,
    /// Row of the shape's top-left cell
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position (centered, top row)
    pub fn new(kind: PieceKind) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: SPAWN_Y,
        }
    }

    /// Check if the piece fits on the board at its current anchor
    pub fn is_valid(&self, board: &Board) -> bool {
        board.fits(&self.shape, self.x, self.y)
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same anchor, shape rotated 90°
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape
            .minos()
            .into_iter()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Absolute row of the lowest occupied cell
    pub fn lowest_row(&self) -> Option<i8> {
        self.shape.lowest_filled_row().map(|r| self.y + r as i8)
    }
}

/// Build a fresh piece at its spawn position.
pub fn spawn(kind: PieceKind) -> Tetromino {
    Tetromino::new(kind)
}

/// Whether the game still has a falling piece.
///
/// A game that is over never carries a piece, and a running game always does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing(Tetromino),
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    phase: Phase,
    next: PieceKind,
    randomizer: PieceRandomizer,
    /// Sequence number of the current piece (1 for the first spawn).
    piece_id: u32,
    /// Outcome of the most recent lock.
    last_event: Option<LockEvent>,
    score: u32,
    lines: u32,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        let mut randomizer = PieceRandomizer::new(seed);
        let active = randomizer.draw();
        let next = randomizer.draw();
        Self::assemble(Board::new(), active, next, randomizer)
    }

    /// Create a new game seeded from OS entropy
    pub fn from_entropy() -> Self {
        let mut randomizer = PieceRandomizer::from_entropy();
        let active = randomizer.draw();
        let next = randomizer.draw();
        Self::assemble(Board::new(), active, next, randomizer)
    }

    /// Start a game from an arbitrary board with chosen active and next kinds.
    ///
    /// If the active piece does not fit at its spawn position the game starts
    /// already over.
    pub fn from_parts(board: Board, active: PieceKind, next: PieceKind, seed: u64) -> Self {
        Self::assemble(board, active, next, PieceRandomizer::new(seed))
    }

    fn assemble(
        board: Board,
        active: PieceKind,
        next: PieceKind,
        randomizer: PieceRandomizer,
    ) -> Self {
        let piece = Tetromino::new(active);
        let phase = if piece.is_valid(&board) {
            Phase::Playing(piece)
        } else {
            Phase::GameOver
        };
        Self {
            board,
            phase,
            next,
            randomizer,
            piece_id: 1,
            last_event: None,
            score: 0,
            lines: 0,
        }
    }

    /// A new game seeded from this game's randomizer.
    pub fn restarted(&self) -> Self {
        let mut randomizer = self.randomizer.clone();
        Self::new(randomizer.next_seed())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active(&self) -> Option<Tetromino> {
        match self.phase {
            Phase::Playing(piece) => Some(piece),
            Phase::GameOver => None,
        }
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Always `lines / 10`.
    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    pub fn seed(&self) -> u64 {
        self.randomizer.seed()
    }

    /// Gravity interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level())
    }

    /// Rows the active piece can still fall (0 when the game is over)
    pub fn drop_distance(&self) -> u32 {
        match self.phase {
            Phase::Playing(piece) => self.fall_distance(&piece),
            Phase::GameOver => 0,
        }
    }

    /// Anchor row the active piece would land on with a hard drop
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active()?;
        Some(piece.y + self.fall_distance(&piece) as i8)
    }

    fn fall_distance(&self, piece: &Tetromino) -> u32 {
        let mut distance: i8 = 0;
        while piece.shifted(0, distance + 1).is_valid(&self.board) {
            distance += 1;
        }
        distance as u32
    }

    fn with_active(&self, piece: Tetromino) -> Self {
        Self {
            phase: Phase::Playing(piece),
            ..self.clone()
        }
    }

    /// Shift the active piece if the candidate position is valid
    fn try_shift(&self, dx: i8, dy: i8) -> Option<Tetromino> {
        let Phase::Playing(active) = self.phase else {
            return None;
        };
        let candidate = active.shifted(dx, dy);
        candidate.is_valid(&self.board).then_some(candidate)
    }

    /// Move the active piece by (dx, dy); unchanged if blocked or game over
    pub fn move_by(&self, dx: i8, dy: i8) -> Self {
        match self.try_shift(dx, dy) {
            Some(piece) => self.with_active(piece),
            None => self.clone(),
        }
    }

    pub fn move_left(&self) -> Self {
        self.move_by(-1, 0)
    }

    pub fn move_right(&self) -> Self {
        self.move_by(1, 0)
    }

    /// Rotate in place; unchanged if the rotated shape does not fit at the current anchor
    pub fn rotate(&self) -> Self {
        let Phase::Playing(active) = self.phase else {
            return self.clone();
        };
        let candidate = active.rotated();
        if candidate.is_valid(&self.board) {
            self.with_active(candidate)
        } else {
            self.clone()
        }
    }

    /// Move down one row for one point; unchanged if blocked (never locks)
    pub fn soft_drop(&self) -> Self {
        match self.try_shift(0, 1) {
            Some(piece) => {
                let mut next = self.with_active(piece);
                next.score = next.score.saturating_add(calculate_drop_score(1, false));
                next
            }
            None => self.clone(),
        }
    }

    /// Drop to the landing row and lock, scoring two points per row fallen
    pub fn hard_drop(&self) -> Result<Self, ScoreError> {
        let Phase::Playing(active) = self.phase else {
            return Ok(self.clone());
        };
        let distance = self.fall_distance(&active);
        self.lock(active.shifted(0, distance as i8), distance)
    }

    /// Gravity step: fall one row, or lock when the piece cannot descend
    pub fn tick(&self) -> Result<Self, ScoreError> {
        let Phase::Playing(active) = self.phase else {
            return Ok(self.clone());
        };
        match self.try_shift(0, 1) {
            Some(piece) => Ok(self.with_active(piece)),
            None => self.lock(active, 0),
        }
    }

    /// Apply a gameplay action. `Pause` and `Restart` belong to the session
    /// and leave the rules state unchanged.
    pub fn apply_action(&self, action: GameAction) -> Result<Self, ScoreError> {
        match action {
            GameAction::MoveLeft => Ok(self.move_left()),
            GameAction::MoveRight => Ok(self.move_right()),
            GameAction::SoftDrop => Ok(self.soft_drop()),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => Ok(self.rotate()),
            GameAction::Pause | GameAction::Restart => Ok(self.clone()),
        }
    }

    /// Merge the piece, clear rows, score, spawn the next piece and check for top-out
    fn lock(&self, piece: Tetromino, hard_drop_rows: u32) -> Result<Self, ScoreError> {
        let mut board = self.board.clone();
        board.lock_piece(&piece.shape, piece.x, piece.y, piece.kind);

        let lines_cleared = board.clear_full_rows().len();
        // Multiplier uses the level in effect before this clear.
        let line_clear_score = calculate_line_score(lines_cleared, self.level())?;
        let drop_bonus = calculate_drop_score(hard_drop_rows, true);

        let mut randomizer = self.randomizer.clone();
        let spawned = Tetromino::new(self.next);
        let next = randomizer.draw();

        let topped_out = !spawned.is_valid(&board);
        let phase = if topped_out {
            Phase::GameOver
        } else {
            Phase::Playing(spawned)
        };

        Ok(Self {
            board,
            phase,
            next,
            randomizer,
            piece_id: self.piece_id.wrapping_add(1),
            last_event: Some(LockEvent {
                lines_cleared: lines_cleared as u32,
                line_clear_score,
                drop_bonus,
                topped_out,
            }),
            score: self
                .score
                .saturating_add(line_clear_score)
                .saturating_add(drop_bonus),
            lines: self.lines + lines_cleared as u32,
        })
    }

    /// Write the presentation view of this state into `out`.
    ///
    /// `paused` is session state and is left untouched.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active().map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level();
        out.drop_interval_ms = self.drop_interval_ms();
        out.game_over = self.game_over();
        out.piece_id = self.piece_id;
        out.seed = self.seed();
        out.last_event = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn fill_row_except(board: &mut Board, y: i8, gaps: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.piece_id(), 1);
        assert!(state.last_event().is_none());
        assert_eq!(state.board().filled_count(), 0);

        let active = state.active().unwrap();
        assert_eq!(active.y, 0);
        assert_eq!(active.shape, get_shape(active.kind));
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = GameState::new(77).hard_drop().unwrap().hard_drop().unwrap();
        let b = GameState::new(77).hard_drop().unwrap().hard_drop().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_transitions_do_not_mutate_input() {
        let state = GameState::from_parts(Board::new(), PieceKind::T, PieceKind::O, 1);
        let before = state.clone();
        let _ = state.move_left();
        let _ = state.rotate();
        let _ = state.soft_drop();
        let _ = state.hard_drop().unwrap();
        let _ = state.tick().unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut state = GameState::from_parts(Board::new(), PieceKind::O, PieceKind::O, 1);
        for _ in 0..10 {
            state = state.move_left();
        }
        assert_eq!(state.active().unwrap().x, 0);
        assert_eq!(state.move_left(), state);
    }

    #[test]
    fn test_soft_drop_scores_only_when_moving() {
        let mut state = GameState::from_parts(Board::new(), PieceKind::O, PieceKind::O, 1);
        state = state.soft_drop();
        assert_eq!(state.score(), 1);
        assert_eq!(state.active().unwrap().y, 1);

        // Sink to the floor: 19 - 1 (O bottom row offset) = 18.
        for _ in 0..30 {
            state = state.soft_drop();
        }
        assert_eq!(state.active().unwrap().y, 18);
        assert_eq!(state.score(), 18);
        assert_eq!(state.piece_id(), 1, "soft drop never locks");
    }

    #[test]
    fn test_rotation_blocked_keeps_orientation() {
        // I piece flat against the floor cannot stand up.
        let mut state = GameState::from_parts(Board::new(), PieceKind::I, PieceKind::O, 1);
        for _ in 0..30 {
            state = state.soft_drop();
        }
        let before = state.active().unwrap();
        assert_eq!(before.lowest_row(), Some(BOARD_HEIGHT as i8 - 1));
        let after = state.rotate();
        assert_eq!(after.active().unwrap(), before);
    }

    #[test]
    fn test_tick_moves_then_locks() {
        let mut state = GameState::from_parts(Board::new(), PieceKind::O, PieceKind::T, 1);
        for _ in 0..18 {
            state = state.tick().unwrap();
        }
        assert_eq!(state.active().unwrap().y, 18);
        assert_eq!(state.score(), 0, "gravity awards no points");

        let locked = state.tick().unwrap();
        assert_eq!(locked.piece_id(), 2);
        assert_eq!(locked.active().unwrap().kind, PieceKind::T);
        assert_eq!(locked.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(
            locked.last_event(),
            Some(LockEvent {
                lines_cleared: 0,
                line_clear_score: 0,
                drop_bonus: 0,
                topped_out: false,
            })
        );
    }

    #[test]
    fn test_score_uses_level_before_clear() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[4, 5]);
        let mut state = GameState::from_parts(board, PieceKind::O, PieceKind::T, 1);
        state.lines = 19;

        let locked = state.hard_drop().unwrap();
        assert_eq!(locked.lines(), 20);
        assert_eq!(locked.level(), 2);
        // Level 1 multiplier (19 lines before the clear), plus 18 rows * 2.
        assert_eq!(locked.last_event().unwrap().line_clear_score, 200);
        assert_eq!(locked.score(), 200 + 36);
    }

    #[test]
    fn test_too_many_rows_is_an_error() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[]);
        for y in 15..19 {
            fill_row_except(&mut board, y, &[5]);
        }
        let state = GameState::from_parts(board, PieceKind::I, PieceKind::O, 1).rotate();
        assert_eq!(
            state.hard_drop(),
            Err(ScoreError::LinesOutOfRange { lines: 5 })
        );
    }

    #[test]
    fn test_ghost_y_matches_hard_drop() {
        let state = GameState::from_parts(Board::new(), PieceKind::T, PieceKind::O, 1);
        assert_eq!(state.ghost_y(), Some(18));
        assert_eq!(state.drop_distance(), 18);
    }

    #[test]
    fn test_level_tracks_lines() {
        let mut state = GameState::new(3);
        for lines in [0, 9, 10, 25, 99, 100] {
            state.lines = lines;
            assert_eq!(state.level(), lines / 10);
            assert_eq!(state.drop_interval_ms(), get_drop_interval_ms(lines / 10));
        }
    }

    #[test]
    fn test_restarted_is_fresh_and_deterministic() {
        let played = GameState::new(9).hard_drop().unwrap();
        let a = played.restarted();
        let b = played.restarted();
        assert_eq!(a, b);
        assert_eq!(a.score(), 0);
        assert_eq!(a.board().filled_count(), 0);
        assert_ne!(a.seed(), played.seed());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = GameState::from_parts(Board::new(), PieceKind::L, PieceKind::J, 4);
        let snap = state.snapshot();
        assert_eq!(snap.next, PieceKind::J);
        assert_eq!(snap.active.unwrap().kind, PieceKind::L);
        assert_eq!(snap.ghost_y, Some(18));
        assert_eq!(snap.drop_interval_ms, 1000);
        assert!(!snap.paused);
        assert!(!snap.game_over);
        assert_eq!(snap.seed, 4);
    }
}
