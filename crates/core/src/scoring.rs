//! Scoring module - line clear points, drop points, level and gravity cadence
//!
//! Line clears use the table `[0, 100, 300, 500, 800]` multiplied by
//! `level + 1`. A lock can clear at most four rows with the standard pieces;
//! a larger count is reported as an error instead of being clamped.

use std::fmt;

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_SCORES, SOFT_DROP_POINTS_PER_ROW,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// A single lock cleared more rows than the score table covers.
    LinesOutOfRange { lines: usize },
}

impl ScoreError {
    pub fn code(self) -> &'static str {
        match self {
            ScoreError::LinesOutOfRange { .. } => "lines_out_of_range",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreError::LinesOutOfRange { .. } => "line clear count exceeds the score table",
        }
    }
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::LinesOutOfRange { lines } => {
                write!(f, "{} ({} lines, max {})", self.message(), lines, LINE_SCORES.len() - 1)
            }
        }
    }
}

impl std::error::Error for ScoreError {}

/// Calculate line clear score
/// lines: number of lines cleared by one lock (0-4)
/// level: level before the clear (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> Result<u32, ScoreError> {
    let base = LINE_SCORES
        .get(lines)
        .copied()
        .ok_or(ScoreError::LinesOutOfRange { lines })?;
    Ok(base.saturating_mul(level.saturating_add(1)))
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_row = if is_hard_drop {
        HARD_DROP_POINTS_PER_ROW
    } else {
        SOFT_DROP_POINTS_PER_ROW
    };
    cells.saturating_mul(per_row)
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Get gravity interval for a level (in milliseconds)
///
/// 1000ms at level 0, 100ms faster per level, never below 100ms.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}
