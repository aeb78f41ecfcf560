//! GameView: maps a `GameSnapshot` into a character frame.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

const TEXT: Rgb = Rgb::new(220, 220, 220);
const MUTED: Rgb = Rgb::new(90, 90, 110);

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: TEXT,
            bold: false,
            dim: false,
        }
    }
}

/// Row-major grid of glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Out-of-range writes are dropped
    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = glyph;
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bold: bool) {
        for (i, ch) in text.chars().enumerate() {
            self.set(
                x.saturating_add(i as u16),
                y,
                Glyph {
                    ch,
                    fg,
                    bold,
                    dim: false,
                },
            );
        }
    }

    /// Plain text of one row (for tests and logs)
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}

/// Side panel width in columns
const PANEL_W: u16 = 14;

/// Terminal view of the board, active piece, ghost and HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Frame size needed for the board, its border and the side panel
    pub fn frame_size(&self) -> (u16, u16) {
        let w = BOARD_WIDTH as u16 * self.cell_w + 2 + 1 + PANEL_W;
        let h = BOARD_HEIGHT as u16 + 2;
        (w, h)
    }

    pub fn render(&self, snap: &GameSnapshot) -> Frame {
        let (w, h) = self.frame_size();
        let mut frame = Frame::new(w, h);
        self.draw_border(&mut frame);

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match snap.cell(x, y).flatten() {
                    Some(kind) => self.draw_block(&mut frame, x, y, kind, '█', false),
                    None => self.draw_cell(&mut frame, x, y, '·', MUTED, true),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            for (x, y) in active.cells() {
                let y = y - active.y + ghost_y;
                self.draw_block(&mut frame, x, y, active.kind, '░', true);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                self.draw_block(&mut frame, x, y, active.kind, '█', false);
            }
        }

        self.draw_panel(&mut frame, snap);

        if snap.game_over {
            self.draw_overlay(&mut frame, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay(&mut frame, "PAUSED");
        }

        frame
    }

    fn board_w(&self) -> u16 {
        BOARD_WIDTH as u16 * self.cell_w
    }

    fn draw_border(&self, frame: &mut Frame) {
        let right = self.board_w() + 1;
        let bottom = BOARD_HEIGHT as u16 + 1;
        let style = |ch| Glyph {
            ch,
            fg: TEXT,
            bold: false,
            dim: false,
        };
        for x in 1..right {
            frame.set(x, 0, style('─'));
            frame.set(x, bottom, style('─'));
        }
        for y in 1..bottom {
            frame.set(0, y, style('│'));
            frame.set(right, y, style('│'));
        }
        frame.set(0, 0, style('┌'));
        frame.set(right, 0, style('┐'));
        frame.set(0, bottom, style('└'));
        frame.set(right, bottom, style('┘'));
    }

    /// Draw one board cell; rows above the board are skipped
    fn draw_cell(&self, frame: &mut Frame, x: i8, y: i8, ch: char, fg: Rgb, dim: bool) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = 1 + x as u16 * self.cell_w;
        let py = 1 + y as u16;
        for dx in 0..self.cell_w {
            frame.set(
                px + dx,
                py,
                Glyph {
                    ch,
                    fg,
                    bold: false,
                    dim,
                },
            );
        }
    }

    fn draw_block(&self, frame: &mut Frame, x: i8, y: i8, kind: PieceKind, ch: char, dim: bool) {
        self.draw_cell(frame, x, y, ch, kind.rgb().into(), dim);
    }

    fn draw_panel(&self, frame: &mut Frame, snap: &GameSnapshot) {
        let x = self.board_w() + 3;
        let mut y = 1;
        for (label, value) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("LEVEL", snap.level),
        ] {
            frame.put_str(x, y, label, MUTED, false);
            frame.put_str(x, y + 1, &value.to_string(), TEXT, true);
            y += 3;
        }

        frame.put_str(x, y, "NEXT", MUTED, false);
        let preview = get_shape(snap.next);
        let fg: Rgb = snap.next.rgb().into();
        for (dx, dy) in preview.minos() {
            for i in 0..2 {
                frame.set(
                    x + dx as u16 * 2 + i,
                    y + 1 + dy as u16,
                    Glyph {
                        ch: '█',
                        fg,
                        bold: false,
                        dim: false,
                    },
                );
            }
        }
        y += 4;

        for line in ["←→ move", "↑ rotate", "↓ soft drop", "space drop", "p pause", "r restart", "q quit"] {
            frame.put_str(x, y, line, MUTED, false);
            y += 1;
        }
    }

    fn draw_overlay(&self, frame: &mut Frame, text: &str) {
        let len = text.chars().count() as u16;
        let x = 1 + self.board_w().saturating_sub(len) / 2;
        let y = 1 + BOARD_HEIGHT as u16 / 2;
        frame.put_str(x, y, text, Rgb::new(255, 255, 255), true);
    }
}
