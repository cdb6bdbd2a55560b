//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::core::{get_shape, piece_color, GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, Phase, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const HINT: Rgb = Rgb::new(150, 150, 160);
const RECORD: Rgb = Rgb::new(255, 60, 60);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame landed for this frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            CellStyle::new(TEXT, BOARD_BG),
        );
        fb.draw_box(frame.x, frame.y, frame.w, frame.h, border);

        match snap.phase {
            Phase::Title => {
                self.draw_message(
                    fb,
                    frame,
                    &[
                        ("TETRIS", CellStyle::new(Rgb::WHITE, BOARD_BG).bold()),
                        ("", CellStyle::new(HINT, BOARD_BG)),
                        ("S: start", CellStyle::new(HINT, BOARD_BG)),
                        ("Q: quit", CellStyle::new(HINT, BOARD_BG)),
                    ],
                );
                return;
            }
            Phase::Ranking => {
                self.draw_ranking(fb, snap, frame);
                return;
            }
            _ => {}
        }

        self.draw_board(fb, snap, frame);
        self.draw_side_panel(fb, snap, viewport, frame);

        let headline = CellStyle::new(Rgb::WHITE, BOARD_BG).bold();
        let hint = CellStyle::new(HINT, BOARD_BG);
        match snap.phase {
            Phase::ReadyMessage => self.draw_message(fb, frame, &[("Ready?", headline)]),
            Phase::GoMessage => self.draw_message(fb, frame, &[("Go!!", headline)]),
            Phase::Paused => {
                self.draw_message(fb, frame, &[("PAUSED", headline), ("H: resume", hint)])
            }
            Phase::GameOver => self.draw_message(
                fb,
                frame,
                &[
                    ("GAME OVER", CellStyle::new(RECORD, BOARD_BG).bold()),
                    ("R: replay", hint),
                ],
            ),
            Phase::Finished => {
                let record = if snap.new_record { "NEW RECORD!" } else { "" };
                let ranking = if snap.ranking_enabled { "T: ranking" } else { "" };
                self.draw_message(
                    fb,
                    frame,
                    &[
                        ("Finish", headline),
                        (record, CellStyle::new(RECORD, BOARD_BG).bold()),
                        ("R: replay", hint),
                        (ranking, hint),
                    ],
                );
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        // Leave room for the side panel when centering.
        let total_w = w + 2 + 16;
        Frame {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let grid = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, frame, x as i8, y as i8, *color, false),
                    None => self.fill_cell(fb, frame, x as u16, y as u16, '·', grid),
                }
            }
        }

        let Some(active) = snap.active else {
            return;
        };

        if let Some(ghost_y) = snap.ghost_y.filter(|&gy| gy != active.y) {
            self.draw_shape(fb, frame, &active.shape, active.x, ghost_y, active.color, true);
        }
        self.draw_shape(fb, frame, &active.shape, active.x, active.y, active.color, false);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_shape(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        shape: &Shape,
        x: i8,
        y: i8,
        color: Color,
        ghost: bool,
    ) {
        for (dx, dy) in shape.filled() {
            self.draw_block(fb, frame, x + dx, y + dy, color, ghost);
        }
    }

    /// Draw one board cell; coordinates outside the board are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, color: Color, ghost: bool) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let fg = Rgb::from(color);
        let (ch, style) = if ghost {
            ('░', CellStyle::new(fg.scaled(1, 2), BOARD_BG).dim())
        } else {
            ('█', CellStyle::new(fg, BOARD_BG).bold())
        };
        self.fill_cell(fb, frame, x as u16, y as u16, ch, style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::new(TEXT, Rgb::BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
        let hint = CellStyle::new(HINT, Rgb::BLACK).dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let next = get_shape(snap.next);
        let color = Rgb::from(piece_color(snap.next));
        for (dx, dy) in next.filled() {
            let px = panel_x + (dx as u16) * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', CellStyle::new(color, Rgb::BLACK));
        }
        y += 3;

        let score_style = if snap.new_record {
            CellStyle::new(RECORD, Rgb::BLACK).bold()
        } else {
            value
        };
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, score_style);
        y += 3;

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x, y + 1, snap.level, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "TIME", label);
        fb.put_str(panel_x, y + 1, &snap.time_text(), value);
        y += 3;

        for line in ["←→ move", "↓ soft drop", "SPC rotate", "↑ hard drop", "H pause", "R restart"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    /// Centered lines over the middle of the board; empty lines only take space.
    fn draw_message(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[(&str, CellStyle)]) {
        let first = (frame.y + frame.h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (text, style)) in lines.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            fb.put_str_centered(frame.x + 1, frame.w - 2, first + i as u16, text, *style);
        }
    }

    fn draw_ranking(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let title = CellStyle::new(Rgb::WHITE, BOARD_BG).bold();
        let normal = CellStyle::new(TEXT, BOARD_BG);
        let highlight = CellStyle::new(RECORD, BOARD_BG).bold();
        let inner_x = frame.x + 1;
        let inner_w = frame.w - 2;

        fb.put_str_centered(inner_x, inner_w, frame.y + 2, "SCORE RANKING", title);
        fb.put_str_centered(inner_x, inner_w, frame.y + 3, "(TOP 10)", normal);

        if snap.top_scores.is_empty() {
            fb.put_str_centered(inner_x, inner_w, frame.y + 6, "no scores yet", normal);
        }
        for (i, score) in snap.top_scores.iter().enumerate() {
            let mut line = ArrayString::<24>::new();
            let _ = write!(line, "{:>2}. {:>8}", i + 1, score);
            // Only the top line can be the record just set.
            let style = if i == 0 && snap.new_record && *score == snap.score {
                highlight
            } else {
                normal
            };
            fb.put_str_centered(inner_x, inner_w, frame.y + 5 + i as u16, &line, style);
        }

        fb.put_str_centered(
            inner_x,
            inner_w,
            frame.y + frame.h - 3,
            "R: replay",
            CellStyle::new(HINT, BOARD_BG),
        );
    }
}
