/// Rendering layer — all terminal I/O lives here.
///
/// `TerminalSurface` receives the simulation's drawing commands in field
/// pixels, rasterises them onto a character-cell buffer and flushes that
/// buffer to the terminal once per frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use shisa_shooter::entities::Rect;
use shisa_shooter::render::{Paint, ScoreDisplay, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_SHADED: Color = Color::DarkGrey;

fn glyph(paint: Paint) -> (char, Color) {
    match paint {
        Paint::Player => ('█', Color::DarkRed),
        Paint::PlayerEyes => ('▀', Color::Yellow),
        Paint::PlayerMouth => ('▬', Color::White),
        Paint::Enemy => ('█', Color::DarkGreen),
        Paint::EnemyBumps => ('▪', Color::Green),
        Paint::PlayerShot => ('║', Color::Yellow),
        Paint::EnemyShot => ('│', Color::Red),
        Paint::Shade => (' ', C_SHADED),
        Paint::Text => (' ', Color::White),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
    bold: bool,
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Scoreboard {
    score: u32,
}

impl ScoreDisplay for Scoreboard {
    fn show_score(&mut self, score: u32) {
        self.score = score;
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// Screen layout:
///   row 0        HUD
///   row 1        top border
///   rows 2..h-2  play field (inside the side walls)
///   row h-2      bottom border
///   row h-1      controls hint
pub struct TerminalSurface {
    width: u16,
    height: u16,
    field_width: f32,
    field_height: f32,
    cells: Vec<Option<Cell>>,
}

impl TerminalSurface {
    pub fn new(width: u16, height: u16, field_width: f32, field_height: f32) -> Self {
        let mut surface = TerminalSurface {
            width,
            height,
            field_width,
            field_height,
            cells: Vec::new(),
        };
        surface.cells = vec![None; surface.cols() * surface.rows()];
        surface
    }

    fn cols(&self) -> usize {
        self.width.saturating_sub(2) as usize
    }

    fn rows(&self) -> usize {
        self.height.saturating_sub(4) as usize
    }

    fn col_of(&self, x: f32) -> f32 {
        x * self.cols() as f32 / self.field_width
    }

    fn row_of(&self, y: f32) -> f32 {
        y * self.rows() as f32 / self.field_height
    }

    /// Cell span covered by `[start, end)`, at least one cell wide,
    /// clipped to `limit`.
    fn span(start: f32, end: f32, limit: usize) -> std::ops::Range<usize> {
        let first = start.floor();
        let last = end.ceil().max(first + 1.0);
        let clip = |v: f32| v.max(0.0).min(limit as f32) as usize;
        clip(first)..clip(last)
    }

    fn put(&mut self, col: usize, row: usize, cell: Cell) {
        if col < self.cols() && row < self.rows() {
            let idx = row * self.cols() + col;
            self.cells[idx] = Some(cell);
        }
    }

    /// Write the buffered frame, plus border, HUD and hint, to `out`.
    pub fn present<W: Write>(&self, out: &mut W, scoreboard: &Scoreboard) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border(out)?;
        self.draw_hud(out, scoreboard)?;

        let cols = self.cols();
        for (idx, cell) in self.cells.iter().enumerate() {
            let Some(cell) = cell else { continue };
            let (col, row) = (idx % cols, idx / cols);
            out.queue(cursor::MoveTo(col as u16 + 1, row as u16 + 2))?;
            out.queue(style::SetForegroundColor(cell.color))?;
            if cell.bold {
                out.queue(style::SetAttribute(Attribute::Bold))?;
            }
            out.queue(Print(cell.ch))?;
            if cell.bold {
                out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
            }
        }

        self.draw_controls_hint(out)?;

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    fn draw_border<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.width as usize;
        let h = self.height;

        out.queue(style::SetForegroundColor(C_BORDER))?;

        out.queue(cursor::MoveTo(0, 1))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..h.saturating_sub(2) {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print("│"))?;
            out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            out.queue(Print("│"))?;
        }

        Ok(())
    }

    fn draw_hud<W: Write>(&self, out: &mut W, scoreboard: &Scoreboard) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(format!("Score: {:>6}", scoreboard.score)))?;
        Ok(())
    }

    fn draw_controls_hint<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        let cols = Self::span(self.col_of(rect.x), self.col_of(rect.right()), self.cols());
        let rows = Self::span(self.row_of(rect.y), self.row_of(rect.bottom()), self.rows());

        if paint == Paint::Shade {
            // Dim what is already there instead of covering it.
            for row in rows {
                for col in cols.clone() {
                    let idx = row * self.cols() + col;
                    if let Some(cell) = self.cells[idx].as_mut() {
                        cell.color = C_SHADED;
                    }
                }
            }
            return;
        }

        let (ch, color) = glyph(paint);
        for row in rows {
            for col in cols.clone() {
                self.put(col, row, Cell { ch, color, bold: false });
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, paint: Paint) {
        let (_, color) = glyph(paint);
        let len = text.chars().count();
        let centre = self.col_of(x) as usize;
        let start = centre.saturating_sub(len / 2);
        let row = (self.row_of(y) as usize).min(self.rows().saturating_sub(1));
        let bold = size >= 40.0;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i, row, Cell { ch, color, bold });
        }
    }
}
