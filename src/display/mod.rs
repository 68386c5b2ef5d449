/// Rendering layer: all terminal output lives here.
///
/// The arena is scaled into a block of terminal cells and each draw command
/// is translated into glyphs. No game logic is performed; this module only
/// turns draw commands into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use star_shooter::collision::Rect;
use star_shooter::draw::{Atlas, DrawCommand, Fill, Renderer, SpriteRegion};

pub mod keys;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_STAR_DIM: Color = Color::DarkGrey;
const C_STAR_BRIGHT: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_EXPLOSION: Color = Color::Red;
const C_PROJECTILE: Color = Color::Cyan;
const C_ASTEROID: Color = Color::DarkYellow;
const C_HITBOX: Color = Color::Magenta;
const C_SKINS: [Color; 5] = [
    Color::White,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
];
const C_FLAME: [Color; 4] = [Color::DarkRed, Color::Red, Color::DarkYellow, Color::Yellow];

/// Stars larger than this (pixels) are drawn bright.
const BRIGHT_STAR: f32 = 2.5;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Where the arena sits on screen and how big one cell is in arena pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub origin_col: u16,
    pub origin_row: u16,
    pub cols: u16,
    pub rows: u16,
    pub arena_w: f32,
    pub arena_h: f32,
}

impl Viewport {
    /// Largest centered viewport that keeps the arena's aspect ratio, with
    /// one cell of border all round. Cells are taken to be twice as tall as
    /// they are wide.
    pub fn fit(term_cols: u16, term_rows: u16, arena_w: f32, arena_h: f32) -> Self {
        let max_cols = term_cols.saturating_sub(2).max(1);
        let max_rows = term_rows.saturating_sub(2).max(1);

        let mut rows = max_rows;
        let mut cols = ((rows as f32) * arena_w / arena_h * 2.0).round() as u16;
        if cols > max_cols {
            cols = max_cols;
            rows = ((cols as f32) * arena_h / arena_w / 2.0).round() as u16;
        }
        let cols = cols.max(1);
        let rows = rows.clamp(1, max_rows);

        Self {
            origin_col: (term_cols.saturating_sub(cols)) / 2,
            origin_row: (term_rows.saturating_sub(rows)) / 2,
            cols,
            rows,
            arena_w,
            arena_h,
        }
    }

    /// Terminal cell containing arena point (`x`, `y`), if it is on screen.
    pub fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.arena_w || y >= self.arena_h {
            return None;
        }
        let col = (x / self.arena_w * self.cols as f32) as u16;
        let row = (y / self.arena_h * self.rows as f32) as u16;
        Some((
            self.origin_col + col.min(self.cols - 1),
            self.origin_row + row.min(self.rows - 1),
        ))
    }

    /// Cells covered by `rect` after clipping to the arena, as
    /// (first col, first row, last col, last row), inclusive.
    pub fn span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.right() <= 0.0
            || rect.bottom() <= 0.0
            || rect.x >= self.arena_w
            || rect.y >= self.arena_h
        {
            return None;
        }
        let col = |x: f32| ((x / self.arena_w * self.cols as f32) as u16).min(self.cols - 1);
        let row = |y: f32| ((y / self.arena_h * self.rows as f32) as u16).min(self.rows - 1);
        Some((
            self.origin_col + col(rect.x.max(0.0)),
            self.origin_row + row(rect.y.max(0.0)),
            self.origin_col + col(rect.right()),
            self.origin_row + row(rect.bottom()),
        ))
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self { out, viewport }
    }

    pub fn resize(&mut self, term_cols: u16, term_rows: u16) {
        let (w, h) = (self.viewport.arena_w, self.viewport.arena_h);
        self.viewport = Viewport::fit(term_cols, term_rows, w, h);
    }

    fn put(&mut self, col: u16, row: u16, glyph: char, color: Color) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }

    fn fill_cells(&mut self, rect: &Rect, glyph: char, color: Color) -> std::io::Result<()> {
        if let Some((c0, r0, c1, r1)) = self.viewport.span(rect) {
            for row in r0..=r1 {
                for col in c0..=c1 {
                    self.put(col, row, glyph, color)?;
                }
            }
        }
        Ok(())
    }

    fn center_cell(&mut self, rect: &Rect, glyph: char, color: Color) -> std::io::Result<()> {
        let (cx, cy) = rect.center();
        if let Some((col, row)) = self.viewport.cell(cx, cy) {
            self.put(col, row, glyph, color)?;
        }
        Ok(())
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let v = self.viewport;
        let left = v.origin_col.saturating_sub(1);
        let right = v.origin_col + v.cols;
        let top = v.origin_row.saturating_sub(1);
        let bottom = v.origin_row + v.rows;
        let bar = "─".repeat(v.cols as usize);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(left, top))?;
        self.out.queue(Print(format!("┌{}┐", bar)))?;
        self.out.queue(cursor::MoveTo(left, bottom))?;
        self.out.queue(Print(format!("└{}┘", bar)))?;
        for row in v.origin_row..bottom {
            self.out.queue(cursor::MoveTo(left, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(right, row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_outline(&mut self, rect: &Rect) -> std::io::Result<()> {
        if let Some((c0, r0, c1, r1)) = self.viewport.span(rect) {
            for col in c0..=c1 {
                self.put(col, r0, '+', C_HITBOX)?;
                self.put(col, r1, '+', C_HITBOX)?;
            }
            for row in r0..=r1 {
                self.put(c0, row, '+', C_HITBOX)?;
                self.put(c1, row, '+', C_HITBOX)?;
            }
        }
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        region: &SpriteRegion,
        rect: &Rect,
        rotation: u16,
    ) -> std::io::Result<()> {
        match region.atlas {
            Atlas::Projectiles => self.center_cell(rect, '║', C_PROJECTILE),
            Atlas::Ships if region.col < 3 => {
                let glyph = match region.col {
                    0 => '◄',
                    2 => '►',
                    _ => '▲',
                };
                let color = C_SKINS[region.row as usize % C_SKINS.len()];
                self.fill_cells(rect, glyph, color)
            }
            Atlas::Ships => self.fill_cells(rect, 'W', C_ENEMY),
            Atlas::Misc => match (region.col, region.row) {
                (1, 3) => {
                    let glyph = ['|', '/', '─', '\\'][(rotation as usize / 45) % 4];
                    self.fill_cells(rect, glyph, C_ASTEROID)
                }
                (5..=8, level) if level < 4 => {
                    let glyph = ['·', ':', '*', '#'][level as usize];
                    let color = C_FLAME[(region.col - 5) as usize];
                    self.center_cell(rect, glyph, color)
                }
                (_, 6) => {
                    let glyph = ['*', '✶', '+', '·'][(region.col as usize) % 4];
                    self.fill_cells(rect, glyph, C_EXPLOSION)
                }
                _ => self.center_cell(rect, '?', C_HITBOX),
            },
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, command: &DrawCommand) -> std::io::Result<()> {
        match command {
            DrawCommand::Fill {
                fill: Fill::Background,
                ..
            } => {
                self.out.queue(terminal::Clear(terminal::ClearType::All))?;
                self.draw_border()
            }
            DrawCommand::Fill {
                rect,
                fill: Fill::Star,
            } => {
                let color = if rect.w > BRIGHT_STAR {
                    C_STAR_BRIGHT
                } else {
                    C_STAR_DIM
                };
                self.center_cell(rect, '.', color)
            }
            DrawCommand::Sprite {
                region,
                rect,
                rotation,
            } => self.draw_sprite(region, rect, *rotation),
            DrawCommand::Outline { rect } => self.draw_outline(rect),
            DrawCommand::Text { x, y, text } => {
                if let Some((col, row)) = self.viewport.cell(*x, *y) {
                    self.out.queue(cursor::MoveTo(col, row))?;
                    self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
                    self.out.queue(Print(text))?;
                }
                Ok(())
            }
        }
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.flush()
    }
}
