//! Terminal backend: a character-cell canvas drawn with crossterm.
//!
//! Arena units are scaled onto the terminal grid.  Drawing only touches the
//! in-memory canvas; `present` writes the whole grid in one flush.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use glam::Vec2;
use log::debug;

use boom::geometry::Rect;
use boom::sound::{Sound, SoundClip};
use boom::sprites::{ShipFrame, Sprite};
use boom::surface::{Backend, Font, InputEvent, Key, Rgb, Surface, TextAnchor};

use crate::keyboard::Keyboard;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: Rgb = Rgb(255, 255, 255);
const C_SHIP_THRUST: Rgb = Rgb(255, 200, 0);
const C_SHIP_FIRE: Rgb = Rgb(0, 255, 255);
const C_PLAYER_BULLET: Rgb = Rgb(0, 255, 255);
const C_ENEMY_BULLET: Rgb = Rgb(255, 0, 255);
const C_SLOW_BULLET: Rgb = Rgb(255, 80, 80);
const C_ENEMY_NORMAL: Rgb = Rgb(0, 200, 0);
const C_ENEMY_SLOW: Rgb = Rgb(200, 40, 40);
const C_HEALTH_SHARD: Rgb = Rgb(0, 255, 0);
const C_FIRE_RATE_SHARD: Rgb = Rgb(255, 0, 0);

/// Ship glyphs by heading, clockwise from straight up in 45° steps.
const SHIP_GLYPHS: [char; 8] = ['▲', '◥', '▶', '◢', '▼', '◣', '◀', '◤'];

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: char,
    fg: Rgb,
    bg: Rgb,
}

const BLANK: Cell = Cell { glyph: ' ', fg: Rgb::WHITE, bg: Rgb::BLACK };

pub struct Canvas {
    cols: u16,
    rows: u16,
    /// Cells per arena unit on each axis.
    scale: Vec2,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, arena: Vec2) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            scale: Vec2::new(cols as f32 / arena.x, rows as f32 / arena.y),
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    fn cell_of(&self, point: Vec2) -> (i32, i32) {
        let p = point * self.scale;
        (p.x.floor() as i32, p.y.floor() as i32)
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        self.cells.get_mut(row as usize * self.cols as usize + col as usize)
    }

    /// Cell span covered by `rect`; always at least one cell on each axis so
    /// thin bars stay visible.
    fn span(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let rect = rect.normalized();
        let left = (rect.left() * self.scale.x).floor() as i32;
        let top = (rect.top() * self.scale.y).floor() as i32;
        let right = ((rect.right() * self.scale.x).ceil() as i32).max(left + 1);
        let bottom = ((rect.bottom() * self.scale.y).ceil() as i32).max(top + 1);
        (left, top, right, bottom)
    }

    fn put(&mut self, col: i32, row: i32, glyph: char, fg: Rgb) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.glyph = glyph;
            cell.fg = fg;
        }
    }

    fn write<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut fg = None;
        let mut bg = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if fg != Some(cell.fg) {
                    out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    bg = Some(cell.bg);
                }
                out.queue(Print(cell.glyph))?;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

fn sprite_glyph(sprite: Sprite, rotation: f32) -> (char, Rgb) {
    match sprite {
        Sprite::Spaceship(frame) => {
            let index = (rotation / 45.0).round() as usize % SHIP_GLYPHS.len();
            (SHIP_GLYPHS[index], ship_color(frame))
        }
        Sprite::PlayerBullet => ('•', C_PLAYER_BULLET),
        Sprite::Bullet => ('∙', C_ENEMY_BULLET),
        Sprite::SlowBullet => ('●', C_SLOW_BULLET),
        Sprite::EnemyNormal => ('◆', C_ENEMY_NORMAL),
        Sprite::EnemySlow => ('█', C_ENEMY_SLOW),
        Sprite::HealthShard => ('♦', C_HEALTH_SHARD),
        Sprite::FireRateShard => ('♦', C_FIRE_RATE_SHARD),
    }
}

fn ship_color(frame: ShipFrame) -> Rgb {
    if frame.is_firing() {
        C_SHIP_FIRE
    } else if frame.is_thrusting() {
        C_SHIP_THRUST
    } else {
        C_SHIP
    }
}

impl Surface for Canvas {
    fn clear(&mut self, color: Rgb) {
        self.cells.fill(Cell { bg: color, ..BLANK });
    }

    fn blit(&mut self, sprite: Sprite, center: Vec2, rotation: f32) {
        let (glyph, color) = sprite_glyph(sprite, rotation);
        let (col, row) = self.cell_of(center);
        self.put(col, row, glyph, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        if rect.w == 0.0 || rect.h == 0.0 {
            return;
        }
        let (left, top, right, bottom) = self.span(rect);
        for row in top..bottom {
            for col in left..right {
                self.put(col, row, '█', color);
            }
        }
    }

    /// Outlines are drawn into empty cells only, so on a one-row bar they
    /// show the missing health instead of covering the fill.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, _width: f32) {
        let (left, top, right, bottom) = self.span(rect);
        for row in top..bottom {
            for col in left..right {
                let edge = row == top || row == bottom - 1 || col == left || col == right - 1;
                if let Some(cell) = self.cell_mut(col, row) {
                    if edge && cell.glyph == ' ' {
                        cell.glyph = '░';
                        cell.fg = color;
                    }
                }
            }
        }
    }

    fn glow(&mut self, bounds: Rect, color: Rgb) {
        let (left, top, right, bottom) = self.span(bounds);
        let center = Vec2::new(left as f32 + right as f32, top as f32 + bottom as f32) / 2.0;
        let radii = Vec2::new(right as f32 - left as f32, bottom as f32 - top as f32) / 2.0;
        for row in top..bottom {
            for col in left..right {
                let offset = (Vec2::new(col as f32 + 0.5, row as f32 + 0.5) - center) / radii;
                if offset.length_squared() > 1.0 {
                    continue;
                }
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.bg = Rgb(
                        cell.bg.0.saturating_add(color.0),
                        cell.bg.1.saturating_add(color.1),
                        cell.bg.2.saturating_add(color.2),
                    );
                }
            }
        }
    }

    fn text(&mut self, text: &str, anchor: TextAnchor, font: Font, color: Rgb) {
        let rendered: String = match font {
            Font::Normal => text.to_string(),
            Font::Large => text
                .to_uppercase()
                .chars()
                .flat_map(|c| [c, ' '])
                .collect::<String>()
                .trim_end()
                .to_string(),
        };
        let width = rendered.chars().count() as i32;
        let (start, row) = match anchor {
            TextAnchor::Center(at) => {
                let (col, row) = self.cell_of(at);
                (col - width / 2, row)
            }
            TextAnchor::Left(at) => self.cell_of(at),
            TextAnchor::Right(at) => {
                let (col, row) = self.cell_of(at);
                (col - width + 1, row)
            }
        };
        for (i, ch) in rendered.chars().enumerate() {
            self.put(start + i as i32, row, ch, color);
        }
    }
}

// ── Backend ───────────────────────────────────────────────────────────────────

pub struct TerminalBackend<W: Write> {
    out: W,
    arena: Vec2,
    canvas: Canvas,
    keyboard: Keyboard,
    bell: bool,
    bell_pending: bool,
    /// The grid changed size; wipe the screen before the next frame.
    clear_pending: bool,
}

impl<W: Write> TerminalBackend<W> {
    pub fn new(out: W, cols: u16, rows: u16, arena: Vec2, bell: bool) -> Self {
        Self {
            out,
            arena,
            canvas: Canvas::new(cols, rows, arena),
            keyboard: Keyboard::default(),
            bell,
            bell_pending: false,
            clear_pending: false,
        }
    }

    /// Rebuild the canvas for a new terminal size.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        debug!("terminal resized to {cols}x{rows}");
        self.canvas = Canvas::new(cols, rows, self.arena);
        self.clear_pending = true;
    }

    /// Hand back the writer so the caller can restore the terminal.
    pub fn into_writer(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalBackend<W> {
    fn clear(&mut self, color: Rgb) {
        self.canvas.clear(color);
    }

    fn blit(&mut self, sprite: Sprite, center: Vec2, rotation: f32) {
        self.canvas.blit(sprite, center, rotation);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.canvas.fill_rect(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32) {
        self.canvas.stroke_rect(rect, color, width);
    }

    fn glow(&mut self, bounds: Rect, color: Rgb) {
        self.canvas.glow(bounds, color);
    }

    fn text(&mut self, text: &str, anchor: TextAnchor, font: Font, color: Rgb) {
        self.canvas.text(text, anchor, font, color);
    }
}

impl<W: Write> Backend for TerminalBackend<W> {
    fn poll_events(&mut self) -> std::io::Result<Vec<InputEvent>> {
        let events = self.keyboard.poll()?;
        if let Some((cols, rows)) = self.keyboard.take_resize() {
            self.resize(cols, rows);
        }
        Ok(events)
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.keyboard.is_held(key)
    }

    /// The terminal has no mixer; loud cues ring the bell once per frame.
    fn play_sound(&mut self, clip: &SoundClip, volume: f32) {
        let loud = matches!(
            clip.sound,
            Sound::PlayerExplosion | Sound::EnemyExplosion | Sound::NewLevel
        );
        if self.bell && loud && volume >= 1.0 {
            self.bell_pending = true;
        }
    }

    fn present(&mut self) -> std::io::Result<()> {
        if std::mem::take(&mut self.clear_pending) {
            self.out.queue(Clear(ClearType::All))?;
        }
        self.canvas.write(&mut self.out)?;
        if std::mem::take(&mut self.bell_pending) {
            self.out.queue(Print('\u{7}'))?;
        }
        self.out.flush()
    }
}
