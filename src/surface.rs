//! Rendering, input and audio primitives the core calls into.
//!
//! Entities draw through [`Surface`] only.  The frame loop additionally needs
//! key polling, sound playback and a way to present the finished frame; those
//! live on [`Backend`].

use glam::Vec2;

use crate::geometry::Rect;
use crate::sound::SoundClip;
use crate::sprites::Sprite;

// ── Colours ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const SNOW: Rgb = Rgb(255, 250, 250);
}

// ── Text ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Normal,
    Large,
}

/// Where a line of text is pinned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextAnchor {
    /// Text centred on the point.
    Center(Vec2),
    /// Left edge at `x`, vertically centred on `y`.
    Left(Vec2),
    /// Right edge at `x`, vertically centred on `y`.
    Right(Vec2),
}

// ── Drawing ───────────────────────────────────────────────────────────────────

pub trait Surface {
    /// Fill the whole frame.
    fn clear(&mut self, color: Rgb);

    /// Draw `sprite` centred on `center`, rotated clockwise by `rotation`
    /// degrees from its upright pose.
    fn blit(&mut self, sprite: Sprite, center: Vec2, rotation: f32);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Outline only, `width` units thick.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32);

    /// Additive ellipse inscribed in `bounds`.
    fn glow(&mut self, bounds: Rect, color: Rgb);

    fn text(&mut self, text: &str, anchor: TextAnchor, font: Font, color: Rgb);
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Physical keys the game reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Enter,
    Escape,
}

/// Edge-triggered events drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed, Escape pressed or the process was interrupted.
    Quit,
    /// A key went down this frame.
    KeyDown(Key),
}

// ── Backend ───────────────────────────────────────────────────────────────────

/// Everything the frame loop needs from the platform.
pub trait Backend: Surface {
    /// Drain input events that arrived since the previous call.
    fn poll_events(&mut self) -> std::io::Result<Vec<InputEvent>>;

    /// Whether `key` is currently held.
    fn is_pressed(&self, key: Key) -> bool;

    fn play_sound(&mut self, clip: &SoundClip, volume: f32);

    /// Show the frame drawn since the last `present`.
    fn present(&mut self) -> std::io::Result<()>;
}
