//! Vector helpers and random generators for the wrap-around arena.
//!
//! Coordinates are screen-style: x grows right, y grows down.  Angles handed
//! to [`rotate_degrees`] follow the same convention, so a positive angle turns
//! clockwise on screen.

use glam::Vec2;
use rand::Rng;

/// Facing of a freshly built ship: straight up the screen.
pub const UP: Vec2 = Vec2::new(0.0, -1.0);

// ── Rectangles ────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in arena units.  Width and height may be negative
/// until [`Rect::normalized`] is called.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Flip negative extents so the rectangle covers the same area with
    /// non-negative width and height.
    pub fn normalized(self) -> Self {
        let (x, w) = if self.w < 0.0 { (self.x + self.w, -self.w) } else { (self.x, self.w) };
        let (y, h) = if self.h < 0.0 { (self.y + self.h, -self.h) } else { (self.y, self.h) };
        Self { x, y, w, h }
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom
    /// edges are not.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

// ── Vector operations ─────────────────────────────────────────────────────────

/// Rotate `v` by `degrees` (clockwise on screen).
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Heading of `v` in degrees, measured clockwise from [`UP`], in `[0, 360)`.
pub fn heading_degrees(v: Vec2) -> f32 {
    v.x.atan2(-v.y).to_degrees().rem_euclid(360.0)
}

/// Wrap a position onto the torus of the given size.
pub fn wrap_position(position: Vec2, arena: Vec2) -> Vec2 {
    Vec2::new(position.x.rem_euclid(arena.x), position.y.rem_euclid(arena.y))
}

// ── Random generators ─────────────────────────────────────────────────────────

/// Uniform integer position inside the arena.
pub fn random_position(arena: Vec2, rng: &mut impl Rng) -> Vec2 {
    let x = rng.gen_range(0..arena.x.max(1.0) as u32);
    let y = rng.gen_range(0..arena.y.max(1.0) as u32);
    Vec2::new(x as f32, y as f32)
}

/// Velocity with an integer speed in `min_speed..=max_speed` and a whole
/// degree heading in `0..=360`.
pub fn random_velocity(min_speed: u32, max_speed: u32, rng: &mut impl Rng) -> Vec2 {
    let speed = rng.gen_range(min_speed..=max_speed) as f32;
    let angle = rng.gen_range(0..=360) as f32;
    rotate_degrees(Vec2::new(speed, 0.0), angle)
}

/// Duration in milliseconds, uniform in `[min_ms, max_ms]`, rounded to two
/// decimals.
pub fn random_time(min_ms: f32, max_ms: f32, rng: &mut impl Rng) -> f32 {
    let raw = rng.gen_range(min_ms..=max_ms);
    (raw * 100.0).round() / 100.0
}

/// One-in-`odds` roll.  `odds` of 0 or 1 always succeeds.
pub fn roll_chance(odds: u32, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=odds.max(1)) == 1
}
