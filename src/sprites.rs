//! Sprite table.
//!
//! Asset loading belongs to the backend; the core only needs each sprite's
//! name, its on-screen size (which fixes the collision radius) and, for the
//! ship, which of the eight animation frames to show.

use glam::Vec2;

/// Index into the eight-frame ship animation sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShipFrame(pub u8);

impl ShipFrame {
    pub const IDLE: ShipFrame = ShipFrame(0);
    pub const COUNT: u8 = 8;

    /// Pick the frame for a combination of the three animation counters.
    pub fn from_activity(accelerating: bool, shooting: bool, deaccelerating: bool) -> Self {
        let index = match (accelerating, shooting, deaccelerating) {
            (false, false, false) => 0,
            (false, true, false) => 1,
            (true, true, false) => 2,
            (true, false, false) => 3,
            (false, true, true) => 4,
            (true, true, true) => 5,
            (true, false, true) => 6,
            (false, false, true) => 7,
        };
        ShipFrame(index)
    }

    pub fn is_thrusting(self) -> bool {
        matches!(self.0, 2 | 3 | 5 | 6)
    }

    pub fn is_firing(self) -> bool {
        matches!(self.0, 1 | 2 | 4 | 5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Spaceship(ShipFrame),
    PlayerBullet,
    Bullet,
    SlowBullet,
    EnemyNormal,
    EnemySlow,
    HealthShard,
    FireRateShard,
}

impl Sprite {
    /// File stem of the PNG asset.
    pub fn asset_name(self) -> &'static str {
        match self {
            Sprite::Spaceship(_) => "Spaceship",
            Sprite::PlayerBullet => "PlayerBullet",
            Sprite::Bullet => "Bullet",
            Sprite::SlowBullet => "SlowBullet",
            Sprite::EnemyNormal => "EnemyNormal",
            Sprite::EnemySlow => "EnemySlow",
            Sprite::HealthShard => "HealthShard",
            Sprite::FireRateShard => "FireRateShard",
        }
    }

    /// Unscaled size of one frame in asset pixels.
    pub fn frame_size(self) -> (u32, u32) {
        match self {
            Sprite::Spaceship(_) => (13, 15),
            Sprite::PlayerBullet | Sprite::Bullet => (3, 3),
            Sprite::SlowBullet => (5, 5),
            Sprite::EnemyNormal => (11, 11),
            Sprite::EnemySlow => (16, 16),
            Sprite::HealthShard | Sprite::FireRateShard => (5, 7),
        }
    }

    pub fn scale(self) -> u32 {
        match self {
            Sprite::HealthShard | Sprite::FireRateShard => 2,
            _ => 3,
        }
    }

    /// On-screen size in arena units.
    pub fn size(self) -> Vec2 {
        let (w, h) = self.frame_size();
        let scale = self.scale();
        Vec2::new((w * scale) as f32, (h * scale) as f32)
    }

    /// Collision radius: half the on-screen width.
    pub fn radius(self) -> f32 {
        self.size().x / 2.0
    }
}
