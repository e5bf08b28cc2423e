//! Everything that moves, draws and collides: ships, enemies, bullets and
//! shards, plus the [`World`] that holds them.
//!
//! Each kind is its own struct sharing a [`Body`].  The capability set
//! (move / draw / collide) is the [`GameObject`] trait, so the frame loop can
//! walk every entity in one pass without caring what it is.

use std::ops::{Index, IndexMut};

use glam::Vec2;
use rand::Rng;

use crate::geometry::{heading_degrees, random_time, random_velocity, rotate_degrees, wrap_position, Rect, UP};
use crate::sprites::{ShipFrame, Sprite};
use crate::surface::{Rgb, Surface};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Degrees turned per rotate call.
pub const SHIP_MANEUVERABILITY: f32 = 8.0;
pub const SHIP_ACCELERATION: f32 = 0.5;
pub const SHIP_ROCKET_SPEED: f32 = 40.0;
/// Share of the ship's own velocity added to each rocket.
pub const SHIP_VELOCITY_CARRY: f32 = 1.5;
/// Per-axis speed cap applied after every move.
pub const SHIP_MAX_SPEED: f32 = 15.0;
pub const SHIP_MAX_HEALTH: i32 = 200;
pub const SHIP_BAR_LENGTH: f32 = 200.0;
pub const SHIP_COOLDOWN_MS: f32 = 200.0;
pub const SHIP_MIN_COOLDOWN_MS: f32 = 100.0;

pub const ENEMY_COOLDOWN_MIN_MS: f32 = 500.0;
pub const ENEMY_COOLDOWN_MAX_MS: f32 = 700.0;

pub const SHARD_HEALING: i32 = 25;
pub const SHARD_FIRE_RATE_MS: f32 = 10.0;
/// Distance at which a shard starts drifting toward a ship.
pub const SHARD_PICKUP_RADIUS: f32 = 75.0;

const HEALTH_CHANGE_SPEED: i32 = 1;
const BAR_HEIGHT: f32 = 10.0;
const ENEMY_BAR_OFFSET: f32 = 30.0;
/// Frames an animation counter stays live after its action.
const ANIMATION_HOLD: u8 = 2;

const BAR_COLOR: Rgb = Rgb(178, 31, 1);
const BAR_DAMAGE_COLOR: Rgb = Rgb(232, 194, 93);
const BAR_HEAL_COLOR: Rgb = Rgb(93, 232, 141);

// ── Identifiers ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Where this player's ship appears at the start and after a respawn.
    pub fn start_position(self) -> Vec2 {
        match self {
            Player::One => Vec2::new(200.0, 300.0),
            Player::Two => Vec2::new(600.0, 300.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Ship 1",
            Player::Two => "Ship 2",
        }
    }
}

/// Per-kind enemy stats.  The two kinds differ only in these numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub min_speed: u32,
    pub max_speed: u32,
    pub max_health: i32,
    pub bullet_speed: f32,
    /// One-in-N odds of dropping a health shard on death.
    pub health_drop_chance: u32,
    /// One-in-N odds of dropping a fire-rate shard on death.
    pub fire_rate_drop_chance: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Normal,
    Slow,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 2] = [EnemyKind::Normal, EnemyKind::Slow];

    fn index(self) -> usize {
        match self {
            EnemyKind::Normal => 0,
            EnemyKind::Slow => 1,
        }
    }

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Normal => EnemyStats {
                min_speed: 3,
                max_speed: 5,
                max_health: 25,
                bullet_speed: 5.0,
                health_drop_chance: 20,
                fire_rate_drop_chance: 5,
            },
            EnemyKind::Slow => EnemyStats {
                min_speed: 1,
                max_speed: 2,
                max_health: 100,
                bullet_speed: 5.0,
                health_drop_chance: 10,
                fire_rate_drop_chance: 10,
            },
        }
    }

    pub fn sprite(self) -> Sprite {
        match self {
            EnemyKind::Normal => Sprite::EnemyNormal,
            EnemyKind::Slow => Sprite::EnemySlow,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletKind {
    Player,
    Enemy(EnemyKind),
}

impl BulletKind {
    pub fn sprite(self) -> Sprite {
        match self {
            BulletKind::Player => Sprite::PlayerBullet,
            BulletKind::Enemy(EnemyKind::Normal) => Sprite::Bullet,
            BulletKind::Enemy(EnemyKind::Slow) => Sprite::SlowBullet,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShardKind {
    Health,
    FireRate,
}

impl ShardKind {
    pub fn sprite(self) -> Sprite {
        match self {
            ShardKind::Health => Sprite::HealthShard,
            ShardKind::FireRate => Sprite::FireRateShard,
        }
    }

    /// Outer and inner glow colours.
    fn glow(self) -> (Rgb, Rgb) {
        match self {
            ShardKind::Health => (Rgb(0, 40, 0), Rgb(0, 25, 0)),
            ShardKind::FireRate => (Rgb(40, 0, 0), Rgb(25, 0, 0)),
        }
    }
}

// ── Typed containers ──────────────────────────────────────────────────────────

/// One value per player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerPlayer<T>([T; 2]);

impl<T> PerPlayer<T> {
    pub fn new(one: T, two: T) -> Self {
        Self([one, two])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }

    /// Pairs each value with its player.
    pub fn entries(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        &self.0[player.index()]
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        &mut self.0[player.index()]
    }
}

/// One value per enemy kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerKind<T>([T; 2]);

impl<T> PerKind<T> {
    pub fn new(normal: T, slow: T) -> Self {
        Self([normal, slow])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }
}

impl<T> Index<EnemyKind> for PerKind<T> {
    type Output = T;

    fn index(&self, kind: EnemyKind) -> &T {
        &self.0[kind.index()]
    }
}

impl<T> IndexMut<EnemyKind> for PerKind<T> {
    fn index_mut(&mut self, kind: EnemyKind) -> &mut T {
        &mut self.0[kind.index()]
    }
}

// ── Shared body & capabilities ────────────────────────────────────────────────

/// State every entity carries.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing used for rotation when drawing.  Not necessarily unit length.
    pub direction: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, direction: Vec2, sprite: Sprite) -> Self {
        Self { position, velocity, direction, radius: sprite.radius() }
    }

    /// Strict: bodies exactly touching do not collide.
    pub fn collides_with(&self, other: &Body) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    fn wrap_move(&mut self, arena: Vec2) {
        self.position = wrap_position(self.position + self.velocity, arena);
    }

    fn blit(&self, surface: &mut dyn Surface, sprite: Sprite) {
        surface.blit(sprite, self.position, heading_degrees(self.direction));
    }
}

pub trait GameObject {
    fn body(&self) -> &Body;

    /// Advance one frame inside an arena of the given size.
    fn move_within(&mut self, arena: Vec2);

    fn draw(&mut self, surface: &mut dyn Surface);

    fn collides_with(&self, other: &dyn GameObject) -> bool {
        self.body().collides_with(other.body())
    }
}

// ── Health ────────────────────────────────────────────────────────────────────

/// Where a health bar is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BarLayout {
    /// Centred under an entity at this position.
    Under(Vec2),
    /// Left edge at `x`; the transition grows to the right.
    LeftAnchored { x: f32, y: f32 },
    /// Right edge at `x`; the transition grows to the left.
    RightAnchored { x: f32, y: f32 },
}

/// Authoritative `target` health plus a displayed `current` value that eases
/// toward it one unit per draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Health {
    current: i32,
    target: i32,
    max: i32,
    bar_length: f32,
}

impl Health {
    pub fn new(max: i32, start: i32, bar_length: f32) -> Self {
        let start = start.clamp(0, max);
        Self { current: start, target: start, max, bar_length }
    }

    /// Full health with a bar one pixel per unit.
    pub fn full(max: i32) -> Self {
        Self::new(max, max, max as f32)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Health units per bar pixel.
    pub fn ratio(&self) -> f32 {
        self.max as f32 / self.bar_length
    }

    pub fn is_depleted(&self) -> bool {
        self.target <= 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.target = (self.target - amount).clamp(0, self.max);
    }

    pub fn heal(&mut self, amount: i32) {
        self.target = (self.target + amount).clamp(0, self.max);
    }

    /// Step `current` one notch toward `target`.  Returns the transition
    /// colour while the two still differ after the step.
    pub fn ease(&mut self) -> Option<Rgb> {
        if self.current < self.target {
            self.current = (self.current + HEALTH_CHANGE_SPEED).min(self.target);
            Some(BAR_HEAL_COLOR)
        } else if self.current > self.target {
            self.current = (self.current - HEALTH_CHANGE_SPEED).max(self.target);
            Some(BAR_DAMAGE_COLOR)
        } else {
            None
        }
    }

    /// Ease, then draw the current bar, the pending-change bar and the
    /// max-health outline.
    pub fn draw_bar(&mut self, surface: &mut dyn Surface, layout: BarLayout) {
        let transition_color = self.ease().unwrap_or(Rgb::WHITE);
        let ratio = self.ratio();
        let bar_width = self.current as f32 / ratio;
        let transition_width = ((self.target - self.current) as f32 / ratio).trunc();

        let (bar, transition, outline) = match layout {
            BarLayout::Under(center) => {
                let x = center.x - self.bar_length / 2.0;
                let y = center.y + ENEMY_BAR_OFFSET;
                let bar = Rect::new(x, y, bar_width, BAR_HEIGHT);
                let transition = Rect::new(bar.right(), y, transition_width, BAR_HEIGHT);
                (bar, transition, Rect::new(x, y, self.bar_length, BAR_HEIGHT))
            }
            BarLayout::LeftAnchored { x, y } => {
                let bar = Rect::new(x, y, bar_width, BAR_HEIGHT);
                let transition = Rect::new(bar.right(), y, transition_width, BAR_HEIGHT);
                (bar, transition, Rect::new(x, y, self.bar_length, BAR_HEIGHT))
            }
            BarLayout::RightAnchored { x, y } => {
                let bar = Rect::new(x - bar_width, y, bar_width, BAR_HEIGHT);
                let transition = Rect::new(bar.left(), y, -transition_width, BAR_HEIGHT);
                let outline = Rect::new(x - self.bar_length, y, self.bar_length, BAR_HEIGHT);
                (bar, transition, outline)
            }
        };

        surface.fill_rect(bar, BAR_COLOR);
        surface.fill_rect(transition.normalized(), transition_color);
        surface.stroke_rect(outline, Rgb::WHITE, 2.0);
    }
}

// ── Fire control ──────────────────────────────────────────────────────────────

/// Cooldown-gated trigger on a millisecond clock.
#[derive(Clone, Debug, PartialEq)]
pub struct FireControl {
    pub cooldown_ms: f32,
    last_shot_ms: u64,
}

impl FireControl {
    pub fn new(cooldown_ms: f32, now_ms: u64) -> Self {
        Self { cooldown_ms, last_shot_ms: now_ms }
    }

    pub fn ready(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) as f32 >= self.cooldown_ms
    }

    /// Fire if the cooldown has elapsed, restarting the clock.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if self.ready(now_ms) {
            self.last_shot_ms = now_ms;
            true
        } else {
            false
        }
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Straight-line projectile.  Never wraps; the game culls it once it leaves
/// the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub kind: BulletKind,
    pub body: Body,
}

impl Bullet {
    pub fn new(kind: BulletKind, position: Vec2, velocity: Vec2) -> Self {
        Self { kind, body: Body::new(position, velocity, velocity, kind.sprite()) }
    }
}

impl GameObject for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn move_within(&mut self, _arena: Vec2) {
        self.body.position += self.body.velocity;
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        self.body.blit(surface, self.kind.sprite());
    }
}

// ── Space ship ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpaceShip {
    pub body: Body,
    pub health: Health,
    pub fire: FireControl,
    frame: ShipFrame,
    accelerating: u8,
    deaccelerating: u8,
    shooting: u8,
}

impl SpaceShip {
    pub fn new(position: Vec2, health: i32, now_ms: u64) -> Self {
        let sprite = Sprite::Spaceship(ShipFrame::IDLE);
        Self {
            body: Body::new(position, Vec2::ZERO, UP, sprite),
            health: Health::new(SHIP_MAX_HEALTH, health, SHIP_BAR_LENGTH),
            fire: FireControl::new(SHIP_COOLDOWN_MS, now_ms),
            frame: ShipFrame::IDLE,
            accelerating: 0,
            deaccelerating: 0,
            shooting: 0,
        }
    }

    /// Fresh ship at the player's start position with full health.
    pub fn spawn(player: Player, now_ms: u64) -> Self {
        Self::new(player.start_position(), SHIP_MAX_HEALTH, now_ms)
    }

    pub fn frame(&self) -> ShipFrame {
        self.frame
    }

    pub fn rotate(&mut self, turn: Turn) {
        let angle = match turn {
            Turn::Clockwise => SHIP_MANEUVERABILITY,
            Turn::CounterClockwise => -SHIP_MANEUVERABILITY,
        };
        self.body.direction = rotate_degrees(self.body.direction, angle);
    }

    pub fn accelerate(&mut self) {
        self.body.velocity += self.body.direction * SHIP_ACCELERATION;
        self.accelerating = ANIMATION_HOLD;
    }

    pub fn deaccelerate(&mut self) {
        self.body.velocity -= self.body.direction * SHIP_ACCELERATION;
        self.deaccelerating = ANIMATION_HOLD;
    }

    /// Launch a rocket if the cooldown allows.  The rocket starts one frame
    /// of travel ahead of the ship.
    pub fn shoot(&mut self, now_ms: u64) -> Option<Bullet> {
        if !self.fire.try_fire(now_ms) {
            return None;
        }
        let velocity =
            self.body.direction * SHIP_ROCKET_SPEED + self.body.velocity * SHIP_VELOCITY_CARRY;
        self.shooting = ANIMATION_HOLD;
        Some(Bullet::new(BulletKind::Player, self.body.position + velocity, velocity))
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health.take_damage(amount);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health.heal(amount);
    }

    /// Shorten the fire cooldown, never below the floor.
    pub fn lower_cooldown(&mut self, amount_ms: f32) {
        self.fire.cooldown_ms = (self.fire.cooldown_ms - amount_ms).max(SHIP_MIN_COOLDOWN_MS);
    }

    fn tick_animation(&mut self) {
        self.accelerating = self.accelerating.saturating_sub(1);
        self.shooting = self.shooting.saturating_sub(1);
        self.deaccelerating = self.deaccelerating.saturating_sub(1);
        self.frame = ShipFrame::from_activity(
            self.accelerating > 0,
            self.shooting > 0,
            self.deaccelerating > 0,
        );
    }
}

impl GameObject for SpaceShip {
    fn body(&self) -> &Body {
        &self.body
    }

    fn move_within(&mut self, arena: Vec2) {
        self.body.wrap_move(arena);
        self.tick_animation();
        self.body.velocity = self
            .body
            .velocity
            .clamp(Vec2::splat(-SHIP_MAX_SPEED), Vec2::splat(SHIP_MAX_SPEED));
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        self.body.blit(surface, Sprite::Spaceship(self.frame));
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    pub health: Health,
    pub fire: FireControl,
}

impl Enemy {
    /// Roll a fixed velocity and cooldown for a new enemy.  It faces the way
    /// it drifts.
    pub fn spawn(kind: EnemyKind, position: Vec2, now_ms: u64, rng: &mut impl Rng) -> Self {
        let stats = kind.stats();
        let velocity = random_velocity(stats.min_speed, stats.max_speed, rng);
        let cooldown = random_time(ENEMY_COOLDOWN_MIN_MS, ENEMY_COOLDOWN_MAX_MS, rng);
        Self {
            kind,
            body: Body::new(position, velocity, velocity, kind.sprite()),
            health: Health::full(stats.max_health),
            fire: FireControl::new(cooldown, now_ms),
        }
    }

    pub fn max_health(&self) -> i32 {
        self.health.max()
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health.take_damage(amount);
    }

    pub fn shoot(&mut self, now_ms: u64) -> Option<Bullet> {
        if !self.fire.try_fire(now_ms) {
            return None;
        }
        let velocity = self.body.direction * self.kind.stats().bullet_speed + self.body.velocity;
        Some(Bullet::new(BulletKind::Enemy(self.kind), self.body.position, velocity))
    }
}

impl GameObject for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn move_within(&mut self, arena: Vec2) {
        self.body.wrap_move(arena);
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        self.body.blit(surface, self.kind.sprite());
        self.health.draw_bar(surface, BarLayout::Under(self.body.position));
    }
}

// ── Shards ────────────────────────────────────────────────────────────────────

/// Collectible dropped by a dying enemy.  Bobs in place and is pulled toward
/// nearby ships.
#[derive(Clone, Debug, PartialEq)]
pub struct Shard {
    pub kind: ShardKind,
    pub body: Body,
    clock: u32,
    last_bob: u32,
}

impl Shard {
    pub fn new(kind: ShardKind, position: Vec2) -> Self {
        Self { kind, body: Body::new(position, UP, UP, kind.sprite()), clock: 0, last_bob: 0 }
    }

    pub fn apply(&self, ship: &mut SpaceShip) {
        match self.kind {
            ShardKind::Health => ship.heal(SHARD_HEALING),
            ShardKind::FireRate => ship.lower_cooldown(SHARD_FIRE_RATE_MS),
        }
    }

    /// Nudge the shard toward `target` by a fixed per-axis step.
    pub fn magnet(&mut self, target: Vec2) {
        let delta = target - self.body.position;
        let angle = delta.y.atan2(delta.x);
        self.body.position.x += 2.0 * angle.cos();
        self.body.position.y += 4.0 * angle.sin();
    }
}

impl GameObject for Shard {
    fn body(&self) -> &Body {
        &self.body
    }

    fn move_within(&mut self, _arena: Vec2) {
        self.clock += 1;
        if self.clock - self.last_bob > 1 {
            self.last_bob = self.clock;
            self.body.position.y += 2.0 * (0.1 * self.clock as f32).sin();
        }
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        let size = self.kind.sprite().size();
        let (outer, inner) = self.kind.glow();
        for (scale, color) in [(2.0, outer), (1.5, inner)] {
            let extent = size * scale;
            let corner = self.body.position - extent / 2.0;
            surface.glow(Rect::new(corner.x, corner.y, extent.x, extent.y), color);
        }
        surface.blit(self.kind.sprite(), self.body.position, 0.0);
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Every live entity, grouped by owner and kind.  Entities never reference
/// each other.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    /// `None` while a ship is destroyed and waiting for the next wave.
    pub ships: PerPlayer<Option<SpaceShip>>,
    pub player_bullets: PerPlayer<Vec<Bullet>>,
    pub enemies: PerKind<Vec<Enemy>>,
    pub enemy_bullets: PerKind<Vec<Bullet>>,
    pub shards: Vec<Shard>,
}

impl World {
    /// Both ships at their start positions, nothing else.
    pub fn new(now_ms: u64) -> Self {
        Self {
            ships: PerPlayer::new(
                Some(SpaceShip::spawn(Player::One, now_ms)),
                Some(SpaceShip::spawn(Player::Two, now_ms)),
            ),
            player_bullets: PerPlayer::default(),
            enemies: PerKind::default(),
            enemy_bullets: PerKind::default(),
            shards: Vec::new(),
        }
    }

    pub fn living_ships(&self) -> impl Iterator<Item = (Player, &SpaceShip)> {
        self.ships.entries().filter_map(|(player, ship)| ship.as_ref().map(|s| (player, s)))
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.iter().map(Vec::len).sum()
    }

    /// All entities in draw order: shards, ships, enemies, player bullets,
    /// enemy bullets.
    pub fn objects_mut(&mut self) -> Vec<&mut dyn GameObject> {
        let mut objects: Vec<&mut dyn GameObject> = Vec::new();
        objects.extend(self.shards.iter_mut().map(|s| s as &mut dyn GameObject));
        objects.extend(self.ships.iter_mut().flatten().map(|s| s as &mut dyn GameObject));
        for enemies in self.enemies.iter_mut() {
            objects.extend(enemies.iter_mut().map(|e| e as &mut dyn GameObject));
        }
        for bullets in self.player_bullets.iter_mut() {
            objects.extend(bullets.iter_mut().map(|b| b as &mut dyn GameObject));
        }
        for bullets in self.enemy_bullets.iter_mut() {
            objects.extend(bullets.iter_mut().map(|b| b as &mut dyn GameObject));
        }
        objects
    }
}
