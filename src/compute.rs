//! Game state machine: waves, collisions, scoring and win/lose detection.
//!
//! [`Game::tick`] runs one logic step.  Randomness comes in through the
//! injected RNG and time through a millisecond clock, so a seeded RNG and a
//! fixed clock make every step reproducible.

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::entities::{
    Enemy, EnemyKind, GameObject, PerPlayer, Player, Shard, ShardKind, SpaceShip, Turn, World,
    SHARD_PICKUP_RADIUS,
};
use crate::geometry::{random_position, roll_chance, Rect};
use crate::score::{ScoreError, ScoreKind, ScoreStore};
use crate::sound::{Sound, SoundCue};
use crate::surface::Key;

// ── Rules ─────────────────────────────────────────────────────────────────────

/// Health removed by any bullet hit, player or enemy.
pub const BULLET_DAMAGE: i32 = 25;
/// New enemies never appear closer than this to a living ship.
pub const SPAWN_KEEP_OUT: f32 = 100.0;
pub const ENEMY_SHOT_VOLUME: f32 = 0.1;
pub const LOSS_MESSAGE: &str = "You lost!";

/// Normal and slow enemy counts for a wave spawned while at `level`.
pub fn wave_size(level: u64) -> (usize, usize) {
    let normal = 6 + level / 2;
    let slow = level.saturating_sub(5);
    (normal as usize, slow as usize)
}

/// Score for hitting an enemy with `max_health` while at `level`.
pub fn hit_award(max_health: i32, level: u64) -> u64 {
    max_health.max(0) as u64 * 2 * level
}

/// Rejection-sample a spawn point farther than [`SPAWN_KEEP_OUT`] from every
/// ship position given.  With no ships, the first sample is taken.
pub fn spawn_position(arena: Vec2, ships: &[Vec2], rng: &mut impl Rng) -> Vec2 {
    loop {
        let candidate = random_position(arena, rng);
        if ships.iter().all(|&ship| candidate.distance(ship) > SPAWN_KEEP_OUT) {
            return candidate;
        }
    }
}

/// Drop the items whose indices are listed.
fn remove_marked<T>(items: &mut Vec<T>, marked: &[usize]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !marked.contains(&index);
        index += 1;
        keep
    });
}

// ── Controls ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub clockwise: Key,
    pub counter_clockwise: Key,
    pub thrust: Key,
    pub reverse: Key,
    pub fire: Key,
}

impl Controls {
    pub const fn for_player(player: Player) -> Self {
        match player {
            Player::One => Controls {
                clockwise: Key::D,
                counter_clockwise: Key::A,
                thrust: Key::W,
                reverse: Key::S,
                fire: Key::Space,
            },
            Player::Two => Controls {
                clockwise: Key::Right,
                counter_clockwise: Key::Left,
                thrust: Key::Up,
                reverse: Key::Down,
                fire: Key::Backspace,
            },
        }
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Title screen; nothing has been spawned yet.
    NotStarted,
    Running,
    /// Terminal state showing a message until restarted.
    Ended(String),
}

pub struct Game<S> {
    pub arena: Vec2,
    pub status: GameStatus,
    pub level: u64,
    pub score: u64,
    pub player_scores: PerPlayer<u64>,
    /// Stored best score, refreshed after every raise.
    pub high_score: u64,
    /// Stored best level, refreshed after every raise.
    pub highest_level: u64,
    pub world: World,
    sounds: Vec<SoundCue>,
    store: S,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(arena: Vec2, store: S, now_ms: u64) -> Self {
        Self {
            arena,
            status: GameStatus::NotStarted,
            level: 0,
            score: 0,
            player_scores: PerPlayer::default(),
            high_score: store.read(ScoreKind::BestScore),
            highest_level: store.read(ScoreKind::BestLevel),
            world: World::new(now_ms),
            sounds: Vec::new(),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Cues queued since the last drain.
    pub fn pending_sounds(&self) -> &[SoundCue] {
        &self.sounds
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sounds)
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// The start/restart input.  Starts from the title screen, restarts from
    /// an ended game and is ignored while running.
    pub fn start(&mut self, now_ms: u64) {
        match self.status {
            GameStatus::NotStarted => {
                info!("game started");
                self.status = GameStatus::Running;
            }
            GameStatus::Ended(_) => self.reset(now_ms),
            GameStatus::Running => {}
        }
    }

    /// Back to level 0 with fresh ships and no score.  Stored records stay.
    pub fn reset(&mut self, now_ms: u64) {
        info!("new game after reaching level {} with score {}", self.level, self.score);
        self.level = 0;
        self.score = 0;
        self.player_scores = PerPlayer::default();
        self.world = World::new(now_ms);
        self.status = GameStatus::Running;
    }

    // ── Per-frame work outside the logic tick ─────────────────────────────────

    /// Apply held keys to every living ship.
    pub fn steer(&mut self, pressed: &dyn Fn(Key) -> bool, now_ms: u64) {
        for player in Player::ALL {
            let Some(ship) = self.world.ships[player].as_mut() else {
                continue;
            };
            let controls = Controls::for_player(player);
            if pressed(controls.clockwise) {
                ship.rotate(Turn::Clockwise);
            }
            if pressed(controls.counter_clockwise) {
                ship.rotate(Turn::CounterClockwise);
            }
            if pressed(controls.thrust) {
                ship.accelerate();
            }
            if pressed(controls.reverse) {
                ship.deaccelerate();
            }
            if pressed(controls.fire) {
                if let Some(rocket) = ship.shoot(now_ms) {
                    self.world.player_bullets[player].push(rocket);
                    self.sounds.push(SoundCue::new(Sound::PlayerShoot));
                }
            }
        }
    }

    pub fn move_objects(&mut self) {
        let arena = self.arena;
        for object in self.world.objects_mut() {
            object.move_within(arena);
        }
    }

    /// Pull every shard within pickup range toward `player`'s ship.
    pub fn attract_shards(&mut self, player: Player) {
        let Some(ship) = self.world.ships[player].as_ref() else {
            return;
        };
        let target = ship.body.position;
        for shard in self.world.shards.iter_mut() {
            if shard.body.position.distance(target) < SHARD_PICKUP_RADIUS {
                shard.magnet(target);
            }
        }
    }

    // ── Logic tick ────────────────────────────────────────────────────────────

    /// One logic step.  Does nothing unless the game is running.
    pub fn tick(&mut self, now_ms: u64, rng: &mut impl Rng) -> Result<(), ScoreError> {
        if !self.is_running() {
            return Ok(());
        }
        self.cull_bullets();
        self.collect_shards();
        self.resolve_player_hits()?;
        self.clear_dead_enemies(rng);
        self.resolve_enemy_hits();
        if self.world.enemy_count() == 0 {
            self.spawn_wave(now_ms, rng)?;
        }
        self.enemy_fire(now_ms);
        self.check_loss();
        Ok(())
    }

    fn cull_bullets(&mut self) {
        let bounds = Rect::new(0.0, 0.0, self.arena.x, self.arena.y);
        for bullets in self.world.player_bullets.iter_mut() {
            bullets.retain(|b| bounds.contains(b.body.position));
        }
        for bullets in self.world.enemy_bullets.iter_mut() {
            bullets.retain(|b| bounds.contains(b.body.position));
        }
    }

    fn collect_shards(&mut self) {
        let mut collected = Vec::new();
        for (index, shard) in self.world.shards.iter().enumerate() {
            for ship in self.world.ships.iter_mut().flatten() {
                if shard.collides_with(&*ship) {
                    shard.apply(ship);
                    self.sounds.push(SoundCue::new(Sound::ItemPickup));
                    collected.push(index);
                    break;
                }
            }
        }
        remove_marked(&mut self.world.shards, &collected);
    }

    fn resolve_player_hits(&mut self) -> Result<(), ScoreError> {
        for player in Player::ALL {
            let mut spent = Vec::new();
            for (index, bullet) in self.world.player_bullets[player].iter().enumerate() {
                let target = EnemyKind::ALL.into_iter().find_map(|kind| {
                    self.world.enemies[kind]
                        .iter()
                        .position(|enemy| enemy.collides_with(bullet))
                        .map(|i| (kind, i))
                });
                let Some((kind, hit)) = target else {
                    continue;
                };

                let enemy = &mut self.world.enemies[kind][hit];
                let award = hit_award(enemy.max_health(), self.level);
                self.score += award;
                self.player_scores[player] += award;
                if self.score > self.high_score {
                    self.high_score = self.store.write(self.score, ScoreKind::BestScore)?;
                }

                enemy.take_damage(BULLET_DAMAGE);
                spent.push(index);
                self.sounds.push(SoundCue::new(Sound::EnemyHurt));
            }
            remove_marked(&mut self.world.player_bullets[player], &spent);
        }
        Ok(())
    }

    fn clear_dead_enemies(&mut self, rng: &mut impl Rng) {
        for kind in EnemyKind::ALL {
            let stats = kind.stats();
            let enemies = std::mem::take(&mut self.world.enemies[kind]);
            for enemy in enemies {
                if !enemy.health.is_depleted() {
                    self.world.enemies[kind].push(enemy);
                    continue;
                }
                let position = enemy.body.position;
                if roll_chance(stats.health_drop_chance, rng) {
                    self.world.shards.push(Shard::new(ShardKind::Health, position));
                }
                if roll_chance(stats.fire_rate_drop_chance, rng) {
                    self.world.shards.push(Shard::new(ShardKind::FireRate, position));
                }
                self.sounds.push(SoundCue::new(Sound::EnemyExplosion));
            }
        }
    }

    fn resolve_enemy_hits(&mut self) {
        for kind in EnemyKind::ALL {
            let mut spent = Vec::new();
            for (index, bullet) in self.world.enemy_bullets[kind].iter().enumerate() {
                for player in Player::ALL {
                    let Some(ship) = self.world.ships[player].as_mut() else {
                        continue;
                    };
                    if !ship.collides_with(bullet) {
                        continue;
                    }
                    ship.take_damage(BULLET_DAMAGE);
                    spent.push(index);
                    if ship.health.is_depleted() {
                        info!("{} destroyed", player.label());
                        self.world.ships[player] = None;
                        self.sounds.push(SoundCue::new(Sound::PlayerExplosion));
                    }
                    break;
                }
            }
            remove_marked(&mut self.world.enemy_bullets[kind], &spent);
        }
    }

    fn spawn_wave(&mut self, now_ms: u64, rng: &mut impl Rng) -> Result<(), ScoreError> {
        let (normal, slow) = wave_size(self.level);
        let ships: Vec<Vec2> = self.world.living_ships().map(|(_, s)| s.body.position).collect();
        for (kind, count) in [(EnemyKind::Normal, normal), (EnemyKind::Slow, slow)] {
            for _ in 0..count {
                let position = spawn_position(self.arena, &ships, rng);
                self.world.enemies[kind].push(Enemy::spawn(kind, position, now_ms, rng));
            }
        }
        debug!("wave at level {}: {} normal, {} slow", self.level, normal, slow);

        self.level += 1;
        if self.level > self.highest_level {
            self.highest_level = self.store.write(self.level, ScoreKind::BestLevel)?;
        }

        for player in Player::ALL {
            if self.world.ships[player].is_none() {
                self.world.ships[player] = Some(SpaceShip::spawn(player, now_ms));
            }
        }

        if self.level > 1 {
            info!("advanced to level {}", self.level);
            self.sounds.push(SoundCue::new(Sound::NewLevel));
        }
        Ok(())
    }

    fn enemy_fire(&mut self, now_ms: u64) {
        for kind in EnemyKind::ALL {
            for enemy in self.world.enemies[kind].iter_mut() {
                if let Some(bullet) = enemy.shoot(now_ms) {
                    self.world.enemy_bullets[kind].push(bullet);
                    self.sounds.push(SoundCue::with_volume(Sound::EnemyShoot, ENEMY_SHOT_VOLUME));
                }
            }
        }
    }

    fn check_loss(&mut self) {
        if self.world.living_ships().next().is_none() {
            info!("both ships lost at level {} with score {}", self.level, self.score);
            self.status = GameStatus::Ended(LOSS_MESSAGE.to_string());
        }
    }
}
