//! Fixed-cadence frame loop: tick, move, input, render, sleep.
//!
//! The loop sleeps a fixed delay after each frame without subtracting the
//! time the frame took, and nothing is scaled by elapsed time.

use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::compute::{Game, GameStatus};
use crate::entities::Player;
use crate::hud;
use crate::score::{ScoreError, ScoreStore};
use crate::sound::SoundBoard;
use crate::surface::{Backend, InputEvent, Key, Rgb};

#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error("backend error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct FrameLoop<B, S, R> {
    backend: B,
    game: Game<S>,
    sounds: SoundBoard,
    rng: R,
    frame_delay: Duration,
    origin: Instant,
}

impl<B: Backend, S: ScoreStore, R: Rng> FrameLoop<B, S, R> {
    pub fn new(backend: B, game: Game<S>, sounds: SoundBoard, rng: R, frame_delay: Duration) -> Self {
        Self { backend, game, sounds, rng, frame_delay, origin: Instant::now() }
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game<S> {
        &mut self.game
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Run until a quit input arrives.
    pub fn run(&mut self) -> Result<(), FrameError> {
        info!("frame loop running at {:?} per frame", self.frame_delay);
        loop {
            let now_ms = self.origin.elapsed().as_millis() as u64;
            if self.step(now_ms)? == Flow::Quit {
                info!("quit requested");
                return Ok(());
            }
            std::thread::sleep(self.frame_delay);
        }
    }

    /// One frame at clock time `now_ms`.
    pub fn step(&mut self, now_ms: u64) -> Result<Flow, FrameError> {
        if self.game.is_running() {
            self.game.tick(now_ms, &mut self.rng)?;
        }
        self.game.move_objects();

        for event in self.backend.poll_events()? {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => return Ok(Flow::Quit),
                InputEvent::KeyDown(Key::Enter) => self.game.start(now_ms),
                InputEvent::KeyDown(_) => {}
            }
        }
        let backend = &self.backend;
        self.game.steer(&|key| backend.is_pressed(key), now_ms);

        for cue in self.game.drain_sounds() {
            self.sounds.play(&mut self.backend, cue);
        }

        self.render();
        self.backend.present()?;
        Ok(Flow::Continue)
    }

    fn render(&mut self) {
        let backend = &mut self.backend;
        let game = &mut self.game;
        let arena = game.arena;

        backend.clear(Rgb::BLACK);
        for object in game.world.objects_mut() {
            object.draw(&mut *backend);
        }

        if let GameStatus::Ended(message) = &game.status {
            hud::draw_overlay(&mut *backend, message, arena);
        }
        hud::draw_scoreboard(&mut *backend, game);

        for player in Player::ALL {
            if let Some(ship) = game.world.ships[player].as_mut() {
                ship.health.draw_bar(&mut *backend, hud::ship_bar_layout(player, arena));
            }
            game.attract_shards(player);
        }

        if game.status == GameStatus::NotStarted {
            hud::draw_overlay(&mut *backend, hud::TITLE, arena);
        }
    }
}
