//! Optional `boom.toml` configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec2;
use serde::Deserialize;

use crate::compute::SPAWN_KEEP_OUT;

/// Smallest arena side that always leaves a corner farther than
/// [`SPAWN_KEEP_OUT`] from both ships, wherever they sit.
pub const MIN_ARENA_SIDE: f32 = 2.0 * SPAWN_KEEP_OUT + 2.0;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Sleep between frames.  Processing time is not subtracted.
    pub frame_delay_ms: u64,
    pub score_file: PathBuf,
    pub sound_dir: PathBuf,
    pub log_file: PathBuf,
    /// Ring the terminal bell for explosions and level-ups.
    pub bell: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            frame_delay_ms: 30,
            score_file: PathBuf::from("high score.txt"),
            sound_dir: PathBuf::from("Assets/Sounds"),
            log_file: PathBuf::from("boom.log"),
            bell: true,
        }
    }
}

impl GameConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject arenas the game cannot run in: non-finite or too small for
    /// enemies to spawn clear of two ships.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, side) in [("arena_width", self.arena_width), ("arena_height", self.arena_height)] {
            if !side.is_finite() || side < MIN_ARENA_SIDE {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite number of at least {MIN_ARENA_SIDE}, got {side}"
                )));
            }
        }
        Ok(())
    }

    /// Read `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
