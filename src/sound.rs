//! Named sounds and the registry that maps them to clips.
//!
//! Game logic never plays audio directly.  It queues [`SoundCue`]s, and the
//! frame loop hands them to a [`SoundBoard`], which resolves the clip and
//! forwards it to the backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::surface::Backend;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCategory {
    Player,
    Enemy,
    Misc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    PlayerShoot,
    PlayerExplosion,
    EnemyShoot,
    EnemyHurt,
    EnemyExplosion,
    NewLevel,
    ItemPickup,
}

impl Sound {
    pub const ALL: [Sound; 7] = [
        Sound::PlayerShoot,
        Sound::PlayerExplosion,
        Sound::EnemyShoot,
        Sound::EnemyHurt,
        Sound::EnemyExplosion,
        Sound::NewLevel,
        Sound::ItemPickup,
    ];

    pub fn category(self) -> SoundCategory {
        match self {
            Sound::PlayerShoot | Sound::PlayerExplosion => SoundCategory::Player,
            Sound::EnemyShoot | Sound::EnemyHurt | Sound::EnemyExplosion => SoundCategory::Enemy,
            Sound::NewLevel | Sound::ItemPickup => SoundCategory::Misc,
        }
    }

    /// Short name within its category.
    pub fn name(self) -> &'static str {
        match self {
            Sound::PlayerShoot | Sound::EnemyShoot => "shoot",
            Sound::PlayerExplosion | Sound::EnemyExplosion => "explosion",
            Sound::EnemyHurt => "hurt",
            Sound::NewLevel => "new_level",
            Sound::ItemPickup => "item_pickup",
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            Sound::PlayerShoot => "PlayerShoot",
            Sound::PlayerExplosion => "PlayerExplosion",
            Sound::EnemyShoot => "EnemyShoot",
            Sound::EnemyHurt => "EnemyHurt",
            Sound::EnemyExplosion => "EnemyExplosion",
            Sound::NewLevel => "NewLevel",
            Sound::ItemPickup => "ItemPickup",
        }
    }
}

/// A request to play `sound` at `volume` (0.0 – 1.0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundCue {
    pub sound: Sound,
    pub volume: f32,
}

impl SoundCue {
    pub fn new(sound: Sound) -> Self {
        Self { sound, volume: 1.0 }
    }

    pub fn with_volume(sound: Sound, volume: f32) -> Self {
        Self { sound, volume }
    }
}

/// A registered clip, handed to the backend for playback.
#[derive(Clone, Debug, PartialEq)]
pub struct SoundClip {
    pub sound: Sound,
    pub path: PathBuf,
}

/// Registry of every clip the game can play.  Built once at startup.
#[derive(Clone, Debug)]
pub struct SoundBoard {
    clips: HashMap<Sound, SoundClip>,
}

impl SoundBoard {
    pub fn new(sound_dir: &Path) -> Self {
        let clips = Sound::ALL
            .iter()
            .map(|&sound| {
                let path = sound_dir.join(format!("{}.wav", sound.file_stem()));
                (sound, SoundClip { sound, path })
            })
            .collect();
        Self { clips }
    }

    pub fn clip(&self, sound: Sound) -> Option<&SoundClip> {
        self.clips.get(&sound)
    }

    pub fn play<B: Backend + ?Sized>(&self, backend: &mut B, cue: SoundCue) {
        if let Some(clip) = self.clips.get(&cue.sound) {
            debug!(
                "sound {:?}/{} at volume {:.2}",
                cue.sound.category(),
                cue.sound.name(),
                cue.volume
            );
            backend.play_sound(clip, cue.volume);
        }
    }
}
