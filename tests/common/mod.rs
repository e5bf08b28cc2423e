#![allow(dead_code)]

use std::collections::HashSet;

use glam::Vec2;

use boom::compute::Game;
use boom::geometry::Rect;
use boom::score::MemoryScoreStore;
use boom::sound::{Sound, SoundClip};
use boom::sprites::Sprite;
use boom::surface::{Backend, Font, InputEvent, Key, Rgb, Surface, TextAnchor};

pub const ARENA: Vec2 = Vec2::new(800.0, 600.0);

pub fn new_game() -> Game<MemoryScoreStore> {
    Game::new(ARENA, MemoryScoreStore::default(), 0)
}

/// Backend that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub held: HashSet<Key>,
    /// Events handed out by the next `poll_events`.
    pub pending: Vec<InputEvent>,
    pub blits: Vec<(Sprite, Vec2, f32)>,
    pub fills: Vec<(Rect, Rgb)>,
    pub strokes: Vec<(Rect, Rgb)>,
    pub glows: Vec<(Rect, Rgb)>,
    pub texts: Vec<(String, Font)>,
    pub sounds: Vec<(Sound, f32)>,
    pub clears: usize,
    pub presented: usize,
}

impl RecordingBackend {
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|(text, _)| text == needle)
    }
}

impl Surface for RecordingBackend {
    fn clear(&mut self, _color: Rgb) {
        self.clears += 1;
        self.blits.clear();
        self.fills.clear();
        self.strokes.clear();
        self.glows.clear();
        self.texts.clear();
    }

    fn blit(&mut self, sprite: Sprite, center: Vec2, rotation: f32) {
        self.blits.push((sprite, center, rotation));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.fills.push((rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, _width: f32) {
        self.strokes.push((rect, color));
    }

    fn glow(&mut self, bounds: Rect, color: Rgb) {
        self.glows.push((bounds, color));
    }

    fn text(&mut self, text: &str, _anchor: TextAnchor, font: Font, _color: Rgb) {
        self.texts.push((text.to_string(), font));
    }
}

impl Backend for RecordingBackend {
    fn poll_events(&mut self) -> std::io::Result<Vec<InputEvent>> {
        Ok(std::mem::take(&mut self.pending))
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn play_sound(&mut self, clip: &SoundClip, volume: f32) {
        self.sounds.push((clip.sound, volume));
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}
