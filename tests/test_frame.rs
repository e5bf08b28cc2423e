mod common;

use std::path::Path;
use std::time::Duration;

use boom::compute::{GameStatus, LOSS_MESSAGE};
use boom::entities::Player;
use boom::frame::{Flow, FrameLoop};
use boom::hud::{self, START_PROMPT, TITLE};
use boom::score::MemoryScoreStore;
use boom::sound::{Sound, SoundBoard, SoundCategory};
use boom::surface::{Font, InputEvent, Key};

use common::{new_game, RecordingBackend};
use rand::rngs::StdRng;
use rand::SeedableRng;

type TestLoop = FrameLoop<RecordingBackend, MemoryScoreStore, StdRng>;

fn frame_loop() -> TestLoop {
    FrameLoop::new(
        RecordingBackend::default(),
        new_game(),
        SoundBoard::new(Path::new("Assets/Sounds")),
        StdRng::seed_from_u64(7),
        Duration::from_millis(30),
    )
}

fn press(frames: &mut TestLoop, key: Key) {
    frames.backend_mut().pending.push(InputEvent::KeyDown(key));
}

// ── Title screen & start ──────────────────────────────────────────────────────

#[test]
fn title_screen_shows_name_and_prompt() {
    let mut frames = frame_loop();
    assert_eq!(frames.step(0).unwrap(), Flow::Continue);

    let backend = frames.backend();
    assert!(backend.texts.contains(&(TITLE.to_string(), Font::Large)));
    assert!(backend.has_text(START_PROMPT));
    assert_eq!(backend.presented, 1);
    assert_eq!(frames.game().level, 0);
}

#[test]
fn enter_starts_and_next_frame_spawns_first_wave() {
    let mut frames = frame_loop();
    press(&mut frames, Key::Enter);
    frames.step(0).unwrap();
    assert_eq!(frames.game().status, GameStatus::Running);
    assert!(!frames.backend().has_text(TITLE));

    frames.step(30).unwrap();
    assert_eq!(frames.game().level, 1);
    assert!(frames.backend().has_text("Level : 1"));
    assert_eq!(frames.game().world.enemy_count(), 6);
}

#[test]
fn escape_and_window_close_quit() {
    let mut frames = frame_loop();
    press(&mut frames, Key::Escape);
    assert_eq!(frames.step(0).unwrap(), Flow::Quit);

    let mut frames = frame_loop();
    frames.backend_mut().pending.push(InputEvent::Quit);
    assert_eq!(frames.step(0).unwrap(), Flow::Quit);
}

#[test]
fn other_keys_do_not_start() {
    let mut frames = frame_loop();
    press(&mut frames, Key::W);
    frames.step(0).unwrap();
    assert_eq!(frames.game().status, GameStatus::NotStarted);
}

// ── Sounds & HUD ──────────────────────────────────────────────────────────────

#[test]
fn queued_sounds_reach_the_backend() {
    let mut frames = frame_loop();
    frames.backend_mut().held.insert(Key::Space);
    frames.step(1000).unwrap();

    assert_eq!(frames.backend().sounds, vec![(Sound::PlayerShoot, 1.0)]);
    assert!(frames.game().pending_sounds().is_empty());
    assert_eq!(frames.game().world.player_bullets[Player::One].len(), 1);
}

#[test]
fn scoreboard_lines_are_drawn_every_frame() {
    let mut frames = frame_loop();
    frames.game_mut().score = 12_500;
    frames.step(0).unwrap();

    let backend = frames.backend();
    for line in ["Level : 0", "Score : 12,500", "High Score : 0", "Highest Level : 0"] {
        assert!(backend.has_text(line), "missing {line:?}");
    }
    assert!(backend.has_text("Ship 1"));
    assert!(backend.has_text("Ship 2"));
}

#[test]
fn both_ship_health_panels_are_drawn() {
    let mut frames = frame_loop();
    frames.step(0).unwrap();
    // One outline per ship panel; no enemies yet.
    assert_eq!(frames.backend().strokes.len(), 2);
    assert_eq!(frames.backend().blits.len(), 2);
}

#[test]
fn ended_game_shows_loss_overlay_until_restart() {
    let mut frames = frame_loop();
    frames.game_mut().status = GameStatus::Ended(LOSS_MESSAGE.to_string());
    frames.step(0).unwrap();
    assert!(frames.backend().texts.contains(&(LOSS_MESSAGE.to_string(), Font::Large)));
    assert!(frames.backend().has_text(START_PROMPT));

    press(&mut frames, Key::Enter);
    frames.step(30).unwrap();
    assert_eq!(frames.game().status, GameStatus::Running);
    assert!(!frames.backend().has_text(LOSS_MESSAGE));
}

#[test]
fn every_frame_clears_then_presents() {
    let mut frames = frame_loop();
    for now in [0, 30, 60] {
        frames.step(now).unwrap();
    }
    assert_eq!(frames.backend().clears, 3);
    assert_eq!(frames.backend().presented, 3);
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[test]
fn thousands_are_comma_separated() {
    assert_eq!(hud::with_commas(0), "0");
    assert_eq!(hud::with_commas(999), "999");
    assert_eq!(hud::with_commas(1000), "1,000");
    assert_eq!(hud::with_commas(1_234_567), "1,234,567");
}

#[test]
fn sound_board_registers_every_clip() {
    let board = SoundBoard::new(Path::new("Assets/Sounds"));
    for sound in Sound::ALL {
        assert!(board.clip(sound).is_some(), "{sound:?} not registered");
    }
    let clip = board.clip(Sound::NewLevel).unwrap();
    assert_eq!(clip.path, Path::new("Assets/Sounds/NewLevel.wav"));
    assert_eq!(Sound::EnemyHurt.category(), SoundCategory::Enemy);
    assert_eq!(Sound::ItemPickup.category(), SoundCategory::Misc);
}
