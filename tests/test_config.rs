use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use boom::compute::{spawn_position, SPAWN_KEEP_OUT};
use boom::config::{ConfigError, GameConfig, MIN_ARENA_SIDE};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn defaults_match_the_classic_window() {
    let config = GameConfig::default();
    assert_eq!(config.arena(), Vec2::new(800.0, 600.0));
    assert_eq!(config.frame_delay(), Duration::from_millis(30));
    assert_eq!(config.score_file, PathBuf::from("high score.txt"));
    assert!(config.bell);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = GameConfig::from_toml("frame_delay_ms = 16\nbell = false\n").expect("parse");
    assert_eq!(config.frame_delay_ms, 16);
    assert!(!config.bell);
    assert_eq!(config.arena_width, 800.0);
    assert_eq!(config.sound_dir, PathBuf::from("Assets/Sounds"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = GameConfig::load_or_default(&dir.path().join("boom.toml")).expect("defaults");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn file_values_are_loaded() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("boom.toml");
    fs::write(&path, "arena_width = 1024.0\nscore_file = \"scores.txt\"\n").expect("write");

    let config = GameConfig::load_or_default(&path).expect("load");
    assert_eq!(config.arena(), Vec2::new(1024.0, 600.0));
    assert_eq!(config.score_file, PathBuf::from("scores.txt"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let err = GameConfig::from_toml("frame_delay_ms = \"soon\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// ── Arena validation ──────────────────────────────────────────────────────────

#[test]
fn zero_sized_arena_is_rejected() {
    let err = GameConfig::from_toml("arena_width = 0.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = GameConfig::from_toml("arena_height = -600.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn non_finite_arena_is_rejected() {
    let err = GameConfig::from_toml("arena_width = nan\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = GameConfig::from_toml("arena_height = inf\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn arena_too_small_to_spawn_clear_of_ships_is_rejected() {
    let err = GameConfig::from_toml("arena_width = 60.0\narena_height = 60.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("boom.toml");
    fs::write(&path, "arena_height = 150.0\n").expect("write");
    let err = GameConfig::load_or_default(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn smallest_accepted_arena_still_spawns_clear_of_cornered_ships() {
    let text = format!("arena_width = {MIN_ARENA_SIDE:?}\narena_height = {MIN_ARENA_SIDE:?}\n");
    let config = GameConfig::from_toml(&text).expect("minimum arena accepted");
    let arena = config.arena();

    // Ships parked on two corners of the sampling grid.
    let far = arena.x - 1.0;
    let ships = [Vec2::new(0.0, 0.0), Vec2::new(far, 0.0)];
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let p = spawn_position(arena, &ships, &mut rng);
        assert!(ships.iter().all(|ship| p.distance(*ship) > SPAWN_KEEP_OUT));
    }
}
