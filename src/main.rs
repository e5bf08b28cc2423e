mod display;
mod keyboard;

use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::Path;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::thread_rng;

use boom::compute::Game;
use boom::config::GameConfig;
use boom::frame::FrameLoop;
use boom::score::FileScoreStore;
use boom::sound::SoundBoard;

use display::TerminalBackend;

const CONFIG_PATH: &str = "boom.toml";

/// The terminal is in raw mode while playing, so log lines go to a file.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config_path = Path::new(CONFIG_PATH);
    let config = GameConfig::load_or_default(config_path)
        .with_context(|| format!("cannot load {}", CONFIG_PATH))?;
    init_logging(&config.log_file)?;
    if !config_path.exists() {
        warn!("no {} found, using defaults", CONFIG_PATH);
    }
    info!("starting Boom with {:?}", config);

    // The record must already exist; a missing or malformed file is fatal.
    let store = FileScoreStore::open(&config.score_file)
        .context("the score file must exist and hold two numeric lines")?;
    info!("score record at {}", store.path().display());
    let sounds = SoundBoard::new(&config.sound_dir);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    let (cols, rows) = terminal::size()?;
    let backend = TerminalBackend::new(out, cols, rows, config.arena(), config.bell);
    let game = Game::new(config.arena(), store, 0);
    let mut frame_loop =
        FrameLoop::new(backend, game, sounds, thread_rng(), config.frame_delay());

    let result = frame_loop.run();

    // Always restore the terminal
    let mut out = frame_loop.into_backend().into_writer();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("game stopped: {e}");
    }
    result.context("game loop failed")
}
