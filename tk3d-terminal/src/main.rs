/// TK3D Terminal - Articulated tank on a checkerboard
///
/// Controls:
///   - Arrow keys: drive and turn the hull
///   - A/D: turn the turret, W/S (lowercase): raise/lower the cannon
///   - Space: fire
///   - 1-4: front/top/profile/iso camera, +/-: zoom
///   - Shift+W / Shift+S: wireframe / solid, P: pause
///   - Q/ESC: quit
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tk3d_terminal::{config, restore_terminal, TerminalApp};

/// Log to a file; the terminal itself is the render target.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;

    let filter = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| tracing_subscriber::EnvFilter::try_new(level).ok())
        .or_else(|| tracing_subscriber::EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();

    std::panic::set_hook(Box::new(|info| {
        restore_terminal();
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        eprintln!("{info}");
    }));
    Ok(())
}

fn main() -> Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    let log_file = config::log_file();
    init_tracing(&log_file)?;

    let tuning = config::tuning();
    tracing::info!(
        fps = config::target_fps(),
        wheels = tuning.tank.wheels_per_side,
        tiles = tuning.floor.tiles_per_side,
        log = %log_file.display(),
        "starting"
    );

    let mut app = TerminalApp::new(tuning, config::projection_mode(), config::frame_interval())?;
    let result = app.run();
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "terminal app failed");
    }
    result
}
