/// Example: run the tank scene without a terminal session
///
/// Fires a few shells, ticks the scene and prints the last frame as text.
///
/// Usage: cargo run --example headless -- [ticks]
use std::env;

use anyhow::Result;
use tk3d_core::{CameraPreset, Command, DrawMode, FrameDriver, Tuning};
use tk3d_terminal::AsciiRenderer;

fn main() -> Result<()> {
    let ticks: usize = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(90);

    let mut driver = FrameDriver::new(Tuning::default());
    for command in [
        Command::SelectCamera(CameraPreset::Iso),
        Command::Solid,
        Command::TurretLeft,
        Command::CannonUp,
        Command::CannonUp,
        Command::Fire,
    ] {
        driver.apply(command);
    }

    let mut renderer = AsciiRenderer::new(100, 40);
    renderer.mode = DrawMode::Solid;
    renderer.projection.extent = driver.state().zoom;

    let mut last = None;
    for tick in 0..ticks {
        if tick % 30 == 0 {
            driver.apply(Command::Fire);
        }
        renderer.clear();
        last = Some(driver.tick(&mut renderer)?);
    }

    for y in 0..renderer.height() {
        let row: String = (0..renderer.width())
            .filter_map(|x| renderer.char_at(x, y))
            .collect();
        println!("{}", row.trim_end());
    }
    if let Some(stats) = last {
        println!("{stats:?}");
    }
    Ok(())
}
