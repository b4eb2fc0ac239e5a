/// Terminal frontend for the tank scene
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use tk3d_core::{DrawMode, FrameDriver, FrameStats, ProjectionMode, Tuning};
use tracing::{debug, info};

pub mod config;
pub mod keymap;
pub mod renderer;

pub use keymap::{action_for, Action};
pub use renderer::AsciiRenderer;

/// Rows reserved at the bottom for the status line
const HUD_ROWS: u16 = 1;

/// Main application struct for the terminal tank scene
pub struct TerminalApp {
    driver: FrameDriver,
    renderer: AsciiRenderer,
    frame_interval: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    last_stats: FrameStats,
}

impl TerminalApp {
    pub fn new(tuning: Tuning, projection: ProjectionMode, frame_interval: Duration) -> Result<Self> {
        let (width, height) = terminal::size().context("querying terminal size")?;
        let mut renderer = AsciiRenderer::new(
            width as usize,
            height.saturating_sub(HUD_ROWS).max(1) as usize,
        );
        renderer.projection.mode = projection;

        Ok(Self {
            driver: FrameDriver::new(tuning),
            renderer,
            frame_interval,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            last_stats: FrameStats::default(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        info!(
            width = self.renderer.width(),
            height = self.renderer.height(),
            "terminal session started"
        );

        let result = self.main_loop();

        // Cleanup
        restore_terminal();
        info!(sim_time = self.last_stats.time, "terminal session ended");

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            self.handle_input()?;
            if !self.running {
                break;
            }

            self.update()?;
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_interval {
                std::thread::sleep(self.frame_interval - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Drain every pending event so held keys don't queue up behind frames
    fn handle_input(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match action_for(&key) {
                    Some(Action::Quit) => {
                        self.running = false;
                        return Ok(());
                    }
                    Some(Action::Scene(command)) => {
                        let changed = self.driver.apply(command);
                        debug!(?command, changed, "command");
                    }
                    None => {}
                },
                Event::Resize(width, height) => {
                    self.renderer.resize(
                        width as usize,
                        height.saturating_sub(HUD_ROWS).max(1) as usize,
                    );
                    debug!(width, height, "resized");
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let state = self.driver.state();
        self.renderer.mode = state.draw_mode;
        self.renderer.projection.extent = state.zoom;
        self.renderer.clear();

        self.last_stats = self
            .driver
            .tick(&mut self.renderer)
            .context("drawing scene")?;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let mut stdout = stdout();
        self.renderer.present(&mut stdout)?;

        let state = self.driver.state();
        let mode = match state.draw_mode {
            DrawMode::Wireframe => "wire",
            DrawMode::Solid => "solid",
        };
        let hud = format!(
            "FPS {:.1} | cam {} | zoom {:.0} | {} | shells {} | {} | arrows=drive a/d=turret w/s=cannon space=fire 1-4=camera +/-=zoom W/S=mode p=pause q=quit",
            self.fps,
            state.camera.name(),
            state.zoom,
            mode,
            self.last_stats.live_projectiles,
            if state.animation { "running" } else { "paused" },
        );
        let hud: String = hud.chars().take(self.renderer.width()).collect();

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, self.renderer.height() as u16),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(hud),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Leave raw mode and the alternate screen. Safe to call more than once,
/// including from a panic hook.
pub fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
}
