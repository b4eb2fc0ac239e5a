/// Input commands and the clamped parameter updates they cause
use tracing::debug;

use crate::camera::CameraPreset;
use crate::state::{DrawMode, SceneState};
use crate::tuning::Tuning;

/// Slack kept between the hull origin and the grid edge, absorbs f32 drift
const EDGE_EPSILON: f32 = 1e-4;

/// Discrete input events, independent of any key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveForward,
    MoveBackward,
    HullLeft,
    HullRight,
    TurretLeft,
    TurretRight,
    CannonUp,
    CannonDown,
    SelectCamera(CameraPreset),
    ZoomIn,
    ZoomOut,
    Fire,
    Wireframe,
    Solid,
    ToggleAnimation,
}

/// Default key bindings, keyed by DOM-style key names (`"ArrowUp"`, `"w"`,
/// `" "`). Case matters: `w` raises the cannon, `W` switches to wireframe.
pub fn command_for_key(key: &str) -> Option<Command> {
    let command = match key {
        "ArrowUp" => Command::MoveForward,
        "ArrowDown" => Command::MoveBackward,
        "ArrowLeft" => Command::HullLeft,
        "ArrowRight" => Command::HullRight,
        "w" => Command::CannonUp,
        "s" => Command::CannonDown,
        "a" => Command::TurretLeft,
        "d" => Command::TurretRight,
        " " => Command::Fire,
        "1" => Command::SelectCamera(CameraPreset::Front),
        "2" => Command::SelectCamera(CameraPreset::Top),
        "3" => Command::SelectCamera(CameraPreset::Profile),
        "4" => Command::SelectCamera(CameraPreset::Iso),
        "+" => Command::ZoomIn,
        "-" => Command::ZoomOut,
        "W" => Command::Wireframe,
        "S" => Command::Solid,
        "p" => Command::ToggleAnimation,
        _ => return None,
    };
    Some(command)
}

impl SceneState {
    /// Apply one command. Returns false when it was rejected or changed
    /// nothing.
    pub fn apply(&mut self, command: Command, tuning: &Tuning) -> bool {
        let c = &tuning.controls;
        match command {
            Command::MoveForward => self.drive(c.move_step, tuning),
            Command::MoveBackward => self.drive(-c.move_step, tuning),
            Command::HullLeft => turn(&mut self.tank.hull_yaw, c.hull_yaw_step),
            Command::HullRight => turn(&mut self.tank.hull_yaw, -c.hull_yaw_step),
            Command::TurretLeft => turn(&mut self.tank.turret_yaw, c.turret_yaw_step),
            Command::TurretRight => turn(&mut self.tank.turret_yaw, -c.turret_yaw_step),
            Command::CannonUp => clamp_step(
                &mut self.tank.cannon_pitch,
                c.pitch_step,
                c.pitch_min,
                c.pitch_max,
            ),
            Command::CannonDown => clamp_step(
                &mut self.tank.cannon_pitch,
                -c.pitch_step,
                c.pitch_min,
                c.pitch_max,
            ),
            Command::SelectCamera(preset) => replace(&mut self.camera, preset),
            Command::ZoomIn => clamp_step(&mut self.zoom, -c.zoom_step, c.zoom_min, c.zoom_max),
            Command::ZoomOut => clamp_step(&mut self.zoom, c.zoom_step, c.zoom_min, c.zoom_max),
            Command::Fire => {
                self.pending_shots = self.pending_shots.saturating_add(1);
                true
            }
            Command::Wireframe => replace(&mut self.draw_mode, DrawMode::Wireframe),
            Command::Solid => replace(&mut self.draw_mode, DrawMode::Solid),
            Command::ToggleAnimation => {
                self.animation = !self.animation;
                true
            }
        }
    }

    /// Move along the hull's forward axis. A move that would put the hull
    /// on or past the grid edge is rejected and the pose is kept.
    fn drive(&mut self, distance: f32, tuning: &Tuning) -> bool {
        let yaw = self.tank.hull_yaw.to_radians();
        let x = self.tank.x + yaw.cos() * distance;
        let z = self.tank.z - yaw.sin() * distance;

        let limit = tuning.floor.half_width() - EDGE_EPSILON;
        if x.abs() >= limit || z.abs() >= limit {
            debug!(x, z, limit, "move rejected at grid edge");
            return false;
        }

        self.tank.x = x;
        self.tank.z = z;
        let roll = (distance / tuning.tank.wheel_radius).to_degrees();
        self.tank.wheel_spin = (self.tank.wheel_spin + roll) % 360.0;
        true
    }
}

fn turn(angle: &mut f32, step: f32) -> bool {
    *angle = (*angle + step) % 360.0;
    true
}

fn clamp_step(value: &mut f32, step: f32, min: f32, max: f32) -> bool {
    let next = (*value + step).clamp(min, max);
    let changed = next != *value;
    *value = next;
    changed
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    let changed = *slot != value;
    *slot = value;
    changed
}
