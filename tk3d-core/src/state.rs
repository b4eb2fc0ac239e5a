/// Mutable simulation state owned by the frame driver
use crate::camera::CameraPreset;
use crate::projectile::ProjectileSimulator;
use crate::tuning::Tuning;

/// Numeric pose of the tank; every angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TankPose {
    pub x: f32,
    pub z: f32,
    pub hull_yaw: f32,
    pub turret_yaw: f32,
    pub cannon_pitch: f32,
    /// Accumulated roll of every wheel, from distance driven
    pub wheel_spin: f32,
}

/// How drawers should rasterize meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Wireframe,
    Solid,
}

#[derive(Debug, Clone)]
pub struct SceneState {
    /// Simulated seconds since start
    pub time: f32,
    pub animation: bool,
    pub tank: TankPose,
    pub projectiles: ProjectileSimulator,
    pub camera: CameraPreset,
    /// Eye distance from the camera target
    pub zoom: f32,
    pub draw_mode: DrawMode,
    /// Shots requested since the last tick
    pub pending_shots: u32,
}

impl SceneState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            time: 0.0,
            animation: true,
            tank: TankPose::default(),
            projectiles: ProjectileSimulator::new(
                tuning.sim.gravity,
                tuning.sim.max_live_projectiles,
            ),
            camera: CameraPreset::default(),
            zoom: tuning.sim.initial_zoom,
            draw_mode: DrawMode::default(),
            pending_shots: 0,
        }
    }
}
