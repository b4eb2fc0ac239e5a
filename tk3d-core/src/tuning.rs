/// Hand-tuned scene constants.
///
/// Lengths are in world units (one floor tile is one unit by default),
/// angles in degrees, time in simulated seconds.
use crate::draw::Color;

#[derive(Debug, Clone, Copy)]
pub struct TankTuning {
    /// Wheels on each side of the hull
    pub wheels_per_side: usize,
    /// Distance between neighbouring axles
    pub axle_spacing: f32,
    pub wheel_radius: f32,
    pub wheel_width: f32,
    /// Distance between left and right wheel centers
    pub track_width: f32,
    pub axle_diameter: f32,

    pub base_height: f32,
    pub shell_height: f32,
    pub turret_diameter: f32,
    pub breech_length: f32,
    pub breech_diameter: f32,
    pub barrel_length: f32,
    pub barrel_diameter: f32,

    /// Muzzle speed in units per second
    pub muzzle_speed: f32,
    pub projectile_diameter: f32,

    pub tire_color: Color,
    pub rim_color: Color,
    pub axle_color: Color,
    pub base_color: Color,
    pub shell_color: Color,
    pub turret_color: Color,
    pub cannon_color: Color,
    pub projectile_color: Color,
}

impl TankTuning {
    /// Hull length needed to cover every wheel
    pub fn hull_length(&self) -> f32 {
        self.wheels_per_side.saturating_sub(1) as f32 * self.axle_spacing
            + 2.0 * self.wheel_radius
    }

    /// X offset of wheel `i`, wheels centered on the hull origin
    pub fn axle_x(&self, i: usize) -> f32 {
        let span = self.wheels_per_side.saturating_sub(1) as f32 * self.axle_spacing;
        i as f32 * self.axle_spacing - span / 2.0
    }
}

impl Default for TankTuning {
    fn default() -> Self {
        Self {
            wheels_per_side: 4,
            axle_spacing: 1.1,
            wheel_radius: 0.5,
            wheel_width: 0.35,
            track_width: 2.4,
            axle_diameter: 0.12,

            base_height: 0.6,
            shell_height: 0.5,
            turret_diameter: 1.4,
            breech_length: 0.5,
            breech_diameter: 0.35,
            barrel_length: 2.2,
            barrel_diameter: 0.18,

            muzzle_speed: 12.0,
            projectile_diameter: 0.25,

            tire_color: Color::rgb8(30, 30, 30),
            rim_color: Color::rgb8(180, 180, 190),
            axle_color: Color::rgb8(90, 90, 90),
            base_color: Color::rgb8(70, 90, 50),
            shell_color: Color::rgb8(95, 120, 65),
            turret_color: Color::rgb8(110, 135, 75),
            cannon_color: Color::rgb8(60, 70, 45),
            projectile_color: Color::rgb8(230, 120, 30),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FloorTuning {
    pub tiles_per_side: usize,
    pub tile_size: f32,
    pub tile_thickness: f32,
    pub light_color: Color,
    pub dark_color: Color,
}

impl FloorTuning {
    /// Distance from the grid center to its edge
    pub fn half_width(&self) -> f32 {
        self.tiles_per_side as f32 * self.tile_size / 2.0
    }
}

impl Default for FloorTuning {
    fn default() -> Self {
        Self {
            tiles_per_side: 25,
            tile_size: 1.0,
            tile_thickness: 0.1,
            light_color: Color::rgb8(170, 160, 130),
            dark_color: Color::rgb8(120, 110, 85),
        }
    }
}

/// Step sizes and limits for keyboard-driven parameters
#[derive(Debug, Clone, Copy)]
pub struct ControlTuning {
    pub move_step: f32,
    pub hull_yaw_step: f32,
    pub turret_yaw_step: f32,
    pub pitch_step: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub zoom_step: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            move_step: 0.1,
            hull_yaw_step: 5.0,
            turret_yaw_step: 5.0,
            pitch_step: 5.0,
            pitch_min: 0.0,
            pitch_max: 90.0,
            zoom_step: 1.0,
            zoom_min: 3.0,
            zoom_max: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimTuning {
    /// Fixed simulated time per tick
    pub dt: f32,
    /// Downward acceleration magnitude
    pub gravity: f32,
    /// Oldest projectiles are dropped past this count
    pub max_live_projectiles: usize,
    pub initial_zoom: f32,
}

impl Default for SimTuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            gravity: 9.8,
            max_live_projectiles: 64,
            initial_zoom: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tuning {
    pub tank: TankTuning,
    pub floor: FloorTuning,
    pub controls: ControlTuning,
    pub sim: SimTuning,
}
