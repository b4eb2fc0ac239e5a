use std::{env, path::PathBuf, str::FromStr, time::Duration};

use tk3d_core::{ProjectionMode, Tuning};

// Runtime settings for the terminal frontend, read from the environment
// (a `.env` file is loaded first by `main`).

pub fn target_fps() -> u32 {
    parse_or(env::var("TK3D_FPS").ok().as_deref(), 30).clamp(1, 240)
}

pub fn frame_interval() -> Duration {
    Duration::from_millis(1000 / u64::from(target_fps()))
}

pub fn log_file() -> PathBuf {
    env::var("TK3D_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("tk3d.log"))
}

pub fn projection_mode() -> ProjectionMode {
    projection_mode_from(env::var("TK3D_PERSPECTIVE").ok().as_deref())
}

/// Default tuning with the scene-size overrides applied
pub fn tuning() -> Tuning {
    tuning_from(
        env::var("TK3D_WHEELS").ok().as_deref(),
        env::var("TK3D_TILES").ok().as_deref(),
    )
}

fn tuning_from(wheels: Option<&str>, tiles: Option<&str>) -> Tuning {
    let mut tuning = Tuning::default();
    tuning.tank.wheels_per_side = parse_or(wheels, tuning.tank.wheels_per_side).clamp(2, 8);
    tuning.floor.tiles_per_side = parse_or(tiles, tuning.floor.tiles_per_side).clamp(2, 200);
    tuning
}

fn projection_mode_from(raw: Option<&str>) -> ProjectionMode {
    match raw {
        Some("1" | "true" | "yes" | "on") => ProjectionMode::Perspective,
        _ => ProjectionMode::Orthographic,
    }
}

fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("45"), 30u32), 45);
        assert_eq!(parse_or(Some(" 12 "), 30u32), 12);
        assert_eq!(parse_or(Some("fast"), 30u32), 30);
        assert_eq!(parse_or::<u32>(None, 30), 30);
    }

    #[test]
    fn test_tuning_overrides_are_clamped() {
        let tuning = tuning_from(Some("6"), Some("1000"));
        assert_eq!(tuning.tank.wheels_per_side, 6);
        assert_eq!(tuning.floor.tiles_per_side, 200);

        let tuning = tuning_from(None, None);
        assert_eq!(tuning.tank.wheels_per_side, Tuning::default().tank.wheels_per_side);
    }

    #[test]
    fn test_projection_flag() {
        assert_eq!(projection_mode_from(Some("true")), ProjectionMode::Perspective);
        assert_eq!(projection_mode_from(Some("0")), ProjectionMode::Orthographic);
        assert_eq!(projection_mode_from(None), ProjectionMode::Orthographic);
    }
}
