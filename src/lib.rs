//! Winds of Change - a paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, balls, blocks, abilities, levels)
//! - `session`: Menu page transitions around a running game
//! - `settings`: User preferences
//! - `audio`: Sound cue policy for simulation and UI events

pub mod audio;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{LevelOverlay, MenuPage, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// These are the defaults behind [`sim::SimConfig`]; the simulation only ever
/// reads the config it is handed.
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World rectangle (y grows downward, the paddle sits near WORLD_MAX.y)
    pub const WORLD_MIN: Vec2 = Vec2::new(-700.0, -500.0);
    pub const WORLD_MAX: Vec2 = Vec2::new(700.0, 500.0);

    /// Paddle
    pub const PLAYER_WORLD_Y: f32 = 400.0;
    pub const PLAYER_DEFAULT_WIDTH: f32 = 100.0;
    pub const PLAYER_DEFAULT_HEIGHT: f32 = 25.0;
    pub const PLAYER_MIN_VEL: f32 = -750.0;
    pub const PLAYER_MAX_VEL: f32 = 750.0;
    pub const PLAYER_ACCELERATION: f32 = 1500.0;
    pub const GROUND_FRICTION: f32 = 750.0;

    /// Ball
    pub const BALL_DEFAULT_VELOCITY: f32 = 200.0;
    pub const BALL_DEFAULT_RADIUS: f32 = 10.0;
    /// Launch point distance above the paddle center
    pub const BALL_DEFAULT_Y_OFFSET: f32 = 25.0;
    pub const BALL_DAMAGE: i32 = 1;
    /// Seconds after a bounce during which a ball ignores further contacts
    pub const COLLISION_COOLDOWN: f32 = 0.05;

    /// Wind ability
    pub const WIND_DURATION: f32 = 0.75;
    pub const WIND_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    pub const WIND_BOOST: f32 = 1.5;
    pub const WIND_REVERSE: f32 = -1.0;

    /// Ricochet ability
    pub const RICOCHET_CHANNEL_DURATION: f32 = 1.0;
    pub const RICOCHET_MIN_RADIUS: f32 = 40.0;
    pub const RICOCHET_MAX_RADIUS: f32 = 220.0;
    pub const RICOCHET_TIME_SCALE: f32 = 0.5;

    /// Shooting blocks
    pub const ENEMY_PROJECTILE_SPEED: f32 = 250.0;

    /// Dead effect lifetimes (seconds)
    pub const DEAD_BALL_DURATION: f32 = 0.6;
    pub const DEAD_ENEMY_DURATION: f32 = 0.4;

    /// First level a new game starts on (level 0 is the sandbox)
    pub const START_LEVEL: u32 = 1;
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Reflect a direction about a unit normal: d' = d - 2(d·n)n
#[inline]
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    dir - 2.0 * dir.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vec2::X, FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_off_floor() {
        let d = Vec2::new(1.0, -1.0).normalize();
        let r = reflect(d, Vec2::Y);
        assert!((r.x - d.x).abs() < 1e-6);
        assert!((r.y + d.y).abs() < 1e-6);
    }
}
