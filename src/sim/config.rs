//! Simulation tunables
//!
//! Every physics constant the step reads comes from a [`SimConfig`] passed in
//! by the caller, so scenarios and tests can vary them independently.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which special ability the player's ability slot runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityMode {
    /// Directional gusts that bend and re-speed the player's balls
    #[default]
    Wind,
    /// Channelled field that turns incoming enemy shots around
    Ricochet,
}

/// Failure to read a config or settings file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Immutable simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    pub world_min: Vec2,
    pub world_max: Vec2,

    // === Paddle ===
    pub player_y: f32,
    /// Full paddle width and height
    pub paddle_size: Vec2,
    pub player_min_vel: f32,
    pub player_max_vel: f32,
    pub player_acceleration: f32,
    pub ground_friction: f32,

    // === Balls ===
    pub ball_velocity: f32,
    pub ball_radius: f32,
    pub ball_y_offset: f32,
    pub ball_damage: i32,
    pub collision_cooldown: f32,

    // === Abilities ===
    pub ability_mode: AbilityMode,
    pub wind_duration: f32,
    /// Deflection for a full horizontal gust (radians)
    pub wind_angle: f32,
    pub wind_boost: f32,
    pub wind_reverse: f32,
    pub ricochet_channel_duration: f32,
    pub ricochet_min_radius: f32,
    pub ricochet_max_radius: f32,
    pub ricochet_time_scale: f32,

    // === Shooting blocks ===
    pub enemy_projectile_speed: f32,

    // === Effects ===
    pub dead_ball_duration: f32,
    pub dead_enemy_duration: f32,

    // === Levels ===
    pub start_level: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_min: WORLD_MIN,
            world_max: WORLD_MAX,

            player_y: PLAYER_WORLD_Y,
            paddle_size: Vec2::new(PLAYER_DEFAULT_WIDTH, PLAYER_DEFAULT_HEIGHT),
            player_min_vel: PLAYER_MIN_VEL,
            player_max_vel: PLAYER_MAX_VEL,
            player_acceleration: PLAYER_ACCELERATION,
            ground_friction: GROUND_FRICTION,

            ball_velocity: BALL_DEFAULT_VELOCITY,
            ball_radius: BALL_DEFAULT_RADIUS,
            ball_y_offset: BALL_DEFAULT_Y_OFFSET,
            ball_damage: BALL_DAMAGE,
            collision_cooldown: COLLISION_COOLDOWN,

            ability_mode: AbilityMode::Wind,
            wind_duration: WIND_DURATION,
            wind_angle: WIND_ANGLE,
            wind_boost: WIND_BOOST,
            wind_reverse: WIND_REVERSE,
            ricochet_channel_duration: RICOCHET_CHANNEL_DURATION,
            ricochet_min_radius: RICOCHET_MIN_RADIUS,
            ricochet_max_radius: RICOCHET_MAX_RADIUS,
            ricochet_time_scale: RICOCHET_TIME_SCALE,

            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,

            dead_ball_duration: DEAD_BALL_DURATION,
            dead_enemy_duration: DEAD_ENEMY_DURATION,

            start_level: START_LEVEL,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Half of the paddle extents
    #[inline]
    pub fn paddle_half_size(&self) -> Vec2 {
        self.paddle_size * 0.5
    }

    /// Allowed range for the paddle center on the x axis
    #[inline]
    pub fn paddle_x_range(&self) -> (f32, f32) {
        let half_width = self.paddle_half_size().x;
        (self.world_min.x + half_width, self.world_max.x - half_width)
    }

    /// Whether a point lies inside the world rectangle (edges included)
    #[inline]
    pub fn in_world(&self, p: Vec2) -> bool {
        p.x >= self.world_min.x
            && p.x <= self.world_max.x
            && p.y >= self.world_min.y
            && p.y <= self.world_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SimConfig::from_json(r#"{ "ball_velocity": 300.0, "ability_mode": "ricochet" }"#)
                .expect("valid json");
        assert_eq!(config.ball_velocity, 300.0);
        assert_eq!(config.ability_mode, AbilityMode::Ricochet);
        assert_eq!(config.wind_duration, WIND_DURATION);
        assert_eq!(config.world_min, WORLD_MIN);
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        let err = SimConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config json"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_paddle_range() {
        let config = SimConfig::default();
        assert_eq!(config.paddle_x_range(), (-650.0, 650.0));
        assert!(config.in_world(Vec2::new(700.0, -500.0)));
        assert!(!config.in_world(Vec2::new(700.1, 0.0)));
    }
}
