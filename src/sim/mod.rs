//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One fixed-order step per call, driven by a caller-supplied delta
//! - No randomness inside the step
//! - Stable iteration order (entity lists are never re-sorted)
//! - No rendering, audio or platform dependencies

pub mod ability;
pub mod autopilot;
pub mod collision;
pub mod config;
pub mod ease;
pub mod events;
pub mod level;
pub mod state;
pub mod tick;

pub use ability::{AbilityStep, AbilityTargets, ActiveAbility, RicochetAbility, WindAbility};
pub use autopilot::Autopilot;
pub use collision::{CollisionResult, sphere_collides_rectangle, sphere_collides_sphere};
pub use config::{AbilityMode, ConfigError, SimConfig};
pub use events::GameEvent;
pub use level::{LEVELS, LevelDef, LevelError, game_init, level_count, load_level};
pub use state::{
    DeadBall, DeadEnemy, Enemy, EnemyKind, GameState, LevelStatus, PlayerState, Projectile,
};
pub use tick::{TickInput, tick};
