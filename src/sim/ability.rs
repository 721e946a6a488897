//! Player special abilities
//!
//! The player has a single ability slot. Each variant is a timed effect with
//! the same shape: it is advanced once per step by [`ActiveAbility::apply`]
//! and, when that reports [`AbilityStep::Expired`], gets one final
//! [`ActiveAbility::on_expire`] call before the slot is cleared.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::sphere_collides_sphere;
use super::config::SimConfig;
use super::ease::lerp;
use super::events::{GameEvent, push_event};
use super::state::Projectile;
use crate::rotate;

/// A gust that bends the flight of every player ball and rescales ball speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindAbility {
    /// Seconds remaining
    pub timer: f32,
    pub duration: f32,
    /// Total deflection applied over the whole gust (radians)
    pub angle: f32,
    /// Ball speed when the gust started
    pub ball_current_velocity: f32,
    /// Ball speed when the gust ends
    pub ball_target_velocity: f32,
}

impl WindAbility {
    /// Build a gust from the directional wind input.
    ///
    /// Only one direction is honored, checked horizontal first, then up,
    /// then down. Returns None when no direction is held.
    pub fn from_input(dir_x: i32, dir_y: i32, ball_velocity: f32, config: &SimConfig) -> Option<Self> {
        let (angle, target) = if dir_x != 0 {
            (dir_x.signum() as f32 * config.wind_angle, ball_velocity)
        } else if dir_y > 0 {
            (0.0, ball_velocity * config.wind_boost)
        } else if dir_y < 0 {
            (0.0, ball_velocity * config.wind_reverse)
        } else {
            return None;
        };

        Some(Self {
            timer: config.wind_duration,
            duration: config.wind_duration,
            angle,
            ball_current_velocity: ball_velocity,
            ball_target_velocity: target,
        })
    }

    fn apply(&mut self, targets: &mut AbilityTargets<'_>, dt: f32) -> AbilityStep {
        let wind_delta = dt.min(self.timer).max(0.0);
        let fraction = if self.duration > 0.0 {
            (wind_delta / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let total_delta_velocity = self.ball_target_velocity - self.ball_current_velocity;
        *targets.ball_velocity += total_delta_velocity * fraction;

        let turn = fraction * self.angle;
        for p in targets.player_projectiles.iter_mut() {
            p.dir = rotate(p.dir, turn);
        }

        self.timer -= wind_delta;
        if self.timer <= 0.0 || self.duration <= 0.0 {
            AbilityStep::Expired
        } else {
            AbilityStep::Running
        }
    }
}

/// A channelled field around the paddle that turns enemy shots around
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RicochetAbility {
    /// Seconds spent channelling
    pub timer: f32,
    pub duration: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl RicochetAbility {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            timer: 0.0,
            duration: config.ricochet_channel_duration,
            min_radius: config.ricochet_min_radius,
            max_radius: config.ricochet_max_radius,
        }
    }

    /// Current field radius, growing linearly over the channel
    pub fn radius(&self) -> f32 {
        let progress = if self.duration > 0.0 {
            (self.timer / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        lerp(self.min_radius, self.max_radius, progress)
    }

    fn apply(&mut self, release: bool, dt: f32) -> AbilityStep {
        self.timer = (self.timer + dt).min(self.duration.max(0.0));
        if release || self.timer >= self.duration {
            AbilityStep::Expired
        } else {
            AbilityStep::Running
        }
    }

    /// Convert every enemy shot inside the field into a player ball
    fn release(&self, targets: &mut AbilityTargets<'_>) -> usize {
        let radius = self.radius();
        let origin = targets.player_pos;
        let (caught, missed): (Vec<Projectile>, Vec<Projectile>) = targets
            .enemy_projectiles
            .drain(..)
            .partition(|p| sphere_collides_sphere(p.pos, 0.0, origin, radius));
        *targets.enemy_projectiles = missed;

        let converted = caught.len();
        for shot in caught {
            let dir = (shot.pos - origin).try_normalize().unwrap_or(Vec2::NEG_Y);
            targets
                .player_projectiles
                .push(Projectile::new(shot.pos, dir, targets.config));
        }
        converted
    }
}

/// Whether an ability is still running after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityStep {
    Running,
    Expired,
}

/// The parts of the game state an ability may touch
pub struct AbilityTargets<'a> {
    pub config: &'a SimConfig,
    pub player_pos: Vec2,
    pub ball_velocity: &'a mut f32,
    pub player_projectiles: &'a mut Vec<Projectile>,
    pub enemy_projectiles: &'a mut Vec<Projectile>,
    pub events: &'a mut Vec<GameEvent>,
}

/// The player's ability slot contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActiveAbility {
    Wind(WindAbility),
    Ricochet(RicochetAbility),
}

impl ActiveAbility {
    /// Seconds left before the ability ends on its own
    pub fn remaining(&self) -> f32 {
        match self {
            ActiveAbility::Wind(wind) => wind.timer,
            ActiveAbility::Ricochet(field) => (field.duration - field.timer).max(0.0),
        }
    }

    /// Multiplier on game time while this ability runs
    pub fn time_scale(&self, config: &SimConfig) -> f32 {
        match self {
            ActiveAbility::Wind(_) => 1.0,
            ActiveAbility::Ricochet(_) => config.ricochet_time_scale,
        }
    }

    /// Advance by `dt` seconds. `release` ends a channelled ability early.
    pub fn apply(&mut self, targets: &mut AbilityTargets<'_>, release: bool, dt: f32) -> AbilityStep {
        match self {
            ActiveAbility::Wind(wind) => wind.apply(targets, dt),
            ActiveAbility::Ricochet(field) => field.apply(release, dt),
        }
    }

    /// One-shot effect when the ability ends
    pub fn on_expire(&self, targets: &mut AbilityTargets<'_>) {
        match self {
            ActiveAbility::Wind(_) => {}
            ActiveAbility::Ricochet(field) => {
                let converted = field.release(targets);
                log::debug!("Ricochet released at radius {:.1}, converted {converted}", field.radius());
                push_event(targets.events, GameEvent::RicochetReleased { converted });
            }
        }
    }
}
