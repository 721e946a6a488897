//! Attract-mode player
//!
//! Produces one [`TickInput`] per step from the current state, the same way a
//! human would press keys. Used by the headless driver and scenario tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ability::ActiveAbility;
use super::config::{AbilityMode, SimConfig};
use super::state::{GameState, LevelStatus};
use super::tick::TickInput;

/// Paddle stops steering when this close to its target x
const TRACK_DEADZONE: f32 = 8.0;
/// Seconds between wind gust attempts
const WIND_INTERVAL: (f32, f32) = (2.0, 5.0);

/// Seeded input generator
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    wind_cooldown: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let wind_cooldown = rng.random_range(WIND_INTERVAL.0..WIND_INTERVAL.1);
        Self { rng, wind_cooldown }
    }

    /// Input for the next step of `dt` seconds
    pub fn next_input(&mut self, state: &GameState, config: &SimConfig, dt: f32) -> TickInput {
        let mut input = TickInput::default();
        if state.level_status != LevelStatus::InProgress {
            return input;
        }

        let target_x = Self::target_x(state, config);
        let dx = target_x - state.player.pos_x;
        if dx.abs() > TRACK_DEADZONE {
            input.move_dir = dx.signum() as i32;
        }

        input.send_ball = state.player_projectiles.is_empty() && state.player.balls_available > 0;

        match config.ability_mode {
            AbilityMode::Wind => self.maybe_gust(state, &mut input, dt),
            AbilityMode::Ricochet => Self::ricochet(state, config, &mut input),
        }

        input
    }

    /// Where the paddle should be: under the next ball to come down,
    /// otherwise back at the middle
    fn target_x(state: &GameState, config: &SimConfig) -> f32 {
        let paddle_y = state.player.pos_y;
        let velocity = state.player.ball_velocity;

        let incoming = state
            .player_projectiles
            .iter()
            .filter_map(|p| {
                let motion = p.dir * velocity.signum();
                if motion.y <= f32::EPSILON || p.pos.y > paddle_y {
                    return None;
                }
                let t = (paddle_y - p.pos.y) / motion.y;
                Some((paddle_y - p.pos.y, p.pos.x + motion.x * t))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0));

        let (min_x, max_x) = config.paddle_x_range();
        incoming.map_or(0.0, |(_, x)| x.clamp(min_x, max_x))
    }

    fn maybe_gust(&mut self, state: &GameState, input: &mut TickInput, dt: f32) {
        self.wind_cooldown -= dt;
        if self.wind_cooldown > 0.0 {
            return;
        }
        self.wind_cooldown = self.rng.random_range(WIND_INTERVAL.0..WIND_INTERVAL.1);

        let player = &state.player;
        if player.wind_available == 0
            || player.active_ability.is_some()
            || state.player_projectiles.is_empty()
        {
            return;
        }
        match self.rng.random_range(0..4) {
            0 => input.wind_dir_x = -1,
            1 => input.wind_dir_x = 1,
            2 => input.wind_dir_y = 1,
            _ => input.wind_dir_y = -1,
        }
        log::debug!("Autopilot gust x={} y={}", input.wind_dir_x, input.wind_dir_y);
    }

    /// Channel while shots close in, release once one is inside the field
    fn ricochet(state: &GameState, config: &SimConfig, input: &mut TickInput) {
        let paddle = state.player.pos();
        let nearest = state
            .enemy_projectiles
            .iter()
            .map(|p| p.pos.distance(paddle))
            .min_by(f32::total_cmp);
        let Some(nearest) = nearest else {
            return;
        };

        match &state.player.active_ability {
            None => input.ability_start = nearest < config.ricochet_max_radius * 1.5,
            Some(ActiveAbility::Ricochet(field)) => {
                input.ability_stop = nearest <= field.radius();
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ability::RicochetAbility;
    use crate::sim::state::{Enemy, Projectile};
    use glam::Vec2;

    fn state_with_target(config: &SimConfig) -> GameState {
        let mut state = GameState::new(config, 0);
        state.enemies.push(Enemy::normal(Vec2::new(0.0, -300.0), Vec2::new(100.0, 25.0), 1));
        state.player.balls_available = 1;
        state
    }

    #[test]
    fn test_launches_when_nothing_in_flight() {
        let config = SimConfig::default();
        let state = state_with_target(&config);
        let mut pilot = Autopilot::new(1);
        let input = pilot.next_input(&state, &config, 0.01);
        assert!(input.send_ball);
        assert_eq!(input.move_dir, 0);
    }

    #[test]
    fn test_tracks_descending_ball() {
        let config = SimConfig::default();
        let mut state = state_with_target(&config);
        let dir = Vec2::new(1.0, 1.0).normalize();
        state
            .player_projectiles
            .push(Projectile::new(Vec2::new(0.0, 200.0), dir, &config));
        let mut pilot = Autopilot::new(1);
        let input = pilot.next_input(&state, &config, 0.01);
        assert!(!input.send_ball);
        // Lands at x = 200
        assert_eq!(input.move_dir, 1);
    }

    #[test]
    fn test_ignores_rising_ball() {
        let config = SimConfig::default();
        let mut state = state_with_target(&config);
        state.player.pos_x = -300.0;
        state
            .player_projectiles
            .push(Projectile::new(Vec2::new(-300.0, 0.0), Vec2::NEG_Y, &config));
        let mut pilot = Autopilot::new(1);
        let input = pilot.next_input(&state, &config, 0.01);
        // Nothing coming down: drift back to the middle
        assert_eq!(input.move_dir, 1);
    }

    #[test]
    fn test_idle_after_level_ends() {
        let config = SimConfig::default();
        let mut state = state_with_target(&config);
        state.level_status = LevelStatus::Won;
        let mut pilot = Autopilot::new(1);
        let input = pilot.next_input(&state, &config, 0.01);
        assert!(!input.send_ball);
        assert_eq!(input.move_dir, 0);
    }

    #[test]
    fn test_gusts_only_with_charges() {
        let config = SimConfig::default();
        let mut state = state_with_target(&config);
        state
            .player_projectiles
            .push(Projectile::new(Vec2::ZERO, Vec2::NEG_Y, &config));
        let mut pilot = Autopilot::new(5);

        let mut gusts = 0;
        for _ in 0..100 {
            let input = pilot.next_input(&state, &config, 0.5);
            if input.wind_dir_x != 0 || input.wind_dir_y != 0 {
                gusts += 1;
            }
        }
        assert_eq!(gusts, 0);

        state.player.wind_available = 1;
        for _ in 0..100 {
            let input = pilot.next_input(&state, &config, 0.5);
            if input.wind_dir_x != 0 || input.wind_dir_y != 0 {
                gusts += 1;
            }
        }
        assert!(gusts > 0);
    }

    #[test]
    fn test_same_seed_same_inputs() {
        let config = SimConfig::default();
        let mut state = state_with_target(&config);
        state.player.wind_available = 3;
        state
            .player_projectiles
            .push(Projectile::new(Vec2::ZERO, Vec2::NEG_Y, &config));
        let mut a = Autopilot::new(11);
        let mut b = Autopilot::new(11);
        for _ in 0..50 {
            let ia = a.next_input(&state, &config, 0.25);
            let ib = b.next_input(&state, &config, 0.25);
            assert_eq!((ia.wind_dir_x, ia.wind_dir_y), (ib.wind_dir_x, ib.wind_dir_y));
        }
    }

    #[test]
    fn test_ricochet_channels_then_releases() {
        let config = SimConfig {
            ability_mode: AbilityMode::Ricochet,
            ..SimConfig::default()
        };
        let mut state = state_with_target(&config);
        state
            .enemy_projectiles
            .push(Projectile::new(Vec2::new(0.0, 150.0), Vec2::Y, &config));
        let mut pilot = Autopilot::new(1);
        let input = pilot.next_input(&state, &config, 0.01);
        assert!(input.ability_start);

        state.player.active_ability = Some(ActiveAbility::Ricochet(RicochetAbility::new(&config)));
        state.enemy_projectiles[0].pos = Vec2::new(0.0, 370.0);
        let input = pilot.next_input(&state, &config, 0.01);
        assert!(input.ability_stop);
    }
}
