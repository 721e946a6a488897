//! Simulation step
//!
//! One call advances the level by one frame, always in the same order:
//! 1. ending fade (time scale)
//! 2. paddle motion
//! 3. dead effects
//! 4. out-of-bounds balls
//! 5. ball motion and collisions
//! 6. destroyed blocks, then shooting blocks fire
//! 7. ball launch
//! 8. ability start
//! 9. ability update
//! 10. win / lose

use glam::Vec2;

use super::ability::{AbilityStep, AbilityTargets, ActiveAbility, RicochetAbility, WindAbility};
use super::collision::sphere_collides_rectangle;
use super::config::{AbilityMode, SimConfig};
use super::events::{GameEvent, push_event};
use super::state::{
    DeadBall, DeadEnemy, EnemyKind, GameState, LevelStatus, PlayerState, Projectile,
};
use crate::reflect;

/// Input commands for a single step, already debounced by the caller
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle direction: -1, 0 or 1
    pub move_dir: i32,
    /// Wind gust direction on each axis: -1, 0 or 1 (y = 1 is "up")
    pub wind_dir_x: i32,
    pub wind_dir_y: i32,
    /// Launch a ball
    pub send_ball: bool,
    /// Begin channelling the ricochet field
    pub ability_start: bool,
    /// Release the ricochet field early
    pub ability_stop: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, config: &SimConfig, input: &TickInput, dt: f32) {
    state.events.clear();
    state.frame += 1;

    // Ending freeze: slow the whole level down once it is decided
    if state.level_status.is_terminal() {
        state.time_scale = (state.time_scale - dt).max(0.0);
    }
    let base_dt = dt * state.time_scale;
    let ability_scale = state
        .player
        .active_ability
        .as_ref()
        .map_or(1.0, |a| a.time_scale(config));
    let dt = base_dt * ability_scale;

    update_player(&mut state.player, config, input.move_dir, dt);
    update_effects(state, config, dt);
    cull_projectiles(state, config);
    resolve_collisions(state, config, dt);
    remove_destroyed_enemies(state);
    fire_enemy_shots(state, config, dt);
    launch_ball(state, config, input);
    start_ability(state, config, input);
    advance_ability(state, config, input, base_dt);
    evaluate_outcome(state);
}

fn update_player(player: &mut PlayerState, config: &SimConfig, move_dir: i32, dt: f32) {
    player.accel = move_dir.clamp(-1, 1) as f32 * config.player_acceleration;
    // Friction opposes the current velocity rather than the input, so
    // reversing direction is sluggish
    if player.vel < 0.0 {
        player.accel += config.ground_friction;
    } else {
        player.accel -= config.ground_friction;
    }

    player.vel = (player.vel + player.accel * dt).clamp(config.player_min_vel, config.player_max_vel);
    let (min_x, max_x) = config.paddle_x_range();
    player.pos_x = (player.pos_x + player.vel * dt).clamp(min_x, max_x);
}

fn update_effects(state: &mut GameState, config: &SimConfig, dt: f32) {
    state
        .dead_balls
        .retain_mut(|d| d.update(dt, config.dead_ball_duration));
    state
        .dead_enemies
        .retain_mut(|d| d.update(dt, config.dead_enemy_duration));
}

fn cull_projectiles(state: &mut GameState, config: &SimConfig) {
    let GameState {
        player,
        player_projectiles,
        enemy_projectiles,
        dead_balls,
        events,
        ..
    } = state;

    // A reversed wind makes balls travel against their direction
    let velocity = player.ball_velocity;
    player_projectiles.retain(|p| {
        if config.in_world(p.pos) {
            return true;
        }
        log::debug!("Ball left the world at ({:.1}, {:.1})", p.pos.x, p.pos.y);
        dead_balls.push(DeadBall {
            pos: p.pos,
            dir: if velocity < 0.0 { -p.dir } else { p.dir },
            speed: velocity.abs(),
            timer: 0.0,
        });
        push_event(events, GameEvent::BallDisappeared { pos: p.pos });
        false
    });
    enemy_projectiles.retain(|p| config.in_world(p.pos));
}

fn resolve_collisions(state: &mut GameState, config: &SimConfig, dt: f32) {
    let GameState {
        player,
        enemies,
        player_projectiles,
        enemy_projectiles,
        events,
        ..
    } = state;

    let paddle_pos = player.pos();
    let paddle_size = player.size();
    let velocity = player.ball_velocity;
    let radius = config.ball_radius;

    for p in player_projectiles.iter_mut() {
        p.since_collision += dt;
        p.pos += p.dir * velocity * dt;
        if !p.can_collide(config) {
            continue;
        }

        let motion = p.dir * velocity.signum();

        // One response per ball per step: the first block in list order,
        // otherwise the paddle
        let mut bounced = false;
        for enemy in enemies.iter_mut().filter(|e| !e.is_destroyed()) {
            let result =
                sphere_collides_rectangle(p.pos, motion, radius, enemy.pos, enemy.size, enemy.rotation);
            if !result.hit {
                continue;
            }
            p.dir = reflect(p.dir, result.normal);
            p.since_collision = 0.0;
            enemy.take_hit(config.ball_damage);
            let event = match enemy.kind {
                EnemyKind::Normal => GameEvent::WallHit,
                EnemyKind::Indestructible => GameEvent::IndestructibleHit,
            };
            push_event(events, event);
            log::debug!(
                "Ball hit {:?} block at ({:.0}, {:.0}), health now {}",
                enemy.kind,
                enemy.pos.x,
                enemy.pos.y,
                enemy.health
            );
            bounced = true;
            break;
        }
        if bounced {
            continue;
        }

        let result = sphere_collides_rectangle(p.pos, motion, radius, paddle_pos, paddle_size, 0.0);
        if result.hit {
            p.dir = reflect(p.dir, result.normal);
            p.since_collision = 0.0;
            push_event(events, GameEvent::PaddleHit);
        }
    }

    let shot_speed = config.enemy_projectile_speed;
    enemy_projectiles.retain_mut(|shot| {
        shot.since_collision += dt;
        shot.pos += shot.dir * shot_speed * dt;
        let result = sphere_collides_rectangle(shot.pos, shot.dir, radius, paddle_pos, paddle_size, 0.0);
        if result.hit {
            push_event(events, GameEvent::PlayerHit);
            return false;
        }
        true
    });
}

fn remove_destroyed_enemies(state: &mut GameState) {
    let GameState {
        enemies,
        dead_enemies,
        events,
        ..
    } = state;

    enemies.retain(|e| {
        if !e.is_destroyed() {
            return true;
        }
        dead_enemies.push(DeadEnemy::from_enemy(e));
        push_event(events, GameEvent::EnemyDestroyed { pos: e.pos });
        false
    });
}

fn fire_enemy_shots(state: &mut GameState, config: &SimConfig, dt: f32) {
    if state.level_status != LevelStatus::InProgress {
        return;
    }
    let target = state.player.pos();
    for enemy in state.enemies.iter_mut() {
        let Some(interval) = enemy.fire_interval.filter(|i| *i > 0.0) else {
            continue;
        };
        enemy.fire_timer += dt;
        if enemy.fire_timer >= interval {
            enemy.fire_timer -= interval;
            let dir = (target - enemy.pos).try_normalize().unwrap_or(Vec2::Y);
            state
                .enemy_projectiles
                .push(Projectile::new(enemy.pos, dir, config));
        }
    }
}

fn launch_ball(state: &mut GameState, config: &SimConfig, input: &TickInput) {
    if !input.send_ball || state.player.balls_available == 0 {
        return;
    }
    let pos = state.player.pos() - Vec2::new(0.0, config.ball_y_offset);
    state
        .player_projectiles
        .push(Projectile::new(pos, Vec2::NEG_Y, config));
    state.player.balls_available -= 1;
    push_event(&mut state.events, GameEvent::BallSent);
}

fn start_ability(state: &mut GameState, config: &SimConfig, input: &TickInput) {
    let player = &mut state.player;
    if player.active_ability.is_some() {
        return;
    }

    match config.ability_mode {
        AbilityMode::Wind => {
            if player.wind_available == 0 {
                return;
            }
            let Some(wind) =
                WindAbility::from_input(input.wind_dir_x, input.wind_dir_y, player.ball_velocity, config)
            else {
                return;
            };
            player.wind_available -= 1;
            log::info!(
                "Wind gust: angle {:.2} rad, ball speed {:.0} -> {:.0}, {} left",
                wind.angle,
                wind.ball_current_velocity,
                wind.ball_target_velocity,
                player.wind_available
            );
            push_event(
                &mut state.events,
                GameEvent::WindActivated {
                    angle: wind.angle,
                    target_velocity: wind.ball_target_velocity,
                },
            );
            player.active_ability = Some(ActiveAbility::Wind(wind));
        }
        AbilityMode::Ricochet => {
            if !input.ability_start {
                return;
            }
            log::info!("Ricochet field channelling");
            player.active_ability = Some(ActiveAbility::Ricochet(RicochetAbility::new(config)));
            push_event(&mut state.events, GameEvent::RicochetStarted);
        }
    }
}

fn advance_ability(state: &mut GameState, config: &SimConfig, input: &TickInput, dt: f32) {
    let Some(mut ability) = state.player.active_ability.take() else {
        return;
    };

    let mut targets = AbilityTargets {
        config,
        player_pos: state.player.pos(),
        ball_velocity: &mut state.player.ball_velocity,
        player_projectiles: &mut state.player_projectiles,
        enemy_projectiles: &mut state.enemy_projectiles,
        events: &mut state.events,
    };

    match ability.apply(&mut targets, input.ability_stop, dt) {
        AbilityStep::Running => state.player.active_ability = Some(ability),
        AbilityStep::Expired => ability.on_expire(&mut targets),
    }
}

fn evaluate_outcome(state: &mut GameState) {
    if state.level_status != LevelStatus::InProgress {
        return;
    }

    if state.is_cleared() {
        state.level_status = LevelStatus::Won;
        log::info!("Level {} won on frame {}", state.current_level, state.frame);
        push_event(&mut state.events, GameEvent::LevelWon);
    } else if state.is_out_of_balls() {
        state.level_status = LevelStatus::Lost;
        log::info!("Level {} lost on frame {}", state.current_level, state.frame);
        push_event(&mut state.events, GameEvent::LevelLost);
    }
}
