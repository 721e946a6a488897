//! Whole-level scenarios driven through the public API

use glam::Vec2;
use winds_of_change::consts::SIM_DT;
use winds_of_change::sim::{
    Autopilot, Enemy, GameEvent, GameState, LevelStatus, SimConfig, TickInput, game_init,
    level_count, tick,
};
use winds_of_change::{LevelOverlay, MenuPage, Session};

fn idle() -> TickInput {
    TickInput::default()
}

fn launch() -> TickInput {
    TickInput {
        send_ball: true,
        ..TickInput::default()
    }
}

/// One ball bouncing straight between the paddle and the block above it
#[test]
fn three_hit_block_breaks_on_third_hit() {
    let config = SimConfig::default();
    let mut state = GameState::new(&config, 0);
    state
        .enemies
        .push(Enemy::normal(Vec2::ZERO, Vec2::new(100.0, 25.0), 3));
    state.player.balls_available = 1;

    tick(&mut state, &config, &launch(), SIM_DT);
    assert_eq!(state.player_projectiles.len(), 1);

    let mut health = 3;
    let mut paddle_hits_since_block = 1;
    for _ in 0..4000 {
        tick(&mut state, &config, &idle(), SIM_DT);
        if state.events.contains(&GameEvent::PaddleHit) {
            paddle_hits_since_block += 1;
        }

        match state.enemies.first() {
            Some(block) => {
                if block.health < health {
                    assert_eq!(block.health, health - 1, "two hits in one step");
                    assert!(paddle_hits_since_block > 0, "bounced twice without the paddle");
                    health = block.health;
                    paddle_hits_since_block = 0;
                }
                assert_eq!(state.level_status, LevelStatus::InProgress);
            }
            None => {
                assert_eq!(health, 1);
                assert_eq!(state.level_status, LevelStatus::Won);
                assert!(state.events.contains(&GameEvent::LevelWon));
                assert_eq!(state.dead_enemies.len(), 1);
                assert_eq!(state.dead_enemies[0].pos, Vec2::ZERO);
                assert_eq!(state.dead_enemies[0].size, Vec2::new(100.0, 25.0));
                return;
            }
        }
    }
    panic!("block never broke (health {health})");
}

#[test]
fn won_on_the_step_the_last_block_falls() {
    let config = SimConfig::default();
    let mut state = GameState::new(&config, 0);
    state
        .enemies
        .push(Enemy::normal(Vec2::ZERO, Vec2::new(100.0, 25.0), 1));
    state
        .enemies
        .push(Enemy::normal(Vec2::new(0.0, -200.0), Vec2::new(100.0, 25.0), 1));
    state.player.balls_available = 1;

    tick(&mut state, &config, &launch(), SIM_DT);
    for _ in 0..6000 {
        let before = state.enemies.len();
        tick(&mut state, &config, &idle(), SIM_DT);
        if state.enemies.is_empty() {
            assert_eq!(before, 1);
            assert_eq!(state.level_status, LevelStatus::Won);
            return;
        }
        assert_eq!(state.level_status, LevelStatus::InProgress);
    }
    panic!("level never won");
}

#[test]
fn lost_only_after_the_last_ball_fades() {
    let config = SimConfig::default();
    let mut state = GameState::new(&config, 0);
    state
        .enemies
        .push(Enemy::normal(Vec2::new(500.0, -300.0), Vec2::new(50.0, 25.0), 1));
    state.player.balls_available = 1;

    tick(&mut state, &config, &launch(), SIM_DT);
    let mut saw_dead_ball = false;
    for _ in 0..2000 {
        tick(&mut state, &config, &idle(), SIM_DT);
        if !state.dead_balls.is_empty() {
            saw_dead_ball = true;
            assert_eq!(state.level_status, LevelStatus::InProgress);
        }
        if state.level_status == LevelStatus::Lost {
            assert!(saw_dead_ball);
            assert!(state.events.contains(&GameEvent::LevelLost));
            return;
        }
    }
    panic!("level never lost");
}

#[test]
fn every_level_survives_autopilot_play() {
    let config = SimConfig::default();
    for level in 0..level_count() {
        let mut state = game_init(&config, level).expect("level exists");
        let mut pilot = Autopilot::new(u64::from(level));
        for _ in 0..20_000 {
            let input = pilot.next_input(&state, &config, SIM_DT);
            tick(&mut state, &config, &input, SIM_DT);

            let (min_x, max_x) = config.paddle_x_range();
            assert!(state.player.pos_x >= min_x && state.player.pos_x <= max_x);
            for p in &state.player_projectiles {
                assert!((p.dir.length() - 1.0).abs() < 1e-3, "direction drifted");
            }
            if state.level_status.is_terminal() && state.time_scale == 0.0 {
                break;
            }
        }
    }
}

#[test]
fn session_shows_overlay_after_fade() {
    // Sandbox blocks sit off to the left; a ball launched from the middle misses
    let config = SimConfig {
        start_level: 0,
        ..SimConfig::default()
    };
    let mut session = Session::new(config);
    session.new_game().expect("sandbox level");
    assert_eq!(session.page(), MenuPage::Game);

    session.update(&launch(), SIM_DT);
    let mut steps = 0;
    while session.overlay().is_none() {
        session.update(&idle(), SIM_DT);
        steps += 1;
        assert!(steps < 5000, "no overlay");
        let state = session.game().expect("game running");
        if state.level_status.is_terminal() {
            assert!(state.time_scale < 1.0 || state.events.contains(&GameEvent::LevelLost));
        }
    }

    assert_eq!(session.overlay(), Some(LevelOverlay::LevelFailed));
    assert_eq!(session.game().map(|s| s.time_scale), Some(0.0));

    session.retry_level().expect("same level");
    assert!(session.overlay().is_none());
    assert_eq!(session.game().map(|s| s.player.balls_available), Some(1));
}
