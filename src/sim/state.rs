//! Game state and core simulation types
//!
//! The whole simulation is one tree owned by the frame driver. Renderers and
//! other collaborators read it between steps and never write to it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ability::ActiveAbility;
use super::config::SimConfig;
use super::ease::{ease_in_back, ease_in_cubic};
use super::events::GameEvent;

/// Outcome of the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl LevelStatus {
    /// Won and Lost are final for the level
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != LevelStatus::InProgress
    }
}

/// The player's paddle and resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Paddle center on the x axis
    pub pos_x: f32,
    /// Fixed line the paddle slides along
    pub pos_y: f32,
    pub vel: f32,
    pub accel: f32,
    pub half_size: Vec2,
    /// Speed shared by all player balls (the wind rescales it)
    pub ball_velocity: f32,
    pub balls_available: u32,
    pub wind_available: u32,
    /// At most one ability runs at a time
    pub active_ability: Option<ActiveAbility>,
}

impl PlayerState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pos_x: 0.0,
            pos_y: config.player_y,
            vel: 0.0,
            accel: 0.0,
            half_size: config.paddle_half_size(),
            ball_velocity: config.ball_velocity,
            balls_available: 0,
            wind_available: 0,
            active_ability: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.pos_x, self.pos_y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_size * 2.0
    }
}

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    /// Never loses health and is never removed
    Indestructible,
}

/// A block (rotatable rectangle with health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
    pub health: i32,
    pub kind: EnemyKind,
    /// Whether the level is only won once this block is gone
    pub contributes_to_win: bool,
    /// Seconds between shots for shooting blocks
    #[serde(default)]
    pub fire_interval: Option<f32>,
    #[serde(default)]
    pub fire_timer: f32,
}

impl Enemy {
    pub fn normal(pos: Vec2, size: Vec2, health: i32) -> Self {
        Self {
            pos,
            size,
            rotation: 0.0,
            health,
            kind: EnemyKind::Normal,
            contributes_to_win: true,
            fire_interval: None,
            fire_timer: 0.0,
        }
    }

    pub fn indestructible(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            rotation: 0.0,
            health: 0,
            kind: EnemyKind::Indestructible,
            contributes_to_win: false,
            fire_interval: None,
            fire_timer: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_fire_interval(mut self, interval: f32) -> Self {
        self.fire_interval = Some(interval);
        self
    }

    /// Decorative blocks can be broken but are not required to win
    pub fn decorative(mut self) -> Self {
        self.contributes_to_win = false;
        self
    }

    /// Apply ball damage (ignored by indestructible blocks)
    pub fn take_hit(&mut self, damage: i32) {
        if self.kind == EnemyKind::Normal {
            self.health -= damage;
        }
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.kind == EnemyKind::Normal && self.health <= 0
    }
}

/// A ball in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    /// Seconds since the last bounce
    pub since_collision: f32,
}

impl Projectile {
    /// A fresh projectile is immediately allowed to collide
    pub fn new(pos: Vec2, dir: Vec2, config: &SimConfig) -> Self {
        Self {
            pos,
            dir,
            since_collision: config.collision_cooldown,
        }
    }

    #[inline]
    pub fn can_collide(&self, config: &SimConfig) -> bool {
        self.since_collision >= config.collision_cooldown
    }
}

/// Fading remains of a ball that left the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadBall {
    pub pos: Vec2,
    pub dir: Vec2,
    /// Speed at the moment the ball left play
    pub speed: f32,
    pub timer: f32,
}

impl DeadBall {
    /// Advance the drift; returns false once the effect is over
    pub fn update(&mut self, dt: f32, duration: f32) -> bool {
        self.timer += dt;
        let progress = self.progress(duration);
        self.pos += self.dir * self.speed * (1.0 - ease_in_cubic(progress)) * dt;
        self.timer < duration
    }

    /// 0 at spawn, 1 when the effect is over
    #[inline]
    pub fn progress(&self, duration: f32) -> f32 {
        if duration <= 0.0 {
            1.0
        } else {
            (self.timer / duration).clamp(0.0, 1.0)
        }
    }
}

/// Collapsing remains of a destroyed block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadEnemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub timer: f32,
}

impl DeadEnemy {
    pub fn from_enemy(enemy: &Enemy) -> Self {
        Self {
            pos: enemy.pos,
            size: enemy.size,
            rotation: enemy.rotation,
            timer: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, duration: f32) -> bool {
        self.timer += dt;
        self.timer < duration
    }

    /// Draw scale: swells slightly, then shrinks to nothing
    pub fn scale(&self, duration: f32) -> f32 {
        let progress = if duration <= 0.0 {
            1.0
        } else {
            (self.timer / duration).clamp(0.0, 1.0)
        };
        1.0 - ease_in_back(progress)
    }
}

/// Complete game state for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Level table index
    pub current_level: u32,
    /// Slows toward 0 once the level ends
    pub time_scale: f32,
    pub level_status: LevelStatus,
    pub player: PlayerState,
    /// Live blocks, in layout order
    pub enemies: Vec<Enemy>,
    pub player_projectiles: Vec<Projectile>,
    /// Shots fired by shooting blocks
    pub enemy_projectiles: Vec<Projectile>,
    pub dead_balls: Vec<DeadBall>,
    pub dead_enemies: Vec<DeadEnemy>,
    /// Steps taken in this level
    pub frame: u64,
    /// Events raised by the most recent step
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state with nothing loaded
    pub fn new(config: &SimConfig, level: u32) -> Self {
        Self {
            current_level: level,
            time_scale: 1.0,
            level_status: LevelStatus::InProgress,
            player: PlayerState::new(config),
            enemies: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            dead_balls: Vec::new(),
            dead_enemies: Vec::new(),
            frame: 0,
            events: Vec::new(),
        }
    }

    /// No block that counts toward the win is left
    pub fn is_cleared(&self) -> bool {
        !self.enemies.iter().any(|e| e.contributes_to_win)
    }

    /// No ball to launch, none in flight, none still fading out
    pub fn is_out_of_balls(&self) -> bool {
        self.player.balls_available == 0
            && self.player_projectiles.is_empty()
            && self.dead_balls.is_empty()
    }
}
