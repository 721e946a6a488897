//! Level table and level lifecycle
//!
//! Levels are compiled-in data. A level is either a list of hand-placed
//! blocks, a character grid, or both.

use std::f32::consts::FRAC_PI_4;
use std::fmt;

use glam::Vec2;

use super::config::SimConfig;
use super::state::{Enemy, EnemyKind, GameState};

/// Requested level is not in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    OutOfRange { index: u32, count: u32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, count } => {
                write!(f, "level {index} does not exist (table has {count} levels)")
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// A hand-placed block
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub health: i32,
    pub kind: EnemyKind,
    pub contributes_to_win: bool,
    pub fire_interval: Option<f32>,
}

impl EnemySpawn {
    pub const fn block(x: f32, y: f32, w: f32, h: f32, health: i32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            rotation: 0.0,
            health,
            kind: EnemyKind::Normal,
            contributes_to_win: true,
            fire_interval: None,
        }
    }

    pub const fn wall(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            rotation: 0.0,
            health: 0,
            kind: EnemyKind::Indestructible,
            contributes_to_win: false,
            fire_interval: None,
        }
    }

    pub const fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn shooter(mut self, interval: f32) -> Self {
        self.fire_interval = Some(interval);
        self
    }

    pub const fn decorative(mut self) -> Self {
        self.contributes_to_win = false;
        self
    }

    pub fn to_enemy(&self) -> Enemy {
        Enemy {
            pos: self.pos,
            size: self.size,
            rotation: self.rotation,
            health: self.health,
            kind: self.kind,
            contributes_to_win: self.contributes_to_win,
            fire_interval: self.fire_interval,
            fire_timer: 0.0,
        }
    }
}

/// Rows of characters expanded into a block grid
///
/// - `.` or space: empty cell
/// - `1`-`9`: breakable block with that much health
/// - `o`: breakable one-hit block that is not needed to win
/// - `#`: indestructible block
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    /// Center of the top-left cell
    pub origin: Vec2,
    pub cell: Vec2,
    pub gap: f32,
    pub rows: &'static [&'static str],
}

impl GridLayout {
    pub fn enemies(&self) -> Vec<Enemy> {
        let step = self.cell + Vec2::splat(self.gap);
        let mut enemies = Vec::new();
        for (row, line) in self.rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                let pos = self.origin + Vec2::new(col as f32 * step.x, row as f32 * step.y);
                let enemy = match c {
                    '.' | ' ' => continue,
                    '#' => Enemy::indestructible(pos, self.cell),
                    'o' => Enemy::normal(pos, self.cell, 1).decorative(),
                    '1'..='9' => Enemy::normal(pos, self.cell, c as i32 - '0' as i32),
                    other => {
                        log::warn!("Unknown grid cell {other:?} at row {row} col {col}");
                        continue;
                    }
                };
                enemies.push(enemy);
            }
        }
        enemies
    }
}

/// One entry of the level table
#[derive(Debug, Clone, Copy)]
pub struct LevelDef {
    pub name: &'static str,
    pub blocks: &'static [EnemySpawn],
    pub grid: Option<GridLayout>,
    pub balls: u32,
    pub wind_charges: u32,
}

impl LevelDef {
    /// Grid blocks first, then hand-placed ones
    pub fn enemies(&self) -> Vec<Enemy> {
        let mut enemies = self.grid.map(|g| g.enemies()).unwrap_or_default();
        enemies.extend(self.blocks.iter().map(EnemySpawn::to_enemy));
        enemies
    }
}

/// The level table, indexed by level number
pub static LEVELS: &[LevelDef] = &[
    LevelDef {
        name: "Sandbox",
        blocks: &[
            EnemySpawn::block(-200.0, -300.0, 100.0, 25.0, 1),
            EnemySpawn::block(-200.0, -100.0, 100.0, 25.0, 1),
        ],
        grid: None,
        balls: 1,
        wind_charges: 0,
    },
    LevelDef {
        name: "First Gust",
        blocks: &[
            EnemySpawn::block(-200.0, -300.0, 300.0, 25.0, 1),
            EnemySpawn::wall(-200.0, 300.0, 1000.0, 25.0),
        ],
        grid: None,
        balls: 1,
        wind_charges: 1,
    },
    LevelDef {
        name: "Crosswind",
        blocks: &[
            EnemySpawn::block(-350.0, -250.0, 160.0, 25.0, 2).rotated(FRAC_PI_4),
            EnemySpawn::block(350.0, -250.0, 160.0, 25.0, 2).rotated(-FRAC_PI_4),
            EnemySpawn::block(0.0, -380.0, 200.0, 25.0, 1),
            EnemySpawn::wall(0.0, -150.0, 120.0, 25.0),
        ],
        grid: None,
        balls: 2,
        wind_charges: 2,
    },
    LevelDef {
        name: "Brickwork",
        blocks: &[],
        grid: Some(GridLayout {
            origin: Vec2::new(-495.0, -420.0),
            cell: Vec2::new(100.0, 25.0),
            gap: 10.0,
            rows: &[
                "1111111111",
                "1o222222o1",
                "#..3333..#",
                "..........",
                "...#..#...",
            ],
        }),
        balls: 3,
        wind_charges: 2,
    },
    LevelDef {
        name: "Crossfire",
        blocks: &[
            EnemySpawn::block(-400.0, -350.0, 120.0, 30.0, 2).shooter(2.5),
            EnemySpawn::block(400.0, -350.0, 120.0, 30.0, 2).shooter(3.0),
            EnemySpawn::block(0.0, -250.0, 200.0, 25.0, 3),
            EnemySpawn::block(0.0, -420.0, 140.0, 25.0, 1).decorative(),
            EnemySpawn::wall(-200.0, -100.0, 140.0, 25.0).rotated(-FRAC_PI_4),
            EnemySpawn::wall(200.0, -100.0, 140.0, 25.0).rotated(FRAC_PI_4),
        ],
        grid: None,
        balls: 3,
        wind_charges: 3,
    },
];

/// Number of levels in the table
#[inline]
pub fn level_count() -> u32 {
    LEVELS.len() as u32
}

/// Look up a level by index
pub fn level_def(index: u32) -> Result<&'static LevelDef, LevelError> {
    LEVELS
        .get(index as usize)
        .ok_or(LevelError::OutOfRange { index, count: level_count() })
}

/// Replace the state's blocks and starting resources with `current_level`'s
pub fn load_level(state: &mut GameState) -> Result<(), LevelError> {
    let def = level_def(state.current_level)?;
    state.enemies = def.enemies();
    state.player.balls_available = def.balls;
    state.player.wind_available = def.wind_charges;
    log::info!(
        "Loaded level {} \"{}\": {} blocks, {} balls, {} wind",
        state.current_level,
        def.name,
        state.enemies.len(),
        def.balls,
        def.wind_charges
    );
    Ok(())
}

/// Build a fresh game state on the given level
pub fn game_init(config: &SimConfig, level: u32) -> Result<GameState, LevelError> {
    let mut state = GameState::new(config, level);
    load_level(&mut state)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::LevelStatus;

    #[test]
    fn test_every_level_is_winnable_and_in_bounds() {
        let config = SimConfig::default();
        for index in 0..level_count() {
            let state = game_init(&config, index).expect("level in table");
            assert!(!state.is_cleared(), "level {index} starts already won");
            assert!(state.player.balls_available > 0, "level {index} has no balls");
            for enemy in &state.enemies {
                assert!(config.in_world(enemy.pos), "level {index} block outside world");
            }
        }
    }

    #[test]
    fn test_game_init_defaults() {
        let config = SimConfig::default();
        let state = game_init(&config, 1).expect("level 1");
        assert_eq!(state.current_level, 1);
        assert_eq!(state.time_scale, 1.0);
        assert_eq!(state.level_status, LevelStatus::InProgress);
        assert_eq!(state.player.pos_x, 0.0);
        assert_eq!(state.player.vel, 0.0);
        assert_eq!(state.player.ball_velocity, config.ball_velocity);
        assert_eq!(state.player.balls_available, 1);
        assert_eq!(state.player.wind_available, 1);
        assert!(state.player.active_ability.is_none());
        assert!(state.player_projectiles.is_empty());
        assert!(state.dead_balls.is_empty());
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[1].kind, EnemyKind::Indestructible);
    }

    #[test]
    fn test_out_of_range_level() {
        let config = SimConfig::default();
        let err = game_init(&config, level_count()).unwrap_err();
        assert_eq!(err, LevelError::OutOfRange { index: level_count(), count: level_count() });
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_overwrites_instead_of_merging() {
        let config = SimConfig::default();
        let mut state = game_init(&config, 0).expect("level 0");
        state.player.balls_available = 9;
        state.enemies.push(Enemy::normal(Vec2::ZERO, Vec2::ONE, 1));
        load_level(&mut state).expect("reload");
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.player.balls_available, 1);
    }

    #[test]
    fn test_grid_layout_expansion() {
        let grid = GridLayout {
            origin: Vec2::new(0.0, 0.0),
            cell: Vec2::new(10.0, 5.0),
            gap: 2.0,
            rows: &["1.#", "o3?"],
        };
        let enemies = grid.enemies();
        assert_eq!(enemies.len(), 4);
        assert_eq!(enemies[0].pos, Vec2::new(0.0, 0.0));
        assert_eq!(enemies[1].kind, EnemyKind::Indestructible);
        assert_eq!(enemies[1].pos, Vec2::new(24.0, 0.0));
        assert!(!enemies[2].contributes_to_win);
        assert_eq!(enemies[2].pos, Vec2::new(0.0, 7.0));
        assert_eq!(enemies[3].health, 3);
    }
}
