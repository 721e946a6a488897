//! Winds of Change - headless driver
//!
//! Plays through the level table with the autopilot at a simulated 60 Hz
//! display rate, logging outcomes and audio cues. Windowing, rendering and
//! device audio live in the platform shells.
//!
//! Usage: `winds-of-change [config.json]`
//! - `WOC_CONFIG`: simulation config path (if no argument is given)
//! - `WOC_SETTINGS`: user settings path
//! - `WOC_SEED`: autopilot / audio seed
//! - `RUST_LOG`: log filter

use std::process::ExitCode;

use winds_of_change::audio::AudioCues;
use winds_of_change::consts::{MAX_SUBSTEPS, SIM_DT};
use winds_of_change::sim::{Autopilot, ConfigError, GameEvent, SimConfig, TickInput};
use winds_of_change::{LevelOverlay, Session, Settings};

/// Frame length of the pretend display
const FRAME_DT: f32 = 1.0 / 60.0;
/// Ten minutes of play
const MAX_FRAMES: u64 = 60 * 60 * 10;
/// Attempts per level before the run is abandoned
const MAX_RETRIES: u32 = 3;
const DEFAULT_SEED: u64 = 0x5eed;

/// Driver state: the session plus its input and audio collaborators
struct Game {
    session: Session,
    autopilot: Autopilot,
    audio: AudioCues,
    accumulator: f32,
    levels_won: u32,
    retries: u32,
}

impl Game {
    fn new(config: SimConfig, settings: &Settings, seed: u64) -> Self {
        Self {
            session: Session::new(config),
            autopilot: Autopilot::new(seed),
            audio: AudioCues::new(settings, seed),
            accumulator: 0.0,
            levels_won: 0,
            retries: 0,
        }
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = match self.session.game() {
                Some(state) => self
                    .autopilot
                    .next_input(state, self.session.config(), SIM_DT),
                None => TickInput::default(),
            };
            self.session.update(&input, SIM_DT);
            self.play_cues();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn play_cues(&mut self) {
        let ui = self.session.drain_cues();
        for request in self.audio.for_ui(&ui) {
            log::trace!("play {request:?}");
        }

        let Some(state) = self.session.game() else {
            return;
        };
        for event in &state.events {
            match event {
                GameEvent::LevelWon => self.levels_won += 1,
                GameEvent::EnemyDestroyed { pos } => {
                    log::debug!("Block destroyed at ({:.0}, {:.0})", pos.x, pos.y)
                }
                _ => {}
            }
        }
        for request in self.audio.for_events(&state.events) {
            log::trace!("play {request:?}");
        }
    }

    /// Press whichever button the level overlay offers
    fn handle_overlay(&mut self) {
        match self.session.overlay() {
            None => {}
            Some(LevelOverlay::LevelComplete) => {
                self.retries = 0;
                self.session.next_level();
            }
            Some(LevelOverlay::LevelFailed) if self.retries < MAX_RETRIES => {
                self.retries += 1;
                log::info!("Retrying (attempt {})", self.retries + 1);
                if let Err(err) = self.session.retry_level() {
                    log::error!("Retry failed: {err}");
                    self.session.quit();
                }
            }
            Some(LevelOverlay::LevelFailed) => {
                log::warn!("Autopilot gave up after {MAX_RETRIES} retries");
                self.session.quit();
            }
            Some(LevelOverlay::GameCompleted) => {
                log::info!("All levels cleared");
                self.session.finish_game();
                self.session.quit();
            }
        }
    }
}

fn load_config() -> Result<SimConfig, ConfigError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WOC_CONFIG").ok());
    match path {
        Some(path) => {
            log::info!("Loading simulation config from {path}");
            SimConfig::load(path)
        }
        None => Ok(SimConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Winds of Change (headless) starting...");

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let settings = std::env::var_os("WOC_SETTINGS")
        .map(Settings::load)
        .unwrap_or_default();
    let seed = std::env::var("WOC_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut game = Game::new(config, &settings, seed);
    if let Err(err) = game.session.new_game() {
        log::error!("Cannot start: {err}");
        return ExitCode::FAILURE;
    }

    let mut frames = 0;
    while game.session.is_running() && frames < MAX_FRAMES {
        game.update(FRAME_DT);
        game.handle_overlay();
        frames += 1;
    }

    let level = game.session.game().map(|s| s.current_level);
    println!(
        "levels won: {}, frames: {frames}, last level: {}",
        game.levels_won,
        level.map_or_else(|| "-".to_string(), |l| l.to_string())
    );
    ExitCode::SUCCESS
}
