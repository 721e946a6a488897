//! Menu pages and level transitions around the simulation
//!
//! The session owns the optional running game. UI code reads [`Session::page`]
//! and [`Session::overlay`] to decide what to draw, and calls the transition
//! methods when buttons are pressed. Each accepted transition queues the UI
//! cues the audio layer plays.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, LevelError, LevelStatus, SimConfig, TickInput, game_init, level_count, tick};

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuPage {
    #[default]
    MainMenu,
    Game,
    Settings,
    Credits,
    /// The driver should exit
    Quit,
}

/// Screen shown over a finished level once its ending fade is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOverlay {
    /// Offers the next level
    LevelComplete,
    /// Offers a retry of the same level
    LevelFailed,
    /// The last level was beaten
    GameCompleted,
}

/// Interface sounds raised by page transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiCue {
    ButtonHover,
    ButtonClick,
    PageChange,
}

/// Menu state plus the game in progress
#[derive(Debug, Clone)]
pub struct Session {
    config: SimConfig,
    page: MenuPage,
    game: Option<GameState>,
    /// Set when advancing ran past the level table
    completed: bool,
    cues: Vec<UiCue>,
}

impl Session {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            page: MenuPage::MainMenu,
            game: None,
            completed: false,
            cues: Vec::new(),
        }
    }

    #[inline]
    pub fn page(&self) -> MenuPage {
        self.page
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// The driver keeps running until Quit is chosen
    #[inline]
    pub fn is_running(&self) -> bool {
        self.page != MenuPage::Quit
    }

    /// Continue is only offered while a game exists
    #[inline]
    pub fn can_continue(&self) -> bool {
        self.game.is_some()
    }

    /// Take the UI cues queued since the last call
    pub fn drain_cues(&mut self) -> Vec<UiCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn hover(&mut self) {
        self.cues.push(UiCue::ButtonHover);
    }

    fn change_page(&mut self, page: MenuPage) {
        log::debug!("Page {:?} -> {:?}", self.page, page);
        self.page = page;
        self.cues.push(UiCue::ButtonClick);
        self.cues.push(UiCue::PageChange);
    }

    /// Start over from the configured first level, discarding any game
    pub fn new_game(&mut self) -> Result<(), LevelError> {
        let state = game_init(&self.config, self.config.start_level)?;
        log::info!("New game on level {}", state.current_level);
        self.game = Some(state);
        self.completed = false;
        self.change_page(MenuPage::Game);
        Ok(())
    }

    /// Resume the existing game; false when there is none
    pub fn continue_game(&mut self) -> bool {
        if self.game.is_none() {
            return false;
        }
        self.change_page(MenuPage::Game);
        true
    }

    pub fn open_settings(&mut self) {
        self.change_page(MenuPage::Settings);
    }

    pub fn open_credits(&mut self) {
        self.change_page(MenuPage::Credits);
    }

    /// Back button on the settings and credits pages
    pub fn back_to_menu(&mut self) {
        self.change_page(MenuPage::MainMenu);
    }

    /// Menu key: swap between the game and the main menu
    pub fn toggle_menu(&mut self) {
        match self.page {
            MenuPage::Game => self.change_page(MenuPage::MainMenu),
            MenuPage::MainMenu if self.game.is_some() => self.change_page(MenuPage::Game),
            _ => {}
        }
    }

    pub fn quit(&mut self) {
        self.change_page(MenuPage::Quit);
    }

    /// Step the game, if one is on screen
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        if self.page != MenuPage::Game {
            return;
        }
        if let Some(state) = self.game.as_mut() {
            tick(state, &self.config, input, dt);
        }
    }

    /// What to show over the level, once the ending fade has finished
    pub fn overlay(&self) -> Option<LevelOverlay> {
        if self.completed {
            return Some(LevelOverlay::GameCompleted);
        }
        let state = self.game.as_ref()?;
        if state.time_scale > 0.0 {
            return None;
        }
        match state.level_status {
            LevelStatus::InProgress => None,
            LevelStatus::Lost => Some(LevelOverlay::LevelFailed),
            LevelStatus::Won if state.current_level + 1 >= level_count() => {
                Some(LevelOverlay::GameCompleted)
            }
            LevelStatus::Won => Some(LevelOverlay::LevelComplete),
        }
    }

    /// Load the level after the current one. Running off the end of the
    /// table completes the game instead.
    pub fn next_level(&mut self) {
        let Some(current) = self.game.as_ref().map(|s| s.current_level) else {
            return;
        };
        match game_init(&self.config, current + 1) {
            Ok(state) => {
                self.game = Some(state);
                self.cues.push(UiCue::ButtonClick);
            }
            Err(err) => {
                log::info!("Game completed: {err}");
                self.completed = true;
            }
        }
    }

    /// Reload the current level from scratch
    pub fn retry_level(&mut self) -> Result<(), LevelError> {
        let Some(current) = self.game.as_ref().map(|s| s.current_level) else {
            return Ok(());
        };
        self.game = Some(game_init(&self.config, current)?);
        self.cues.push(UiCue::ButtonClick);
        Ok(())
    }

    /// Leave the completed game for the main menu
    pub fn finish_game(&mut self) {
        self.game = None;
        self.completed = false;
        self.change_page(MenuPage::MainMenu);
    }
}
