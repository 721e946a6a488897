//! Audio cue policy
//!
//! Turns simulation events and UI cues into play requests. Device output is
//! the platform layer's job; this module only decides what to play, how loud
//! and at which pitch.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::session::UiCue;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball launched from the paddle
    BallSent,
    /// Wind gust started
    Wind,
    /// Ricochet field charging
    RicochetCharge,
    /// Ricochet field fired
    RicochetRelease,
    /// Ball hits a breakable block
    WallImpact,
    /// Ball hits an indestructible block
    IndestructibleImpact,
    /// Ball hits the paddle
    PaddleImpact,
    /// Ball left the world
    BallDisappear,
    /// Block destroyed
    EnemyDisappear,
    /// Enemy shot hit the paddle
    PlayerHit,
    LevelWon,
    LevelLost,
    UiHover,
    UiClick,
    PageChange,
}

impl SoundEffect {
    /// Cue for a simulation event
    pub fn from_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::BallSent => SoundEffect::BallSent,
            GameEvent::WindActivated { .. } => SoundEffect::Wind,
            GameEvent::RicochetStarted => SoundEffect::RicochetCharge,
            GameEvent::RicochetReleased { .. } => SoundEffect::RicochetRelease,
            GameEvent::WallHit => SoundEffect::WallImpact,
            GameEvent::IndestructibleHit => SoundEffect::IndestructibleImpact,
            GameEvent::PaddleHit => SoundEffect::PaddleImpact,
            GameEvent::BallDisappeared { .. } => SoundEffect::BallDisappear,
            GameEvent::EnemyDestroyed { .. } => SoundEffect::EnemyDisappear,
            GameEvent::PlayerHit => SoundEffect::PlayerHit,
            GameEvent::LevelWon => SoundEffect::LevelWon,
            GameEvent::LevelLost => SoundEffect::LevelLost,
        }
    }

    pub fn from_ui(cue: UiCue) -> Self {
        match cue {
            UiCue::ButtonHover => SoundEffect::UiHover,
            UiCue::ButtonClick => SoundEffect::UiClick,
            UiCue::PageChange => SoundEffect::PageChange,
        }
    }

    /// Mix level before user volume is applied
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::WallImpact | SoundEffect::IndestructibleImpact => 0.6,
            SoundEffect::PaddleImpact => 0.5,
            SoundEffect::UiHover => 0.3,
            SoundEffect::UiClick | SoundEffect::PageChange => 0.5,
            SoundEffect::LevelWon | SoundEffect::LevelLost => 1.0,
            _ => 0.8,
        }
    }

    /// Interface and jingle cues always play at their authored pitch
    pub fn varies_pitch(self) -> bool {
        !matches!(
            self,
            SoundEffect::UiHover
                | SoundEffect::UiClick
                | SoundEffect::PageChange
                | SoundEffect::LevelWon
                | SoundEffect::LevelLost
        )
    }
}

/// A sound the platform layer should start
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayRequest {
    pub effect: SoundEffect,
    /// Final gain (0.0 - 1.0)
    pub volume: f32,
    /// Playback rate, 1.0 = authored pitch
    pub pitch: f32,
}

/// Picks volume and pitch for each cue
#[derive(Debug, Clone)]
pub struct AudioCues {
    rng: Pcg32,
    volume: f32,
    pitch_variance: f32,
}

impl AudioCues {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            volume: settings.effective_sfx_volume(),
            pitch_variance: settings.pitch_variance,
        }
    }

    /// Pick up changed settings without reseeding
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_sfx_volume();
        self.pitch_variance = settings.pitch_variance;
    }

    /// Request for one effect, or None when it would be silent
    pub fn play(&mut self, effect: SoundEffect) -> Option<PlayRequest> {
        let volume = self.volume * effect.base_volume();
        if volume <= 0.0 {
            return None;
        }

        let pitch = if effect.varies_pitch() && self.pitch_variance > 0.0 {
            1.0 + self
                .rng
                .random_range(-self.pitch_variance..=self.pitch_variance)
        } else {
            1.0
        };

        Some(PlayRequest {
            effect,
            volume,
            pitch,
        })
    }

    /// Requests for one step's events, in event order
    pub fn for_events(&mut self, events: &[GameEvent]) -> Vec<PlayRequest> {
        events
            .iter()
            .filter_map(|e| self.play(SoundEffect::from_event(e)))
            .collect()
    }

    pub fn for_ui(&mut self, cues: &[UiCue]) -> Vec<PlayRequest> {
        cues.iter()
            .filter_map(|c| self.play(SoundEffect::from_ui(*c)))
            .collect()
    }
}
