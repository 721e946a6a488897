//! User settings and preferences
//!
//! Persisted as JSON next to the game, separately from the simulation tunables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Random pitch spread for gameplay cues (0.1 = +/-10%)
    pub pitch_variance: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Camera shake on impacts
    pub screen_shake: bool,
    /// Drifting remains of lost balls and broken blocks
    pub death_effects: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no death effects)
    pub reduced_motion: bool,
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            pitch_variance: 0.1,
            muted: false,

            screen_shake: true,
            death_effects: true,

            show_fps: false,

            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Effective sound effect gain, 0 when muted
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective death effects (respects reduced_motion)
    pub fn effective_death_effects(&self) -> bool {
        self.death_effects && !self.reduced_motion
    }

    /// Clamp values edited by hand back into range
    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.pitch_variance = self.pitch_variance.clamp(0.0, 0.5);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_reduced_motion_overrides_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_death_effects());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "sfx_volume": 0.5, "show_fps": true }"#)
            .expect("valid settings");
        assert_eq!(settings.sfx_volume, 0.5);
        assert!(settings.show_fps);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.0, "pitch_variance": -1.0 }"#)
            .expect("valid settings");
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.pitch_variance, 0.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load("/nonexistent/winds-of-change/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("woc-settings-{}.json", std::process::id()));
        let settings = Settings {
            music_volume: 0.25,
            high_contrast: true,
            ..Settings::default()
        };
        settings.save(&path).expect("save settings");
        let loaded = Settings::try_load(&path).expect("reload settings");
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
