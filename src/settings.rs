//! Game settings and preferences
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::DEFAULT_RESUME_DELAY_MS;
use crate::tuning::Tuning;

/// Why a settings file could not be used
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Parsed, but the tuning would stall the simulation
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "could not read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {e}"),
            SettingsError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,

    // === Controls ===
    /// Pause button touch target in screen space
    pub pause_button: Rect,
    /// Delay between leaving the pause menu and play resuming
    pub resume_delay_ms: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    /// Fixed run seed; a time-based seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),

            pause_button: Rect::new(30.0, 30.0, 150.0, 150.0),
            resume_delay_ms: DEFAULT_RESUME_DELAY_MS,

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.5,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate the tuning
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.tuning.validate().map_err(SettingsError::Invalid)?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_layout() {
        let settings = Settings::default();
        assert_eq!(settings.pause_button, Rect::new(30.0, 30.0, 150.0, 150.0));
        assert_eq!(settings.resume_delay_ms, 2000);
        assert_eq!(settings.effective_music_volume(), 0.5);
    }

    #[test]
    fn nested_partial_json() {
        let settings =
            Settings::from_json(r#"{ "seed": 12, "tuning": { "max_move_speed": 8.0 } }"#).unwrap();
        assert_eq!(settings.seed, Some(12));
        assert_eq!(settings.tuning.max_move_speed, 8.0);
        assert_eq!(settings.tuning.friction, 0.9);
        assert_eq!(settings.resume_delay_ms, 2000);
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn zero_platform_gaps_are_rejected() {
        let json =
            r#"{ "tuning": { "min_platform_distance": 0.0, "max_platform_distance": 0.0 } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn invalid_tuning_file_falls_back_to_defaults() {
        let name = format!("sky-hop-invalid-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, r#"{ "seed": 4, "tuning": { "frontier_lookahead": -5.0 } }"#)
            .unwrap();
        let settings = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load("/definitely/not/here/sky-hop.json");
        assert_eq!(settings, Settings::default());
    }
}
