//! Visualizer configuration
//!
//! Defaults match the classroom setup (a 1240x840 window showing
//! `4, 7`). Two environment variables override them:
//!
//! - `DEFORMED_CONFIG`: a JSON object with any of the fields below
//! - `DEFORMED_NOTES`: the starting note counts, e.g. `"3, 5, 8"`

use crate::encoding::{NoteCounts, DEFAULT_MAX_NOTES};
use crate::error::ConfigError;
use crate::view::DEFAULT_MAX_ZOOM;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "DEFORMED_CONFIG";
pub const NOTES_ENV: &str = "DEFORMED_NOTES";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Starting sequence, in the same text form the user types
    pub notes: String,
    pub max_zoom: u32,
    /// Largest band the input accepts
    pub max_notes: u32,
    pub title: String,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            window_width: 620.0 * 2.0,
            window_height: 420.0 * 2.0,
            notes: NoteCounts::default().to_string(),
            max_zoom: DEFAULT_MAX_ZOOM,
            max_notes: DEFAULT_MAX_NOTES,
            title: "deformed music".to_string(),
        }
    }
}

impl VisualizerConfig {
    /// Parse a JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus whatever the environment overrides. Bad overrides are
    /// logged and ignored.
    pub fn from_env() -> Self {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("ignoring {}: {}", CONFIG_ENV, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        if let Ok(notes) = std::env::var(NOTES_ENV) {
            match NoteCounts::parse_with_limit(&notes, config.max_notes) {
                Ok(counts) => config.notes = counts.to_string(),
                Err(e) => log::warn!("ignoring {}: {}", NOTES_ENV, e),
            }
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return Err(ConfigError::InvalidWindow {
                width: self.window_width,
                height: self.window_height,
            });
        }
        self.note_counts()?;
        Ok(())
    }

    pub fn note_counts(&self) -> Result<NoteCounts, ConfigError> {
        Ok(NoteCounts::parse_with_limit(&self.notes, self.max_notes)?)
    }
}
