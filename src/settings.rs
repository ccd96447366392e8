//! Launch settings
//!
//! Loaded from an optional JSON file; every field has a default so a file only
//! needs the keys it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFEAT_PAUSE_MS, MULTI_SHOT_STEP_DEG, TICK_RATE};
use crate::sim::TickRules;

/// Errors from loading or validating settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for `Settings`
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Ticks per second
    pub tick_rate: u32,
    /// Degrees between beams of a multi-shot fan
    pub multi_shot_step_deg: i32,
    /// Pause on the game-over frame before exiting
    pub defeat_pause_ms: u64,

    // === Headless runner ===
    /// Let the demo AI play
    pub autopilot: bool,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
    /// Log a summary every N ticks (0 = never)
    pub report_every_ticks: u64,
    /// Run as fast as possible instead of at `tick_rate`
    pub unthrottled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: TICK_RATE,
            multi_shot_step_deg: MULTI_SHOT_STEP_DEG,
            defeat_pause_ms: DEFEAT_PAUSE_MS,

            autopilot: true,
            max_ticks: None,
            report_every_ticks: u64::from(TICK_RATE) * 10,
            unthrottled: false,
        }
    }
}

impl Settings {
    /// Read and validate a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_rate == 0 {
            return Err(SettingsError::Invalid {
                field: "tick_rate",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=100).contains(&self.multi_shot_step_deg) {
            return Err(SettingsError::Invalid {
                field: "multi_shot_step_deg",
                reason: format!("{} is outside 1..=100", self.multi_shot_step_deg),
            });
        }
        Ok(())
    }

    /// Frame rate for the limiter (0 = unpaced)
    pub fn frame_rate(&self) -> u32 {
        if self.unthrottled { 0 } else { self.tick_rate }
    }

    pub fn defeat_pause(&self) -> Duration {
        Duration::from_millis(self.defeat_pause_ms)
    }

    /// Rules handed to every simulation tick
    pub fn rules(&self) -> TickRules {
        TickRules {
            multi_shot_step_deg: self.multi_shot_step_deg,
        }
    }
}
