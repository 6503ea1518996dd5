//! Settings provider: confidence level and quality defaults from TOML.
//!
//! ```toml
//! [confidence]
//! level = 0.95
//!
//! [quality]
//! min_sample_size = 150
//! max_percent_change = 0.5
//! ```
//!
//! Every key is optional. Validation happens here, at load time; the
//! decision core evaluates whatever thresholds it is given.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ConfidenceThresholds;
use crate::quality::{QualityDefaults, SampleSizeOracle};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfidenceSettings {
    /// Upper cutoff on chance-to-win; the lower cutoff is `1 - level`.
    pub level: f64,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self { level: 0.95 }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub confidence: ConfidenceSettings,
    pub quality: QualityDefaults,
}

impl Settings {
    /// Load and validate settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let level = self.confidence.level;
        if !(level.is_finite() && level > 0.5 && level < 1.0) {
            return Err(SettingsError::Invalid {
                key: "confidence.level",
                reason: format!("{level} is not strictly between 0.5 and 1"),
            });
        }
        check_positive("quality.min_sample_size", self.quality.min_sample_size)?;
        check_positive("quality.max_percent_change", self.quality.max_percent_change)?;
        Ok(())
    }

    pub fn thresholds(&self) -> ConfidenceThresholds {
        ConfidenceThresholds::from_confidence_level(self.confidence.level)
    }

    /// The default quality checks configured by these settings.
    pub fn oracle(&self) -> SampleSizeOracle {
        SampleSizeOracle::new(self.quality)
    }
}

fn check_positive(key: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            key,
            reason: format!("{value} must be a positive number"),
        })
    }
}
