//! Coordinator configuration
//!
//! Seek nudge constants and placeholder-recognition sentinels. Defaults match
//! the reference integration; deployments override them from a TOML file
//! because the "correct" sentinel values are environment-dependent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sentinels used to recognize a placeholder ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Ad-system tag that marks an interactive placeholder
    pub ad_system: String,

    /// Companion-ad API-framework tag that marks an interactive placeholder
    pub api_framework: String,

    /// Substring an ad description must contain to count as a direct
    /// engagement config URL
    pub config_url_marker: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            ad_system: "interactive.placeholder".to_string(),
            api_framework: "interactive".to_string(),
            config_url_marker: "vast-config".to_string(),
        }
    }
}

/// Top-level coordinator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Pull-back applied to the resume-after-opt-out target so the player
    /// never lands on the placeholder's frozen last frame (milliseconds)
    pub placeholder_exit_backoff_ms: u64,

    /// Push-forward applied to the resume-after-credit target so the player
    /// never lands on a frozen first frame of the next segment (milliseconds)
    pub credit_resume_nudge_ms: u64,

    /// Event bus channel capacity
    pub event_capacity: usize,

    pub recognition: RecognitionConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            placeholder_exit_backoff_ms: 100,
            credit_resume_nudge_ms: 2000,
            event_capacity: 100,
            recognition: RecognitionConfig::default(),
        }
    }
}

impl CoordinatorConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}
