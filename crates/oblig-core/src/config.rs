//! Engine configuration
//!
//! ```toml
//! [generator]
//! rule_policy = "skip"   # or "abort"
//!
//! [scoring]
//! scoring_window_days = 365
//! recent_window_days = 30
//! week_days = 7
//! month_days = 30
//! ```

use crate::error::ConfigError;
use oblig_scheduler::GeneratorConfig;
use oblig_scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for generator and scorer; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Generator settings
    pub generator: GeneratorConfig,
    /// Scoring settings
    pub scoring: ScoringConfig,
}

impl EngineConfig {
    /// Parse from TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on malformed TOML or unknown enum values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`] if it
    /// is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
