//! Error types for the compliance service
//!
//! Provides error handling for:
//! - Storage backends behind the ports
//! - Catalog loading
//! - Engine configuration
//! - Service calls, wrapping all of the above

use oblig_model::{TaskId, UserId};
use oblig_scheduler::GenerateError;
use std::path::PathBuf;

/// Main service error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No business profile stored for the user
    #[error("profile not found for user {0}")]
    ProfileNotFound(UserId),

    /// Generation rejected the request
    #[error("generation failed: {0}")]
    Generate(#[from] GenerateError),

    /// Storage port failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Catalog could not be loaded
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Error caused by the request (bad window, unknown template or user)
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        match self {
            Self::ProfileNotFound(_) => true,
            Self::Generate(err) => err.is_caller_error(),
            Self::Store(_) | Self::Catalog(_) | Self::Config(_) => false,
        }
    }
}

/// Storage port errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Task id unknown for this user
    #[error("task {task} not found for user {user}")]
    TaskNotFound { user: UserId, task: TaskId },

    /// Backend failure
    #[error("backend error: {0}")]
    Backend(String),
}

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is neither YAML nor JSON
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Malformed YAML document
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed JSON document
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
