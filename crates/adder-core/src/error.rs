//! Errors raised while declaring or applying a preset

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the preset engine.
///
/// The engine never retries or recovers; every variant propagates to the caller.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Configuration option '{0}' is declared more than once")]
    DuplicateOption(String),

    #[error("Dependency '{dependency}' relies on unknown configuration option '{option}'")]
    UnknownOption { dependency: String, option: String },

    #[error("Dependency '{dependency}' has an empty version range '{range}'")]
    InvalidVersionRange { dependency: String, range: String },

    #[error("Invalid value for option '{key}': expected {expected}")]
    InvalidOptionValue { key: String, expected: &'static str },

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Failed to parse JSON in {}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at the top level of {}", path.display())]
    NotAnObject { path: PathBuf },

    #[error("No package.json found in {}", dir.display())]
    ManifestNotFound { dir: PathBuf },

    #[error("Failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt failed")]
    Prompt(#[source] std::io::Error),
}

impl PresetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PresetError>;
