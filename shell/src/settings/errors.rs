use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or persisting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {path} is not valid JSON: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings store is unavailable: {0}")]
    Unavailable(String),
}
