use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading review inputs.
///
/// Rule evaluation itself never fails; these only surface from the loaders
/// that turn files and command-line input into a [`crate::ReviewContext`].
#[derive(Debug, Error)]
pub enum PrlintError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: malformed change record '{record}'")]
    ChangeRecord { line: usize, record: String },
}

pub type Result<T> = std::result::Result<T, PrlintError>;
