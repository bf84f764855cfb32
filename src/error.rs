use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Please set NAMES_INPUT and either GRAFANA_ or SMARTHOME_JSONDB_ INPUT and OUTPUT.")]
    MissingNamesInput,

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line_number}: invalid line '{line}', expected MAC=name", path.display())]
    MalformedNameLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("{}: invalid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {reason}", path.display())]
    UnexpectedShape { path: PathBuf, reason: String },

    /// An item already in the database differs from the one we would generate.
    #[error("item {key} already exists with a different value: expected {expected}, found {actual}")]
    ItemConflict {
        key: String,
        expected: Value,
        actual: Value,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Attaches a file path to errors raised while working on in-memory text or models.
    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::UnexpectedShape { reason, .. } => Error::UnexpectedShape {
                path: path.into(),
                reason,
            },
            Error::MalformedNameLine {
                line_number,
                line,
                ..
            } => Error::MalformedNameLine {
                path: path.into(),
                line_number,
                line,
            },
            other => other,
        }
    }
}
