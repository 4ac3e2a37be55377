//! CLI error types.

use std::path::PathBuf;

use datagrid_lib::error::LocationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Anything that makes a command exit non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a JSON array of objects: {source}", path.display())]
    Rows {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid filter pair '{0}', expected KEY=VALUE")]
    InvalidPair(String),

    #[error("invalid column spec '{0}', expected key[:Label]")]
    InvalidColumn(String),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Location(#[from] LocationError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn rows(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Rows {
            path: path.into(),
            source,
        }
    }
}
