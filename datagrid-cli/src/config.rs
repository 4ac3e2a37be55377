//! Settings file.
//!
//! An optional TOML file supplies defaults that command-line flags override:
//!
//! ```toml
//! [table]
//! per_page = 20
//! sort = "name"
//! descending = false
//! columns = "id:ID,name:Name"
//!
//! [log]
//! level = "info"
//! file = "/tmp/datagrid.log"
//! ```

use std::path::{Path, PathBuf};

use log::{LevelFilter, debug};
use serde::Deserialize;
use thiserror::Error;

use crate::paths;

/// Settings error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid log level '{0}'")]
    LogLevel(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub table: TableSettings,
    pub log: LogSettings,
}

/// Defaults for `datagrid table`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Rows per page
    pub per_page: usize,
    /// Initial sort field
    pub sort: Option<String>,
    /// Initial sort direction
    pub descending: bool,
    /// Column spec, same syntax as `--columns`
    pub columns: Option<String>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            per_page: 10,
            sort: None,
            descending: false,
            columns: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn level_filter(&self) -> Result<Option<LevelFilter>, ConfigError> {
        self.level
            .as_deref()
            .map(|level| {
                level
                    .parse::<LevelFilter>()
                    .map_err(|_| ConfigError::LogLevel(level.to_string()))
            })
            .transpose()
    }
}

impl Settings {
    /// Load `explicit` if given, else the platform settings file if it
    /// exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => match paths::config_file().filter(|path| path.exists()) {
                Some(path) => Self::load_from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("[config] loaded {}", path.display());
        Ok(settings)
    }
}
