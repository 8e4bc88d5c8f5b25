//! Runtime configuration. Every value has a sensible default so the app runs
//! with zero setup; environment variables only exist to point it at another
//! database or a local mock of the beer API.

use std::env;
use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::ConfigError;
use crate::source::DEFAULT_ENDPOINT;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".beer-cellar";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "beers.sqlite";
/// Log folder inside the application data directory.
const LOG_DIR_NAME: &str = "logs";

pub const DB_PATH_VAR: &str = "BEER_CELLAR_DB";
pub const ENDPOINT_VAR: &str = "BEER_CELLAR_ENDPOINT";
pub const LOG_DIR_VAR: &str = "BEER_CELLAR_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub endpoint: String,
    pub log_dir: PathBuf,
}

impl Config {
    /// Defaults rooted at `data_dir`.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join(DB_FILE_NAME),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_dir: data_dir.join(LOG_DIR_NAME),
        }
    }

    /// Defaults under `~/.beer-cellar`, then the `BEER_CELLAR_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
        let config = Self::with_data_dir(base_dirs.home_dir().join(DATA_DIR_NAME));
        config.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Blank values count as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = get(DB_PATH_VAR) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(dir) = get(LOG_DIR_VAR) {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(endpoint) = get(ENDPOINT_VAR) {
            let endpoint = endpoint.trim().to_string();
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidEndpoint(endpoint));
            }
            self.endpoint = endpoint;
        }

        Ok(self)
    }
}
