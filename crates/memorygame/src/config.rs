//! Configuration management for memorygame.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::board::BoardSize;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "memorygame";

/// Default database file name for the local document store.
const DATABASE_FILE_NAME: &str = "boards.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `MEMORYGAME_`, `__` between levels)
/// 2. TOML config file at `~/.config/memorygame/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gameplay configuration.
    pub game: GameConfig,
    /// Custom board document store configuration.
    pub store: StoreConfig,
}

/// Gameplay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Difficulty used when a session starts.
    pub default_difficulty: BoardSize,
    /// Fixed shuffle seed. Unset means a fresh random deal each game.
    pub seed: Option<u64>,
    /// Colour the pairs counter by progress using ANSI escapes. Only applies
    /// when stdout is a terminal.
    pub color: bool,
}

/// Which document store holds custom boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Remote REST document store.
    #[default]
    Http,
    /// Local `SQLite` database.
    Sqlite,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend to use.
    pub backend: StoreBackend,
    /// Base URL of the remote document store.
    pub base_url: String,
    /// Bearer token sent to the remote store, if any.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Collection holding custom board documents.
    pub collection: String,
    /// Path to the local database file.
    /// Defaults to `~/.local/share/memorygame/boards.db`
    pub database_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_difficulty: BoardSize::Medium,
            seed: None,
            color: true,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Http,
            base_url: "http://localhost:8080/v1".to_string(),
            api_key: None,
            timeout_secs: 10,
            collection: "games".to_string(),
            database_path: None, // Will be resolved to default at runtime
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("MEMORYGAME_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.store.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.store.collection.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "collection must not be empty".to_string(),
            });
        }

        if self.store.backend == StoreBackend::Http {
            match reqwest::Url::parse(&self.store.base_url) {
                Err(e) => {
                    return Err(Error::ConfigValidation {
                        message: format!("invalid base_url '{}': {e}", self.store.base_url),
                    });
                }
                Ok(url) if url.cannot_be_a_base() => {
                    return Err(Error::ConfigValidation {
                        message: format!(
                            "base_url '{}' cannot hold document paths",
                            self.store.base_url
                        ),
                    });
                }
                Ok(_) => {}
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.store
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.store.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.game.default_difficulty, BoardSize::Medium);
        assert!(config.game.seed.is_none());
        assert!(config.game.color);
        assert_eq!(config.store.backend, StoreBackend::Http);
        assert_eq!(config.store.collection, "games");
    }

    #[test]
    fn test_default_store_config() {
        let store = StoreConfig::default();

        assert!(store.database_path.is_none());
        assert!(store.api_key.is_none());
        assert_eq!(store.timeout_secs, 10);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.store.timeout_secs = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("timeout_secs"));
    }

    #[test]
    fn test_validate_empty_collection() {
        let mut config = Config::default();
        config.store.collection = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("collection"));
    }

    #[test]
    fn test_validate_bad_base_url() {
        let mut config = Config::default();
        config.store.base_url = "not a url".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("base_url"));
    }

    #[test]
    fn test_validate_base_url_without_path() {
        let mut config = Config::default();
        config.store.base_url = "mailto:someone".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("cannot hold document paths"));
    }

    #[test]
    fn test_bad_base_url_ignored_for_sqlite() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Sqlite;
        config.store.base_url = "not a url".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("boards.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.store.database_path = Some(PathBuf::from("/custom/path/boards.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/boards.sqlite")
        );
    }

    #[test]
    fn test_request_timeout() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("memorygame"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[game]
default_difficulty = "hard"
seed = 42

[store]
backend = "sqlite"
collection = "boards"
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.game.default_difficulty, BoardSize::Hard);
        assert_eq!(config.game.seed, Some(42));
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.store.collection, "boards");
        assert_eq!(config.store.timeout_secs, 10);
    }

    #[test]
    fn test_load_invalid_toml_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[game]\ndefault_difficulty = \"extreme\"").unwrap();

        let result = Config::load_from(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(Error::ConfigLoad(_))));
    }

    #[test]
    fn test_store_backend_display() {
        assert_eq!(StoreBackend::Http.to_string(), "http");
        assert_eq!(StoreBackend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("default_difficulty"));
        assert!(json.contains("\"medium\""));
        assert!(json.contains("timeout_secs"));
    }
}
