//! # Application Configuration
//!
//! Where the database and the log file live.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --db PATH  --log-file PATH                                         │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     COFFEE_DB_PATH=/srv/coffee.db                                      │
//! │     COFFEE_LOG_PATH=/var/log/coffee_shop.log                           │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/coffee-pos/config.toml (Linux)                           │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     <data dir>/coffee.db, <data dir>/coffee_shop.log                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! database_path = "/srv/coffee/coffee.db"
//! log_path = "/srv/coffee/coffee_shop.log"
//! ```

use coffee_db::default_data_dir;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub use coffee_db::DB_FILE;

/// Log file name inside the data directory.
pub const LOG_FILE: &str = "coffee_shop.log";

/// Config file name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

pub const ENV_DB_PATH: &str = "COFFEE_DB_PATH";
pub const ENV_LOG_PATH: &str = "COFFEE_LOG_PATH";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_path: PathBuf,
}

/// What a config file may set. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

/// Command-line inputs to configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    /// Both files inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        AppConfig {
            database_path: dir.join(DB_FILE),
            log_path: dir.join(LOG_FILE),
        }
    }

    /// Both files in the shared data directory, where `seed` also writes.
    pub fn platform_default() -> Self {
        Self::in_dir(&default_data_dir())
    }

    /// `<config dir>/config.toml`, if the platform has a config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "coffee", "pos").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Loads configuration from all sources.
    ///
    /// An explicit `--config` file must exist; the default one is optional.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_with(overrides, Self::platform_default(), |key| {
            std::env::var_os(key).map(PathBuf::from)
        })
    }

    fn load_with(
        overrides: &ConfigOverrides,
        defaults: AppConfig,
        env: impl Fn(&str) -> Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = defaults;

        match &overrides.config_file {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.clone())),
            Some(path) => config.apply_file(path)?,
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
                    config.apply_file(&path)?;
                }
            }
        }

        if let Some(path) = env(ENV_DB_PATH) {
            config.database_path = path;
        }
        if let Some(path) = env(ENV_LOG_PATH) {
            config.log_path = path;
        }

        if let Some(path) = &overrides.database_path {
            config.database_path = path.clone();
        }
        if let Some(path) = &overrides.log_path {
            config.log_path = path.clone();
        }

        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        debug!(path = %path.display(), "Loading config file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(db) = file.database_path {
            self.database_path = db;
        }
        if let Some(log) = file.log_path {
            self.log_path = log;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<PathBuf> {
        None
    }

    #[test]
    fn test_defaults_live_in_one_dir() {
        let config = AppConfig::in_dir(Path::new("/data"));
        assert_eq!(config.database_path, PathBuf::from("/data/coffee.db"));
        assert_eq!(config.log_path, PathBuf::from("/data/coffee_shop.log"));
    }

    #[test]
    fn test_platform_default_matches_seed_default() {
        let config = AppConfig::platform_default();
        assert_eq!(config.database_path, coffee_db::default_database_path());
        assert_eq!(config.log_path.parent(), Some(coffee_db::default_data_dir().as_path()));
    }

    #[test]
    fn test_layering_order() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.toml");
        fs::write(&file, "database_path = \"/file/coffee.db\"\nlog_path = \"/file/log\"\n").unwrap();

        let defaults = AppConfig::in_dir(Path::new("/defaults"));
        let mut overrides = ConfigOverrides {
            config_file: Some(file),
            ..ConfigOverrides::default()
        };

        // file beats defaults
        let config = AppConfig::load_with(&overrides, defaults.clone(), no_env).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/file/coffee.db"));
        assert_eq!(config.log_path, PathBuf::from("/file/log"));

        // env beats file
        let env = |key: &str| (key == ENV_DB_PATH).then(|| PathBuf::from("/env/coffee.db"));
        let config = AppConfig::load_with(&overrides, defaults.clone(), env).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/env/coffee.db"));
        assert_eq!(config.log_path, PathBuf::from("/file/log"));

        // flags beat env
        overrides.database_path = Some(PathBuf::from("/flag/coffee.db"));
        let config = AppConfig::load_with(&overrides, defaults, env).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/flag/coffee.db"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.toml");
        fs::write(&file, "log_path = \"/only/log\"\n").unwrap();

        let overrides = ConfigOverrides {
            config_file: Some(file),
            ..ConfigOverrides::default()
        };
        let defaults = AppConfig::in_dir(Path::new("/defaults"));
        let config = AppConfig::load_with(&overrides, defaults, no_env).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/defaults/coffee.db"));
        assert_eq!(config.log_path, PathBuf::from("/only/log"));
    }

    #[test]
    fn test_bad_config_files() {
        let temp = TempDir::new().unwrap();
        let defaults = AppConfig::in_dir(temp.path());

        let missing = ConfigOverrides {
            config_file: Some(temp.path().join("nope.toml")),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            AppConfig::load_with(&missing, defaults.clone(), no_env),
            Err(ConfigError::NotFound(_))
        ));

        let file = temp.path().join("bad.toml");
        fs::write(&file, "colour = \"blue\"\n").unwrap();
        let unknown_key = ConfigOverrides {
            config_file: Some(file),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            AppConfig::load_with(&unknown_key, defaults, no_env),
            Err(ConfigError::Parse { .. })
        ));
    }
}
