//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$GITWALK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitwalk/config.toml`
//! 3. `~/.gitwalk/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitwalk::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("across filesystems: {}", config.across_filesystems());
//! for dir in config.ceiling_directories() {
//!     println!("ceiling: {}", dir);
//! }
//! ```

pub mod schema;

pub use schema::{DiscoverDefaults, GlobalConfig, OutputDefaults};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GITWALK_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration
    pub global: GlobalConfig,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed or
    /// validated. A missing config file is not an error (defaults are used).
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global: GlobalConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        global.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Config {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        // 1. Check $GITWALK_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/gitwalk/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitwalk/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.gitwalk/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".gitwalk/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Whether discovery crosses filesystem boundaries.
    ///
    /// Defaults to `false` if not configured.
    pub fn across_filesystems(&self) -> bool {
        self.global
            .discover
            .as_ref()
            .and_then(|d| d.across_filesystems)
            .unwrap_or(false)
    }

    /// Configured ceiling directories, as written (paths or URLs).
    pub fn ceiling_directories(&self) -> &[String] {
        self.global
            .discover
            .as_ref()
            .and_then(|d| d.ceiling_directories.as_deref())
            .unwrap_or(&[])
    }

    /// Whether output should be JSON by default.
    ///
    /// Defaults to `false` if not configured.
    pub fn json(&self) -> bool {
        self.global
            .output
            .as_ref()
            .and_then(|o| o.json)
            .unwrap_or(false)
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
