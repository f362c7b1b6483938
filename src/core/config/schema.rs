//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$GITWALK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitwalk/config.toml`
//! 3. `~/.gitwalk/config.toml`
//!
//! # Validation
//!
//! Config values are validated after parsing. Unknown fields are rejected.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// [discover]
/// across_filesystems = false
/// ceiling_directories = ["/home", "file:///srv"]
///
/// [output]
/// json = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Discovery defaults
    pub discover: Option<DiscoverDefaults>,

    /// Output defaults
    pub output: Option<OutputDefaults>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(discover) = &self.discover {
            discover.validate()?;
        }
        Ok(())
    }
}

/// Discover command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoverDefaults {
    /// Keep walking when a filesystem boundary is crossed
    pub across_filesystems: Option<bool>,

    /// Ceiling directories, as paths or `file:` URLs
    pub ceiling_directories: Option<Vec<String>>,
}

impl DiscoverDefaults {
    /// Validate the discover defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dirs) = &self.ceiling_directories {
            if dirs.iter().any(|d| d.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(
                    "ceiling directory cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Output defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputDefaults {
    /// Print machine-readable JSON
    pub json: Option<bool>,
}
