//! Core configuration trait

use crate::{Result, WaypointError};
use std::path::Path;
use tracing::debug;

/// Prefix for environment variables read by [`WaypointConfig::merge_with_env`]
pub const ENV_PREFIX: &str = "WAYPOINT_";

/// Core trait for Waypoint configuration types
pub trait WaypointConfig: Clone + Default + Send + Sync + 'static {
    /// Keys accepted by [`set_from_string`](Self::set_from_string)
    const KEYS: &'static [&'static str];

    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    fn from_toml_str(content: &str) -> Result<Self>;

    /// Load configuration from a TOML file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WaypointError::storage(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        debug!(path = %path.display(), "loading configuration file");
        Self::from_toml_str(&content)
    }

    /// Set a configuration value from a string (key without prefix, lowercase)
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<()>;

    /// Apply every `WAYPOINT_*` pair naming a known key
    ///
    /// Other keys, including prefixed ones this type does not know, are skipped.
    fn merge_from_pairs<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            let Some(config_key) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let config_key = config_key.to_lowercase();
            if !Self::KEYS.contains(&config_key.as_str()) {
                debug!(key = key.as_ref(), "skipping unrecognized configuration variable");
                continue;
            }
            debug!(key = key.as_ref(), "applying configuration override");
            self.set_from_string(&config_key, value.as_ref())?;
        }
        Ok(())
    }

    /// Merge with environment variables
    fn merge_with_env(&mut self) -> Result<()> {
        self.merge_from_pairs(std::env::vars())
    }

    /// Merge with another configuration; values set in `other` win
    fn merge_with(&mut self, other: &Self) -> Result<()>;

    /// Validate the configuration
    fn validate(&self) -> Result<()>;
}
