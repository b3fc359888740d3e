//! Global moncal configuration.

use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{MoncalError, MoncalResult};

static DEFAULT_STORE_URL: &str = "http://localhost:54321";

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

/// Global configuration at ~/.config/moncal/config.toml
///
/// `store_url` is the root of the hosted store; the REST interface lives
/// under `{store_url}/rest/v1` and the auth endpoints under
/// `{store_url}/auth/v1`. `anon_key` is the public API key sent with every
/// request alongside the session's bearer token.
#[derive(Serialize, Deserialize, Clone)]
pub struct MoncalConfig {
    #[serde(default = "default_store_url")]
    pub store_url: String,

    #[serde(default)]
    pub anon_key: String,
}

impl MoncalConfig {
    pub fn config_path() -> MoncalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MoncalError::Config("Could not determine config directory".into()))?
            .join("moncal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first run.
    pub fn load() -> MoncalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: MoncalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| MoncalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MoncalError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> MoncalResult<()> {
        let contents = format!(
            "\
# moncal configuration

# Root URL of the hosted store (REST and auth endpoints live under it):
# store_url = \"{}\"

# Public API key for the store:
# anon_key = \"\"
",
            DEFAULT_STORE_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MoncalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MoncalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.store_url.trim_end_matches('/'))
    }

    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.store_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_roots_drop_trailing_slashes() {
        let config = MoncalConfig {
            store_url: "https://store.example.com/".to_string(),
            anon_key: String::new(),
        };

        assert_eq!(config.rest_url(), "https://store.example.com/rest/v1");
        assert_eq!(config.auth_url(), "https://store.example.com/auth/v1");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: MoncalConfig = toml::from_str("").unwrap();
        assert_eq!(config.store_url, DEFAULT_STORE_URL);
        assert!(config.anon_key.is_empty());
    }
}
