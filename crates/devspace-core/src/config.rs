//! Application configuration management.
//!
//! This module loads and saves the devspace configuration, which covers the
//! remote endpoint, the storage root for cached tunnel credentials, and the
//! naming prefixes used for token files and ssh host aliases.
//!
//! Configuration is stored at `~/.config/devspace/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::CredentialStore;

/// Application name used for config/storage directory paths
const APP_NAME: &str = "devspace";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "DEVSPACE_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "https://api.devspace.dev";

const DEFAULT_TOKEN_PREFIX: &str = "devspace";

const DEFAULT_HOST_NAME_PREFIX: &str = "devspace-";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub endpoint: Option<String>,
    pub storage_root: Option<PathBuf>,
    pub token_prefix: Option<String>,
    pub host_name_prefix: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Remote endpoint, with `DEVSPACE_ENDPOINT` taking precedence
    pub fn endpoint(&self) -> String {
        std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn storage_root(&self) -> Result<PathBuf> {
        if let Some(ref root) = self.storage_root {
            return Ok(root.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn token_prefix(&self) -> &str {
        self.token_prefix.as_deref().unwrap_or(DEFAULT_TOKEN_PREFIX)
    }

    pub fn host_name_prefix(&self) -> &str {
        self.host_name_prefix.as_deref().unwrap_or(DEFAULT_HOST_NAME_PREFIX)
    }

    pub fn credential_store(&self) -> Result<CredentialStore> {
        Ok(CredentialStore::new(self.storage_root()?, self.token_prefix()))
    }
}
