#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_api_base_url, validate_storage_dir, validate_timeout_seconds, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333/";
pub const DEFAULT_STORAGE_DIR: &str = "./.cart";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Resolved configuration: defaults, then the TOML file, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub storage_dir: String,
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_dir: DEFAULT_STORAGE_DIR.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Settings {
    pub fn merge_toml(mut self, file: TomlConfig) -> Self {
        if let Some(base_url) = file.api.base_url {
            self.api_base_url = base_url;
        }
        if let Some(timeout) = file.api.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(dir) = file.storage.dir {
            self.storage_dir = dir;
        }
        self
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_api_base_url("api.base_url", &self.api_base_url)?;
        validate_storage_dir("storage.dir", &self.storage_dir)?;
        validate_timeout_seconds("api.timeout_seconds", self.timeout_seconds)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn storage_dir(&self) -> &str {
        &self.storage_dir
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
