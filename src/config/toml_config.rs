use crate::utils::error::{CartError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional configuration file. Every field may be left out.
///
/// ```toml
/// [api]
/// base_url = "${SHOP_API_URL}"
/// timeout_seconds = 5
///
/// [storage]
/// dir = "./.cart"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| CartError::Config {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::Config {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
            [api]
            base_url = "http://localhost:3333"
            timeout_seconds = 5

            [storage]
            dir = "/var/lib/cart"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:3333"));
        assert_eq!(config.api.timeout_seconds, Some(5));
        assert_eq!(config.storage.dir.as_deref(), Some("/var/lib/cart"));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("[storage]\ndir = \"x\"\n").unwrap();
        assert!(config.api.base_url.is_none());
        assert_eq!(config.storage.dir.as_deref(), Some("x"));

        assert!(TomlConfig::from_toml_str("").unwrap().storage.dir.is_none());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("CART_SYNC_TEST_API_URL", "https://shop.example.com/api");
        let config = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"${CART_SYNC_TEST_API_URL}\"\n\n[storage]\ndir = \"${CART_SYNC_TEST_UNSET_VAR}\"\n",
        )
        .unwrap();

        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://shop.example.com/api")
        );
        assert_eq!(
            config.storage.dir.as_deref(),
            Some("${CART_SYNC_TEST_UNSET_VAR}")
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[api\nbase_url = 1").unwrap_err();
        assert!(err.to_string().contains("TOML parsing error"));
    }
}
