//! Configuration management
//!
//! A [`Config`] is a plain value handed to each client. It can be built in
//! code, or read from `~/.config/geo-ip/config.toml`. Nothing is ever written
//! back to disk.

pub mod defaults;

use crate::constants::api::SERVICE_HOST;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// IPInfoDB API key, required before the first lookup
    #[serde(default)]
    pub api_key: Option<String>,

    /// Host serving the `/v3/ip-*` endpoints
    #[serde(default = "default_service_host")]
    pub service_host: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Fallback timeout in milliseconds
    #[serde(default = "default_fallback_timeout_ms")]
    pub fallback_timeout_ms: u64,
}

fn default_service_host() -> String {
    SERVICE_HOST.to_string()
}
fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}
fn default_fallback_timeout_ms() -> u64 {
    DEFAULT_FALLBACK_TIMEOUT_MS
}

/// Whole milliseconds, rounding a partial millisecond up and saturating at `u64::MAX`
fn duration_to_millis(duration: Duration) -> u64 {
    let millis = duration.as_millis() + u128::from(duration.subsec_nanos() % 1_000_000 != 0);
    u64::try_from(millis).unwrap_or(u64::MAX)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            service_host: default_service_host(),
            request_timeout_ms: default_request_timeout_ms(),
            fallback_timeout_ms: default_fallback_timeout_ms(),
        }
    }
}

impl Config {
    /// Create a default config carrying the given API key
    pub fn with_api_key(key: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.set_api_key(key);
        config
    }

    /// Configured API key, if any
    ///
    /// An empty key counts as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(key.into());
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Set the request timeout. Any value is accepted, including zero.
    pub fn set_request_timeout(&mut self, timeout: Duration) {
        self.request_timeout_ms = duration_to_millis(timeout);
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }

    /// Set the fallback timeout. Kept for compatibility; lookups never read it.
    pub fn set_fallback_timeout(&mut self, timeout: Duration) {
        self.fallback_timeout_ms = duration_to_millis(timeout);
    }

    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| {
                Error::Configuration("Could not determine config directory".to_string())
            })
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path, then apply the environment
    ///
    /// Falls back to defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Config::default()
        };
        config.apply_env();

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        toml::from_str(&content).map_err(|e| {
            Error::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Override the API key from `GEO_IP_API_KEY` when it is set
    pub fn apply_env(&mut self) {
        self.apply_api_key_override(std::env::var(API_KEY_ENV_VAR).ok());
    }

    fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_key" => Some(self.api_key.clone().unwrap_or_default()),
            "service_host" => Some(self.service_host.clone()),
            "request_timeout_ms" => Some(self.request_timeout_ms.to_string()),
            "fallback_timeout_ms" => Some(self.fallback_timeout_ms.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_key" => self.set_api_key(value),
            "service_host" => self.service_host = value.to_string(),
            "request_timeout_ms" => {
                self.request_timeout_ms = value.parse().map_err(|_| {
                    Error::Configuration(format!("Invalid timeout value: {}", value))
                })?;
            }
            "fallback_timeout_ms" => {
                self.fallback_timeout_ms = value.parse().map_err(|_| {
                    Error::Configuration(format!("Invalid timeout value: {}", value))
                })?;
            }
            _ => {
                return Err(Error::Configuration(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api_key",
            "service_host",
            "request_timeout_ms",
            "fallback_timeout_ms",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.api_key().is_none());
        assert_eq!(config.service_host, "api.ipinfodb.com");
        assert_eq!(config.request_timeout(), Duration::from_millis(1));
        assert_eq!(config.fallback_timeout(), Duration::from_millis(3));
    }

    #[test]
    fn test_accessors() {
        let mut config = Config::default();

        config.set_api_key("ABC");
        assert_eq!(config.api_key(), Some("ABC"));

        config.set_request_timeout(Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Duration::from_millis(250));

        config.set_fallback_timeout(Duration::ZERO);
        assert_eq!(config.fallback_timeout(), Duration::ZERO);
    }

    #[test]
    fn test_timeout_conversion() {
        let mut config = Config::default();

        config.set_request_timeout(Duration::from_micros(1500));
        assert_eq!(config.request_timeout_ms, 2);

        config.set_request_timeout(Duration::from_nanos(1));
        assert_eq!(config.request_timeout_ms, 1);

        config.set_fallback_timeout(Duration::MAX);
        assert_eq!(config.fallback_timeout_ms, u64::MAX);

        config.set_fallback_timeout(Duration::from_secs(2));
        assert_eq!(config.fallback_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_empty_api_key_is_unset() {
        let config = Config::with_api_key("");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("api_key"), Some(String::new()));

        config.set("api_key", "secret").unwrap();
        assert_eq!(config.get("api_key"), Some("secret".to_string()));

        config.set("request_timeout_ms", "5000").unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        let result = config.set("invalid.key", "value");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        let result = config.set("request_timeout_ms", "soon");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_key = \"XYZ\"\nrequest_timeout_ms = 200\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key(), Some("XYZ"));
        assert_eq!(config.request_timeout(), Duration::from_millis(200));
        // Unspecified keys fall back to defaults
        assert_eq!(config.service_host, "api.ipinfodb.com");
        assert_eq!(config.fallback_timeout_ms, 3);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "request_timeout_ms = \"fast\"").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from(&temp_dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_api_key_override() {
        let mut config = Config::with_api_key("from-file");

        config.apply_api_key_override(None);
        assert_eq!(config.api_key(), Some("from-file"));

        config.apply_api_key_override(Some(String::new()));
        assert_eq!(config.api_key(), Some("from-file"));

        config.apply_api_key_override(Some("from-env".to_string()));
        assert_eq!(config.api_key(), Some("from-env"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::with_api_key("ABC");
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_available_keys() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }
}
