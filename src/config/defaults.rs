//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 1;

/// Default fallback timeout in milliseconds (accepted, never used by lookups)
pub const DEFAULT_FALLBACK_TIMEOUT_MS: u64 = 3;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV_VAR: &str = "GEO_IP_API_KEY";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geo-ip";
