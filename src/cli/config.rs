//! Config command handler
//!
//! Shows the effective configuration. Settings are changed by editing the
//! config file or through `GEO_IP_API_KEY`.

use crate::cli::load_config;
use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;
use std::path::Path;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "request_timeout_ms")
    pub key: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    if args.path {
        match config_path {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", Config::config_path()?.display()),
        }
        return Ok(());
    }

    let config = load_config(config_path)?;

    match &args.key {
        None => show_all_config(&config),
        Some(key) => {
            let value = display_value(&config, key).ok_or_else(|| {
                Error::Configuration(format!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::available_keys().join(", ")
                ))
            })?;
            println!("{}", value);
        }
    }

    Ok(())
}

/// Value of a single key as shown to the user, with the API key masked
fn display_value(config: &Config, key: &str) -> Option<String> {
    if key == "api_key" {
        return Some(masked_api_key(config).to_string());
    }
    config.get(key)
}

fn masked_api_key(config: &Config) -> &'static str {
    if config.api_key().is_some() {
        "***"
    } else {
        ""
    }
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    let api_key = masked_api_key(config);
    if api_key.is_empty() {
        println!("api_key = \"\" # not configured");
    } else {
        println!("api_key = \"{}\" # configured", api_key);
    }
    println!("service_host = \"{}\"", config.service_host);
    println!("request_timeout_ms = {}", config.request_timeout_ms);
    println!("fallback_timeout_ms = {} # unused by lookups", config.fallback_timeout_ms);
}
