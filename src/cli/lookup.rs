//! Lookup command handler

use crate::cli::load_config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::{GeoIpClient, LookupOptions, Precision};
use clap::Args;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Lookup command arguments
#[derive(Args)]
pub struct LookupArgs {
    /// IPv4 address in dotted-quad form
    pub ip: String,

    /// Location precision: city or country
    #[arg(long, short = 'p')]
    pub precision: Option<String>,

    /// Include the timezone (city precision only)
    #[arg(long, short = 't')]
    pub timezone: bool,

    /// Output format: json or text
    #[arg(long, short = 'f', default_value = "json")]
    pub format: String,

    /// API key (overrides config file and environment)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Run the lookup command
pub fn run(args: LookupArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(key) = args.api_key {
        config.set_api_key(key);
    }
    if let Some(ms) = args.timeout_ms {
        config.set_request_timeout(Duration::from_millis(ms));
    }

    let options = LookupOptions {
        precision: args
            .precision
            .as_deref()
            .map(str::parse::<Precision>)
            .transpose()?,
        timezone: Some(args.timezone),
    };

    let formatter = get_formatter(&args.format).ok_or_else(|| {
        let known: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
        Error::InvalidOption(format!(
            "Unknown format: {} (expected one of: {})",
            args.format,
            known.join(", ")
        ))
    })?;

    let client = GeoIpClient::new(config)?;
    let result = client.lookup(&args.ip, &options)?;

    if result.is_degraded() {
        warn!(
            "Returning placeholder data for {}: {}",
            args.ip,
            result.status_message.as_str().unwrap_or_default()
        );
    }

    print!("{}", formatter.format(&result)?);
    if args.format.eq_ignore_ascii_case("json") {
        println!();
    }

    Ok(())
}
