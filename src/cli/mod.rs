//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod lookup;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// IPv4 geolocation via IPInfoDB
#[derive(Parser)]
#[command(name = "geo-ip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the location of an IPv4 address
    Lookup(lookup::LookupArgs),

    /// Show the effective configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with lookup output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lookup(args) => lookup::run(args, cli.config_file.as_deref()),
        Commands::Config(args) => config::run(args, cli.config_file.as_deref()),
    }
}

/// Load the config file given on the command line, or the default one
pub(crate) fn load_config(path: Option<&std::path::Path>) -> crate::error::Result<crate::Config> {
    match path {
        Some(path) => {
            let mut config = crate::Config::load_from(path)?;
            config.apply_env();
            Ok(config)
        }
        None => crate::Config::load(),
    }
}
