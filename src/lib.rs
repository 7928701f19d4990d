//! geo-ip: IPv4 geolocation client
//!
//! Looks up the approximate location of an IPv4 address through the IPInfoDB
//! web service and normalizes the answer into a [`LocationResult`].
//!
//! ## Behavior
//!
//! - Strict dotted-quad validation before any network activity
//! - `city` (default) or `country` precision, with an optional timezone
//! - One blocking request per lookup, bounded by the configured timeout
//! - Timeouts and transport failures yield placeholder records instead of errors
//!
//! ## Quick Start
//!
//! ```no_run
//! use geo_ip::{Config, GeoIpClient, LookupOptions, Precision};
//!
//! let client = GeoIpClient::new(Config::with_api_key("YOUR_KEY")).unwrap();
//! let options = LookupOptions::new().precision(Precision::City).timezone(true);
//!
//! let location = client.lookup("209.85.227.104", &options).unwrap();
//! if location.is_degraded() {
//!     eprintln!("lookup failed: {}", location.status_message);
//! }
//! println!("{:?}", location.city);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{GeoIpClient, LocationResult, LookupOptions, Precision};
