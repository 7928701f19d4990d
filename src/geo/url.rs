//! Lookup URL construction
//!
//! Validates the IP address and assembles the IPInfoDB request URL.

use crate::config::Config;
use crate::constants::api::{ENDPOINT_PREFIX, RESPONSE_FORMAT};
use crate::error::{Error, Result};
use crate::geo::options::LookupOptions;
use regex::Regex;
use std::sync::LazyLock;

/// Dotted-quad IPv4, each octet 0-255 without leading zeros
static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A(?:25[0-5]|(?:2[0-4]|1\d|[1-9])?\d)(?:\.(?:25[0-5]|(?:2[0-4]|1\d|[1-9])?\d)){3}\z",
    )
    .expect("IPv4 pattern is valid")
});

/// Check an address against the strict IPv4 syntax
pub fn is_valid_ipv4(ip: &str) -> bool {
    IPV4_PATTERN.is_match(ip)
}

/// Build the request URL for a lookup
///
/// Options are normalized first, then the API key and the address are checked,
/// so no request is ever built from an invalid call.
///
/// # Example
/// ```
/// use geo_ip::config::Config;
/// use geo_ip::geo::{build_lookup_url, LookupOptions};
///
/// let config = Config::with_api_key("ABC");
/// let url = build_lookup_url(&config, "8.8.8.8", &LookupOptions::new()).unwrap();
/// assert_eq!(
///     url,
///     "http://api.ipinfodb.com/v3/ip-city?key=ABC&ip=8.8.8.8&format=json&timezone=false"
/// );
/// ```
pub fn build_lookup_url(config: &Config, ip: &str, options: &LookupOptions) -> Result<String> {
    let options = options.normalize();

    let api_key = config.api_key().ok_or_else(|| {
        Error::Configuration("API key must be set before performing a lookup".to_string())
    })?;

    if !is_valid_ipv4(ip) {
        return Err(Error::InvalidInput(format!("Invalid IP address: {}", ip)));
    }

    Ok(format!(
        "http://{}{}{}?key={}&ip={}&format={}&timezone={}",
        config.service_host,
        ENDPOINT_PREFIX,
        options.endpoint(),
        urlencoding::encode(api_key),
        ip,
        RESPONSE_FORMAT,
        options.timezone
    ))
}
