//! Lookup options
//!
//! Callers describe a lookup with [`LookupOptions`], where every field may be
//! left unset. [`LookupOptions::normalize`] fills in the defaults and yields
//! the [`ResolvedOptions`] the rest of the pipeline works with.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of the returned location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Includes region, city, zip code and coordinates
    #[default]
    City,
    /// Country fields only
    Country,
}

impl Precision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::City => "city",
            Precision::Country => "country",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "city" => Ok(Precision::City),
            "country" => Ok(Precision::Country),
            other => Err(Error::InvalidOption(format!(
                "Invalid precision '{}' (expected 'city' or 'country')",
                other
            ))),
        }
    }
}

/// Parse a timezone flag, accepting only `true` and `false`
pub fn parse_timezone(s: &str) -> Result<bool> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Error::InvalidOption(format!(
            "Invalid timezone '{}' (expected 'true' or 'false')",
            other
        ))),
    }
}

/// Per-call lookup options, possibly incomplete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LookupOptions {
    #[serde(default)]
    pub precision: Option<Precision>,
    #[serde(default)]
    pub timezone: Option<bool>,
}

impl LookupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn timezone(mut self, timezone: bool) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Build options from their textual forms
    ///
    /// Fails with [`Error::InvalidOption`] on values outside either domain.
    pub fn parse(precision: Option<&str>, timezone: Option<&str>) -> Result<Self> {
        Ok(Self {
            precision: precision.map(str::parse::<Precision>).transpose()?,
            timezone: timezone.map(parse_timezone).transpose()?,
        })
    }

    /// Fill in defaults: city precision, no timezone
    pub fn normalize(&self) -> ResolvedOptions {
        ResolvedOptions {
            precision: self.precision.unwrap_or_default(),
            timezone: self.timezone.unwrap_or(false),
        }
    }
}

/// Fully specified lookup options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedOptions {
    pub precision: Precision,
    pub timezone: bool,
}

impl ResolvedOptions {
    /// Whether city-level fields belong in the result
    pub fn includes_city(&self) -> bool {
        self.precision == Precision::City
    }

    /// Whether the timezone field belongs in the result
    pub fn includes_timezone(&self) -> bool {
        self.includes_city() && self.timezone
    }

    /// Remote endpoint to query
    ///
    /// Asking for a timezone forces the city endpoint, since only that one
    /// reports it.
    pub fn endpoint(&self) -> &'static str {
        use crate::constants::api::{CITY_ENDPOINT, COUNTRY_ENDPOINT};

        if self.precision == Precision::City || self.timezone {
            CITY_ENDPOINT
        } else {
            COUNTRY_ENDPOINT
        }
    }
}

impl From<ResolvedOptions> for LookupOptions {
    fn from(resolved: ResolvedOptions) -> Self {
        Self {
            precision: Some(resolved.precision),
            timezone: Some(resolved.timezone),
        }
    }
}
