//! Provider records and the normalized location result
//!
//! The provider answers with camelCase keys (`ipAddress`, `cityName`, ...).
//! [`map_fields`] renames them and keeps only the fields the resolved options
//! ask for. Values are passed through exactly as parsed.

use crate::constants::placeholder::{
    ERROR_STATUS, SENTINEL, TIMEOUT_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
use crate::geo::options::ResolvedOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw record as returned by the service
///
/// Missing keys deserialize to `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    #[serde(default)]
    pub ip_address: Value,
    #[serde(default)]
    pub status_code: Value,
    #[serde(default)]
    pub status_message: Value,
    #[serde(default)]
    pub country_code: Value,
    #[serde(default)]
    pub country_name: Value,
    #[serde(default)]
    pub region_name: Value,
    #[serde(default)]
    pub city_name: Value,
    #[serde(default)]
    pub zip_code: Value,
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
    #[serde(default)]
    pub time_zone: Value,
}

impl ProviderRecord {
    /// Parse a response body
    ///
    /// Only a JSON object is accepted; arrays and scalars are rejected even
    /// though serde could fill the fields by position.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<Value>(body)? {
            object @ Value::Object(_) => serde_json::from_value(object),
            other => Err(serde::de::Error::custom(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Degraded record: every field is the sentinel, except the status pair
    pub fn placeholder(status_message: &str) -> Self {
        let sentinel = || Value::String(SENTINEL.to_string());

        Self {
            ip_address: sentinel(),
            status_code: Value::String(ERROR_STATUS.to_string()),
            status_message: Value::String(status_message.to_string()),
            country_code: sentinel(),
            country_name: sentinel(),
            region_name: sentinel(),
            city_name: sentinel(),
            zip_code: sentinel(),
            latitude: sentinel(),
            longitude: sentinel(),
            time_zone: sentinel(),
        }
    }

    /// Placeholder used when the request timed out
    pub fn timed_out() -> Self {
        Self::placeholder(TIMEOUT_MESSAGE)
    }

    /// Placeholder used for any other transport failure
    pub fn unknown_error() -> Self {
        Self::placeholder(UNKNOWN_ERROR_MESSAGE)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalized lookup result
///
/// City-level fields are `None` when country precision was requested, and
/// `timezone` is `None` unless both city precision and timezone were asked
/// for. `None` fields are left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub ip: Value,
    pub status_code: Value,
    pub status_message: Value,
    pub country_code: Value,
    pub country_name: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Value>,
}

impl LocationResult {
    /// True for placeholder records produced by a timeout or transport failure
    pub fn is_degraded(&self) -> bool {
        self.status_code.as_str() == Some(ERROR_STATUS)
    }

    /// Present fields in output order
    pub fn fields(&self) -> Vec<(&'static str, &Value)> {
        let mut fields = vec![
            ("ip", &self.ip),
            ("status_code", &self.status_code),
            ("status_message", &self.status_message),
            ("country_code", &self.country_code),
            ("country_name", &self.country_name),
        ];

        let optional = [
            ("region_name", &self.region_name),
            ("city", &self.city),
            ("zip_code", &self.zip_code),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
            ("timezone", &self.timezone),
        ];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.as_ref().map(|v| (name, v))),
        );

        fields
    }

    /// Look up a present field by its result key
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// Rename provider keys and keep the fields the options call for
pub fn map_fields(record: ProviderRecord, options: &ResolvedOptions) -> LocationResult {
    let mut result = LocationResult {
        ip: record.ip_address,
        status_code: record.status_code,
        status_message: record.status_message,
        country_code: record.country_code,
        country_name: record.country_name,
        region_name: None,
        city: None,
        zip_code: None,
        latitude: None,
        longitude: None,
        timezone: None,
    };

    if options.includes_city() {
        result.region_name = Some(record.region_name);
        result.city = Some(record.city_name);
        result.zip_code = Some(record.zip_code);
        result.latitude = Some(record.latitude);
        result.longitude = Some(record.longitude);

        if options.includes_timezone() {
            result.timezone = Some(record.time_zone);
        }
    }

    result
}
