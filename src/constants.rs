//! Centralized constants for the geo-ip crate

/// IPInfoDB service endpoints
pub mod api {
    /// Default service host
    pub const SERVICE_HOST: &str = "api.ipinfodb.com";

    /// Path prefix shared by both lookup endpoints
    pub const ENDPOINT_PREFIX: &str = "/v3/ip-";

    /// City-precision endpoint suffix
    pub const CITY_ENDPOINT: &str = "city";

    /// Country-precision endpoint suffix
    pub const COUNTRY_ENDPOINT: &str = "country";

    /// Response format requested from the service
    pub const RESPONSE_FORMAT: &str = "json";

    /// Cache hint handed to the transport, in seconds
    pub const CACHE_TTL_SECS: u64 = 60;
}

/// Values used for degraded records
pub mod placeholder {
    /// Fills every field when no real data is available
    pub const SENTINEL: &str = "-";

    /// Status code of a degraded record
    pub const ERROR_STATUS: &str = "ERROR";

    /// Status message when the request timed out
    pub const TIMEOUT_MESSAGE: &str = "Timeout";

    /// Status message for any other transport failure
    pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";
}
