//! IPInfoDB lookup client

use crate::config::Config;
use crate::constants::api::CACHE_TTL_SECS;
use crate::error::Result;
use crate::geo::options::LookupOptions;
use crate::geo::record::{map_fields, LocationResult, ProviderRecord};
use crate::geo::transport::{HttpTransport, LookupRequest, Transport, TransportOutcome};
use crate::geo::url::build_lookup_url;
use std::time::Duration;
use tracing::{debug, warn};

/// Geolocation client
///
/// Owns its configuration, so several independently configured clients can
/// coexist and be used from different threads.
#[derive(Debug)]
pub struct GeoIpClient<T: Transport = HttpTransport> {
    config: Config,
    transport: T,
}

impl GeoIpClient<HttpTransport> {
    /// Create a client backed by a blocking HTTP transport
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> GeoIpClient<T> {
    /// Create a client with a specific transport
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Look up the location of an IPv4 address
    ///
    /// Invalid options, a missing API key or a malformed address fail before
    /// any request is made. A timeout or transport failure is not an error:
    /// it yields a placeholder record whose `status_code` is `"ERROR"`. A 2xx
    /// response whose body is not a JSON object does fail, with
    /// [`Error::Json`](crate::error::Error::Json).
    pub fn lookup(&self, ip: &str, options: &LookupOptions) -> Result<LocationResult> {
        let url = build_lookup_url(&self.config, ip, options)?;
        let options = options.normalize();

        let request = LookupRequest {
            url,
            timeout: self.config.request_timeout(),
            cache_ttl: Duration::from_secs(CACHE_TTL_SECS),
        };
        debug!(
            "Looking up {} via ip-{} endpoint (timeout {:?})",
            ip,
            options.endpoint(),
            request.timeout
        );

        let record = match self.transport.get(&request) {
            TransportOutcome::Success { body } => ProviderRecord::from_json(&body)?,
            TransportOutcome::TimedOut => {
                warn!("Lookup for {} timed out after {:?}", ip, request.timeout);
                ProviderRecord::timed_out()
            }
            TransportOutcome::Failed { reason } => {
                warn!("Lookup for {} failed: {}", ip, reason);
                ProviderRecord::unknown_error()
            }
        };

        Ok(map_fields(record, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geo::options::Precision;
    use serde_json::json;
    use std::sync::Mutex;

    const FULL_BODY: &str = r#"{"statusCode":"OK","statusMessage":"","ipAddress":"74.125.45.100","countryCode":"US","countryName":"United States","regionName":"Oklahoma","cityName":"Tulsa","zipCode":"74101","latitude":"36.154","longitude":"-95.9928","timeZone":"-05:00"}"#;

    /// Transport returning a canned outcome and recording each request
    struct StubTransport {
        outcome: TransportOutcome,
        requests: Mutex<Vec<LookupRequest>>,
    }

    impl StubTransport {
        fn new(outcome: TransportOutcome) -> Self {
            Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn success(body: &str) -> Self {
            Self::new(TransportOutcome::Success {
                body: body.to_string(),
            })
        }

        fn requests(&self) -> Vec<LookupRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for StubTransport {
        fn get(&self, request: &LookupRequest) -> TransportOutcome {
            self.requests.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    fn client(transport: StubTransport) -> GeoIpClient<StubTransport> {
        GeoIpClient::with_transport(Config::with_api_key("ABC"), transport)
    }

    #[test]
    fn test_lookup_city_with_timezone() {
        let client = client(StubTransport::success(FULL_BODY));
        let options = LookupOptions::new()
            .precision(Precision::City)
            .timezone(true);

        let result = client.lookup("74.125.45.100", &options).unwrap();

        assert_eq!(result.fields().len(), 11);
        assert_eq!(result.ip, json!("74.125.45.100"));
        assert_eq!(result.city, Some(json!("Tulsa")));
        assert_eq!(result.timezone, Some(json!("-05:00")));
    }

    #[test]
    fn test_lookup_country() {
        let client = client(StubTransport::success(FULL_BODY));
        let options = LookupOptions::new().precision(Precision::Country);

        let result = client.lookup("74.125.45.100", &options).unwrap();

        assert_eq!(result.fields().len(), 5);
        assert_eq!(result.country_code, json!("US"));
        assert_eq!(result.city, None);
        assert_eq!(result.timezone, None);
    }

    #[test]
    fn test_lookup_request() {
        let client = client(StubTransport::success(FULL_BODY));
        client.lookup("8.8.8.8", &LookupOptions::new()).unwrap();

        let requests = client.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "http://api.ipinfodb.com/v3/ip-city?key=ABC&ip=8.8.8.8&format=json&timezone=false"
        );
        assert_eq!(requests[0].timeout, Duration::from_millis(1));
        assert_eq!(requests[0].cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_lookup_uses_configured_timeout() {
        let mut client = client(StubTransport::success(FULL_BODY));
        client
            .config_mut()
            .set_request_timeout(Duration::from_millis(2500));

        client.lookup("8.8.8.8", &LookupOptions::new()).unwrap();
        assert_eq!(
            client.transport.requests()[0].timeout,
            Duration::from_millis(2500)
        );
    }

    #[test]
    fn test_lookup_timeout_placeholder() {
        let client = client(StubTransport::new(TransportOutcome::TimedOut));
        let options = LookupOptions::new().timezone(true);

        let result = client.lookup("8.8.8.8", &options).unwrap();

        assert!(result.is_degraded());
        assert_eq!(result.status_code, json!("ERROR"));
        assert_eq!(result.status_message, json!("Timeout"));
        assert_eq!(result.fields().len(), 11);
        for (name, value) in result.fields() {
            if name != "status_code" && name != "status_message" {
                assert_eq!(value, &json!("-"), "field {}", name);
            }
        }
    }

    #[test]
    fn test_lookup_failure_placeholder() {
        let client = client(StubTransport::new(TransportOutcome::Failed {
            reason: "connection refused".to_string(),
        }));
        let options = LookupOptions::new().precision(Precision::Country);

        let result = client.lookup("8.8.8.8", &options).unwrap();

        assert_eq!(result.status_code, json!("ERROR"));
        assert_eq!(result.status_message, json!("Unknown Error"));
        assert_eq!(result.country_name, json!("-"));
        assert_eq!(result.fields().len(), 5);
    }

    #[test]
    fn test_lookup_malformed_body_propagates() {
        let client = client(StubTransport::success("<html>busy</html>"));
        let result = client.lookup("8.8.8.8", &LookupOptions::new());
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_lookup_array_body_propagates() {
        for body in ["[]", r#"["1.2.3.4","OK"]"#] {
            let client = client(StubTransport::success(body));
            let result = client.lookup("8.8.8.8", &LookupOptions::new());
            assert!(matches!(result, Err(Error::Json(_))), "body {}", body);
        }
    }

    #[test]
    fn test_lookup_without_api_key_makes_no_request() {
        let client = GeoIpClient::with_transport(
            Config::default(),
            StubTransport::success(FULL_BODY),
        );

        let result = client.lookup("8.8.8.8", &LookupOptions::new());
        assert!(matches!(result, Err(Error::Configuration(_))));
        assert!(client.transport.requests().is_empty());
    }

    #[test]
    fn test_lookup_invalid_ip_makes_no_request() {
        let client = client(StubTransport::success(FULL_BODY));

        let result = client.lookup("1.2.3.256", &LookupOptions::new());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(client.transport.requests().is_empty());
    }

    #[test]
    fn test_clients_are_independent() {
        let first = client(StubTransport::success(FULL_BODY));
        let second = GeoIpClient::with_transport(
            Config::with_api_key("OTHER"),
            StubTransport::success(FULL_BODY),
        );

        first.lookup("8.8.8.8", &LookupOptions::new()).unwrap();
        second.lookup("8.8.8.8", &LookupOptions::new()).unwrap();

        assert!(first.transport.requests()[0].url.contains("key=ABC&"));
        assert!(second.transport.requests()[0].url.contains("key=OTHER&"));
    }
}
