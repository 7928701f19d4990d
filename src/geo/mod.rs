//! IP geolocation
//!
//! Builds IPInfoDB lookup URLs, performs the request through a [`Transport`]
//! and normalizes the response into a [`LocationResult`].

pub mod client;
pub mod options;
pub mod record;
pub mod transport;
pub mod url;

pub use client::GeoIpClient;
pub use options::{LookupOptions, Precision, ResolvedOptions};
pub use record::{map_fields, LocationResult, ProviderRecord};
pub use transport::{HttpTransport, LookupRequest, Transport, TransportOutcome};
pub use url::{build_lookup_url, is_valid_ipv4};
