//! IP-geolocation location provider.
//!
//! Resolves the machine's position from the `loc` field of the ipinfo.io
//! JSON payload. Accuracy is city-block at best, which is why the default
//! arrival threshold is sized in tens of meters.

use std::time::Duration;

use serde::Deserialize;

use super::error::LocationError;
use super::LocationProvider;
use crate::geo::Coordinate;

/// Default URL of the ipinfo.io JSON endpoint.
pub const DEFAULT_IPINFO_URL: &str = "https://ipinfo.io/json";

/// Default HTTP timeout for geolocation requests.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent string sent with geolocation requests.
const DEFAULT_USER_AGENT: &str = concat!("waypath/", env!("CARGO_PKG_VERSION"));

/// ipinfo.io response payload.
///
/// Only the `loc` field is deserialized; the rest of the payload is
/// ignored.
#[derive(Deserialize)]
struct IpinfoResponse {
    loc: String,
}

/// Location provider backed by ipinfo.io.
///
/// Uses a reusable `reqwest::Client` with connection pooling and timeouts.
pub struct IpinfoClient {
    /// Reusable HTTP client with connection pooling.
    http: reqwest::Client,

    /// URL of the geolocation endpoint.
    base_url: String,
}

impl IpinfoClient {
    /// Create a new client against the given endpoint.
    pub fn new(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { http, base_url }
    }
}

impl Default for IpinfoClient {
    fn default() -> Self {
        Self::new(DEFAULT_IPINFO_URL.to_string())
    }
}

impl LocationProvider for IpinfoClient {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        let response = self
            .http
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| LocationError::Http(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LocationError::Http(e.to_string()))?;

        let data: IpinfoResponse =
            serde_json::from_slice(&bytes).map_err(|e| LocationError::Malformed(e.to_string()))?;

        let coordinate: Coordinate = data
            .loc
            .parse()
            .map_err(|e: crate::geo::CoordError| LocationError::Malformed(e.to_string()))?;

        tracing::debug!(
            latitude = coordinate.latitude(),
            longitude = coordinate.longitude(),
            "IP geolocation fetched"
        );

        Ok(coordinate)
    }
}
