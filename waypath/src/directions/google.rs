//! Google Directions API client.
//!
//! Fetches a walking route between two points via the Directions JSON
//! endpoint and converts the first returned route into a [`Route`]. Step
//! instructions arrive as HTML fragments; they are stripped to plain text
//! during conversion.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use super::error::DirectionsError;
use super::DirectionsProvider;
use crate::geo::Coordinate;
use crate::route::{Route, RouteStep};

/// Default URL of the Directions JSON endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default HTTP timeout for directions requests.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent string sent with directions requests.
const DEFAULT_USER_AGENT: &str = concat!("waypath/", env!("CARGO_PKG_VERSION"));

/// Top-level Directions API response.
///
/// Only the fields needed to build a route are deserialized; everything
/// else in the payload is ignored.
#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Deserialize)]
struct ApiRoute {
    legs: Vec<ApiLeg>,
}

#[derive(Deserialize)]
struct ApiLeg {
    steps: Vec<ApiStep>,
}

#[derive(Deserialize)]
struct ApiStep {
    html_instructions: String,
    distance: ApiDistance,
    #[serde(default)]
    start_location: Option<ApiLatLng>,
    end_location: ApiLatLng,
}

#[derive(Deserialize)]
struct ApiDistance {
    text: String,
}

#[derive(Deserialize, Clone, Copy)]
struct ApiLatLng {
    lat: f64,
    lng: f64,
}

/// Directions client using direct HTTP requests.
///
/// Uses a reusable `reqwest::Client` with connection pooling and timeouts.
pub struct GoogleDirectionsClient {
    /// API key sent with every request.
    api_key: String,

    /// Reusable HTTP client with connection pooling.
    http: reqwest::Client,

    /// URL of the Directions JSON endpoint.
    base_url: String,
}

impl GoogleDirectionsClient {
    /// Create a new client with the given API key.
    ///
    /// Uses the provided `base_url` for the Directions JSON endpoint.
    pub fn new(api_key: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            api_key,
            http,
            base_url,
        }
    }
}

impl DirectionsProvider for GoogleDirectionsClient {
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: &str,
    ) -> Result<Route, DirectionsError> {
        let origin_param = origin.to_string();

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("origin", origin_param.as_str()),
                ("destination", destination),
                ("mode", "walking"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DirectionsError::Http(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DirectionsError::Http(e.to_string()))?;

        let data: DirectionsResponse = serde_json::from_slice(&bytes)
            .map_err(|e| DirectionsError::InvalidResponse(e.to_string()))?;

        route_from_response(data)
    }
}

/// Convert a decoded Directions response into a [`Route`].
///
/// Checks the API status, then takes the steps of the first leg of the
/// first route. All other routes and legs are ignored.
fn route_from_response(data: DirectionsResponse) -> Result<Route, DirectionsError> {
    if data.status != "OK" {
        let detail = match data.error_message {
            Some(message) => format!("{} ({})", data.status, message),
            None => data.status,
        };
        return Err(DirectionsError::Status(detail));
    }

    let leg = data
        .routes
        .first()
        .and_then(|route| route.legs.first())
        .ok_or_else(|| {
            DirectionsError::InvalidResponse("response contains no route legs".to_string())
        })?;

    let steps: Vec<RouteStep> = leg
        .steps
        .iter()
        .map(route_step_from_api)
        .collect::<Result<_, _>>()?;

    tracing::debug!(steps = steps.len(), "Directions response decoded");

    Ok(Route::from_steps(steps)?)
}

/// Convert one API step into a [`RouteStep`].
fn route_step_from_api(step: &ApiStep) -> Result<RouteStep, DirectionsError> {
    let end = coordinate_from_api(step.end_location)?;

    let mut route_step = RouteStep::new(
        strip_html(&step.html_instructions),
        end,
        step.distance.text.clone(),
    );

    if let Some(start) = step.start_location {
        route_step = route_step.with_start(coordinate_from_api(start)?);
    }

    Ok(route_step)
}

fn coordinate_from_api(point: ApiLatLng) -> Result<Coordinate, DirectionsError> {
    Coordinate::new(point.lat, point.lng)
        .map_err(|e| DirectionsError::InvalidResponse(e.to_string()))
}

/// Matches HTML tags in an instruction fragment.
fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("Valid regex"))
}

/// Matches runs of whitespace left behind after tag removal.
fn space_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("Valid regex"))
}

/// Strip HTML tags and entities from a Directions instruction.
///
/// Tags become spaces so that adjacent words stay separated (the API wraps
/// road names in `<b>` and appends `<div>` blocks), then runs of
/// whitespace collapse to a single space.
fn strip_html(html: &str) -> String {
    let text = tag_pattern().replace_all(html, " ");
    let text = text.replace("&nbsp;", " ").replace("&amp;", "&");

    space_pattern().replace_all(&text, " ").trim().to_string()
}
