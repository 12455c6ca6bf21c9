use crate::route::RouteError;
use thiserror::Error;

/// Errors from fetching or decoding a directions response.
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// The HTTP request itself failed (connectivity, timeout, DNS).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The response body could not be decoded into a route.
    #[error("Failed to parse directions response: {0}")]
    InvalidResponse(String),

    /// The service answered but rejected the request (bad key, no route
    /// between the endpoints, quota exhausted).
    #[error("Directions request rejected: {0}")]
    Status(String),

    /// The service answered OK but the decoded route had no steps.
    #[error("Directions service returned a route with no steps")]
    EmptyRoute,
}

impl From<RouteError> for DirectionsError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::Empty => DirectionsError::EmptyRoute,
        }
    }
}
