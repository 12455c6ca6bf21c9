//! Route planning providers.
//!
//! The [`DirectionsProvider`] trait is the seam the navigation session uses
//! to obtain a walking route; [`GoogleDirectionsClient`] is the production
//! implementation backed by the Google Directions API.

use std::future::Future;

use crate::geo::Coordinate;
use crate::route::Route;

mod error;
mod google;

pub use error::DirectionsError;
pub use google::{GoogleDirectionsClient, DEFAULT_DIRECTIONS_URL};

/// Trait for fetching a walking route from a directions service.
pub trait DirectionsProvider: Send + Sync {
    /// Fetch a route from `origin` to the named destination.
    fn fetch_route(
        &self,
        origin: Coordinate,
        destination: &str,
    ) -> impl Future<Output = Result<Route, DirectionsError>> + Send;
}
