//! Waypath - turn-by-turn walking route progress tracking
//!
//! This library tracks a pedestrian's progress along a walking route fetched
//! from a directions service. It detects step arrivals, route deviations, and
//! route completion from periodic location samples, and recomputes the route
//! when the traveler strays from it.
//!
//! # High-Level API
//!
//! The [`session`] module provides the main entry point:
//!
//! ```ignore
//! use waypath::directions::{GoogleDirectionsClient, DEFAULT_DIRECTIONS_URL};
//! use waypath::sensors::IpinfoClient;
//! use waypath::session::{NavigationSession, SessionConfig};
//!
//! let config = SessionConfig::new("1 Ferry Building, San Francisco");
//! let session = NavigationSession::new(
//!     GoogleDirectionsClient::new(api_key, DEFAULT_DIRECTIONS_URL.to_string()),
//!     IpinfoClient::default(),
//!     display,
//!     config,
//! );
//! session.run().await?;
//! ```

pub mod compass;
pub mod directions;
pub mod geo;
pub mod logging;
pub mod route;
pub mod sensors;
pub mod session;
pub mod tracker;

/// Version of the Waypath library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
