//! Location and heading sensors.
//!
//! The [`LocationProvider`] and [`HeadingProvider`] traits are the seams the
//! navigation session reads the physical world through. [`IpinfoClient`] is
//! the production location source; heading comes from [`FixedHeading`] when
//! the traveler states their facing direction, or [`NoCompass`] when no
//! orientation reading exists.

use std::future::Future;

use crate::geo::Coordinate;

mod error;
mod ipinfo;

pub use error::{HeadingError, LocationError};
pub use ipinfo::{IpinfoClient, DEFAULT_IPINFO_URL};

/// Trait for reading the traveler's current position.
pub trait LocationProvider: Send + Sync {
    /// Fetch the current position.
    fn current_location(&self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

/// Trait for reading the traveler's current heading.
///
/// Headings are degrees clockwise from true north in `[0, 360)`.
pub trait HeadingProvider: Send + Sync {
    /// Read the current heading.
    fn current_heading(&self) -> impl Future<Output = Result<f64, HeadingError>> + Send;
}

/// Heading provider that always reports one fixed direction.
///
/// Covers the common case of a traveler who states which way they are
/// facing at startup.
#[derive(Debug, Clone, Copy)]
pub struct FixedHeading {
    heading_deg: f64,
}

impl FixedHeading {
    /// Create a provider reporting `heading_deg`, normalized to `[0, 360)`.
    pub fn new(heading_deg: f64) -> Self {
        Self {
            heading_deg: heading_deg.rem_euclid(360.0),
        }
    }

    /// The normalized heading this provider reports.
    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }
}

impl HeadingProvider for FixedHeading {
    async fn current_heading(&self) -> Result<f64, HeadingError> {
        Ok(self.heading_deg)
    }
}

/// Heading provider for hardware with no orientation sensor.
///
/// Every read fails, which leaves route instructions in their original
/// compass form.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompass;

impl HeadingProvider for NoCompass {
    async fn current_heading(&self) -> Result<f64, HeadingError> {
        Err(HeadingError::Unavailable(
            "no orientation sensor".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_heading_normalizes() {
        assert_eq!(FixedHeading::new(370.0).heading_deg(), 10.0);
        assert_eq!(FixedHeading::new(-90.0).heading_deg(), 270.0);
        assert_eq!(FixedHeading::new(0.0).heading_deg(), 0.0);
    }

    #[tokio::test]
    async fn test_fixed_heading_reports_value() {
        let heading = FixedHeading::new(45.0);
        assert_eq!(heading.current_heading().await.unwrap(), 45.0);
    }

    #[tokio::test]
    async fn test_no_compass_always_fails() {
        let result = NoCompass.current_heading().await;
        assert!(matches!(result, Err(HeadingError::Unavailable(_))));
    }
}
