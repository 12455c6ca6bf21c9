//! Geographic math for route tracking.
//!
//! Provides the coordinate value type and the great-circle distance that
//! drives the progress tracker's arrival and deviation rules.

mod types;

pub use types::{CoordError, Coordinate, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean Earth radius in meters for the spherical-Earth approximation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Computes the great-circle distance between two coordinates in meters.
///
/// Uses the haversine formula on a spherical Earth. The function is
/// symmetric in its arguments, returns zero for identical coordinates, and
/// is defined for any pair of well-formed coordinates, including antipodal
/// points.
#[inline]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let dlat = lat_b - lat_a;
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push h a hair outside [0, 1] for antipodal points;
    // clamp before the square root so asin stays in its domain.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
