//! Great-circle distance between coordinates.

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in decimal degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns true if both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Distance to another coordinate in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_meters(*self, *other)
    }
}

/// Great-circle distance between two points in meters.
///
/// Treats the Earth as a sphere of radius [`EARTH_RADIUS_M`].
///
/// # Examples
///
/// ```
/// use citibike_server::geo::{Coordinate, haversine_meters};
///
/// let a = Coordinate::new(40.73, -73.99);
/// assert_eq!(haversine_meters(a, a), 0.0);
/// ```
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    // The crate's kilometre radius is 6371.0, i.e. EARTH_RADIUS_M / 1000.
    distance(a.into(), b.into(), Units::Kilometers) * 1000.0
}

impl From<Coordinate> for HaversineLocation {
    fn from(c: Coordinate) -> Self {
        HaversineLocation {
            latitude: c.lat,
            longitude: c.lon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinate::new(40.73, -73.99);
        assert_eq!(haversine_meters(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((haversine_meters(a, b) - expected).abs() < 1e-6);
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::PI;
        assert!((haversine_meters(a, b) - expected).abs() < 1e-3);
    }

    #[test]
    fn quarter_meridian_uses_mean_earth_radius() {
        let equator = Coordinate::new(0.0, 0.0);
        let pole = Coordinate::new(90.0, 0.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::FRAC_PI_2;
        assert!((haversine_meters(equator, pole) - expected).abs() < 1e-6);
    }

    #[test]
    fn manhattan_blocks() {
        // Union Square to Washington Square Park, a little under 800 m.
        let union_sq = Coordinate::new(40.7359, -73.9911);
        let wash_sq = Coordinate::new(40.7308, -73.9973);
        let d = union_sq.distance_to(&wash_sq);
        assert!(d > 700.0 && d < 900.0, "got {d}");
    }

    #[test]
    fn finite_check() {
        assert!(Coordinate::new(1.0, 2.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 2.0).is_finite());
        assert!(!Coordinate::new(1.0, f64::INFINITY).is_finite());
    }
}
