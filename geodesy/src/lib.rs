//! Spherical-earth geodesy routines for sight-line resolution.
//!
//! All math in this crate assumes a spherical earth of radius
//! [`MEAN_EARTH_RADIUS`]. That is consistent with the elevation
//! services this crate is paired with, but it is not geodetic (WGS84)
//! grade; callers should expect meter-scale, not millimeter-scale,
//! agreement with an ellipsoidal model.

mod projection;
mod sight;

pub use crate::{
    projection::{bearing_between, distance_between, project_point},
    sight::{elevation_angle, estimate_sight_elevation},
};
pub use geo;

use geo::Point;

/// Mean earth radius, in meters, used by every routine in this crate.
pub const MEAN_EARTH_RADIUS: f64 = 6_367_444.7;

/// Degrees to radians.
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Radians to degrees.
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// A geographic position with an optional elevation.
///
/// Latitude and longitude are degrees. Elevation, when known, is
/// meters above sea level. Values outside the valid latitude and
/// longitude ranges are the caller's responsibility; nothing here
/// validates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    point: Point<f64>,
    elevation_m: Option<f64>,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            point: Point::new(lon, lat),
            elevation_m: None,
        }
    }

    pub fn with_elevation(lat: f64, lon: f64, elevation_m: f64) -> Self {
        Self {
            point: Point::new(lon, lat),
            elevation_m: Some(elevation_m),
        }
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn elevation(&self) -> Option<f64> {
        self.elevation_m
    }

    /// The underlying `geo` point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        self.point
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(point: Point<f64>) -> Self {
        Self {
            point,
            elevation_m: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{to_degrees, to_radians, GeoPoint};
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversions_invert() {
        for x in [-721.5, -180.0, -1e-3, 0.0, 0.25, 90.0, 359.99, 4096.0] {
            assert_relative_eq!(to_degrees(to_radians(x)), x, epsilon = 1e-9);
            assert_relative_eq!(to_radians(to_degrees(x)), x, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_geopoint_accessors() {
        let point = GeoPoint::with_elevation(48.72277, -122.489905, 120.5);
        assert_eq!(48.72277, point.lat());
        assert_eq!(-122.489905, point.lon());
        assert_eq!(Some(120.5), point.elevation());
        assert_eq!(None, GeoPoint::new(0.0, 0.0).elevation());
    }
}
