//! Great-circle projection and distance.
//!
//! The formulas mirror the [geo] crate's haversine routines, pinned to
//! this crate's earth radius so that distances and projections
//! round-trip with each other.

use crate::{to_degrees, to_radians, GeoPoint, MEAN_EARTH_RADIUS};

/// Destination point after travelling `distance_m` meters from
/// `origin` along `bearing_deg` (degrees clockwise from north).
///
/// The returned point carries no elevation.
pub fn project_point(origin: &GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    let lat = to_radians(origin.lat());
    let lon = to_radians(origin.lon());
    let bearing = to_radians(bearing_deg);

    let (lat_sin, lat_cos) = lat.sin_cos();
    let arc = distance_m / MEAN_EARTH_RADIUS;
    let (arc_sin, arc_cos) = arc.sin_cos();

    let dest_lat = (lat_sin * arc_cos + lat_cos * arc_sin * bearing.cos()).asin();
    let dest_lon =
        lon + (bearing.sin() * arc_sin * lat_cos).atan2(arc_cos - lat_sin * dest_lat.sin());

    GeoPoint::new(to_degrees(dest_lat), to_degrees(dest_lon))
}

/// Haversine great-circle distance between `a` and `b`, in meters.
pub fn distance_between(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a = to_radians(a.lat());
    let lat_b = to_radians(b.lat());
    let half_dlat = (lat_b - lat_a) / 2.0;
    let half_dlon = to_radians(b.lon() - a.lon()) / 2.0;

    let k =
        (half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlon.sin().powi(2)).sqrt();
    2.0 * k.asin() * MEAN_EARTH_RADIUS
}

/// Initial bearing, in degrees [0, 360), of the great-circle path from
/// `a` to `b`.
pub fn bearing_between(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a = to_radians(a.lat());
    let lat_b = to_radians(b.lat());
    let dlon = to_radians(b.lon() - a.lon());

    let y = dlon.sin() * lat_b.cos();
    let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * dlon.cos();
    to_degrees(y.atan2(x)).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::{bearing_between, distance_between, project_point, GeoPoint};
    use approx::assert_relative_eq;

    #[test]
    fn test_known_projection() {
        let origin = GeoPoint::new(48.72277, -122.489905);
        let dest = project_point(&origin, 250.0, 12.0);
        assert_relative_eq!(48.724_970_4, dest.lat(), epsilon = 1e-5);
        assert_relative_eq!(-122.489_196_0, dest.lon(), epsilon = 1e-5);
    }

    #[test]
    fn test_projection_round_trips_distance() {
        let origin = GeoPoint::new(-36.85, 174.76);
        for distance_m in [1.0, 20.0, 250.0, 5_100.0, 20_000.0] {
            for bearing in (0..360).step_by(30) {
                let dest = project_point(&origin, distance_m, f64::from(bearing));
                assert_relative_eq!(
                    distance_m,
                    distance_between(&origin, &dest),
                    max_relative = 0.01
                );
            }
        }
    }

    #[test]
    fn test_projection_accepts_unnormalized_bearing() {
        let origin = GeoPoint::new(48.72277, -122.489905);
        let a = project_point(&origin, 1_000.0, 12.0);
        let b = project_point(&origin, 1_000.0, 372.0);
        assert_relative_eq!(a.lat(), b.lat(), epsilon = 1e-9);
        assert_relative_eq!(a.lon(), b.lon(), epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_between_inverts_projection() {
        let origin = GeoPoint::new(48.72277, -122.489905);
        for bearing in [0.0, 12.0, 90.0, 181.5, 270.0, 359.0] {
            let dest = project_point(&origin, 5_000.0, bearing);
            assert_relative_eq!(bearing, bearing_between(&origin, &dest), epsilon = 1e-2);
        }
    }

    #[test]
    fn test_distance_between_equator_degree() {
        // One degree of longitude along the equator.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let expected = super::MEAN_EARTH_RADIUS * std::f64::consts::PI / 180.0;
        assert_relative_eq!(expected, distance_between(&a, &b), epsilon = 1e-6);
    }
}
