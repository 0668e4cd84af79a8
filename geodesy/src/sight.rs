//! Straight-line sight math.

/// Elevation, in meters, of a straight sight line at `distance_m`
/// from an observer at `observer_alt_m`, aimed `pitch_rad` radians
/// above the horizontal. Terrain is ignored; this is where the line
/// of sight *would* be if the ground were not there.
pub fn estimate_sight_elevation(distance_m: f64, observer_alt_m: f64, pitch_rad: f64) -> f64 {
    observer_alt_m + distance_m * pitch_rad.tan()
}

/// Apparent up/down viewing angle, in radians, from an observer at
/// `observer_alt_m` to a point `distance_m` away with terrain
/// elevation `elevation_m`. Positive is up.
pub fn elevation_angle(observer_alt_m: f64, distance_m: f64, elevation_m: f64) -> f64 {
    (elevation_m - observer_alt_m).atan2(distance_m)
}
