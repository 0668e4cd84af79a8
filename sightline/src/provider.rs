use crate::error::ProviderError;
use geodesy::{geo::Point, GeoPoint};

/// One sampled location along an elevation path query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSample {
    /// Sampled location (x = longitude, y = latitude).
    pub point: Point<f64>,

    /// Terrain elevation at `point`, meters above sea level.
    pub elevation_m: f64,

    /// Distance from the query's start point, meters.
    pub distance_m: f64,
}

impl ElevationSample {
    /// The sample as a [`GeoPoint`] with its elevation set.
    pub fn to_geopoint(&self) -> GeoPoint {
        GeoPoint::with_elevation(self.point.y(), self.point.x(), self.elevation_m)
    }
}

/// Source of terrain elevation data.
///
/// Implementations typically wrap a remote elevation web service; the
/// resolver relies only on the contract below and never on how the
/// data is fetched.
pub trait ElevationProvider {
    /// Elevation at a single location. Off the scanning hot path; the
    /// resolver calls this once per search, and only when the
    /// observer's own elevation is unknown.
    fn point_elevation(&self, point: &GeoPoint) -> Result<f64, ProviderError>;

    /// Evenly spaced elevation samples along the great-circle path
    /// from `start` to `end`, ordered by increasing distance from
    /// `start`. `samples` is the number of points requested and must
    /// not exceed [`max_samples`](Self::max_samples).
    fn path_elevation(
        &self,
        start: &GeoPoint,
        end: &GeoPoint,
        samples: u32,
    ) -> Result<Vec<ElevationSample>, ProviderError>;

    /// Largest sample count a single [`Self::path_elevation`] request
    /// may ask for.
    fn max_samples(&self) -> u32;
}
