use crate::{
    cancel::CancelToken,
    error::{ProviderError, SightError},
    provider::{ElevationProvider, ElevationSample},
};
use geodesy::{
    distance_between, elevation_angle, estimate_sight_elevation, project_point, GeoPoint,
};
use log::{debug, trace};
use std::{thread, time::Duration};

/// An observer's position fix and its vertical uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Position fix. When the elevation is absent the resolver fills
    /// it in with a single provider lookup.
    pub position: GeoPoint,

    /// Vertical accuracy of the fix, meters. Non-negative by contract;
    /// the absolute value is used either way.
    pub vertical_accuracy_m: f64,
}

impl Observer {
    pub fn new(position: GeoPoint, vertical_accuracy_m: f64) -> Self {
        Self {
            position,
            vertical_accuracy_m,
        }
    }

    /// Starting altitude for sight projection: the fix's elevation
    /// raised by the vertical uncertainty.
    fn adjusted_altitude(&self, elevation_m: f64) -> f64 {
        elevation_m + self.vertical_accuracy_m.abs()
    }
}

/// A viewing direction: compass bearing plus pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightRay {
    /// Degrees clockwise from north. Any real value; normalized into
    /// [0, 360) on use.
    pub bearing_deg: f64,

    /// Radians above (+) or below (-) the horizontal.
    pub pitch_rad: f64,
}

impl SightRay {
    pub fn new(bearing_deg: f64, pitch_rad: f64) -> Self {
        Self {
            bearing_deg,
            pitch_rad,
        }
    }

    fn bearing(&self) -> f64 {
        self.bearing_deg.rem_euclid(360.0)
    }
}

/// How a resolved point was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// The sight line crossed below terrain; the point is the crossing.
    Intersection,

    /// The search radius was exhausted without a crossing; the point
    /// is the sample with the steepest apparent viewing angle, e.g. a
    /// distant ridge the observer aimed just above.
    Approximate,
}

/// A resolved sight-line target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// The targeted ground point, with elevation set.
    pub point: GeoPoint,

    /// Distance from the observer along the scan path, meters.
    pub distance_m: f64,

    pub confidence: Confidence,
}

/// Tunables for a sight-line search.
///
/// The defaults match the elevation services this crate was written
/// against: 10 m sample spacing with 510-sample path queries gives
/// 5.1 km chunks, scanned out to a 100 km radius.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Spacing between elevation samples, meters. Must be positive.
    pub distance_step_m: f64,

    /// Stand-off of the first sampled point from the observer, meters.
    pub min_distance_m: f64,

    /// Maximum search radius, meters.
    pub max_distance_m: f64,

    /// How far the sight line must drop below terrain before a sample
    /// counts as an intersection. Negative; meters.
    pub height_tolerance_m: f64,

    /// Minimum divergence, in radians, between the local terrain slope
    /// angle and the pitch for an intersection on near-flat ground.
    pub slope_factor: f64,

    /// Samples requested per path query. Chunk width is
    /// `distance_step_m * samples_per_query`.
    pub samples_per_query: u32,

    /// Delay before the first retry after a rate-limit response.
    pub initial_backoff: Duration,

    /// Retrying stops once the doubled delay exceeds this ceiling.
    pub max_backoff: Duration,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            distance_step_m: 10.0,
            min_distance_m: 20.0,
            max_distance_m: 100_000.0,
            height_tolerance_m: -10.0,
            slope_factor: 0.02,
            samples_per_query: 510,
            initial_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_millis(1600),
        }
    }
}

/// Scan state for one `resolve` call. Owned exclusively by that call;
/// concurrent resolutions never share state.
struct SearchState {
    /// Elevation of the previously evaluated sample, for local slope.
    last_elevation_m: f64,

    /// Steepest apparent viewing angle seen so far, radians.
    best_angle: f64,

    /// Sample behind `best_angle` and its distance from the observer.
    fallback: Option<(ElevationSample, f64)>,
}

/// Walks outward from an observer along a viewing ray until the sight
/// line intersects terrain.
///
/// One `resolve` call performs a single sequential scan with no
/// internal parallelism: each chunk's start is the previous chunk's
/// end, and a found intersection must stop all further queries. Run it
/// off the UI thread; per-chunk provider round-trips block.
pub struct SightResolver<P> {
    provider: P,
    params: SearchParams,
}

impl<P> SightResolver<P>
where
    P: ElevationProvider,
{
    pub fn new(provider: P) -> Self {
        Self::with_params(provider, SearchParams::default())
    }

    pub fn with_params(provider: P, params: SearchParams) -> Self {
        Self { provider, params }
    }

    /// Resolve the ground point `ray` visually lands on from `observer`.
    ///
    /// Scans in provider-bounded chunks until the projected sight line
    /// drops below terrain (`Confidence::Intersection`), the search
    /// radius is exhausted and the steepest-angle sample is returned
    /// instead (`Confidence::Approximate`), or the search fails.
    ///
    /// `progress` receives non-decreasing fractions in [0, 1] as
    /// samples are evaluated; it is fire-and-forget and called on the
    /// resolver's thread. `cancel` is polled once per chunk; a cancelled
    /// search returns [`SightError::Cancelled`].
    pub fn resolve<F>(
        &self,
        observer: &Observer,
        ray: &SightRay,
        cancel: &CancelToken,
        mut progress: F,
    ) -> Result<Resolution, SightError>
    where
        F: FnMut(f64),
    {
        let params = &self.params;
        let bearing = ray.bearing();

        let observer_elev_m = match observer.position.elevation() {
            Some(elevation_m) => elevation_m,
            None => self.provider.point_elevation(&observer.position)?,
        };
        let adjusted_alt_m = observer.adjusted_altitude(observer_elev_m);
        debug!(
            "resolving sight; bearing: {bearing:.1}, pitch: {:.4}, adjusted altitude: {adjusted_alt_m:.1}",
            ray.pitch_rad
        );

        let chunk_width_m = params.distance_step_m * f64::from(params.samples_per_query);
        let mut state = SearchState {
            last_elevation_m: observer_elev_m,
            best_angle: f64::NEG_INFINITY,
            fallback: None,
        };

        let mut from = project_point(&observer.position, params.min_distance_m, bearing);
        let mut from_offset_m = params.min_distance_m;
        let mut scan_distance_m = chunk_width_m;

        while scan_distance_m < params.max_distance_m {
            if cancel.is_cancelled() {
                return Err(SightError::Cancelled);
            }

            let to = project_point(&observer.position, scan_distance_m, bearing);
            let span_m = distance_between(&from, &to);
            let samples = (span_m / params.distance_step_m) as u32;
            let limit = self.provider.max_samples();
            if samples > limit {
                return Err(SightError::SearchTooWide {
                    requested: samples,
                    limit,
                });
            }

            let path = self.path_with_backoff(&from, &to, samples)?;
            debug!(
                "chunk; end: {scan_distance_m:.0}m, span: {span_m:.0}m, samples: {}",
                path.len()
            );

            for sample in &path {
                let distance_m = from_offset_m + sample.distance_m;
                let sight_m = estimate_sight_elevation(distance_m, adjusted_alt_m, ray.pitch_rad);
                let diff_m = sight_m - sample.elevation_m;
                let slope_angle =
                    ((sample.elevation_m - state.last_elevation_m) / params.distance_step_m).atan();

                progress((distance_m / params.max_distance_m).min(1.0));
                trace!(
                    "sample; distance: {distance_m:.0}m, sight: {sight_m:.1}m, terrain: {:.1}m, diff: {diff_m:.1}m, slope: {slope_angle:.4}",
                    sample.elevation_m
                );

                // Looking out at something in the distance, the ground is
                // often near parallel with the pitch. Require either a
                // diverging slope or a drastic drop below terrain, so noise
                // in elevation data can't trigger a premature match on
                // near-flat ground.
                if diff_m < params.height_tolerance_m
                    && (slope_angle - ray.pitch_rad > params.slope_factor
                        || diff_m < 4.0 * params.height_tolerance_m)
                {
                    return Ok(Resolution {
                        point: sample.to_geopoint(),
                        distance_m,
                        confidence: Confidence::Intersection,
                    });
                }

                state.last_elevation_m = sample.elevation_m;

                // Track the sample with the steepest apparent viewing
                // angle as the answer of last resort, such as when the
                // observer aims just above a distant ridge.
                let angle = elevation_angle(adjusted_alt_m, distance_m, sample.elevation_m);
                if angle > state.best_angle {
                    state.best_angle = angle;
                    state.fallback = Some((*sample, distance_m));
                }
            }

            from = to;
            from_offset_m = scan_distance_m;
            scan_distance_m += chunk_width_m;
        }

        match state.fallback {
            Some((sample, distance_m)) => {
                debug!("search exhausted; falling back to steepest-angle sample at {distance_m:.0}m");
                Ok(Resolution {
                    point: sample.to_geopoint(),
                    distance_m,
                    confidence: Confidence::Approximate,
                })
            }
            None => Err(SightError::NotFound),
        }
    }

    /// One path query, retried with doubling delay while the provider
    /// rate limits. Fails with `RateLimitExceeded` once the next delay
    /// would exceed the ceiling; every other provider error is fatal
    /// immediately.
    fn path_with_backoff(
        &self,
        start: &GeoPoint,
        end: &GeoPoint,
        samples: u32,
    ) -> Result<Vec<ElevationSample>, SightError> {
        let mut delay = self.params.initial_backoff;
        loop {
            match self.provider.path_elevation(start, end, samples) {
                Ok(path) => return Ok(path),
                Err(ProviderError::RateLimited) => {
                    if delay > self.params.max_backoff {
                        return Err(SightError::RateLimitExceeded);
                    }
                    debug!("rate limited; retrying in {delay:?}");
                    thread::sleep(delay);
                    delay *= 2;
                }
                Err(err) => return Err(SightError::Provider(err)),
            }
        }
    }
}
