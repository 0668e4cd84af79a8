//! Resolve a sight line against a synthetic conical hill.
//!
//! The hill's summit sits a configurable distance due east of the
//! observer; aim the ray at its flank and the resolver reports where
//! the line of sight lands.
//!
//! ```sh
//! cargo run --example resolve -- --observer=48.72277,-122.489905,20 --bearing=90 --pitch=0.02
//! ```

use anyhow::{anyhow, Error as AnyError};
use clap::Parser;
use geodesy::{bearing_between, distance_between, project_point, GeoPoint};
use sightline::{
    CancelToken, Confidence, ElevationProvider, ElevationSample, Observer, ProviderError,
    SightRay, SightResolver,
};
use std::str::FromStr;

#[derive(Parser, Debug)]
struct Cli {
    /// Observer "lat,lon,alt", where 'alt' is meters above sea level.
    #[arg(long)]
    observer: LatLonAlt,

    /// Compass bearing, degrees clockwise from north.
    #[arg(short, long)]
    bearing: f64,

    /// Pitch, radians above the horizontal.
    #[arg(short, long, default_value_t = 0.0)]
    pitch: f64,

    /// Summit distance due east of the observer, meters.
    #[arg(long, default_value_t = 8_000.0)]
    summit_distance: f64,

    /// Summit elevation, meters.
    #[arg(long, default_value_t = 900.0)]
    summit_elevation: f64,

    /// Hillside grade, meters of elevation lost per meter from the summit.
    #[arg(long, default_value_t = 0.15)]
    grade: f64,
}

#[derive(Clone, Debug, Copy)]
struct LatLonAlt(GeoPoint);

impl FromStr for LatLonAlt {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let mut parts = s.splitn(3, ',');
        let mut next = || {
            parts
                .next()
                .ok_or_else(|| anyhow!("not a valid lat,lon,alt"))
        };
        let lat = f64::from_str(next()?)?;
        let lon = f64::from_str(next()?)?;
        let alt = f64::from_str(next()?)?;
        Ok(Self(GeoPoint::with_elevation(lat, lon, alt)))
    }
}

/// A cone-shaped hill on an otherwise sea-level plain.
struct ConeHill {
    summit: GeoPoint,
    summit_elevation_m: f64,
    grade: f64,
}

impl ConeHill {
    fn elevation(&self, point: &GeoPoint) -> f64 {
        let distance_m = distance_between(&self.summit, point);
        (self.summit_elevation_m - distance_m * self.grade).max(0.0)
    }
}

impl ElevationProvider for ConeHill {
    fn point_elevation(&self, point: &GeoPoint) -> Result<f64, ProviderError> {
        Ok(self.elevation(point))
    }

    fn path_elevation(
        &self,
        start: &GeoPoint,
        end: &GeoPoint,
        samples: u32,
    ) -> Result<Vec<ElevationSample>, ProviderError> {
        let span_m = distance_between(start, end);
        let bearing = bearing_between(start, end);
        let spacing_m = span_m / f64::from(samples.max(2) - 1);
        let path = (0..samples)
            .map(|i| {
                let distance_m = spacing_m * f64::from(i);
                let point = project_point(start, distance_m, bearing);
                ElevationSample {
                    point: point.point(),
                    elevation_m: self.elevation(&point),
                    distance_m,
                }
            })
            .collect();
        Ok(path)
    }

    fn max_samples(&self) -> u32 {
        512
    }
}

fn main() -> Result<(), AnyError> {
    env_logger::init();
    let cli = Cli::parse();

    let observer = Observer::new(cli.observer.0, 0.0);
    let ray = SightRay::new(cli.bearing, cli.pitch);
    let hill = ConeHill {
        summit: project_point(&observer.position, cli.summit_distance, 90.0),
        summit_elevation_m: cli.summit_elevation,
        grade: cli.grade,
    };

    let resolver = SightResolver::new(hill);
    let found = resolver.resolve(&observer, &ray, &CancelToken::new(), |fraction| {
        eprint!("\rscanned {:3.0}%", fraction * 100.0);
    })?;
    eprintln!();

    let quality = match found.confidence {
        Confidence::Intersection => "intersection",
        Confidence::Approximate => "approximate (steepest angle)",
    };
    println!(
        "{:.6},{:.6} elevation {:.1}m at {:.0}m ({quality})",
        found.point.lat(),
        found.point.lon(),
        found.point.elevation().unwrap_or_default(),
        found.distance_m,
    );
    Ok(())
}
