//! # Sight-line ground intersection
//!
//! `sightline` finds the geographic point an observer is visually
//! pointing at. Starting near the observer, it walks outward along the
//! viewing ray's great-circle path in provider-bounded chunks,
//! comparing a straight-line sight projection against queried terrain
//! elevation until the sight line drops below ground. When the search
//! radius is exhausted without a crossing, the sample with the
//! steepest apparent viewing angle is returned as an approximation.
//!
//! Elevation data comes from an [`ElevationProvider`], typically a
//! remote elevation web service. Searches are cancellable through a
//! [`CancelToken`] and report scan progress through a caller-supplied
//! sink.

mod cancel;
mod error;
mod provider;
mod resolver;

pub use {
    crate::{
        cancel::CancelToken,
        error::{ProviderError, SightError},
        provider::{ElevationProvider, ElevationSample},
        resolver::{Confidence, Observer, Resolution, SearchParams, SightRay, SightResolver},
    },
    geodesy,
};
