use thiserror::Error;

/// Errors reported by an [`ElevationProvider`](crate::ElevationProvider).
///
/// The variants matter to retry policy: `RateLimited` is retried with
/// backoff, everything else fails the search immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider refused the request for now; it may be retried.
    #[error("rate limited by elevation provider")]
    RateLimited,

    /// The provider has no elevation data for the requested location.
    #[error("no elevation data for requested location")]
    NoData,

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Terminal outcomes of a sight resolution other than a resolved point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SightError {
    /// A chunk query failed in a way that cannot be retried; terrain
    /// data for a required segment cannot be synthesized.
    #[error("elevation provider unavailable: {0}")]
    Provider(#[from] ProviderError),

    /// The provider kept rate limiting past the backoff ceiling.
    #[error("elevation provider rate limit exceeded after retries")]
    RateLimitExceeded,

    /// A single path query would need more samples than the provider
    /// allows; the query is refused rather than silently truncated.
    #[error("path query needs {requested} samples but provider allows {limit}")]
    SearchTooWide { requested: u32, limit: u32 },

    /// The search radius was exhausted and no sample qualified even as
    /// an approximate answer. Expected when aimed at open sky.
    #[error("no location found along sight line")]
    NotFound,

    /// The caller cancelled the search. An explicit no-op outcome, not
    /// a failure to report to the user.
    #[error("sight resolution cancelled")]
    Cancelled,
}
