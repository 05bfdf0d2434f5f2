//! Crate-level error types.
//!
//! [`PeerdeskError`] unifies every transport-side error source (configuration,
//! HTTP, JSON, URL handling, TLS, terminal I/O) behind a single enum so callers
//! can match on the variant they care about while still using the `?` operator.
//!
//! Application-level refusals (`success: false` envelopes) are *not* errors;
//! they travel as [`ActionOutcome`](crate::models::ActionOutcome) values.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PeerdeskError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum PeerdeskError {
    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request could not be sent or its body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body was not the JSON shape we expected.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be parsed or joined onto the base URL.
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    /// TLS configuration failed.
    #[error("tls error: {0}")]
    Tls(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// A server-supplied pagination link points outside the API origin.
    #[error("refusing to follow link outside the API origin: {0}")]
    ForeignLink(String),
}
