//! Runtime error types for the TRIAGE pipeline.
//!
//! All fallible operations return `TriageResult<T>`. Invalid vital-sign input
//! is deliberately absent here: it degrades to a zero sub-score and a
//! data-quality flag, never to an error.

use thiserror::Error;

/// The unified error type for the TRIAGE pipeline.
#[derive(Debug, Error)]
pub enum TriageError {
    /// A single remote call failed before a response was received
    /// (connection refused, timeout, TLS, ...). Retried by `RetryPolicy`.
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    /// The remote API answered with a non-success status code. Retried by
    /// `RetryPolicy` like any other transport failure.
    #[error("remote API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body matched neither known page shape, or matched one but
    /// could not be decoded. Never retried.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// The collector fetched `max_pages` pages without reaching the reported
    /// total. Raised instead of looping forever against a misbehaving upstream.
    #[error(
        "pagination exceeded {max_pages} pages with {accumulated} of {total_records} records collected"
    )]
    PaginationOverrun {
        max_pages: u32,
        accumulated: usize,
        total_records: usize,
    },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the TRIAGE crates.
pub type TriageResult<T> = Result<T, TriageError>;
