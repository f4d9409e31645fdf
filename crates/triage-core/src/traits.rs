//! The transport seam between the pipeline and the remote API.
//!
//! The pipeline never speaks HTTP itself. It issues GET and POST calls through
//! a `Transport` and receives parsed JSON bodies back. Retrying is layered on
//! top by `RetryPolicy`; implementations make exactly one attempt per call.

use async_trait::async_trait;
use serde_json::Value;

use triage_contracts::error::TriageResult;

/// A single-attempt remote call capability.
///
/// Implementations resolve `path` against their configured base URL, attach
/// credentials, and return the parsed response body. Any failure (network,
/// non-success status, unparsable body) is returned as an error; the caller
/// decides whether to retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `GET path?query` and return the parsed body.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> TriageResult<Value>;

    /// Issue `POST path` with a JSON `body` and return the parsed response.
    async fn post(&self, path: &str, body: &Value) -> TriageResult<Value>;
}
