//! `reqwest`-backed implementation of the `Transport` trait.
//!
//! One `HttpTransport` is built per run from a validated `TriageConfig`. It
//! resolves relative paths against the base URL, attaches the `x-api-key`
//! header to every request, and enforces the configured per-request timeout.
//! Each call is a single attempt; retrying happens in `RetryPolicy`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use triage_contracts::error::{TriageError, TriageResult};
use triage_core::Transport;

use crate::config::TriageConfig;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP transport for the patient and submission endpoints.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a client from `config`.
    ///
    /// Returns `TriageError::ConfigError` if the API key is not a legal header
    /// value or the client cannot be constructed.
    pub fn new(config: &TriageConfig) -> TriageResult<Self> {
        let mut api_key = HeaderValue::from_str(&config.api_key).map_err(|e| {
            TriageError::ConfigError {
                reason: format!("api_key is not a valid header value: {}", e),
            }
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| TriageError::ConfigError {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turn a response into its JSON body, or an error for non-2xx statuses.
    async fn read_json(response: reqwest::Response) -> TriageResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(send_error)?;
        serde_json::from_str(&text).map_err(|e| TriageError::MalformedResponse {
            reason: format!("response body is not JSON: {}", e),
        })
    }
}

fn send_error(e: reqwest::Error) -> TriageError {
    let reason = if e.is_timeout() {
        format!("request timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    };
    TriageError::Transport { reason }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> TriageResult<Value> {
        let url = self.url(path);
        debug!(url = %url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(send_error)?;
        Self::read_json(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> TriageResult<Value> {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(send_error)?;
        Self::read_json(response).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
