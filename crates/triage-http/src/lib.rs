//! # triage-http
//!
//! The outer surface of the TRIAGE pipeline: configuration loading and the
//! HTTP transport that `triage-core` talks through.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use triage_http::{HttpTransport, TriageConfig};
//!
//! let config = TriageConfig::load(Some(Path::new("triage.toml")), None)?;
//! let transport = Arc::new(HttpTransport::new(&config)?);
//! ```

pub mod client;
pub mod config;

pub use client::HttpTransport;
pub use config::{RetryConfig, TriageConfig};
