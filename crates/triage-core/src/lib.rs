//! # triage-core
//!
//! The fetch → score → categorize → submit pipeline.
//!
//! This crate provides:
//! - The `Transport` trait, the only seam to the remote API
//! - `RetryPolicy`, a constant-delay retry wrapper shared by fetch and submit
//! - `normalize_page`, which folds both upstream page layouts into one shape
//! - `PatientCollector`, which assembles and scores the full patient set
//! - `categorize` and `Submitter`, which build and deliver the assessment
//! - `Pipeline`, which runs the whole sequence once
//!
//! ## Usage
//!
//! ```rust,ignore
//! use triage_core::{Pipeline, RunMode, RetryPolicy, CollectorOptions};
//!
//! let pipeline = Pipeline::new(transport, RetryPolicy::default(), CollectorOptions::default());
//! let report = pipeline.run(RunMode::Submit).await?;
//! ```

pub mod categorize;
pub mod collector;
pub mod normalize;
pub mod pipeline;
pub mod retry;
pub mod submit;
pub mod traits;

#[cfg(test)]
mod testing;

pub use categorize::categorize;
pub use collector::{CollectorOptions, PatientCollector};
pub use normalize::normalize_page;
pub use pipeline::{Pipeline, RunMode};
pub use retry::RetryPolicy;
pub use submit::Submitter;
pub use traits::Transport;
