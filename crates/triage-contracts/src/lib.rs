//! # triage-contracts
//!
//! Shared types and the error enum for the TRIAGE pipeline.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod assessment;
pub mod error;
pub mod page;
pub mod patient;
