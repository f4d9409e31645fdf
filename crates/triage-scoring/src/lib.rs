//! # triage-scoring
//!
//! Deterministic vital-sign validation and risk scoring.
//!
//! Three vitals are scored independently and summed into a 0–7 risk score:
//!
//! | Vital          | 0          | 1            | 2              | 3              |
//! |----------------|------------|--------------|----------------|----------------|
//! | Blood pressure | normal     | elevated     | stage 1        | stage 2        |
//! | Temperature    | < 99.6 °F  | ≥ 99.6 °F    | ≥ 101 °F       | —              |
//! | Age            | < 40       | 40–64        | ≥ 65           | —              |
//!
//! Invalid or missing values score 0 and mark the patient for data-quality
//! review. Nothing in this crate returns an error.

pub mod parse;
pub mod risk;
pub mod vitals;

pub use risk::{has_data_quality_issue, is_feverish, is_high_risk, risk_score};
pub use vitals::{
    age_score, blood_pressure_score, temperature_score, valid_age, valid_blood_pressure,
    valid_temperature,
};
