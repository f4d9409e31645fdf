//! Validity predicates and sub-scores for the three scored vital signs.
//!
//! Every score function re-validates its input: callers may score a raw value
//! without checking validity first, and an invalid value scores 0. Invalid
//! input is never an error.

use triage_contracts::patient::Measurement;

use crate::parse::{is_blank, leading_float, leading_int};

// ── Blood pressure ────────────────────────────────────────────────────────────

/// Split a `"systolic/diastolic"` reading into its two integers.
///
/// Only the first two `/`-separated parts are read; each is trimmed and parsed
/// by its leading integer. Non-string readings never parse.
fn blood_pressure_parts(reading: Option<&Measurement>) -> Option<(i64, i64)> {
    let Some(Measurement::Text(text)) = reading else {
        return None;
    };
    if text.is_empty() {
        return None;
    }

    let mut parts = text.split('/');
    let systolic = leading_int(parts.next()?.trim())?;
    let diastolic = leading_int(parts.next()?.trim())?;
    Some((systolic, diastolic))
}

/// True iff `reading` is a non-empty `"A/B"` string with two integer parts.
pub fn valid_blood_pressure(reading: Option<&Measurement>) -> bool {
    blood_pressure_parts(reading).is_some()
}

/// Blood-pressure sub-score in `0..=3`.
///
/// Thresholds are checked most severe first; the first match wins.
pub fn blood_pressure_score(reading: Option<&Measurement>) -> u8 {
    let Some((systolic, diastolic)) = blood_pressure_parts(reading) else {
        return 0;
    };

    // Stage 2 hypertension
    if systolic >= 140 || diastolic >= 90 {
        return 3;
    }
    // Stage 1 hypertension
    if systolic >= 130 || diastolic >= 80 {
        return 2;
    }
    // Elevated
    if systolic >= 120 && diastolic < 80 {
        return 1;
    }
    0
}

// ── Temperature ───────────────────────────────────────────────────────────────

fn temperature_value(value: Option<&Measurement>) -> Option<f64> {
    if is_blank(value) {
        return None;
    }
    match value? {
        Measurement::Number(n) => Some(*n),
        Measurement::Text(s) => leading_float(s),
        Measurement::Other(_) => None,
    }
}

/// False for blank input; otherwise the value must read as a decimal number.
pub fn valid_temperature(value: Option<&Measurement>) -> bool {
    temperature_value(value).is_some()
}

/// Temperature sub-score in `0..=2`: ≥ 101 °F → 2, ≥ 99.6 °F → 1.
pub fn temperature_score(value: Option<&Measurement>) -> u8 {
    match temperature_value(value) {
        Some(t) if t >= 101.0 => 2,
        Some(t) if t >= 99.6 => 1,
        _ => 0,
    }
}

// ── Age ───────────────────────────────────────────────────────────────────────

/// Numbers are taken as-is; strings by their leading integer.
fn age_value(value: Option<&Measurement>) -> Option<f64> {
    if is_blank(value) {
        return None;
    }
    match value? {
        Measurement::Number(n) => Some(*n),
        Measurement::Text(s) => leading_int(s).map(|n| n as f64),
        Measurement::Other(_) => None,
    }
}

/// False for blank input; otherwise the value must read as an integer.
pub fn valid_age(value: Option<&Measurement>) -> bool {
    age_value(value).is_some()
}

/// Age sub-score in `0..=2`: ≥ 65 → 2, ≥ 40 → 1.
pub fn age_score(value: Option<&Measurement>) -> u8 {
    match age_value(value) {
        Some(a) if a >= 65.0 => 2,
        Some(a) if a >= 40.0 => 1,
        _ => 0,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
