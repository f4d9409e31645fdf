//! Patient-level scoring and cohort predicates built on the vital sub-scores.

use triage_contracts::patient::Patient;

use crate::{
    parse::loose_number,
    vitals::{
        age_score, blood_pressure_score, temperature_score, valid_age, valid_blood_pressure,
        valid_temperature,
    },
};

/// Temperature (°F) at or above which a patient counts as feverish.
pub const FEVER_THRESHOLD: f64 = 99.6;

/// Risk score at or above which a patient counts as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 4;

/// Composite risk score in `0..=7`: age + blood pressure + temperature.
pub fn risk_score(patient: &Patient) -> u8 {
    age_score(patient.age.as_ref())
        + blood_pressure_score(patient.blood_pressure.as_ref())
        + temperature_score(patient.temperature.as_ref())
}

/// True if any of the three scored vitals fails validation.
pub fn has_data_quality_issue(patient: &Patient) -> bool {
    !valid_blood_pressure(patient.blood_pressure.as_ref())
        || !valid_age(patient.age.as_ref())
        || !valid_temperature(patient.temperature.as_ref())
}

/// True if the raw temperature compares at or above [`FEVER_THRESHOLD`].
///
/// This is a loose comparison on the raw field, not the validated reading:
/// `"100F"` is not feverish here even though it scores as a temperature.
pub fn is_feverish(patient: &Patient) -> bool {
    loose_number(patient.temperature.as_ref()).is_some_and(|t| t >= FEVER_THRESHOLD)
}

/// True if the patient has been scored at or above [`HIGH_RISK_THRESHOLD`].
pub fn is_high_risk(patient: &Patient) -> bool {
    patient.risk_score.is_some_and(|s| s >= HIGH_RISK_THRESHOLD)
}
