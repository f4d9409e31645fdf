//! Splits the scored patient set into the three assessment cohorts.

use triage_contracts::{assessment::Assessment, patient::Patient};
use triage_scoring::{has_data_quality_issue, is_feverish, is_high_risk};

/// Build the cohort lists for a fully scored patient set.
///
/// Each cohort is an independent filter over `patients`, so an id may appear
/// in several lists. Input order is preserved within every list.
pub fn categorize(patients: &[Patient]) -> Assessment {
    Assessment {
        high_risk_patients: ids_where(patients, is_high_risk),
        fever_patients: ids_where(patients, is_feverish),
        data_quality_issues: ids_where(patients, has_data_quality_issue),
    }
}

fn ids_where(patients: &[Patient], predicate: impl Fn(&Patient) -> bool) -> Vec<String> {
    patients
        .iter()
        .filter(|p| predicate(*p))
        .map(|p| p.patient_id.clone())
        .collect()
}
