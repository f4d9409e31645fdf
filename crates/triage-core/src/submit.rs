//! Posts the assessment to the downstream submission endpoint.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use triage_contracts::{assessment::Assessment, error::TriageResult};

use crate::{retry::RetryPolicy, traits::Transport};

/// Path of the assessment submission endpoint, relative to the API base URL.
pub const SUBMIT_PATH: &str = "submit-assessment";

/// Sends assessments through a retrying transport.
pub struct Submitter {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl Submitter {
    pub fn new(transport: Arc<dyn Transport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// POST `assessment` and return the endpoint's response body untouched.
    ///
    /// Fails with the last attempt's error once the retry budget is spent.
    pub async fn submit(&self, assessment: &Assessment) -> TriageResult<Value> {
        let body = json!({
            "high_risk_patients": assessment.high_risk_patients,
            "fever_patients": assessment.fever_patients,
            "data_quality_issues": assessment.data_quality_issues,
        });

        info!(
            high_risk = assessment.high_risk_patients.len(),
            fever = assessment.fever_patients.len(),
            data_quality = assessment.data_quality_issues.len(),
            "submitting assessment"
        );

        self.retry
            .run("submit assessment", || self.transport.post(SUBMIT_PATH, &body))
            .await
    }
}
