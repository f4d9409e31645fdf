//! The end-to-end run: collect → categorize → submit.
//!
//! One `Pipeline::run` call is one run. It either assembles the complete
//! patient set and submits its assessment, or fails without submitting
//! anything. A collection failure never leads to a partial submission.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, info_span, Instrument};

use triage_contracts::{
    assessment::{RunId, RunReport},
    error::TriageResult,
};

use crate::{
    categorize::categorize,
    collector::{CollectorOptions, PatientCollector},
    retry::RetryPolicy,
    submit::Submitter,
    traits::Transport,
};

/// Whether a run ends by submitting its assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Submit,
    /// Collect and categorize only. The report carries no acknowledgment.
    DryRun,
}

/// Wires the collector and submitter over one shared transport.
pub struct Pipeline {
    collector: PatientCollector,
    submitter: Submitter,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn Transport>, retry: RetryPolicy, options: CollectorOptions) -> Self {
        Self {
            collector: PatientCollector::new(Arc::clone(&transport), retry, options),
            submitter: Submitter::new(transport, retry),
        }
    }

    /// Execute one run under a fresh `RunId`.
    ///
    /// Every log line emitted during the run carries the `run_id` field.
    pub async fn run(&self, mode: RunMode) -> TriageResult<RunReport> {
        let run_id = RunId::new();
        let span = info_span!("triage_run", run_id = %run_id);
        self.execute(run_id, mode).instrument(span).await
    }

    async fn execute(&self, run_id: RunId, mode: RunMode) -> TriageResult<RunReport> {
        let started_at = Utc::now();
        info!(?mode, "run starting");

        let collected = self.collector.fetch_all().await?;
        let assessment = categorize(&collected.patients);

        info!(
            patients = collected.patients.len(),
            high_risk = assessment.high_risk_patients.len(),
            fever = assessment.fever_patients.len(),
            data_quality = assessment.data_quality_issues.len(),
            "patients categorized"
        );

        let acknowledgment = match mode {
            RunMode::Submit => Some(self.submitter.submit(&assessment).await?),
            RunMode::DryRun => {
                info!("dry run, skipping submission");
                None
            }
        };

        Ok(RunReport {
            run_id,
            assessment,
            fetched: collected.pagination,
            acknowledgment,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use triage_contracts::error::TriageError;

    use super::*;
    use crate::{
        collector::CollectorOptions,
        retry::RetryPolicy,
        submit::SUBMIT_PATH,
        testing::{record, transport_error, Layout, MockUpstream},
    };

    fn ward() -> Vec<serde_json::Value> {
        vec![
            record("DEMO001", json!(72), json!("150/95"), json!(101.4)),
            record("DEMO002", json!(30), json!("115/75"), json!(98.6)),
            record("DEMO003", json!("fifty-three"), json!("118/76"), json!(99.8)),
            record("DEMO004", json!(45), json!("INVALID"), json!(98.1)),
            record("DEMO005", json!(67), json!("132/85"), json!("100.1")),
            record("DEMO006", json!(38), json!("122/78"), json!(null)),
            record("DEMO007", json!(55), json!("141/70"), json!(98.8)),
            record("DEMO008", json!(61), json!("/90"), json!(102.0)),
            record("DEMO009", json!(80), json!("128/79"), json!(99.6)),
            record("DEMO010", json!(25), json!("119/60"), json!("TEMP_ERROR")),
            record("DEMO011", json!(40), json!("130/80"), json!(98.0)),
            record("DEMO012", json!(""), json!("135/88"), json!(100.5)),
        ]
    }

    fn pipeline(upstream: Arc<MockUpstream>) -> Pipeline {
        Pipeline::new(
            upstream,
            RetryPolicy::new(3, Duration::ZERO),
            CollectorOptions {
                page_size: 5,
                max_pages: Some(10),
            },
        )
    }

    #[tokio::test]
    async fn full_run_submits_expected_cohorts() {
        let upstream = Arc::new(MockUpstream::new(ward(), Layout::Alternating));
        let report = pipeline(upstream.clone()).run(RunMode::Submit).await.unwrap();

        // Scores: 001=2+3+2, 005=2+2+1, 007=1+3+0, 008=1+0+2, 009=2+1+1, 012=0+2+1.
        assert_eq!(
            report.assessment.high_risk_patients,
            vec!["DEMO001", "DEMO005", "DEMO007", "DEMO009"]
        );
        assert_eq!(
            report.assessment.fever_patients,
            vec!["DEMO001", "DEMO003", "DEMO005", "DEMO008", "DEMO009", "DEMO012"]
        );
        assert_eq!(
            report.assessment.data_quality_issues,
            vec!["DEMO003", "DEMO004", "DEMO006", "DEMO008", "DEMO010", "DEMO012"]
        );

        assert_eq!(report.fetched.count, 12);
        assert_eq!(report.fetched.total_records, 12);
        assert!(report.acknowledgment.is_some());
        assert!(report.finished_at >= report.started_at);

        let posts = upstream.post_calls.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, SUBMIT_PATH);
        assert_eq!(
            posts[0].1["high_risk_patients"],
            json!(["DEMO001", "DEMO005", "DEMO007", "DEMO009"])
        );
    }

    #[tokio::test]
    async fn dry_run_does_not_submit() {
        let upstream = Arc::new(MockUpstream::new(ward(), Layout::Flat));
        let report = pipeline(upstream.clone()).run(RunMode::DryRun).await.unwrap();

        assert!(report.acknowledgment.is_none());
        assert_eq!(report.fetched.count, 12);
        assert!(upstream.post_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_prevents_submission() {
        let upstream = Arc::new(
            MockUpstream::new(ward(), Layout::Flat).failing_gets(vec![
                transport_error("down 1"),
                transport_error("down 2"),
                transport_error("down 3"),
            ]),
        );
        let err = pipeline(upstream.clone()).run(RunMode::Submit).await.unwrap_err();

        assert!(matches!(err, TriageError::Transport { .. }));
        assert!(upstream.post_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submission_failure_fails_the_run() {
        let upstream = Arc::new(MockUpstream::new(ward(), Layout::Envelope).post_results(vec![
            Err(TriageError::Http { status: 500, body: "boom".into() }),
            Err(TriageError::Http { status: 500, body: "boom".into() }),
            Err(TriageError::Http { status: 503, body: "unavailable".into() }),
        ]));
        let err = pipeline(upstream.clone()).run(RunMode::Submit).await.unwrap_err();

        match err {
            TriageError::Http { status, .. } => assert_eq!(status, 503),
            other => panic!("expected Http error, got {other:?}"),
        }
        assert_eq!(upstream.post_calls.lock().unwrap().len(), 3);
    }
}
