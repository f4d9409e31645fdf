//! The pagination orchestrator: assembles the complete, scored patient set.
//!
//! Pages are fetched strictly one after another. Page N+1 is not requested
//! until page N has been normalized and folded into the accumulator. The
//! loop ends once the accumulated count reaches the total the provider last
//! reported. Every patient is scored exactly once, after assembly.

use std::sync::Arc;

use tracing::{debug, info, warn};

use triage_contracts::{
    error::{TriageError, TriageResult},
    page::{Pagination, PatientPage},
    patient::Patient,
};
use triage_scoring::risk_score;

use crate::{normalize::normalize_page, retry::RetryPolicy, traits::Transport};

/// Path of the paginated patient listing, relative to the API base URL.
pub const PATIENTS_PATH: &str = "patients";

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default upper bound on pages fetched in one session.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Tuning for one collection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorOptions {
    /// Sent as `limit` on every page request.
    pub page_size: u32,
    /// Stop with `PaginationOverrun` after this many pages. `None` removes the
    /// bound, which loops forever against an upstream that under-delivers.
    pub max_pages: Option<u32>,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }
}

/// Fetches every page of patients through a retrying transport.
pub struct PatientCollector {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    options: CollectorOptions,
}

impl PatientCollector {
    pub fn new(transport: Arc<dyn Transport>, retry: RetryPolicy, options: CollectorOptions) -> Self {
        Self {
            transport,
            retry,
            options,
        }
    }

    /// Fetch and normalize a single page. Patients are returned unscored.
    ///
    /// Transport failures are retried per the `RetryPolicy`; a malformed body
    /// is not.
    pub async fn fetch_page(&self, page: u32) -> TriageResult<PatientPage> {
        let query = [
            ("page", page.to_string()),
            ("limit", self.options.page_size.to_string()),
        ];

        let body = self
            .retry
            .run("fetch patients page", || self.transport.get(PATIENTS_PATH, &query))
            .await?;

        normalize_page(body)
    }

    /// Fetch every page, then score every patient.
    ///
    /// The returned pagination reports `current_page` as one less than the
    /// last page fetched, `per_page` as the configured page size,
    /// `total_records` as the last total the provider reported, and `count`
    /// as the number of patients collected.
    ///
    /// # Errors
    ///
    /// Any page that fails after retries, or that is malformed, aborts the
    /// whole collection; no partial set is returned. Exceeding `max_pages`
    /// yields `TriageError::PaginationOverrun`.
    pub async fn fetch_all(&self) -> TriageResult<PatientPage> {
        let mut collected: Vec<Patient> = Vec::new();
        let mut page: u32 = 1;
        let mut last_total: usize = 0;

        let total_records = loop {
            if let Some(max_pages) = self.options.max_pages {
                if page > max_pages {
                    warn!(
                        max_pages,
                        accumulated = collected.len(),
                        "page limit reached before collecting all records"
                    );
                    return Err(TriageError::PaginationOverrun {
                        max_pages,
                        accumulated: collected.len(),
                        total_records: last_total,
                    });
                }
            }

            let fetched = self.fetch_page(page).await.inspect_err(|e| {
                warn!(page, error = %e, "failed to fetch patient page");
            })?;

            last_total = fetched.pagination.total_records;
            debug!(
                page,
                received = fetched.patients.len(),
                total_records = last_total,
                "page fetched"
            );

            collected.extend(fetched.patients);
            if collected.len() >= last_total {
                break last_total;
            }
            page += 1;
        };

        let patients: Vec<Patient> = collected
            .into_iter()
            .map(|patient| {
                let score = risk_score(&patient);
                patient.scored(score)
            })
            .collect();

        info!(
            pages = page,
            patients = patients.len(),
            total_records,
            "patient collection complete"
        );

        Ok(PatientPage {
            pagination: Pagination {
                current_page: page - 1,
                per_page: self.options.page_size,
                total_records,
                count: patients.len(),
            },
            patients,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
