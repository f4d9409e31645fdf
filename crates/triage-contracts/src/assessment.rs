//! Cohort assessment submitted downstream, and the report of one run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::page::Pagination;

/// Three independent cohorts of patient ids.
///
/// A patient may appear in any number of the lists. Within each list the
/// order of the collected patient set is preserved. Field names are the
/// submission endpoint's wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub high_risk_patients: Vec<String>,
    pub fever_patients: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

/// Unique identifier for a single pipeline run.
///
/// Appears in every log line the run emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    /// Create a new, unique run ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The externally observable result of a full run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub assessment: Assessment,
    /// Pagination summary of the collected patient set.
    pub fetched: Pagination,
    /// The submission endpoint's response body, untouched. `None` for dry runs.
    pub acknowledgment: Option<serde_json::Value>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
