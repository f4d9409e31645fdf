//! In-crate mock transports shared by the collector, submitter, and pipeline
//! tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use triage_contracts::error::{TriageError, TriageResult};

use crate::traits::Transport;

/// Page layout the mock upstream answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Flat,
    Envelope,
    /// Odd pages flat, even pages envelope.
    Alternating,
}

/// A deterministic paginated upstream over a fixed record list.
///
/// Answers `GET patients?page&limit` from `records`, reporting `total` as the
/// record count (or `reported_total` if set). Scripted failures are consumed
/// one per call before any page is served. POSTs are recorded and answered
/// from `post_responses`, or with a default acknowledgment.
pub struct MockUpstream {
    records: Vec<Value>,
    layout: Layout,
    reported_total: Option<usize>,
    failures: Mutex<VecDeque<TriageError>>,
    post_responses: Mutex<VecDeque<TriageResult<Value>>>,
    pub get_calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub post_calls: Mutex<Vec<(String, Value)>>,
}

impl MockUpstream {
    pub fn new(records: Vec<Value>, layout: Layout) -> Self {
        Self {
            records,
            layout,
            reported_total: None,
            failures: Mutex::new(VecDeque::new()),
            post_responses: Mutex::new(VecDeque::new()),
            get_calls: Mutex::new(vec![]),
            post_calls: Mutex::new(vec![]),
        }
    }

    /// Report `total` regardless of how many records actually exist.
    pub fn reporting_total(mut self, total: usize) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Fail the next GET calls with these errors, in order.
    pub fn failing_gets(self, errors: Vec<TriageError>) -> Self {
        self.failures.lock().unwrap().extend(errors);
        self
    }

    /// Answer the next POST calls with these results, in order.
    pub fn post_results(self, results: Vec<TriageResult<Value>>) -> Self {
        self.post_responses.lock().unwrap().extend(results);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.get_calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, query)| {
                query
                    .iter()
                    .find(|(k, _)| k == "page")
                    .and_then(|(_, v)| v.parse().ok())
            })
            .collect()
    }

    fn page_body(&self, page: usize, limit: usize) -> Value {
        let start = (page.saturating_sub(1) * limit).min(self.records.len());
        let end = (start + limit).min(self.records.len());
        let slice = &self.records[start..end];
        let total = self.reported_total.unwrap_or(self.records.len());

        let flat = match self.layout {
            Layout::Flat => true,
            Layout::Envelope => false,
            Layout::Alternating => page % 2 == 1,
        };

        if flat {
            json!({
                "patients": slice,
                "count": slice.len(),
                "total_records": total,
                "current_page": page,
                "per_page": limit
            })
        } else {
            json!({
                "data": slice,
                "pagination": {
                    "page": page,
                    "limit": limit,
                    "total": total,
                    "totalPages": total.div_ceil(limit.max(1)),
                    "hasNext": end < total,
                    "hasPrevious": page > 1
                },
                "metadata": {
                    "timestamp": "2024-01-15T10:00:00Z",
                    "version": "v2.0",
                    "requestId": format!("req-{page}")
                }
            })
        }
    }
}

#[async_trait]
impl Transport for MockUpstream {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> TriageResult<Value> {
        self.get_calls.lock().unwrap().push((
            path.to_string(),
            query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));

        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }

        let param = |name: &str| -> usize {
            query
                .iter()
                .find(|(k, _)| *k == name)
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(0)
        };
        Ok(self.page_body(param("page"), param("limit")))
    }

    async fn post(&self, path: &str, body: &Value) -> TriageResult<Value> {
        self.post_calls
            .lock()
            .unwrap()
            .push((path.to_string(), body.clone()));

        self.post_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "success": true, "message": "Assessment received" })))
    }
}

/// A record with the given vitals, as the upstream would serve it.
pub fn record(id: &str, age: Value, blood_pressure: Value, temperature: Value) -> Value {
    json!({
        "patient_id": id,
        "name": format!("TestPatient {id}"),
        "age": age,
        "gender": "M",
        "blood_pressure": blood_pressure,
        "temperature": temperature,
        "visit_date": "2024-01-15",
        "diagnosis": "Sample_Condition",
        "medications": "DemoMed_A 10mg"
    })
}

/// `n` unremarkable records with ids `DEMO001..`.
pub fn healthy_records(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| record(&format!("DEMO{i:03}"), json!(30), json!("115/75"), json!(98.6)))
        .collect()
}

pub fn transport_error(reason: &str) -> TriageError {
    TriageError::Transport {
        reason: reason.to_string(),
    }
}
