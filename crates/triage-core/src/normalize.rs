//! Reconciles the two upstream page shapes into one canonical `PatientPage`.
//!
//! The provider serves either of two layouts for the same endpoint:
//!
//! ```json
//! { "patients": [...], "count": 10, "total_records": 50, "current_page": 1, "per_page": 10 }
//! ```
//!
//! ```json
//! { "data": [...], "pagination": { "page": 1, "limit": 10, "total": 50, ... }, "metadata": { ... } }
//! ```
//!
//! The layout is picked by a discriminant check (`data` holding an array,
//! else `patients` holding an array), then decoded strictly into that layout.
//! Anything else is a `MalformedResponse`; the normalizer never guesses.

use serde::Deserialize;
use serde_json::Value;

use triage_contracts::{
    error::{TriageError, TriageResult},
    page::{Pagination, PatientPage},
    patient::Patient,
};

/// Flat layout: patients and pagination fields side by side.
#[derive(Debug, Deserialize)]
struct FlatPage {
    patients: Vec<Patient>,
    #[serde(default)]
    count: Option<usize>,
    total_records: usize,
    current_page: u32,
    per_page: u32,
}

/// Envelope layout: patients under `data`, pagination nested. The
/// `metadata` block and the derived pagination flags are ignored.
#[derive(Debug, Deserialize)]
struct EnvelopePage {
    data: Vec<Patient>,
    pagination: EnvelopePagination,
}

#[derive(Debug, Deserialize)]
struct EnvelopePagination {
    page: u32,
    limit: u32,
    total: usize,
}

/// A decoded upstream page, tagged by the layout it arrived in.
#[derive(Debug)]
enum UpstreamPage {
    Flat(FlatPage),
    Envelope(EnvelopePage),
}

impl UpstreamPage {
    fn decode(body: Value) -> TriageResult<Self> {
        let has_array = |key: &str| body.get(key).is_some_and(Value::is_array);

        if has_array("data") {
            serde_json::from_value(body)
                .map(UpstreamPage::Envelope)
                .map_err(|e| malformed(format!("envelope page did not decode: {e}")))
        } else if has_array("patients") {
            serde_json::from_value(body)
                .map(UpstreamPage::Flat)
                .map_err(|e| malformed(format!("flat page did not decode: {e}")))
        } else {
            Err(malformed(format!(
                "expected a `data` or `patients` array, got {}",
                describe(&body)
            )))
        }
    }

    fn into_canonical(self) -> PatientPage {
        match self {
            UpstreamPage::Flat(page) => {
                let count = page.count.unwrap_or(page.patients.len());
                PatientPage {
                    pagination: Pagination {
                        current_page: page.current_page,
                        per_page: page.per_page,
                        total_records: page.total_records,
                        count,
                    },
                    patients: page.patients,
                }
            }
            UpstreamPage::Envelope(page) => PatientPage {
                pagination: Pagination {
                    current_page: page.pagination.page,
                    per_page: page.pagination.limit,
                    total_records: page.pagination.total,
                    // Recounted; the envelope carries no trustworthy count.
                    count: page.data.len(),
                },
                patients: page.data,
            },
        }
    }
}

/// Normalize one upstream response body into the canonical page shape.
///
/// # Errors
///
/// `TriageError::MalformedResponse` if the body matches neither layout, or
/// matches one but is missing fields or carries values of the wrong type.
pub fn normalize_page(body: Value) -> TriageResult<PatientPage> {
    UpstreamPage::decode(body).map(UpstreamPage::into_canonical)
}

fn malformed(reason: String) -> TriageError {
    TriageError::MalformedResponse { reason }
}

fn describe(body: &Value) -> String {
    match body {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Array(_) => "array".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Null => "null".to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
