//! The canonical paginated shape every upstream response is normalized into.

use serde::{Deserialize, Serialize};

use crate::patient::Patient;

/// Pagination metadata in canonical field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-indexed page number.
    pub current_page: u32,
    pub per_page: u32,
    /// Total records the provider reports across all pages.
    pub total_records: usize,
    /// Records in this page (or, for a collected set, in the whole set).
    pub count: usize,
}

/// One normalized page, or the fully collected patient set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientPage {
    pub patients: Vec<Patient>,
    pub pagination: Pagination,
}
