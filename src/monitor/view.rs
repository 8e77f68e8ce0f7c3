//! Derived display data for the latest job snapshot.
//!
//! Everything here is a pure projection: no state, no I/O. The snapshot is
//! whatever the last poll returned, and may lag the server.

use crate::api::bulk::{BulkJobSnapshot, FileOutcome, FileResult};

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Display classification of a per-file result. Not a stored field: derived
/// from the result's status and `is_new` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultClass {
    Success,
    /// Successfully processed, but matched an existing candidate record.
    Duplicate,
    Failure,
}

impl ResultClass {
    pub fn label(&self) -> &'static str {
        match self {
            ResultClass::Success => "SUCCESS",
            ResultClass::Duplicate => "DUPLICATE",
            ResultClass::Failure => "FAILURE",
        }
    }
}

/// Classifies one result for display.
///
/// A result is a duplicate only when it succeeded and `is_new` is explicitly
/// false; a missing flag counts as new. Failures are failures regardless of
/// the flag.
pub fn classify(result: &FileResult) -> ResultClass {
    match result.status {
        FileOutcome::Failure => ResultClass::Failure,
        FileOutcome::Success => {
            if result.is_new == Some(false) {
                ResultClass::Duplicate
            } else {
                ResultClass::Success
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Progress
// ─────────────────────────────────────────────────────────────────────────────

/// Fraction of files processed, in `[0, 1]`. Zero when the job reports no
/// files at all.
pub fn progress_fraction(snapshot: &BulkJobSnapshot) -> f64 {
    if snapshot.total_files == 0 {
        0.0
    } else {
        snapshot.processed as f64 / snapshot.total_files as f64
    }
}

/// Names of files not yet processed, assuming the backend works through the
/// batch in submission order. Best-effort: if the backend reorders, this
/// listing is merely indicative.
pub fn pending_file_names(snapshot: &BulkJobSnapshot) -> &[String] {
    snapshot
        .file_names
        .get(snapshot.processed as usize..)
        .unwrap_or(&[])
}

// ─────────────────────────────────────────────────────────────────────────────
// Rows
// ─────────────────────────────────────────────────────────────────────────────

/// One rendered results-table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// 1-based position in the results list.
    pub index: usize,
    pub file_name: String,
    pub label: &'static str,
    pub candidate: String,
    pub email: String,
    pub cost: String,
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

/// Projects the snapshot's results into display rows.
pub fn result_rows(snapshot: &BulkJobSnapshot) -> Vec<ResultRow> {
    snapshot
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| ResultRow {
            index: i + 1,
            file_name: result.file_name.clone(),
            label: classify(result).label(),
            candidate: result
                .candidate_name
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            email: result.email.clone().unwrap_or_else(|| "-".to_string()),
            cost: result
                .token_usage
                .as_ref()
                .map(|usage| format!("${}", usage.total_cost_usd))
                .unwrap_or_else(|| "-".to_string()),
            error: result.error.clone(),
            warnings: result.warnings.clone().unwrap_or_default(),
        })
        .collect()
}

/// One-line progress summary, e.g.
/// `3 / 10 processed (1 failed) | PROCESSING | cost $0.034`.
pub fn summary_line(snapshot: &BulkJobSnapshot) -> String {
    let failed = if snapshot.failed_count > 0 {
        format!(" ({} failed)", snapshot.failed_count)
    } else {
        String::new()
    };

    let cost = if snapshot.total_cost_usd.is_empty() {
        String::new()
    } else {
        format!(" | cost ${}", snapshot.total_cost_usd)
    };

    format!(
        "{} / {} processed{} | {}{}",
        snapshot.processed,
        snapshot.total_files,
        failed,
        snapshot.status.as_str().to_uppercase(),
        cost
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
