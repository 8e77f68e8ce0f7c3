//! Bulk resume-upload endpoints.
//!
//! The backend processes an uploaded batch of PDF resumes asynchronously and
//! exposes the job as a polled status resource. The client holds a read-only
//! projection of the job: status transitions are server-driven, and the
//! client only observes and requests pause/resume.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::error::AppError;

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Server-reported status of a bulk upload job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job created, not yet picked up.
    Pending,
    /// Files are being processed.
    Processing,
    /// Processing suspended at the user's request.
    Paused,
    /// All files processed.
    Completed,
    /// The job failed as a whole.
    Failed,
}

impl JobStatus {
    /// Returns true if no further processing will occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// String form matching the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Paused => "paused",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

/// Outcome of one processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutcome {
    Success,
    Failure,
}

impl FileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOutcome::Success => "success",
            FileOutcome::Failure => "failure",
        }
    }
}

/// Token-usage / cost breakdown for one processed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub total_cost_usd: f64,
}

/// Per-file result, appended by the server as files are processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub file_name: String,
    pub status: FileOutcome,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
    /// `Some(false)` signals the file matched an existing candidate record
    /// instead of creating a new one.
    #[serde(default)]
    pub is_new: Option<bool>,
    #[serde(default)]
    pub token_usage: Option<TokenUsage>,
}

/// Full job snapshot from `GET /bulk-upload/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkJobSnapshot {
    pub id: i64,
    pub status: JobStatus,
    pub total_files: u64,
    pub processed: u64,
    pub failed_count: u64,
    #[serde(default)]
    pub file_names: Vec<String>,
    #[serde(default)]
    pub results: Vec<FileResult>,
    #[serde(default)]
    pub total_cost_usd: String,
    #[serde(default)]
    pub created_at: String,
}

/// Job summary from `GET /bulk-upload` (the listing omits per-file detail).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkJobSummary {
    pub id: i64,
    pub status: JobStatus,
    pub total_files: u64,
    pub processed: u64,
    pub failed_count: u64,
    #[serde(default)]
    pub total_cost_usd: String,
    #[serde(default)]
    pub created_at: String,
}

/// Response of the batch creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedJob {
    pub job_id: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Endpoints
// ─────────────────────────────────────────────────────────────────────────────

/// Submits a batch of files as one multipart creation request.
///
/// Each entry is a `(file name, bytes)` pair; all parts go under the `files`
/// field. Validation of names (PDF filtering) happens before this call.
pub async fn create_job(
    api: &ApiClient,
    files: Vec<(String, Vec<u8>)>,
) -> Result<CreatedJob, AppError> {
    let mut form = Form::new();
    for (name, bytes) in files {
        form = form.part("files", Part::bytes(bytes).file_name(name));
    }

    api.post_multipart("/bulk-upload", form).await
}

/// Fetches the current snapshot of a job.
pub async fn get_job(api: &ApiClient, job_id: i64) -> Result<BulkJobSnapshot, AppError> {
    api.get_json(&format!("/bulk-upload/{job_id}")).await
}

/// Lists all bulk jobs visible to the current user.
pub async fn list_jobs(api: &ApiClient) -> Result<Vec<BulkJobSummary>, AppError> {
    api.get_json("/bulk-upload").await
}

/// Requests a pause. Carries no client-side precondition: the backend may
/// reject the transition, and the rejection message is surfaced verbatim.
pub async fn pause_job(api: &ApiClient, job_id: i64) -> Result<(), AppError> {
    api.patch_empty(&format!("/bulk-upload/{job_id}/pause")).await
}

/// Requests a resume; same contract as [`pause_job`].
pub async fn resume_job(api: &ApiClient, job_id: i64) -> Result<(), AppError> {
    api.patch_empty(&format!("/bulk-upload/{job_id}/resume")).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
