//! Directory CRUD: candidates, companies, recruiters, and requirements.
//!
//! These are thin wrappers around the backend's resource endpoints; the
//! client holds only the last fetched snapshot of each record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::client::{build_query, ApiClient};
use crate::error::AppError;

// ─────────────────────────────────────────────────────────────────────────────
// Candidates
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub interested_position: Option<String>,
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub recruiter_id: Option<i64>,
    #[serde(default)]
    pub recruiter_name: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Candidate {
    /// Display name: full name, falling back to email, then the id.
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();

        if !full.is_empty() {
            full.to_string()
        } else if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            email.to_string()
        } else {
            format!("Candidate {}", self.id)
        }
    }
}

/// Creation/update payload for a candidate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interested_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skills: Vec<String>,
}

pub async fn list_candidates(
    api: &ApiClient,
    search: Option<&str>,
) -> Result<Vec<Candidate>, AppError> {
    let query = build_query(&[("q", search)]);
    api.get_json(&format!("/candidates{query}")).await
}

pub async fn get_candidate(api: &ApiClient, id: i64) -> Result<Candidate, AppError> {
    api.get_json(&format!("/candidates/{id}")).await
}

pub async fn create_candidate(
    api: &ApiClient,
    draft: &CandidateDraft,
) -> Result<Candidate, AppError> {
    api.post_json("/candidates", draft).await
}

pub async fn update_candidate(
    api: &ApiClient,
    id: i64,
    draft: &CandidateDraft,
) -> Result<(), AppError> {
    api.put_json(&format!("/candidates/{id}"), draft).await
}

pub async fn delete_candidate(api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/candidates/{id}")).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Companies
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_first_name: Option<String>,
    #[serde(default)]
    pub contact_last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

pub async fn list_companies(
    api: &ApiClient,
    search: Option<&str>,
) -> Result<Vec<Company>, AppError> {
    let query = build_query(&[("q", search)]);
    api.get_json(&format!("/companies{query}")).await
}

pub async fn get_company(api: &ApiClient, id: i64) -> Result<Company, AppError> {
    api.get_json(&format!("/companies/{id}")).await
}

pub async fn create_company(api: &ApiClient, draft: &CompanyDraft) -> Result<Company, AppError> {
    api.post_json("/companies", draft).await
}

pub async fn update_company(
    api: &ApiClient,
    id: i64,
    draft: &CompanyDraft,
) -> Result<(), AppError> {
    api.put_json(&format!("/companies/{id}"), draft).await
}

pub async fn delete_company(api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/companies/{id}")).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Recruiters
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recruiter {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct NewRecruiterRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    password: &'a str,
}

pub async fn list_recruiters(api: &ApiClient) -> Result<Vec<Recruiter>, AppError> {
    api.get_json("/recruiters").await
}

pub async fn get_recruiter(api: &ApiClient, id: i64) -> Result<Recruiter, AppError> {
    api.get_json(&format!("/recruiters/{id}")).await
}

/// Creates a recruiter account.
///
/// The password confirmation check is purely local: on mismatch nothing is
/// sent and the confirmation value never leaves the process.
#[allow(clippy::too_many_arguments)]
pub async fn create_recruiter(
    api: &ApiClient,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: Option<&str>,
    password: &str,
    confirm_password: &str,
) -> Result<Recruiter, AppError> {
    if password != confirm_password {
        return Err(AppError::Validation("Passwords do not match".into()));
    }

    api.post_json(
        "/recruiters",
        &NewRecruiterRequest {
            first_name,
            last_name,
            email,
            phone,
            password,
        },
    )
    .await
}

pub async fn delete_recruiter(api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/recruiters/{id}")).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Requirements
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub recruiter_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub min_exp: Option<f64>,
    #[serde(default)]
    pub max_exp: Option<f64>,
    #[serde(default)]
    pub positions: Option<u32>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub requirement_date: Option<String>,
    #[serde(default)]
    pub validity_days: Option<u32>,
    #[serde(default)]
    pub filled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RequirementDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_exp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_exp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_days: Option<u32>,
}

pub async fn list_requirements(
    api: &ApiClient,
    status: Option<&str>,
) -> Result<Vec<Requirement>, AppError> {
    let query = build_query(&[("status", status)]);
    api.get_json(&format!("/requirements{query}")).await
}

pub async fn get_requirement(api: &ApiClient, id: i64) -> Result<Requirement, AppError> {
    api.get_json(&format!("/requirements/{id}")).await
}

pub async fn create_requirement(
    api: &ApiClient,
    draft: &RequirementDraft,
) -> Result<Requirement, AppError> {
    api.post_json("/requirements", draft).await
}

pub async fn update_requirement(
    api: &ApiClient,
    id: i64,
    draft: &RequirementDraft,
) -> Result<(), AppError> {
    api.put_json(&format!("/requirements/{id}"), draft).await
}

pub async fn delete_requirement(api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/requirements/{id}")).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Candidate matching
// ─────────────────────────────────────────────────────────────────────────────

/// One dimension of a match score (skills, experience, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdownEntry {
    #[serde(default)]
    pub score: f64,
}

/// A candidate scored against a requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedCandidate {
    #[serde(default)]
    pub candidate_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub overall_score: f64,
    #[serde(default)]
    pub breakdown: HashMap<String, ScoreBreakdownEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(default)]
    pub total_matches: u64,
    #[serde(default)]
    pub score_threshold: Option<f64>,
}

/// Offset pagination as reported by the matching endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub total: u64,
}

/// One page of match results for a requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedCandidatesPage {
    #[serde(default)]
    pub summary: MatchSummary,
    #[serde(default)]
    pub matches: Vec<MatchedCandidate>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Fetches a page of AI-matched candidates for a requirement.
pub async fn matched_candidates(
    api: &ApiClient,
    requirement_id: i64,
    skip: u64,
    limit: u64,
) -> Result<MatchedCandidatesPage, AppError> {
    let skip = skip.to_string();
    let limit = limit.to_string();
    let query = build_query(&[("skip", Some(skip.as_str())), ("limit", Some(limit.as_str()))]);
    api.get_json(&format!("/match/{requirement_id}{query}")).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
