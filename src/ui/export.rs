//! CSV export of directory listings.

use std::path::Path;

use crate::api::directory::Candidate;
use crate::api::interviews::Interview;
use crate::error::AppError;

/// Column headers for the candidate export.
const CANDIDATE_HEADERS: &[&str] = &[
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Interested Position",
    "Recruiter",
    "Location",
];

/// Column headers for the interview export.
const INTERVIEW_HEADERS: &[&str] = &[
    "ID",
    "Candidate",
    "Requirement",
    "Scheduled At",
    "Mode",
    "Status",
];

/// Writes headers plus rows to `path`. Quoting and escaping are handled by
/// the CSV writer.
fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::Internal(format!("Failed to create {}: {e}", path.display())))?;

    writer
        .write_record(headers)
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {e}")))?;

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {e}")))?;

    Ok(())
}

/// Exports a candidate listing.
pub fn export_candidates(path: &Path, candidates: &[Candidate]) -> Result<(), AppError> {
    let rows: Vec<Vec<String>> = candidates
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.first_name.clone().unwrap_or_default(),
                c.last_name.clone().unwrap_or_default(),
                c.email.clone().unwrap_or_default(),
                c.phone.clone().unwrap_or_default(),
                c.interested_position.clone().unwrap_or_default(),
                c.recruiter_name.clone().unwrap_or_default(),
                c.current_location.clone().unwrap_or_default(),
            ]
        })
        .collect();

    write_csv(path, CANDIDATE_HEADERS, &rows)
}

/// Exports an interview listing.
pub fn export_interviews(path: &Path, interviews: &[Interview]) -> Result<(), AppError> {
    let rows: Vec<Vec<String>> = interviews
        .iter()
        .map(|i| {
            vec![
                i.id.to_string(),
                i.candidate_id.to_string(),
                i.requirement_id.map(|r| r.to_string()).unwrap_or_default(),
                i.scheduled_at.clone().unwrap_or_default(),
                i.mode.map(|m| m.as_str().to_string()).unwrap_or_default(),
                i.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            ]
        })
        .collect();

    write_csv(path, INTERVIEW_HEADERS, &rows)
}
