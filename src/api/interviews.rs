//! Interview scheduling endpoints.
//!
//! An interview is created by an explicit scheduling action and never mutated
//! client-side afterwards; listings are filtered by status on the server.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::client::{build_query, ApiClient};
use crate::error::AppError;

/// Wire format of `scheduled_at` (e.g. `2026-08-12 14:00`).
pub const SCHEDULED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// How the interview is conducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewMode {
    Telephonic,
    Online,
    #[serde(rename = "Face to Face")]
    FaceToFace,
}

impl InterviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewMode::Telephonic => "Telephonic",
            InterviewMode::Online => "Online",
            InterviewMode::FaceToFace => "Face to Face",
        }
    }

    /// Parses the user-facing label, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.to_ascii_lowercase().as_str() {
            "telephonic" => Ok(InterviewMode::Telephonic),
            "online" => Ok(InterviewMode::Online),
            "face to face" | "face-to-face" => Ok(InterviewMode::FaceToFace),
            _ => Err(AppError::Validation(format!(
                "Unknown interview mode: {raw} (expected Telephonic, Online, or Face to Face)"
            ))),
        }
    }
}

/// Lifecycle status of an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Pending,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Pending => "pending",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.to_ascii_lowercase().as_str() {
            "scheduled" => Ok(InterviewStatus::Scheduled),
            "pending" => Ok(InterviewStatus::Pending),
            "completed" => Ok(InterviewStatus::Completed),
            "cancelled" => Ok(InterviewStatus::Cancelled),
            _ => Err(AppError::Validation(format!(
                "Unknown interview status: {raw}"
            ))),
        }
    }
}

/// An interview record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    pub id: i64,
    pub candidate_id: i64,
    #[serde(default)]
    pub requirement_id: Option<i64>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub mode: Option<InterviewMode>,
    #[serde(default)]
    pub status: Option<InterviewStatus>,
}

/// Creation payload for `POST /interviews`.
#[derive(Debug, Clone, Serialize)]
pub struct NewInterview {
    pub tenant_id: i64,
    pub candidate_id: i64,
    pub requirement_id: i64,
    pub scheduled_at: String,
    pub mode: InterviewMode,
    pub status: InterviewStatus,
}

/// Validates and normalizes a scheduling timestamp into the wire format.
pub fn parse_scheduled_at(raw: &str) -> Result<String, AppError> {
    let parsed = NaiveDateTime::parse_from_str(raw.trim(), SCHEDULED_AT_FORMAT)
        .map_err(|_| {
            AppError::Validation(format!(
                "Invalid schedule time: {raw} (expected YYYY-MM-DD HH:MM)"
            ))
        })?;

    Ok(parsed.format(SCHEDULED_AT_FORMAT).to_string())
}

/// Schedules an interview.
pub async fn create_interview(
    api: &ApiClient,
    interview: &NewInterview,
) -> Result<Interview, AppError> {
    api.post_json("/interviews", interview).await
}

/// Lists interviews, optionally filtered by status.
pub async fn list_interviews(
    api: &ApiClient,
    status: Option<InterviewStatus>,
) -> Result<Vec<Interview>, AppError> {
    let query = build_query(&[("status", status.map(|s| s.as_str()))]);
    api.get_json(&format!("/interviews{query}")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn mode_serializes_with_spaces() {
        assert_eq!(
            serde_json::to_string(&InterviewMode::FaceToFace).unwrap(),
            r#""Face to Face""#
        );
        assert_eq!(
            serde_json::to_string(&InterviewMode::Telephonic).unwrap(),
            r#""Telephonic""#
        );
        assert_eq!(
            serde_json::from_str::<InterviewMode>(r#""Face to Face""#).unwrap(),
            InterviewMode::FaceToFace
        );
    }

    #[test]
    fn mode_parse_accepts_user_spellings() {
        assert_eq!(
            InterviewMode::parse("telephonic").unwrap(),
            InterviewMode::Telephonic
        );
        assert_eq!(
            InterviewMode::parse("face-to-face").unwrap(),
            InterviewMode::FaceToFace
        );
        assert!(InterviewMode::parse("carrier pigeon").is_err());
    }

    #[test]
    fn scheduled_at_parses_and_normalizes() {
        assert_eq!(
            parse_scheduled_at(" 2026-08-12 14:00 ").unwrap(),
            "2026-08-12 14:00"
        );
        assert!(parse_scheduled_at("tomorrowish").is_err());
        assert!(parse_scheduled_at("2026-13-40 99:99").is_err());
    }

    #[tokio::test]
    async fn create_interview_posts_full_payload() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri()).unwrap();
        client.set_token("tok").await;

        Mock::given(method("POST"))
            .and(path("/interviews"))
            .and(body_json(json!({
                "tenant_id": 1,
                "candidate_id": 12,
                "requirement_id": 5,
                "scheduled_at": "2026-08-12 14:00",
                "mode": "Face to Face",
                "status": "scheduled"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 99,
                "candidate_id": 12,
                "requirement_id": 5,
                "scheduled_at": "2026-08-12 14:00",
                "mode": "Face to Face",
                "status": "scheduled"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let created = create_interview(
            &client,
            &NewInterview {
                tenant_id: 1,
                candidate_id: 12,
                requirement_id: 5,
                scheduled_at: "2026-08-12 14:00".into(),
                mode: InterviewMode::FaceToFace,
                status: InterviewStatus::Scheduled,
            },
        )
        .await
        .unwrap();

        assert_eq!(created.id, 99);
        assert_eq!(created.mode, Some(InterviewMode::FaceToFace));
    }

    #[tokio::test]
    async fn list_interviews_passes_status_filter() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri()).unwrap();
        client.set_token("tok").await;

        Mock::given(method("GET"))
            .and(path("/interviews"))
            .and(query_param("status", "scheduled"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "candidate_id": 12, "requirement_id": 5,
                 "scheduled_at": "2026-08-12 14:00", "mode": "Online", "status": "scheduled"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let interviews = list_interviews(&client, Some(InterviewStatus::Scheduled))
            .await
            .unwrap();

        assert_eq!(interviews.len(), 1);
        assert_eq!(interviews[0].mode, Some(InterviewMode::Online));
    }

    #[tokio::test]
    async fn list_interviews_without_filter_omits_query() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri()).unwrap();
        client.set_token("tok").await;

        Mock::given(method("GET"))
            .and(path("/interviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let interviews = list_interviews(&client, None).await.unwrap();
        assert!(interviews.is_empty());

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
    }
}
