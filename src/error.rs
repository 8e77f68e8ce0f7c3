use serde::Serialize;
use thiserror::Error;

/// Patterns (lowercase) that indicate sensitive data not safe for display.
/// Used by `contains_sensitive()` for case-insensitive matching.
pub(crate) const SENSITIVE_PATTERNS: &[&str] = &[
    "bearer ",
    "access_token",
    "authorization:",
    "password=",
];

/// Returns true if the message contains any sensitive pattern (case-insensitive).
fn contains_sensitive(msg: &str) -> bool {
    let lower = msg.to_ascii_lowercase();
    SENSITIVE_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Sanitizes a message for display.
/// If sensitive content is detected, returns the fallback instead.
fn sanitize_message(msg: &str, fallback: &str) -> String {
    if contains_sensitive(msg) {
        fallback.into()
    } else {
        msg.to_string()
    }
}

/// User-friendly error presentation for inline display.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPresentation {
    pub title: String,
    pub message: String,
    pub action: Option<String>,
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Auth ──────────────────────────────────────────────────────────────────
    #[error("Not authenticated")]
    NotAuthenticated,

    // ── API ───────────────────────────────────────────────────────────────────
    /// Non-2xx HTTP response. The message is the response body text, surfaced
    /// verbatim (the backend is the source of truth for rejections).
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ── Network ───────────────────────────────────────────────────────────────
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    // ── Local validation ──────────────────────────────────────────────────────
    /// Purely local validation failure; never sent to the backend.
    #[error("Validation failed: {0}")]
    Validation(String),

    // ── Generic fallback ──────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Converts the error into a presentation suitable for inline display.
    /// Never leaks tokens or credentials.
    pub fn to_presentation(&self) -> ErrorPresentation {
        match self {
            AppError::NotAuthenticated => ErrorPresentation {
                title: "Not Logged In".into(),
                message: "You need to log in to continue.".into(),
                action: Some("Run `talentdesk login`".into()),
            },

            AppError::Api { status, message } => ErrorPresentation {
                title: format!("Request Failed ({status})"),
                message: sanitize_message(message, "The server rejected the request."),
                action: None,
            },

            AppError::ConnectionFailed(_) => ErrorPresentation {
                title: "Connection Failed".into(),
                message: "Could not reach the server. Please check your network connection."
                    .into(),
                action: Some("Check network and retry".into()),
            },

            AppError::Validation(msg) => ErrorPresentation {
                title: "Invalid Input".into(),
                message: sanitize_message(msg, "The input failed validation."),
                action: None,
            },

            AppError::Internal(_) => ErrorPresentation {
                title: "Unexpected Error".into(),
                message: "Something went wrong. Please try again.".into(),
                action: Some("Try again".into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns all AppError variants for exhaustive testing.
    fn all_variants() -> Vec<AppError> {
        vec![
            AppError::NotAuthenticated,
            AppError::Api {
                status: 422,
                message: "requirement_id is required".into(),
            },
            AppError::ConnectionFailed("timeout".into()),
            AppError::Validation("Passwords do not match".into()),
            AppError::Internal("something broke".into()),
        ]
    }

    #[test]
    fn all_variants_have_nonempty_title_and_message() {
        for variant in all_variants() {
            let presentation = variant.to_presentation();
            assert!(
                !presentation.title.trim().is_empty(),
                "Empty title for {:?}",
                variant
            );
            assert!(
                !presentation.message.trim().is_empty(),
                "Empty message for {:?}",
                variant
            );
        }
    }

    #[test]
    fn api_error_surfaces_body_verbatim() {
        let err = AppError::Api {
            status: 409,
            message: "Cannot pause a job that is not processing".into(),
        };

        let presentation = err.to_presentation();
        assert_eq!(
            presentation.message,
            "Cannot pause a job that is not processing"
        );
        assert!(presentation.title.contains("409"));
    }

    #[test]
    fn not_authenticated_suggests_login() {
        let presentation = AppError::NotAuthenticated.to_presentation();
        let action = presentation.action.expect("auth error should have action");
        assert!(
            action.to_lowercase().contains("login"),
            "action should mention login, got: {}",
            action
        );
    }

    #[test]
    fn connection_failed_suggests_check_network() {
        let presentation = AppError::ConnectionFailed("timeout".into()).to_presentation();
        let action = presentation
            .action
            .expect("ConnectionFailed should have action");
        let action_lower = action.to_lowercase();
        assert!(
            action_lower.contains("network") || action_lower.contains("retry"),
            "action should mention network/retry, got: {}",
            action
        );
    }

    #[test]
    fn no_secret_leakage_in_presentation() {
        let test_cases: Vec<(&str, AppError)> = vec![
            (
                "Api",
                AppError::Api {
                    status: 401,
                    message: "AUTHORIZATION: Bearer token rejected".into(),
                },
            ),
            (
                "ConnectionFailed",
                AppError::ConnectionFailed("access_token=xyz leaked".into()),
            ),
            (
                "Validation",
                AppError::Validation("password=hunter2 too short".into()),
            ),
            ("Internal", AppError::Internal("Bearer abc123 leaked".into())),
        ];

        for (label, variant) in test_cases {
            let presentation = variant.to_presentation();
            let output_lower = format!(
                "{} {} {}",
                presentation.title,
                presentation.message,
                presentation.action.as_deref().unwrap_or("")
            )
            .to_ascii_lowercase();

            // Reuse production patterns for consistency
            for pattern in SENSITIVE_PATTERNS {
                assert!(
                    !output_lower.contains(pattern),
                    "{} presentation contains sensitive pattern",
                    label
                );
            }
        }
    }
}
