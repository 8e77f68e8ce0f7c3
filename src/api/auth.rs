//! Login and current-user endpoints.

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::error::AppError;

/// Role granted at login. Unknown roles fall back to `Admin`, matching the
/// backend's default routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Recruiter,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("recruiter") {
            Role::Recruiter
        } else {
            Role::Admin
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Recruiter => "recruiter",
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: String,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Profile fields the user may change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
struct PasswordChangeRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Exchanges credentials for a bearer token. This is the only request that
/// goes out unauthenticated by design.
pub async fn login(
    api: &ApiClient,
    email: &str,
    password: &str,
) -> Result<LoginResponse, AppError> {
    api.post_json("/auth/login", &LoginRequest { email, password })
        .await
}

/// Fetches the current user's profile.
pub async fn me(api: &ApiClient) -> Result<UserProfile, AppError> {
    api.get_json("/users/me").await
}

/// Updates the current user's profile.
pub async fn update_me(api: &ApiClient, update: &ProfileUpdate) -> Result<(), AppError> {
    api.put_json("/users/me", update).await
}

/// Changes the current user's password.
///
/// The confirmation check is purely local: on mismatch no request is sent.
pub async fn change_password(
    api: &ApiClient,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), AppError> {
    if new != confirm {
        return Err(AppError::Validation("Passwords do not match".into()));
    }

    api.put_json(
        "/users/me/password",
        &PasswordChangeRequest {
            current_password: current,
            new_password: new,
        },
    )
    .await
}
