//! Session persistence: the login token, the user's role, and the single
//! active bulk-upload job identifier.
//!
//! Exactly one bulk job may be tracked at a time. The stored id is written on
//! job creation, read once at startup so a restart can resume observing an
//! in-flight job, and cleared when the job reaches a terminal state or the
//! tracking session is abandoned.

use std::sync::Arc;

use crate::error::AppError;
use crate::storage::database::Database;

/// Key for the active bulk-upload job identifier.
const ACTIVE_JOB_KEY: &str = "bulk_upload_job_id";

/// Key for the login bearer token.
const TOKEN_KEY: &str = "auth_token";

/// Key for the role returned at login.
const ROLE_KEY: &str = "auth_role";

/// Handle to the per-profile session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    db: Arc<Database>,
}

impl SessionStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    // ── Active bulk job ───────────────────────────────────────────────────────

    /// Returns the stored active job id, if any.
    ///
    /// A stored value that does not parse as an integer is discarded and
    /// treated as absent.
    pub async fn active_job_id(&self) -> Result<Option<i64>, AppError> {
        match self.db.get_value(ACTIVE_JOB_KEY).await? {
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Ok(Some(id)),
                Err(_) => {
                    tracing::warn!("Discarding unparseable stored job id");
                    self.db.delete_value(ACTIVE_JOB_KEY).await?;
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub async fn set_active_job_id(&self, job_id: i64) -> Result<(), AppError> {
        self.db.set_value(ACTIVE_JOB_KEY, &job_id.to_string()).await
    }

    pub async fn clear_active_job_id(&self) -> Result<(), AppError> {
        self.db.delete_value(ACTIVE_JOB_KEY).await
    }

    // ── Login session ─────────────────────────────────────────────────────────

    /// Stores the bearer token and role captured at login.
    pub async fn store_login(&self, token: &str, role: &str) -> Result<(), AppError> {
        self.db.set_value(TOKEN_KEY, token).await?;
        self.db.set_value(ROLE_KEY, role).await
    }

    pub async fn auth_token(&self) -> Result<Option<String>, AppError> {
        self.db.get_value(TOKEN_KEY).await
    }

    pub async fn role(&self) -> Result<Option<String>, AppError> {
        self.db.get_value(ROLE_KEY).await
    }

    /// Clears the whole session (logout): token, role, and tracked job.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.db.delete_value(TOKEN_KEY).await?;
        self.db.delete_value(ROLE_KEY).await?;
        self.db.delete_value(ACTIVE_JOB_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (TempDir, SessionStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::init(temp_dir.path().join("test.db"))
            .await
            .expect("Failed to init database");
        (temp_dir, SessionStore::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn job_id_roundtrip() {
        let (_tmp, store) = test_store().await;

        assert_eq!(store.active_job_id().await.unwrap(), None);

        store.set_active_job_id(42).await.unwrap();
        assert_eq!(store.active_job_id().await.unwrap(), Some(42));

        store.clear_active_job_id().await.unwrap();
        assert_eq!(store.active_job_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unparseable_job_id_is_discarded() {
        let (_tmp, store) = test_store().await;

        store.db.set_value("bulk_upload_job_id", "garbage").await.unwrap();

        assert_eq!(store.active_job_id().await.unwrap(), None);
        // The bad value must be gone after the read
        assert_eq!(store.db.get_value("bulk_upload_job_id").await.unwrap(), None);
    }

    #[tokio::test]
    async fn login_roundtrip() {
        let (_tmp, store) = test_store().await;

        store.store_login("tok_abc", "recruiter").await.unwrap();

        assert_eq!(store.auth_token().await.unwrap(), Some("tok_abc".into()));
        assert_eq!(store.role().await.unwrap(), Some("recruiter".into()));
    }

    #[tokio::test]
    async fn clear_wipes_everything() {
        let (_tmp, store) = test_store().await;

        store.store_login("tok_abc", "admin").await.unwrap();
        store.set_active_job_id(7).await.unwrap();

        store.clear().await.unwrap();

        assert_eq!(store.auth_token().await.unwrap(), None);
        assert_eq!(store.role().await.unwrap(), None);
        assert_eq!(store.active_job_id().await.unwrap(), None);
    }
}
