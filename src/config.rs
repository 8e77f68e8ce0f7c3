//! Runtime configuration from environment variables.

use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::AppError;

/// Database file name inside the data directory.
const DB_FILE_NAME: &str = "talentdesk.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the backend API.
    pub api_base_url: String,
    /// Directory for local client state. Empty means `~/.talentdesk`.
    pub data_dir: String,
    /// Poll period for bulk job status, in seconds.
    pub poll_interval_secs: u64,
}

impl Settings {
    /// Loads settings from `TALENTDESK_*` environment variables, falling back
    /// to defaults that match a local backend.
    pub fn new() -> Result<Self, AppError> {
        let conf = Config::builder()
            .set_default("api_base_url", "http://localhost:8000")
            .map_err(|e| AppError::Internal(format!("Config default failed: {e}")))?
            .set_default("data_dir", "")
            .map_err(|e| AppError::Internal(format!("Config default failed: {e}")))?
            .set_default("poll_interval_secs", 3i64)
            .map_err(|e| AppError::Internal(format!("Config default failed: {e}")))?
            .add_source(Environment::with_prefix("TALENTDESK"))
            .build()
            .map_err(|e| AppError::Internal(format!("Config build failed: {e}")))?;

        conf.try_deserialize()
            .map_err(|e| AppError::Internal(format!("Improperly configured: {e}")))
    }

    /// Resolves the path of the local state database.
    pub fn db_path(&self) -> PathBuf {
        let dir = if self.data_dir.is_empty() {
            let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
            PathBuf::from(home).join(".talentdesk")
        } else {
            PathBuf::from(&self.data_dir)
        };
        dir.join(DB_FILE_NAME)
    }
}
