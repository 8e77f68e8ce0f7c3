//! SQLite-backed local state with schema migrations.
//!
//! The client keeps a tiny per-profile key/value store (auth token, role,
//! active bulk-upload job id). Everything durable about recruitment data
//! lives on the backend; this file is only the reload-survival layer.

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension};

use crate::error::AppError;

/// Current schema version. Increment when adding new migrations.
const SCHEMA_VERSION: i32 = 1;

/// V1 schema: the session key/value store.
const V1_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS session_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// SQLite database handle.
#[derive(Debug, Clone)]
pub struct Database {
    db_path: PathBuf,
}

impl Database {
    /// Initializes the database at the given path.
    /// Creates parent directories if needed, opens the SQLite file, and runs migrations.
    pub async fn init(db_path: PathBuf) -> Result<Self, AppError> {
        let path = db_path.clone();

        tokio::task::spawn_blocking(move || {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Internal(format!("Failed to create database directory: {e}"))
                })?;
            }

            let mut conn = Connection::open(&path)
                .map_err(|e| AppError::Internal(format!("Failed to open database: {e}")))?;

            configure_connection(&conn)?;
            run_migrations(&mut conn)?;

            Ok::<_, AppError>(())
        })
        .await
        .map_err(|e| AppError::Internal(format!("Database init task failed: {e}")))??;

        Ok(Self { db_path })
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Reads a value from the session store.
    pub async fn get_value(&self, key: &str) -> Result<Option<String>, AppError> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)
                .map_err(|e| AppError::Internal(format!("Failed to open database: {e}")))?;

            configure_connection(&conn)?;

            let value = conn
                .query_row(
                    "SELECT value FROM session_store WHERE key = ?1",
                    [&key],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| AppError::Internal(format!("Failed to read session value: {e}")))?;

            Ok::<_, AppError>(value)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Get value task failed: {e}")))?
    }

    /// Writes a value to the session store (upsert).
    pub async fn set_value(&self, key: &str, value: &str) -> Result<(), AppError> {
        let db_path = self.db_path.clone();
        let key = key.to_string();
        let value = value.to_string();
        let updated_at = current_timestamp();

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)
                .map_err(|e| AppError::Internal(format!("Failed to open database: {e}")))?;

            configure_connection(&conn)?;

            conn.execute(
                r#"
                INSERT INTO session_store (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                rusqlite::params![key, value, updated_at],
            )
            .map_err(|e| AppError::Internal(format!("Failed to write session value: {e}")))?;

            Ok::<_, AppError>(())
        })
        .await
        .map_err(|e| AppError::Internal(format!("Set value task failed: {e}")))??;

        Ok(())
    }

    /// Removes a value from the session store. Missing keys are a no-op.
    pub async fn delete_value(&self, key: &str) -> Result<(), AppError> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)
                .map_err(|e| AppError::Internal(format!("Failed to open database: {e}")))?;

            configure_connection(&conn)?;

            conn.execute("DELETE FROM session_store WHERE key = ?1", [&key])
                .map_err(|e| AppError::Internal(format!("Failed to delete session value: {e}")))?;

            Ok::<_, AppError>(())
        })
        .await
        .map_err(|e| AppError::Internal(format!("Delete value task failed: {e}")))??;

        Ok(())
    }
}

/// Configures connection with busy timeout and WAL mode.
fn configure_connection(conn: &Connection) -> Result<(), AppError> {
    conn.busy_timeout(Duration::from_secs(10))
        .map_err(|e| AppError::Internal(format!("Failed to set busy timeout: {e}")))?;

    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| AppError::Internal(format!("Failed to set WAL mode: {e}")))?;

    Ok(())
}

/// Runs database migrations using PRAGMA user_version.
fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let current_version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| AppError::Internal(format!("Failed to get schema version: {e}")))?;

    if current_version >= SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .map_err(|e| AppError::Internal(format!("Failed to start migration transaction: {e}")))?;

    if current_version < 1 {
        tx.execute_batch(V1_SCHEMA)
            .map_err(|e| AppError::Internal(format!("V1 migration failed: {e}")))?;
    }

    tx.pragma_update(None, "user_version", SCHEMA_VERSION)
        .map_err(|e| AppError::Internal(format!("Failed to update schema version: {e}")))?;

    tx.commit()
        .map_err(|e| AppError::Internal(format!("Failed to commit migration: {e}")))?;

    Ok(())
}

/// Returns current unix timestamp in seconds.
fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db_path() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        (temp_dir, db_path)
    }

    #[tokio::test]
    async fn init_creates_db_file_and_table() {
        let (_temp_dir, db_path) = test_db_path();

        let _db = Database::init(db_path.clone())
            .await
            .expect("Failed to init database");

        assert!(db_path.exists(), "Database file should exist");

        let conn = Connection::open(&db_path).expect("Failed to open db");
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .expect("Failed to prepare")
            .query_map([], |row| row.get(0))
            .expect("Failed to query")
            .collect::<Result<Vec<_>, _>>()
            .expect("Failed to collect");

        assert!(
            tables.contains(&"session_store".to_string()),
            "session_store table should exist"
        );

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .expect("Failed to get version");
        assert_eq!(version, SCHEMA_VERSION, "Schema version should match");
    }

    #[tokio::test]
    async fn set_and_get_roundtrip() {
        let (_temp_dir, db_path) = test_db_path();
        let db = Database::init(db_path).await.expect("Failed to init");

        db.set_value("bulk_upload_job_id", "42")
            .await
            .expect("Failed to set");

        let value = db
            .get_value("bulk_upload_job_id")
            .await
            .expect("Failed to get");
        assert_eq!(value, Some("42".to_string()));
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let (_temp_dir, db_path) = test_db_path();
        let db = Database::init(db_path).await.expect("Failed to init");

        let value = db.get_value("nonexistent").await.expect("Should not error");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn set_overwrites_existing_value() {
        let (_temp_dir, db_path) = test_db_path();
        let db = Database::init(db_path).await.expect("Failed to init");

        db.set_value("auth_role", "admin").await.unwrap();
        db.set_value("auth_role", "recruiter").await.unwrap();

        let value = db.get_value("auth_role").await.unwrap();
        assert_eq!(value, Some("recruiter".to_string()));
    }

    #[tokio::test]
    async fn delete_removes_value_and_is_idempotent() {
        let (_temp_dir, db_path) = test_db_path();
        let db = Database::init(db_path).await.expect("Failed to init");

        db.set_value("bulk_upload_job_id", "7").await.unwrap();
        db.delete_value("bulk_upload_job_id").await.unwrap();

        let value = db.get_value("bulk_upload_job_id").await.unwrap();
        assert!(value.is_none());

        // Deleting again should not error
        db.delete_value("bulk_upload_job_id").await.unwrap();
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let (_temp_dir, db_path) = test_db_path();

        let _db1 = Database::init(db_path.clone())
            .await
            .expect("First init should succeed");

        let db2 = Database::init(db_path)
            .await
            .expect("Second init should succeed");

        db2.set_value("k", "v").await.expect("Store should work");
    }

    #[tokio::test]
    async fn creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("nested").join("dirs").join("test.db");

        let _db = Database::init(db_path.clone())
            .await
            .expect("Should create nested directories");

        assert!(db_path.exists(), "Database file should exist in nested path");
    }
}
