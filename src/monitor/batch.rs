//! Client-side accumulation of a pending resume batch.
//!
//! Files are transient: the list exists only between selection and
//! submission. Only `.pdf` names are accepted (case-insensitive); everything
//! else is silently dropped at the point of selection, with no error shown.

use std::path::Path;

use crate::error::AppError;

/// The accepted resume extension, matched case-insensitively.
const ACCEPTED_EXTENSION: &str = ".pdf";

/// A selected file awaiting submission: display name plus content.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    /// Reads a file from disk into a pending entry.
    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::Validation(format!("Not a readable file name: {}", path.display()))
            })?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read {}: {e}", path.display())))?;

        Ok(Self { name, bytes })
    }
}

/// Returns true if the name carries the accepted extension.
pub fn is_accepted_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(ACCEPTED_EXTENSION)
}

/// An ordered, duplicate-tolerant list of accepted files.
///
/// Append-only until submission, except for removal by position.
#[derive(Debug, Default)]
pub struct PendingBatch {
    files: Vec<PendingFile>,
}

impl PendingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file if its name passes the extension filter.
    /// Returns true if the file was kept.
    pub fn push(&mut self, file: PendingFile) -> bool {
        if is_accepted_name(&file.name) {
            self.files.push(file);
            true
        } else {
            false
        }
    }

    /// Adds every accepted file from the iterator, silently dropping the rest.
    pub fn extend<I: IntoIterator<Item = PendingFile>>(&mut self, files: I) {
        for file in files {
            self.push(file);
        }
    }

    /// Removes the file at `index`. Out-of-range indices are a no-op.
    pub fn remove(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Names in selection order.
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    /// Clones the batch into `(name, bytes)` pairs for submission.
    /// The batch itself is untouched so a failed submission can be retried.
    pub(crate) fn as_parts(&self) -> Vec<(String, Vec<u8>)> {
        self.files
            .iter()
            .map(|f| (f.name.clone(), f.bytes.clone()))
            .collect()
    }

    /// Empties the batch after a successful submission.
    pub(crate) fn clear(&mut self) {
        self.files.clear();
    }
}
