//! The single mutable active configuration document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::storage::StoreError;

/// Owns the active configuration file on disk.
///
/// Exactly one document exists; it is overwritten in place by save and
/// restore operations and never deleted.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the active document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document content together with its modification time.
    pub async fn read(&self) -> Result<(String, DateTime<Utc>), StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let last_modified = self.stat().await?;
        Ok((content, last_modified))
    }

    /// Overwrite the document. Empty or whitespace-only content is
    /// rejected before anything touches the disk.
    pub async fn write(&self, content: &str) -> Result<(), StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Metadata-only read of the modification time.
    pub async fn stat(&self) -> Result<DateTime<Utc>, StoreError> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(DateTime::<Utc>::from(metadata.modified()?))
    }
}
