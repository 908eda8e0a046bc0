//! Immutable snapshots of the active document.
//!
//! Snapshots are plain files in a `backups` directory, named
//! `<YYYY-MM-DD>_v<sequence>` where the sequence restarts at 1 each
//! calendar day. The date is rendered in the configured time zone. The
//! sequence is derived by counting existing names with today's prefix,
//! so creation must be serialized by the caller (the lifecycle manager
//! holds a lock across every create).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::storage::StoreError;

/// Metadata for one stored snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Owns the snapshot collection on durable storage.
pub struct SnapshotStore {
    dir: PathBuf,
    timezone: Tz,
}

impl SnapshotStore {
    /// Create the store, ensuring the backups directory exists.
    pub fn new(dir: PathBuf, timezone: Tz) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, timezone })
    }

    /// Write an exact copy of `source_content` under a fresh identifier.
    pub async fn create_snapshot(&self, source_content: &str) -> Result<Snapshot, StoreError> {
        let date = Utc::now()
            .with_timezone(&self.timezone)
            .format("%Y-%m-%d")
            .to_string();
        let sequence = self.count_for_date(&date).await? + 1;
        let id = format!("{}_v{}", date, sequence);
        let path = self.dir.join(&id);

        tokio::fs::write(&path, source_content).await?;
        let metadata = tokio::fs::metadata(&path).await?;

        tracing::info!(id = %id, size_bytes = metadata.len(), "Snapshot created");

        Ok(Snapshot {
            id,
            created_at: DateTime::<Utc>::from(metadata.modified()?),
            size_bytes: metadata.len(),
        })
    }

    /// Enumerate all snapshots, newest first. Recomputed on every call.
    pub async fn list_snapshots(&self) -> Result<Vec<Snapshot>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut snapshots = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if parse_id(&name).is_none() {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            snapshots.push(Snapshot {
                id: name,
                created_at: DateTime::<Utc>::from(metadata.modified()?),
                size_bytes: metadata.len(),
            });
        }

        // Same-second modification times are common right after a burst of
        // saves; the parsed (date, sequence) key keeps the order stable.
        snapshots.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| parse_id(&b.id).cmp(&parse_id(&a.id)))
        });

        Ok(snapshots)
    }

    /// Read the stored bytes for `id`.
    pub async fn read_snapshot(&self, id: &str) -> Result<String, StoreError> {
        let path = self.entry_path(id)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Copy the stored bytes for `id` onto `destination`, fully
    /// overwriting prior content.
    pub async fn restore_into(&self, id: &str, destination: &Path) -> Result<(), StoreError> {
        let path = self.entry_path(id)?;
        match tokio::fs::copy(&path, destination).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn count_for_date(&self, date: &str) -> Result<usize, StoreError> {
        let prefix = format!("{}_v", date);
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut count = 0;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().starts_with(&prefix) {
                count += 1;
            }
        }

        Ok(count)
    }

    /// Resolve an identifier to its path. Identifiers never name paths:
    /// anything that does not match the `<date>_v<sequence>` shape is
    /// treated as unknown.
    fn entry_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        if parse_id(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(self.dir.join(id))
    }
}

/// Parse `<YYYY-MM-DD>_v<sequence>` into a sortable key.
fn parse_id(name: &str) -> Option<(NaiveDate, u32)> {
    let (date, sequence) = name.split_once("_v")?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let sequence = sequence.parse::<u32>().ok()?;
    Some((date, sequence))
}
