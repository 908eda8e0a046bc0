//! The configuration lifecycle manager.
//!
//! Coordinates the document and snapshot stores so that every mutation
//! of the active document is preceded by a durable snapshot, and restore
//! is itself reversible.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::storage::{DocumentStore, Snapshot, SnapshotStore, StoreError};

/// Serializes all document mutations and snapshot naming.
///
/// The sequence number inside a snapshot id is derived by counting
/// existing snapshots for the current date; the lock makes that
/// read-count-write sequence safe against concurrent requests.
pub struct LifecycleManager {
    document: DocumentStore,
    snapshots: SnapshotStore,
    gate: Mutex<()>,
}

impl LifecycleManager {
    pub fn new(document: DocumentStore, snapshots: SnapshotStore) -> Self {
        Self {
            document,
            snapshots,
            gate: Mutex::new(()),
        }
    }

    /// Current content and modification time of the active document.
    pub async fn current(&self) -> Result<(String, DateTime<Utc>), StoreError> {
        self.document.read().await
    }

    /// Snapshot the current document, then overwrite it with `new_content`.
    ///
    /// Returns the id of the snapshot holding the pre-save content. If
    /// the snapshot cannot be written the document is left untouched.
    pub async fn save(&self, new_content: &str) -> Result<String, StoreError> {
        if new_content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }

        let _guard = self.gate.lock().await;

        let (current, _) = self.document.read().await?;
        let snapshot = self.snapshots.create_snapshot(&current).await?;
        self.document.write(new_content).await?;

        tracing::info!(snapshot_id = %snapshot.id, "Document saved");
        Ok(snapshot.id)
    }

    /// Overwrite the active document with the content of `snapshot_id`,
    /// taking a safety snapshot of the current content first.
    ///
    /// Returns the id of the safety snapshot, making the restore itself
    /// undoable. Unknown ids fail before anything is mutated.
    pub async fn restore(&self, snapshot_id: &str) -> Result<String, StoreError> {
        let _guard = self.gate.lock().await;

        // Existence check before any mutation.
        self.snapshots.read_snapshot(snapshot_id).await?;

        let (current, _) = self.document.read().await?;
        let safety = self.snapshots.create_snapshot(&current).await?;
        self.snapshots
            .restore_into(snapshot_id, self.document.path())
            .await?;

        tracing::info!(
            restored = %snapshot_id,
            safety_snapshot_id = %safety.id,
            "Document restored"
        );
        Ok(safety.id)
    }

    /// Enumerate stored snapshots, newest first. Pure read.
    pub async fn list_backups(&self) -> Result<Vec<Snapshot>, StoreError> {
        self.snapshots.list_snapshots().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_in(dir: &tempfile::TempDir, initial: &str) -> LifecycleManager {
        let document_path = dir.path().join("Caddyfile");
        std::fs::write(&document_path, initial).unwrap();
        let document = DocumentStore::new(document_path);
        let snapshots =
            SnapshotStore::new(dir.path().join("backups"), chrono_tz::UTC).unwrap();
        LifecycleManager::new(document, snapshots)
    }

    fn today() -> String {
        Utc::now().format("%Y-%m-%d").to_string()
    }

    #[tokio::test]
    async fn save_snapshots_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir, "A");

        let snapshot_id = manager.save("B").await.unwrap();

        let (content, _) = manager.current().await.unwrap();
        assert_eq!(content, "B");

        let backups = manager.list_backups().await.unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].id, snapshot_id);

        let stored = std::fs::read_to_string(dir.path().join("backups").join(&snapshot_id)).unwrap();
        assert_eq!(stored, "A");
    }

    #[tokio::test]
    async fn empty_save_takes_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir, "A");

        assert!(matches!(manager.save("").await, Err(StoreError::EmptyContent)));
        assert!(matches!(manager.save("   ").await, Err(StoreError::EmptyContent)));

        let (content, _) = manager.current().await.unwrap();
        assert_eq!(content, "A");
        assert!(manager.list_backups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_save_restore_example() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir, "A");

        let first = manager.save("B").await.unwrap();
        assert_eq!(first, format!("{}_v1", today()));

        let second = manager.save("C").await.unwrap();
        assert_eq!(second, format!("{}_v2", today()));

        let safety = manager.restore(&first).await.unwrap();
        assert_eq!(safety, format!("{}_v3", today()));

        let (content, _) = manager.current().await.unwrap();
        assert_eq!(content, "A");

        // Safety snapshot holds the content from just before the restore.
        let stored = std::fs::read_to_string(dir.path().join("backups").join(&safety)).unwrap();
        assert_eq!(stored, "C");
    }

    #[tokio::test]
    async fn restore_unknown_id_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir, "A");
        manager.save("B").await.unwrap();

        let err = manager.restore("2099-12-31_v9").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let (content, _) = manager.current().await.unwrap();
        assert_eq!(content, "B");
        assert_eq!(manager.list_backups().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_without_active_document_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let document = DocumentStore::new(dir.path().join("Caddyfile"));
        let snapshots =
            SnapshotStore::new(dir.path().join("backups"), chrono_tz::UTC).unwrap();
        let manager = LifecycleManager::new(document, snapshots);

        assert!(matches!(manager.save("B").await, Err(StoreError::NotFound(_))));
        assert!(manager.list_backups().await.unwrap().is_empty());
        assert!(!dir.path().join("Caddyfile").exists());
    }
}
