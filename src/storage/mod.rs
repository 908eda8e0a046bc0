//! Durable storage subsystem.
//!
//! # Data Flow
//! ```text
//! active document (one file on disk)
//!     → document.rs (read / write / stat)
//!
//! snapshots (backups/ directory beside the document)
//!     → snapshots.rs (create / list / read / restore)
//! ```
//!
//! # Design Decisions
//! - The snapshot store exclusively owns the backups directory;
//!   other components never touch stored bytes directly
//! - Snapshot listings are recomputed on every call, never cached
//! - No atomicity layer beyond the OS copy primitive

pub mod document;
pub mod snapshots;

use thiserror::Error;

/// Errors raised by the document and snapshot stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced document or snapshot does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rejected input: empty or whitespace-only configuration content.
    #[error("configuration content is empty")]
    EmptyContent,

    /// Underlying read/write/copy/enumerate failure.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

pub use document::DocumentStore;
pub use snapshots::{Snapshot, SnapshotStore};
