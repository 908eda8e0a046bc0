//! Lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Document lifecycle (manager.rs):
//!     save:    read current → snapshot it → write new content
//!     restore: check id → snapshot current → copy snapshot over document
//!
//! Process lifecycle (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → broadcast shutdown → server drains and exits
//! ```
//!
//! # Design Decisions
//! - No overwrite without a prior snapshot; a snapshot failure aborts
//!   the remaining steps of the operation
//! - All document operations are serialized behind one lock, which also
//!   guards the date-scoped sequence-number computation

pub mod manager;
pub mod shutdown;
pub mod signals;

pub use manager::LifecycleManager;
pub use shutdown::Shutdown;
