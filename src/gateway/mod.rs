//! Control-plane gateway subsystem.
//!
//! # Data Flow
//! ```text
//! reload request
//!     → control_plane.rs push_configuration (POST {admin}/load)
//!     → ReloadOutcome (success flag + description, never an error)
//!
//! status poll
//!     → control_plane.rs probe_status (GET {admin}/config/)
//!     → ControlPlaneStatus { connected, version }
//! ```
//!
//! # Design Decisions
//! - Timeouts are enforced inside the gateway, independent of any
//!   caller-level timeout
//! - Transport failures normalize to result values so status polling
//!   never crashes a request handler
//! - One bounded attempt per operation, no retries

pub mod control_plane;

pub use control_plane::{ControlPlane, ControlPlaneStatus, HttpControlPlane, ReloadOutcome};
