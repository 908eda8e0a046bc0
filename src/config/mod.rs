//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: PORT, CADDYFILE_PATH, ...)
//!     → validation.rs (semantic checks)
//!     → ManagerConfig (validated, immutable)
//!     → passed to each subsystem constructor at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at process start; no hot reload of this file
//! - All fields have defaults so an empty environment still boots
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ManagerConfig;
pub use schema::ControlPlaneConfig;
pub use schema::DocumentConfig;
pub use schema::ListenerConfig;
