//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! browser / CLI request
//!     → server.rs (Axum setup, middleware, AppState)
//!     → handlers.rs (one handler per API operation)
//!     → lifecycle manager / control-plane gateway
//!     → JSON response (errors mapped to status codes in one place)
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
