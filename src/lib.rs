//! Caddyfile Manager Library
//!
//! Administrative service for a single Caddyfile consumed by the Caddy
//! admin API: view, edit, snapshot, restore, and hot-reload.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::schema::ManagerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
