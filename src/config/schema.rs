//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the manager.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the Caddyfile manager.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ManagerConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Active document settings (path, snapshot time zone).
    pub document: DocumentConfig,

    /// External control-plane (Caddy admin API) settings.
    pub control_plane: ControlPlaneConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Per-request timeout applied by the server middleware.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Active configuration document settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path to the active Caddyfile. Snapshots live in a sibling
    /// `backups` directory.
    pub path: String,

    /// IANA time zone used to date-stamp snapshot identifiers.
    pub timezone: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: "/caddy/Caddyfile".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

/// Control-plane (Caddy admin API) settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlPlaneConfig {
    /// Base URL of the admin endpoint (e.g., "http://localhost:2019").
    pub admin_endpoint: String,

    /// Timeout for pushing a configuration (`POST /load`).
    pub push_timeout_secs: u64,

    /// Timeout for the connectivity probe (`GET /config/`).
    pub probe_timeout_secs: u64,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            admin_endpoint: "http://host.docker.internal:2019".to_string(),
            push_timeout_secs: 10,
            probe_timeout_secs: 5,
        }
    }
}
