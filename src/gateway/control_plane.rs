//! HTTP gateway to the Caddy admin API.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::Serialize;
use tokio::time;

use crate::config::ControlPlaneConfig;

/// Result of pushing a configuration to the control plane.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadOutcome {
    pub success: bool,
    pub message: String,
}

impl ReloadOutcome {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Connectivity and version of the control plane.
#[derive(Debug, Clone, Serialize)]
pub struct ControlPlaneStatus {
    pub connected: bool,
    pub version: Option<String>,
}

/// Capability boundary to the external control plane.
///
/// Both operations normalize every transport failure into a result
/// value; nothing crosses this boundary as an error. Tests substitute a
/// double that simulates timeouts and refused connections.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Send `content` to the admin endpoint for a live reload.
    async fn push_configuration(&self, content: &str) -> ReloadOutcome;

    /// Read-only connectivity probe.
    async fn probe_status(&self) -> ControlPlaneStatus;
}

/// Production gateway speaking to the Caddy admin API over HTTP.
pub struct HttpControlPlane {
    endpoint: String,
    push_timeout: Duration,
    probe_timeout: Duration,
    client: Client<HttpConnector, Body>,
}

impl HttpControlPlane {
    pub fn new(config: &ControlPlaneConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            endpoint: config.admin_endpoint.trim_end_matches('/').to_string(),
            push_timeout: Duration::from_secs(config.push_timeout_secs),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            client,
        }
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn push_configuration(&self, content: &str) -> ReloadOutcome {
        let request = match Request::builder()
            .method("POST")
            .uri(format!("{}/load", self.endpoint))
            .header("content-type", "text/caddyfile")
            .body(Body::from(content.to_string()))
        {
            Ok(request) => request,
            Err(e) => {
                return ReloadOutcome::failure(format!("failed to build reload request: {}", e));
            }
        };

        match time::timeout(self.push_timeout, self.client.request(request)).await {
            Ok(Ok(response)) if response.status().is_success() => {
                tracing::info!("Control plane accepted configuration");
                ReloadOutcome {
                    success: true,
                    message: "configuration reloaded successfully".to_string(),
                }
            }
            Ok(Ok(response)) => {
                tracing::warn!(status = %response.status(), "Control plane rejected configuration");
                ReloadOutcome::failure(format!(
                    "control plane returned status {}",
                    response.status()
                ))
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Failed to reach control plane");
                ReloadOutcome::failure(format!("failed to reach control plane: {}", e))
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.push_timeout.as_secs(),
                    "Configuration push timed out"
                );
                ReloadOutcome::failure(format!(
                    "configuration push timed out after {}s",
                    self.push_timeout.as_secs()
                ))
            }
        }
    }

    async fn probe_status(&self) -> ControlPlaneStatus {
        let request = match Request::builder()
            .method("GET")
            .uri(format!("{}/config/", self.endpoint))
            .body(Body::empty())
        {
            Ok(request) => request,
            Err(_) => {
                return ControlPlaneStatus {
                    connected: false,
                    version: None,
                };
            }
        };

        match time::timeout(self.probe_timeout, self.client.request(request)).await {
            Ok(Ok(response)) if response.status().is_success() => {
                let version = response
                    .headers()
                    .get("server")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                ControlPlaneStatus {
                    connected: true,
                    version,
                }
            }
            Ok(Ok(response)) => {
                tracing::debug!(status = %response.status(), "Probe got non-success status");
                ControlPlaneStatus {
                    connected: false,
                    version: None,
                }
            }
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Probe failed to connect");
                ControlPlaneStatus {
                    connected: false,
                    version: None,
                }
            }
            Err(_) => {
                tracing::debug!("Probe timed out");
                ControlPlaneStatus {
                    connected: false,
                    version: None,
                }
            }
        }
    }
}
