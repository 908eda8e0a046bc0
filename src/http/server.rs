//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request timeout)
//! - Construct the stores, lifecycle manager, and gateway from config
//! - Serve with graceful shutdown

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ManagerConfig;
use crate::gateway::{ControlPlane, HttpControlPlane};
use crate::http::handlers;
use crate::lifecycle::LifecycleManager;
use crate::storage::{DocumentStore, SnapshotStore, StoreError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<LifecycleManager>,
    pub control_plane: Arc<dyn ControlPlane>,
    pub timezone: Tz,
}

/// HTTP server for the Caddyfile manager.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server wired to the real Caddy admin API.
    pub fn new(config: ManagerConfig) -> Result<Self, StoreError> {
        let control_plane: Arc<dyn ControlPlane> =
            Arc::new(HttpControlPlane::new(&config.control_plane));
        Self::with_control_plane(config, control_plane)
    }

    /// Create a server with a caller-supplied gateway (used by tests to
    /// substitute a control-plane double).
    pub fn with_control_plane(
        config: ManagerConfig,
        control_plane: Arc<dyn ControlPlane>,
    ) -> Result<Self, StoreError> {
        let document_path = PathBuf::from(&config.document.path);
        let backups_dir = document_path
            .parent()
            .map(|parent| parent.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));

        let timezone: Tz = match config.document.timezone.parse() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!(
                    timezone = %config.document.timezone,
                    "Unknown time zone, falling back to UTC"
                );
                chrono_tz::UTC
            }
        };

        let document = DocumentStore::new(document_path);
        let snapshots = SnapshotStore::new(backups_dir, timezone)?;
        let manager = Arc::new(LifecycleManager::new(document, snapshots));

        let state = AppState {
            manager,
            control_plane,
            timezone,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ManagerConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/caddyfile", get(handlers::get_document))
            .route("/api/caddyfile", post(handlers::save_document))
            .route("/api/reload", post(handlers::reload))
            .route("/api/backups", get(handlers::list_backups))
            .route("/api/restore/{id}", post(handlers::restore))
            .route("/api/caddy/status", get(handlers::control_plane_status))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
