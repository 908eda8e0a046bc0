//! API handlers for the Caddyfile manager.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gateway::ControlPlaneStatus;
use crate::http::server::AppState;
use crate::storage::{Snapshot, StoreError};

/// Maps store failures onto HTTP status codes in one place.
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not found"),
            StoreError::EmptyContent => (StatusCode::BAD_REQUEST, "empty content"),
            StoreError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage failure"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }
        let body = serde_json::json!({
            "error": error,
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub timezone: &'static str,
}

#[derive(Serialize)]
pub struct DocumentResponse {
    pub content: String,
    pub last_modified: DateTime<Utc>,
    pub timezone: &'static str,
}

#[derive(Deserialize)]
pub struct SaveRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub snapshot_id: String,
}

#[derive(Serialize)]
pub struct RestoreResponse {
    pub success: bool,
    pub safety_snapshot_id: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
        timezone: state.timezone.name(),
    })
}

pub async fn get_document(
    State(state): State<AppState>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let (content, last_modified) = state.manager.current().await?;
    Ok(Json(DocumentResponse {
        content,
        last_modified,
        timezone: state.timezone.name(),
    }))
}

pub async fn save_document(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    let snapshot_id = state.manager.save(&request.content).await?;
    Ok(Json(SaveResponse {
        success: true,
        snapshot_id,
    }))
}

/// Push the current on-disk document to the control plane.
///
/// Gateway failures come back as a value, so the only error path here
/// is failing to read the document itself.
pub async fn reload(State(state): State<AppState>) -> Response {
    let content = match state.manager.current().await {
        Ok((content, _)) => content,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let outcome = state.control_plane.push_configuration(&content).await;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(outcome)).into_response()
}

pub async fn list_backups(
    State(state): State<AppState>,
) -> Result<Json<Vec<Snapshot>>, ApiError> {
    let backups = state.manager.list_backups().await?;
    Ok(Json(backups))
}

pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestoreResponse>, ApiError> {
    let safety_snapshot_id = state.manager.restore(&id).await?;
    Ok(Json(RestoreResponse {
        success: true,
        safety_snapshot_id,
    }))
}

/// Status polling must never fail; the gateway always answers.
pub async fn control_plane_status(
    State(state): State<AppState>,
) -> Json<ControlPlaneStatus> {
    Json(state.control_plane.probe_status().await)
}
