//! Health and service info handlers.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Service info response for the root route.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
}

/// Root endpoint: service identification, no business logic.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Mediagen API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
