//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use ecoship_lib::CatalogProvider;

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiers_loaded: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lanes_loaded: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            tiers_loaded: None,
            lanes_loaded: None,
        }
    }

    /// Create a ready status with catalog sizes.
    pub fn ready(service: &str, version: &str, tiers: usize, lanes: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            tiers_loaded: Some(tiers),
            lanes_loaded: Some(lanes),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            tiers_loaded: None,
            lanes_loaded: None,
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"ecoship-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready once the catalog holds at least one tier. An empty lane table is
/// reported but does not fail readiness.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"ecoship-service-shared","version":"0.1.0","tiers_loaded":6,"lanes_loaded":15}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let catalog = state.catalog();
    let tiers = catalog.tiers().len();
    let lanes = catalog.lanes().len();

    if tiers == 0 {
        let status = HealthStatus::not_ready(service, version, "no tiers loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, tiers, lanes);
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("quote", "1.0.0");
        assert_eq!(status.status, "ok");
        assert!(status.tiers_loaded.is_none());
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("quote", "1.0.0", "no tiers loaded");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("no tiers"));
    }

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::alive("quote", "0.1.0")).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("tiers_loaded"));
    }

    #[tokio::test]
    async fn test_health_ready_reports_catalog_sizes() {
        let response = health_ready(State(AppState::builtin())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
