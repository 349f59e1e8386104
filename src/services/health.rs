use axum::{extract::State, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::api::AppState;

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the service answers
    pub status: String,
    /// Clock reading at the time of the request
    pub timestamp: DateTime<Utc>,
    /// Crate version
    pub version: String,
    /// Seconds since the router was built
    pub uptime_seconds: u64,
}

/// Health routes, merged into the main router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = (state.clock)();
    let uptime = now
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
    })
}

async fn liveness_check() -> Json<&'static str> {
    // Simple liveness check - if this endpoint responds, the service is alive
    Json("alive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::TimeService;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn create_test_server() -> TestServer {
        let service = TimeService::new();
        TestServer::new(service.router).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server();

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.status, "healthy");
        assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
        assert!(health_response.uptime_seconds < 60);
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let server = create_test_server();

        let response = server.get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let alive_response: String = response.json();
        assert_eq!(alive_response, "alive");
    }
}
