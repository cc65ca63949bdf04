use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, instrument};

use crate::controllayer::health::{self, HealthResponse, RootResponse};
use crate::state::AppState;

/// GET /
pub async fn root() -> Json<RootResponse> {
    health::root().await
}

/// GET /health
#[instrument(skip(state), fields(service = "/health"))]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    debug!("Health check request received");
    health::health_check(&state.db).await
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    health::liveness().await
}

/// GET /health/ready
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    health::readiness(&state.db).await
}
