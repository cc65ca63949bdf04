use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::datalayer::DbManager;

pub const ROOT_MESSAGE: &str = "API de productos funcionando";

/// Body of `GET /`
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: i64,
    pub database: DatabaseStatus,
}

/// Database section of the health response
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_connections: Option<usize>,
}

/// Status message, answered whether or not the database is reachable
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Health check endpoint handler
///
/// Returns 200 OK when the database answers a ping,
/// 503 Service Unavailable otherwise
pub async fn health_check(db: &DbManager) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = chrono::Utc::now().timestamp();

    let (status, database) = match db.health_check().await {
        Ok(health) => (
            StatusCode::OK,
            DatabaseStatus {
                state: db.state().to_string(),
                latency_ms: Some(health.latency_ms),
                pool_size: Some(health.pool_size),
                idle_connections: Some(health.idle_connections),
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, state = %db.state(), "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                DatabaseStatus {
                    state: db.state().to_string(),
                    latency_ms: None,
                    pool_size: None,
                    idle_connections: None,
                },
            )
        }
    };

    let response = HealthResponse {
        status: if status == StatusCode::OK {
            "healthy"
        } else {
            "degraded"
        }
        .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp,
        database,
    };

    (status, Json(response))
}

/// Liveness endpoint
///
/// Returns 200 OK as long as the process is serving
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness endpoint
///
/// Returns 503 Service Unavailable while there is no database connection
pub async fn readiness(db: &DbManager) -> StatusCode {
    if db.is_available() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root() {
        let Json(body) = root().await;
        assert_eq!(body.message, ROOT_MESSAGE);
    }

    #[tokio::test]
    async fn test_health_check_without_database() {
        let (status, Json(body)) = health_check(&DbManager::new()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.database.state, "uninitialized");
        assert!(body.database.latency_ms.is_none());
    }

    #[tokio::test]
    async fn test_liveness() {
        assert_eq!(liveness().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        assert_eq!(
            readiness(&DbManager::new()).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
