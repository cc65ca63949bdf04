use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::dberrors::DbError;

pub const CONNECTION_UNAVAILABLE_DETAIL: &str = "Conexión no establecida";
pub const DATABASE_ERROR_DETAIL: &str = "Error en la base de datos";
pub const INTERNAL_ERROR_DETAIL: &str = "Error interno del servidor";

/// Main error type for the product service
#[derive(Debug)]
pub enum ServiceError {
    // Database Errors
    ConnectionUnavailable,
    DatabaseError(String),

    // Request Errors
    ValidationError(String),
    NotFound(String),

    // Internal Errors
    InternalServerError(String),
}

/// Error body sent to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::ConnectionUnavailable => write!(f, "{}", CONNECTION_UNAVAILABLE_DETAIL),
            ServiceError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::NotFound(what) => write!(f, "Not found: {}", what),
            ServiceError::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::ConnectionUnavailable
            | ServiceError::DatabaseError(_)
            | ServiceError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::ConnectionUnavailable => "CONNECTION_UNAVAILABLE",
            ServiceError::DatabaseError(_) => "DATABASE_ERROR",
            ServiceError::ValidationError(_) => "VALIDATION_ERROR",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Message safe to show to clients. Driver and internal messages stay in the logs.
    pub fn client_detail(&self) -> String {
        match self {
            ServiceError::ConnectionUnavailable => CONNECTION_UNAVAILABLE_DETAIL.to_string(),
            ServiceError::DatabaseError(_) => DATABASE_ERROR_DETAIL.to_string(),
            ServiceError::InternalServerError(_) => INTERNAL_ERROR_DETAIL.to_string(),
            ServiceError::ValidationError(msg) => msg.clone(),
            ServiceError::NotFound(_) => "Not Found".to_string(),
        }
    }
}

/// Internal message of a server error, carried in the response extensions
/// so the error middleware can log it next to the request id
#[derive(Debug, Clone)]
pub struct ErrorCause(pub String);

/// Implement IntoResponse for Axum integration
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.client_detail(),
            code: self.error_code().to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if status.is_server_error() {
            response.extensions_mut().insert(ErrorCause(self.to_string()));
        }
        response
    }
}

/// Conversion from sqlx errors
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ServiceError::ConnectionUnavailable
            }
            _ => ServiceError::DatabaseError(err.to_string()),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotConnected | DbError::MissingDatabaseUrl => {
                ServiceError::ConnectionUnavailable
            }
            DbError::ConnectionError(msg) => ServiceError::DatabaseError(msg),
        }
    }
}

/// Malformed or mistyped request bodies
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::ValidationError(rejection.body_text())
    }
}

/// Path parameters that fail to parse, e.g. a non-integer id
impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::ValidationError(rejection.body_text())
    }
}

/// Type alias for Results using ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
