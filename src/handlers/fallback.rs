use axum::http::Uri;

use crate::errors::ServiceError;

/// Any route that is not registered
pub async fn route_not_found(uri: Uri) -> ServiceError {
    ServiceError::NotFound(uri.path().to_string())
}
