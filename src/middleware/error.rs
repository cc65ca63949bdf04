use axum::{extract::Request, middleware::Next, response::Response};

use crate::errors::ErrorCause;
use crate::middleware::request_id::get_request_id;

/// Logs every response that ends in a client or server error
///
/// This is the only place a failed request is logged. Server errors carry
/// their internal message in an `ErrorCause` extension.
pub async fn error_handling_middleware(request: Request, next: Next) -> Response {
    let request_id = get_request_id(&request).map(|id| id.to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        let cause = response.extensions().get::<ErrorCause>().map(|c| c.0.as_str());
        tracing::error!(
            status = %status,
            method = %method,
            path = %path,
            request_id = ?request_id,
            error = ?cause,
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            status = %status,
            method = %method,
            path = %path,
            request_id = ?request_id,
            "Request rejected"
        );
    }

    response
}
