use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::ServiceError;

/// `axum::Json` whose rejections answer 422 with the service error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServiceError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` whose rejections answer 422 with the service error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServiceError))]
pub struct AppPath<T>(pub T);
