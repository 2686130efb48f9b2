//! Mapping of classified proxy failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clibridge_core::{InvocationError, ProxyError};

use crate::models::ErrorResponse;

/// A [`ProxyError`] on its way out of a handler.
///
/// The HTTP status always equals the error's `code`.
#[derive(Debug)]
pub struct ApiError(pub ProxyError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        Self(err)
    }
}

impl From<InvocationError> for ApiError {
    fn from(err: InvocationError) -> Self {
        Self(err.into())
    }
}
