//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hestia_domain::error::HestiaError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HestiaError`] to an HTTP response with appropriate status code.
pub struct ApiError(HestiaError);

impl From<HestiaError> for ApiError {
    fn from(err: HestiaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HestiaError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HestiaError::Update(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HestiaError::Replacement(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HestiaError::Routine(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };
        tracing::debug!(error = %self.0, %status, "request rejected");

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
