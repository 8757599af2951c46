//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use lastvalue_domain::error::LastValueError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`LastValueError`] to an HTTP status code and a client-facing message.
///
/// Store failures are logged here and never echoed to the client.
pub(crate) fn status_and_message(err: &LastValueError) -> (StatusCode, String) {
    match err {
        LastValueError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        LastValueError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        LastValueError::StoreUnavailable(err) => {
            tracing::error!(error = %err, detail = ?err, "store unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

/// Maps [`LastValueError`] to a JSON HTTP response.
pub struct ApiError(LastValueError);

impl From<LastValueError> for ApiError {
    fn from(err: LastValueError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = status_and_message(&self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
