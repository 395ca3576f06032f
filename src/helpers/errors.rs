use axum::{http::StatusCode, response::Json};
use compute::ComputeError;
use tracing::{error, warn};

use crate::schemas::{ApiError, ErrorResponse};

pub fn error_response(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

pub fn bad_request(error: impl Into<String>) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", error)
}

/// Maps core failures to HTTP errors: invalid input is the caller's fault,
/// everything else is ours.
pub fn compute_error_response(err: ComputeError) -> ApiError {
    match err {
        ComputeError::InvalidArgument(message) => {
            warn!("Rejected request: {}", message);
            bad_request(message)
        }
        ComputeError::Overflow(message) => {
            warn!("Rejected request: {}", message);
            error_response(StatusCode::BAD_REQUEST, "OVERFLOW", message)
        }
        ComputeError::Date(message) => {
            error!("Calendar error: {}", message);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "DATE_ERROR", message)
        }
        ComputeError::Insight(message) => {
            error!("Insight error: {}", message);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "INSIGHT_ERROR", message)
        }
    }
}
