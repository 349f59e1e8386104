use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::datetime::DateTimeError;
use crate::utils::logging::log_request_rejected;

/// Errors returned to API callers
#[derive(Debug, Error)]
pub enum ApiError {
    /// A datetime parameter could not be parsed
    #[error("Invalid datetime format: {0}")]
    InvalidDateTime(String),
    /// Parsed values cannot be combined as requested
    #[error("{0}")]
    BadRequest(String),
    /// A query parameter is missing, mistyped, or out of range
    #[error("{0}")]
    InvalidParameter(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub detail: String,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidDateTime(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidParameter(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        log_request_rejected(status.as_u16(), &detail);

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<DateTimeError> for ApiError {
    fn from(value: DateTimeError) -> Self {
        match value {
            DateTimeError::InvalidFormat(_) => ApiError::InvalidDateTime(value.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::InvalidParameter(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_maps_to_bad_request() {
        let err = ApiError::from(DateTimeError::InvalidFormat("nope".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid datetime format: Invalid isoformat string: 'nope'");
    }

    #[test]
    fn test_mixed_offsets_maps_to_bad_request() {
        let err = ApiError::from(DateTimeError::MixedOffsets);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "can't subtract offset-naive and offset-aware datetimes");
    }

    #[test]
    fn test_parameter_errors_are_unprocessable() {
        let err = ApiError::InvalidParameter("start_hour must be between 0 and 23, got 30".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "start_hour must be between 0 and 23, got 30");
    }
}
