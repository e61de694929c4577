use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use common::{ErrorResponse, PeriodError};
use compute::ComputeError;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{error, warn};

/// Every failure a handler can return. Each variant maps to one status code
/// and is rendered as `{error, details?}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Request timed out")]
    Timeout,

    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error("{message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
            details: None,
        }
    }

    /// Keeps the message and attaches a short description of what failed.
    pub fn with_details(self, details: &str) -> Self {
        match self {
            ApiError::Internal { message, .. } => ApiError::Internal {
                message,
                details: Some(details.to_string()),
            },
            other if other.status_code().is_server_error() => ApiError::Internal {
                message: other.to_string(),
                details: Some(details.to_string()),
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Compute(ComputeError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Compute(ComputeError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Compute(_) | ApiError::Database(_) | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            ApiError::Internal { details, .. } => details.clone(),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            details,
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %body.error, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %body.error, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PeriodError> for ApiError {
    fn from(err: PeriodError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::Timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            ApiError::from(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(ComputeError::NotFound("tutor".into())).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_details_only_on_server_errors() {
        let err = ApiError::from(DbErr::Custom("boom".into())).with_details("Failed to fetch");
        match err {
            ApiError::Internal { message, details } => {
                assert!(message.contains("boom"));
                assert_eq!(details.as_deref(), Some("Failed to fetch"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = ApiError::BadRequest("Month and year are required".into()).with_details("ignored");
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
