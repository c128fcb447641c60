use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::models::ErrorResponse;

/// Request-level error: a status code plus the JSON error body. Every
/// handler failure funnels through here, so an unexpected error becomes a
/// 500 response instead of tearing down the serving task.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    detail: Option<String>,
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "Not found".to_string(),
            detail: Some(detail.into()),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "Internal server error".to_string(),
            detail: Some(detail.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl From<ng_core::Error> for ApiError {
    fn from(err: ng_core::Error) -> Self {
        match err {
            ng_core::Error::NoContent => {
                Self::not_found("No news articles found. Check API keys or try again later.")
            }
            ng_core::Error::JobNotFound(_) => Self::not_found("Job not found"),
            other => {
                error!("request failed: {}", other);
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error,
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_maps_to_404() {
        let err = ApiError::from(ng_core::Error::NoContent);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unexpected_errors_map_to_500() {
        let err = ApiError::from(ng_core::Error::Inference("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), Some("Inference error: boom"));
    }
}
