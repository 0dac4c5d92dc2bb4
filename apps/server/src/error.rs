use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kipo_core::errors::{DatabaseError, Error as CoreError, FieldError, ValidationError};
use serde::Serialize;
use thiserror::Error;

const INTERNAL_ERROR: &str = "Internal server error";

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Include underlying messages in 500 responses (development only).
pub fn expose_internal_errors(enabled: bool) {
    EXPOSE_INTERNAL_ERRORS.store(enabled, Ordering::Relaxed);
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldError>,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, String, Vec<FieldError>) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(v) => {
                    let details = v.field_errors();
                    let message = if details.is_empty() {
                        v.to_string()
                    } else {
                        "Validation failed".to_string()
                    };
                    (StatusCode::BAD_REQUEST, message, details)
                }
                CoreError::NotFound(_) | CoreError::Database(DatabaseError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, e.to_string(), Vec::new())
                }
                CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, e.to_string(), Vec::new()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), Vec::new()),
                CoreError::ConstraintViolation(msg) => {
                    (StatusCode::CONFLICT, msg.clone(), Vec::new())
                }
                CoreError::Database(DatabaseError::UniqueViolation(_)) => (
                    StatusCode::CONFLICT,
                    "Resource already exists".to_string(),
                    Vec::new(),
                ),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), Vec::new()),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone(), Vec::new()),
            ApiError::Unauthorized(reason) => {
                (StatusCode::UNAUTHORIZED, reason.clone(), Vec::new())
            }
            ApiError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone(), Vec::new()),
            ApiError::Internal(reason) => {
                (StatusCode::INTERNAL_SERVER_ERROR, reason.clone(), Vec::new())
            }
            ApiError::Anyhow(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), Vec::new()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, mut message, details) = self.parts();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
            if !EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed) {
                message = INTERNAL_ERROR.to_string();
            }
        }
        let body = Json(ErrorBody {
            success: false,
            error: message,
            details,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Core(CoreError::Validation(ValidationError::InvalidInput(
            rejection.body_text(),
        )))
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_errors_carry_details() {
        let err = CoreError::Validation(ValidationError::Fields(vec![FieldError::new(
            "amount",
            "must be greater than zero",
        )]));
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["details"][0]["field"], "amount");
    }

    #[tokio::test]
    async fn core_errors_map_to_statuses() {
        let cases = [
            (CoreError::NotFound("Goal".into()), StatusCode::NOT_FOUND),
            (CoreError::Forbidden("goal".into()), StatusCode::FORBIDDEN),
            (CoreError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (CoreError::ConstraintViolation("dup".into()), StatusCode::CONFLICT),
            (
                CoreError::Database(DatabaseError::UniqueViolation("users.email".into())),
                StatusCode::CONFLICT,
            ),
        ];
        for (err, expected) in cases {
            let (status, body) = render(err.into()).await;
            assert_eq!(status, expected);
            assert!(body.get("details").is_none());
        }
    }

    #[tokio::test]
    async fn internal_messages_are_hidden() {
        let (status, body) = render(ApiError::Internal("disk on fire".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR);
    }
}
