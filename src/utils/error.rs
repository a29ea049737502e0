use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::repository::EventError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        details: Option<String>,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
            details: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError { message, details } => {
                error!(message = %message, details = ?details, "Validation error");
            }
            AppError::NotFound(msg) => {
                error!(message = %msg, "Resource not found");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation { message, details } => {
                AppError::ValidationError { message, details }
            }
            EventError::NotFound(_) => AppError::NotFound("Event not found".to_string()),
            EventError::Storage(e) => AppError::DatabaseError(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        let (message, details) = match self {
            AppError::ValidationError { message, details } => (message, details),
            AppError::NotFound(msg) => (msg, None),
            AppError::DatabaseError(e) => {
                ("A database error occurred".to_string(), Some(e.to_string()))
            }
        };

        error_response(code, message, details.map(Value::String), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 10_000)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_event_errors_map_to_status_codes() {
        let validation: AppError = EventError::validation("bad").into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let missing: AppError = EventError::NotFound(3).into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let storage: AppError = EventError::Storage(sqlx::Error::RowNotFound).into();
        assert_eq!(storage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(storage.code(), "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_validation_response_carries_details() {
        let err = AppError::ValidationError {
            message: "Failed to create event".to_string(),
            details: Some("CHECK constraint failed: events_start_format".to_string()),
        };

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Failed to create event");
        assert_eq!(
            body["error"]["details"],
            "CHECK constraint failed: events_start_format"
        );
    }

    #[tokio::test]
    async fn test_not_found_response_has_no_details() {
        let response = AppError::from(EventError::NotFound(1)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["error"]["details"].is_null());
    }
}
