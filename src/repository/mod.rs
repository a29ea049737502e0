pub mod event;

use sqlx::error::ErrorKind;
use thiserror::Error;

pub use event::EventRepository;

/// Failure of a repository operation.
#[derive(Debug, Error)]
pub enum EventError {
    /// Missing or malformed input, or a write the store refused.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<String>,
    },

    #[error("Event {0} not found")]
    NotFound(i64),

    #[error("Storage failure: {0}")]
    Storage(#[source] sqlx::Error),
}

impl EventError {
    pub fn validation(message: impl Into<String>) -> Self {
        EventError::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// Classifies a failed write: constraint violations are the caller's
    /// fault, anything else is a storage failure.
    pub(crate) fn from_write(err: sqlx::Error, message: &str) -> Self {
        let violation = err
            .as_database_error()
            .filter(|db| {
                matches!(
                    db.kind(),
                    ErrorKind::CheckViolation | ErrorKind::NotNullViolation
                )
            })
            .map(|db| db.message().to_string());

        match violation {
            Some(details) => EventError::Validation {
                message: message.to_string(),
                details: Some(details),
            },
            None => EventError::Storage(err),
        }
    }
}

impl From<sqlx::Error> for EventError {
    fn from(err: sqlx::Error) -> Self {
        EventError::Storage(err)
    }
}
