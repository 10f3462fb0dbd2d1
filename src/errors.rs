use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::response::{ErrorBody, ValidationErrorEntry};

pub type Result<T> = core::result::Result<T, Error>;

pub const NOT_FOUND_MESSAGE: &str = "Not Found";
pub const VALIDATION_MESSAGE: &str = "Validation error";
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum Error {
    #[error("resource not found")]
    NotFound,
    #[error("validation failed: {} violation(s)", .0.len())]
    Validation(Vec<ValidationErrorEntry>),
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Maps every failure onto the status and body sent to the caller.
    pub fn to_canonical(&self) -> (StatusCode, ErrorBody) {
        let (status, message, errors) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE, Vec::new()),
            Self::Validation(entries) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                VALIDATION_MESSAGE,
                entries.clone(),
            ),
            Self::Database(_) | Self::Unexpected(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE, Vec::new())
            }
        };

        let body = ErrorBody {
            http_status_code: status.as_u16(),
            message: message.to_string(),
            errors,
        };
        (status, body)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Unexpected(_)) {
            error!(error = %self, "request failed");
        }

        let (status, body) = self.to_canonical();
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        error!("Database error: {:?}", err);
        Self::Database(err)
    }
}

impl From<prometheus::Error> for Error {
    fn from(err: prometheus::Error) -> Self {
        Self::Unexpected(format!("metrics: {err}"))
    }
}
