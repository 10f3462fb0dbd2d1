use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::models::response::ValidationErrorEntry;

/// Failure of a call made through [`super::PostsClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response without field attribution.
    #[error("{message} (HTTP {status})")]
    Status { status: StatusCode, message: String },
    /// 422 response carrying per-field messages.
    #[error("{message} (HTTP {status})")]
    Validation {
        status: StatusCode,
        message: String,
        errors: Vec<ValidationErrorEntry>,
    },
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

// Lenient mirror of `ErrorBody`: any field may be missing.
#[derive(Deserialize)]
struct WireError {
    message: Option<String>,
    errors: Option<Vec<ValidationErrorEntry>>,
}

impl ApiError {
    /// Rebuilds the typed error from a non-2xx response.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let Ok(wire) = serde_json::from_slice::<WireError>(body) else {
            return Self::Status {
                status,
                message: fallback_message(status, body),
            };
        };

        let message = wire
            .message
            .unwrap_or_else(|| fallback_message(status, &[]));

        match wire.errors {
            Some(errors) if status == StatusCode::UNPROCESSABLE_ENTITY => Self::Validation {
                status,
                message,
                errors,
            },
            _ => Self::Status { status, message },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } | Self::Validation { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
        }
    }

    pub fn http_status_code(&self) -> Option<u16> {
        self.status().map(|status| status.as_u16())
    }

    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Validation { message, .. } => message.clone(),
            Self::Transport(err) => err.to_string(),
        }
    }

    pub fn has_field_errors(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Validation entries in server order; empty for every other kind.
    pub fn errors(&self) -> &[ValidationErrorEntry] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors::from_entries(self.errors())
    }
}

fn fallback_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()))
}

/// Messages grouped by field, fields in order of first appearance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn from_entries(entries: &[ValidationErrorEntry]) -> Self {
        let mut field_errors = Self::default();
        for entry in entries {
            field_errors.push(&entry.field, &entry.message);
        }
        field_errors
    }

    fn push(&mut self, field: &str, message: &str) {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message.to_string()),
            None => self
                .fields
                .push((field.to_string(), vec![message.to_string()])),
        }
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }
}
