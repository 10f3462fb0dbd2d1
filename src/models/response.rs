use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorEntry {
    pub field: String,
    pub message: String,
}

impl ValidationErrorEntry {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body of every failed request. `errors` is empty unless validation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "code")]
    pub http_status_code: u16,
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ValidationErrorEntry>,
}
