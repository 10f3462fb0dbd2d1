use std::sync::Arc;

use axum::{http::header, response::IntoResponse, Extension};
use prometheus::TEXT_FORMAT;

use crate::{AppState, Error, Result};

pub async fn metrics(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let body = app_state.metrics.render()?;
    Ok(([(header::CONTENT_TYPE, TEXT_FORMAT)], body))
}

/// Unknown paths and unsupported methods.
pub async fn not_found() -> Error {
    Error::NotFound
}
