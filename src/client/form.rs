use super::{
    alerts::{AlertKind, AlertStore},
    ApiError, FieldErrors,
};

pub const POSTS_PATH: &str = "/posts";
pub const POST_NOT_FOUND: &str = "Post not found";

/// What the UI does with a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Keep the form open and show these messages next to their inputs.
    ShowFieldErrors(FieldErrors),
    /// Leave the page; a warning alert has been raised.
    Redirect(&'static str),
    /// Show a dismissible error banner with no field attribution.
    Banner(String),
}

pub fn react(err: &ApiError, alerts: &AlertStore) -> Reaction {
    if err.has_field_errors() {
        alerts.show(AlertKind::Danger, err.message());
        return Reaction::ShowFieldErrors(err.field_errors());
    }

    if err.is_not_found() {
        alerts.show(AlertKind::Warning, POST_NOT_FOUND);
        return Reaction::Redirect(POSTS_PATH);
    }

    let message = err.message();
    alerts.show(AlertKind::Danger, message.clone());
    Reaction::Banner(message)
}
