//! Calling side of the posts API: typed calls, typed errors, and the pieces a
//! UI needs to route those errors to the user.

pub mod alerts;
pub mod error;
pub mod form;
pub mod posts;

pub use alerts::{Alert, AlertId, AlertKind, AlertStore};
pub use error::{ApiError, FieldErrors};
pub use form::{react, Reaction};
pub use posts::PostsClient;
