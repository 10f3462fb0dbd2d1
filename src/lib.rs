//! Blog posts over HTTP: a validated CRUD resource whose failures reach the
//! caller as one structured error shape, plus the typed client that reads it.

use metrics::HttpMetrics;
use services::posts::PostsService;

pub use self::errors::{Error, Result};

pub mod client;
pub mod config;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod validation;

#[derive(Clone)]
pub struct AppState {
    pub posts_service: PostsService,
    pub metrics: HttpMetrics,
}

impl AppState {
    pub fn new(posts_service: PostsService, metrics: HttpMetrics) -> Self {
        Self {
            posts_service,
            metrics,
        }
    }
}
