use std::sync::Arc;

use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        metrics::{metrics, not_found},
        posts::posts_handler,
    },
    metrics::track_requests,
    AppState,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .merge(posts_handler())
        .route("/metrics", get(metrics))
        // Only covers routes registered above it.
        .method_not_allowed_fallback(not_found)
        .route_layer(middleware::from_fn(track_requests))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new().nest("/api", api_route).fallback(not_found)
}

pub fn configure_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
