//! Per-route request timings in Prometheus format.

use std::{sync::Arc, time::Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    Extension,
};
use prometheus::{exponential_buckets, Encoder, HistogramOpts, HistogramVec, Registry, TextEncoder};

use crate::{AppState, Result};

const UNMATCHED_ROUTE: &str = "unmatched";

#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,
    request_duration: HistogramVec,
}

impl HttpMetrics {
    pub fn new() -> Result<Self> {
        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "blog_http_request_duration_seconds",
                "Time spent serving HTTP requests",
            )
            .buckets(exponential_buckets(0.0005, 2.0, 14)?),
            &["method", "route", "status"],
        )?;

        let registry = Registry::new();
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry,
            request_duration,
        })
    }

    pub fn observe(&self, method: &str, route: &str, status: u16, seconds: f64) {
        self.request_duration
            .with_label_values(&[method, route, &status.to_string()])
            .observe(seconds);
    }

    /// Number of requests recorded for the label set.
    pub fn request_count(&self, method: &str, route: &str, status: u16) -> u64 {
        self.request_duration
            .with_label_values(&[method, route, &status.to_string()])
            .get_sample_count()
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Times the request and records it under its matched route template.
pub async fn track_requests(
    Extension(app_state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned());
    let method = req.method().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    app_state.metrics.observe(
        &method,
        &route,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}
