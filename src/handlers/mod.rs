pub mod metrics;
pub mod posts;
