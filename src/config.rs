use std::env;

use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Without one, posts live in memory.
    pub database_url: Option<String>,
    pub port: u16,
    pub max_connections: u32,
    pub seed_posts: bool,
}

impl Config {
    pub fn init() -> Self {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            database_url,
            port: parse_var("PORT", DEFAULT_PORT),
            max_connections: parse_var("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            seed_posts: parse_var("SEED_POSTS", true),
        }
    }
}

fn parse_var<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={raw:?} is not valid, using {default}");
            default
        }),
        Err(_) => default,
    }
}
