use std::{collections::BTreeMap, sync::Arc};

use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::RwLock;
use tracing::info;

use crate::Result;

pub mod posts_repo;

#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies the schema in `migrations/`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;
        info!("✅ Connection to the database is successful!");

        Ok(Self::new(pool))
    }
}

/// Process-local store used when no database is configured.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<i32, crate::models::posts::Post>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}
