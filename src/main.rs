use std::sync::Arc;

use blog_posts::{
    config::Config,
    metrics::HttpMetrics,
    repositories::{posts_repo::PostsRepository, MemoryRepo, PostgresRepo},
    routes::{configure_cors, create_routes},
    services::posts::PostsService,
    AppState,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::init();

    let repo: Arc<dyn PostsRepository> = match &config.database_url {
        Some(url) => Arc::new(PostgresRepo::connect(url, config.max_connections).await?),
        None => {
            warn!("DATABASE_URL is not set, posts are kept in memory");
            Arc::new(MemoryRepo::new())
        }
    };

    let posts_service = PostsService::new(repo);
    if config.seed_posts {
        posts_service.seed_if_empty().await?;
    }

    let app_state = AppState::new(posts_service, HttpMetrics::new()?);
    let app = create_routes(Arc::new(app_state)).layer(configure_cors());

    let listener = tokio::net::TcpListener::bind(format!("[::]:{}", config.port)).await?;
    info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
