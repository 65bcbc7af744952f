use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_swipe_api::{
    api::{create_router, AppState},
    config::{Config, SearchBackend, StorageBackend},
    db::{
        create_pool, create_redis_client, Cache, CacheWriterHandle, CachedCatalog, MemoryStore,
        MovieCatalog, PgStore,
    },
    services::providers::{
        postgres::PgMatchProvider, supabase::SupabaseProvider, SimilaritySearch,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_swipe_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let (state, cache_handle) = build_state(&config).await?;

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

/// Wires collaborators for the configured backends
async fn build_state(config: &Config) -> anyhow::Result<(AppState, Option<CacheWriterHandle>)> {
    let settings = config.recommendation_settings();

    if config.storage_backend == StorageBackend::Memory {
        let store = match &config.movies_seed_path {
            Some(path) => MemoryStore::from_seed_file(path)
                .with_context(|| format!("Failed to load movie seed file {}", path))?,
            None => MemoryStore::new(),
        };
        tracing::info!("Using in-memory storage");
        return Ok((AppState::in_memory(store, settings), None));
    }

    let pool = create_pool(&config.database_url)
        .await
        .context("Failed to connect to Postgres")?;
    let store = Arc::new(PgStore::new(pool.clone()));

    let search: Arc<dyn SimilaritySearch> = match config.search_backend {
        SearchBackend::Postgres => Arc::new(PgMatchProvider::new(pool)),
        SearchBackend::Supabase => {
            let (Some(url), Some(key)) = (&config.supabase_url, &config.supabase_key) else {
                anyhow::bail!("SUPABASE_URL and SUPABASE_KEY are required for supabase search");
            };
            Arc::new(SupabaseProvider::new(url.clone(), key.clone()))
        }
    };

    let mut cache_handle = None;
    let catalog: Arc<dyn MovieCatalog> = match &config.redis_url {
        Some(redis_url) => {
            let client = create_redis_client(redis_url)?;
            let (cache, handle) = Cache::new(client);
            cache_handle = Some(handle);
            tracing::info!("Caching cold-start sample in Redis");
            Arc::new(CachedCatalog::new(store.clone(), cache))
        }
        None => store.clone(),
    };

    tracing::info!(search = search.name(), "Using Postgres storage");

    Ok((AppState::new(store, catalog, search, settings), cache_handle))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
