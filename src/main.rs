use std::sync::Arc;

use anyhow::Context;
use reelmatch::{
    config::Config,
    db::{create_redis_client, Cache},
    routes::{create_router, AppState},
    services::{CorpusCache, DatasetLoader, PosterProvider, PosterResolver, TmdbProvider},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelmatch=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (cache, cache_handle) = match &config.redis_url {
        Some(redis_url) => Cache::new(create_redis_client(redis_url)?).await,
        None => {
            tracing::info!("REDIS_URL not set, poster lookups will not be memoized");
            Cache::disabled()
        }
    };

    let provider: Option<Arc<dyn PosterProvider>> = match config.poster_api_key() {
        Some(api_key) => {
            let http_client = reqwest::Client::builder()
                .timeout(config.poster_timeout())
                .build()
                .context("Failed to build poster HTTP client")?;
            Some(Arc::new(TmdbProvider::new(
                http_client,
                cache,
                api_key.to_string(),
                config.tmdb_api_url.clone(),
            )))
        }
        None => {
            tracing::warn!("TMDB_API_KEY not set, posters come from the dataset only");
            None
        }
    };
    let posters = PosterResolver::new(
        provider,
        config.tmdb_image_base_url.clone(),
        config.poster_timeout(),
    );

    let dataset_client = reqwest::Client::builder()
        .timeout(config.dataset_timeout())
        .build()
        .context("Failed to build dataset HTTP client")?;
    let corpus = CorpusCache::new(
        DatasetLoader::new(dataset_client),
        config.credits_source.clone(),
        config.movies_source.clone(),
    );

    // Warm the corpus; on failure, requests retry the load and report 503 meanwhile.
    match corpus.get().await {
        Ok(corpus) => tracing::info!(movies = corpus.len(), "Movie data ready"),
        Err(e) => tracing::error!(error = %e, "Movie data could not be loaded"),
    }

    let state = Arc::new(AppState::new(corpus, posters));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    // Flush queued poster writes before the runtime goes away
    cache_handle.shutdown().await;
    Ok(())
}
