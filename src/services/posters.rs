use std::sync::Arc;
use std::time::Duration;

use crate::{models::MovieRecord, services::providers::PosterProvider};

/// `poster_path` values that mean "no poster"
pub const ABSENT_POSTER_VALUES: [&str; 5] = ["", "nan", "None", "null", "NaN"];

/// Builds display URLs for movie posters.
///
/// Prefers a live provider lookup and falls back to the record's own
/// `poster_path` column. Resolution never fails: every provider error, timeout
/// or missing value ends in the fallback, and finally in `None`.
#[derive(Clone)]
pub struct PosterResolver {
    provider: Option<Arc<dyn PosterProvider>>,
    image_base_url: String,
    lookup_timeout: Duration,
}

impl PosterResolver {
    pub fn new(
        provider: Option<Arc<dyn PosterProvider>>,
        image_base_url: String,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            image_base_url,
            lookup_timeout,
        }
    }

    /// Poster URL for a movie, if any source has one
    pub async fn resolve(&self, movie: &MovieRecord) -> Option<String> {
        // Live lookup first, dataset column as fallback
        if let Some(url) = self.live_poster(movie).await {
            return Some(url);
        }
        static_poster_url(movie.poster_path(), &self.image_base_url)
    }

    /// Resolves several movies concurrently, keeping input order
    pub async fn resolve_batch(&self, movies: &[MovieRecord]) -> Vec<Option<String>> {
        let mut tasks = Vec::with_capacity(movies.len());

        // Spawn all lookups at once so their timeouts overlap
        for movie in movies {
            let resolver = self.clone();
            let movie = movie.clone();
            let task = tokio::spawn(async move { resolver.resolve(&movie).await });
            tasks.push(task);
        }

        // Collect results in the original order
        let mut posters = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(poster) => posters.push(poster),
                Err(e) => {
                    tracing::error!(error = %e, "Poster task join error");
                    posters.push(None);
                }
            }
        }

        posters
    }

    async fn live_poster(&self, movie: &MovieRecord) -> Option<String> {
        let provider = self.provider.as_ref()?;
        let movie_id = movie.id()?;

        match tokio::time::timeout(self.lookup_timeout, provider.fetch_poster_path(movie_id)).await
        {
            Ok(Ok(Some(path))) if !path.is_empty() => {
                Some(format!("{}{}", self.image_base_url, path))
            }
            Ok(Ok(_)) => None,
            Ok(Err(e)) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    provider = provider.name(),
                    error = %e,
                    "Live poster lookup failed"
                );
                None
            }
            Err(_) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    provider = provider.name(),
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "Live poster lookup timed out"
                );
                None
            }
        }
    }
}

/// Normalizes a dataset `poster_path` value into a URL.
///
/// Absent markers yield `None`; absolute http(s) URLs pass through; anything
/// else is treated as a path under `image_base_url` with exactly one leading `/`.
pub fn static_poster_url(poster_path: Option<&str>, image_base_url: &str) -> Option<String> {
    let path = poster_path?.trim();
    if ABSENT_POSTER_VALUES.contains(&path) {
        return None;
    }

    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }

    if path.starts_with('/') {
        Some(format!("{}{}", image_base_url, path))
    } else {
        Some(format!("{}/{}", image_base_url, path))
    }
}
