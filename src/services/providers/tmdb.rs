//! The Movie Database (TMDB) poster provider

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    services::providers::PosterProvider,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

const POSTER_CACHE_TTL: u64 = 3600; // 1 hour
const LANGUAGE: &str = "en-US";

/// Subset of the GET /movie/{id} response we use
#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    #[serde(default)]
    poster_path: Option<String>,
}

/// Cached lookup outcome; a movie without a poster is cached too
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CachedPoster {
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl TmdbProvider {
    /// `http_client` should carry the poster lookup timeout
    pub fn new(http_client: HttpClient, cache: Cache, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    fn movie_url(&self, movie_id: &str) -> String {
        format!("{}/movie/{}", self.api_url, movie_id.trim())
    }

    async fn lookup(&self, movie_id: &str) -> AppResult<CachedPoster> {
        cached!(
            self.cache,
            CacheKey::PosterPath(movie_id.to_string()),
            POSTER_CACHE_TTL,
            async move {
                let response = self
                    .http_client
                    .get(self.movie_url(movie_id))
                    .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(AppError::ExternalApi(format!(
                        "TMDB returned status {} for movie {}",
                        response.status(),
                        movie_id
                    )));
                }

                let details: TmdbMovieDetails = response.json().await?;

                tracing::debug!(
                    movie_id = %movie_id,
                    has_poster = details.poster_path.is_some(),
                    provider = "tmdb",
                    "Poster lookup completed"
                );

                Ok(CachedPoster {
                    poster_path: details.poster_path,
                })
            }
        )
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn fetch_poster_path(&self, movie_id: &str) -> AppResult<Option<String>> {
        let poster = self.lookup(movie_id).await?;
        Ok(poster.poster_path.filter(|path| !path.trim().is_empty()))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> TmdbProvider {
        let (cache, _handle) = Cache::disabled();
        TmdbProvider::new(
            HttpClient::new(),
            cache,
            "test_key".to_string(),
            "http://test.local/3/".to_string(),
        )
    }

    #[test]
    fn test_movie_url() {
        let provider = create_test_provider();
        assert_eq!(provider.movie_url("19995"), "http://test.local/3/movie/19995");
        assert_eq!(provider.movie_url(" 285 "), "http://test.local/3/movie/285");
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(create_test_provider().name(), "tmdb");
    }

    #[test]
    fn test_details_deserialization() {
        let json = r#"{
            "id": 19995,
            "original_title": "Avatar",
            "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg",
            "runtime": 162
        }"#;

        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            details.poster_path,
            Some("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg".to_string())
        );
    }

    #[test]
    fn test_details_deserialization_without_poster() {
        let details: TmdbMovieDetails = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(details.poster_path, None);

        let details: TmdbMovieDetails =
            serde_json::from_str(r#"{"id": 1, "poster_path": null}"#).unwrap();
        assert_eq!(details.poster_path, None);
    }

    #[test]
    fn test_cached_poster_round_trips_absent_path() {
        let json = serde_json::to_string(&CachedPoster { poster_path: None }).unwrap();
        let cached: Option<CachedPoster> = serde_json::from_str(&json).unwrap();
        assert_eq!(cached, Some(CachedPoster { poster_path: None }));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_an_error() {
        let (cache, _handle) = Cache::disabled();
        let provider = TmdbProvider::new(
            HttpClient::new(),
            cache,
            "test_key".to_string(),
            "http://127.0.0.1:9".to_string(),
        );

        let result = provider.fetch_poster_path("19995").await;
        assert!(result.is_err());
    }
}
