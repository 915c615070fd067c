//! Movie artwork providers
//!
//! A provider answers one question: what poster does the external catalogue
//! have for this movie id. Turning that into a display URL, and falling back
//! to the dataset's own column, is the resolver's job.

use crate::error::AppResult;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for poster metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Fetch the poster path for a movie id
    ///
    /// `Ok(None)` means the provider knows the movie but has no poster for it.
    /// Errors cover transport failures and non-success responses.
    async fn fetch_poster_path(&self, movie_id: &str) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
