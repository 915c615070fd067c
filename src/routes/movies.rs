use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{CorpusStats, MovieRecord, MovieView, PosterResponse, Recommendation, SearchResponse},
    routes::AppState,
    services::CorpusEntry,
};

/// Example titles offered to users who have not searched yet
pub const SUGGESTED_TITLES: [&str; 6] = [
    "Avatar",
    "The Dark Knight",
    "Inception",
    "Titanic",
    "Interstellar",
    "The Matrix",
];

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Handler for movie search: the matched movie plus its ranked recommendations
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let corpus = state.corpus.get().await?;
    let (target, ranked) = corpus.search(&params.q);
    let target = target.ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    // Target first, then recommendations, so posters line up by position
    let movies: Vec<MovieRecord> = std::iter::once(target)
        .chain(ranked.iter().map(|candidate| candidate.entry))
        .map(|entry| entry.movie.clone())
        .collect();
    let mut posters = state.posters.resolve_batch(&movies).await.into_iter();

    let movie = view(target, posters.next().flatten());
    let recommendations = ranked
        .iter()
        .zip(posters)
        .map(|(candidate, poster)| Recommendation {
            score: candidate.score,
            movie: view(candidate.entry, poster),
        })
        .collect::<Vec<_>>();

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        title = %movie.title,
        recommendations = recommendations.len(),
        "Search completed"
    );

    Ok(Json(SearchResponse {
        movie,
        recommendations,
    }))
}

/// Handler for a single movie's poster URL
pub async fn poster(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> AppResult<Json<PosterResponse>> {
    let corpus = state.corpus.get().await?;
    let movie = corpus
        .find_by_id(&movie_id)
        .ok_or_else(|| AppError::NotFound(format!("No movie with id {}", movie_id)))?;

    let poster_url = state.posters.resolve(movie).await;

    Ok(Json(PosterResponse {
        movie_id,
        poster_url,
    }))
}

/// Handler for the example title list
pub async fn suggestions() -> Json<Vec<&'static str>> {
    Json(SUGGESTED_TITLES.to_vec())
}

/// Handler for corpus size and load time
pub async fn corpus_stats(State(state): State<Arc<AppState>>) -> AppResult<Json<CorpusStats>> {
    let corpus = state.corpus.get().await?;
    Ok(Json(corpus.stats()))
}

fn view(entry: CorpusEntry<'_>, poster_url: Option<String>) -> MovieView {
    MovieView::new(entry.movie, entry.features, poster_url)
}
