use std::collections::HashMap;

use crate::models::{MovieRecord, Row};

/// Join key column on the movies side
pub const MOVIE_ID_COLUMN: &str = "id";
/// Join key column on the credits side
pub const CREDIT_MOVIE_ID_COLUMN: &str = "movie_id";

/// Joins credits rows to movies rows on `credits.movie_id == movies.id`.
///
/// The join is driven by credits: one merged record per credits row whose
/// `movie_id` matches a movie, in credits order. Unmatched credits are dropped
/// and movies no credit refers to are never emitted. When both rows carry the
/// same column, the credits value wins. Duplicate movie ids resolve to the last
/// movies row seen.
pub fn merge_records(credits: &[Row], movies: &[Row]) -> Vec<MovieRecord> {
    let movies_by_id: HashMap<&str, &Row> = movies
        .iter()
        .filter_map(|movie| {
            movie
                .get(MOVIE_ID_COLUMN)
                .map(|id| (id.as_str(), movie))
        })
        .collect();

    let mut dropped = 0usize;
    let merged: Vec<MovieRecord> = credits
        .iter()
        .filter_map(|credit| {
            let movie = credit
                .get(CREDIT_MOVIE_ID_COLUMN)
                .and_then(|id| movies_by_id.get(id.as_str()));

            match movie {
                Some(movie) => Some(overlay(movie, credit)),
                None => {
                    dropped += 1;
                    None
                }
            }
        })
        .collect();

    if dropped > 0 {
        tracing::debug!(dropped, "Credits rows without a matching movie were dropped");
    }

    merged
}

/// Movie fields overlaid by credit fields
fn overlay(movie: &Row, credit: &Row) -> MovieRecord {
    let mut fields = movie.clone();
    fields.extend(credit.iter().map(|(k, v)| (k.clone(), v.clone())));
    MovieRecord::new(fields)
}
