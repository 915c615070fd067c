use std::collections::HashSet;

use crate::models::{MovieFeatures, MovieRecord, ScoredCandidate};
use crate::services::decoders::decode_features;

/// Maximum number of recommendations returned for a search
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Points per genre shared with the target
pub const GENRE_WEIGHT: u32 = 2;
/// Points for having the same director as the target
pub const DIRECTOR_WEIGHT: u32 = 3;

/// Overlap score of a candidate against the target.
///
/// Directors compare by exact string, so two records that both decode to
/// `Unknown` earn the director bonus.
pub fn score(target: &MovieFeatures, candidate: &MovieFeatures) -> u32 {
    let target_genres: HashSet<&str> = target.genres.iter().map(String::as_str).collect();
    let candidate_genres: HashSet<&str> = candidate.genres.iter().map(String::as_str).collect();
    let shared_genres = target_genres.intersection(&candidate_genres).count() as u32;
    let same_director = u32::from(target.director == candidate.director);

    GENRE_WEIGHT * shared_genres + DIRECTOR_WEIGHT * same_director
}

/// Index of the first movie whose `original_title` equals `title`, ignoring case
pub fn find_target<'a, I>(title: &str, movies: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a MovieRecord>,
{
    let wanted = title.to_lowercase();
    movies
        .into_iter()
        .position(|movie| movie.original_title().to_lowercase() == wanted)
}

/// Ranks `corpus` against `target`, returning positions into `corpus` with
/// their scores.
///
/// `features[i]` holds the decoded features of `corpus[i]`. Records sharing the
/// target's id are skipped, zero scores are dropped, and ties keep corpus
/// order. At most [`MAX_RECOMMENDATIONS`] are kept.
pub fn rank(
    target: &MovieRecord,
    target_features: &MovieFeatures,
    corpus: &[MovieRecord],
    features: &[MovieFeatures],
) -> Vec<(usize, u32)> {
    let mut ranked: Vec<(usize, u32)> = corpus
        .iter()
        .zip(features)
        .enumerate()
        .filter(|(_, (movie, _))| movie.get("id") != target.get("id"))
        .map(|(position, (_, candidate))| (position, score(target_features, candidate)))
        .filter(|&(_, score)| score > 0)
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

/// Finds the movie titled `title` and the movies most similar to it.
///
/// Decodes every record's embedded fields on the fly; [`crate::services::Corpus`]
/// offers the same search over features decoded once at load time.
pub fn find_similar<'a>(
    title: &str,
    corpus: &'a [MovieRecord],
) -> (Option<&'a MovieRecord>, Vec<ScoredCandidate<'a>>) {
    let Some(index) = find_target(title, corpus) else {
        return (None, Vec::new());
    };
    let target = &corpus[index];

    let features: Vec<MovieFeatures> = corpus.iter().map(decode_features).collect();
    let ranked = rank(target, &features[index], corpus, &features)
        .into_iter()
        .map(|(position, score)| ScoredCandidate {
            score,
            movie: &corpus[position],
        })
        .collect();

    (Some(target), ranked)
}
