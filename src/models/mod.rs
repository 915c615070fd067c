use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{MovieFeatures, MovieRecord, Row, ScoredCandidate};

/// Display-ready view of a movie returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieView {
    pub id: Option<String>,
    pub title: String,
    pub director: String,
    pub genres: Vec<String>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
}

impl MovieView {
    pub fn new(movie: &MovieRecord, features: &MovieFeatures, poster_url: Option<String>) -> Self {
        Self {
            id: movie.id().map(str::to_string),
            title: movie.original_title().to_string(),
            director: features.director.clone(),
            genres: features.genres.clone(),
            overview: movie.overview().map(str::to_string),
            poster_url,
        }
    }
}

/// A single recommendation with its match score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub score: u32,
    pub movie: MovieView,
}

/// Response for a title search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub movie: MovieView,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PosterResponse {
    pub movie_id: String,
    pub poster_url: Option<String>,
}

/// Summary of the loaded corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStats {
    pub movies: usize,
    pub loaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_view_from_record() {
        let movie: MovieRecord = [
            ("id", "27205"),
            ("original_title", "Inception"),
            ("overview", "Cobb, a skilled thief..."),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<Row>()
        .into();
        let features = MovieFeatures {
            genres: vec!["Action".to_string(), "Thriller".to_string()],
            director: "Christopher Nolan".to_string(),
        };

        let view = MovieView::new(&movie, &features, None);

        assert_eq!(view.id.as_deref(), Some("27205"));
        assert_eq!(view.title, "Inception");
        assert_eq!(view.director, "Christopher Nolan");
        assert_eq!(view.genres, vec!["Action", "Thriller"]);
        assert_eq!(view.poster_url, None);
    }

    #[test]
    fn test_search_response_serialization() {
        let view = MovieView {
            id: Some("1".to_string()),
            title: "Avatar".to_string(),
            director: "James Cameron".to_string(),
            genres: vec!["Action".to_string()],
            overview: None,
            poster_url: Some("https://image.tmdb.org/t/p/w500/a.jpg".to_string()),
        };
        let response = SearchResponse {
            movie: view.clone(),
            recommendations: vec![Recommendation {
                score: 5,
                movie: view,
            }],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["movie"]["title"], "Avatar");
        assert_eq!(json["recommendations"][0]["score"], 5);
        assert_eq!(
            json["recommendations"][0]["movie"]["poster_url"],
            "https://image.tmdb.org/t/p/w500/a.jpg"
        );
    }
}
