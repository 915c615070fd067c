//! Decoders for the JSON sub-documents embedded in the `genres` and `crew` columns.
//!
//! Both decoders are total: malformed or missing data degrades to an empty
//! genre list or the [`UNKNOWN_DIRECTOR`] sentinel, never an error.

use serde::Deserialize;
use serde_json::Value;

use crate::models::{MovieFeatures, MovieRecord};

/// Director value used when a record has no decodable director
pub const UNKNOWN_DIRECTOR: &str = "Unknown";

const DIRECTOR_JOB: &str = "Director";

#[derive(Debug, Deserialize)]
struct GenreEntry {
    name: String,
}

/// Parses a list-of-objects column, or `None` when absent, blank or malformed.
fn parse_list<T: serde::de::DeserializeOwned>(raw: Option<&str>) -> Option<Vec<T>> {
    let raw = raw.filter(|text| !text.trim().is_empty())?;
    serde_json::from_str(raw).ok()
}

/// Genre names from the record's `genres` column, in column order
///
/// The column decodes as a whole: a single entry without a string `name`
/// yields an empty list.
pub fn decode_genres(movie: &MovieRecord) -> Vec<String> {
    parse_list::<GenreEntry>(movie.get("genres"))
        .map(|genres| genres.into_iter().map(|genre| genre.name).collect())
        .unwrap_or_default()
}

/// Name of the first crew member whose job is exactly `Director`
///
/// Entries are inspected one at a time, so an odd entry elsewhere in the
/// list does not hide the director.
pub fn decode_director(movie: &MovieRecord) -> String {
    parse_list::<Value>(movie.get("crew"))
        .and_then(|crew| {
            crew.iter()
                .find(|member| {
                    member.get("job").and_then(Value::as_str) == Some(DIRECTOR_JOB)
                })
                .and_then(|director| director.get("name").and_then(Value::as_str))
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string())
}

/// Decodes both features of a record in one go
pub fn decode_features(movie: &MovieRecord) -> MovieFeatures {
    MovieFeatures {
        genres: decode_genres(movie),
        director: decode_director(movie),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;

    fn record(genres: Option<&str>, crew: Option<&str>) -> MovieRecord {
        let mut fields = Row::new();
        if let Some(genres) = genres {
            fields.insert("genres".to_string(), genres.to_string());
        }
        if let Some(crew) = crew {
            fields.insert("crew".to_string(), crew.to_string());
        }
        MovieRecord::new(fields)
    }

    #[test]
    fn test_decode_genres() {
        let movie = record(
            Some(r#"[{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]"#),
            None,
        );
        assert_eq!(decode_genres(&movie), vec!["Action", "Science Fiction"]);
    }

    #[test]
    fn test_decode_genres_missing_or_blank() {
        assert!(decode_genres(&record(None, None)).is_empty());
        assert!(decode_genres(&record(Some(""), None)).is_empty());
        assert!(decode_genres(&record(Some("[]"), None)).is_empty());
    }

    #[test]
    fn test_decode_genres_malformed() {
        for raw in [
            "not json",
            "[{'name': 'Action'}]",
            r#"{"name": "Action"}"#,
            r#"[{"id": 28}]"#,
            r#"[1, 2, 3]"#,
            "[",
        ] {
            assert!(decode_genres(&record(Some(raw), None)).is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_decode_director() {
        let crew = r#"[
            {"name": "Stephen E. Rivkin", "job": "Editor"},
            {"name": "James Cameron", "job": "Director"},
            {"name": "Someone Else", "job": "Director"}
        ]"#;
        assert_eq!(decode_director(&record(None, Some(crew))), "James Cameron");
    }

    #[test]
    fn test_decode_director_job_is_case_sensitive() {
        let crew = r#"[{"name": "A", "job": "director"}, {"name": "B", "job": "Assistant Director"}]"#;
        assert_eq!(decode_director(&record(None, Some(crew))), UNKNOWN_DIRECTOR);
    }

    #[test]
    fn test_decode_director_falls_back_to_unknown() {
        assert_eq!(decode_director(&record(None, None)), UNKNOWN_DIRECTOR);
        assert_eq!(decode_director(&record(None, Some(""))), UNKNOWN_DIRECTOR);
        assert_eq!(decode_director(&record(None, Some("[]"))), UNKNOWN_DIRECTOR);
        assert_eq!(decode_director(&record(None, Some("{{{"))), UNKNOWN_DIRECTOR);
        assert_eq!(
            decode_director(&record(None, Some(r#"[{"job": "Director"}]"#))),
            UNKNOWN_DIRECTOR
        );
    }

    #[test]
    fn test_decode_director_tolerates_sparse_crew_entries() {
        let crew = r#"[{"department": "Sound"}, {"name": "Nolan", "job": "Director"}]"#;
        assert_eq!(decode_director(&record(None, Some(crew))), "Nolan");
    }

    #[test]
    fn test_decode_director_skips_entries_with_unexpected_types() {
        let crew = r#"[
            {"name": "Jane", "job": 7},
            42,
            {"name": null, "job": ["Director"]},
            {"name": "Nolan", "job": "Director"}
        ]"#;
        assert_eq!(decode_director(&record(None, Some(crew))), "Nolan");
    }

    #[test]
    fn test_decode_director_non_string_name_is_unknown() {
        let crew = r#"[{"name": 12, "job": "Director"}, {"name": "Later", "job": "Director"}]"#;
        assert_eq!(decode_director(&record(None, Some(crew))), UNKNOWN_DIRECTOR);
    }

    #[test]
    fn test_decode_features() {
        let movie = record(
            Some(r#"[{"name": "Drama"}]"#),
            Some(r#"[{"name": "Ang Lee", "job": "Director"}]"#),
        );
        let features = decode_features(&movie);
        assert_eq!(features.genres, vec!["Drama"]);
        assert_eq!(features.director, "Ang Lee");
    }
}
