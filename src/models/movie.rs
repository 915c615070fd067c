use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single dataset row: column name to raw cell value
pub type Row = HashMap<String, String>;

/// One movie in the corpus, produced by merging a credits row with its movies row.
///
/// Fields are kept as raw strings exactly as they appear in the datasets; the
/// accessors below cover the columns the recommender reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieRecord {
    fields: Row,
}

impl MovieRecord {
    pub fn new(fields: Row) -> Self {
        Self { fields }
    }

    /// Raw value of any column
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Movie identifier, if present and non-blank
    pub fn id(&self) -> Option<&str> {
        self.non_blank("id")
    }

    /// Display title; empty when the column is missing
    pub fn original_title(&self) -> &str {
        self.get("original_title").unwrap_or_default()
    }

    pub fn overview(&self) -> Option<&str> {
        self.non_blank("overview")
    }

    /// Static poster path column, untouched
    pub fn poster_path(&self) -> Option<&str> {
        self.get("poster_path")
    }

    fn non_blank(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|value| !value.trim().is_empty())
    }
}

impl From<Row> for MovieRecord {
    fn from(fields: Row) -> Self {
        Self::new(fields)
    }
}

/// Genre names and director decoded once from a record's embedded columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFeatures {
    pub genres: Vec<String>,
    pub director: String,
}

/// A corpus record paired with its similarity score against a search target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    pub score: u32,
    pub movie: &'a MovieRecord,
}
