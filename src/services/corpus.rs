use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use crate::{
    error::AppResult,
    models::{CorpusStats, MovieFeatures, MovieRecord},
    services::{
        dataset::DatasetLoader,
        decoders::decode_features,
        similarity::{find_target, rank},
    },
};

/// A corpus record together with the features decoded for it at load time
#[derive(Debug, Clone, Copy)]
pub struct CorpusEntry<'a> {
    pub movie: &'a MovieRecord,
    pub features: &'a MovieFeatures,
}

/// A recommended corpus entry and its score against the search target
#[derive(Debug, Clone, Copy)]
pub struct RankedEntry<'a> {
    pub score: u32,
    pub entry: CorpusEntry<'a>,
}

/// The merged, in-memory movie set with each record's features decoded once
#[derive(Debug)]
pub struct Corpus {
    records: Vec<MovieRecord>,
    features: Vec<MovieFeatures>,
    loaded_at: DateTime<Utc>,
}

impl Corpus {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        let features = records.iter().map(decode_features).collect();
        Self {
            records,
            features,
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            movies: self.len(),
            loaded_at: self.loaded_at,
        }
    }

    /// First record with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&MovieRecord> {
        self.records.iter().find(|record| record.id() == Some(id))
    }

    /// Searches by title and ranks the rest of the corpus against the match.
    ///
    /// Same results as [`crate::services::similarity::find_similar`], without
    /// re-decoding every record per query.
    pub fn search(&self, title: &str) -> (Option<CorpusEntry<'_>>, Vec<RankedEntry<'_>>) {
        let Some(index) = find_target(title, &self.records) else {
            return (None, Vec::new());
        };
        let target = self.entry(index);
        let ranked = rank(target.movie, target.features, &self.records, &self.features)
            .into_iter()
            .map(|(position, score)| RankedEntry {
                score,
                entry: self.entry(position),
            })
            .collect();

        (Some(target), ranked)
    }

    fn entry(&self, index: usize) -> CorpusEntry<'_> {
        CorpusEntry {
            movie: &self.records[index],
            features: &self.features[index],
        }
    }
}

/// Process-lifetime memo of the corpus.
///
/// The first `get` loads and merges the datasets; later calls share the same
/// corpus. A failed load is not remembered, so the next call tries again.
pub struct CorpusCache {
    cell: OnceCell<Arc<Corpus>>,
    loader: DatasetLoader,
    credits_source: String,
    movies_source: String,
}

impl CorpusCache {
    pub fn new(loader: DatasetLoader, credits_source: String, movies_source: String) -> Self {
        Self {
            cell: OnceCell::new(),
            loader,
            credits_source,
            movies_source,
        }
    }

    /// A cache that already holds `corpus` and never touches the loader
    pub fn preloaded(loader: DatasetLoader, corpus: Corpus) -> Self {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(corpus))),
            loader,
            credits_source: String::new(),
            movies_source: String::new(),
        }
    }

    pub async fn get(&self) -> AppResult<Arc<Corpus>> {
        let corpus = self
            .cell
            .get_or_try_init(|| async {
                let records = self
                    .loader
                    .load_records(&self.credits_source, &self.movies_source)
                    .await?;
                let corpus = Corpus::new(records);
                tracing::info!(movies = corpus.len(), "Movie corpus loaded");
                Ok::<_, crate::error::AppError>(Arc::new(corpus))
            })
            .await?;

        Ok(Arc::clone(corpus))
    }
}
