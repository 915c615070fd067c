pub mod corpus;
pub mod dataset;
pub mod decoders;
pub mod merge;
pub mod posters;
pub mod providers;
pub mod similarity;

pub use corpus::{Corpus, CorpusCache, CorpusEntry, RankedEntry};
pub use dataset::DatasetLoader;
pub use posters::PosterResolver;
pub use providers::{PosterProvider, TmdbProvider};
