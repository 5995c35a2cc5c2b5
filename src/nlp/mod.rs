pub mod features;
pub mod readability;
pub mod similarity;
pub mod tfidf;

pub use features::{FeatureBuilder, FeatureTable};
pub use readability::{select_scorer, HeuristicFlesch, ReadabilityScorer};
pub use similarity::{cosine_similarity, find_duplicates, find_similar};
pub use tfidf::{SparseVector, TfidfMatrix, TfidfVectorizer, VectorSpace};
