//! TF-IDF vector space: English stop-word removal, unigrams + bigrams, a
//! frequency-capped vocabulary, smoothed IDF and L2-normalized rows.
//!
//! A [`VectorSpace`] is fixed once fitted. Projecting new text through it never
//! adds dimensions; unknown terms are dropped.

use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

pub const DEFAULT_MAX_FEATURES: usize = 2000;

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();
static ENGLISH_STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();

/// Words of two or more word characters.
fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// NLTK English list from `stop-words` (crate feature `nltk`).
fn english_stop_words() -> &'static HashSet<String> {
    ENGLISH_STOP_WORDS.get_or_init(|| {
        stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect()
    })
}

/// Sparse row: strictly increasing `indices` with matching `values`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Build from unordered `(index, value)` pairs; zeros are dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.retain(|(_, v)| *v != 0.0);
        pairs.sort_by_key(|(i, _)| *i);
        let (indices, values) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    /// Dense input, keeping non-zero positions.
    pub fn from_dense(values: &[f64]) -> Self {
        Self::from_pairs(values.iter().copied().enumerate().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut total = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                Ordering::Less => a += 1,
                Ordering::Greater => b += 1,
                Ordering::Equal => {
                    total += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        total
    }

    fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
        self
    }
}

/// Document vectors produced by one fit or projection, row per input document.
#[derive(Debug, Clone, Default)]
pub struct TfidfMatrix {
    pub rows: Vec<SparseVector>,
    pub n_features: usize,
}

impl TfidfMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }
}

/// Fitting parameters.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    pub max_features: usize,
    /// Inclusive n-gram bounds.
    pub ngram_range: (usize, usize),
    pub remove_stop_words: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: (1, 2),
            remove_stop_words: true,
        }
    }
}

impl TfidfVectorizer {
    /// Fit vocabulary and IDF on `documents` and return their vectors.
    pub fn fit_transform(&self, documents: &[&str]) -> (VectorSpace, TfidfMatrix) {
        let analyzer = Analyzer {
            ngram_range: self.ngram_range,
            remove_stop_words: self.remove_stop_words,
        };
        let counts: Vec<HashMap<String, usize>> =
            documents.iter().map(|d| analyzer.term_counts(d)).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        let mut total_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, count) in doc {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                *total_freq.entry(term.as_str()).or_insert(0) += count;
            }
        }

        // Keep the most frequent terms corpus-wide; ties go to the alphabetically first.
        let mut ranked: Vec<(&str, usize)> = total_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let index: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        debug!(
            "Fitted TF-IDF space: {} documents, {} features",
            documents.len(),
            terms.len()
        );

        let space = VectorSpace {
            analyzer,
            terms,
            index,
            idf,
        };
        let rows = counts.iter().map(|c| space.weigh(c)).collect();
        let matrix = TfidfMatrix {
            rows,
            n_features: space.n_features(),
        };
        (space, matrix)
    }
}

#[derive(Debug, Clone)]
struct Analyzer {
    ngram_range: (usize, usize),
    remove_stop_words: bool,
}

impl Analyzer {
    fn tokens(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let stop_words = english_stop_words();
        token_pattern()
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .filter(|t| !self.remove_stop_words || !stop_words.contains(t))
            .collect()
    }

    /// N-grams are built from the tokens left after stop-word removal.
    fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let tokens = self.tokens(text);
        let (min_n, max_n) = self.ngram_range;
        let mut counts = HashMap::new();
        for n in min_n.max(1)..=max_n {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// A fitted vocabulary with per-term IDF weights.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    analyzer: Analyzer,
    /// Vocabulary in dimension order (alphabetical).
    terms: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl VectorSpace {
    pub fn n_features(&self) -> usize {
        self.terms.len()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.terms
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }

    /// Project text into this space without refitting.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&self.analyzer.term_counts(text))
    }

    pub fn transform_all(&self, documents: &[&str]) -> TfidfMatrix {
        TfidfMatrix {
            rows: documents.iter().map(|d| self.transform(d)).collect(),
            n_features: self.n_features(),
        }
    }

    /// Up to `n` terms with the highest positive weight in `row`; equal weights
    /// keep vocabulary order.
    pub fn top_terms(&self, row: &SparseVector, n: usize) -> Vec<String> {
        if row.sum() == 0.0 {
            return Vec::new();
        }
        let mut entries: Vec<(usize, f64)> = row.iter().filter(|(_, w)| *w > 0.0).collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
        entries
            .into_iter()
            .take(n)
            .filter_map(|(i, _)| self.terms.get(i).cloned())
            .collect()
    }

    fn weigh(&self, counts: &HashMap<String, usize>) -> SparseVector {
        let pairs = counts
            .iter()
            .filter_map(|(term, count)| {
                let i = self.term_index(term)?;
                Some((i, *count as f64 * self.idf[i]))
            })
            .collect();
        SparseVector::from_pairs(pairs).l2_normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_removed_and_bigrams_added() {
        let vectorizer = TfidfVectorizer::default();
        let (space, _) = vectorizer.fit_transform(&["The compiler enforces ownership"]);
        let vocab = space.vocabulary();
        assert!(!vocab.contains(&"the".to_string()));
        assert!(vocab.contains(&"compiler".to_string()));
        assert!(vocab.contains(&"compiler enforces".to_string()));
        assert!(vocab.contains(&"enforces ownership".to_string()));
        // Single-character tokens never enter the vocabulary.
        let (space, _) = vectorizer.fit_transform(&["x y z"]);
        assert_eq!(space.n_features(), 0);
    }

    #[test]
    fn content_words_are_not_stop_words() {
        let (space, _) = TfidfVectorizer::default().fit_transform(&[
            "information page website world new help search home value system course example",
        ]);
        let vocab = space.vocabulary();
        for word in ["information", "website", "page", "search", "home", "system", "example"] {
            assert!(vocab.contains(&word.to_string()), "{} was dropped", word);
        }
    }

    #[test]
    fn vocabulary_is_capped_by_corpus_frequency() {
        let vectorizer = TfidfVectorizer {
            max_features: 2,
            ngram_range: (1, 1),
            remove_stop_words: true,
        };
        let (space, matrix) =
            vectorizer.fit_transform(&["tomato tomato basil", "tomato basil garlic", "pepper"]);
        assert_eq!(space.vocabulary(), &["basil".to_string(), "tomato".to_string()]);
        assert_eq!(matrix.n_features, 2);
        assert!(matrix.rows[2].is_empty());
    }

    #[test]
    fn idf_is_smoothed() {
        let (space, _) = TfidfVectorizer::default().fit_transform(&["rust compiler", "rust borrow"]);
        assert!((space.idf("rust").unwrap() - 1.0).abs() < 1e-12);
        let expected = (3.0f64 / 2.0).ln() + 1.0;
        assert!((space.idf("compiler").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn rows_are_unit_length() {
        let (_, matrix) =
            TfidfVectorizer::default().fit_transform(&["rust compiler rust", "garden tomato"]);
        for row in &matrix.rows {
            assert!((row.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn transform_never_adds_dimensions() {
        let (space, matrix) = TfidfVectorizer::default().fit_transform(&["rust compiler"]);
        let projected = space.transform("rust gardening tomatoes");
        assert_eq!(space.n_features(), matrix.n_features);
        assert!(projected.indices.iter().all(|&i| i < space.n_features()));
        assert_eq!(projected.indices, vec![space.term_index("rust").unwrap()]);
        assert!(space.transform("entirely unknown vocabulary").is_empty());
    }

    #[test]
    fn top_terms_rank_by_weight() {
        let (space, matrix) = TfidfVectorizer::default()
            .fit_transform(&["tomato tomato tomato basil", "basil garlic"]);
        let top = space.top_terms(&matrix.rows[0], 5);
        assert_eq!(top[0], "tomato");
        assert!(top.len() <= 5);
        assert!(space.top_terms(&SparseVector::default(), 5).is_empty());
    }

    #[test]
    fn sparse_dot_matches_dense() {
        let a = SparseVector::from_dense(&[1.0, 0.0, 2.0, 3.0]);
        let b = SparseVector::from_dense(&[0.0, 5.0, 4.0, 1.0]);
        assert_eq!(a.indices, vec![0, 2, 3]);
        assert!((a.dot(&b) - 11.0).abs() < 1e-12);
    }
}
