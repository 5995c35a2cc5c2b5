use super::readability::{count_sentences, count_words, ReadabilityScorer};
use super::tfidf::{TfidfMatrix, TfidfVectorizer, VectorSpace};
use crate::core::types::{FeaturedDocument, PageText};
use std::sync::Arc;
use tracing::info;

pub const TOP_KEYWORDS: usize = 5;

/// Documents with features plus the vector space and vectors behind their keywords.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub documents: Vec<FeaturedDocument>,
    pub space: VectorSpace,
    pub vectors: TfidfMatrix,
}

/// Derives word/sentence counts, readability and top keywords.
#[derive(Clone)]
pub struct FeatureBuilder {
    scorer: Arc<dyn ReadabilityScorer>,
    vectorizer: TfidfVectorizer,
}

impl FeatureBuilder {
    pub fn new(scorer: Arc<dyn ReadabilityScorer>) -> Self {
        Self {
            scorer,
            vectorizer: TfidfVectorizer::default(),
        }
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Compute features for `pages`. With no `space`, a new space is fit on
    /// exactly these pages; with one, the pages are projected through it and
    /// the same space is returned unchanged.
    pub fn compute_features(&self, pages: Vec<PageText>, space: Option<&VectorSpace>) -> FeatureTable {
        match space {
            Some(space) => {
                let (documents, vectors) = self.project(pages, space);
                FeatureTable {
                    documents,
                    space: space.clone(),
                    vectors,
                }
            }
            None => self.fit(pages),
        }
    }

    /// Fit a fresh vector space over `pages`.
    pub fn fit(&self, pages: Vec<PageText>) -> FeatureTable {
        let texts: Vec<&str> = pages.iter().map(|p| p.body_text.as_str()).collect();
        let (space, vectors) = self.vectorizer.fit_transform(&texts);
        info!(
            "Computed features for {} documents ({} vocabulary terms, readability: {})",
            pages.len(),
            space.n_features(),
            self.scorer.name()
        );
        let documents = self.attach(pages, &space, &vectors);
        FeatureTable {
            documents,
            space,
            vectors,
        }
    }

    /// Project `pages` through an already fitted space.
    pub fn project(&self, pages: Vec<PageText>, space: &VectorSpace) -> (Vec<FeaturedDocument>, TfidfMatrix) {
        let texts: Vec<&str> = pages.iter().map(|p| p.body_text.as_str()).collect();
        let vectors = space.transform_all(&texts);
        let documents = self.attach(pages, space, &vectors);
        (documents, vectors)
    }

    /// Fit a space over one page alone; the page's keywords come from its own text.
    pub fn fit_one(&self, page: PageText) -> FeaturedDocument {
        let (space, vectors) = self.vectorizer.fit_transform(&[page.body_text.as_str()]);
        let keywords = vectors
            .row(0)
            .map(|row| space.top_terms(row, TOP_KEYWORDS))
            .unwrap_or_default();
        self.featurize(page, keywords)
    }

    fn attach(&self, pages: Vec<PageText>, space: &VectorSpace, vectors: &TfidfMatrix) -> Vec<FeaturedDocument> {
        pages
            .into_iter()
            .zip(&vectors.rows)
            .map(|(page, row)| self.featurize(page, space.top_terms(row, TOP_KEYWORDS)))
            .collect()
    }

    fn featurize(&self, page: PageText, top_keywords: Vec<String>) -> FeaturedDocument {
        let text = page.body_text.as_str();
        FeaturedDocument {
            word_count: count_words(text),
            sentence_count: count_sentences(text),
            flesch_reading_ease: self.scorer.flesch_reading_ease(text),
            top_keywords,
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::readability::HeuristicFlesch;

    fn builder() -> FeatureBuilder {
        FeatureBuilder::new(Arc::new(HeuristicFlesch))
    }

    #[test]
    fn computes_counts_and_keywords() {
        let pages = vec![
            PageText::new(None, "", "Rust ownership rules. Rust borrowing rules! Compiler?"),
            PageText::new(None, "", "Tomato garden soil."),
        ];
        let table = builder().fit(pages);
        let first = &table.documents[0];
        assert_eq!(first.word_count, 7);
        assert_eq!(first.sentence_count, 3);
        assert!(first.top_keywords.len() <= TOP_KEYWORDS);
        assert!(first.top_keywords.contains(&"rust".to_string()));
        assert_eq!(table.vectors.n_rows(), 2);
    }

    #[test]
    fn empty_body_has_empty_keywords_and_floor_counts() {
        let table = builder().fit(vec![PageText::default()]);
        let doc = &table.documents[0];
        assert_eq!(doc.word_count, 0);
        assert_eq!(doc.sentence_count, 1);
        assert_eq!(doc.flesch_reading_ease, 0.0);
        assert!(doc.top_keywords.is_empty());
    }

    #[test]
    fn projection_reuses_fitted_space() {
        let reference = builder().fit(vec![
            PageText::new(None, "", "rust compiler ownership"),
            PageText::new(None, "", "tomato garden"),
        ]);
        let projected = builder().compute_features(
            vec![PageText::new(None, "", "rust tomato quantum")],
            Some(&reference.space),
        );
        assert_eq!(projected.space.vocabulary(), reference.space.vocabulary());
        assert_eq!(projected.vectors.n_features, reference.space.n_features());
        assert!(!projected.documents[0].top_keywords.contains(&"quantum".to_string()));
    }

    #[test]
    fn single_page_fit_matches_table_fit() {
        let page = PageText::new(None, "T", "Rust ownership rules. Rust borrowing rules!");
        let alone = builder().fit_one(page.clone());
        let table = builder().fit(vec![page]);
        assert_eq!(alone, table.documents[0]);
    }
}
