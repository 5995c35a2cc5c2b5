use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical content quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityLabel {
    High,
    Medium,
    Low,
}

impl QualityLabel {
    /// Fixed ordering used when votes tie.
    pub const ALL: [QualityLabel; 3] = [QualityLabel::High, QualityLabel::Medium, QualityLabel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::High => "High",
            QualityLabel::Medium => "Medium",
            QualityLabel::Low => "Low",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized text of one page, before any features are derived.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PageText {
    pub url: Option<String>,
    pub title: String,
    pub body_text: String,
}

impl PageText {
    pub fn new(url: Option<String>, title: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self {
            url,
            title: title.into(),
            body_text: body_text.into(),
        }
    }
}

/// A page with its lexical and readability features.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeaturedDocument {
    #[serde(flatten)]
    pub page: PageText,
    pub word_count: usize,
    pub sentence_count: usize,
    pub flesch_reading_ease: f64,
    pub top_keywords: Vec<String>,
}

/// A featured page with its quality labels. Serializes to the flat export shape.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub features: FeaturedDocument,
    pub quality_label: QualityLabel,
    pub quality_label_rule: QualityLabel,
    pub quality_label_model: Option<QualityLabel>,
}

impl ScoredDocument {
    pub fn url(&self) -> Option<&str> {
        self.features.page.url.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.features.page.title
    }

    pub fn body_text(&self) -> &str {
        &self.features.page.body_text
    }
}

/// Derived presentation metrics for a scored page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReadingMetrics {
    /// Flesch score rounded to a whole number, half to even.
    pub readability_score: f64,
    pub avg_sentence_length: f64,
    pub reading_time_minutes: f64,
    pub readability_level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimilarPage {
    pub url: Option<String>,
    pub title: String,
    pub similarity: f64,
    pub word_count: usize,
    pub flesch_reading_ease: f64,
}

/// Outcome of the reference-dataset comparison. Each empty case is a distinct
/// informational state, not an error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "status", content = "pages", rename_all = "snake_case")]
pub enum SimilarityOutcome {
    DatasetUnavailable,
    NoHighQualityPages,
    NoSimilarPages,
    Matches(Vec<SimilarPage>),
}

impl SimilarityOutcome {
    pub fn matches(&self) -> &[SimilarPage] {
        match self {
            SimilarityOutcome::Matches(pages) => pages,
            _ => &[],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DuplicatePair {
    pub first: usize,
    pub second: usize,
    pub url1: Option<String>,
    pub url2: Option<String>,
    pub similarity: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisReport {
    pub document: ScoredDocument,
    pub reading: ReadingMetrics,
    pub similar: SimilarityOutcome,
    pub analyzed_at: String,
}
