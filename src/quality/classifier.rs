use super::model::{FeatureRow, QualityModel};
use super::rules::rule_based_label;
use crate::core::types::{FeaturedDocument, QualityLabel, ScoredDocument};
use std::sync::Arc;
use tracing::warn;

/// Labels documents with the threshold rule and, when present, a model.
/// Model failures never escape: they degrade to rule-only labels.
#[derive(Clone, Default)]
pub struct QualityClassifier {
    model: Option<Arc<dyn QualityModel>>,
}

impl QualityClassifier {
    pub fn new(model: Option<Arc<dyn QualityModel>>) -> Self {
        Self { model }
    }

    pub fn rule_only() -> Self {
        Self { model: None }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn score(&self, documents: Vec<FeaturedDocument>) -> Vec<ScoredDocument> {
        let model_labels = self.model_labels(&documents);
        documents
            .into_iter()
            .zip(model_labels)
            .map(|(features, model_label)| label(features, model_label))
            .collect()
    }

    pub fn score_one(&self, features: FeaturedDocument) -> ScoredDocument {
        let model_label = self
            .model_labels(std::slice::from_ref(&features))
            .into_iter()
            .next()
            .flatten();
        label(features, model_label)
    }

    /// One entry per document; all `None` when there is no usable model output.
    fn model_labels(&self, documents: &[FeaturedDocument]) -> Vec<Option<QualityLabel>> {
        let unset = vec![None; documents.len()];
        let Some(model) = &self.model else {
            return unset;
        };

        let rows: Vec<FeatureRow> = documents.iter().map(feature_row).collect();
        match model.predict(&rows) {
            Ok(labels) if labels.len() == documents.len() => labels,
            Ok(labels) => {
                warn!(
                    "Model returned {} labels for {} documents; using rule-based labels",
                    labels.len(),
                    documents.len()
                );
                unset
            }
            Err(e) => {
                warn!("Model scoring failed: {}; using rule-based labels", e);
                unset
            }
        }
    }
}

/// The model label wins when present; the rule label is always recorded.
fn label(features: FeaturedDocument, model_label: Option<QualityLabel>) -> ScoredDocument {
    let rule = rule_based_label(features.word_count, features.flesch_reading_ease);
    ScoredDocument {
        quality_label: model_label.unwrap_or(rule),
        quality_label_rule: rule,
        quality_label_model: model_label,
        features,
    }
}

/// `[word_count, sentence_count, flesch_reading_ease]`, non-finite values as 0.
pub fn feature_row(doc: &FeaturedDocument) -> FeatureRow {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    [
        doc.word_count as f64,
        doc.sentence_count as f64,
        finite(doc.flesch_reading_ease),
    ]
}
