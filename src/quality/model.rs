//! Pluggable quality models and the JSON model artifact.
//!
//! The classifier only depends on [`QualityModel`]. The artifact format is a
//! tagged JSON document:
//!
//! ```json
//! {"kind": "decision_tree", "nodes": [
//!   {"split": {"feature": 0, "threshold": 1500.0, "left": 1, "right": 2}},
//!   {"leaf": {"label": "Low"}},
//!   {"leaf": {"label": "High"}}
//! ]}
//! ```
//!
//! Rows are `[word_count, sentence_count, flesch_reading_ease]`. A split sends
//! `x[feature] <= threshold` left.

use crate::core::error::ModelError;
use crate::core::types::QualityLabel;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Number of numeric inputs every model receives per row.
pub const FEATURE_WIDTH: usize = 3;

pub type FeatureRow = [f64; FEATURE_WIDTH];

/// Anything that can label feature rows. `None` marks a missing prediction.
pub trait QualityModel: Send + Sync {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<Option<QualityLabel>>, ModelError>;
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        #[serde(default)]
        label: Option<QualityLabel>,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root. A walk longer than the node count means a cycle.
    pub fn predict_row(&self, row: &FeatureRow) -> Result<Option<QualityLabel>, ModelError> {
        let mut current = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(current) {
                Some(TreeNode::Leaf { label }) => return Ok(*label),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).ok_or(ModelError::FeatureWidth {
                        expected: *feature + 1,
                        got: FEATURE_WIDTH,
                    })?;
                    current = if *value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::Malformed(format!(
                        "node index {} out of range ({} nodes)",
                        current,
                        self.nodes.len()
                    )))
                }
            }
        }
        Err(ModelError::Malformed("tree walk did not reach a leaf".to_string()))
    }
}

impl QualityModel for DecisionTree {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<Option<QualityLabel>>, ModelError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Majority vote over trees. Ties resolve in `QualityLabel::ALL` order;
/// a row where every tree abstains stays missing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn vote(&self, row: &FeatureRow) -> Result<Option<QualityLabel>, ModelError> {
        let mut tally = [0usize; 3];
        for tree in &self.trees {
            if let Some(label) = tree.predict_row(row)? {
                if let Some(slot) = QualityLabel::ALL.iter().position(|l| *l == label) {
                    tally[slot] += 1;
                }
            }
        }
        let best = tally.iter().copied().max().unwrap_or(0);
        if best == 0 {
            return Ok(None);
        }
        Ok(QualityLabel::ALL
            .iter()
            .zip(tally)
            .find(|(_, count)| *count == best)
            .map(|(label, _)| *label))
    }
}

impl QualityModel for RandomForest {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<Option<QualityLabel>>, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Malformed("random forest has no trees".to_string()));
        }
        rows.iter().map(|row| self.vote(row)).collect()
    }
}

/// On-disk model artifact.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn into_model(self) -> Arc<dyn QualityModel> {
        match self {
            ModelArtifact::DecisionTree(tree) => Arc::new(tree),
            ModelArtifact::RandomForest(forest) => Arc::new(forest),
        }
    }
}

/// Load a model if one is usable. Missing, unreadable or invalid artifacts
/// mean "no model"; the failure is logged, never returned.
pub fn load_model(path: Option<&Path>) -> Option<Arc<dyn QualityModel>> {
    let path = path?;
    if !path.exists() {
        info!("No quality model at {}; using rule-based labels", path.display());
        return None;
    }

    match ModelArtifact::read(path) {
        Ok(artifact) => {
            info!("Quality model loaded from {}", path.display());
            Some(artifact.into_model())
        }
        Err(e) => {
            warn!("Failed to load model from {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"{"kind": "decision_tree", "nodes": [
        {"split": {"feature": 0, "threshold": 1000.0, "left": 1, "right": 2}},
        {"leaf": {"label": "Low"}},
        {"leaf": {"label": "High"}}
    ]}"#;

    #[test]
    fn decision_tree_splits_left_on_less_or_equal() {
        let model = ModelArtifact::from_json(TREE).unwrap().into_model();
        let preds = model
            .predict(&[[1000.0, 10.0, 60.0], [1001.0, 10.0, 60.0]])
            .unwrap();
        assert_eq!(preds, vec![Some(QualityLabel::Low), Some(QualityLabel::High)]);
    }

    #[test]
    fn leaf_without_label_is_missing() {
        let json = r#"{"kind": "decision_tree", "nodes": [{"leaf": {}}]}"#;
        let model = ModelArtifact::from_json(json).unwrap().into_model();
        assert_eq!(model.predict(&[[0.0; 3]]).unwrap(), vec![None]);
    }

    #[test]
    fn malformed_trees_error_instead_of_looping() {
        let cycle = DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 0,
            }],
        };
        assert!(matches!(cycle.predict_row(&[0.0; 3]), Err(ModelError::Malformed(_))));

        let dangling = DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 1,
                threshold: 1.0,
                left: 7,
                right: 8,
            }],
        };
        assert!(dangling.predict_row(&[0.0; 3]).is_err());

        let wide = DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 9,
                threshold: 1.0,
                left: 0,
                right: 0,
            }],
        };
        assert!(matches!(wide.predict_row(&[0.0; 3]), Err(ModelError::FeatureWidth { .. })));
    }

    #[test]
    fn forest_majority_vote_with_ordered_ties() {
        let leaf = |label| DecisionTree {
            nodes: vec![TreeNode::Leaf { label }],
        };
        let forest = RandomForest {
            trees: vec![
                leaf(Some(QualityLabel::Low)),
                leaf(Some(QualityLabel::Medium)),
                leaf(Some(QualityLabel::Low)),
            ],
        };
        assert_eq!(forest.predict(&[[0.0; 3]]).unwrap(), vec![Some(QualityLabel::Low)]);

        let tied = RandomForest {
            trees: vec![leaf(Some(QualityLabel::Low)), leaf(Some(QualityLabel::Medium))],
        };
        assert_eq!(tied.predict(&[[0.0; 3]]).unwrap(), vec![Some(QualityLabel::Medium)]);

        let abstaining = RandomForest {
            trees: vec![leaf(None)],
        };
        assert_eq!(abstaining.predict(&[[0.0; 3]]).unwrap(), vec![None]);
        assert!(RandomForest { trees: vec![] }.predict(&[[0.0; 3]]).is_err());
    }

    #[test]
    fn load_model_is_tolerant() {
        assert!(load_model(None).is_none());
        assert!(load_model(Some(Path::new("/definitely/not/here/model.json"))).is_none());

        let path = std::env::temp_dir().join(format!("seo-quality-bad-model-{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert!(load_model(Some(&path)).is_none());
        std::fs::write(&path, TREE).unwrap();
        assert!(load_model(Some(&path)).is_some());
        let _ = std::fs::remove_file(&path);
    }
}
