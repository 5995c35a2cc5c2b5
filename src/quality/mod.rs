pub mod classifier;
pub mod model;
pub mod rules;

pub use classifier::QualityClassifier;
pub use model::{load_model, ModelArtifact, QualityModel};
pub use rules::rule_based_label;
