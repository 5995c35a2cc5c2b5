use crate::core::config::AnalyzerConfig;
use crate::nlp::{select_scorer, FeatureBuilder};
use crate::quality::{load_model, QualityClassifier, QualityModel};
use crate::scraping::fetch::{HttpFetcher, PageFetcher};
use std::path::PathBuf;
use std::sync::Arc;

/// Per-run dependencies, passed explicitly to every analysis step.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub features: FeatureBuilder,
    pub classifier: QualityClassifier,
    /// Reference dataset, re-read on every request. `None` disables comparison.
    pub dataset_path: Option<PathBuf>,
    pub top_k: usize,
    pub min_similarity: f64,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("model_enabled", &self.classifier.has_model())
            .field("readability", &self.features.scorer_name())
            .field("dataset_path", &self.dataset_path)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl AppState {
    /// Build from resolved config: HTTP fetcher, readability scorer and model.
    pub fn from_config(config: AnalyzerConfig) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(config.resolve_http_timeout_secs(), config.resolve_user_agent())?;
        let model = load_model(Some(config.resolve_model_path().as_path()));
        let dataset_path = config.resolve_dataset_path();
        Ok(Self::new(Arc::new(fetcher), &config)
            .with_model(model)
            .with_dataset(Some(dataset_path)))
    }

    /// Rule-only state with no dataset; tests and embedders layer on top.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &AnalyzerConfig) -> Self {
        let scorer = select_scorer(config.resolve_readability());
        Self {
            fetcher,
            features: FeatureBuilder::new(scorer),
            classifier: QualityClassifier::rule_only(),
            dataset_path: None,
            top_k: config.resolve_top_k(),
            min_similarity: config.resolve_min_similarity(),
        }
    }

    pub fn with_model(mut self, model: Option<Arc<dyn QualityModel>>) -> Self {
        self.classifier = QualityClassifier::new(model);
        self
    }

    pub fn with_dataset(mut self, dataset_path: Option<PathBuf>) -> Self {
        self.dataset_path = dataset_path;
        self
    }

    pub fn with_features(mut self, features: FeatureBuilder) -> Self {
        self.features = features;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}
