use thiserror::Error;

/// Failures that terminate a single analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("URL is empty")]
    EmptyUrl,

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failures while loading or evaluating a quality model. Never fatal: the
/// classifier degrades to rule labels.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed model: {0}")]
    Malformed(String),

    #[error("model expects {expected} features, got {got}")]
    FeatureWidth { expected: usize, got: usize },
}
