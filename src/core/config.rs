use std::path::PathBuf;

// ---------------------------------------------------------------------------
// AnalyzerConfig: file-based config loader (seo-quality.json) with env-var fallback
// ---------------------------------------------------------------------------

pub const CONFIG_FILE_NAME: &str = "seo-quality.json";
pub const ENV_CONFIG_PATH: &str = "SEO_QUALITY_CONFIG";
pub const ENV_MODEL_PATH: &str = "SEO_QUALITY_MODEL_PATH";
pub const ENV_DATASET_PATH: &str = "SEO_QUALITY_DATASET";
pub const ENV_HTTP_TIMEOUT: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "SEO_QUALITY_USER_AGENT";
pub const ENV_READABILITY: &str = "SEO_QUALITY_READABILITY";

pub const DEFAULT_MODEL_PATH: &str = "models/quality_model.json";
pub const DEFAULT_DATASET_PATH: &str = "data/data.csv";
pub const DEFAULT_EXPORT_PATH: &str = "seo_quality_analysis.json";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SEO-Detector/1.0)";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.9;

/// Which readability scorer to install at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReadabilityPreference {
    #[default]
    Auto,
    Precise,
    Heuristic,
}

impl ReadabilityPreference {
    pub fn parse_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(ReadabilityPreference::Auto),
            "precise" | "syllables" => Some(ReadabilityPreference::Precise),
            "heuristic" | "fallback" => Some(ReadabilityPreference::Heuristic),
            _ => None,
        }
    }
}

/// Top-level config loaded from `seo-quality.json`. Every field is optional;
/// the `resolve_*` accessors apply JSON field → env var → default.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct AnalyzerConfig {
    /// Path to the JSON model artifact. A missing file means "no model".
    pub model_path: Option<PathBuf>,
    /// Path to the reference dataset CSV.
    pub dataset_path: Option<PathBuf>,
    /// Timeout for the single page fetch. Default: 8.
    pub http_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    /// Number of similar pages surfaced. Default: 3.
    pub top_k: Option<usize>,
    /// Matches must score strictly above this to be surfaced. Default: 0.0.
    pub min_similarity: Option<f64>,
    /// Pair similarity at or above which two dataset rows count as duplicates.
    pub duplicate_threshold: Option<f64>,
    /// `auto`, `precise` or `heuristic`.
    pub readability: Option<String>,
    pub export_path: Option<PathBuf>,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AnalyzerConfig {
    /// Model path: JSON field → `SEO_QUALITY_MODEL_PATH` → `models/quality_model.json`.
    pub fn resolve_model_path(&self) -> PathBuf {
        if let Some(p) = &self.model_path {
            return p.clone();
        }
        env_non_empty(ENV_MODEL_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
    }

    /// Dataset path: JSON field → `SEO_QUALITY_DATASET` → `data/data.csv`.
    pub fn resolve_dataset_path(&self) -> PathBuf {
        if let Some(p) = &self.dataset_path {
            return p.clone();
        }
        env_non_empty(ENV_DATASET_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH))
    }

    /// Fetch timeout: JSON field → `HTTP_TIMEOUT_SECS` → 8.
    pub fn resolve_http_timeout_secs(&self) -> u64 {
        if let Some(n) = self.http_timeout_secs {
            return n;
        }
        env_non_empty(ENV_HTTP_TIMEOUT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }

    pub fn resolve_user_agent(&self) -> String {
        if let Some(ua) = &self.user_agent {
            if !ua.trim().is_empty() {
                return ua.clone();
            }
        }
        env_non_empty(ENV_USER_AGENT).unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }

    pub fn resolve_top_k(&self) -> usize {
        self.top_k.unwrap_or(DEFAULT_TOP_K)
    }

    pub fn resolve_min_similarity(&self) -> f64 {
        self.min_similarity.unwrap_or(0.0)
    }

    pub fn resolve_duplicate_threshold(&self) -> f64 {
        self.duplicate_threshold.unwrap_or(DEFAULT_DUPLICATE_THRESHOLD)
    }

    /// Readability scorer: JSON field → `SEO_QUALITY_READABILITY` → `auto`.
    /// Unknown values fall back to `auto`.
    pub fn resolve_readability(&self) -> ReadabilityPreference {
        self.readability
            .clone()
            .or_else(|| env_non_empty(ENV_READABILITY))
            .and_then(|v| ReadabilityPreference::parse_str(&v))
            .unwrap_or_default()
    }

    pub fn resolve_export_path(&self) -> PathBuf {
        self.export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH))
    }
}

/// Load `seo-quality.json` from standard locations.
///
/// Search order (first found wins):
/// 1. `SEO_QUALITY_CONFIG` env var path
/// 2. `./seo-quality.json`
/// 3. `~/.seo-quality/seo-quality.json`
///
/// Missing file → `AnalyzerConfig::default()` (silent, env-var fallbacks apply).
/// Parse error → log a warning, return `AnalyzerConfig::default()`.
pub fn load_config() -> AnalyzerConfig {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".seo-quality").join(CONFIG_FILE_NAME));
    }
    if let Some(env_path) = env_non_empty(ENV_CONFIG_PATH) {
        candidates.insert(0, PathBuf::from(env_path));
    }

    for path in &candidates {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };
        return match serde_json::from_str::<AnalyzerConfig>(&contents) {
            Ok(cfg) => {
                tracing::info!("{} loaded from {}", CONFIG_FILE_NAME, path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    "{} parse error at {}: {}; using defaults",
                    CONFIG_FILE_NAME,
                    path.display(),
                    e
                );
                AnalyzerConfig::default()
            }
        };
    }

    AnalyzerConfig::default()
}
