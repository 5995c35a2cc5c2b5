pub mod core;
pub mod nlp;
pub mod quality;
pub mod scraping;
pub mod tools;

// --- Primary core exports ---
pub use core::config;
pub use core::content_quality;
pub use core::types;
pub use core::types::*;
pub use core::{AnalysisError, AppState, ModelError};

pub use tools::{analyze, duplicates, report};
