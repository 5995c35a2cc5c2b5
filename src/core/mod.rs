pub mod app_state;
pub mod config;
pub mod content_quality;
pub mod error;
pub mod types;

pub use app_state::AppState;
pub use error::{AnalysisError, ModelError};
