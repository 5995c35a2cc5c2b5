use crate::core::types::DuplicatePair;
use crate::nlp::find_duplicates;
use crate::scraping::{load_dataset, parse_rows};
use crate::AppState;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Near-duplicate pairs inside the dataset at `path`. `Ok(None)` when the
/// dataset file does not exist.
pub fn scan_dataset(state: &AppState, path: &Path, threshold: f64) -> Result<Option<Vec<DuplicatePair>>> {
    let Some(rows) = load_dataset(path)? else {
        info!("No dataset at {}; duplicate scan skipped", path.display());
        return Ok(None);
    };

    let pages = parse_rows(&rows);
    let urls: Vec<Option<String>> = pages.iter().map(|p| p.url.clone()).collect();
    let table = state.features.fit(pages);
    Ok(Some(find_duplicates(&table.vectors, &urls, threshold)))
}
