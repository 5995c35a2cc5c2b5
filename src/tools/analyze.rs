use crate::core::content_quality::reading_metrics;
use crate::core::error::AnalysisError;
use crate::core::types::{AnalysisReport, PageText, QualityLabel, ScoredDocument, SimilarPage, SimilarityOutcome};
use crate::nlp::{find_similar, FeatureTable};
use crate::scraping::{extract_title_and_body, load_dataset, parse_rows, validate_url};
use crate::AppState;
use chrono::Utc;
use tracing::{info, warn};

/// Analyze one URL: validate, fetch once, extract, score, and compare against
/// the reference dataset. Only validation and fetch failures are errors.
pub async fn analyze_url(state: &AppState, url: &str) -> Result<AnalysisReport, AnalysisError> {
    let url = validate_url(url)?;
    let html = state.fetcher.fetch(&url).await?;
    let (title, body_text) = extract_title_and_body(&html);
    info!(
        "Extracted {} ({} chars of body text)",
        url,
        body_text.len()
    );

    let reference = load_reference_pages(state);
    Ok(analyze_page(state, PageText::new(Some(url), title, body_text), reference))
}

/// Read and parse the reference dataset. Missing or unreadable datasets are
/// `None`: comparison is skipped, the analysis continues.
pub fn load_reference_pages(state: &AppState) -> Option<Vec<PageText>> {
    let path = state.dataset_path.as_deref()?;
    match load_dataset(path) {
        Ok(Some(rows)) => Some(parse_rows(&rows)),
        Ok(None) => None,
        Err(e) => {
            warn!("Reference dataset unusable: {:#}", e);
            None
        }
    }
}

/// Score an already extracted page and compare it with `reference` pages.
pub fn analyze_page(state: &AppState, page: PageText, reference: Option<Vec<PageText>>) -> AnalysisReport {
    let document = score_query(state, page);
    let similar = match reference {
        Some(pages) => compare_with_reference(state, &document, pages),
        None => SimilarityOutcome::DatasetUnavailable,
    };

    AnalysisReport {
        reading: reading_metrics(&document),
        document,
        similar,
        analyzed_at: Utc::now().to_rfc3339(),
    }
}

/// The query is scored inside its own single-document vector space.
fn score_query(state: &AppState, page: PageText) -> ScoredDocument {
    let document = state.classifier.score_one(state.features.fit_one(page));
    info!(
        "Query scored {} (rule: {}, model: {})",
        document.quality_label,
        document.quality_label_rule,
        document
            .quality_label_model
            .map(|l| l.as_str())
            .unwrap_or("none")
    );
    document
}

/// Fit the dataset's own space, label it, then project the query text into
/// that space so both sides share coordinates.
fn compare_with_reference(state: &AppState, query: &ScoredDocument, pages: Vec<PageText>) -> SimilarityOutcome {
    let FeatureTable {
        documents,
        space,
        vectors,
    } = state.features.fit(pages);
    let reference = state.classifier.score(documents);

    let high_count = reference
        .iter()
        .filter(|d| d.quality_label == QualityLabel::High)
        .count();
    info!(
        "Reference dataset: {} documents, {} labelled High",
        reference.len(),
        high_count
    );
    if high_count == 0 {
        return SimilarityOutcome::NoHighQualityPages;
    }

    let query_vector = space.transform(query.body_text());
    let matches: Vec<SimilarPage> = find_similar(&query_vector, &reference, &vectors, QualityLabel::High, state.top_k)
        .into_iter()
        .filter(|(_, score)| *score > state.min_similarity)
        .map(|(doc, score)| SimilarPage {
            url: doc.url().map(str::to_string),
            title: doc.title().to_string(),
            similarity: score,
            word_count: doc.features.word_count,
            flesch_reading_ease: doc.features.flesch_reading_ease,
        })
        .collect();

    if matches.is_empty() {
        SimilarityOutcome::NoSimilarPages
    } else {
        SimilarityOutcome::Matches(matches)
    }
}
