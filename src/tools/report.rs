use crate::core::content_quality::{round_to, thousands, truncate_display};
use crate::core::types::{AnalysisReport, ScoredDocument, SimilarityOutcome};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub const EXPORT_MEDIA_TYPE: &str = "application/json";
const URL_DISPLAY_CHARS: usize = 80;

/// Flat JSON of one scored document, indented by two spaces.
pub fn export_json(document: &ScoredDocument) -> Result<String> {
    serde_json::to_string_pretty(document).context("failed to serialize analysis export")
}

pub fn write_export(document: &ScoredDocument, path: &Path) -> Result<()> {
    let json = export_json(document)?;
    std::fs::write(path, json).with_context(|| format!("failed to write export to {}", path.display()))?;
    info!("Analysis exported to {} ({})", path.display(), EXPORT_MEDIA_TYPE);
    Ok(())
}

/// Terminal rendering of a report.
pub fn render_text(report: &AnalysisReport) -> String {
    let doc = &report.document;
    let features = &doc.features;
    let mut out = String::new();

    let _ = writeln!(out, "Content Quality: {}", doc.quality_label);
    if let Some(url) = doc.url() {
        let _ = writeln!(out, "URL: {}", url);
    }
    if !doc.title().is_empty() {
        let _ = writeln!(out, "Title: {}", doc.title());
    }

    let _ = writeln!(out, "\nKey Metrics");
    let _ = writeln!(out, "  Flesch Reading Ease:    {}", report.reading.readability_score);
    let _ = writeln!(out, "  Avg. Sentence Length:   {} words", report.reading.avg_sentence_length);
    let _ = writeln!(out, "  Estimated Reading Time: {} min", report.reading.reading_time_minutes);
    let _ = writeln!(out, "  Readability Level:      {}", report.reading.readability_level);
    let _ = writeln!(out, "  Words: {}  Sentences: {}", thousands(features.word_count), thousands(features.sentence_count));
    if !features.top_keywords.is_empty() {
        let _ = writeln!(out, "  Top Keywords: {}", features.top_keywords.join(", "));
    }

    let _ = writeln!(out, "\nSimilar High-Quality Pages");
    match &report.similar {
        SimilarityOutcome::DatasetUnavailable => {
            let _ = writeln!(out, "  Reference dataset unavailable; comparison skipped.");
        }
        SimilarityOutcome::NoHighQualityPages => {
            let _ = writeln!(out, "  No high-quality pages found in dataset for comparison.");
        }
        SimilarityOutcome::NoSimilarPages => {
            let _ = writeln!(out, "  No highly similar high-quality pages found in the dataset.");
        }
        SimilarityOutcome::Matches(pages) => {
            for page in pages {
                let url = page.url.as_deref().unwrap_or("(no url)");
                let _ = writeln!(out, "  {}", truncate_display(url, URL_DISPLAY_CHARS));
                let _ = writeln!(
                    out,
                    "    Similarity: {}%  Readability: {}  Words: {}",
                    (page.similarity * 100.0) as i64,
                    round_to(page.flesch_reading_ease, 1),
                    thousands(page.word_count)
                );
            }
        }
    }

    out
}
