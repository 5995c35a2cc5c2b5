use crate::core::types::{ReadingMetrics, ScoredDocument};

/// Average adult reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: f64 = 200.0;

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Coarse reading-difficulty band for a Flesch Reading Ease score.
pub fn readability_level(flesch_reading_ease: f64) -> &'static str {
    if flesch_reading_ease > 80.0 {
        "Very Easy"
    } else if flesch_reading_ease > 60.0 {
        "Easy"
    } else if flesch_reading_ease > 40.0 {
        "Moderate"
    } else {
        "Difficult"
    }
}

/// The band is taken from the whole-number score, so 60.4 reads as 60.
pub fn reading_metrics(doc: &ScoredDocument) -> ReadingMetrics {
    let features = &doc.features;
    let sentences = features.sentence_count.max(1) as f64;
    let readability_score = features.flesch_reading_ease.round_ties_even();
    ReadingMetrics {
        readability_score,
        avg_sentence_length: round_to(features.word_count as f64 / sentences, 2),
        reading_time_minutes: round_to(features.word_count as f64 / WORDS_PER_MINUTE, 2),
        readability_level: readability_level(readability_score).to_string(),
    }
}

/// `12345` → `"12,345"`.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate to `max_chars` characters, appending `...` when shortened.
pub fn truncate_display(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}
