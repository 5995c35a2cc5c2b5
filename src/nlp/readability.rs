//! Flesch Reading Ease scorers.
//!
//! Two implementations sit behind [`ReadabilityScorer`]: the canonical
//! syllable-based formula (cargo feature `syllables`) and a sentence-length
//! heuristic that holds the syllable term fixed. The scorer is chosen once at
//! startup by [`select_scorer`].

use crate::core::config::ReadabilityPreference;
use std::sync::Arc;
use tracing::info;

/// Syllable contribution held fixed by the heuristic (`84.6 * 1.5`).
pub const FIXED_SYLLABLE_TERM: f64 = 126.9;

pub trait ReadabilityScorer: Send + Sync {
    fn name(&self) -> &'static str;
    fn flesch_reading_ease(&self, text: &str) -> f64;
}

/// Whitespace-token count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count of `.`, `!` and `?` characters, never below 1.
pub fn count_sentences(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count()
        .max(1)
}

/// Sentence-length estimate of Flesch Reading Ease, clamped to 0..=100.
/// Not the textbook formula: the syllable term is the constant 126.9.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicFlesch;

impl ReadabilityScorer for HeuristicFlesch {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn flesch_reading_ease(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let sentences = count_sentences(text) as f64;
        let words = count_words(text).max(1) as f64;
        let asl = words / sentences;
        (206.835 - 1.015 * asl - FIXED_SYLLABLE_TERM).clamp(0.0, 100.0)
    }
}

/// Canonical Flesch Reading Ease with an estimated syllable count, rounded to
/// two decimals. Unbounded: very dense text goes negative.
#[cfg(feature = "syllables")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SyllableFlesch;

#[cfg(feature = "syllables")]
impl ReadabilityScorer for SyllableFlesch {
    fn name(&self) -> &'static str {
        "syllables"
    }

    fn flesch_reading_ease(&self, text: &str) -> f64 {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return 0.0;
        }

        let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
        let word_count = words.len() as f64;
        let sentences = count_sentences(text) as f64;
        let score = 206.835
            - 1.015 * (word_count / sentences)
            - 84.6 * (syllables as f64 / word_count);
        (score * 100.0).round() / 100.0
    }
}

/// Vowel-group syllable estimate with a silent trailing `e`. At least 1.
#[cfg(feature = "syllables")]
pub fn count_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let chars: Vec<char> = lower.chars().filter(|c| c.is_alphabetic()).collect();
    if chars.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups: usize = 0;
    let mut prev_vowel = false;
    for &c in &chars {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    // "make", "code": drop the silent e, but keep "-le" endings like "table".
    let n = chars.len();
    if n > 2 && chars[n - 1] == 'e' && !is_vowel(chars[n - 2]) && !(chars[n - 2] == 'l' && !is_vowel(chars[n - 3])) {
        groups = groups.saturating_sub(1);
    }

    groups.max(1)
}

/// Install the readability scorer for the process.
pub fn select_scorer(preference: ReadabilityPreference) -> Arc<dyn ReadabilityScorer> {
    let scorer: Arc<dyn ReadabilityScorer> = match preference {
        ReadabilityPreference::Heuristic => Arc::new(HeuristicFlesch),
        ReadabilityPreference::Auto | ReadabilityPreference::Precise => precise_or_heuristic(preference),
    };
    info!("Readability scorer: {}", scorer.name());
    scorer
}

#[cfg(feature = "syllables")]
fn precise_or_heuristic(_preference: ReadabilityPreference) -> Arc<dyn ReadabilityScorer> {
    Arc::new(SyllableFlesch)
}

#[cfg(not(feature = "syllables"))]
fn precise_or_heuristic(preference: ReadabilityPreference) -> Arc<dyn ReadabilityScorer> {
    if preference == ReadabilityPreference::Precise {
        tracing::warn!("precise readability requested but the `syllables` feature is disabled; using heuristic");
    }
    Arc::new(HeuristicFlesch)
}
