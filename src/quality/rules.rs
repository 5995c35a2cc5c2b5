use crate::core::types::QualityLabel;

pub const HIGH_MIN_WORDS: usize = 1500;
pub const LOW_MAX_WORDS: usize = 500;
pub const HIGH_READABILITY: std::ops::RangeInclusive<f64> = 50.0..=70.0;
pub const LOW_READABILITY: f64 = 30.0;

/// Threshold label from word count and Flesch Reading Ease. High is checked
/// before Low; anything else is Medium.
pub fn rule_based_label(word_count: usize, flesch_reading_ease: f64) -> QualityLabel {
    if word_count > HIGH_MIN_WORDS && HIGH_READABILITY.contains(&flesch_reading_ease) {
        return QualityLabel::High;
    }
    if word_count < LOW_MAX_WORDS || flesch_reading_ease < LOW_READABILITY {
        return QualityLabel::Low;
    }
    QualityLabel::Medium
}
