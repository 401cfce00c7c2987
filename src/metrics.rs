/*!
 * Summary statistics and readability scores.
 *
 * Word counts are whitespace-delimited tokens. Readability is scored on
 * English text with the classic formulas:
 * - Flesch Reading Ease: `206.835 - 1.015 * (W / S) - 84.6 * (Y / W)`
 * - Flesch-Kincaid Grade: `0.39 * (W / S) + 11.8 * (Y / W) - 15.59`
 * - Gunning Fog: `0.4 * ((W / S) + 100 * (C / W))`
 *
 * where W is words, S sentences, Y syllables and C words of three or more syllables.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Runs of vowels; each run is one syllable
static VOWEL_GROUPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]+").unwrap());

/// Sentence breaks for readability scoring
static SENTENCE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Words of at least this many syllables are complex
const COMPLEX_WORD_SYLLABLES: usize = 3;

/// Number of whitespace-delimited tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length comparison between an input and its summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub original_words: usize,
    pub summary_words: usize,
    /// Percentage of words removed, one decimal place
    pub compression_pct: f64,
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Original Words: {} | Summary Words: {} | Compression: {:.1}%",
            self.original_words, self.summary_words, self.compression_pct
        )
    }
}

/// Word counts and compression; an empty original yields zero compression
pub fn compute_stats(original: &str, summary: &str) -> SummaryStats {
    let original_words = word_count(original);
    let summary_words = word_count(summary);

    let compression_pct = if original_words > 0 {
        round_to(100.0 * (1.0 - summary_words as f64 / original_words as f64), 1)
    } else {
        0.0
    };

    SummaryStats {
        original_words,
        summary_words,
        compression_pct,
    }
}

/// Readability scores of an English text, two decimal places each
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ReadabilityReport {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
}

impl fmt::Display for ReadabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Flesch Reading Ease: {:.2}", self.flesch_reading_ease)?;
        writeln!(f, "Flesch-Kincaid Grade: {:.2}", self.flesch_kincaid_grade)?;
        write!(f, "Gunning Fog Index: {:.2}", self.gunning_fog)
    }
}

pub fn compute_readability(text: &str) -> ReadabilityReport {
    let words: Vec<String> = text
        .split_whitespace()
        .map(strip_punctuation)
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        return ReadabilityReport::default();
    }

    let word_total = words.len() as f64;
    let sentence_total = sentence_count(text) as f64;
    let syllables: Vec<usize> = words.iter().map(|word| syllable_count(word)).collect();
    let syllable_total = syllables.iter().sum::<usize>() as f64;
    let complex_total = syllables
        .iter()
        .filter(|&&count| count >= COMPLEX_WORD_SYLLABLES)
        .count() as f64;

    let words_per_sentence = word_total / sentence_total;
    let syllables_per_word = syllable_total / word_total;

    ReadabilityReport {
        flesch_reading_ease: round_to(206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word, 2),
        flesch_kincaid_grade: round_to(0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59, 2),
        gunning_fog: round_to(0.4 * (words_per_sentence + 100.0 * (complex_total / word_total)), 2),
    }
}

/// Sentences containing at least one alphanumeric character, never less than one
pub fn sentence_count(text: &str) -> usize {
    SENTENCE_BREAKS
        .split(text)
        .filter(|sentence| sentence.chars().any(char::is_alphanumeric))
        .count()
        .max(1)
}

/// Vowel-group syllable estimate with silent `-e` handling; at least one per word
pub fn syllable_count(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = VOWEL_GROUPS.find_iter(&word).count();

    // "make" has one vowel sound, "table" keeps its "-le" syllable
    if count > 1 && word.ends_with('e') && !word.ends_with("le") && !word.ends_with("ee") {
        count -= 1;
    }

    count.max(1)
}

fn strip_punctuation(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
