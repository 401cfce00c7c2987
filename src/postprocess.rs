/*!
 * Summary post-processing: sentence cut and keyword emphasis.
 *
 * The sentence splitter is deliberately naive. It breaks after `.`, `!` or `?`
 * followed by spaces, knows nothing about abbreviations, and a trailing run of
 * spaces produces a final empty segment.
 */

use log::warn;
use regex::RegexBuilder;

/// Sentence-ending punctuation
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split after sentence punctuation followed by one or more ASCII spaces.
/// The run of spaces is consumed; text with no break is a single segment.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !TERMINATORS.contains(&c) || chars.peek().map(|&(_, next)| next) != Some(' ') {
            continue;
        }

        let end = index + c.len_utf8();
        segments.push(&text[start..end]);

        start = end;
        while let Some(&(space_index, ' ')) = chars.peek() {
            start = space_index + 1;
            chars.next();
        }
    }

    segments.push(&text[start..]);
    segments
}

/// Keep the first `n` sentences, joined with a single space
pub fn truncate_to_sentences(text: &str, n: usize) -> String {
    split_sentences(text)
        .into_iter()
        .take(n)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap every case-insensitive occurrence of each keyword in `**`.
///
/// Keywords are applied in order to the evolving text, so overlapping
/// keywords can nest markers. Empty keywords are skipped.
pub fn emphasize<S: AsRef<str>>(text: &str, keywords: &[S]) -> String {
    let mut result = text.to_string();

    for keyword in keywords.iter().map(AsRef::as_ref) {
        if keyword.is_empty() {
            continue;
        }

        match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => result = pattern.replace_all(&result, "**${0}**").into_owned(),
            Err(e) => warn!("Skipping keyword {:?}: {}", keyword, e),
        }
    }

    result
}

/// Comma-separated keyword list. Entries are trimmed; empty entries are kept.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|keyword| keyword.trim().to_string()).collect()
}
