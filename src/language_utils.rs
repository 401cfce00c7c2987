/*!
 * Language utilities for the supported input languages.
 *
 * The fixed set of input languages the summarizer accepts, plus ISO 639
 * helpers for matching codes that may carry a region subtag (e.g. `zh-cn`).
 */

use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// Language the summarization model works in
pub const PIVOT_LANGUAGE: &str = "en";

/// Input languages offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SourceLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "zh-cn")]
    ChineseSimplified,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "ar")]
    Arabic,
}

impl SourceLanguage {
    /// Every supported language, in menu order
    pub const ALL: [SourceLanguage; 8] = [
        Self::English,
        Self::Hindi,
        Self::French,
        Self::Spanish,
        Self::German,
        Self::ChineseSimplified,
        Self::Tamil,
        Self::Arabic,
    ];

    // @returns: Code sent to the translation service
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::French => "fr",
            Self::Spanish => "es",
            Self::German => "de",
            Self::ChineseSimplified => "zh-cn",
            Self::Tamil => "ta",
            Self::Arabic => "ar",
        }
    }

    // @returns: Label shown to the user
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::French => "French",
            Self::Spanish => "Spanish",
            Self::German => "German",
            Self::ChineseSimplified => "Chinese (Simplified)",
            Self::Tamil => "Tamil",
            Self::Arabic => "Arabic",
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for SourceLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        SourceLanguage::ALL
            .iter()
            .copied()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(wanted)
                    || lang.display_name().eq_ignore_ascii_case(wanted)
            })
            .or_else(|| {
                // Accept bare or 3-letter codes as long as they name a supported language
                SourceLanguage::ALL
                    .iter()
                    .copied()
                    .find(|lang| language_codes_match(lang.code(), wanted))
            })
            .ok_or_else(|| anyhow!("Unsupported input language: {}", s))
    }
}

/// Strip a region subtag (`zh-cn` -> `zh`, `pt_BR` -> `pt`) and lowercase
fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn lookup(code: &str) -> Option<Language> {
    let primary = primary_subtag(code);
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (lookup(code1), lookup(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup(code).ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}
