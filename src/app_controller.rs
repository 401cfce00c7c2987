use anyhow::anyhow;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::AppError;
use crate::language_utils::{SourceLanguage, PIVOT_LANGUAGE};
use crate::metrics::{compute_readability, compute_stats, ReadabilityReport, SummaryStats};
use crate::postprocess::{emphasize, truncate_to_sentences};
use crate::summarization::{SummarizationEngine, SummarizationParameters};
use crate::translation::Translator;

// @module: Application controller for the summarization pipeline

/// Sentences kept in three-line mode
pub const THREE_LINE_SENTENCES: usize = 3;

/// Message shown while a request is in flight
pub const PROGRESS_MESSAGE: &str = "Translating & Summarizing...";

/// Requested style of the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Default,
    Formal,
    Informal,
    Academic,
    Concise,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Default,
        Tone::Formal,
        Tone::Informal,
        Tone::Academic,
        Tone::Concise,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tone::Default => "Default",
            Tone::Formal => "Formal",
            Tone::Informal => "Informal",
            Tone::Academic => "Academic",
            Tone::Concise => "Concise",
        }
    }

    /// Prefix prepended to the model input; empty for the default tone
    pub fn instruction(&self) -> String {
        match self {
            Tone::Default => String::new(),
            tone => format!("Summarize in a {} tone: ", tone.name().to_lowercase()),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Tone {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Unknown tone: {}", s))
    }
}

/// One summarization request as submitted by the user
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    // @field: Raw input text, untrimmed
    pub text: String,
    // @field: Declared language of the input and of the summary
    pub language: SourceLanguage,
    pub tone: Tone,
    // @field: Keywords to emphasize; empty entries are ignored
    pub keywords: Vec<String>,
    pub parameters: SummarizationParameters,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>, language: SourceLanguage) -> Self {
        Self {
            text: text.into(),
            language,
            tone: Tone::default(),
            keywords: Vec::new(),
            parameters: SummarizationParameters::default(),
        }
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn parameters(mut self, parameters: SummarizationParameters) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Everything produced for one request
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Summary in the input language, keyword markup included
    pub summary: String,
    /// Summary in the pivot language before back-translation
    pub english_summary: String,
    pub stats: SummaryStats,
    /// Scores of the input's English translation
    pub readability: ReadabilityReport,
}

impl SummaryReport {
    /// Statistics block shown under the summary
    pub fn render_stats(&self) -> String {
        format!(
            "{}\n\nReadability Analysis (English Equivalent)\n{}",
            self.stats, self.readability
        )
    }
}

/// Main application controller for text summarization
pub struct Controller {
    // @field: Translation collaborator
    translator: Arc<dyn Translator>,
    // @field: Long-lived model, shared read-only
    engine: Arc<SummarizationEngine>,
}

impl Controller {
    pub fn new(translator: Arc<dyn Translator>, engine: Arc<SummarizationEngine>) -> Self {
        Self { translator, engine }
    }

    /// Run the full pipeline for one request.
    ///
    /// Steps are strictly sequential and every failure aborts the request.
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryReport, AppError> {
        if request.text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let language = request.language.code();
        info!(
            "Summarizing {} words ({}, tone {}, length {}, three-line {})",
            request.text.split_whitespace().count(),
            language,
            request.tone,
            request.parameters.word_count,
            request.parameters.three_line_mode
        );

        let pivot = self
            .translator
            .translate(request.text.trim(), language, PIVOT_LANGUAGE)
            .await?;
        let model_input = format!("{}{}", request.tone.instruction(), pivot.replace('\n', " "));
        debug!("Model input is {} chars", model_input.len());

        let mut english_summary = self.engine.summarize(&model_input, &request.parameters).await?;

        if request.parameters.three_line_mode {
            english_summary = truncate_to_sentences(&english_summary, THREE_LINE_SENTENCES);
        }

        if !request.keywords.is_empty() {
            english_summary = emphasize(&english_summary, &request.keywords);
        }

        let summary = self
            .translator
            .translate(&english_summary, PIVOT_LANGUAGE, language)
            .await?;

        let stats = compute_stats(&request.text, &summary);

        // Readability is scored on a fresh English translation of the untrimmed input
        let english_input = self
            .translator
            .translate(&request.text, language, PIVOT_LANGUAGE)
            .await?;
        let readability = compute_readability(&english_input);

        info!(
            "Summary ready: {} -> {} words ({:.1}% compression)",
            stats.original_words, stats.summary_words, stats.compression_pct
        );

        Ok(SummaryReport {
            summary,
            english_summary,
            stats,
            readability,
        })
    }

    /// `summarize` behind a terminal spinner
    pub async fn run(&self, request: &SummaryRequest) -> Result<SummaryReport, AppError> {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .or_else(|_| ProgressStyle::default_spinner().template("{spinner} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(PROGRESS_MESSAGE);
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.summarize(request).await;

        spinner.finish_and_clear();
        result
    }
}
