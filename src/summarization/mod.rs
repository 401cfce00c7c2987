/*!
 * Summarization engine.
 *
 * The engine owns the pretrained tokenizer and a generation backend. It is
 * built once per process (`SummarizationEngine::load`) and then shared
 * read-only by every request. Decoding is plain beam search with fixed
 * hyperparameters, so identical input and parameters give identical output.
 */

use async_trait::async_trait;
use log::{debug, info};
use std::fmt::Debug;

use crate::app_config::SummarizationConfig;
use crate::errors::SummarizationError;
use crate::providers::huggingface::{HuggingFace, InferenceRequest};
use crate::providers::Provider;

pub mod tokenizer;

pub use self::tokenizer::{InputTokenizer, PretrainedTokenizer, WhitespaceTokenizer};

/// Input tokens kept before the tail is dropped
pub const MAX_INPUT_TOKENS: usize = 1024;
/// Beam width used for every generation
pub const NUM_BEAMS: u32 = 4;
/// Length penalty used for every generation
pub const LENGTH_PENALTY: f32 = 2.0;
/// Stop a beam once it has produced end-of-sequence
pub const EARLY_STOPPING: bool = true;
/// Generated-token bounds in three-line mode
pub const THREE_LINE_BOUNDS: (u32, u32) = (30, 60);
/// Approximate tokens per English word
pub const TOKENS_PER_WORD: f64 = 1.33;
/// Extra tokens allowed above the requested budget
pub const LENGTH_HEADROOM: u32 = 40;
/// Smallest selectable summary length in words
pub const MIN_SUMMARY_WORDS: u32 = 30;
/// Largest selectable summary length in words
pub const MAX_SUMMARY_WORDS: u32 = 200;
/// Summary length offered by default
pub const DEFAULT_SUMMARY_WORDS: u32 = 60;

/// Special tokens of the BART vocabulary that must never reach the user
const CONTROL_TOKENS: [&str; 5] = ["<s>", "</s>", "<pad>", "<unk>", "<mask>"];

/// User-facing length controls for one summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizationParameters {
    /// Desired summary length in words
    pub word_count: u32,
    /// Fixed short bounds and a three-sentence cut
    pub three_line_mode: bool,
}

impl Default for SummarizationParameters {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_SUMMARY_WORDS,
            three_line_mode: false,
        }
    }
}

impl SummarizationParameters {
    /// `word_count` is clamped to `MIN_SUMMARY_WORDS..=MAX_SUMMARY_WORDS`
    pub fn new(word_count: u32, three_line_mode: bool) -> Self {
        Self {
            word_count: word_count.clamp(MIN_SUMMARY_WORDS, MAX_SUMMARY_WORDS),
            three_line_mode,
        }
    }

    /// Token budget derived from the word count: `round(words * 1.33)`
    pub fn token_length(&self) -> u32 {
        let words = self.word_count.clamp(MIN_SUMMARY_WORDS, MAX_SUMMARY_WORDS);
        (f64::from(words) * TOKENS_PER_WORD).round() as u32
    }

    /// `(min, max)` generated tokens
    pub fn generation_bounds(&self) -> (u32, u32) {
        if self.three_line_mode {
            THREE_LINE_BOUNDS
        } else {
            let budget = self.token_length();
            (budget, budget.saturating_add(LENGTH_HEADROOM))
        }
    }

    /// Full decoding request for a backend
    pub fn generation_params(&self) -> GenerationParams {
        let (min_length, max_length) = self.generation_bounds();
        GenerationParams {
            min_length,
            max_length,
            num_beams: NUM_BEAMS,
            length_penalty: LENGTH_PENALTY,
            early_stopping: EARLY_STOPPING,
            do_sample: false,
        }
    }
}

/// Decoding parameters handed to a generation backend
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub min_length: u32,
    pub max_length: u32,
    pub num_beams: u32,
    pub length_penalty: f32,
    pub early_stopping: bool,
    pub do_sample: bool,
}

/// Something that can run the pretrained model: text + decoding params -> text
#[async_trait]
pub trait SummarizationBackend: Send + Sync + Debug {
    async fn generate(&self, input: &str, params: &GenerationParams) -> Result<String, SummarizationError>;
}

#[async_trait]
impl SummarizationBackend for HuggingFace {
    async fn generate(&self, input: &str, params: &GenerationParams) -> Result<String, SummarizationError> {
        let response = self.complete(InferenceRequest::new(input, params)).await?;
        Ok(HuggingFace::extract_text(&response))
    }
}

/// Remove leaked control tokens and surrounding whitespace
pub fn strip_special_tokens(text: &str) -> String {
    let mut cleaned = text.to_string();
    for token in CONTROL_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    cleaned.trim().to_string()
}

/// Long-lived tokenizer + model pair
#[derive(Debug)]
pub struct SummarizationEngine {
    tokenizer: Box<dyn InputTokenizer>,
    backend: Box<dyn SummarizationBackend>,
    max_input_tokens: usize,
}

impl SummarizationEngine {
    /// Assemble an engine from explicit parts
    pub fn new(tokenizer: Box<dyn InputTokenizer>, backend: Box<dyn SummarizationBackend>) -> Self {
        Self {
            tokenizer,
            backend,
            max_input_tokens: MAX_INPUT_TOKENS,
        }
    }

    /// Override the input token limit
    pub fn with_max_input_tokens(mut self, max_input_tokens: usize) -> Self {
        self.max_input_tokens = max_input_tokens;
        self
    }

    /// Fetch the tokenizer and bind the inference backend for the configured model
    pub async fn load(config: &SummarizationConfig) -> Result<Self, SummarizationError> {
        info!("Loading summarization model {}", config.model);

        let token = (!config.api_key.is_empty()).then(|| config.api_key.clone());
        let tokenizer = match &config.tokenizer_path {
            Some(path) => PretrainedTokenizer::from_file(path)?,
            None => PretrainedTokenizer::from_pretrained(&config.model, token).await?,
        };

        let backend = HuggingFace::new(
            &config.endpoint,
            &config.model,
            &config.api_key,
            config.timeout_secs,
        );

        Ok(Self::new(Box::new(tokenizer), Box::new(backend))
            .with_max_input_tokens(config.max_input_tokens))
    }

    /// Input token limit in effect
    pub fn max_input_tokens(&self) -> usize {
        self.max_input_tokens
    }

    /// Generate a working-language summary of `text`
    pub async fn summarize(
        &self,
        text: &str,
        params: &SummarizationParameters,
    ) -> Result<String, SummarizationError> {
        let token_count = self.tokenizer.count_tokens(text)?;
        let input = if token_count > self.max_input_tokens {
            debug!(
                "Input truncated from {} to {} tokens",
                token_count, self.max_input_tokens
            );
            self.tokenizer.truncate(text, self.max_input_tokens)?
        } else {
            text.to_string()
        };

        let generation = params.generation_params();
        debug!(
            "Generating summary: min_length={}, max_length={}, beams={}",
            generation.min_length, generation.max_length, generation.num_beams
        );

        let raw = self.backend.generate(&input, &generation).await?;
        Ok(strip_special_tokens(&raw))
    }
}
