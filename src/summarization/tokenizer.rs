//! Input tokenization for the summarization model.
//!
//! Only one thing is needed from the tokenizer on this side of the model
//! boundary: cutting the input to the model's context length the same way the
//! model's own tokenizer would, dropping the tail.

use hf_hub::api::tokio::ApiBuilder;
use log::{debug, info};
use std::fmt::Debug;
use std::path::Path;
use tokenizers::{Tokenizer, TruncationDirection};

use crate::errors::SummarizationError;

/// Tokenizer seam used by the engine
pub trait InputTokenizer: Send + Sync + Debug {
    /// Number of tokens `text` encodes to, special tokens included
    fn count_tokens(&self, text: &str) -> Result<usize, SummarizationError>;

    /// Keep at most `max_tokens` tokens of `text`; text that fits is returned unchanged
    fn truncate(&self, text: &str, max_tokens: usize) -> Result<String, SummarizationError>;
}

/// The model's published `tokenizer.json`
#[derive(Debug)]
pub struct PretrainedTokenizer {
    tokenizer: Tokenizer,
}

impl PretrainedTokenizer {
    /// Load a tokenizer from a local `tokenizer.json`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SummarizationError> {
        let path = path.as_ref();
        info!("Loading tokenizer from: {:?}", path);
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            SummarizationError::ModelLoading(format!("Failed to load tokenizer {:?}: {}", path, e))
        })?;
        Ok(Self { tokenizer })
    }

    /// Download (or reuse the hub cache of) the model repository's `tokenizer.json`
    pub async fn from_pretrained(model: &str, token: Option<String>) -> Result<Self, SummarizationError> {
        let api = ApiBuilder::new()
            .with_token(token)
            .with_progress(false)
            .build()
            .map_err(|e| SummarizationError::ModelLoading(format!("Failed to initialise model hub client: {}", e)))?;

        let path = api
            .model(model.to_string())
            .get("tokenizer.json")
            .await
            .map_err(|e| SummarizationError::ModelLoading(format!("Failed to download tokenizer for {}: {}", model, e)))?;

        Self::from_file(path)
    }
}

impl InputTokenizer for PretrainedTokenizer {
    fn count_tokens(&self, text: &str) -> Result<usize, SummarizationError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| SummarizationError::Tokenizer(format!("Failed to encode text: {}", e)))?;
        Ok(encoding.len())
    }

    fn truncate(&self, text: &str, max_tokens: usize) -> Result<String, SummarizationError> {
        let mut encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| SummarizationError::Tokenizer(format!("Failed to encode text: {}", e)))?;

        if encoding.len() <= max_tokens {
            return Ok(text.to_string());
        }

        debug!("Truncating input from {} to {} tokens", encoding.len(), max_tokens);
        encoding.truncate(max_tokens, 0, TruncationDirection::Right);
        self.tokenizer
            .decode(encoding.get_ids(), true)
            .map_err(|e| SummarizationError::Tokenizer(format!("Failed to decode truncated input: {}", e)))
    }
}

/// Whitespace-delimited tokens; for offline runs and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl InputTokenizer for WhitespaceTokenizer {
    fn count_tokens(&self, text: &str) -> Result<usize, SummarizationError> {
        Ok(text.split_whitespace().count())
    }

    fn truncate(&self, text: &str, max_tokens: usize) -> Result<String, SummarizationError> {
        if text.split_whitespace().count() <= max_tokens {
            return Ok(text.to_string());
        }
        Ok(text
            .split_whitespace()
            .take(max_tokens)
            .collect::<Vec<_>>()
            .join(" "))
    }
}
