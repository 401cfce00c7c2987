/*!
 * Error types for the multisumm application.
 *
 * This module contains custom error types for the different stages of the
 * summarization pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with remote provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while turning an uploaded document into text
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Plain text upload was not valid UTF-8
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The PDF could not be parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The word-processor document could not be parsed
    #[error("DOCX error: {0}")]
    Docx(String),

    /// The declared media type has no extractor
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The upload could not be read from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider answered but returned no translated text
    #[error("Provider returned an empty translation ({source_language} -> {target_language})")]
    EmptyResponse {
        source_language: String,
        target_language: String,
    },
}

/// Errors that can occur while generating a summary
#[derive(Error, Debug)]
pub enum SummarizationError {
    /// The tokenizer failed to encode or decode
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Model artifacts could not be fetched or loaded
    #[error("Model loading error: {0}")]
    ModelLoading(String),

    /// Error from the generation backend
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Nothing to summarize
    #[error("Please enter or upload some text.")]
    EmptyInput,

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from document extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from summarization
    #[error("Summarization error: {0}")]
    Summarization(#[from] SummarizationError),
}
