/*!
 * # multisumm - Multilingual Text Summarizer
 *
 * A Rust library for summarizing text written in one of several languages.
 *
 * ## Features
 *
 * - Extract text from plain text, PDF and Word (`.docx`) uploads
 * - Translate the input to English and the summary back, using:
 *   - Google web translation (default)
 *   - Ollama (local LLM)
 *   - Anthropic API
 * - Abstractive summarization with a pretrained BART model
 *   (deterministic beam search, configurable length, three-sentence mode)
 * - Tone instructions and keyword emphasis
 * - Word counts, compression ratio and readability scores
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Text extraction from uploaded documents
 * - `translation`: The `Translator` interface and its provider-backed service
 * - `summarization`: Tokenizer and generation backend behind `SummarizationEngine`
 * - `postprocess`: Sentence truncation and keyword emphasis
 * - `metrics`: Summary statistics and readability scores
 * - `app_controller`: The summarization pipeline
 * - `file_utils`: File system operations
 * - `language_utils`: Supported languages and ISO code utilities
 * - `providers`: Client implementations for remote services:
 *   - `providers::google`: Google web translation client
 *   - `providers::ollama`: Ollama API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::huggingface`: Hugging Face inference client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod metrics;
pub mod postprocess;
pub mod providers;
pub mod summarization;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, SummaryReport, SummaryRequest, Tone};
pub use errors::{AppError, ExtractionError, ProviderError, SummarizationError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, SourceLanguage};
pub use summarization::{SummarizationEngine, SummarizationParameters};
pub use translation::{TranslationService, Translator};
