/*!
 * Mock provider implementations for testing.
 *
 * Translation mocks:
 * - `MockProvider::identity()` - Returns the text unchanged (a perfect round trip)
 * - `MockProvider::tagged()` - Prefixes the text with the target language
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Succeeds with an empty body
 *
 * Summarization mocks:
 * - `MockSummarizer::lead()` - Keeps the first `max_length` words of the input
 * - `MockSummarizer::fixed(text)` - Always returns `text`
 * - `MockSummarizer::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::{ProviderError, SummarizationError, TranslationError};
use crate::providers::Provider;
use crate::summarization::{GenerationParams, SummarizationBackend};
use crate::translation::{ensure_translated, Translator};

/// Mock request for testing
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
}

impl MockRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The translated text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns the input text unchanged
    Identity,
    /// Returns `[xx] text` where `xx` is the target language
    Tagged,
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
}

/// Mock translator that records every request it receives
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of requests served, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Requests in arrival order, shared between clones
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    pub fn tagged() -> Self {
        Self::new(MockBehavior::Tagged)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator; it replaces Identity and Tagged output
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the requests received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let text = match (self.behavior, self.custom_response) {
            (MockBehavior::Failing, _) => {
                return Err(ProviderError::ApiError {
                    status_code: 500,
                    message: "Simulated provider failure".to_string(),
                });
            }
            (MockBehavior::Empty, _) => String::new(),
            (_, Some(generator)) => generator(&request),
            (MockBehavior::Identity, None) => request.text,
            (MockBehavior::Tagged, None) => format!("[{}] {}", request.target_language, request.text),
        };

        Ok(MockResponse { text })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}

#[async_trait]
impl Translator for MockProvider {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let response = self
            .complete(MockRequest::new(text, source_language, target_language))
            .await?;
        ensure_translated(text, Self::extract_text(&response), source_language, target_language)
    }
}

/// Behavior mode for the mock summarizer
#[derive(Debug, Clone, PartialEq)]
pub enum SummarizerBehavior {
    /// First `max_length` whitespace words of the input
    Lead,
    /// A fixed output regardless of input
    Fixed(String),
    /// Always fails with an error
    Failing,
}

/// Deterministic stand-in for the pretrained model
#[derive(Debug, Clone)]
pub struct MockSummarizer {
    behavior: SummarizerBehavior,
    /// Inputs and decoding parameters in arrival order, shared between clones
    calls: Arc<Mutex<Vec<(String, GenerationParams)>>>,
}

impl MockSummarizer {
    pub fn new(behavior: SummarizerBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn lead() -> Self {
        Self::new(SummarizerBehavior::Lead)
    }

    pub fn fixed(output: impl Into<String>) -> Self {
        Self::new(SummarizerBehavior::Fixed(output.into()))
    }

    pub fn failing() -> Self {
        Self::new(SummarizerBehavior::Failing)
    }

    /// Snapshot of the generation calls received so far
    pub fn calls(&self) -> Vec<(String, GenerationParams)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SummarizationBackend for MockSummarizer {
    async fn generate(&self, input: &str, params: &GenerationParams) -> Result<String, SummarizationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((input.to_string(), params.clone()));
        }

        match &self.behavior {
            SummarizerBehavior::Lead => Ok(input
                .split_whitespace()
                .take(params.max_length as usize)
                .collect::<Vec<_>>()
                .join(" ")),
            SummarizerBehavior::Fixed(output) => Ok(output.clone()),
            SummarizerBehavior::Failing => Err(SummarizationError::Provider(ProviderError::ApiError {
                status_code: 503,
                message: "Simulated model failure".to_string(),
            })),
        }
    }
}
