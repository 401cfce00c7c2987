/*!
 * Provider implementations for the remote services the pipeline depends on.
 *
 * This module contains client implementations for:
 * - Google: free web translation endpoint (default translator)
 * - Ollama: Local LLM server used as a translator
 * - Anthropic: Anthropic API used as a translator
 * - HuggingFace: hosted inference for the pretrained summarization model
 * - Mock: deterministic stand-ins for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all remote providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the translation and summarization services.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Read a non-success response into a `ProviderError`
pub(crate) async fn error_from_response(provider: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    log::error!("{} API error ({}): {}", provider, status, message);

    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(message),
        code => ProviderError::ApiError {
            status_code: code,
            message,
        },
    }
}

/// Build a reqwest client with the given timeout
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

pub mod anthropic;
pub mod google;
pub mod huggingface;
pub mod mock;
pub mod ollama;
