use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::providers::{error_from_response, http_client, Provider};

/// Client for the public Google web translation endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Base URL of the endpoint
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

/// A single translation request
#[derive(Debug, Clone)]
pub struct GoogleRequest {
    /// Text to translate
    pub text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

/// Translated segments returned by the endpoint
#[derive(Debug, Clone, Default)]
pub struct GoogleResponse {
    /// Translated sentence segments in order
    pub segments: Vec<String>,
}

impl GoogleRequest {
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

/// The endpoint spells region subtags in upper case (`zh-CN`)
pub fn to_google_code(code: &str) -> String {
    match code.trim().split_once('-') {
        Some((lang, region)) => format!("{}-{}", lang.to_lowercase(), region.to_uppercase()),
        None => code.trim().to_lowercase(),
    }
}

impl GoogleTranslate {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client: http_client(timeout_secs),
        }
    }

    /// Parse the nested-array payload: `[[["segment", "original", ...], ...], null, "en", ...]`.
    /// A null sentence array (returned for empty input) yields no segments.
    pub fn parse_response(body: &str) -> Result<GoogleResponse, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid JSON from translation endpoint: {}", e)))?;

        let segments = match value.as_array().and_then(|outer| outer.first()) {
            Some(Value::Null) => Vec::new(),
            Some(Value::Array(sentences)) => sentences
                .iter()
                .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
                .map(str::to_string)
                .collect(),
            _ => {
                return Err(ProviderError::ParseError(
                    "Missing sentence array in translation response".to_string(),
                ));
            }
        };

        Ok(GoogleResponse { segments })
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleRequest;
    type Response = GoogleResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = format!("{}/translate_a/single", self.endpoint);
        let source = to_google_code(&request.source_language);
        let target = to_google_code(&request.target_language);
        debug!("Google translate {} -> {} ({} chars)", source, target, request.text.len());

        // Text goes in the form body so long documents do not hit URL length limits
        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
            ])
            .form(&[("q", request.text.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response("Google", response).await);
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(GoogleRequest::new("Hello", "en", "fr")).await?;
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.segments.concat()
    }
}
