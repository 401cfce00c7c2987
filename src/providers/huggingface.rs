/*!
 * Hugging Face inference client for the pretrained summarization model.
 *
 * The model runs server side; this client only ships the (already truncated)
 * input text together with the decoding parameters and reads back the
 * `summary_text` of the first candidate.
 */

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{error_from_response, http_client, Provider};
use crate::summarization::GenerationParams;

/// Inference API client bound to one model
#[derive(Debug)]
pub struct HuggingFace {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

/// Summarization request body
#[derive(Debug, Serialize)]
pub struct InferenceRequest {
    /// Text to summarize
    pub inputs: String,
    /// Decoding parameters forwarded to `generate`
    pub parameters: InferenceParameters,
    /// Service options
    pub options: InferenceOptions,
}

/// Decoding parameters in the shape the inference server expects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceParameters {
    pub min_length: u32,
    pub max_length: u32,
    pub num_beams: u32,
    pub length_penalty: f32,
    pub early_stopping: bool,
    pub do_sample: bool,
    pub truncation: bool,
}

/// Service options
#[derive(Debug, Serialize)]
pub struct InferenceOptions {
    /// Block until a cold model is loaded instead of returning 503
    pub wait_for_model: bool,
    /// Identical requests must hit the model, not a response cache
    pub use_cache: bool,
}

/// One generated candidate
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizationOutput {
    pub summary_text: String,
}

impl From<&GenerationParams> for InferenceParameters {
    fn from(params: &GenerationParams) -> Self {
        Self {
            min_length: params.min_length,
            max_length: params.max_length,
            num_beams: params.num_beams,
            length_penalty: params.length_penalty,
            early_stopping: params.early_stopping,
            do_sample: params.do_sample,
            truncation: true,
        }
    }
}

impl InferenceRequest {
    pub fn new(inputs: impl Into<String>, params: &GenerationParams) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: InferenceParameters::from(params),
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: false,
            },
        }
    }
}

impl HuggingFace {
    /// Create a client for `model` served at `endpoint`
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: http_client(timeout_secs),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Name of the model this client targets
    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.api_key)
        }
    }
}

#[async_trait]
impl Provider for HuggingFace {
    type Request = InferenceRequest;
    type Response = Vec<SummarizationOutput>;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        debug!(
            "Inference request to {} (min_length={}, max_length={}, beams={})",
            self.model,
            request.parameters.min_length,
            request.parameters.max_length,
            request.parameters.num_beams
        );

        let response = self
            .authorized(self.client.post(self.model_url()))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response("HuggingFace", response).await);
        }

        let candidates = response
            .json::<Vec<SummarizationOutput>>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Unexpected inference response: {}", e)))?;

        if candidates.is_empty() {
            return Err(ProviderError::ParseError("no summary candidates".to_string()));
        }
        Ok(candidates)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.authorized(self.client.get(self.model_url())).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response("HuggingFace", response).await)
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response
            .first()
            .map(|output| output.summary_text.clone())
            .unwrap_or_default()
    }
}
