/*!
 * Translation adapter.
 *
 * The pipeline only ever sees the narrow `Translator` interface. The
 * `TranslationService` implements it over whichever provider the
 * configuration selects. Each call is a single provider request: no retry,
 * no fallback and no caching, so failures propagate to the caller.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils::get_language_name;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::google::{GoogleRequest, GoogleTranslate};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::Provider;

/// Output budget for LLM translations
const LLM_MAX_TOKENS: u32 = 4096;

/// Fixed sampling seed so LLM translations repeat for repeated input
const LLM_SEED: u64 = 42;

/// `(text, source, target) -> translated text`
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError>;
}

/// Reject an empty provider answer to non-empty input
pub fn ensure_translated(
    text: &str,
    translated: String,
    source_language: &str,
    target_language: &str,
) -> Result<String, TranslationError> {
    if translated.trim().is_empty() && !text.trim().is_empty() {
        return Err(TranslationError::EmptyResponse {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        });
    }
    Ok(translated)
}

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// Google web translation endpoint
    Google {
        /// Client instance
        client: GoogleTranslate,
    },

    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },
}

/// Translator backed by the configured provider
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            ConfigTranslationProvider::Google => TranslationProviderImpl::Google {
                client: GoogleTranslate::new(endpoint, timeout_secs),
            },
            ConfigTranslationProvider::Ollama => {
                url::Url::parse(&endpoint)
                    .or_else(|_| url::Url::parse(&format!("http://{}", endpoint)))
                    .map_err(|e| anyhow::anyhow!("Invalid Ollama endpoint {}: {}", endpoint, e))?;
                TranslationProviderImpl::Ollama {
                    client: Ollama::new(endpoint, timeout_secs),
                }
            }
            ConfigTranslationProvider::Anthropic => TranslationProviderImpl::Anthropic {
                client: Anthropic::new(config.get_api_key(), endpoint, config.get_model(), timeout_secs),
            },
        };

        info!(
            "Translation provider: {} {}",
            config.provider.display_name(),
            config.get_model()
        );

        Ok(Self { provider, config })
    }

    /// Probe the configured provider with a minimal request
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Google { client } => client.test_connection().await,
            TranslationProviderImpl::Ollama { client } => client.test_connection().await,
            TranslationProviderImpl::Anthropic { client } => client.test_connection().await,
        }
    }

    fn system_prompt(&self, source_language: &str, target_language: &str) -> String {
        let source = get_language_name(source_language).unwrap_or_else(|_| source_language.to_string());
        let target = get_language_name(target_language).unwrap_or_else(|_| target_language.to_string());
        self.config.system_prompt_for(&source, &target)
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        debug!(
            "Translating {} chars {} -> {}",
            text.len(),
            source_language,
            target_language
        );

        let translated = match &self.provider {
            TranslationProviderImpl::Google { client } => {
                let request = GoogleRequest::new(text, source_language, target_language);
                let response = client.complete(request).await?;
                GoogleTranslate::extract_text(&response)
            }
            TranslationProviderImpl::Ollama { client } => {
                let request = GenerationRequest::new(self.config.get_model(), text)
                    .system(self.system_prompt(source_language, target_language))
                    .temperature(self.config.common.temperature)
                    .seed(LLM_SEED);
                let response = client.complete(request).await?;
                Ollama::extract_text(&response)
            }
            TranslationProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(self.config.get_model(), LLM_MAX_TOKENS)
                    .system(self.system_prompt(source_language, target_language))
                    .temperature(self.config.common.temperature)
                    .add_message("user", text);
                let response = client.complete(request).await?;
                Anthropic::extract_text(&response)
            }
        };

        ensure_translated(text, translated, source_language, target_language)
    }
}
