/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use multisumm::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use multisumm::errors::AppError;
use multisumm::language_utils::SourceLanguage;
use std::str::FromStr;

use crate::common::create_temp_dir;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, SourceLanguage::English);
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.available_providers.len(), 3);
    assert_eq!(config.translation.get_endpoint(), "https://translate.googleapis.com");
    assert_eq!(config.translation.get_timeout_secs(), 30);

    assert_eq!(config.summarization.model, "facebook/bart-large-cnn");
    assert_eq!(config.summarization.max_input_tokens, 1024);
    assert!(config.summarization.tokenizer_path.is_none());
    assert_eq!(config.log_level, LogLevel::Info);

    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_configValidation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // Anthropic requires an API key
    config.translation.provider = TranslationProvider::Anthropic;
    assert!(config.validate().is_err());

    if let Some(anthropic) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "anthropic")
    {
        anthropic.api_key = "sk-test".to_string();
    }
    assert!(config.validate().is_ok());

    // Ollama needs no key
    config.translation.provider = TranslationProvider::Ollama;
    assert!(config.validate().is_ok());

    let mut config = Config::default();
    config.summarization.model = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.summarization.endpoint = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.summarization.max_input_tokens = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_configValidation_withMissingApiKey_shouldReturnConfigError() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;

    let result = config.validate();
    assert!(matches!(result, Err(AppError::Config(ref msg)) if msg.contains("Anthropic")));
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config.translation.provider, TranslationProvider::Google);

    // Second load reads the file that was just written
    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.summarization.model, config.summarization.model);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{
            "source_language": "fr",
            "translation": { "provider": "ollama" },
            "summarization": { "model": "sshleifer/distilbart-cnn-12-6" },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.source_language, SourceLanguage::French);
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.get_model(), "llama3.2:3b");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.summarization.model, "sshleifer/distilbart-cnn-12-6");
    assert_eq!(config.summarization.endpoint, "https://api-inference.huggingface.co");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_providerConfig_serde_shouldUseTypeField() -> Result<()> {
    let json = serde_json::to_value(ProviderConfig::new(TranslationProvider::Ollama))?;
    assert_eq!(json["type"], "ollama");
    assert_eq!(json["model"], "llama3.2:3b");
    Ok(())
}

#[test]
fn test_translationProvider_fromStr_shouldParseNames() {
    assert_eq!(TranslationProvider::from_str("Google").unwrap(), TranslationProvider::Google);
    assert_eq!(TranslationProvider::from_str("anthropic").unwrap(), TranslationProvider::Anthropic);
    assert!(TranslationProvider::from_str("openai").is_err());
    assert_eq!(TranslationProvider::Ollama.to_string(), "ollama");
}

#[test]
fn test_systemPromptFor_shouldFillPlaceholders() {
    let config = Config::default();
    let prompt = config.translation.system_prompt_for("Tamil", "English");
    assert!(prompt.contains("from Tamil to English"));
    assert!(!prompt.contains('{'));
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
