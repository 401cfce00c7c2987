// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use multisumm::app_config::{self, Config, TranslationProvider};
use multisumm::errors::AppError;
use multisumm::file_utils::FileManager;
use multisumm::postprocess::parse_keywords;
use multisumm::providers::huggingface::HuggingFace;
use multisumm::providers::Provider;
use multisumm::summarization::{DEFAULT_SUMMARY_WORDS, MAX_SUMMARY_WORDS, MIN_SUMMARY_WORDS};
use multisumm::{
    Controller, SourceLanguage, SummarizationEngine, SummarizationParameters, SummaryRequest, Tone,
    TranslationService,
};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for SourceLanguage to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLanguage {
    En,
    Hi,
    Fr,
    Es,
    De,
    #[value(name = "zh-cn")]
    ZhCn,
    Ta,
    Ar,
}

impl From<CliLanguage> for SourceLanguage {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::En => SourceLanguage::English,
            CliLanguage::Hi => SourceLanguage::Hindi,
            CliLanguage::Fr => SourceLanguage::French,
            CliLanguage::Es => SourceLanguage::Spanish,
            CliLanguage::De => SourceLanguage::German,
            CliLanguage::ZhCn => SourceLanguage::ChineseSimplified,
            CliLanguage::Ta => SourceLanguage::Tamil,
            CliLanguage::Ar => SourceLanguage::Arabic,
        }
    }
}

/// CLI Wrapper for Tone to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTone {
    Default,
    Formal,
    Informal,
    Academic,
    Concise,
}

impl From<CliTone> for Tone {
    fn from(cli_tone: CliTone) -> Self {
        match cli_tone {
            CliTone::Default => Tone::Default,
            CliTone::Formal => Tone::Formal,
            CliTone::Informal => Tone::Informal,
            CliTone::Academic => Tone::Academic,
            CliTone::Concise => Tone::Concise,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a document or text (default command)
    Summarize(SummarizeArgs),

    /// Check that the translation provider and the model endpoint are reachable
    Check,

    /// Generate shell completions for multisumm
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct SummarizeArgs {
    /// Document to summarize (.txt, .pdf or .docx)
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Text to summarize; read from stdin when neither --file nor --text is given
    #[arg(short, long)]
    text: Option<String>,

    /// Language of the input (defaults to the configured source language)
    #[arg(short, long, value_enum)]
    language: Option<CliLanguage>,

    /// Summary tone/style
    #[arg(long, value_enum, default_value_t = CliTone::Default)]
    tone: CliTone,

    /// Comma-separated keywords or phrases to highlight
    #[arg(short, long)]
    keywords: Option<String>,

    /// Desired summary length in words
    #[arg(
        long,
        default_value_t = DEFAULT_SUMMARY_WORDS,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_SUMMARY_WORDS)..=i64::from(MAX_SUMMARY_WORDS))
    )]
    length: u32,

    /// Generate a 3-line summary
    #[arg(long)]
    three_line: bool,

    /// Save the summary as plain text (a directory receives summary.txt)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct GlobalArgs {
    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Translation provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliTranslationProvider>,

    /// Hugging Face token for the tokenizer download and the inference API
    #[arg(long, env = "HF_TOKEN", hide_env_values = true, global = true)]
    hf_token: Option<String>,
}

/// multisumm - Multilingual Text Summarizer
///
/// Summarizes text in English, Hindi, French, Spanish, German, Chinese,
/// Tamil or Arabic by translating it to English, running a pretrained
/// BART summarizer and translating the summary back.
#[derive(Parser, Debug)]
#[command(name = "multisumm")]
#[command(version)]
#[command(about = "Multilingual text summarizer")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "multisumm summarizes text or documents in several languages.

EXAMPLES:
    multisumm --file report.pdf                         # Summarize a PDF
    multisumm --file notes.docx --language fr           # French document, French summary
    multisumm --text \"...\" --length 120 --tone formal   # Longer, formal summary
    multisumm --file article.txt --three-line -k ai,data # Three sentences, highlight keywords
    cat article.txt | multisumm -o summary.txt          # Read stdin, save the summary
    multisumm check                                     # Probe the configured services
    multisumm completions bash > multisumm.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED TRANSLATION PROVIDERS:
    google    - Google web translation endpoint (default)
    ollama    - Local Ollama server (default: llama3.2:3b)
    anthropic - Anthropic Claude API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    summarize: SummarizeArgs,

    #[command(flatten)]
    global: GlobalArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is refined once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.global.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "multisumm", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check) => run_check(load_config(&cli.global)?).await,
        Some(Commands::Summarize(args)) => run_summarize(load_config(&cli.global)?, args).await,
        None => run_summarize(load_config(&cli.global)?, cli.summarize).await,
    }
}

/// Load or create the configuration and apply command line overrides
fn load_config(options: &GlobalArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(token) = &options.hf_token {
        config.summarization.api_key = token.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// Read the text to summarize from --file, --text or stdin
fn read_input(args: &SummarizeArgs) -> Result<String> {
    match (&args.file, &args.text) {
        (Some(path), _) => FileManager::read_upload(path),
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => FileManager::read_stdin(),
    }
}

async fn run_summarize(config: Config, args: SummarizeArgs) -> Result<()> {
    let text = read_input(&args)?;
    let language = args
        .language
        .clone()
        .map(SourceLanguage::from)
        .unwrap_or(config.source_language);

    let request = SummaryRequest::new(text, language)
        .tone(args.tone.clone().into())
        .keywords(parse_keywords(args.keywords.as_deref().unwrap_or("")))
        .parameters(SummarizationParameters::new(args.length, args.three_line));

    if request.text.trim().is_empty() {
        warn!("{}", AppError::EmptyInput);
        return Ok(());
    }

    let translator = Arc::new(
        TranslationService::new(config.translation.clone())
            .context("Failed to create translation service")?,
    );
    let engine = Arc::new(
        SummarizationEngine::load(&config.summarization)
            .await
            .context("Failed to load summarization model")?,
    );
    let controller = Controller::new(translator, engine);

    let report = controller.run(&request).await?;

    println!("Summary:\n\n{}\n", report.summary);
    println!("{}", report.render_stats());

    if let Some(output) = &args.output {
        let path = FileManager::write_summary(output, &report.summary)?;
        info!("Summary saved to {:?}", path);
    }

    Ok(())
}

async fn run_check(config: Config) -> Result<()> {
    let translator = TranslationService::new(config.translation.clone())?;
    let mut healthy = true;

    match translator.test_connection().await {
        Ok(()) => info!("Translation provider {} is reachable", config.translation.provider.display_name()),
        Err(e) => {
            error!("Translation provider {} failed: {}", config.translation.provider.display_name(), e);
            healthy = false;
        }
    }

    let summarization = &config.summarization;
    let backend = HuggingFace::new(
        &summarization.endpoint,
        &summarization.model,
        &summarization.api_key,
        summarization.timeout_secs,
    );
    match backend.test_connection().await {
        Ok(()) => info!("Summarization model {} is reachable", backend.model()),
        Err(e) => {
            error!("Summarization model {} failed: {}", backend.model(), e);
            healthy = false;
        }
    }

    if healthy {
        Ok(())
    } else {
        Err(anyhow::anyhow!("One or more services are unreachable"))
    }
}
