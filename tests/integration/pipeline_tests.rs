/*!
 * End-to-end tests of the summarization pipeline over mock collaborators
 */

use anyhow::Result;
use multisumm::app_controller::{SummaryRequest, Tone};
use multisumm::errors::AppError;
use multisumm::language_utils::SourceLanguage;
use multisumm::providers::mock::{MockProvider, MockRequest, MockSummarizer};
use multisumm::summarization::SummarizationParameters;

use crate::common::{init_test_logging, mock_controller, SAMPLE_ARTICLE};

#[tokio::test]
async fn test_summarize_withEmptyInput_shouldRejectBeforeTranslation() {
    let translator = MockProvider::identity();
    let summarizer = MockSummarizer::lead();
    let controller = mock_controller(&translator, &summarizer);

    for text in ["", "   ", "\n\t "] {
        let result = controller.summarize(&SummaryRequest::new(text, SourceLanguage::French)).await;
        assert!(matches!(result, Err(AppError::EmptyInput)));
    }

    assert_eq!(translator.request_count(), 0);
    assert!(summarizer.calls().is_empty());
}

#[tokio::test]
async fn test_summarize_shouldTranslateThreeTimesInOrder() -> Result<()> {
    init_test_logging();
    let translator = MockProvider::identity();
    let summarizer = MockSummarizer::fixed("Le budget est adopté.");
    let controller = mock_controller(&translator, &summarizer);

    let text = "  Le conseil a adopté le budget.  ";
    let report = controller
        .summarize(&SummaryRequest::new(text, SourceLanguage::French))
        .await?;

    assert_eq!(
        translator.requests(),
        vec![
            MockRequest::new("Le conseil a adopté le budget.", "fr", "en"),
            MockRequest::new("Le budget est adopté.", "en", "fr"),
            MockRequest::new(text, "fr", "en"),
        ]
    );
    assert_eq!(report.summary, "Le budget est adopté.");
    Ok(())
}

#[tokio::test]
async fn test_summarize_withEnglishInput_shouldStillCallTranslator() -> Result<()> {
    let translator = MockProvider::identity();
    let controller = mock_controller(&translator, &MockSummarizer::fixed("Summary."));

    controller
        .summarize(&SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::English))
        .await?;

    let requests = translator.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.source_language == "en" && r.target_language == "en"));
    Ok(())
}

#[tokio::test]
async fn test_summarize_withTone_shouldPrefixModelInputAndFlattenNewlines() -> Result<()> {
    let summarizer = MockSummarizer::fixed("Summary.");
    let controller = mock_controller(&MockProvider::identity(), &summarizer);

    let request = SummaryRequest::new("Line one.\nLine two.", SourceLanguage::English).tone(Tone::Academic);
    controller.summarize(&request).await?;

    let (model_input, _) = &summarizer.calls()[0];
    assert_eq!(model_input, "Summarize in a academic tone: Line one. Line two.");
    Ok(())
}

#[tokio::test]
async fn test_summarize_withDefaultTone_shouldNotPrefix() -> Result<()> {
    let summarizer = MockSummarizer::fixed("Summary.");
    let controller = mock_controller(&MockProvider::identity(), &summarizer);

    controller
        .summarize(&SummaryRequest::new("Plain input.", SourceLanguage::English))
        .await?;

    assert_eq!(summarizer.calls()[0].0, "Plain input.");
    Ok(())
}

#[tokio::test]
async fn test_summarize_inThreeLineMode_shouldCutToThreeSentencesWithShortBounds() -> Result<()> {
    let summarizer = MockSummarizer::fixed("One. Two. Three. Four. Five.");
    let controller = mock_controller(&MockProvider::identity(), &summarizer);

    let request = SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::English)
        .parameters(SummarizationParameters::new(150, true));
    let report = controller.summarize(&request).await?;

    assert_eq!(report.english_summary, "One. Two. Three.");
    let (_, generation) = &summarizer.calls()[0];
    assert_eq!((generation.min_length, generation.max_length), (30, 60));
    Ok(())
}

#[tokio::test]
async fn test_summarize_withSliderLength_shouldRequestScaledBounds() -> Result<()> {
    let summarizer = MockSummarizer::fixed("Summary.");
    let controller = mock_controller(&MockProvider::identity(), &summarizer);

    let request = SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::English)
        .parameters(SummarizationParameters::new(45, false));
    controller.summarize(&request).await?;

    let (_, generation) = &summarizer.calls()[0];
    assert_eq!((generation.min_length, generation.max_length), (60, 100));
    Ok(())
}

#[tokio::test]
async fn test_summarize_withKeywords_shouldEmphasizeBeforeBackTranslation() -> Result<()> {
    let translator = MockProvider::identity();
    let controller = mock_controller(&translator, &MockSummarizer::fixed("The Cat sat on the mat."));

    let request = SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::Spanish)
        .keywords(vec!["cat".to_string(), String::new()]);
    let report = controller.summarize(&request).await?;

    assert_eq!(report.english_summary, "The **Cat** sat on the mat.");
    assert_eq!(translator.requests()[1].text, "The **Cat** sat on the mat.");
    assert_eq!(report.summary, "The **Cat** sat on the mat.");
    Ok(())
}

#[tokio::test]
async fn test_summarize_withIdentityRoundTrip_shouldReturnEnglishSummary() -> Result<()> {
    let controller = mock_controller(&MockProvider::identity(), &MockSummarizer::lead());

    let request = SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::German)
        .parameters(SummarizationParameters::new(30, false));
    let report = controller.summarize(&request).await?;

    assert_eq!(report.summary, report.english_summary);
    Ok(())
}

#[tokio::test]
async fn test_summarize_twice_shouldProduceIdenticalReports() -> Result<()> {
    let controller = mock_controller(&MockProvider::tagged(), &MockSummarizer::lead());
    let request = SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::Hindi).tone(Tone::Concise);

    let first = controller.summarize(&request).await?;
    let second = controller.summarize(&request).await?;

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.readability, second.readability);
    Ok(())
}

#[tokio::test]
async fn test_summarize_shouldComputeStatsOnTranslatedSummary() -> Result<()> {
    // Tagged translation adds one "[xx]" word to every output
    let controller = mock_controller(&MockProvider::tagged(), &MockSummarizer::fixed("One two three."));

    let request = SummaryRequest::new("a b c d e f g h i j", SourceLanguage::Tamil);
    let report = controller.summarize(&request).await?;

    assert_eq!(report.summary, "[ta] One two three.");
    assert_eq!(report.stats.original_words, 10);
    assert_eq!(report.stats.summary_words, 4);
    assert_eq!(report.stats.compression_pct, 60.0);
    Ok(())
}

#[tokio::test]
async fn test_summarize_shouldScoreReadabilityOnEnglishTranslation() -> Result<()> {
    fn to_english(request: &MockRequest) -> String {
        if request.target_language == "en" {
            "The cat sat on the mat.".to_string()
        } else {
            request.text.clone()
        }
    }

    let translator = MockProvider::identity().with_custom_response(to_english);
    let controller = mock_controller(&translator, &MockSummarizer::fixed("Summary."));

    let report = controller
        .summarize(&SummaryRequest::new("القط جلس على الحصيرة.", SourceLanguage::Arabic))
        .await?;

    assert!((report.readability.gunning_fog - 2.4).abs() < 0.011);
    assert!(report.render_stats().contains("Readability Analysis (English Equivalent)"));
    Ok(())
}

#[tokio::test]
async fn test_summarize_withFailingTranslator_shouldAbortBeforeModel() {
    init_test_logging();
    let summarizer = MockSummarizer::lead();
    let controller = mock_controller(&MockProvider::failing(), &summarizer);

    let result = controller
        .summarize(&SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::French))
        .await;

    assert!(matches!(result, Err(AppError::Translation(_))));
    assert!(summarizer.calls().is_empty());
}

#[tokio::test]
async fn test_summarize_withFailingModel_shouldSkipBackTranslation() {
    let translator = MockProvider::identity();
    let controller = mock_controller(&translator, &MockSummarizer::failing());

    let result = controller
        .summarize(&SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::French))
        .await;

    assert!(matches!(result, Err(AppError::Summarization(_))));
    assert_eq!(translator.request_count(), 1);
}

#[tokio::test]
async fn test_summarize_withEmptyTranslation_shouldFail() {
    let controller = mock_controller(&MockProvider::empty(), &MockSummarizer::lead());

    let result = controller
        .summarize(&SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::French))
        .await;

    assert!(matches!(result, Err(AppError::Translation(_))));
}

#[tokio::test]
async fn test_run_shouldReturnSameReportAsSummarize() -> Result<()> {
    let controller = mock_controller(&MockProvider::identity(), &MockSummarizer::lead());
    let request = SummaryRequest::new(SAMPLE_ARTICLE, SourceLanguage::English);

    let via_run = controller.run(&request).await?;
    let direct = controller.summarize(&request).await?;
    assert_eq!(via_run.summary, direct.summary);
    Ok(())
}
