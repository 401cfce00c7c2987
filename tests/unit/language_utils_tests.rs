/*!
 * Tests for language utility functions
 */

use anyhow::Result;
use multisumm::language_utils::{
    get_language_name, language_codes_match, SourceLanguage, PIVOT_LANGUAGE,
};

/// Test lookup of ISO 639-1 and 639-3 codes
#[test]
fn test_getLanguageName_withVariousCodes_shouldResolveOrFail() {
    for code in ["en", "fr", "de", "eng", "fra", " EN ", "zh-cn", "pt_BR"] {
        assert!(get_language_name(code).is_ok(), "{} should be valid", code);
    }

    for code in ["qqq", "123", "e", ""] {
        assert!(get_language_name(code).is_err(), "{} should be invalid", code);
    }
}

#[test]
fn test_getLanguageName_shouldReturnEnglishNames() -> Result<()> {
    assert_eq!(get_language_name("hi")?, "Hindi");
    assert_eq!(get_language_name("zh-cn")?, "Chinese");
    assert_eq!(get_language_name("ara")?, "Arabic");
    assert!(get_language_name("zz").is_err());
    Ok(())
}

#[test]
fn test_languageCodesMatch_acrossIsoParts_shouldMatch() {
    assert!(language_codes_match("ta", "tam"));
    assert!(language_codes_match("de", "DEU"));
    assert!(!language_codes_match("es", "fr"));
}

#[test]
fn test_sourceLanguage_codes_shouldCoverSupportedSet() {
    let codes: Vec<&str> = SourceLanguage::ALL.iter().map(|lang| lang.code()).collect();
    assert_eq!(codes, vec!["en", "hi", "fr", "es", "de", "zh-cn", "ta", "ar"]);

    for lang in SourceLanguage::ALL {
        assert!(get_language_name(lang.code()).is_ok());
    }
}

#[test]
fn test_sourceLanguage_default_shouldBePivot() {
    assert_eq!(SourceLanguage::default(), SourceLanguage::English);
    assert_eq!(SourceLanguage::English.code(), PIVOT_LANGUAGE);
    assert_ne!(SourceLanguage::Tamil.code(), PIVOT_LANGUAGE);
}

#[test]
fn test_sourceLanguage_serde_shouldUseCodes() -> Result<()> {
    assert_eq!(serde_json::to_string(&SourceLanguage::ChineseSimplified)?, "\"zh-cn\"");
    let parsed: SourceLanguage = serde_json::from_str("\"ar\"")?;
    assert_eq!(parsed, SourceLanguage::Arabic);
    Ok(())
}

#[test]
fn test_sourceLanguage_display_shouldPrintCode() {
    assert_eq!(SourceLanguage::Hindi.to_string(), "hi");
    assert_eq!(SourceLanguage::ChineseSimplified.display_name(), "Chinese (Simplified)");
}
