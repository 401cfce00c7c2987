/*!
 * Tests for document text extraction
 */

use anyhow::Result;
use multisumm::document::{extract, extract_docx, extract_file, extract_pdf, MediaType, RawDocument, MIME_DOCX, MIME_PDF};
use multisumm::errors::ExtractionError;

use crate::common::{build_docx, build_docx_from_body, build_pdf, create_temp_dir, create_test_file};

#[test]
fn test_extract_withPlainText_shouldDecodeUtf8() -> Result<()> {
    let document = RawDocument::new("Résumé du texte.\nDeuxième ligne.".as_bytes().to_vec(), MediaType::PlainText);
    assert_eq!(extract(&document)?, "Résumé du texte.\nDeuxième ligne.");
    Ok(())
}

#[test]
fn test_extractDocx_withTwoParagraphs_shouldSeparateWithBlankLine() -> Result<()> {
    let bytes = build_docx(&["Hello", "World"])?;
    assert_eq!(extract_docx(&bytes)?, "Hello\n\nWorld");
    Ok(())
}

#[test]
fn test_extractDocx_withTabsBreaksAndEntities_shouldKeepLayout() -> Result<()> {
    let body = r#"<w:p><w:r><w:t>Name</w:t><w:tab/><w:t>Value</w:t></w:r></w:p>
<w:p><w:r><w:t>Line one</w:t><w:br/><w:t>Line two &amp; more</w:t></w:r></w:p>"#;
    let bytes = build_docx_from_body(body)?;
    assert_eq!(extract_docx(&bytes)?, "Name\tValue\n\nLine one\nLine two & more");
    Ok(())
}

#[test]
fn test_extractDocx_withNonZipBytes_shouldReturnDocxError() {
    let result = extract_docx(b"plain bytes, not a zip archive");
    assert!(matches!(result, Err(ExtractionError::Docx(_))));
}

#[test]
fn test_extract_withDocxMediaType_shouldRouteToDocxExtractor() -> Result<()> {
    let bytes = build_docx(&["Routed by MIME type"])?;
    let document = RawDocument::new(bytes, MediaType::from_mime(MIME_DOCX));
    assert_eq!(extract(&document)?, "Routed by MIME type");
    Ok(())
}

#[test]
fn test_extractPdf_withTwoPages_shouldConcatenateInOrder() -> Result<()> {
    let bytes = build_pdf(&["First page text", "Second page text"])?;
    let text = extract_pdf(&bytes)?;

    let first = text.find("First page text").expect("first page missing");
    let second = text.find("Second page text").expect("second page missing");
    assert!(first < second);
    Ok(())
}

#[test]
fn test_extractPdf_withTextlessMiddlePage_shouldKeepOtherPagesInOrder() -> Result<()> {
    let bytes = build_pdf(&["Opening page", "", "Closing page"])?;
    let text = extract_pdf(&bytes)?;

    let first = text.find("Opening page").expect("first page missing");
    let third = text.find("Closing page").expect("third page missing");
    assert!(first < third);
    assert_eq!(
        text.replace("Opening page", "").replace("Closing page", "").trim(),
        ""
    );
    Ok(())
}

#[test]
fn test_extractPdf_withOnlyTextlessPages_shouldReturnBlankText() -> Result<()> {
    let bytes = build_pdf(&["", ""])?;
    assert_eq!(extract_pdf(&bytes)?.trim(), "");
    Ok(())
}

#[test]
fn test_extractPdf_withGarbage_shouldReturnPdfError() {
    let document = RawDocument::new(b"%PDF-garbage".to_vec(), MediaType::from_mime(MIME_PDF));
    assert!(matches!(extract(&document), Err(ExtractionError::Pdf(_))));
}

#[test]
fn test_extractFile_shouldInferMediaTypeFromExtension() -> Result<()> {
    let dir = create_temp_dir()?;
    let txt = create_test_file(dir.path(), "notes.txt", b"Plain notes.")?;
    let docx = create_test_file(dir.path(), "report.docx", &build_docx(&["Docx body"])?)?;
    let pdf = create_test_file(dir.path(), "paper.pdf", &build_pdf(&["Pdf body"])?)?;

    assert_eq!(extract_file(&txt)?, "Plain notes.");
    assert_eq!(extract_file(&docx)?, "Docx body");
    assert!(extract_file(&pdf)?.contains("Pdf body"));
    Ok(())
}

#[test]
fn test_extractFile_withUnknownExtension_shouldBeUnsupported() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "slides.pptx", b"whatever")?;
    assert!(matches!(
        extract_file(&path),
        Err(ExtractionError::UnsupportedMediaType(ext)) if ext == "pptx"
    ));
    Ok(())
}

#[test]
fn test_extractFile_withMissingFile_shouldReturnIoError() {
    assert!(matches!(
        extract_file("/no/such/upload.txt"),
        Err(ExtractionError::Io(_))
    ));
}
