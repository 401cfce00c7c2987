/*!
 * Document text extraction.
 *
 * Uploads arrive as raw bytes with a declared media type:
 * - `text/plain` is decoded as UTF-8
 * - `application/pdf` is read page by page; pages are concatenated with no separator
 * - Word documents are read from `word/document.xml` inside the ZIP container
 */

use bytes::Bytes;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use std::fmt;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

use crate::errors::ExtractionError;

pub const MIME_PLAIN_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Declared media type of an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    PlainText,
    Pdf,
    WordDocument,
    /// Anything else, kept verbatim for the error message
    Other(String),
}

impl MediaType {
    /// Map a MIME type string, ignoring parameters such as `; charset=utf-8`
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            MIME_PLAIN_TEXT => Self::PlainText,
            MIME_PDF => Self::Pdf,
            MIME_DOCX => Self::WordDocument,
            _ => Self::Other(essence),
        }
    }

    /// Guess the media type from a file extension (`txt`, `pdf`, `docx`)
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "txt" => Self::PlainText,
            "pdf" => Self::Pdf,
            "docx" => Self::WordDocument,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        Self::from_extension(extension)
    }

    pub fn mime(&self) -> &str {
        match self {
            Self::PlainText => MIME_PLAIN_TEXT,
            Self::Pdf => MIME_PDF,
            Self::WordDocument => MIME_DOCX,
            Self::Other(mime) => mime,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime())
    }
}

/// Uploaded bytes and their declared media type
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub media_type: MediaType,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>, media_type: MediaType) -> Self {
        Self {
            bytes: bytes.into(),
            media_type,
        }
    }
}

/// Extract the text of an upload according to its media type
pub fn extract(document: &RawDocument) -> Result<String, ExtractionError> {
    debug!("Extracting {} ({} bytes)", document.media_type, document.bytes.len());
    match &document.media_type {
        MediaType::PlainText => Ok(String::from_utf8(document.bytes.to_vec())?),
        MediaType::Pdf => extract_pdf(&document.bytes),
        MediaType::WordDocument => extract_docx(&document.bytes),
        MediaType::Other(mime) => Err(ExtractionError::UnsupportedMediaType(mime.clone())),
    }
}

/// Read a file from disk and extract it, taking the media type from its extension
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<String, ExtractionError> {
    let path = path.as_ref();
    let media_type = MediaType::from_path(path);
    let bytes = std::fs::read(path)?;
    extract(&RawDocument::new(bytes, media_type))
}

/// Concatenate the text of every page in order. A page that fails to extract contributes nothing.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document = lopdf::Document::load_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(format!("failed to parse PDF: {}", e)))?;

    let mut text = String::new();
    for (page_number, _) in document.get_pages() {
        match document.extract_text(&[page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => debug!("No text extracted from PDF page {}: {}", page_number, e),
        }
    }

    if text.is_empty() {
        debug!("PDF contains no extractable text");
    }
    Ok(text)
}

/// Whole-document text of a `.docx`: paragraphs separated by a blank line, tabs and breaks kept
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("failed to open DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(format!("missing word/document.xml: {}", e)))?
        .read_to_string(&mut xml)?;

    let mut reader = XmlReader::from_str(&xml);
    let mut buf = Vec::new();
    let mut output = String::new();
    let mut in_text_node = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_node = true,
                name => push_layout(&mut output, name),
            },
            Ok(Event::Empty(ref e)) => push_layout(&mut output, e.name().as_ref()),
            Ok(Event::Text(e)) if in_text_node => {
                let value = e
                    .unescape()
                    .map_err(|err| ExtractionError::Docx(format!("bad text node: {}", err)))?;
                output.push_str(&value);
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:t" => in_text_node = false,
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractionError::Docx(format!("failed to parse DOCX XML: {}", err))),
            _ => {}
        }
        buf.clear();
    }

    Ok(output.trim().to_string())
}

fn push_layout(output: &mut String, element: &[u8]) {
    match element {
        b"w:p" if !output.is_empty() => output.push_str("\n\n"),
        b"w:tab" => output.push('\t'),
        b"w:br" | b"w:cr" => output.push('\n'),
        _ => {}
    }
}
