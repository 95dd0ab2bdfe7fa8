//! Document extraction — turns uploaded PDF / DOCX bytes into plain text.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc"];

const DOCX_BODY_PART: &str = "word/document.xml";

static PARAGRAPH_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/>").unwrap());
static TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("File has no extension")]
    MissingExtension,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOCX: {0}")]
    Docx(String),

    #[error("Document contains no extractable text")]
    Empty,
}

/// Lowercased extension of `filename`, validated against the allow-list.
pub fn allowed_extension(filename: &str) -> Result<String, ExtractionError> {
    let (stem, ext) = filename
        .rsplit_once('.')
        .ok_or(ExtractionError::MissingExtension)?;
    if stem.is_empty() || ext.is_empty() {
        return Err(ExtractionError::MissingExtension);
    }
    let ext = ext.to_ascii_lowercase();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(ExtractionError::UnsupportedFormat(ext))
    }
}

/// Extracts trimmed text from a resume document, dispatching on extension.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match allowed_extension(filename)?.as_str() {
        "pdf" => extract_pdf(bytes)?,
        _ => extract_docx(bytes)?,
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text.to_string())
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ExtractionError::Docx(format!("{DOCX_BODY_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    Ok(docx_xml_to_text(&xml))
}

/// One line per paragraph; tags stripped, the five XML entities decoded.
fn docx_xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_END.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, "\t");
    let text = ANY_TAG.replace_all(&text, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
