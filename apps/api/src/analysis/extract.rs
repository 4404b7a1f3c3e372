//! Plain-text extraction from uploaded CV documents (PDF, DOCX, TXT).

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),

    #[error("Document contains no extractable text")]
    Empty,
}

impl DocumentKind {
    /// Detects the document kind from the file extension, then the content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, ExtractError> {
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        let by_extension = match extension.as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("docx") => Some(DocumentKind::Docx),
            Some("txt") | Some("md") | Some("text") => Some(DocumentKind::Text),
            _ => None,
        };
        if let Some(kind) = by_extension {
            return Ok(kind);
        }

        match content_type.map(|ct| ct.split(';').next().unwrap_or("").trim()) {
            Some("application/pdf") => Ok(DocumentKind::Pdf),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
                Ok(DocumentKind::Docx)
            }
            Some(ct) if ct.starts_with("text/") => Ok(DocumentKind::Text),
            _ => Err(ExtractError::Unsupported(
                file_name
                    .or(content_type)
                    .unwrap_or("unknown")
                    .to_string(),
            )),
        }
    }
}

/// How far a compressed upload may inflate before extraction gives up.
pub const MAX_EXPANSION_RATIO: usize = 20;

/// Ceiling on decompressed document bytes for an upload limit.
pub fn max_extracted_bytes(max_upload_bytes: usize) -> u64 {
    max_upload_bytes.saturating_mul(MAX_EXPANSION_RATIO) as u64
}

/// Extracts plain text; fails if the result is blank. `max_text_bytes` caps how much
/// an archive entry may decompress to.
pub fn extract_text(kind: DocumentKind, bytes: &[u8], max_text_bytes: u64) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(format!("{e:?}")))?
        }
        DocumentKind::Docx => extract_docx(bytes, max_text_bytes)?,
        DocumentKind::Text => String::from_utf8_lossy(bytes)
            .trim_start_matches('\u{feff}')
            .to_string(),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

fn extract_docx(bytes: &[u8], limit: u64) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let too_large = || ExtractError::Docx(format!("document body expands beyond {limit} bytes"));
    if entry.size() > limit {
        return Err(too_large());
    }

    // The declared size comes from the archive itself, so the read is capped too.
    let mut xml = String::new();
    entry
        .take(limit + 1)
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    if xml.len() as u64 > limit {
        return Err(too_large());
    }
    Ok(docx_xml_to_text(&xml))
}

static PARAGRAPH_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("paragraph pattern must compile"));
static TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/>").expect("tab pattern must compile"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern must compile"));

/// Flattens WordprocessingML to text: paragraph and line breaks become newlines,
/// markup is dropped, the five predefined XML entities are decoded.
fn docx_xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_END.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, "\t");
    let text = TAG.replace_all(&text, "");
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
