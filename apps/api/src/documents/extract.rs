//! Uploaded-document text extraction for the Analyze workflow.
//! Accepts plain text (UTF-8) and PDF; anything else is rejected.

use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Pdf,
}

impl DocumentKind {
    /// Detects the kind from the PDF magic bytes first, then the filename extension.
    pub fn detect(filename: Option<&str>, bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF-") {
            return Some(DocumentKind::Pdf);
        }
        let extension = filename
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("txt") | None => Some(DocumentKind::Text),
            Some(_) => None,
        }
    }
}

/// Returns the document's text content.
pub fn extract_text(filename: Option<&str>, bytes: &[u8]) -> Result<(DocumentKind, String), AppError> {
    let kind = DocumentKind::detect(filename, bytes).ok_or_else(|| {
        AppError::Validation("Only .txt and .pdf documents are supported".to_string())
    })?;

    let text = match kind {
        DocumentKind::Text => String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Validation("Text document is not valid UTF-8".to_string()))?,
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            warn!("PDF text extraction failed: {e}");
            AppError::Validation(format!("Could not read PDF document: {e}"))
        })?,
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Document contains no extractable text".to_string(),
        ));
    }

    Ok((kind, text))
}
