// Export: turns a response into a downloadable text or PDF file.
// PDF bytes are written to a scratch file and read back before being served, so a
// full or unwritable export directory is reported instead of silently ignored.

pub mod paginator;
pub mod pdf;

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub use paginator::{default_page_layout, render_to_pages, PageLayout};
pub use pdf::{encode_as_document, DocumentMetadata};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[serde(alias = "text")]
    Txt,
    #[default]
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// A file ready to be served as an attachment.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// Everything an export needs besides the text itself.
pub struct ExportContext<'a> {
    pub stem: &'a str,
    pub generated_at: DateTime<Utc>,
    pub layout: &'a PageLayout,
    pub scratch_dir: &'a Path,
}

/// Exports `text` in `format`. Text exports are verbatim; PDF exports are paginated.
pub fn export_text(
    text: &str,
    format: ExportFormat,
    ctx: &ExportContext<'_>,
) -> Result<ExportedFile, ExportError> {
    let bytes = match format {
        ExportFormat::Txt => Bytes::copy_from_slice(text.as_bytes()),
        ExportFormat::Pdf => {
            let pages = render_to_pages(text, ctx.layout);
            let metadata = DocumentMetadata {
                title: ctx.stem.to_string(),
                created_at: ctx.generated_at,
            };
            let pdf = encode_as_document(&pages, ctx.layout, &metadata)?;
            debug!(pages = pages.len(), bytes = pdf.len(), "PDF encoded");
            Bytes::from(write_and_read_back(&pdf, ctx)?)
        }
    };

    Ok(ExportedFile {
        filename: format!("{}.{}", ctx.stem, format.extension()),
        content_type: format.mime(),
        bytes,
    })
}

/// Writes `data` to `{stem}_{YYYYMMDD_HHMMSS}_*.pdf` under the scratch dir, reads it
/// back, and removes the file when the handle drops.
fn write_and_read_back(data: &[u8], ctx: &ExportContext<'_>) -> Result<Vec<u8>, ExportError> {
    let prefix = format!("{}_{}_", ctx.stem, ctx.generated_at.format("%Y%m%d_%H%M%S"));
    let mut file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".pdf")
        .tempfile_in(ctx.scratch_dir)?;

    file.write_all(data)?;
    file.flush()?;
    file.seek(SeekFrom::Start(0))?;

    let mut read_back = Vec::with_capacity(data.len());
    file.read_to_end(&mut read_back)?;
    debug!(path = %file.path().display(), bytes = read_back.len(), "Export written");
    Ok(read_back)
}
