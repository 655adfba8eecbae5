use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::documents::extract::{extract_text, DocumentKind};
use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub filename: Option<String>,
    pub kind: DocumentKind,
    pub text: String,
}

/// POST /api/v1/documents/extract
///
/// Multipart upload with a single `file` field. Returns the document text so the
/// client can show it and send it to the analyze/insights endpoints.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;

        // PDF text extraction is CPU-bound; keep it off the async workers.
        let name = filename.clone();
        let upload = bytes.clone();
        let (kind, text) =
            tokio::task::spawn_blocking(move || extract_text(name.as_deref(), &upload))
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extract: {e}"))
                })??;
        info!(?kind, bytes = bytes.len(), chars = text.chars().count(), "Document extracted");

        return Ok(Json(ExtractResponse {
            filename,
            kind,
            text,
        }));
    }

    Err(AppError::Validation(
        "Upload must include a `file` field".to_string(),
    ))
}
