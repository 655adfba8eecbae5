use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::consent::models::InteractionKind;
use crate::errors::AppError;
use crate::export::{export_text, ExportContext, ExportFormat, ExportedFile};
use crate::session::history::InteractionRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// History panel entry.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub index: usize,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub kind: InteractionKind,
    pub response_text: String,
}

impl RecordView {
    pub fn new(index: usize, record: &InteractionRecord) -> Self {
        Self {
            index,
            title: record.title(),
            timestamp: record.timestamp,
            kind: record.kind,
            response_text: record.response_text.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let session_id = state.sessions.create()?;
    info!(%session_id, "Session created");
    Ok((StatusCode::CREATED, Json(CreateSessionResponse { session_id })))
}

/// GET /api/v1/sessions/:id/history
///
/// Every record of the session, oldest first.
pub async fn handle_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<RecordView>>, AppError> {
    let views: Vec<RecordView> = state.sessions.with_history(session_id, |history| {
        history
            .list_all()
            .iter()
            .enumerate()
            .map(|(i, record)| RecordView::new(i, record))
            .collect()
    })?;
    Ok(Json(views))
}

/// GET /api/v1/sessions/:id/history/:index/export?format=txt|pdf
pub async fn handle_export(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let record = state
        .sessions
        .with_history(session_id, |history| history.get(index).cloned())?
        .ok_or_else(|| {
            AppError::NotFound(format!("Record {index} not found in session {session_id}"))
        })?;

    let format = query.format;
    let generated_at = state.clock.now();
    let layout = state.page_layout.clone();
    let scratch_dir = state.config.export_dir.clone();

    // Encoding and the scratch-file round trip are blocking work.
    let file = tokio::task::spawn_blocking(move || {
        let ctx = ExportContext {
            stem: record.kind.export_stem(),
            generated_at,
            layout: &layout,
            scratch_dir: &scratch_dir,
        };
        export_text(&record.response_text, format, &ctx)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    info!(%session_id, index, filename = %file.filename, bytes = file.bytes.len(), "Export served");
    Ok(attachment(file))
}

fn attachment(file: ExportedFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response()
}
