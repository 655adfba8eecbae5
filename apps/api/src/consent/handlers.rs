//! Axum route handlers for the Generate and Analyze workflows.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consent::controller::run_interaction;
use crate::consent::models::{ComplianceRegime, InteractionKind, Language, TemplateKind};
use crate::consent::prompt_builder::{
    build_analysis_prompt, build_generation_prompt, build_insight_prompt, PromptPair,
};
use crate::errors::AppError;
use crate::session::handlers::RecordView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub language: Language,
    pub compliance: ComplianceRegime,
    pub template: TemplateKind,
    /// Free-form request. Falls back to the template's default wording when absent.
    #[serde(default)]
    pub request: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub document_text: String,
}

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub index: usize,
    pub record: RecordView,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub languages: Vec<&'static str>,
    pub compliance: Vec<&'static str>,
    pub templates: Vec<TemplateOption>,
}

#[derive(Debug, Serialize)]
pub struct TemplateOption {
    pub name: &'static str,
    pub default_request: Option<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
///
/// Choices for the settings sidebar.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        languages: Language::ALL.iter().map(|l| l.as_str()).collect(),
        compliance: ComplianceRegime::ALL.iter().map(|c| c.as_str()).collect(),
        templates: TemplateKind::ALL
            .iter()
            .map(|t| TemplateOption {
                name: t.as_str(),
                default_request: t.default_request(),
            })
            .collect(),
    })
}

/// POST /api/v1/sessions/:id/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<InteractionResponse>, AppError> {
    let user_text = match req.request.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => req.template.default_request().ok_or_else(|| {
            AppError::Validation(format!(
                "request cannot be empty for the {} template",
                req.template
            ))
        })?,
    };

    let prompt = build_generation_prompt(req.language, req.compliance, user_text)?;
    run(&state, session_id, InteractionKind::Generate, prompt).await
}

/// POST /api/v1/sessions/:id/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<DocumentRequest>,
) -> Result<Json<InteractionResponse>, AppError> {
    let prompt = build_analysis_prompt(&req.document_text)?;
    run(&state, session_id, InteractionKind::Analyze, prompt).await
}

/// POST /api/v1/sessions/:id/insights
///
/// Plain-language explanation of an uploaded document.
pub async fn handle_insights(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<DocumentRequest>,
) -> Result<Json<InteractionResponse>, AppError> {
    let prompt = build_insight_prompt(&req.document_text)?;
    run(&state, session_id, InteractionKind::Insight, prompt).await
}

async fn run(
    state: &AppState,
    session_id: Uuid,
    kind: InteractionKind,
    prompt: PromptPair,
) -> Result<Json<InteractionResponse>, AppError> {
    let (index, record) = run_interaction(
        state.llm.as_ref(),
        &state.sessions,
        state.clock.as_ref(),
        session_id,
        kind,
        prompt,
    )
    .await?;

    Ok(Json(InteractionResponse {
        index,
        record: RecordView::new(index, &record),
    }))
}
