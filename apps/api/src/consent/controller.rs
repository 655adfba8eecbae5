//! Interaction controller. Runs one workflow: prompt → completion → history.
//!
//! The completion call happens before any history lock is taken. A failed call
//! returns the `ServiceError` and leaves the session history untouched.

use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::consent::models::InteractionKind;
use crate::consent::prompt_builder::PromptPair;
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, ServiceError};
use crate::session::history::InteractionRecord;
use crate::session::registry::SessionRegistry;

/// Runs `prompt` for session `session_id` and records the response.
/// Returns the record and its index in the session history.
pub async fn run_interaction(
    llm: &dyn CompletionClient,
    sessions: &SessionRegistry,
    clock: &dyn Clock,
    session_id: Uuid,
    kind: InteractionKind,
    prompt: PromptPair,
) -> Result<(usize, InteractionRecord), AppError> {
    // Unknown sessions fail before spending a remote call.
    sessions.ensure_exists(session_id)?;

    let request = prompt.into_request(kind);
    let response_text = llm.complete(&request).await.map_err(|e| {
        warn!(%session_id, ?kind, "Completion failed: {e}");
        AppError::Llm(e)
    })?;

    let record = InteractionRecord::new(clock.now(), kind, response_text);
    let index = sessions
        .with_history(session_id, |history| history.append(record.clone()))?
        .ok_or(AppError::Llm(ServiceError::EmptyContent))?;

    info!(
        %session_id,
        ?kind,
        index,
        chars = record.response_text.chars().count(),
        "Interaction recorded"
    );
    Ok((index, record))
}
