//! Prompt Builder: turns workflow inputs into a system/user message pair.
//!
//! Pure functions: no I/O, no clock. Empty inputs are rejected here so a request
//! never reaches the completion service with nothing to work on.

use crate::consent::models::{ComplianceRegime, InteractionKind, Language};
use crate::consent::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, GENERATION_SYSTEM_TEMPLATE, INSIGHT_PROMPT_TEMPLATE,
    INSIGHT_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::CompletionRequest;

/// The two messages sent for one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    /// Attaches the model profile of `kind` to produce a ready-to-send request.
    pub fn into_request(self, kind: InteractionKind) -> CompletionRequest {
        CompletionRequest {
            system: self.system,
            user: self.user,
            model: kind.model(),
            temperature: kind.temperature(),
            max_tokens: kind.max_tokens(),
        }
    }
}

/// Drafting prompt: the system message pins language and regime, the user message is
/// the request exactly as typed.
pub fn build_generation_prompt(
    language: Language,
    regime: ComplianceRegime,
    user_text: &str,
) -> Result<PromptPair, AppError> {
    require_text("request", user_text)?;

    let system = GENERATION_SYSTEM_TEMPLATE
        .replace("{language}", language.as_str())
        .replace("{compliance}", regime.as_str());

    Ok(PromptPair {
        system,
        user: user_text.to_string(),
    })
}

/// Analysis prompt: summary, risks, recommendations.
pub fn build_analysis_prompt(document_text: &str) -> Result<PromptPair, AppError> {
    require_text("document_text", document_text)?;
    Ok(PromptPair {
        system: ANALYSIS_SYSTEM.to_string(),
        user: ANALYSIS_PROMPT_TEMPLATE.replace("{document_text}", document_text),
    })
}

/// Plain-language explanation prompt.
pub fn build_insight_prompt(document_text: &str) -> Result<PromptPair, AppError> {
    require_text("document_text", document_text)?;
    Ok(PromptPair {
        system: INSIGHT_SYSTEM.to_string(),
        user: INSIGHT_PROMPT_TEMPLATE.replace("{document_text}", document_text),
    })
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
