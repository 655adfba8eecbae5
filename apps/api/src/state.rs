use std::sync::Arc;

use crate::clock::Clock;
use crate::config::Config;
use crate::export::PageLayout;
use crate::llm_client::CompletionClient;
use crate::session::registry::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion service. `LlmClient` in production; scripted stubs in tests.
    pub llm: Arc<dyn CompletionClient>,
    pub sessions: SessionRegistry,
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    /// Page geometry for PDF exports.
    pub page_layout: PageLayout,
}
