// Consent workflows: agreement generation, document analysis, plain-language insights.
// All completion calls go through llm_client; no direct HTTP calls here.

pub mod controller;
pub mod handlers;
pub mod models;
pub mod prompt_builder;
pub mod prompts;
