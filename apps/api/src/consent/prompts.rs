// All LLM prompt constants for the consent workflows.
// Templates use `{placeholder}` markers that are filled with `str::replace`.

/// System prompt for agreement drafting.
/// Replace: {language}, {compliance}
pub const GENERATION_SYSTEM_TEMPLATE: &str = "You are a legal AI assistant. \
    Generate a consent agreement in {language}, ensuring compliance with {compliance}.";

/// System prompt for document analysis.
pub const ANALYSIS_SYSTEM: &str = "You are an AI-powered document analysis assistant.";

/// Document analysis prompt template. Replace `{document_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following document and provide:
1. A summary of the document.
2. Key legal risks and compliance issues.
3. Recommendations for improvements.
Document:
{document_text}"#;

/// System prompt for plain-language insights.
pub const INSIGHT_SYSTEM: &str = "You are an AI assistant simplifying legal documents.";

/// Plain-language explanation prompt template. Replace `{document_text}` before sending.
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"Explain this document in simple terms for someone unfamiliar with legal language.
Provide an easy-to-understand summary and its key implications.
Document:
{document_text}"#;
