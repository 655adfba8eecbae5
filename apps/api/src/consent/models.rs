//! Closed option sets for the consent workflows.
//!
//! Values arrive from the browser as their display names (`"Medical Research"`,
//! `"GDPR"`); anything outside these sets is rejected by serde before a prompt is built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::llm_client::{CHAT_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, REASONING_MODEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
        }
    }
}

/// Regulatory regime the generated agreement must satisfy.
/// `None` is a real choice in the UI and is passed through to the prompt as the word "None".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceRegime {
    #[serde(rename = "GDPR")]
    Gdpr,
    #[serde(rename = "HIPAA")]
    Hipaa,
    #[serde(rename = "CCPA")]
    Ccpa,
    None,
}

impl ComplianceRegime {
    pub const ALL: [ComplianceRegime; 4] = [
        ComplianceRegime::Gdpr,
        ComplianceRegime::Hipaa,
        ComplianceRegime::Ccpa,
        ComplianceRegime::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceRegime::Gdpr => "GDPR",
            ComplianceRegime::Hipaa => "HIPAA",
            ComplianceRegime::Ccpa => "CCPA",
            ComplianceRegime::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    #[serde(rename = "Medical Research")]
    MedicalResearch,
    #[serde(rename = "Data Sharing")]
    DataSharing,
    #[serde(rename = "Legal Agreement")]
    LegalAgreement,
    Custom,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::MedicalResearch,
        TemplateKind::DataSharing,
        TemplateKind::LegalAgreement,
        TemplateKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::MedicalResearch => "Medical Research",
            TemplateKind::DataSharing => "Data Sharing",
            TemplateKind::LegalAgreement => "Legal Agreement",
            TemplateKind::Custom => "Custom",
        }
    }

    /// Request text pre-filled in the Generate tab for this template.
    /// `Custom` has none: the user must write their own request.
    pub fn default_request(&self) -> Option<&'static str> {
        match self {
            TemplateKind::MedicalResearch => {
                Some("Generate a consent agreement for medical research.")
            }
            TemplateKind::DataSharing => Some("Generate a consent agreement for data sharing."),
            TemplateKind::LegalAgreement => {
                Some("Generate a consent agreement for a legal agreement.")
            }
            TemplateKind::Custom => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ComplianceRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which workflow produced an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    Generate,
    Analyze,
    Insight,
}

impl InteractionKind {
    pub fn model(&self) -> &'static str {
        match self {
            InteractionKind::Generate | InteractionKind::Insight => REASONING_MODEL,
            InteractionKind::Analyze => CHAT_MODEL,
        }
    }

    pub fn temperature(&self) -> f32 {
        DEFAULT_TEMPERATURE
    }

    pub fn max_tokens(&self) -> u32 {
        DEFAULT_MAX_TOKENS
    }

    /// Filename stem used for downloads of this kind of response.
    pub fn export_stem(&self) -> &'static str {
        match self {
            InteractionKind::Generate => "consent_agreement",
            InteractionKind::Analyze => "document_analysis",
            InteractionKind::Insight => "document_insights",
        }
    }
}
