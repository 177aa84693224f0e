//! Rewrite service wire contract
//!
//! Request and response types for the external rewriting service and the
//! feedback endpoint. The HTTP transport lives in the CLI crate; this module
//! only pins down the JSON shapes both sides agree on.
//!
//! A rephrase request carries either a built-in `tone` or a
//! `custom_prompt`/`style_name` pair. [`RephraseStyle`] models that as an
//! enum, so the both-or-neither caller error the service rejects cannot be
//! constructed here; on the wire the two variants serialize to exactly the
//! original parameter objects.

use serde::{Deserialize, Serialize};

use crate::models::{Style, Tone};
use crate::validation::REQUIRED_PLACEHOLDER;

/// Path of the text-processing endpoint
pub const PROCESS_TEXT_PATH: &str = "/api/v1/process-text";
/// Path of the feedback endpoint
pub const FEEDBACK_PATH: &str = "/api/v1/feedback";

/// Action the service should perform on the selected text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteAction {
    GrammarFix,
    Rephrase,
}

/// Parameters selecting how a rephrase is performed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RephraseStyle {
    /// A built-in tone preset
    Tone { tone: Tone },
    /// A user-defined custom style
    Custom {
        custom_prompt: String,
        style_name: String,
    },
}

/// Request body for the text-processing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessTextRequest {
    pub selected_text: String,
    pub action: RewriteAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<RephraseStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ProcessTextRequest {
    /// Grammar-fix request; takes no rephrase parameters
    pub fn grammar_fix(selected_text: impl Into<String>) -> Self {
        Self {
            selected_text: selected_text.into(),
            action: RewriteAction::GrammarFix,
            parameters: None,
            session_id: None,
        }
    }

    /// Rephrase with a built-in tone
    pub fn rephrase_tone(selected_text: impl Into<String>, tone: Tone) -> Self {
        Self {
            selected_text: selected_text.into(),
            action: RewriteAction::Rephrase,
            parameters: Some(RephraseStyle::Tone { tone }),
            session_id: None,
        }
    }

    /// Rephrase with a stored custom style
    pub fn rephrase_custom(selected_text: impl Into<String>, style: &Style) -> Self {
        Self {
            selected_text: selected_text.into(),
            action: RewriteAction::Rephrase,
            parameters: Some(RephraseStyle::Custom {
                custom_prompt: style.prompt.clone(),
                style_name: style.name.clone(),
            }),
            session_id: None,
        }
    }

    /// Attach a session id for conversation continuity
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Response body from the text-processing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessTextResponse {
    pub success: bool,
    #[serde(default)]
    pub processed_text: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub session_id: String,
}

/// Request body for the feedback endpoint (fire-and-forget)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    #[serde(rename = "type")]
    pub feedback_type: String,
    /// 1 (worst) to 5 (best)
    pub rating: u8,
    pub message: Option<String>,
    pub email: Option<String>,
    pub allow_contact: bool,
    pub client_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Response body from the feedback endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
    pub feedback_id: String,
}

/// Substitute the placeholder in a style's prompt with the given text
///
/// Used for previews and logging; the service performs the same substitution
/// server-side.
pub fn render_prompt(style: &Style, selected_text: &str) -> String {
    style.prompt.replace(REQUIRED_PLACEHOLDER, selected_text)
}
