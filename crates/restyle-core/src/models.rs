//! Data models for restyle
//!
//! Defines the core data structures: custom rewrite styles and the
//! built-in tone presets they sit alongside.
//!
//! A custom `Style` is the persisted unit: a named prompt template with a
//! `{selected_text}` placeholder that the rewrite service fills in. Built-in
//! tones are static configuration and never touch storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A user-defined rewrite style
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Style {
    /// Unique identifier, assigned at creation and never changed
    pub id: Uuid,
    /// Display name, unique (case-insensitive) among stored styles
    pub name: String,
    /// Short description shown in pickers
    pub description: String,
    /// Prompt template containing the `{selected_text}` placeholder
    pub prompt: String,
    /// When this style was created
    pub created_at: DateTime<Utc>,
    /// When this style was last created or updated
    pub last_modified: DateTime<Utc>,
    /// Marker distinguishing stored styles from built-in presets
    pub is_custom: bool,
}

/// Input for creating a style
///
/// Carries only the caller-supplied fields; id and timestamps are assigned
/// during sanitization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StyleDraft {
    pub name: String,
    pub description: String,
    pub prompt: String,
}

impl StyleDraft {
    /// Create a draft from the three user-supplied fields
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            prompt: prompt.into(),
        }
    }
}

/// Partial update for an existing style
///
/// Unset fields keep their current value. Id and creation time cannot be
/// patched; the store re-pins them on every update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StylePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
}

impl StylePatch {
    /// Patch that changes only the name
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that changes only the description
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Patch that changes only the prompt
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// Merge this patch onto an existing style, producing a full draft
    pub fn apply_to(&self, current: &Style) -> StyleDraft {
        StyleDraft {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            prompt: self
                .prompt
                .clone()
                .unwrap_or_else(|| current.prompt.clone()),
        }
    }
}

/// Built-in rewrite tone
///
/// These map to the rewrite service's `tone` parameter and are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Academic,
    Creative,
    Technical,
}

impl Tone {
    /// All tones, in display order
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Academic,
        Tone::Creative,
        Tone::Technical,
    ];

    /// Wire value sent to the rewrite service
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Academic => "academic",
            Tone::Creative => "creative",
            Tone::Technical => "technical",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Academic => "Academic",
            Tone::Creative => "Creative",
            Tone::Technical => "Technical",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tone {
    type Err = UnknownTone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "casual" => Ok(Tone::Casual),
            "academic" => Ok(Tone::Academic),
            "creative" => Ok(Tone::Creative),
            "technical" => Ok(Tone::Technical),
            other => Err(UnknownTone(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized tone name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTone(pub String);

impl fmt::Display for UnknownTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = Tone::ALL.iter().map(|t| t.as_str()).collect();
        write!(
            f,
            "unknown tone '{}'. Valid tones: {}",
            self.0,
            valid.join(", ")
        )
    }
}

impl std::error::Error for UnknownTone {}

/// A built-in style preset (static configuration, never persisted)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinStyle {
    pub tone: Tone,
    pub label: &'static str,
    pub description: &'static str,
}

/// The built-in style presets shown alongside custom styles
pub const BUILTIN_STYLES: &[BuiltinStyle] = &[
    BuiltinStyle {
        tone: Tone::Professional,
        label: "Professional",
        description: "Polished business tone",
    },
    BuiltinStyle {
        tone: Tone::Casual,
        label: "Casual",
        description: "Relaxed conversational tone",
    },
    BuiltinStyle {
        tone: Tone::Academic,
        label: "Academic",
        description: "Formal scholarly tone",
    },
    BuiltinStyle {
        tone: Tone::Creative,
        label: "Creative",
        description: "Expressive, vivid phrasing",
    },
    BuiltinStyle {
        tone: Tone::Technical,
        label: "Technical",
        description: "Precise technical phrasing",
    },
];
