//! Style validation and normalization
//!
//! Pure functions over candidate styles: field validation, input
//! sanitization, and name-uniqueness checks. The store runs these before
//! every write, so anything persisted has already passed `validate`.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Style, StyleDraft};

/// Maximum style name length, in characters
pub const MAX_NAME_LEN: usize = 50;
/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;
/// Maximum prompt length, in characters
pub const MAX_PROMPT_LEN: usize = 2000;
/// Placeholder the rewrite service substitutes with the selected text
pub const REQUIRED_PLACEHOLDER: &str = "{selected_text}";

/// Outcome of validating a candidate style
///
/// Collects every violated rule; messages are safe to show to users verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a candidate style
///
/// Rules are checked independently and all violations are collected, so a
/// candidate with several bad fields reports every problem at once.
pub fn validate(style: &Style) -> Validation {
    let mut errors = Vec::new();

    if style.name.trim().is_empty() {
        errors.push("Name cannot be empty".to_string());
    } else if style.name.chars().count() > MAX_NAME_LEN {
        errors.push(format!("Name must be {} characters or less", MAX_NAME_LEN));
    }

    if style.description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(format!(
            "Description must be {} characters or less",
            MAX_DESCRIPTION_LEN
        ));
    }

    if style.prompt.trim().is_empty() {
        errors.push("Prompt cannot be empty".to_string());
    } else {
        if style.prompt.chars().count() > MAX_PROMPT_LEN {
            errors.push(format!(
                "Prompt must be {} characters or less",
                MAX_PROMPT_LEN
            ));
        }
        if !style.prompt.contains(REQUIRED_PLACEHOLDER) {
            errors.push(format!(
                "Prompt must contain the placeholder: {}",
                REQUIRED_PLACEHOLDER
            ));
        }
    }

    Validation { errors }
}

/// Normalize a draft into a full style record
///
/// Trims all string fields. When `existing` is given (update path), its id
/// and creation time are preserved; otherwise a fresh id is generated and
/// creation time is set to now. `last_modified` is always refreshed, and
/// `is_custom` is always forced on.
pub fn sanitize(draft: &StyleDraft, existing: Option<&Style>) -> Style {
    let now = Utc::now();
    Style {
        id: existing.map(|s| s.id).unwrap_or_else(Uuid::new_v4),
        name: draft.name.trim().to_string(),
        description: draft.description.trim().to_string(),
        prompt: draft.prompt.trim().to_string(),
        created_at: existing.map(|s| s.created_at).unwrap_or(now),
        last_modified: now,
        is_custom: true,
    }
}

/// Check whether a name is unique among the given styles
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
/// `exclude` skips one style by id, so an update can keep its own name.
pub fn is_name_unique(name: &str, styles: &[Style], exclude: Option<Uuid>) -> bool {
    let needle = name.trim().to_lowercase();
    !styles
        .iter()
        .any(|s| Some(s.id) != exclude && s.name.trim().to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> StyleDraft {
        StyleDraft::new(
            "Resume",
            "Resume phrasing",
            "Rewrite {selected_text} for a resume",
        )
    }

    #[test]
    fn test_valid_style_passes() {
        let style = sanitize(&valid_draft(), None);
        let result = validate(&style);
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let style = sanitize(&StyleDraft::new("   ", "d", "Fix {selected_text}"), None);
        let result = validate(&style);
        assert!(!result.is_valid());
        assert!(result.errors.contains(&"Name cannot be empty".to_string()));
    }

    #[test]
    fn test_name_boundary() {
        let draft = StyleDraft::new("x".repeat(MAX_NAME_LEN), "d", "Fix {selected_text}");
        assert!(validate(&sanitize(&draft, None)).is_valid());

        let draft = StyleDraft::new("x".repeat(MAX_NAME_LEN + 1), "d", "Fix {selected_text}");
        let result = validate(&sanitize(&draft, None));
        assert!(!result.is_valid());
        assert!(result
            .errors
            .contains(&format!("Name must be {} characters or less", MAX_NAME_LEN)));
    }

    #[test]
    fn test_description_boundary() {
        let draft = StyleDraft::new("n", "d".repeat(MAX_DESCRIPTION_LEN), "Fix {selected_text}");
        assert!(validate(&sanitize(&draft, None)).is_valid());

        let draft = StyleDraft::new(
            "n",
            "d".repeat(MAX_DESCRIPTION_LEN + 1),
            "Fix {selected_text}",
        );
        assert!(!validate(&sanitize(&draft, None)).is_valid());
    }

    #[test]
    fn test_empty_description_allowed() {
        let draft = StyleDraft::new("n", "", "Fix {selected_text}");
        assert!(validate(&sanitize(&draft, None)).is_valid());
    }

    #[test]
    fn test_missing_placeholder_rejected() {
        let draft = StyleDraft::new("n", "d", "Just rewrite it nicely");
        let result = validate(&sanitize(&draft, None));
        assert!(!result.is_valid());
        assert_eq!(
            result.errors,
            vec![format!(
                "Prompt must contain the placeholder: {}",
                REQUIRED_PLACEHOLDER
            )]
        );
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let draft = StyleDraft::new("n", "d", "  ");
        let result = validate(&sanitize(&draft, None));
        assert!(result.errors.contains(&"Prompt cannot be empty".to_string()));
        // Emptiness subsumes the placeholder rule
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_overlong_prompt_missing_placeholder_reports_both() {
        let draft = StyleDraft::new("n", "d", "x".repeat(MAX_PROMPT_LEN + 1));
        let result = validate(&sanitize(&draft, None));
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_prompt_boundary() {
        // Placeholder counts toward the limit
        let pad = MAX_PROMPT_LEN - REQUIRED_PLACEHOLDER.chars().count();
        let draft = StyleDraft::new("n", "d", format!("{}{}", REQUIRED_PLACEHOLDER, "x".repeat(pad)));
        assert!(validate(&sanitize(&draft, None)).is_valid());

        let draft = StyleDraft::new(
            "n",
            "d",
            format!("{}{}", REQUIRED_PLACEHOLDER, "x".repeat(pad + 1)),
        );
        assert!(!validate(&sanitize(&draft, None)).is_valid());
    }

    #[test]
    fn test_multiple_violations_collected() {
        let draft = StyleDraft::new("", "d".repeat(MAX_DESCRIPTION_LEN + 1), "");
        let result = validate(&sanitize(&draft, None));
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_sanitize_trims_fields() {
        let draft = StyleDraft::new("  Resume  ", " desc ", "  Fix {selected_text}  ");
        let style = sanitize(&draft, None);
        assert_eq!(style.name, "Resume");
        assert_eq!(style.description, "desc");
        assert_eq!(style.prompt, "Fix {selected_text}");
        assert!(style.is_custom);
    }

    #[test]
    fn test_sanitize_generates_id_and_timestamps() {
        let a = sanitize(&valid_draft(), None);
        let b = sanitize(&valid_draft(), None);
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.last_modified);
    }

    #[test]
    fn test_sanitize_preserves_identity_on_update() {
        let original = sanitize(&valid_draft(), None);
        std::thread::sleep(std::time::Duration::from_millis(10));

        let updated = sanitize(&StyleDraft::new("CV", "d", "Fix {selected_text}"), Some(&original));
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.last_modified > original.last_modified);
    }

    #[test]
    fn test_name_uniqueness_ignores_case_and_whitespace() {
        let styles = vec![sanitize(&valid_draft(), None)];
        assert!(!is_name_unique("resume", &styles, None));
        assert!(!is_name_unique("  RESUME ", &styles, None));
        assert!(is_name_unique("Cover Letter", &styles, None));
    }

    #[test]
    fn test_name_uniqueness_excludes_own_id() {
        let style = sanitize(&valid_draft(), None);
        let styles = vec![style.clone()];
        assert!(is_name_unique("Resume", &styles, Some(style.id)));
        assert!(!is_name_unique("Resume", &styles, Some(Uuid::new_v4())));
    }
}
