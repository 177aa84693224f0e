//! Style command handlers

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use restyle_core::{FileStore, Style, StyleDraft, StylePatch, StyleStore};

use crate::editor::{confirm, edit_text, prompt_with_default};
use crate::output::Output;

/// Template used when creating a prompt in $EDITOR
const PROMPT_TEMPLATE: &str = "Rewrite {selected_text} in the following style:\n";

/// Create a new style
pub async fn create(
    store: &StyleStore<FileStore>,
    name: String,
    description: String,
    prompt: Option<String>,
    output: &Output,
) -> Result<()> {
    let prompt = match prompt {
        Some(p) => p,
        None => {
            // No --prompt given: open the editor with a starter template
            edit_text(PROMPT_TEMPLATE).context("Failed to edit prompt")?
        }
    };

    let draft = StyleDraft::new(name, description, prompt);
    let style = store.add_style(&draft).await?;

    output.success(&format!("Created style: {}", style.name));
    output.print_style(&style);

    Ok(())
}

/// List all custom styles
pub async fn list(store: &StyleStore<FileStore>, output: &Output) -> Result<()> {
    let styles = store.load_styles().await?;
    output.print_styles(&styles);
    Ok(())
}

/// List built-in presets together with custom styles
pub async fn catalog(store: &StyleStore<FileStore>, output: &Output) -> Result<()> {
    let styles = store.load_styles().await?;
    output.print_catalog(&styles);
    Ok(())
}

/// Show a single style
pub async fn show(store: &StyleStore<FileStore>, selector: String, output: &Output) -> Result<()> {
    let style = resolve_style(store, &selector).await?;
    output.print_style(&style);
    Ok(())
}

/// Edit a style
///
/// With any field flag set, applies just those fields. Otherwise prompts
/// interactively for each field.
pub async fn edit(
    store: &StyleStore<FileStore>,
    selector: String,
    name: Option<String>,
    description: Option<String>,
    prompt: Option<String>,
    output: &Output,
) -> Result<()> {
    let style = resolve_style(store, &selector).await?;

    let patch = if name.is_some() || description.is_some() || prompt.is_some() {
        StylePatch {
            name,
            description,
            prompt,
        }
    } else {
        interactive_patch(&style)?
    };

    if patch == StylePatch::default() {
        output.message("No changes.");
        return Ok(());
    }

    let updated = store.update_style(style.id, &patch).await?;

    output.success("Style updated");
    output.print_style(&updated);

    Ok(())
}

/// Delete a style
pub async fn delete(
    store: &StyleStore<FileStore>,
    selector: String,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let style = resolve_style(store, &selector).await?;

    // Confirm deletion
    if !yes && output.should_prompt() {
        println!(
            "Delete style: {} - {}",
            &style.id.to_string()[..8],
            style.name
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_style(style.id).await?;

    output.success(&format!("Deleted style: {}", style.name));

    Ok(())
}

/// Delete every stored style
pub async fn clear(store: &StyleStore<FileStore>, yes: bool, output: &Output) -> Result<()> {
    let count = store.load_styles().await?.len();
    if count == 0 {
        output.message("No custom styles to clear.");
        return Ok(());
    }

    if !yes && output.should_prompt() {
        println!("This removes all {} custom style(s) permanently.", count);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.clear_all_styles().await?;

    output.success(&format!("Cleared {} style(s)", count));

    Ok(())
}

/// Show storage diagnostics
pub async fn info(store: &StyleStore<FileStore>, output: &Output) -> Result<()> {
    let info = store.storage_info().await?;
    output.print_storage_info(&info);
    Ok(())
}

/// Prompt for each field, keeping current values on empty input
fn interactive_patch(style: &Style) -> Result<StylePatch> {
    println!("Editing style: {}", style.name);
    println!("Press Enter to keep current value, or type new value.\n");

    let name = prompt_with_default("Name", &style.name)?;
    let description = prompt_with_default("Description", &style.description)?;

    println!("Current prompt: {}", style.prompt);
    let mut prompt = None;
    if confirm("Edit prompt in $EDITOR?")? {
        let edited = edit_text(&style.prompt)?;
        if edited.trim() != style.prompt {
            prompt = Some(edited);
        }
    }

    Ok(StylePatch {
        name,
        description,
        prompt,
    })
}

/// Resolve a style selector: full UUID, name, or UUID prefix
pub async fn resolve_style(store: &StyleStore<FileStore>, selector: &str) -> Result<Style> {
    // Try full UUID first
    if let Ok(id) = Uuid::parse_str(selector) {
        return store
            .get_style_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Style not found: {}", selector));
    }

    // Then exact (normalized) name
    if let Some(style) = store.get_style_by_name(selector).await? {
        return Ok(style);
    }

    // Finally UUID prefix
    let styles = store.load_styles().await?;
    let matches: Vec<_> = styles
        .iter()
        .filter(|s| s.id.to_string().starts_with(selector))
        .collect();

    match matches.len() {
        0 => bail!("No style found matching: {}", selector),
        1 => Ok(matches[0].clone()),
        _ => {
            eprintln!("Multiple styles match '{}':", selector);
            for style in &matches {
                eprintln!("  {} - {}", style.id, style.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
