//! Rewrite command handler

use std::io::Read;

use anyhow::{bail, Context, Result};
use tracing::debug;

use restyle_core::api::render_prompt;
use restyle_core::{FileStore, ProcessTextRequest, StyleStore, Tone};

use crate::client::ServiceClient;
use crate::commands::style::resolve_style;
use crate::output::{Output, OutputFormat};

/// Send text through the rewrite service
///
/// Exactly one of `grammar`, `tone`, or `style` selects the action; the
/// text comes from the argument or stdin.
pub async fn run(
    store: &StyleStore<FileStore>,
    client: &ServiceClient,
    text: Option<String>,
    grammar: bool,
    tone: Option<String>,
    style: Option<String>,
    session: Option<String>,
    output: &Output,
) -> Result<()> {
    let text = read_text(text)?;

    let mut request = if grammar {
        ProcessTextRequest::grammar_fix(text)
    } else if let Some(tone) = tone {
        let tone: Tone = tone.parse()?;
        ProcessTextRequest::rephrase_tone(text, tone)
    } else if let Some(selector) = style {
        let style = resolve_style(store, &selector).await?;
        debug!(style = %style.name, prompt = %render_prompt(&style, &text), "using custom style");
        ProcessTextRequest::rephrase_custom(text, &style)
    } else {
        bail!("Specify one of --grammar, --tone, or --style");
    };

    if let Some(session) = session {
        request = request.with_session(session);
    }

    let response = client.process_text(&request).await?;

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        _ => {
            // Human and quiet both print just the rewritten text
            println!("{}", response.processed_text.unwrap_or_default());
        }
    }

    Ok(())
}

/// Take the text argument, or read it from stdin
fn read_text(text: Option<String>) -> Result<String> {
    let text = match text {
        Some(t) => t,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        bail!("No text to rewrite. Pass it as an argument or pipe it on stdin.");
    }
    Ok(text)
}
