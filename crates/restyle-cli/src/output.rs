//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use restyle_core::{Style, StorageInfo, BUILTIN_STYLES};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single style with full details
    pub fn print_style(&self, style: &Style) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:            {}", style.id);
                println!("Name:          {}", style.name);
                if !style.description.is_empty() {
                    println!("Description:   {}", style.description);
                }
                println!("Prompt:        {}", style.prompt);
                println!("Created:       {}", style.created_at.format("%Y-%m-%d %H:%M"));
                println!(
                    "Last modified: {}",
                    style.last_modified.format("%Y-%m-%d %H:%M")
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(style).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", style.id);
            }
        }
    }

    /// Print a list of styles
    pub fn print_styles(&self, styles: &[Style]) {
        match self.format {
            OutputFormat::Human => {
                if styles.is_empty() {
                    println!("No custom styles found.");
                    return;
                }
                for style in styles {
                    println!(
                        "{}  {}  {}",
                        &style.id.to_string()[..8],
                        style.name,
                        truncate_line(&style.description, 50)
                    );
                }
                println!("\n{} style(s)", styles.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(styles).unwrap());
            }
            OutputFormat::Quiet => {
                for style in styles {
                    println!("{}", style.id);
                }
            }
        }
    }

    /// Print built-in presets followed by custom styles
    pub fn print_catalog(&self, styles: &[Style]) {
        match self.format {
            OutputFormat::Human => {
                println!("Built-in styles:");
                for builtin in BUILTIN_STYLES {
                    println!(
                        "  {:<14} {}",
                        builtin.label, builtin.description
                    );
                }
                println!();
                println!("Custom styles:");
                if styles.is_empty() {
                    println!("  (none)");
                } else {
                    for style in styles {
                        println!(
                            "  {:<14} {}",
                            style.name,
                            truncate_line(&style.description, 50)
                        );
                    }
                }
            }
            OutputFormat::Json => {
                let builtins: Vec<_> = BUILTIN_STYLES
                    .iter()
                    .map(|b| {
                        serde_json::json!({
                            "tone": b.tone.as_str(),
                            "label": b.label,
                            "description": b.description,
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "builtin": builtins,
                        "custom": styles,
                    }))
                    .unwrap()
                );
            }
            OutputFormat::Quiet => {
                for builtin in BUILTIN_STYLES {
                    println!("{}", builtin.tone);
                }
                for style in styles {
                    println!("{}", style.id);
                }
            }
        }
    }

    /// Print storage diagnostics
    pub fn print_storage_info(&self, info: &StorageInfo) {
        match self.format {
            OutputFormat::Human => {
                println!("Styles stored:      {}", info.style_count);
                println!("Storage keys:       {}", info.total_storage_keys);
                println!("Serialized size:    {} bytes", info.estimated_size);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(info).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", info.style_count);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate_line(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
