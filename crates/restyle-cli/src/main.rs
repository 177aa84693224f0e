//! restyle CLI
//!
//! Command-line interface for restyle - custom rewrite styles and remote
//! text rewriting.

use anyhow::Result;
use clap::{Parser, Subcommand};

use restyle_core::{Config, FileStore, StyleStore};

mod client;
mod commands;
mod editor;
mod output;

use client::ServiceClient;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "restyle")]
#[command(about = "restyle - manage rewrite styles and rewrite text")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage custom rewrite styles
    Style {
        #[command(subcommand)]
        command: StyleCommands,
    },
    /// List built-in presets and custom styles
    Styles,
    /// Rewrite text through the remote service
    Rewrite {
        /// Text to rewrite (reads stdin if omitted)
        text: Option<String>,
        /// Fix grammar without rephrasing
        #[arg(long, conflicts_with_all = ["tone", "style"])]
        grammar: bool,
        /// Built-in tone (professional, casual, academic, creative, technical)
        #[arg(long, conflicts_with = "style")]
        tone: Option<String>,
        /// Custom style (name, full ID, or ID prefix)
        #[arg(long)]
        style: Option<String>,
        /// Session ID for conversation continuity
        #[arg(long)]
        session: Option<String>,
    },
    /// Submit feedback about rewrite quality
    Feedback {
        /// Rating from 1 (worst) to 5 (best)
        #[arg(short, long)]
        rating: u8,
        /// Feedback category
        #[arg(long = "type", default_value = "general")]
        feedback_type: String,
        /// Free-form message
        #[arg(short, long)]
        message: Option<String>,
        /// Contact email (providing one allows follow-up contact)
        #[arg(long)]
        email: Option<String>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum StyleCommands {
    /// Create a new style
    #[command(alias = "add")]
    Create {
        /// Style name
        #[arg(short, long)]
        name: String,
        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Prompt template with {selected_text} placeholder (opens editor if omitted)
        #[arg(short, long)]
        prompt: Option<String>,
    },
    /// List custom styles
    #[command(alias = "ls")]
    List,
    /// Show style details
    Show {
        /// Style name, full ID, or ID prefix
        selector: String,
    },
    /// Edit a style
    Edit {
        /// Style name, full ID, or ID prefix
        selector: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New prompt template
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Delete a style
    #[command(alias = "rm")]
    Delete {
        /// Style name, full ID, or ID prefix
        selector: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove all custom styles
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show storage diagnostics
    Info,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, service_url, request_timeout_secs)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone().unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => commands::config::show(&output),
            ConfigCommands::Set { key, value } => commands::config::set(key, value, &output),
        };
    }

    let config = Config::load()?;
    let store = StyleStore::new(FileStore::new(config.storage_path()));

    match cli.command {
        Commands::Style { command } => match command {
            StyleCommands::Create {
                name,
                description,
                prompt,
            } => commands::style::create(&store, name, description, prompt, &output).await,
            StyleCommands::List => commands::style::list(&store, &output).await,
            StyleCommands::Show { selector } => {
                commands::style::show(&store, selector, &output).await
            }
            StyleCommands::Edit {
                selector,
                name,
                description,
                prompt,
            } => commands::style::edit(&store, selector, name, description, prompt, &output).await,
            StyleCommands::Delete { selector, yes } => {
                commands::style::delete(&store, selector, yes, &output).await
            }
            StyleCommands::Clear { yes } => commands::style::clear(&store, yes, &output).await,
            StyleCommands::Info => commands::style::info(&store, &output).await,
        },
        Commands::Styles => commands::style::catalog(&store, &output).await,
        Commands::Rewrite {
            text,
            grammar,
            tone,
            style,
            session,
        } => {
            let client = ServiceClient::new(&config)?;
            commands::rewrite::run(
                &store, &client, text, grammar, tone, style, session, &output,
            )
            .await
        }
        Commands::Feedback {
            rating,
            feedback_type,
            message,
            email,
        } => {
            let client = ServiceClient::new(&config)?;
            commands::feedback::run(&client, rating, feedback_type, message, email, &output).await
        }
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

/// Initialize logging to stderr
///
/// Controlled by the RESTYLE_LOG environment variable; defaults to warnings
/// only so normal command output stays clean.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RESTYLE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
