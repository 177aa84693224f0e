//! Restyle Core Library
//!
//! This crate provides the core functionality for restyle, a manager for
//! user-defined text-rewrite styles backed by a local key-value store, plus
//! the wire contract of the remote rewriting service that applies them.
//!
//! # Architecture
//!
//! - **KeyValueStore**: async persistence capability; the whole style
//!   collection is one JSON value under a single key
//! - **StyleStore**: CRUD over the collection with validation and
//!   name-uniqueness enforced before every write
//! - **StyleLibrary**: reactive facade publishing state snapshots for
//!   presentation layers
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let store = StyleStore::new(FileStore::new(config.storage_path()));
//!
//! let style = store
//!     .add_style(&StyleDraft::new("Resume", "Resume phrasing", "Rewrite {selected_text} for a resume"))
//!     .await?;
//!
//! let styles = store.load_styles().await?;
//! ```
//!
//! # Modules
//!
//! - `store`: CRUD manager for custom styles (main entry point)
//! - `models`: style records, drafts and built-in tone presets
//! - `validation`: field rules, sanitization, name uniqueness
//! - `storage`: key-value persistence trait and implementations
//! - `library`: reactive facade over the store
//! - `api`: rewrite service and feedback wire contract
//! - `config`: application configuration

pub mod api;
pub mod config;
pub mod library;
pub mod models;
pub mod storage;
pub mod store;
pub mod validation;

pub use api::{
    FeedbackRequest, FeedbackResponse, ProcessTextRequest, ProcessTextResponse, RephraseStyle,
    RewriteAction,
};
pub use config::Config;
pub use library::{LibraryState, StyleLibrary};
pub use models::{BuiltinStyle, Style, StyleDraft, StylePatch, Tone, BUILTIN_STYLES};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use store::{StorageInfo, StoreError, StyleStore, STYLES_KEY};
pub use validation::{is_name_unique, sanitize, validate, Validation};
