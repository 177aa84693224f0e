//! Custom style store
//!
//! CRUD manager over the persisted style collection. The whole collection is
//! one value under a single storage key; every mutation loads it, applies the
//! change, revalidates, and writes it back. Mutations are serialized behind
//! an async mutex so two overlapping calls within one process cannot lose
//! each other's write. There is no rollback: if the persist fails after
//! validation, callers holding a mirror reconcile on their next load.
//!
//! ## Usage
//!
//! ```ignore
//! let store = StyleStore::new(FileStore::new(config.storage_path()));
//!
//! let style = store
//!     .add_style(&StyleDraft::new("Resume", "Resume phrasing", "Rewrite {selected_text} for a resume"))
//!     .await?;
//!
//! let styles = store.load_styles().await?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Style, StyleDraft, StylePatch};
use crate::storage::{KeyValueStore, StorageError};
use crate::validation::{is_name_unique, sanitize, validate};

/// Storage key holding the entire custom style collection
pub const STYLES_KEY: &str = "custom_rewrite_styles";

/// Errors returned by style store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// One or more field rules were violated; messages are display-safe
    #[error("Invalid style data: {}", .errors.join(", "))]
    Validation { errors: Vec<String> },

    /// Another style already uses this (normalized) name
    #[error("A style with the name \"{name}\" already exists")]
    DuplicateName { name: String },

    /// No style with the given id exists
    #[error("Style with ID \"{id}\" not found")]
    NotFound { id: Uuid },

    /// The underlying persistence read or write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Diagnostic snapshot of storage usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    /// Number of stored custom styles
    pub style_count: usize,
    /// Total keys in the underlying namespace, not just ours
    pub total_storage_keys: usize,
    /// Serialized size of the style collection, in bytes
    pub estimated_size: usize,
}

/// CRUD manager for custom rewrite styles
///
/// Constructed with the persistence capability injected, so tests can run
/// against `MemoryStore` and the CLI against `FileStore`.
pub struct StyleStore<S: KeyValueStore> {
    kv: S,
    /// Serializes each mutation's load-modify-store cycle
    write_guard: Mutex<()>,
}

impl<S: KeyValueStore> StyleStore<S> {
    /// Create a store over the given key-value persistence
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            write_guard: Mutex::new(()),
        }
    }

    /// Load the full style collection
    ///
    /// An absent key is the empty collection, not an error.
    pub async fn load_styles(&self) -> Result<Vec<Style>, StoreError> {
        match self.kv.get(STYLES_KEY).await? {
            None => Ok(Vec::new()),
            Some(value) => {
                let styles: Vec<Style> =
                    serde_json::from_value(value).map_err(|e| StorageError::InvalidFormat {
                        context: format!("key '{}'", STYLES_KEY),
                        details: e.to_string(),
                    })?;
                debug!(count = styles.len(), "loaded styles");
                Ok(styles)
            }
        }
    }

    /// Create a new style
    ///
    /// Sanitizes and validates the draft, checks name uniqueness against the
    /// freshly loaded collection, then persists the appended collection.
    pub async fn add_style(&self, draft: &StyleDraft) -> Result<Style, StoreError> {
        let _guard = self.write_guard.lock().await;

        let mut styles = self.load_styles().await?;
        let candidate = sanitize(draft, None);

        let validation = validate(&candidate);
        if !validation.is_valid() {
            return Err(StoreError::Validation {
                errors: validation.errors,
            });
        }

        if !is_name_unique(&candidate.name, &styles, None) {
            return Err(StoreError::DuplicateName {
                name: candidate.name,
            });
        }

        styles.push(candidate.clone());
        self.persist(&styles).await?;

        info!(name = %candidate.name, id = %candidate.id, "style added");
        Ok(candidate)
    }

    /// Update an existing style
    ///
    /// Merges the patch onto the current record, re-pinning id and creation
    /// time, then revalidates and persists. The uniqueness check excludes the
    /// style being updated so it may keep its own name.
    pub async fn update_style(&self, id: Uuid, patch: &StylePatch) -> Result<Style, StoreError> {
        let _guard = self.write_guard.lock().await;

        let mut styles = self.load_styles().await?;
        let pos = styles
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound { id })?;

        let draft = patch.apply_to(&styles[pos]);
        let updated = sanitize(&draft, Some(&styles[pos]));

        let validation = validate(&updated);
        if !validation.is_valid() {
            return Err(StoreError::Validation {
                errors: validation.errors,
            });
        }

        if !is_name_unique(&updated.name, &styles, Some(id)) {
            return Err(StoreError::DuplicateName { name: updated.name });
        }

        styles[pos] = updated.clone();
        self.persist(&styles).await?;

        info!(name = %updated.name, id = %updated.id, "style updated");
        Ok(updated)
    }

    /// Delete a style permanently
    pub async fn delete_style(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.write_guard.lock().await;

        let mut styles = self.load_styles().await?;
        if !styles.iter().any(|s| s.id == id) {
            return Err(StoreError::NotFound { id });
        }

        styles.retain(|s| s.id != id);
        self.persist(&styles).await?;

        info!(%id, "style deleted");
        Ok(true)
    }

    /// Look up a single style by id
    ///
    /// Absence is `None`, not an error.
    pub async fn get_style_by_id(&self, id: Uuid) -> Result<Option<Style>, StoreError> {
        let styles = self.load_styles().await?;
        Ok(styles.into_iter().find(|s| s.id == id))
    }

    /// Look up a single style by (normalized) name
    pub async fn get_style_by_name(&self, name: &str) -> Result<Option<Style>, StoreError> {
        let needle = name.trim().to_lowercase();
        let styles = self.load_styles().await?;
        Ok(styles
            .into_iter()
            .find(|s| s.name.trim().to_lowercase() == needle))
    }

    /// Remove every stored style
    pub async fn clear_all_styles(&self) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock().await;
        self.persist(&[]).await?;
        info!("all styles cleared");
        Ok(())
    }

    /// Report storage usage: style count, total namespace keys, and the
    /// serialized size of the collection
    pub async fn storage_info(&self) -> Result<StorageInfo, StoreError> {
        let styles = self.load_styles().await?;
        let total_storage_keys = self.kv.keys().await?.len();
        let estimated_size = serde_json::to_string(&styles)
            .map(|s| s.len())
            .unwrap_or(0);

        Ok(StorageInfo {
            style_count: styles.len(),
            total_storage_keys,
            estimated_size,
        })
    }

    async fn persist(&self, styles: &[Style]) -> Result<(), StoreError> {
        let value = serde_json::to_value(styles).map_err(|e| StorageError::InvalidFormat {
            context: format!("key '{}'", STYLES_KEY),
            details: e.to_string(),
        })?;
        self.kv.set(STYLES_KEY, value).await?;
        debug!(count = styles.len(), "styles saved to storage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore, StorageResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn store() -> StyleStore<MemoryStore> {
        StyleStore::new(MemoryStore::new())
    }

    fn resume_draft() -> StyleDraft {
        StyleDraft::new(
            "Resume",
            "desc",
            "Rewrite {selected_text} for a resume",
        )
    }

    #[tokio::test]
    async fn test_load_empty_store() {
        let store = store();
        assert!(store.load_styles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_round_trip() {
        let store = store();

        let created = store.add_style(&resume_draft()).await.unwrap();
        assert_eq!(created.name, "Resume");
        assert!(created.is_custom);

        let fetched = store.get_style_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_repeated_loads_are_identical() {
        let store = store();
        store.add_style(&resume_draft()).await.unwrap();

        let first = store.load_styles().await.unwrap();
        let second = store.load_styles().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft() {
        let store = store();
        let draft = StyleDraft::new("", "desc", "no placeholder here");

        let err = store.add_style(&draft).await.unwrap_err();
        match err {
            StoreError::Validation { errors } => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // Nothing was persisted
        assert!(store.load_styles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_name_case_insensitive() {
        let store = store();
        store.add_style(&resume_draft()).await.unwrap();

        let dup = StyleDraft::new("resume ", "other", "Fix {selected_text}");
        let err = store.add_style(&dup).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName { .. }));
        assert_eq!(store.load_styles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_preserves_identity() {
        let store = store();
        let created = store.add_style(&resume_draft()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let updated = store
            .update_style(created.id, &StylePatch::name("CV"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.last_modified > created.last_modified);
        assert_eq!(updated.name, "CV");
        // Unpatched fields survive
        assert_eq!(updated.prompt, created.prompt);
    }

    #[tokio::test]
    async fn test_update_can_keep_own_name() {
        let store = store();
        let created = store.add_style(&resume_draft()).await.unwrap();

        let updated = store
            .update_style(created.id, &StylePatch::description("new desc"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Resume");
        assert_eq!(updated.description, "new desc");
    }

    #[tokio::test]
    async fn test_update_rejects_name_taken_by_sibling() {
        let store = store();
        store.add_style(&resume_draft()).await.unwrap();
        let other = store
            .add_style(&StyleDraft::new("Cover Letter", "d", "Fix {selected_text}"))
            .await
            .unwrap();

        let err = store
            .update_style(other.id, &StylePatch::name("RESUME"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName { .. }));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = store();
        let err = store
            .update_style(Uuid::new_v4(), &StylePatch::name("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_patch() {
        let store = store();
        let created = store.add_style(&resume_draft()).await.unwrap();

        let err = store
            .update_style(created.id, &StylePatch::prompt("no placeholder"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));

        // Stored record unchanged
        let stored = store.get_style_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.prompt, created.prompt);
    }

    #[tokio::test]
    async fn test_delete_then_lookup_and_update() {
        let store = store();
        let created = store.add_style(&resume_draft()).await.unwrap();

        assert!(store.delete_style(created.id).await.unwrap());
        assert!(store.get_style_by_id(created.id).await.unwrap().is_none());

        let err = store
            .update_style(created.id, &StylePatch::name("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let store = store();
        let err = store.delete_style(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_then_clear_scenario() {
        let store = store();

        let created = store
            .add_style(&StyleDraft::new(
                "Resume",
                "desc",
                "Rewrite {selected_text} for a resume",
            ))
            .await
            .unwrap();
        assert!(created.is_custom);

        store.clear_all_styles().await.unwrap();
        assert!(store.load_styles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_style_by_name() {
        let store = store();
        let created = store.add_style(&resume_draft()).await.unwrap();

        let found = store.get_style_by_name(" resume ").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.get_style_by_name("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_info() {
        let store = store();
        store.add_style(&resume_draft()).await.unwrap();
        // An unrelated key in the same namespace counts toward total keys
        store.kv.set("other_setting", json!(true)).await.unwrap();

        let info = store.storage_info().await.unwrap();
        assert_eq!(info.style_count, 1);
        assert_eq!(info.total_storage_keys, 2);
        assert!(info.estimated_size > 2);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let store = std::sync::Arc::new(StyleStore::new(MemoryStore::new()));

        let a = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .add_style(&StyleDraft::new("One", "d", "Fix {selected_text}"))
                    .await
            })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .add_style(&StyleDraft::new("Two", "d", "Fix {selected_text}"))
                    .await
            })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();
        assert_eq!(store.load_styles().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_styles_survive_reopen_with_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("styles.json");
        let created;

        {
            let store = StyleStore::new(FileStore::new(&path));
            created = store.add_style(&resume_draft()).await.unwrap();
        }

        let store = StyleStore::new(FileStore::new(&path));
        let styles = store.load_styles().await.unwrap();
        assert_eq!(styles, vec![created]);
    }

    /// Store whose writes always fail, for error-propagation tests
    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> StorageResult<Option<Value>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: Value) -> StorageResult<()> {
            Err(StorageError::WriteError {
                path: "/dev/null".into(),
                source: std::io::Error::other("injected failure"),
            })
        }

        async fn keys(&self) -> StorageResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_as_storage_error() {
        let store = StyleStore::new(FailingStore);
        let err = store.add_style(&resume_draft()).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(err.to_string().contains("Storage error"));
    }
}
