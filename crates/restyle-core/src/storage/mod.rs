//! Storage layer
//!
//! An abstract async key-value capability plus its file-backed and
//! in-memory implementations. The style store persists the whole style
//! collection as one JSON value under a single key; atomic file writes keep
//! the namespace consistent across crashes.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
