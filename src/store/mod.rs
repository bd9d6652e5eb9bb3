//! Persistent record storage.
//!
//! The container never talks to a store directly; everything goes through
//! the [`RecordStore`] trait so the service can be exercised against the
//! embedded SQLite engine or an in-memory fake interchangeably.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::record::FinanceRecord;

mod memory;
mod sqlite;

pub use memory::InMemoryRecordStore;
pub use sqlite::SqliteRecordStore;

/// Errors raised by a store implementation.
///
/// These never cross the service boundary untranslated; the service maps
/// them into [`crate::error::RecordError`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// An addressed operation referenced an id the store does not hold.
    #[error("no record with id {0}")]
    UnknownId(i64),

    /// A persisted payload could not be decoded.
    #[error("stored payload is corrupt: {0}")]
    Corrupt(String),

    /// The embedded engine reported a failure.
    #[error("storage engine error: {0}")]
    Engine(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage medium could not be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Unclassified failure; translated to the unknown-error kind.
    #[error("{0}")]
    Other(String),
}

/// Initialization-time configuration for the on-disk store.
///
/// `namespace` selects the collection file inside `directory`, so several
/// independent data sets can live side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub directory: PathBuf,
    pub namespace: String,
}

impl StoreConfig {
    pub fn new(directory: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            namespace: namespace.into(),
        }
    }

    /// Path of the database file backing this namespace.
    pub fn db_path(&self) -> PathBuf {
        self.directory.join(format!("{}.db", self.namespace))
    }
}

/// Keyed, ordered persistence for finance records.
///
/// `add` assigns the id; `update`/`delete` address an existing id and fail
/// with [`StoreError::UnknownId`] when it is not present. `list_all`
/// returns records in store iteration order (ascending id), which is not a
/// contractual sort.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<FinanceRecord>, StoreError>;

    /// Persist a new record and return it with its assigned id.
    async fn add(&self, record: FinanceRecord) -> Result<FinanceRecord, StoreError>;

    /// Replace the record stored under `id` with `record`.
    async fn update(&self, id: i64, record: FinanceRecord) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Remove every record. Irreversible.
    async fn clear(&self) -> Result<(), StoreError>;
}
