//! Snapshot persistence: the whole state as one JSON document.

pub mod json_file;
pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use omnistock_auth::User;
use omnistock_products::Product;
use omnistock_sales::Sale;

pub use json_file::JsonFileSnapshotStore;
pub use memory::InMemorySnapshotStore;

/// Version of the persisted document layout.
pub const FORMAT_VERSION: u32 = 1;

/// Persisted form of the state. The session is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

/// Where snapshots are loaded from and saved to.
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved snapshot. `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError>;

    /// Replace the saved snapshot. Either the whole snapshot is written or
    /// the previous one is kept.
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}

impl<S> SnapshotStore for std::sync::Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        (**self).save(snapshot)
    }
}
