//! Infrastructure layer: state store, persistence, configuration, derived
//! views and the service facade.

pub mod config;
pub mod persistence;
pub mod projections;
pub mod seed;
pub mod service;
pub mod store;


pub use config::{ConfigError, OmniStockConfig};
pub use persistence::{InMemorySnapshotStore, JsonFileSnapshotStore, PersistenceError, Snapshot, SnapshotStore};
pub use service::{Confirmation, InventoryService, ProductForm, ServiceError, UserSummary, ViewData, bootstrap};
pub use store::{InventoryState, TenantStore};
