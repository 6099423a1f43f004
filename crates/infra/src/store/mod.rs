//! In-memory state: tenant-partitioned collections of products, sales and users.

pub mod state;
pub mod tenant_store;

pub use state::InventoryState;
pub use tenant_store::TenantStore;
