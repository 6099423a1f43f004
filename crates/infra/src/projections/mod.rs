//! Derived views over one organization's records.
//!
//! Views are recomputed on demand from tenant slices; nothing here is stored.

pub mod catalog;
pub mod dashboard;
pub mod sales_history;

pub use catalog::{CatalogQuery, filter_catalog, restock_alerts};
pub use dashboard::{DailyRevenue, Dashboard, ProductRevenue, TOP_PRODUCTS, revenue_by_day, top_products, total_revenue};
pub use sales_history::sales_history;
