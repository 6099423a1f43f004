//! Products domain module.
//!
//! This crate contains business rules for the product catalog (pricing,
//! categories, stock mutations), implemented purely as deterministic domain
//! logic (no IO, no storage).

pub mod category;
pub mod pricing;
pub mod product;

pub use category::{CATEGORIES, default_category, resolve_category};
pub use pricing::{resolve_selling_price, suggested_price};
pub use product::{
    AdjustStock, CatalogEntry, CreateProduct, Product, ProductCommand, ProductCreated,
    ProductDraft, ProductEvent, ProductId, ProductUpdated, StockAdjusted, StockWithdrawn,
    UpdateProduct, WithdrawStock,
};
