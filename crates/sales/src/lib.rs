//! Sales domain module.
//!
//! Sales are append-only records. Recording one also withdraws stock from the
//! sold product, so both live behind a single domain function
//! (`register_sale`) that either produces the sale and the stock change or
//! leaves everything untouched.

pub mod sale;

pub use sale::{RegisterSale, Sale, SaleId, SaleRecorded, register_sale};
