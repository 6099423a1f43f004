//! `omnistock-ai`
//!
//! **Responsibility:** Optional AI subsystem boundary.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It does not depend on the product/sales aggregates; callers hand it
//!   plain snapshots.
//! - It never mutates domain state.
//! - It produces advisory text, not domain events.

pub mod generator;
pub mod job;
pub mod pricing;
pub mod result;
pub mod scheduler;

pub use generator::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, GeminiClient, GeminiConfig, TextGenerator,
};
pub use job::AiJob;
pub use pricing::{NO_SUGGESTIONS, PricingAdviceJob, PricingAdvisor, PricingSnapshot, UNAVAILABLE};
pub use result::{AiError, AiResult};
pub use scheduler::{AiScheduler, LocalAiScheduler};
