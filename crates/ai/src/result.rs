use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text produced by a model run. Shown to the user as-is; never fed back
/// into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResult {
    /// Empty when the model had nothing to say.
    pub text: String,
}

impl AiResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("rejected job: {0}")]
    InvalidInput(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("ai client error: {0}")]
    Internal(String),
}
