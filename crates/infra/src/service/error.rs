use thiserror::Error;

use omnistock_ai::AiError;
use omnistock_auth::{AuthError, AuthzError};
use omnistock_core::DomainError;

use crate::config::ConfigError;
use crate::persistence::PersistenceError;

/// Failure of a service operation. State is unchanged whenever one is returned.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not signed in")]
    NotAuthenticated,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ai(#[from] AiError),
}
