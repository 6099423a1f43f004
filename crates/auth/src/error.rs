use thiserror::Error;

use omnistock_core::DomainError;

/// Authentication and onboarding failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no account is registered for this email")]
    UnknownUser,

    #[error("this account is inactive")]
    InactiveUser,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("an organization code is required to join as an employee")]
    OrgCodeRequired,

    #[error("email is already registered")]
    EmailTaken,

    #[error("password must be at least {min} characters long")]
    WeakPassword { min: usize },

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
