//! `omnistock-auth`: identity, credentials and authorization.
//!
//! This crate is decoupled from storage: lookups take the candidate users as
//! an iterator and tenant existence as a predicate.

pub mod authorize;
pub mod error;
pub mod login;
pub mod onboarding;
pub mod password;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::{AuthzError, Principal, authorize};
pub use error::AuthError;
pub use login::{authenticate, find_by_email};
pub use onboarding::{SignUp, resolve_signup_org};
pub use password::{CredentialHasher, HashingParams, MIN_PASSWORD_LEN};
pub use permissions::Permission;
pub use roles::Role;
pub use session::{Session, View};
pub use user::{
    ActivateUser, DeactivateUser, RegisterUser, User, UserActivated, UserCommand,
    UserDeactivated, UserEvent, UserRegistered,
};
