//! Sign-up: which organization a new account joins.

use rand::Rng;

use omnistock_core::OrgCode;

use crate::{AuthError, Role};

/// Sign-up form.
#[derive(Clone)]
pub struct SignUp {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
    /// Organization to join. Blank means "create a new one" (admins only).
    pub org_code: Option<String>,
}

impl core::fmt::Debug for SignUp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SignUp")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("org_code", &self.org_code)
            .finish_non_exhaustive()
    }
}

/// Decide the organization for a new account.
///
/// - A supplied code is normalized and used as-is.
/// - An admin without a code founds a new organization with a freshly minted
///   `ORG-XXXXXX` code that no existing tenant uses.
/// - An employee without a code is rejected.
pub fn resolve_signup_org<R, F>(
    role: Role,
    requested: Option<&str>,
    rng: &mut R,
    tenant_exists: F,
) -> Result<OrgCode, AuthError>
where
    R: Rng + ?Sized,
    F: Fn(&OrgCode) -> bool,
{
    if let Some(code) = requested.and_then(OrgCode::normalize) {
        if role == Role::Employee && !tenant_exists(&code) {
            tracing::warn!(org_code = %code, "employee joining an organization with no members yet");
        }
        return Ok(code);
    }

    match role {
        Role::Employee => Err(AuthError::OrgCodeRequired),
        Role::Admin => loop {
            let code = OrgCode::generate(rng);
            if !tenant_exists(&code) {
                return Ok(code);
            }
            tracing::debug!(org_code = %code, "generated org code collides, retrying");
        },
    }
}
