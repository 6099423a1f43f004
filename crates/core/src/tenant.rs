//! Organization code: the multi-tenant boundary.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

const GENERATED_PREFIX: &str = "ORG-";
const GENERATED_LEN: usize = 6;
const GENERATED_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Organization code that ties users, products and sales to one tenant.
///
/// Always trimmed, upper-cased and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrgCode(String);

impl OrgCode {
    /// Normalize user input into an org code.
    ///
    /// Returns `None` for blank input so callers can decide what "no code" means
    /// (admins mint a new tenant, employees are rejected).
    pub fn normalize(raw: &str) -> Option<Self> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() { None } else { Some(Self(code)) }
    }

    /// Parse an org code, rejecting blank input.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        Self::normalize(raw).ok_or_else(|| DomainError::validation("organization code cannot be empty"))
    }

    /// Mint a random `ORG-XXXXXX` code.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let suffix: String = (0..GENERATED_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..GENERATED_ALPHABET.len());
                char::from(GENERATED_ALPHABET[idx])
            })
            .collect();
        Self(format!("{GENERATED_PREFIX}{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrgCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrgCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrgCode> for String {
    fn from(value: OrgCode) -> Self {
        value.0
    }
}
