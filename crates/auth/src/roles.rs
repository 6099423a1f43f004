use serde::{Deserialize, Serialize};

use crate::Permission;
use crate::session::View;

/// Role of a user inside its organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// Permissions granted by this role.
    ///
    /// Employees work the shop floor: they browse the catalog and record
    /// sales. Everything else (pricing, stock corrections, staff, the
    /// dashboard) is reserved to admins.
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Role::Admin => vec![Permission::WILDCARD],
            Role::Employee => vec![
                Permission::PRODUCTS_READ,
                Permission::SALES_READ,
                Permission::SALES_CREATE,
            ],
        }
    }

    /// View shown right after signing in.
    pub fn landing_view(&self) -> View {
        match self {
            Role::Admin => View::Dashboard,
            Role::Employee => View::Products,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = omnistock_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "EMPLOYEE" => Ok(Role::Employee),
            other => Err(omnistock_core::DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}
