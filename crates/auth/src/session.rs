//! Signed-in session and the view it is looking at.
//!
//! Sessions are ephemeral: they are never persisted, so every boot starts
//! signed out.

use serde::{Deserialize, Serialize};

use crate::{AuthzError, Permission, Principal, authorize};

/// Application views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Products,
    Sales,
    Stock,
    Users,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Products,
        View::Sales,
        View::Stock,
        View::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Products => "products",
            View::Sales => "sales",
            View::Stock => "stock",
            View::Users => "users",
        }
    }

    /// Permission needed to open this view.
    pub fn required_permission(&self) -> Permission {
        match self {
            View::Dashboard => Permission::DASHBOARD_READ,
            View::Products => Permission::PRODUCTS_READ,
            View::Sales => Permission::SALES_READ,
            View::Stock => Permission::STOCK_READ,
            View::Users => Permission::USERS_READ,
        }
    }
}

impl core::fmt::Display for View {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for View {
    type Err = omnistock_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| omnistock_core::DomainError::validation(format!("unknown view '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    principal: Principal,
    view: View,
}

impl Session {
    /// Open a session on the principal's landing view.
    pub fn start(principal: Principal) -> Self {
        let view = principal.role.landing_view();
        Self { principal, view }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switch view. The current view is kept when the role may not see `view`.
    pub fn navigate(&mut self, view: View) -> Result<(), AuthzError> {
        authorize(&self.principal, &view.required_permission())?;
        self.view = view;
        Ok(())
    }
}
