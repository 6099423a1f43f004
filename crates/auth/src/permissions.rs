use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "products.write").
/// The wildcard permission `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission::from_static("*");

    pub const DASHBOARD_READ: Permission = Permission::from_static("dashboard.read");
    pub const PRODUCTS_READ: Permission = Permission::from_static("products.read");
    pub const PRODUCTS_WRITE: Permission = Permission::from_static("products.write");
    pub const STOCK_READ: Permission = Permission::from_static("stock.read");
    pub const STOCK_ADJUST: Permission = Permission::from_static("stock.adjust");
    pub const SALES_READ: Permission = Permission::from_static("sales.read");
    pub const SALES_CREATE: Permission = Permission::from_static("sales.create");
    pub const USERS_READ: Permission = Permission::from_static("users.read");
    pub const USERS_WRITE: Permission = Permission::from_static("users.write");
    pub const PRICING_ADVISE: Permission = Permission::from_static("pricing.advise");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
