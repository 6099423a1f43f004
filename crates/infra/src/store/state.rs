use omnistock_auth::User;
use omnistock_core::OrgCode;
use omnistock_products::Product;
use omnistock_sales::Sale;

use crate::persistence::{FORMAT_VERSION, Snapshot};
use crate::store::TenantStore;

/// Everything the engine knows, as one value.
///
/// Mutations work on a clone and are swapped in only after the clone has been
/// persisted, so a failed operation never leaves this half-updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryState {
    pub products: TenantStore<Product>,
    pub sales: TenantStore<Sale>,
    pub users: TenantStore<User>,
}

impl InventoryState {
    /// True when any record belongs to `org_code`.
    pub fn org_exists(&self, org_code: &OrgCode) -> bool {
        self.users.contains_tenant(org_code)
            || self.products.contains_tenant(org_code)
            || self.sales.contains_tenant(org_code)
    }

    /// Identity resolution: the one lookup that spans every organization.
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.find_across_tenants(|u| u.has_email(email))
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            format_version: FORMAT_VERSION,
            products: self.products.records().cloned().collect(),
            sales: self.sales.records().cloned().collect(),
            users: self.users.records().cloned().collect(),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            products: TenantStore::from_records(snapshot.products),
            sales: TenantStore::from_records(snapshot.sales),
            users: TenantStore::from_records(snapshot.users),
        }
    }
}
