use omnistock_core::OrgCode;

/// Helper trait for tenant-scoped records and messages.
///
/// Stores use it to route every record into the partition of the organization
/// it belongs to, so a record can never be filed under another tenant.
pub trait TenantScoped {
    fn org_code(&self) -> &OrgCode;
}
