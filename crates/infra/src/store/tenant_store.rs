use std::collections::BTreeMap;

use omnistock_core::{Entity, OrgCode};
use omnistock_events::TenantScoped;

/// Tenant-partitioned record collection.
///
/// Every record lives in the partition named by its own organization code,
/// and every keyed read or write names the partition it targets. A caller
/// holding one organization's code cannot observe or touch another's records.
///
/// Partitions keep insertion order, so append-only collections (sales) list
/// in the order they were recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantStore<V> {
    partitions: BTreeMap<OrgCode, Vec<V>>,
}

impl<V> Default for TenantStore<V> {
    fn default() -> Self {
        Self {
            partitions: BTreeMap::new(),
        }
    }
}

impl<V> TenantStore<V>
where
    V: Entity + TenantScoped,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from flat records, routing each one to its partition.
    pub fn from_records(records: impl IntoIterator<Item = V>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.upsert(record);
        }
        store
    }

    /// Insert a record, replacing the one with the same id in its partition.
    /// Returns the replaced record.
    pub fn upsert(&mut self, record: V) -> Option<V> {
        let partition = self.partitions.entry(record.org_code().clone()).or_default();
        match partition.iter_mut().find(|r| r.entity_id() == record.entity_id()) {
            Some(slot) => Some(std::mem::replace(slot, record)),
            None => {
                partition.push(record);
                None
            }
        }
    }

    pub fn get(&self, org_code: &OrgCode, id: &V::Id) -> Option<&V> {
        self.list(org_code).iter().find(|r| r.entity_id() == id)
    }

    pub fn get_mut(&mut self, org_code: &OrgCode, id: &V::Id) -> Option<&mut V> {
        self.partitions
            .get_mut(org_code)?
            .iter_mut()
            .find(|r| r.entity_id() == id)
    }

    pub fn remove(&mut self, org_code: &OrgCode, id: &V::Id) -> Option<V> {
        let partition = self.partitions.get_mut(org_code)?;
        let idx = partition.iter().position(|r| r.entity_id() == id)?;
        let removed = partition.remove(idx);
        if partition.is_empty() {
            self.partitions.remove(org_code);
        }
        Some(removed)
    }

    /// Records of one organization.
    pub fn list(&self, org_code: &OrgCode) -> &[V] {
        self.partitions.get(org_code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_tenant(&self, org_code: &OrgCode) -> bool {
        self.partitions.contains_key(org_code)
    }

    /// Cross-tenant lookup. Only identity resolution (sign-in / sign-up)
    /// should need this.
    pub fn find_across_tenants<P>(&self, predicate: P) -> Option<&V>
    where
        P: FnMut(&&V) -> bool,
    {
        self.records().find(predicate)
    }

    /// All records, partition by partition.
    pub fn records(&self) -> impl Iterator<Item = &V> {
        self.partitions.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        id: u32,
        org_code: OrgCode,
        body: &'static str,
    }

    impl Entity for Note {
        type Id = u32;

        fn entity_id(&self) -> &u32 {
            &self.id
        }
    }

    impl TenantScoped for Note {
        fn org_code(&self) -> &OrgCode {
            &self.org_code
        }
    }

    fn org(code: &str) -> OrgCode {
        OrgCode::parse(code).unwrap()
    }

    fn note(id: u32, code: &str, body: &'static str) -> Note {
        Note {
            id,
            org_code: org(code),
            body,
        }
    }

    #[test]
    fn reads_only_see_own_partition() {
        let store = TenantStore::from_records([
            note(1, "ORG-A", "a1"),
            note(2, "ORG-B", "b2"),
            note(3, "ORG-A", "a3"),
        ]);

        assert_eq!(store.list(&org("ORG-A")).len(), 2);
        assert_eq!(store.list(&org("ORG-B")).len(), 1);
        assert!(store.list(&org("ORG-C")).is_empty());

        assert!(store.get(&org("ORG-A"), &2).is_none());
        assert_eq!(store.get(&org("ORG-B"), &2).unwrap().body, "b2");
    }

    #[test]
    fn writes_cannot_reach_other_partitions() {
        let mut store = TenantStore::from_records([note(1, "ORG-A", "a1")]);

        assert!(store.get_mut(&org("ORG-B"), &1).is_none());
        assert!(store.remove(&org("ORG-B"), &1).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn upsert_replaces_in_place_and_keeps_order() {
        let mut store = TenantStore::from_records([note(1, "ORG-A", "first"), note(2, "ORG-A", "second")]);

        let replaced = store.upsert(note(1, "ORG-A", "edited")).unwrap();
        assert_eq!(replaced.body, "first");

        let bodies: Vec<_> = store.list(&org("ORG-A")).iter().map(|n| n.body).collect();
        assert_eq!(bodies, ["edited", "second"]);
    }

    #[test]
    fn removing_last_record_drops_the_tenant() {
        let mut store = TenantStore::from_records([note(1, "ORG-A", "a1")]);
        assert!(store.contains_tenant(&org("ORG-A")));

        store.remove(&org("ORG-A"), &1).unwrap();
        assert!(!store.contains_tenant(&org("ORG-A")));
        assert!(store.is_empty());
    }

    #[test]
    fn cross_tenant_lookup_scans_every_partition() {
        let store = TenantStore::from_records([note(1, "ORG-A", "a1"), note(2, "ORG-B", "b2")]);
        assert_eq!(store.find_across_tenants(|n| n.body == "b2").unwrap().id, 2);
    }
}
