use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use bakery_core::TenantId;

use crate::error::StoreError;

/// Tenant-isolated key/value store for long-lived records (id -> record).
///
/// Every read and write names its tenant; a key of one tenant is invisible to
/// every other tenant.
pub trait TenantStore<K, V>: Send + Sync {
    fn get(&self, tenant_id: TenantId, key: &K) -> Result<Option<V>, StoreError>;
    fn upsert(&self, tenant_id: TenantId, key: K, value: V) -> Result<(), StoreError>;
    /// All records of a tenant, in key order.
    fn list(&self, tenant_id: TenantId) -> Result<Vec<V>, StoreError>;
}

impl<K, V, S> TenantStore<K, V> for Arc<S>
where
    S: TenantStore<K, V> + ?Sized,
{
    fn get(&self, tenant_id: TenantId, key: &K) -> Result<Option<V>, StoreError> {
        (**self).get(tenant_id, key)
    }

    fn upsert(&self, tenant_id: TenantId, key: K, value: V) -> Result<(), StoreError> {
        (**self).upsert(tenant_id, key, value)
    }

    fn list(&self, tenant_id: TenantId) -> Result<Vec<V>, StoreError> {
        (**self).list(tenant_id)
    }
}

/// In-memory tenant-isolated store for tests/dev.
#[derive(Debug)]
pub struct InMemoryTenantStore<K, V> {
    inner: RwLock<BTreeMap<(TenantId, K), V>>,
}

impl<K, V> InMemoryTenantStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryTenantStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TenantStore<K, V> for InMemoryTenantStore<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, tenant_id: TenantId, key: &K) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::poisoned("tenant store"))?;
        Ok(map.get(&(tenant_id, key.clone())).cloned())
    }

    fn upsert(&self, tenant_id: TenantId, key: K, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::poisoned("tenant store"))?;
        map.insert((tenant_id, key), value);
        Ok(())
    }

    fn list(&self, tenant_id: TenantId) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::poisoned("tenant store"))?;
        Ok(map
            .iter()
            .filter_map(|((t, _k), v)| if *t == tenant_id { Some(v.clone()) } else { None })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenants_are_isolated() {
        let store: InMemoryTenantStore<u32, &'static str> = InMemoryTenantStore::new();
        let a = TenantId::new();
        let b = TenantId::new();

        store.upsert(a, 1, "a1").unwrap();
        store.upsert(b, 1, "b1").unwrap();

        assert_eq!(store.get(a, &1).unwrap(), Some("a1"));
        assert_eq!(store.get(b, &1).unwrap(), Some("b1"));
        assert_eq!(store.list(a).unwrap(), vec!["a1"]);
    }

    #[test]
    fn list_is_key_ordered_and_upsert_replaces() {
        let store: InMemoryTenantStore<u32, &'static str> = InMemoryTenantStore::new();
        let t = TenantId::new();

        store.upsert(t, 3, "three").unwrap();
        store.upsert(t, 1, "one").unwrap();
        store.upsert(t, 3, "THREE").unwrap();

        assert_eq!(store.list(t).unwrap(), vec!["one", "THREE"]);
        assert_eq!(store.get(t, &2).unwrap(), None);
    }

    #[test]
    fn arc_forwards() {
        let store = Arc::new(InMemoryTenantStore::<u32, u32>::new());
        let t = TenantId::new();
        TenantStore::upsert(&store, t, 1, 10).unwrap();
        assert_eq!(TenantStore::get(&store, t, &1).unwrap(), Some(10));
    }
}
