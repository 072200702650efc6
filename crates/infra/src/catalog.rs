//! Catalog provider: a tenant's products in a stable order.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use bakery_catalog::{Product, ProductId};
use bakery_core::{Entity, TenantId};

use crate::error::StoreError;

/// Read access to tenant catalogs.
///
/// `products_for_tenant` must return the same order on every call for an
/// unchanged catalog; the scheduler breaks priority ties by that order.
pub trait CatalogProvider: Send + Sync {
    fn products_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Product>, StoreError>;
    fn product(&self, tenant_id: TenantId, product_id: &ProductId) -> Result<Option<Product>, StoreError>;
}

impl<S> CatalogProvider for Arc<S>
where
    S: CatalogProvider + ?Sized,
{
    fn products_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Product>, StoreError> {
        (**self).products_for_tenant(tenant_id)
    }

    fn product(&self, tenant_id: TenantId, product_id: &ProductId) -> Result<Option<Product>, StoreError> {
        (**self).product(tenant_id, product_id)
    }
}

/// In-memory catalog keeping insertion order per tenant.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<HashMap<TenantId, Vec<Product>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, or replace it in place if its id is already known (the
    /// entry keeps its position).
    pub fn upsert(&self, product: Product) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::poisoned("catalog"))?;
        let entries = map.entry(product.tenant_id()).or_default();
        match entries.iter_mut().find(|p| p.id() == product.id()) {
            Some(existing) => *existing = product,
            None => entries.push(product),
        }
        Ok(())
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn products_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Product>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::poisoned("catalog"))?;
        Ok(map.get(&tenant_id).cloned().unwrap_or_default())
    }

    fn product(&self, tenant_id: TenantId, product_id: &ProductId) -> Result<Option<Product>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::poisoned("catalog"))?;
        Ok(map
            .get(&tenant_id)
            .and_then(|entries| entries.iter().find(|p| p.id() == product_id))
            .cloned())
    }
}
