use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bakery_catalog::ProductId;
use bakery_core::{Entity, RecordId, TenantId};

/// Sale identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub RecordId);

impl SaleId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(RecordId::new())
    }
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Quantity of one product sold by a tenant on one business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub date: NaiveDate,
    pub quantity: u32,
}

impl Sale {
    pub fn new(tenant_id: TenantId, product_id: ProductId, date: NaiveDate, quantity: u32) -> Self {
        Self {
            id: SaleId::generate(),
            tenant_id,
            product_id,
            date,
            quantity,
        }
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
