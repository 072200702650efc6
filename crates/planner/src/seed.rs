//! In-memory demo bakery.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tracing::info;

use bakery_catalog::{Product, ProductId};
use bakery_core::TenantId;
use bakery_display::{CaseDimensions, DisplayCase, DisplayCaseId};
use bakery_infra::{InMemoryCatalog, InMemoryLayoutStore, InMemorySalesLedger, InMemoryTenantStore, PlannerError};
use bakery_sales::Sale;

pub const DEMO_PRODUCTS: [&str; 20] = [
    "Baguette",
    "Croissant",
    "Brot",
    "Kuchen",
    "Muffin",
    "Keks",
    "Donut",
    "Bagel",
    "Brezel",
    "Tarte",
    "Ciabatta",
    "Focaccia",
    "Scone",
    "Pita",
    "Brioche",
    "Strudel",
    "Bauernbrot",
    "Kornspitz",
    "Streuselschnecke",
    "Laugenstange",
];

/// Days of sales history recorded per product.
pub const HISTORY_DAYS: u32 = 28;

/// The process-local stores the demo runs against.
#[derive(Debug, Default)]
pub struct Stores {
    pub cases: Arc<InMemoryTenantStore<DisplayCaseId, DisplayCase>>,
    pub catalog: Arc<InMemoryCatalog>,
    pub layouts: Arc<InMemoryLayoutStore>,
    pub sales: Arc<InMemorySalesLedger>,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct DemoBakery {
    pub tenant_id: TenantId,
    /// Not yet registered; the planner does that.
    pub case: DisplayCase,
    /// Last day with recorded sales.
    pub anchor: NaiveDate,
}

/// Fill `stores` with the demo catalog and `HISTORY_DAYS` days of sales
/// ending at `anchor`, and describe the demo display case.
///
/// Quantities are deterministic (0..=30 per product and day), so two runs with
/// the same anchor produce the same layouts.
pub fn seed_demo(stores: &Stores, anchor: NaiveDate) -> Result<DemoBakery, PlannerError> {
    let tenant_id = TenantId::new();

    let mut products = Vec::with_capacity(DEMO_PRODUCTS.len());
    for name in DEMO_PRODUCTS {
        let product = Product::new(tenant_id, ProductId::generate(), name)?;
        products.push(product.id_typed());
        stores.catalog.upsert(product)?;
    }

    let start = anchor
        .checked_sub_days(Days::new(u64::from(HISTORY_DAYS - 1)))
        .unwrap_or(anchor);
    let mut recorded = 0usize;
    for (day, date) in start.iter_days().take(HISTORY_DAYS as usize).enumerate() {
        for (idx, product_id) in products.iter().enumerate() {
            stores
                .sales
                .record(Sale::new(tenant_id, *product_id, date, demo_quantity(idx, day)))?;
            recorded += 1;
        }
    }

    let case = DisplayCase::new(
        tenant_id,
        DisplayCaseId::generate(),
        "Haupttheke",
        CaseDimensions::new(4, 5)?,
    )?
    .with_description("Zentrale Verkaufstheke");

    info!(
        tenant = %tenant_id,
        products = products.len(),
        sales = recorded,
        %anchor,
        "seeded demo bakery"
    );

    Ok(DemoBakery {
        tenant_id,
        case,
        anchor,
    })
}

fn demo_quantity(product: usize, day: usize) -> u32 {
    ((product * 17 + day * 11 + product * day) % 31) as u32
}
