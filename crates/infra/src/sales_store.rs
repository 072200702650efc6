//! Sales ledger backing the demand forecaster.

use std::sync::RwLock;

use bakery_core::TenantId;
use bakery_forecast::{ForecastError, SalesHistory};
use bakery_sales::{Sale, SalesSummary, SalesWindow};

use crate::error::StoreError;

/// Append-only in-memory sales ledger for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySalesLedger {
    sales: RwLock<Vec<Sale>>,
}

impl InMemorySalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sale: Sale) -> Result<(), StoreError> {
        self.sales
            .write()
            .map_err(|_| StoreError::poisoned("sales ledger"))?
            .push(sale);
        Ok(())
    }

    /// Summed quantities for a tenant over `window`.
    pub fn summary(&self, tenant_id: TenantId, window: SalesWindow) -> Result<SalesSummary, StoreError> {
        let sales = self.sales.read().map_err(|_| StoreError::poisoned("sales ledger"))?;
        Ok(SalesSummary::from_sales(tenant_id, window, sales.iter()))
    }
}

impl SalesHistory for InMemorySalesLedger {
    fn sales_in(&self, tenant_id: TenantId, window: SalesWindow) -> Result<Vec<Sale>, ForecastError> {
        let sales = self
            .sales
            .read()
            .map_err(|_| ForecastError::Unavailable("sales ledger lock poisoned".to_string()))?;
        Ok(sales
            .iter()
            .filter(|s| s.tenant_id == tenant_id && window.contains(s.date))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakery_catalog::ProductId;
    use chrono::NaiveDate;

    #[test]
    fn history_is_filtered_by_tenant_and_window() {
        let ledger = InMemorySalesLedger::new();
        let t = TenantId::new();
        let p = ProductId::generate();
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();

        ledger.record(Sale::new(t, p, d(1), 4)).unwrap();
        ledger.record(Sale::new(t, p, d(9), 6)).unwrap();
        ledger.record(Sale::new(TenantId::new(), p, d(2), 99)).unwrap();

        let window = SalesWindow::new(d(1), d(7)).unwrap();
        let sales = ledger.sales_in(t, window).unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].quantity, 4);

        let summary = ledger.summary(t, SalesWindow::new(d(1), d(9)).unwrap()).unwrap();
        assert_eq!(summary.product_total(&p), 10);
    }
}
