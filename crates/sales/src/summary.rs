use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use bakery_catalog::ProductId;
use bakery_core::{DomainError, DomainResult, TenantId};

use crate::sale::Sale;

/// Inclusive range of business days.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl SalesWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(format!(
                "sales window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days` business days ending at (and including) `end`.
    pub fn ending_at(end: NaiveDate, days: u32) -> DomainResult<Self> {
        if days == 0 {
            return Err(DomainError::validation("sales window must span at least one day"));
        }
        let start = end
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| DomainError::validation("sales window start out of range"))?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered (always >= 1).
    pub fn days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }
}

/// Sums of sold quantities for one tenant over a window.
///
/// Sales of other tenants and sales outside the window are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub tenant_id: TenantId,
    pub window: SalesWindow,
    by_product: BTreeMap<ProductId, u64>,
    by_day: BTreeMap<NaiveDate, u64>,
}

impl SalesSummary {
    pub fn from_sales<'a>(
        tenant_id: TenantId,
        window: SalesWindow,
        sales: impl IntoIterator<Item = &'a Sale>,
    ) -> Self {
        let mut by_product: BTreeMap<ProductId, u64> = BTreeMap::new();
        let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();

        for sale in sales {
            if sale.tenant_id != tenant_id || !window.contains(sale.date) {
                continue;
            }
            *by_product.entry(sale.product_id).or_default() += u64::from(sale.quantity);
            *by_day.entry(sale.date).or_default() += u64::from(sale.quantity);
        }

        Self {
            tenant_id,
            window,
            by_product,
            by_day,
        }
    }

    pub fn total(&self) -> u64 {
        self.by_product.values().sum()
    }

    pub fn product_total(&self, product_id: &ProductId) -> u64 {
        self.by_product.get(product_id).copied().unwrap_or(0)
    }

    pub fn daily_total(&self, date: NaiveDate) -> u64 {
        self.by_day.get(&date).copied().unwrap_or(0)
    }

    /// Mean quantity per day of the window; days without sales count as zero.
    pub fn mean_daily(&self, product_id: &ProductId) -> f64 {
        self.product_total(product_id) as f64 / f64::from(self.window.days())
    }

    /// Per-product totals in product id order.
    pub fn product_totals(&self) -> impl Iterator<Item = (ProductId, u64)> + '_ {
        self.by_product.iter().map(|(id, qty)| (*id, *qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn window_ending_at_counts_inclusive_days() {
        let w = SalesWindow::ending_at(day(28), 28).unwrap();
        assert_eq!(w.start(), day(1));
        assert_eq!(w.days(), 28);
        assert!(w.contains(day(1)));
        assert!(!w.contains(day(29)));
    }

    #[test]
    fn window_rejects_zero_days_and_inverted_bounds() {
        assert!(SalesWindow::ending_at(day(5), 0).is_err());
        assert!(SalesWindow::new(day(5), day(4)).is_err());
    }

    #[test]
    fn summary_sums_per_product_and_day() {
        let tenant = TenantId::new();
        let bread = ProductId::generate();
        let pastry = ProductId::generate();
        let sales = vec![
            Sale::new(tenant, bread, day(1), 10),
            Sale::new(tenant, bread, day(2), 20),
            Sale::new(tenant, pastry, day(2), 5),
        ];

        let s = SalesSummary::from_sales(tenant, SalesWindow::new(day(1), day(2)).unwrap(), &sales);

        assert_eq!(s.total(), 35);
        assert_eq!(s.product_total(&bread), 30);
        assert_eq!(s.product_total(&pastry), 5);
        assert_eq!(s.daily_total(day(2)), 25);
        assert_eq!(s.mean_daily(&bread), 15.0);
    }

    #[test]
    fn summary_ignores_other_tenants_and_out_of_window_sales() {
        let tenant = TenantId::new();
        let other = TenantId::new();
        let bread = ProductId::generate();
        let sales = vec![
            Sale::new(tenant, bread, day(3), 7),
            Sale::new(other, bread, day(3), 100),
            Sale::new(tenant, bread, day(10), 100),
        ];

        let s = SalesSummary::from_sales(tenant, SalesWindow::new(day(1), day(5)).unwrap(), &sales);

        assert_eq!(s.total(), 7);
        assert_eq!(s.mean_daily(&bread), 7.0 / 5.0);
    }

    #[test]
    fn unknown_product_has_zero_totals() {
        let s = SalesSummary::from_sales(
            TenantId::new(),
            SalesWindow::ending_at(day(7), 7).unwrap(),
            &[],
        );
        assert_eq!(s.product_total(&ProductId::generate()), 0);
        assert_eq!(s.mean_daily(&ProductId::generate()), 0.0);
    }
}
