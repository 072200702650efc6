use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bakery_catalog::ProductId;
use bakery_core::TenantId;

/// Estimated demand for one future period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEstimate {
    /// 1-based offset from the forecast anchor.
    pub period: u32,
    pub total: f64,
    pub by_product: BTreeMap<ProductId, f64>,
}

/// Output of a forecaster: one estimate per future period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub tenant_id: TenantId,
    pub horizon: u32,
    pub sampling_window: u32,
    pub periods: Vec<PeriodEstimate>,
}

impl DemandForecast {
    /// Tenant-level estimate per period.
    pub fn estimates(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.total).collect()
    }

    /// Demand per product summed over the whole horizon.
    pub fn product_demand(&self) -> BTreeMap<ProductId, f64> {
        let mut out: BTreeMap<ProductId, f64> = BTreeMap::new();
        for period in &self.periods {
            for (id, qty) in &period.by_product {
                *out.entry(*id).or_default() += qty;
            }
        }
        out
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("invalid forecast input: {0}")]
    InvalidInput(String),

    #[error("forecast source unavailable: {0}")]
    Unavailable(String),
}
