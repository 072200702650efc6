use bakery_core::TenantId;
use bakery_sales::{Sale, SalesWindow};

use crate::result::{DemandForecast, ForecastError};

/// Source of per-period demand estimates for a tenant.
///
/// `horizon` is the number of future periods to estimate, `sampling_window`
/// the number of past periods the model may look at.
pub trait DemandForecaster: Send + Sync + 'static {
    fn forecast(
        &self,
        tenant_id: TenantId,
        horizon: u32,
        sampling_window: u32,
    ) -> Result<DemandForecast, ForecastError>;
}

/// Read access to recorded sales (implemented by storage adapters).
pub trait SalesHistory: Send + Sync + 'static {
    /// All sales of `tenant_id` dated inside `window`.
    fn sales_in(&self, tenant_id: TenantId, window: SalesWindow) -> Result<Vec<Sale>, ForecastError>;
}
