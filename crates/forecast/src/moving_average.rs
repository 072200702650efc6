use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use bakery_core::TenantId;
use bakery_sales::{SalesSummary, SalesWindow};

use crate::forecaster::{DemandForecaster, SalesHistory};
use crate::result::{DemandForecast, ForecastError, PeriodEstimate};

/// Flat moving-average forecast from recorded sales.
///
/// Model:
/// - Take the `sampling_window` days ending at the anchor date (inclusive).
/// - Per product, average the daily quantity over that window (days without
///   sales count as zero).
/// - Project that average unchanged onto each of the `horizon` periods.
#[derive(Debug)]
pub struct MovingAverageForecaster<H> {
    history: Arc<H>,
    anchor: NaiveDate,
}

impl<H: SalesHistory> MovingAverageForecaster<H> {
    /// `anchor` is the last day of history considered (usually yesterday).
    pub fn new(history: Arc<H>, anchor: NaiveDate) -> Self {
        Self { history, anchor }
    }
}

impl<H: SalesHistory> DemandForecaster for MovingAverageForecaster<H> {
    fn forecast(
        &self,
        tenant_id: TenantId,
        horizon: u32,
        sampling_window: u32,
    ) -> Result<DemandForecast, ForecastError> {
        if horizon == 0 {
            return Err(ForecastError::InvalidInput(
                "horizon must be at least one period".to_string(),
            ));
        }

        let window = SalesWindow::ending_at(self.anchor, sampling_window)
            .map_err(|e| ForecastError::InvalidInput(e.to_string()))?;
        let sales = self.history.sales_in(tenant_id, window)?;
        let summary = SalesSummary::from_sales(tenant_id, window, &sales);

        let by_product: BTreeMap<_, _> = summary
            .product_totals()
            .map(|(id, _)| (id, summary.mean_daily(&id)))
            .collect();
        let total = by_product.values().sum::<f64>();

        let periods = (1..=horizon)
            .map(|period| PeriodEstimate {
                period,
                total,
                by_product: by_product.clone(),
            })
            .collect();

        Ok(DemandForecast {
            tenant_id,
            horizon,
            sampling_window,
            periods,
        })
    }
}
