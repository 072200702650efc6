//! Regeneration service (application-level orchestration).
//!
//! ```text
//! regenerate(tenant, case)
//!   ↓
//! 1. Take the case's regeneration lock
//!   ↓
//! 2. Load the case (tenant-scoped)
//!   ↓
//! 3. Load the tenant catalog, pick a ranking (forecast-weighted if configured)
//!   ↓
//! 4. Generate every configuration of the roster (pure, all-or-nothing)
//!   ↓
//! 5. Publish the new set with one `replace_case` call
//! ```
//!
//! Nothing is published unless step 4 succeeds for every label. If step 5
//! fails, the previous set stays published and the generated configurations
//! travel back to the caller inside [`PlannerError::PersistFailed`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use bakery_core::{Entity, TenantId};
use bakery_display::{
    Configuration, ConfigurationScheduler, DisplayCase, DisplayCaseId, FillPolicy, RankingStrategy,
};
use bakery_forecast::DemandForecaster;

use crate::catalog::CatalogProvider;
use crate::config::{PlannerConfig, RankingMode};
use crate::error::PlannerError;
use crate::layout_store::{CaseLayouts, ConfigurationRepository};
use crate::locks::{CaseLocks, acquire};
use crate::read_model::TenantStore;

/// Owns the write side: case registration and layout regeneration.
///
/// Regenerations of one case are serialized through [`CaseLocks`]; different
/// cases regenerate in parallel. Readers go through the repository and are
/// never blocked by a regeneration in progress.
pub struct PlannerService<S, C, R> {
    cases: S,
    catalog: C,
    layouts: R,
    config: PlannerConfig,
    locks: CaseLocks,
    forecaster: Option<Arc<dyn DemandForecaster>>,
}

impl<S, C, R> PlannerService<S, C, R>
where
    S: TenantStore<DisplayCaseId, DisplayCase>,
    C: CatalogProvider,
    R: ConfigurationRepository,
{
    pub fn new(cases: S, catalog: C, layouts: R, config: PlannerConfig) -> Self {
        Self {
            cases,
            catalog,
            layouts,
            config,
            locks: CaseLocks::new(),
            forecaster: None,
        }
    }

    /// Attach a demand forecaster, used when the config asks for
    /// demand-weighted ranking.
    pub fn with_forecaster(mut self, forecaster: Arc<dyn DemandForecaster>) -> Self {
        self.forecaster = Some(forecaster);
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Store (or replace) a case record. The grid size is checked up front so
    /// a degenerate case never reaches the store. Holds the case lock, so a
    /// regeneration never publishes from a record replaced while it ran.
    pub fn register_case(&self, case: DisplayCase) -> Result<(), PlannerError> {
        let dimensions = case.dimensions()?;
        let lock = self.locks.handle(case.id_typed())?;
        let _guard = acquire(&lock);
        info!(
            tenant = %case.tenant_id(),
            case = %case.id_typed(),
            rows = dimensions.rows(),
            columns = dimensions.columns(),
            layout = %case.layout_type(),
            "registering display case"
        );
        self.cases.upsert(case.tenant_id(), case.id_typed(), case)?;
        Ok(())
    }

    /// Regenerate a case for the configured roster and fill policy.
    pub fn regenerate(
        &self,
        tenant_id: TenantId,
        case_id: DisplayCaseId,
    ) -> Result<Arc<CaseLayouts>, PlannerError> {
        self.regenerate_with(
            tenant_id,
            case_id,
            self.config.time_roster.as_slice(),
            &self.config.fill_policy,
        )
    }

    /// Regenerate a case for an explicit roster and policy.
    ///
    /// The returned snapshot is what readers see from now on. The published
    /// set is replaced as a whole: labels missing from `roster` disappear.
    pub fn regenerate_with<L>(
        &self,
        tenant_id: TenantId,
        case_id: DisplayCaseId,
        roster: &[L],
        policy: &FillPolicy,
    ) -> Result<Arc<CaseLayouts>, PlannerError>
    where
        L: AsRef<str>,
    {
        let lock = self.locks.handle(case_id)?;
        let _guard = acquire(&lock);

        let case = self.load_case(tenant_id, case_id)?;
        let catalog = self.catalog.products_for_tenant(tenant_id)?;
        let ranking = self.ranking_for(tenant_id);
        debug!(
            tenant = %tenant_id,
            case = %case_id,
            products = catalog.len(),
            labels = roster.len(),
            ranking = ranking.name(),
            "generating configurations"
        );

        let configurations = ConfigurationScheduler::new(policy.clone())
            .with_ranking(ranking)
            .generate(&case, roster, &catalog)?;

        self.publish_locked(tenant_id, case_id, configurations)
    }

    /// Publish configurations that were generated earlier but failed to
    /// persist (see [`PlannerError::PersistFailed`]).
    pub fn publish(
        &self,
        tenant_id: TenantId,
        case_id: DisplayCaseId,
        configurations: Vec<Configuration>,
    ) -> Result<Arc<CaseLayouts>, PlannerError> {
        let lock = self.locks.handle(case_id)?;
        let _guard = acquire(&lock);

        self.load_case(tenant_id, case_id)?;
        if let Some(foreign) = configurations.iter().find(|c| c.tenant_id() != tenant_id) {
            return Err(PlannerError::not_found(format!("configuration {}", foreign.id_typed())));
        }
        self.publish_locked(tenant_id, case_id, configurations)
    }

    fn publish_locked(
        &self,
        tenant_id: TenantId,
        case_id: DisplayCaseId,
        configurations: Vec<Configuration>,
    ) -> Result<Arc<CaseLayouts>, PlannerError> {
        match self.layouts.replace_case(case_id, &configurations) {
            Ok(snapshot) => {
                info!(
                    tenant = %tenant_id,
                    case = %case_id,
                    configurations = snapshot.len(),
                    filled = snapshot.iter().map(|c| c.filled_count()).sum::<usize>(),
                    "published case layouts"
                );
                Ok(snapshot)
            }
            Err(source) => {
                warn!(
                    tenant = %tenant_id,
                    case = %case_id,
                    error = %source,
                    "publishing case layouts failed; previous layouts stay in place"
                );
                Err(PlannerError::PersistFailed {
                    source,
                    pending: configurations,
                })
            }
        }
    }

    fn load_case(&self, tenant_id: TenantId, case_id: DisplayCaseId) -> Result<DisplayCase, PlannerError> {
        self.cases
            .get(tenant_id, &case_id)?
            .ok_or_else(|| PlannerError::not_found(format!("display case {case_id}")))
    }

    /// Demand-weighted ranking when configured and a forecast is available,
    /// otherwise static priority. A failing forecast never fails regeneration.
    fn ranking_for(&self, tenant_id: TenantId) -> RankingStrategy {
        if self.config.ranking != RankingMode::DemandWeighted {
            return RankingStrategy::StaticPriority;
        }
        let Some(forecaster) = &self.forecaster else {
            warn!(
                tenant = %tenant_id,
                "demand-weighted ranking configured without a forecaster; using priority ranks"
            );
            return RankingStrategy::StaticPriority;
        };

        match forecaster.forecast(
            tenant_id,
            self.config.forecast_horizon_days,
            self.config.sampling_window_days,
        ) {
            Ok(forecast) => RankingStrategy::DemandWeighted(forecast.product_demand()),
            Err(error) => {
                warn!(
                    tenant = %tenant_id,
                    error = %error,
                    "demand forecast failed; using priority ranks"
                );
                RankingStrategy::StaticPriority
            }
        }
    }
}
