use std::sync::Arc;

use anyhow::Context;
use chrono::{Days, Utc};

use bakery_forecast::MovingAverageForecaster;
use bakery_infra::{PlannerConfig, PlannerService, QueryFacade};
use bakery_observability::LogFormat;
use bakery_planner::seed::{Stores, seed_demo};

fn main() -> anyhow::Result<()> {
    let format = std::env::var("BAKERY_LOG_FORMAT")
        .map(|name| LogFormat::from_name(&name))
        .unwrap_or_default();
    bakery_observability::tracing::init(format);

    let config = PlannerConfig::from_env().context("loading planner config")?;
    tracing::info!(
        labels = config.time_roster.len(),
        ranking = ?config.ranking,
        "planner config loaded"
    );

    let today = Utc::now().date_naive();
    let anchor = today.checked_sub_days(Days::new(1)).unwrap_or(today);

    let stores = Stores::new();
    let demo = seed_demo(&stores, anchor).context("seeding demo bakery")?;
    let case_id = demo.case.id_typed();

    let forecaster = MovingAverageForecaster::new(Arc::clone(&stores.sales), demo.anchor);
    let planner = PlannerService::new(
        Arc::clone(&stores.cases),
        Arc::clone(&stores.catalog),
        Arc::clone(&stores.layouts),
        config,
    )
    .with_forecaster(Arc::new(forecaster));

    planner.register_case(demo.case)?;
    planner
        .regenerate(demo.tenant_id, case_id)
        .with_context(|| format!("regenerating display case {case_id}"))?;

    let facade = QueryFacade::new(stores.cases, stores.catalog, stores.layouts);
    let output = serde_json::json!({
        "cases": facade.list_cases(demo.tenant_id)?,
        "catalog": facade.catalog_entries(demo.tenant_id)?,
        "case": facade.case_detail(demo.tenant_id, case_id)?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
