//! Configuration scheduler: turns a case, a time roster and a catalog into one
//! fully populated configuration per label.
//!
//! Allocation, per label:
//! 1. `fill = min(policy target, rows * columns, |catalog|)`
//! 2. rank the catalog (see [`RankingStrategy`])
//! 3. place the top `fill` products row-major from `(0, 0)`
//! 4. leave every remaining cell empty
//!
//! The result depends only on the inputs, so regenerating with an unchanged
//! catalog and policy reproduces the previous layout exactly.

use std::collections::HashSet;

use serde_json::json;

use bakery_catalog::Product;
use bakery_core::Entity;

use crate::configuration::Configuration;
use crate::error::LayoutError;
use crate::policy::FillPolicy;
use crate::ranking::RankingStrategy;
use crate::time_label::TimeLabel;
use crate::topology::DisplayCase;

/// Allocation settings: fill policy + ranking strategy.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationScheduler {
    policy: FillPolicy,
    ranking: RankingStrategy,
}

impl ConfigurationScheduler {
    pub fn new(policy: FillPolicy) -> Self {
        Self {
            policy,
            ranking: RankingStrategy::StaticPriority,
        }
    }

    pub fn with_ranking(mut self, ranking: RankingStrategy) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn policy(&self) -> &FillPolicy {
        &self.policy
    }

    pub fn ranking(&self) -> &RankingStrategy {
        &self.ranking
    }

    /// Generate one configuration per roster label, in roster order.
    ///
    /// Fails without producing anything if the case size is degenerate, the
    /// roster is empty or repeats a label, or a catalog entry belongs to
    /// another tenant. An empty catalog is fine: every slot stays empty.
    pub fn generate<I>(
        &self,
        case: &DisplayCase,
        labels: I,
        catalog: &[Product],
    ) -> Result<Vec<Configuration>, LayoutError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let dimensions = case.dimensions()?;
        let roster = parse_roster(labels)?;

        if let Some(foreign) = catalog.iter().find(|p| p.tenant_id() != case.tenant_id()) {
            return Err(LayoutError::TenantMismatch {
                product_id: *foreign.id(),
            });
        }

        let ranked = self.ranking.rank(catalog);
        let cells = dimensions.cells();

        roster
            .into_iter()
            .map(|label| {
                let target = self.policy.target_for(&label, cells);
                let fill = target.min(cells).min(ranked.len());

                let assignments = ranked[..fill]
                    .iter()
                    .map(|p| Some(*p.id()))
                    .chain(std::iter::repeat(None))
                    .take(cells)
                    .collect();

                let metadata = json!({
                    "layout_type": case.layout_type(),
                    "rows": dimensions.rows(),
                    "columns": dimensions.columns(),
                    "fill_target": target,
                    "fill_count": fill,
                    "ranking": self.ranking.name(),
                });

                Configuration::from_assignments(
                    case.tenant_id(),
                    case.id_typed(),
                    label,
                    dimensions,
                    metadata,
                    assignments,
                )
            })
            .collect()
    }
}

/// Generate with static priority ranking.
pub fn generate<I>(
    case: &DisplayCase,
    labels: I,
    catalog: &[Product],
    policy: &FillPolicy,
) -> Result<Vec<Configuration>, LayoutError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ConfigurationScheduler::new(policy.clone()).generate(case, labels, catalog)
}

fn parse_roster<I>(labels: I) -> Result<Vec<TimeLabel>, LayoutError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut roster = Vec::new();

    for raw in labels {
        let label = TimeLabel::new(raw.as_ref())?;
        if !seen.insert(label.clone()) {
            return Err(LayoutError::DuplicateTimeLabel(label.into()));
        }
        roster.push(label);
    }

    if roster.is_empty() {
        return Err(LayoutError::EmptyRoster);
    }
    Ok(roster)
}
