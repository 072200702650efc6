//! Candidate ordering for slot allocation.

use std::collections::{BTreeMap, HashSet};

use bakery_catalog::{Product, ProductId};
use bakery_core::Entity;

/// How catalog entries are ordered before the top ones are placed.
///
/// Both strategies are total and stable: ties always fall back to catalog
/// order, so the same catalog always ranks the same way.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RankingStrategy {
    /// Ascending priority rank, ties in catalog order.
    #[default]
    StaticPriority,
    /// Descending predicted demand, then ascending priority rank, then catalog
    /// order. Products missing from the map (or with a non-finite estimate)
    /// count as zero demand.
    DemandWeighted(BTreeMap<ProductId, f64>),
}

impl RankingStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            RankingStrategy::StaticPriority => "static_priority",
            RankingStrategy::DemandWeighted(_) => "demand_weighted",
        }
    }

    /// Order `catalog` for placement. Repeated product ids keep their first
    /// occurrence only.
    pub fn rank<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        let mut seen = HashSet::with_capacity(catalog.len());
        let mut ranked: Vec<&Product> = catalog.iter().filter(|p| seen.insert(*p.id())).collect();

        match self {
            RankingStrategy::StaticPriority => {
                ranked.sort_by_key(|p| p.priority_rank());
            }
            RankingStrategy::DemandWeighted(demand) => {
                let demand_of = |p: &Product| {
                    demand
                        .get(p.id())
                        .copied()
                        .filter(|d| d.is_finite())
                        .unwrap_or(0.0)
                };
                ranked.sort_by(|a, b| {
                    demand_of(*b)
                        .total_cmp(&demand_of(*a))
                        .then(a.priority_rank().cmp(&b.priority_rank()))
                });
            }
        }

        ranked
    }
}
