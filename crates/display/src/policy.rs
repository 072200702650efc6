//! Fill policy: how many cells of a case get a product at each checkpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::time_label::{Daypart, TimeLabel};

/// Default share of cells to fill per daypart, in percent of `rows * columns`.
///
/// These mirror the demand curve of a typical bakery day (quiet early
/// morning, lunch peak) and are meant to be overridden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaypartFractions {
    pub early_morning: u8,
    pub breakfast: u8,
    pub lunch: u8,
    pub afternoon: u8,
    pub evening: u8,
    /// Labels that are not `HH:MM` clock times.
    pub unclassified: u8,
}

impl Default for DaypartFractions {
    fn default() -> Self {
        Self {
            early_morning: 30,
            breakfast: 50,
            lunch: 75,
            afternoon: 60,
            evening: 40,
            unclassified: 50,
        }
    }
}

impl DaypartFractions {
    /// Percent for a daypart, capped at 100.
    pub fn percent_for(&self, daypart: Option<Daypart>) -> u8 {
        let pct = match daypart {
            Some(Daypart::EarlyMorning) => self.early_morning,
            Some(Daypart::Breakfast) => self.breakfast,
            Some(Daypart::Lunch) => self.lunch,
            Some(Daypart::Afternoon) => self.afternoon,
            Some(Daypart::Evening) => self.evening,
            None => self.unclassified,
        };
        pct.min(100)
    }
}

/// Target count of non-empty slots per time-of-day label.
///
/// Explicit `counts` win; labels without one fall back to the daypart
/// fraction of the case size. The target is an upper bound: the scheduler
/// never fills more cells than the case has or than the catalog can supply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillPolicy {
    pub counts: BTreeMap<String, usize>,
    pub fractions: DaypartFractions,
}

impl FillPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, label: impl Into<String>, count: usize) -> Self {
        self.counts.insert(label.into().trim().to_string(), count);
        self
    }

    pub fn with_fractions(mut self, fractions: DaypartFractions) -> Self {
        self.fractions = fractions;
        self
    }

    /// Target fill count for `label` in a case with `cells` cells.
    pub fn target_for(&self, label: &TimeLabel, cells: usize) -> usize {
        if let Some(count) = self.counts.get(label.as_str()) {
            return *count;
        }
        let pct = self.fractions.percent_for(label.daypart());
        share_of(cells, pct)
    }
}

/// `pct` percent of `cells`, rounded half up.
fn share_of(cells: usize, pct: u8) -> usize {
    (cells * usize::from(pct) + 50) / 100
}
