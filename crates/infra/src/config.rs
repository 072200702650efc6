//! Planner configuration.
//!
//! Loaded once at startup from a JSON file named by `BAKERY_PLANNER_CONFIG`;
//! every field has a default, so a missing variable or a partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bakery_display::{FillPolicy, TimeLabel};

/// Environment variable holding the path of the JSON config file.
pub const CONFIG_ENV_VAR: &str = "BAKERY_PLANNER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which ranking the planner feeds the scheduler.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    #[default]
    StaticPriority,
    /// Needs a demand forecaster; without one the planner ranks statically.
    DemandWeighted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Time-of-day checkpoints, in order.
    pub time_roster: Vec<String>,
    pub fill_policy: FillPolicy,
    pub ranking: RankingMode,
    pub forecast_horizon_days: u32,
    pub sampling_window_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            time_roster: ["06:00", "08:00", "11:00", "14:00", "17:00"]
                .into_iter()
                .map(String::from)
                .collect(),
            fill_policy: FillPolicy::default(),
            ranking: RankingMode::default(),
            forecast_horizon_days: 1,
            sampling_window_days: 28,
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Read the file named by [`CONFIG_ENV_VAR`], or use defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_path(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Reject values the planner cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_roster.is_empty() {
            return Err(ConfigError::Invalid("time_roster is empty".to_string()));
        }
        let mut seen = std::collections::HashSet::new();
        for raw in &self.time_roster {
            let label = TimeLabel::new(raw.as_str()).map_err(|e| ConfigError::Invalid(e.to_string()))?;
            if !seen.insert(label) {
                return Err(ConfigError::Invalid(format!(
                    "time_roster repeats {}",
                    raw.trim()
                )));
            }
        }
        if self.forecast_horizon_days == 0 {
            return Err(ConfigError::Invalid(
                "forecast_horizon_days must be at least 1".to_string(),
            ));
        }
        if self.sampling_window_days == 0 {
            return Err(ConfigError::Invalid(
                "sampling_window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
