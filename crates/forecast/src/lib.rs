//! `bakery-forecast`
//!
//! **Responsibility:** demand forecast collaborator boundary.
//!
//! - The planogram engine works without it; a forecast only biases ranking.
//! - Forecasters read sales history through [`SalesHistory`] and never
//!   mutate anything.

pub mod forecaster;
pub mod moving_average;
pub mod result;

pub use forecaster::{DemandForecaster, SalesHistory};
pub use moving_average::MovingAverageForecaster;
pub use result::{DemandForecast, ForecastError, PeriodEstimate};
