//! Display-case planogram engine.
//!
//! Decides which product occupies which cell of a grid-shaped display case at
//! each time-of-day checkpoint. Everything here is deterministic domain logic
//! (no IO, no storage, no clocks): the same case, roster, catalog and policy
//! always produce the same configurations.

pub mod configuration;
pub mod error;
pub mod policy;
pub mod ranking;
pub mod scheduler;
pub mod time_label;
pub mod topology;

pub use configuration::{Configuration, ConfigurationId, Slot, SlotId};
pub use error::LayoutError;
pub use policy::{DaypartFractions, FillPolicy};
pub use ranking::RankingStrategy;
pub use scheduler::{ConfigurationScheduler, generate};
pub use time_label::{Daypart, TimeLabel};
pub use topology::{CaseDimensions, DisplayCase, DisplayCaseId, GridPosition, LayoutType};
