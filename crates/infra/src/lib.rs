//! Infrastructure layer: stores, per-case locking, regeneration and queries.
//!
//! Domain crates stay pure; everything that holds state or coordinates
//! callers lives here.

pub mod catalog;
pub mod config;
pub mod error;
pub mod layout_store;
pub mod locks;
pub mod planner;
pub mod query;
pub mod read_model;
pub mod sales_store;


pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use config::{ConfigError, PlannerConfig, RankingMode};
pub use error::{PlannerError, StoreError};
pub use layout_store::{CaseLayouts, ConfigurationRepository, InMemoryLayoutStore};
pub use locks::CaseLocks;
pub use planner::PlannerService;
pub use query::{CaseDetail, CaseSummary, ConfigurationView, QueryFacade, SlotView};
pub use read_model::{InMemoryTenantStore, TenantStore};
pub use sales_store::InMemorySalesLedger;
