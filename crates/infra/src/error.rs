use thiserror::Error;

use bakery_core::DomainError;
use bakery_display::{Configuration, LayoutError};

/// Storage collaborator failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store cannot be reached (or an in-memory lock is poisoned).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store refused a write that would break its invariants.
    #[error("write rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    pub(crate) fn poisoned(what: &str) -> Self {
        Self::Unavailable(format!("{what} lock poisoned"))
    }
}

/// Failure of a planner or query operation.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A case, configuration or product lookup missed.
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    StorageUnavailable(#[from] StoreError),

    /// Generation succeeded but publishing did not. The previous
    /// configurations stay authoritative; `pending` holds the new ones so the
    /// caller can retry the save.
    #[error("failed to publish {count} generated configuration(s): {source}", count = .pending.len())]
    PersistFailed {
        #[source]
        source: StoreError,
        pending: Vec<Configuration>,
    },
}

impl PlannerError {
    pub(crate) fn not_found(what: impl core::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }
}
