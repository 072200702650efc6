use thiserror::Error;

use bakery_catalog::ProductId;

/// Failures of layout generation and slot access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Case dimensions below 1x1.
    #[error("invalid topology {rows}x{columns}: rows and columns must be at least 1")]
    InvalidTopology { rows: u32, columns: u32 },

    /// The time roster names the same label twice.
    #[error("duplicate time-of-day label: {0}")]
    DuplicateTimeLabel(String),

    #[error("invalid time-of-day label: {0:?}")]
    InvalidTimeLabel(String),

    #[error("time roster is empty")]
    EmptyRoster,

    /// Slot access outside `[0, rows) x [0, columns)`. Never clamped.
    #[error("cell ({row}, {column}) is outside the {rows}x{columns} case")]
    OutOfBounds {
        row: u32,
        column: u32,
        rows: u32,
        columns: u32,
    },

    /// A catalog entry owned by another tenant was offered for this case.
    #[error("product {product_id} does not belong to the case's tenant")]
    TenantMismatch { product_id: ProductId },

    /// A configuration whose slots do not cover its grid exactly once.
    #[error("corrupt configuration: {0}")]
    CorruptConfiguration(String),
}
