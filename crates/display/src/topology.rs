//! Static shape of a physical display case.

use serde::{Deserialize, Serialize};

use bakery_core::{DomainError, Entity, RecordId, TenantId, ValueObject};

use crate::error::LayoutError;

/// Display case identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayCaseId(pub RecordId);

impl DisplayCaseId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(RecordId::new())
    }
}

impl core::fmt::Display for DisplayCaseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Physical arrangement of the case.
///
/// Only a rendering hint: allocation always treats the case as a rows x columns
/// grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    #[default]
    Grid,
    LShape,
    UShape,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Grid => "grid",
            LayoutType::LShape => "l_shape",
            LayoutType::UShape => "u_shape",
        }
    }
}

impl core::fmt::Display for LayoutType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for LayoutType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(LayoutType::Grid),
            "l_shape" | "l-shape" => Ok(LayoutType::LShape),
            "u_shape" | "u-shape" => Ok(LayoutType::UShape),
            other => Err(DomainError::validation(format!(
                "layout type must be one of: grid, l_shape, u_shape (got {other:?})"
            ))),
        }
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u32,
    pub column: u32,
}

impl GridPosition {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl ValueObject for GridPosition {}

/// Validated grid size (rows >= 1, columns >= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct CaseDimensions {
    rows: u32,
    columns: u32,
}

#[derive(Deserialize)]
struct RawDimensions {
    rows: u32,
    columns: u32,
}

impl TryFrom<RawDimensions> for CaseDimensions {
    type Error = LayoutError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        CaseDimensions::new(raw.rows, raw.columns)
    }
}

impl CaseDimensions {
    pub fn new(rows: u32, columns: u32) -> Result<Self, LayoutError> {
        if rows < 1 || columns < 1 {
            return Err(LayoutError::InvalidTopology { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells (`rows * columns`).
    pub fn cells(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn contains(&self, row: u32, column: u32) -> bool {
        row < self.rows && column < self.columns
    }

    /// Row-major index of a cell, or `OutOfBounds`.
    pub fn index_of(&self, row: u32, column: u32) -> Result<usize, LayoutError> {
        if !self.contains(row, column) {
            return Err(LayoutError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(row as usize * self.columns as usize + column as usize)
    }

    /// Every cell in row-major order: row 0 left to right, then row 1, ...
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + Clone + use<> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| GridPosition::new(row, column)))
    }
}

impl ValueObject for CaseDimensions {}

/// A physical display case owned by one tenant.
///
/// Dimensions are kept as stored. A record loaded from elsewhere may carry a
/// degenerate size, so consumers go through [`DisplayCase::dimensions`], which
/// re-validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCase {
    id: DisplayCaseId,
    tenant_id: TenantId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    layout_type: LayoutType,
    rows: u32,
    columns: u32,
}

impl DisplayCase {
    pub fn new(
        tenant_id: TenantId,
        id: DisplayCaseId,
        name: impl Into<String>,
        dimensions: CaseDimensions,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("display case name cannot be empty"));
        }

        Ok(Self {
            id,
            tenant_id,
            name,
            description: String::new(),
            layout_type: LayoutType::Grid,
            rows: dimensions.rows(),
            columns: dimensions.columns(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_layout_type(mut self, layout_type: LayoutType) -> Self {
        self.layout_type = layout_type;
        self
    }

    pub fn id_typed(&self) -> DisplayCaseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn layout_type(&self) -> LayoutType {
        self.layout_type
    }

    /// Validated grid size, or `InvalidTopology`.
    pub fn dimensions(&self) -> Result<CaseDimensions, LayoutError> {
        CaseDimensions::new(self.rows, self.columns)
    }
}

impl Entity for DisplayCase {
    type Id = DisplayCaseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
