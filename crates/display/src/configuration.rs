//! Generated slot assignments for one case at one time of day.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use bakery_catalog::ProductId;
use bakery_core::{Entity, RecordId, TenantId};

use crate::error::LayoutError;
use crate::time_label::TimeLabel;
use crate::topology::{CaseDimensions, DisplayCaseId, GridPosition};

/// Configuration identifier.
///
/// Derived from (case id, label): regenerating a label keeps its id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationId(pub RecordId);

impl ConfigurationId {
    pub fn for_case(case_id: DisplayCaseId, label: &TimeLabel) -> Self {
        Self(RecordId::derived(&case_id.0, label.as_str()))
    }
}

impl core::fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Slot identifier, derived from (configuration id, row, column).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub RecordId);

impl SlotId {
    pub fn for_cell(configuration_id: ConfigurationId, position: GridPosition) -> Self {
        Self(RecordId::derived(
            &configuration_id.0,
            &format!("{}:{}", position.row, position.column),
        ))
    }
}

/// One grid cell within a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub configuration_id: ConfigurationId,
    pub row: u32,
    pub column: u32,
    /// `None` = empty cell.
    pub product_id: Option<ProductId>,
}

impl Slot {
    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.row, self.column)
    }

    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
    }
}

/// All slot assignments of one case at one time-of-day label.
///
/// Slots are kept in row-major order and cover every cell of the grid exactly
/// once. A configuration is never patched: regeneration builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    id: ConfigurationId,
    case_id: DisplayCaseId,
    tenant_id: TenantId,
    time_label: TimeLabel,
    dimensions: CaseDimensions,
    /// Rendering hints; not interpreted by allocation.
    layout_metadata: JsonValue,
    slots: Vec<Slot>,
}

impl Configuration {
    /// Build from one assignment per cell, in row-major order.
    pub(crate) fn from_assignments(
        tenant_id: TenantId,
        case_id: DisplayCaseId,
        time_label: TimeLabel,
        dimensions: CaseDimensions,
        layout_metadata: JsonValue,
        assignments: Vec<Option<ProductId>>,
    ) -> Result<Self, LayoutError> {
        if assignments.len() != dimensions.cells() {
            return Err(LayoutError::CorruptConfiguration(format!(
                "{} assignments for {} cells",
                assignments.len(),
                dimensions.cells()
            )));
        }

        let id = ConfigurationId::for_case(case_id, &time_label);
        let slots = dimensions
            .positions()
            .zip(assignments)
            .map(|(pos, product_id)| Slot {
                id: SlotId::for_cell(id, pos),
                configuration_id: id,
                row: pos.row,
                column: pos.column,
                product_id,
            })
            .collect();

        Ok(Self {
            id,
            case_id,
            tenant_id,
            time_label,
            dimensions,
            layout_metadata,
            slots,
        })
    }

    pub fn id_typed(&self) -> ConfigurationId {
        self.id
    }

    pub fn case_id(&self) -> DisplayCaseId {
        self.case_id
    }

    pub fn time_label(&self) -> &TimeLabel {
        &self.time_label
    }

    pub fn dimensions(&self) -> CaseDimensions {
        self.dimensions
    }

    pub fn layout_metadata(&self) -> &JsonValue {
        &self.layout_metadata
    }

    /// Every slot, row-major.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at `(row, column)`, or `OutOfBounds`.
    pub fn get_slot(&self, row: u32, column: u32) -> Result<&Slot, LayoutError> {
        let idx = self.dimensions.index_of(row, column)?;
        self.slots.get(idx).ok_or_else(|| {
            LayoutError::CorruptConfiguration(format!("missing slot at ({row}, {column})"))
        })
    }

    pub fn product_at(&self, row: u32, column: u32) -> Result<Option<ProductId>, LayoutError> {
        Ok(self.get_slot(row, column)?.product_id)
    }

    /// Non-empty slots in row-major order. Call again to restart.
    pub fn filled_slots(&self) -> impl Iterator<Item = &Slot> + Clone + '_ {
        self.slots.iter().filter(|s| !s.is_empty())
    }

    pub fn filled_count(&self) -> usize {
        self.filled_slots().count()
    }

    /// Check that the slot set covers the grid exactly once, in row-major
    /// order, with ids consistent with this configuration.
    ///
    /// Generated configurations always pass; this guards values that arrive
    /// from outside (deserialized, hand-built by a store).
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.id != ConfigurationId::for_case(self.case_id, &self.time_label) {
            return Err(LayoutError::CorruptConfiguration(
                "configuration id does not match case and label".to_string(),
            ));
        }
        if self.slots.len() != self.dimensions.cells() {
            return Err(LayoutError::CorruptConfiguration(format!(
                "{} slots for {} cells",
                self.slots.len(),
                self.dimensions.cells()
            )));
        }
        for (slot, pos) in self.slots.iter().zip(self.dimensions.positions()) {
            if slot.position() != pos {
                return Err(LayoutError::CorruptConfiguration(format!(
                    "slot ({}, {}) found where ({}, {}) was expected",
                    slot.row, slot.column, pos.row, pos.column
                )));
            }
            if slot.configuration_id != self.id || slot.id != SlotId::for_cell(self.id, pos) {
                return Err(LayoutError::CorruptConfiguration(format!(
                    "slot ({}, {}) has foreign identifiers",
                    slot.row, slot.column
                )));
            }
        }
        Ok(())
    }
}

impl Entity for Configuration {
    type Id = ConfigurationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(assignments: Vec<Option<ProductId>>) -> Configuration {
        Configuration::from_assignments(
            TenantId::new(),
            DisplayCaseId::generate(),
            TimeLabel::new("08:00").unwrap(),
            CaseDimensions::new(2, 3).unwrap(),
            json!({}),
            assignments,
        )
        .unwrap()
    }

    #[test]
    fn get_slot_returns_cell_and_rejects_out_of_bounds() {
        let p = ProductId::generate();
        let cfg = sample(vec![None, None, None, None, Some(p), None]);

        let slot = cfg.get_slot(1, 1).unwrap();
        assert_eq!((slot.row, slot.column), (1, 1));
        assert_eq!(slot.product_id, Some(p));
        assert_eq!(cfg.product_at(0, 0), Ok(None));

        assert_eq!(
            cfg.get_slot(2, 0),
            Err(LayoutError::OutOfBounds { row: 2, column: 0, rows: 2, columns: 3 })
        );
        assert!(cfg.get_slot(0, 3).is_err());
    }

    #[test]
    fn filled_slots_are_row_major_and_restartable() {
        let a = ProductId::generate();
        let b = ProductId::generate();
        let cfg = sample(vec![None, Some(a), None, Some(b), None, None]);

        let first: Vec<_> = cfg.filled_slots().map(|s| (s.row, s.column)).collect();
        let second: Vec<_> = cfg.filled_slots().map(|s| (s.row, s.column)).collect();
        assert_eq!(first, vec![(0, 1), (1, 0)]);
        assert_eq!(first, second);
        assert_eq!(cfg.filled_count(), 2);
    }

    #[test]
    fn wrong_assignment_count_is_rejected() {
        let err = Configuration::from_assignments(
            TenantId::new(),
            DisplayCaseId::generate(),
            TimeLabel::new("08:00").unwrap(),
            CaseDimensions::new(2, 2).unwrap(),
            json!({}),
            vec![None; 3],
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::CorruptConfiguration(_)));
    }

    #[test]
    fn ids_are_derived_from_case_label_and_cell() {
        let cfg = sample(vec![None; 6]);
        assert_eq!(
            cfg.id_typed(),
            ConfigurationId::for_case(cfg.case_id(), cfg.time_label())
        );
        let slot = cfg.get_slot(1, 2).unwrap();
        assert_eq!(slot.id, SlotId::for_cell(cfg.id_typed(), GridPosition::new(1, 2)));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_detects_gaps_and_reordering() {
        let cfg = sample(vec![None; 6]);

        let mut json = serde_json::to_value(&cfg).unwrap();
        json["slots"].as_array_mut().unwrap().pop();
        let missing: Configuration = serde_json::from_value(json).unwrap();
        assert!(matches!(missing.validate(), Err(LayoutError::CorruptConfiguration(_))));

        let mut json = serde_json::to_value(&cfg).unwrap();
        json["slots"].as_array_mut().unwrap().swap(0, 1);
        let swapped: Configuration = serde_json::from_value(json).unwrap();
        assert!(matches!(swapped.validate(), Err(LayoutError::CorruptConfiguration(_))));
    }
}
