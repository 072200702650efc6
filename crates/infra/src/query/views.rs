//! Serializable read shapes returned by the query façade.

use serde::Serialize;
use serde_json::Value as JsonValue;

use bakery_catalog::{ProductId, ProductView};
use bakery_display::{ConfigurationId, DisplayCaseId, LayoutType, SlotId, TimeLabel};

/// One row of the tenant's case list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSummary {
    pub id: DisplayCaseId,
    pub name: String,
    pub description: String,
    pub layout_type: LayoutType,
    pub rows: u32,
    pub columns: u32,
    /// Published time-of-day labels, in roster order.
    pub time_labels: Vec<TimeLabel>,
}

/// A case with every published configuration and resolved slot products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseDetail {
    #[serde(flatten)]
    pub case: CaseSummary,
    pub configurations: Vec<ConfigurationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationView {
    pub id: ConfigurationId,
    pub case_id: DisplayCaseId,
    pub time_label: TimeLabel,
    pub layout_metadata: JsonValue,
    pub filled_count: usize,
    /// Every cell, row-major.
    pub slots: Vec<SlotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub id: SlotId,
    pub row: u32,
    pub column: u32,
    pub product_id: Option<ProductId>,
    /// `None` for empty cells, and for references to products that have since
    /// left the catalog.
    pub product: Option<ProductView>,
}
