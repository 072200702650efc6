use serde::{Deserialize, Serialize};

use bakery_core::{DomainError, DomainResult, Entity, RecordId, TenantId};

/// Icon class used when a product has none of its own.
pub const DEFAULT_ICON_CLASS: &str = "bakery-icon-generic";

/// Category label used when a product has none of its own.
pub const DEFAULT_CATEGORY: &str = "Miscellaneous";

/// Product identifier (tenant-scoped via the product's `tenant_id`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RecordId);

impl ProductId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(RecordId::new())
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Catalog entry as stored.
///
/// `display_name`, `icon_class` and `category` stay `None` until explicitly
/// set, so a stored record always tells "unset" apart from "set to the
/// default value".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    tenant_id: TenantId,
    name: String,
    display_name: Option<String>,
    icon_class: Option<String>,
    category: Option<String>,
    priority_rank: i32,
}

impl Product {
    /// Create a catalog entry with no display attributes and priority rank 0.
    pub fn new(tenant_id: TenantId, id: ProductId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        Ok(Self {
            id,
            tenant_id,
            name,
            display_name: None,
            icon_class: None,
            category: None,
            priority_rank: 0,
        })
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.set_display_name(Some(display_name.into()));
        self
    }

    pub fn with_icon_class(mut self, icon_class: impl Into<String>) -> Self {
        self.set_icon_class(Some(icon_class.into()));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(Some(category.into()));
        self
    }

    pub fn with_priority_rank(mut self, priority_rank: i32) -> Self {
        self.priority_rank = priority_rank;
        self
    }

    /// Blank values clear the attribute.
    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = non_blank(display_name);
    }

    pub fn set_icon_class(&mut self, icon_class: Option<String>) {
        self.icon_class = non_blank(icon_class);
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = non_blank(category);
    }

    pub fn set_priority_rank(&mut self, priority_rank: i32) {
        self.priority_rank = priority_rank;
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn icon_class(&self) -> Option<&str> {
        self.icon_class.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Lower value = higher display precedence.
    pub fn priority_rank(&self) -> i32 {
        self.priority_rank
    }

    /// Resolve display defaults for presentation.
    pub fn view(&self) -> ProductView {
        ProductView::from(self)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Catalog entry with display defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub display_name: String,
    pub icon_class: String,
    pub category: String,
    pub priority_rank: i32,
}

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            display_name: p.display_name.clone().unwrap_or_else(|| p.name.clone()),
            icon_class: p
                .icon_class
                .clone()
                .unwrap_or_else(|| DEFAULT_ICON_CLASS.to_string()),
            category: p
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            priority_rank: p.priority_rank,
        }
    }
}
