//! Catalog domain module.
//!
//! Sellable products of a tenant with their display metadata. Stored records
//! keep display attributes optional; defaults are applied when a record is
//! turned into a [`ProductView`].

pub mod product;

pub use product::{DEFAULT_CATEGORY, DEFAULT_ICON_CLASS, Product, ProductId, ProductView};
