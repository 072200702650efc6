//! Sales domain module.
//!
//! Daily sale records per product and the sums derived from them. Pure logic,
//! no storage.

pub mod sale;
pub mod summary;

pub use sale::{Sale, SaleId};
pub use summary::{SalesSummary, SalesWindow};
