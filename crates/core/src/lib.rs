//! `bakery-core`: shared domain building blocks.
//!
//! Identifiers, the entity/value-object vocabulary and the domain error type.
//! Nothing in here performs IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{RecordId, TenantId};
pub use value_object::ValueObject;
