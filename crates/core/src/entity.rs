//! Entity trait: records that keep their identity while attributes change.

/// Entity marker + minimal interface.
///
/// Products, display cases and configurations are entities: two values with
/// the same id describe the same thing, even if one of them is stale.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Tenant that owns the record.
    fn tenant_id(&self) -> crate::TenantId;
}
