//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Grid dimensions and cell positions are value objects: a `4x5` case shape
/// is equal to every other `4x5` case shape, and there is nothing to track
/// across time. To "change" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct GridPosition { row: u32, column: u32 }
///
/// impl ValueObject for GridPosition {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
