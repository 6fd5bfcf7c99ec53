//! Value object trait: equality by value, not identity.
//!
//! Item names and quantities have **no identity** of their own - two values with
//! the same contents are the same value.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Constructors are the only place validation happens, so a
/// value object that exists is always valid.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Quantity(u64);
///
/// impl ValueObject for Quantity {}
///
/// assert_eq!(Quantity(3), Quantity(3));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
