//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values, so two with the same values are equal.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (a line item `PROD0004 x 450` is equal to any
///   other `PROD0004 x 450`)
/// - **Entity**: has identity (two orders with the same customer and lines are
///   still distinct orders)
///
/// Value objects are immutable: to "change" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct LineItem {
///     product_id: String,
///     quantity: u32,
/// }
///
/// impl ValueObject for LineItem {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
