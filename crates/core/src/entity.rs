//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An order keeps the same identity while its lifecycle timestamps change.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
