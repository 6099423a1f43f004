//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stores use the entity id to replace records in place and to look them up.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn entity_id(&self) -> &Self::Id;
}
