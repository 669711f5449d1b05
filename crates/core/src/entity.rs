//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stores key records by this identity; two entities with the same id are the
/// same record, whatever their other fields hold.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
