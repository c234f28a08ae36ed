//! Entities: domain objects whose identity survives edits.

/// Minimal interface for identified domain objects.
///
/// An invoice keeps its id through every revision; a contact keeps the id it
/// was assigned when first created. Content changes, identity does not.
pub trait Entity {
    /// Strongly-typed identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
