//! The error taxonomy shared by both containers of this crate.

/// An error returned when a container operation violates its contract.
///
/// These are programming-contract violations, not transient faults: every
/// operation checks its preconditions before mutating anything, so an `Err`
/// always leaves the container exactly as it was.
///
/// The first two variants are produced by
/// [`LinkedDisjointSets`](crate::LinkedDisjointSets), the last two by
/// [`HashMultiset`](crate::HashMultiset).
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The element already belongs to a disjoint set and cannot be
    /// registered as a new singleton.
    #[error("element already belongs to a disjoint set")]
    AlreadyInSet,
    /// The element does not belong to any disjoint set.
    #[error("element does not belong to any disjoint set")]
    NotInAnySet,
    /// An occurrence count or the total length of a multiset would exceed
    /// `usize::MAX`.
    #[error("occurrence count would overflow usize")]
    CountOverflow,
    /// A cursor was advanced after the multiset it iterates was modified.
    #[error("multiset was modified while a cursor was active")]
    ConcurrentModification,
}
