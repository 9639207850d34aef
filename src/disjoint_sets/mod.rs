//! Contains the linked-list implementation of the [disjoint-sets/union-find].
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure

mod node;
pub mod linked_sets;

pub use self::linked_sets::{AllSets, LinkedDisjointSets, Representatives, Set};
