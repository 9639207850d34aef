//! Two generic in-memory containers: a [disjoint-sets/union-find]
//! implementation built on explicit linked membership lists, and a
//! hash-based counting multiset.
//!
//! The main structs of this crate are [`LinkedDisjointSets<T>`] and
//! [`HashMultiset<T>`]; the two are independent and share only the [`Error`]
//! taxonomy.
//!
//! A [`LinkedDisjointSets<T>`] partitions its elements into disjoint sets.
//! Elements are pushed into an arena, registered as singleton sets with
//! `make_set`, and joined with `union`. Every member carries the index of
//! its set's representative, so `find_set` takes `O(1)` time without path
//! compression; `union` splices the membership chain of the smaller set into
//! the larger one, so its cost is the cardinality of the smaller operand and
//! any sequence of unions costs `O(n log n)` in total. The membership chains
//! make iterating one set possible without touching the rest of the
//! structure. This can be used, for example, to keep track of the connected
//! components of an undirected graph while also being able to list the
//! vertices of a single component.
//!
//! A [`HashMultiset<T>`] counts occurrences instead of storing duplicates:
//! one record per distinct value holds its multiplicity, lookups are `O(1)`,
//! and iteration yields each value as many times as it occurs. A detached
//! fail-fast cursor snapshots the multiset's modification counter and
//! reports [`Error::ConcurrentModification`] instead of yielding stale data
//! once the multiset is mutated under it.
//!
//! ```
//! use setbag::{disjoint_sets, multiset};
//!
//! let mut components = disjoint_sets!["a", "b", "c", "d"];
//! components.union(0, 1).unwrap();
//! components.union(1, 3).unwrap();
//!
//! assert!(components.same_set(0, 3).unwrap());
//! assert_eq!(components.amount_of_sets(), 2);
//!
//! let mut bag = multiset!["x" => 3, "y" => 1];
//! bag.insert("y").unwrap();
//!
//! assert_eq!(bag.count("x"), 3);
//! assert_eq!(bag.len(), 5);
//! ```
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`LinkedDisjointSets<T>`]: struct.LinkedDisjointSets.html
//! [`HashMultiset<T>`]: struct.HashMultiset.html
//! [`Error`]: enum.Error.html
//! [`Error::ConcurrentModification`]: enum.Error.html#variant.ConcurrentModification

/// We count the amount of expressions given to this macro.
#[doc(hidden)]
#[macro_export]
macro_rules! setbag_count_expr {
    () => { 0usize };
    ($_single: expr) => { 1usize };
    // Even amount of expressions.
    ($($first: expr, $_second: expr),*) => {
        ($crate::setbag_count_expr![$($first),*] << 1usize)
    };
    // Odd amount of expressions.
    ($_single: expr, $($first: expr, $_second: expr),*) => {
        ($crate::setbag_count_expr![$($first),*] << 1usize) | 1
    };
}

/// Creates a [`LinkedDisjointSets`] containing the arguments.
///
/// There are three forms of the `disjoint_sets!` macro:
///
/// - Create a [`LinkedDisjointSets`] containing a given list of elements,
///   each registered in its own singleton set:
///
/// ```
/// use setbag::disjoint_sets;
///
/// let sets = disjoint_sets!['a', 'b', 'c'];
///
/// assert!(sets[0] == 'a');
/// assert!(sets[1] == 'b');
/// assert!(sets[2] == 'c');
///
/// assert_eq!(sets.amount_of_sets(), 3);
/// ```
///
/// - Create a [`LinkedDisjointSets`] containing a given list of elements in
///   the sets specified:
///
/// ```
/// use setbag::disjoint_sets;
///
/// let sets = disjoint_sets![
///     'a' => 0,
///     'b' => 1,
///     'c' => 2,
///     'd' => 1,
///     'e' => 0,
/// ];
///
/// assert!(sets.same_set(0, 4).unwrap());
/// assert!(sets.same_set(1, 3).unwrap());
/// assert_eq!(sets.len_of_set(2), Ok(1));
/// ```
///
/// You can use any identifiers that implement `Hash` and `Eq`.
/// Elements with the same set identifier will be placed in the same set.
/// The identifiers are only used during construction and are not stored.
///
/// - Create a [`LinkedDisjointSets`] of `n` singleton sets from a given
///   element and size:
///
/// ```
/// use setbag::disjoint_sets;
///
/// let sets = disjoint_sets!['a'; 3];
///
/// assert!(sets[0] == 'a');
/// assert!(sets[2] == 'a');
///
/// assert_eq!(sets.amount_of_sets(), 3);
/// ```
///
/// [`LinkedDisjointSets`]: struct.LinkedDisjointSets.html
#[macro_export]
macro_rules! disjoint_sets {
    ($elem: expr; $len: expr) => {
        $crate::LinkedDisjointSets::from_elem($elem, $len)
    };
    ($($elem: expr),+ $(,)?) => {
        {
            let len = $crate::setbag_count_expr![$($elem),+];
            let mut sets = $crate::LinkedDisjointSets::with_capacity(len);

            $(
                sets.push_singleton($elem);
            )+

            sets
        }
    };
    ($($elem: expr => $set: expr),+ $(,)?) => {
        {
            let len = $crate::setbag_count_expr![$($elem),+];
            let mut sets = $crate::LinkedDisjointSets::with_capacity(len);
            let mut map = ::std::collections::HashMap::new();

            $(
                let index = sets.push_singleton($elem);

                if let ::std::option::Option::Some(&earlier) = map.get(&$set) {
                    let _ = sets.union(earlier, index);
                } else {
                    map.insert($set, index);
                }
            )+

            sets
        }
    };
    () => {
        $crate::LinkedDisjointSets::new()
    };
}

/// Creates a [`HashMultiset`] containing the arguments.
///
/// There are three forms of the `multiset!` macro:
///
/// - Create a [`HashMultiset`] containing a given list of occurrences:
///
/// ```
/// use setbag::multiset;
///
/// let bag = multiset!['a', 'b', 'a'];
///
/// assert_eq!(bag.count(&'a'), 2);
/// assert_eq!(bag.count(&'b'), 1);
/// ```
///
/// - Create a [`HashMultiset`] from `value => occurrences` pairs. Repeated
///   values accumulate:
///
/// ```
/// use setbag::multiset;
///
/// let bag = multiset!["a" => 2, "b" => 1, "a" => 1];
///
/// assert_eq!(bag.count("a"), 3);
/// assert_eq!(bag.len(), 4);
/// ```
///
/// - Create a [`HashMultiset`] of `n` occurrences of a given element:
///
/// ```
/// use setbag::multiset;
///
/// let bag = multiset!["a"; 5];
///
/// assert_eq!(bag.count("a"), 5);
/// assert_eq!(bag.distinct_len(), 1);
/// ```
///
/// [`HashMultiset`]: struct.HashMultiset.html
#[macro_export]
macro_rules! multiset {
    ($elem: expr; $len: expr) => {
        $crate::HashMultiset::from_elem($elem, $len)
    };
    ($($value: expr),+ $(,)?) => {
        {
            let len = $crate::setbag_count_expr![$($value),+];
            let mut multiset = $crate::HashMultiset::with_capacity(len);
            multiset.extend([$($value),+]);

            multiset
        }
    };
    ($($value: expr => $occurrences: expr),+ $(,)?) => {
        {
            let len = $crate::setbag_count_expr![$($value),+];
            let mut multiset = $crate::HashMultiset::with_capacity(len);
            $(
                if multiset.insert_multiple($value, $occurrences).is_err() {
                    ::core::panic!("occurrence count overflowed usize");
                }
            )+

            multiset
        }
    };
    () => {
        $crate::HashMultiset::new()
    };
}

pub mod disjoint_sets;
mod error;
pub mod multiset;

pub use crate::{disjoint_sets::LinkedDisjointSets, error::Error, multiset::HashMultiset};
