//! A hash-based counting multiset.
//!
//! See [`HashMultiset<T>`] for more information.
//!
//! [`HashMultiset<T>`]: struct.HashMultiset.html

use std::{
    borrow::Borrow,
    fmt,
    hash::{Hash, Hasher},
    iter::{FromIterator, FusedIterator},
    num::NonZeroUsize,
};

use indexmap::{map, IndexMap};
use rustc_hash::{FxBuildHasher, FxHasher};

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

use crate::error::Error;

/// The index-preserving hash map used as the record store.
type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A hash-based counting multiset, also known as a bag.
///
/// A multiset generalizes a set by allowing a value to occur more than once.
/// Instead of storing duplicates, a `HashMultiset<T>` keeps one record per
/// distinct value together with its multiplicity, so `m` occurrences of the
/// same value cost one record. The records are keyed by the value alone,
/// which makes [`count`] and [`contains`] `O(1)`; the total number of
/// occurrences is tracked separately and [`len`] is `O(1)` as well.
///
/// Two multisets are equal when they hold the same distinct values with the
/// same multiplicities, regardless of insertion order, and the [`Hash`]
/// implementation is consistent with that.
///
/// Every mutation bumps an internal modification counter. A [`Cursor`]
/// created by [`cursor`] snapshots this counter and fails with
/// [`Error::ConcurrentModification`] as soon as it is advanced past a
/// mutation, which makes mutate-while-iterating mistakes loud instead of
/// silent. The borrowing [`iter`] needs no such check: the borrow checker
/// already rules the interleaving out.
///
/// # Examples
///
/// ```
/// use setbag::HashMultiset;
///
/// let mut bag = HashMultiset::new();
///
/// bag.insert_multiple("apple", 3).unwrap();
/// bag.insert("pear").unwrap();
///
/// assert_eq!(bag.count("apple"), 3);
/// assert_eq!(bag.len(), 4);
/// assert_eq!(bag.distinct_len(), 2);
///
/// bag.remove("apple");
///
/// assert_eq!(bag.count("apple"), 2);
/// ```
///
/// [`count`]: #method.count
/// [`contains`]: #method.contains
/// [`len`]: #method.len
/// [`cursor`]: #method.cursor
/// [`iter`]: #method.iter
/// [`Cursor`]: struct.Cursor.html
#[derive(Clone)]
pub struct HashMultiset<T> {
    /// One record per distinct value: the value and its multiplicity.
    /// A record only exists while its multiplicity is at least one.
    records: FxIndexMap<T, NonZeroUsize>,
    /// The total number of occurrences over all records.
    len: usize,
    /// Bumped on every structural or count change, never reset.
    /// Cursors snapshot it to detect mutation between advances.
    version: u64,
}

impl<T> HashMultiset<T> {
    /// Constructs a new, empty `HashMultiset<T>`.
    ///
    /// The `HashMultiset<T>` will not allocate until values are inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// use setbag::HashMultiset;
    ///
    /// let mut bag: HashMultiset<&str> = HashMultiset::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            records: FxIndexMap::default(),
            len: 0,
            version: 0,
        }
    }

    /// Constructs a new, empty `HashMultiset<T>` with capacity for the given
    /// number of distinct values.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::HashMultiset;
    ///
    /// let mut bag = HashMultiset::with_capacity(2);
    ///
    /// bag.insert_multiple('x', 100).unwrap();
    /// bag.insert_multiple('y', 100).unwrap();
    ///
    /// assert_eq!(bag.len(), 200);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: FxIndexMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            len: 0,
            version: 0,
        }
    }

    /// Returns the total number of occurrences over all distinct values.
    ///
    /// `O(1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let bag = multiset!["a" => 2, "b" => 3];
    ///
    /// assert_eq!(bag.len(), 5);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of distinct values.
    ///
    /// `O(1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let bag = multiset!["a" => 2, "b" => 3];
    ///
    /// assert_eq!(bag.distinct_len(), 2);
    /// ```
    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the multiset holds no occurrences at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::HashMultiset;
    ///
    /// let mut bag = HashMultiset::new();
    /// assert!(bag.is_empty());
    ///
    /// bag.insert('x').unwrap();
    /// assert!(!bag.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all records.
    ///
    /// Live cursors are invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let mut bag = multiset!['x'; 4];
    /// bag.clear();
    ///
    /// assert!(bag.is_empty());
    /// assert_eq!(bag.distinct_len(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.records.clear();
        self.len = 0;
        self.bump();
    }

    /// Returns an iterator over the occurrences of the multiset.
    ///
    /// Each distinct value is yielded exactly `count` times in a row. The
    /// order in which distinct values are visited is not specified.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let bag = multiset!["a" => 2, "b" => 1];
    ///
    /// assert_eq!(bag.iter().count(), 3);
    /// assert_eq!(bag.iter().filter(|&&value| value == "a").count(), 2);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            records: self.records.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// Returns an iterator over the distinct values of the multiset, with
    /// their multiplicities discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let bag = multiset!["a" => 2, "b" => 1];
    ///
    /// let mut values: Vec<&str> = bag.distinct_elements().copied().collect();
    /// values.sort();
    ///
    /// assert_eq!(values, vec!["a", "b"]);
    /// ```
    #[inline]
    pub fn distinct_elements(&self) -> DistinctElements<'_, T> {
        DistinctElements {
            inner: self.records.keys(),
        }
    }

    /// Returns an iterator over `(value, multiplicity)` pairs, one per
    /// distinct value.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let bag = multiset!["a" => 2, "b" => 1];
    ///
    /// let total: usize = bag.counts().map(|(_, count)| count).sum();
    ///
    /// assert_eq!(total, bag.len());
    /// ```
    #[inline]
    pub fn counts(&self) -> Counts<'_, T> {
        Counts {
            inner: self.records.iter(),
        }
    }

    /// Returns a detached fail-fast cursor over the occurrences of the
    /// multiset.
    ///
    /// The cursor holds no borrow, so the multiset stays usable — and
    /// mutable — while the cursor is live. In exchange every advance is
    /// checked: the cursor snapshots the modification counter at creation,
    /// and [`Cursor::next`] fails with [`Error::ConcurrentModification`]
    /// once the multiset has been mutated, instead of returning stale or
    /// inconsistent data. A cursor is not restartable and is only meaningful
    /// against the multiset that created it.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::{multiset, Error};
    ///
    /// let mut bag = multiset!["a" => 2];
    /// let mut cursor = bag.cursor();
    ///
    /// assert_eq!(cursor.next(&bag), Ok(Some(&"a")));
    ///
    /// bag.insert("b").unwrap();
    ///
    /// assert_eq!(cursor.next(&bag), Err(Error::ConcurrentModification));
    /// ```
    ///
    /// [`Cursor::next`]: struct.Cursor.html#method.next
    #[inline]
    pub fn cursor(&self) -> Cursor {
        Cursor {
            expected_version: self.version,
            record: 0,
            yielded: 0,
        }
    }

    /// Bump the modification counter, invalidating live cursors.
    #[inline]
    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl<T> HashMultiset<T>
where
    T: Eq + Hash,
{
    /// Returns the number of occurrences of `value`, or 0 if it is absent.
    ///
    /// `O(1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let bag = multiset!["a" => 2];
    ///
    /// assert_eq!(bag.count("a"), 2);
    /// assert_eq!(bag.count("b"), 0);
    /// ```
    #[inline]
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.records
            .get(value)
            .map_or(0, |multiplicity| multiplicity.get())
    }

    /// Returns `true` if at least one occurrence of `value` is present.
    ///
    /// `O(1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let bag = multiset!["a" => 2];
    ///
    /// assert!(bag.contains("a"));
    /// assert!(!bag.contains("b"));
    /// ```
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.records.contains_key(value)
    }

    /// Adds one occurrence of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CountOverflow`] if the multiplicity of `value` or
    /// the total length would exceed `usize::MAX`. Nothing is mutated in
    /// that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::HashMultiset;
    ///
    /// let mut bag = HashMultiset::new();
    ///
    /// bag.insert("y").unwrap();
    /// bag.insert("y").unwrap();
    /// bag.insert("y").unwrap();
    /// bag.remove("y");
    ///
    /// assert_eq!(bag.count("y"), 2);
    /// ```
    #[inline]
    pub fn insert(&mut self, value: T) -> Result<(), Error> {
        self.insert_multiple(value, 1).map(|_| ())
    }

    /// Adds `additional` occurrences of `value` and returns the number of
    /// occurrences present before the call.
    ///
    /// Adding 0 occurrences is a no-op that returns the current count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CountOverflow`] if the multiplicity of `value` or
    /// the total length would exceed `usize::MAX`. Nothing is mutated in
    /// that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::HashMultiset;
    ///
    /// let mut bag = HashMultiset::new();
    ///
    /// assert_eq!(bag.insert_multiple("x", 3), Ok(0));
    /// assert_eq!(bag.insert_multiple("x", 2), Ok(3));
    ///
    /// assert_eq!(bag.count("x"), 5);
    /// ```
    pub fn insert_multiple(&mut self, value: T, additional: usize) -> Result<usize, Error> {
        let Some(addition) = NonZeroUsize::new(additional) else {
            return Ok(self.count(&value));
        };

        let new_len = self.len.checked_add(additional).ok_or(Error::CountOverflow)?;

        let prior = match self.records.entry(value) {
            map::Entry::Occupied(mut entry) => {
                let prior = entry.get().get();
                let raised = entry
                    .get()
                    .checked_add(additional)
                    .ok_or(Error::CountOverflow)?;
                entry.insert(raised);

                prior
            }
            map::Entry::Vacant(entry) => {
                entry.insert(addition);

                0
            }
        };

        self.len = new_len;
        self.bump();

        Ok(prior)
    }

    /// Removes one occurrence of `value`.
    ///
    /// Returns `false` if `value` was absent and `true` otherwise. The
    /// record is deleted when its last occurrence is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let mut bag = multiset!["a" => 1];
    ///
    /// assert!(bag.remove("a"));
    /// assert!(!bag.remove("a"));
    /// assert!(!bag.contains("a"));
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_multiple(value, 1) > 0
    }

    /// Removes up to `occurrences` occurrences of `value` and returns the
    /// number of occurrences present before the call.
    ///
    /// Removing 0 occurrences is a no-op that returns the current count, and
    /// removing from an absent value returns 0. When `occurrences` meets or
    /// exceeds the current count the record is deleted entirely and the
    /// total length drops by the actual prior count.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let mut bag = multiset!["x" => 5];
    ///
    /// assert_eq!(bag.remove_multiple("x", 10), 5);
    ///
    /// assert_eq!(bag.count("x"), 0);
    /// assert!(!bag.contains("x"));
    /// ```
    pub fn remove_multiple<Q>(&mut self, value: &Q, occurrences: usize) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if occurrences == 0 {
            return self.count(value);
        }

        let Some(multiplicity) = self.records.get_mut(value) else {
            return 0;
        };
        let prior = multiplicity.get();

        match NonZeroUsize::new(prior.saturating_sub(occurrences)) {
            Some(reduced) => {
                *multiplicity = reduced;
                self.len -= occurrences;
            }
            // The request consumed the record; the length drops by the
            // actual prior count, consistent with the returned value.
            None => {
                self.records.swap_remove(value);
                self.len -= prior;
            }
        }

        self.bump();

        prior
    }

    /// Sets the number of occurrences of `value` to exactly `count` and
    /// returns the number of occurrences present before the call.
    ///
    /// Setting the count a value already has is a no-op, as is setting an
    /// absent value to 0. Setting a present value to 0 deletes its record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CountOverflow`] if the total length would exceed
    /// `usize::MAX`. Nothing is mutated in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let mut bag = multiset!["a" => 2];
    ///
    /// assert_eq!(bag.set_count("a", 7), Ok(2));
    /// assert_eq!(bag.set_count("a", 0), Ok(7));
    ///
    /// assert!(!bag.contains("a"));
    /// assert!(bag.is_empty());
    /// ```
    pub fn set_count(&mut self, value: T, count: usize) -> Result<usize, Error> {
        match self.records.entry(value) {
            map::Entry::Occupied(mut entry) => {
                let prior = entry.get().get();

                if count == prior {
                    return Ok(prior);
                }

                match NonZeroUsize::new(count) {
                    Some(target) => {
                        let new_len = if count > prior {
                            self.len
                                .checked_add(count - prior)
                                .ok_or(Error::CountOverflow)?
                        } else {
                            self.len - (prior - count)
                        };

                        entry.insert(target);
                        self.len = new_len;
                    }
                    None => {
                        entry.swap_remove();
                        self.len -= prior;
                    }
                }

                self.bump();

                Ok(prior)
            }
            map::Entry::Vacant(entry) => {
                let Some(target) = NonZeroUsize::new(count) else {
                    return Ok(0);
                };

                let new_len = self.len.checked_add(count).ok_or(Error::CountOverflow)?;

                entry.insert(target);
                self.len = new_len;
                self.bump();

                Ok(0)
            }
        }
    }

    /// This method is used by the `multiset!` macro.
    #[doc(hidden)]
    #[inline]
    pub fn from_elem(value: T, occurrences: usize) -> Self {
        let mut multiset = Self::new();

        if let Some(multiplicity) = NonZeroUsize::new(occurrences) {
            multiset.records.insert(value, multiplicity);
            multiset.len = occurrences;
        }

        multiset
    }
}

impl<T> Default for HashMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HashMultiset<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_map().entries(self.counts()).finish()
    }
}

impl<T> PartialEq for HashMultiset<T>
where
    T: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.records.len() == other.records.len()
            && self
                .records
                .iter()
                .all(|(value, multiplicity)| other.records.get(value) == Some(multiplicity))
    }
}

impl<T> Eq for HashMultiset<T> where T: Eq + Hash {}

impl<T> Hash for HashMultiset<T>
where
    T: Hash,
{
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        // The record hashes are combined with a commutative operation so
        // that permuted insertion orders produce the same hash.
        let mut combined: u64 = 0;

        for (value, multiplicity) in &self.records {
            let mut hasher = FxHasher::default();
            value.hash(&mut hasher);
            multiplicity.hash(&mut hasher);

            combined = combined.wrapping_add(hasher.finish());
        }

        state.write_u64(combined);
    }
}

impl<T> FromIterator<T> for HashMultiset<T>
where
    T: Eq + Hash,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut multiset = Self::new();
        multiset.extend(iter);

        multiset
    }
}

impl<T> FromIterator<(T, usize)> for HashMultiset<T>
where
    T: Eq + Hash,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, usize)>,
    {
        let mut multiset = Self::new();
        multiset.extend(iter);

        multiset
    }
}

impl<T> Extend<T> for HashMultiset<T>
where
    T: Eq + Hash,
{
    /// # Panics
    ///
    /// Panics if an occurrence count overflows a `usize`.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            if self.insert_multiple(value, 1).is_err() {
                panic!("occurrence count overflowed usize");
            }
        }
    }
}

impl<T> Extend<(T, usize)> for HashMultiset<T>
where
    T: Eq + Hash,
{
    /// # Panics
    ///
    /// Panics if an occurrence count overflows a `usize`.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, usize)>,
    {
        for (value, occurrences) in iter {
            if self.insert_multiple(value, occurrences).is_err() {
                panic!("occurrence count overflowed usize");
            }
        }
    }
}

impl<T> IntoIterator for HashMultiset<T> {
    type Item = (T, NonZeroUsize);
    type IntoIter = map::IntoIter<T, NonZeroUsize>;

    /// Consumes the multiset and iterates its records as
    /// `(value, multiplicity)` pairs.
    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a HashMultiset<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(feature = "rayon")]
impl<T> FromParallelIterator<T> for HashMultiset<T>
where
    T: Eq + Hash + Send,
{
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = T>,
    {
        par_iter
            .into_par_iter()
            .fold(Self::new, |mut multiset, value| {
                multiset.extend(Some(value));

                multiset
            })
            .reduce(Self::new, |mut left, right| {
                left.extend(
                    right
                        .into_iter()
                        .map(|(value, multiplicity)| (value, multiplicity.get())),
                );

                left
            })
    }
}

#[cfg(feature = "rayon")]
impl<T> ParallelExtend<T> for HashMultiset<T>
where
    T: Eq + Hash + Send,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = T>,
    {
        let other: Self = par_iter.into_par_iter().collect();

        self.extend(
            other
                .into_iter()
                .map(|(value, multiplicity)| (value, multiplicity.get())),
        );
    }
}

#[cfg(feature = "proptest")]
impl<T> Arbitrary for HashMultiset<T>
where
    T: Arbitrary + Eq + Hash + 'static,
    T::Strategy: 'static,
{
    type Parameters = (proptest::collection::SizeRange, T::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (size_range, params) = params;
        let params = (size_range, (params, ()));

        (Vec::<(T, usize)>::arbitrary_with(params))
            .prop_map(|vec| {
                // Small multiplicities keep shrinking fast without losing
                // the interesting cases.
                vec.into_iter()
                    .map(|(value, occurrences)| (value, occurrences % 4 + 1))
                    .collect()
            })
            .boxed()
    }
}

/// An iterator over the occurrences of a `HashMultiset<T>`.
///
/// Each distinct value is yielded exactly `count` times in a row.
///
/// This struct is created by the [`iter`] method on [`HashMultiset<T>`].
/// See its documentation for more.
///
/// [`iter`]: struct.HashMultiset.html#method.iter
/// [`HashMultiset<T>`]: struct.HashMultiset.html
#[derive(Clone, Debug)]
pub struct Iter<'a, T: 'a> {
    records: map::Iter<'a, T, NonZeroUsize>,
    /// The value currently being expanded and the occurrences it has left.
    current: Option<(&'a T, usize)>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let (value, left) = match self.current.take() {
            Some(current) => current,
            None => {
                let (value, multiplicity) = self.records.next()?;

                (value, multiplicity.get())
            }
        };

        if left > 1 {
            self.current = Some((value, left - 1));
        }
        self.remaining -= 1;

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// An iterator over the distinct values of a `HashMultiset<T>`.
///
/// This struct is created by the [`distinct_elements`] method on
/// [`HashMultiset<T>`]. See its documentation for more.
///
/// [`distinct_elements`]: struct.HashMultiset.html#method.distinct_elements
/// [`HashMultiset<T>`]: struct.HashMultiset.html
#[derive(Clone, Debug)]
pub struct DistinctElements<'a, T: 'a> {
    inner: map::Keys<'a, T, NonZeroUsize>,
}

impl<'a, T> Iterator for DistinctElements<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for DistinctElements<'a, T> {}

impl<'a, T> FusedIterator for DistinctElements<'a, T> {}

/// An iterator over the `(value, multiplicity)` records of a
/// `HashMultiset<T>`.
///
/// This struct is created by the [`counts`] method on [`HashMultiset<T>`].
/// See its documentation for more.
///
/// [`counts`]: struct.HashMultiset.html#method.counts
/// [`HashMultiset<T>`]: struct.HashMultiset.html
#[derive(Clone, Debug)]
pub struct Counts<'a, T: 'a> {
    inner: map::Iter<'a, T, NonZeroUsize>,
}

impl<'a, T> Iterator for Counts<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<(&'a T, usize)> {
        self.inner
            .next()
            .map(|(value, multiplicity)| (value, multiplicity.get()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for Counts<'a, T> {}

impl<'a, T> FusedIterator for Counts<'a, T> {}

/// A detached fail-fast cursor over the occurrences of a `HashMultiset<T>`.
///
/// This struct is created by the [`cursor`] method on [`HashMultiset<T>`].
/// See its documentation for more.
///
/// [`cursor`]: struct.HashMultiset.html#method.cursor
/// [`HashMultiset<T>`]: struct.HashMultiset.html
#[derive(Clone, Debug)]
pub struct Cursor {
    /// The modification counter of the multiset when the cursor was created.
    expected_version: u64,
    /// The position of the record currently being expanded.
    record: usize,
    /// The occurrences of the current record that were already yielded.
    yielded: usize,
}

impl Cursor {
    /// Advances the cursor against the multiset that created it, yielding
    /// the next occurrence or `Ok(None)` once every occurrence was visited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConcurrentModification`] if the multiset was mutated
    /// after the cursor was created, no matter how far the cursor had
    /// advanced before the mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::multiset;
    ///
    /// let bag = multiset!["a" => 2];
    /// let mut cursor = bag.cursor();
    ///
    /// assert_eq!(cursor.next(&bag), Ok(Some(&"a")));
    /// assert_eq!(cursor.next(&bag), Ok(Some(&"a")));
    /// assert_eq!(cursor.next(&bag), Ok(None));
    /// ```
    pub fn next<'a, T>(&mut self, multiset: &'a HashMultiset<T>) -> Result<Option<&'a T>, Error> {
        if self.expected_version != multiset.version {
            return Err(Error::ConcurrentModification);
        }

        while let Some((value, multiplicity)) = multiset.records.get_index(self.record) {
            if self.yielded < multiplicity.get() {
                self.yielded += 1;

                return Ok(Some(value));
            }

            self.record += 1;
            self.yielded = 0;
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);

        hasher.finish()
    }

    #[test]
    fn insert_multiple_returns_the_prior_count() {
        let mut bag = HashMultiset::new();

        assert_eq!(bag.insert_multiple("x", 3), Ok(0));
        assert_eq!(bag.insert_multiple("x", 2), Ok(3));
        assert_eq!(bag.count("x"), 5);

        assert_eq!(bag.remove_multiple("x", 10), 5);
        assert_eq!(bag.count("x"), 0);
        assert!(!bag.contains("x"));
        assert!(bag.is_empty());
    }

    #[test]
    fn single_occurrence_insert_and_remove() {
        let mut bag = HashMultiset::new();

        bag.insert("y").unwrap();
        bag.insert("y").unwrap();
        bag.insert("y").unwrap();

        assert!(bag.remove("y"));
        assert_eq!(bag.count("y"), 2);
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn inserting_zero_occurrences_is_a_no_op() {
        let mut bag = HashMultiset::new();

        assert_eq!(bag.insert_multiple("x", 0), Ok(0));
        assert!(!bag.contains("x"));
        assert!(bag.is_empty());

        bag.insert("x").unwrap();

        assert_eq!(bag.insert_multiple("x", 0), Ok(1));
        assert_eq!(bag.count("x"), 1);
    }

    #[test]
    fn removing_zero_occurrences_is_a_no_op() {
        let mut bag = HashMultiset::new();
        bag.insert_multiple("x", 2).unwrap();

        let cursor = bag.cursor();

        assert_eq!(bag.remove_multiple("x", 0), 2);
        assert_eq!(bag.count("x"), 2);

        // The no-op left the modification counter alone.
        let mut cursor = cursor;
        assert_eq!(cursor.next(&bag), Ok(Some(&"x")));
    }

    #[test]
    fn removing_an_absent_value_reports_zero() {
        let mut bag: HashMultiset<&str> = HashMultiset::new();

        assert_eq!(bag.remove_multiple("x", 3), 0);
        assert!(!bag.remove("x"));
    }

    #[test]
    fn removal_restores_the_count_before_insertion() {
        let mut bag = HashMultiset::new();
        bag.insert_multiple('a', 2).unwrap();

        bag.insert_multiple('a', 7).unwrap();
        bag.remove_multiple(&'a', 7);

        assert_eq!(bag.count(&'a'), 2);
    }

    #[test]
    fn set_count_adjusts_the_length_by_the_delta() {
        let mut bag = HashMultiset::new();

        assert_eq!(bag.set_count("a", 4), Ok(0));
        assert_eq!(bag.len(), 4);

        assert_eq!(bag.set_count("a", 2), Ok(4));
        assert_eq!(bag.len(), 2);

        assert_eq!(bag.set_count("a", 9), Ok(2));
        assert_eq!(bag.len(), 9);

        assert_eq!(bag.set_count("a", 0), Ok(9));
        assert!(bag.is_empty());
        assert!(!bag.contains("a"));

        // Setting an absent value to 0 changes nothing.
        assert_eq!(bag.set_count("b", 0), Ok(0));
        assert!(bag.is_empty());
    }

    #[test]
    fn set_count_to_the_current_count_preserves_cursors() {
        let mut bag = HashMultiset::new();
        bag.insert_multiple("a", 3).unwrap();

        let mut cursor = bag.cursor();

        assert_eq!(bag.set_count("a", 3), Ok(3));
        assert_eq!(cursor.next(&bag), Ok(Some(&"a")));
    }

    #[test]
    fn iteration_expands_multiplicities() {
        let bag: HashMultiset<char> = multiset!['a' => 3, 'b' => 1, 'c' => 2];

        assert_eq!(bag.iter().len(), 6);
        assert_eq!(bag.iter().count(), bag.len());

        for (value, count) in bag.counts() {
            assert_eq!(bag.iter().filter(|&candidate| candidate == value).count(), count);
        }
    }

    #[test]
    fn cursor_drains_every_occurrence() {
        let bag: HashMultiset<char> = multiset!['a' => 2, 'b' => 1];
        let mut cursor = bag.cursor();

        let mut drained = Vec::new();
        while let Some(value) = cursor.next(&bag).unwrap() {
            drained.push(*value);
        }
        drained.sort();

        assert_eq!(drained, vec!['a', 'a', 'b']);
        // A drained cursor stays drained.
        assert_eq!(cursor.next(&bag), Ok(None));
    }

    #[test]
    fn cursor_fails_fast_after_any_mutation() {
        let mut bag = multiset!["a" => 2, "b" => 1];

        let mut cursor = bag.cursor();
        assert_eq!(cursor.next(&bag), Ok(Some(&"a")));

        bag.insert("c").unwrap();

        assert_eq!(cursor.next(&bag), Err(Error::ConcurrentModification));
        // The failure is sticky.
        assert_eq!(cursor.next(&bag), Err(Error::ConcurrentModification));

        let mut cursor = bag.cursor();
        bag.remove("b");
        assert_eq!(cursor.next(&bag), Err(Error::ConcurrentModification));

        let mut cursor = bag.cursor();
        bag.set_count("a", 9).unwrap();
        assert_eq!(cursor.next(&bag), Err(Error::ConcurrentModification));

        let mut cursor = bag.cursor();
        bag.clear();
        assert_eq!(cursor.next(&bag), Err(Error::ConcurrentModification));
    }

    #[test]
    fn count_overflow_is_reported_before_mutation() {
        let mut bag = HashMultiset::new();
        bag.set_count("a", usize::MAX).unwrap();

        assert_eq!(bag.insert("a"), Err(Error::CountOverflow));
        assert_eq!(bag.insert_multiple("a", 2), Err(Error::CountOverflow));
        // The total length is saturated as well, so other values are
        // rejected too.
        assert_eq!(bag.insert("b"), Err(Error::CountOverflow));
        assert_eq!(bag.set_count("b", 1), Err(Error::CountOverflow));

        assert_eq!(bag.count("a"), usize::MAX);
        assert_eq!(bag.len(), usize::MAX);
        assert!(!bag.contains("b"));
    }

    #[test]
    fn failed_operations_preserve_cursors() {
        let mut bag = HashMultiset::new();
        bag.set_count("a", usize::MAX).unwrap();

        let mut cursor = bag.cursor();
        assert_eq!(bag.insert("b"), Err(Error::CountOverflow));

        assert_eq!(cursor.next(&bag), Ok(Some(&"a")));
    }

    #[test]
    fn distinct_elements_discards_multiplicities() {
        let bag = multiset!["a" => 2, "b" => 1];

        let mut values: Vec<&str> = bag.distinct_elements().copied().collect();
        values.sort();

        assert_eq!(values, vec!["a", "b"]);
        assert_eq!(bag.distinct_len(), 2);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let forward: HashMultiset<u32> = vec![1, 2, 2, 3, 3, 3].into_iter().collect();
        let backward: HashMultiset<u32> = vec![3, 3, 3, 2, 2, 1].into_iter().collect();

        assert_eq!(forward, backward);
        assert_eq!(hash_of(&forward), hash_of(&backward));

        let mut different = backward;
        different.remove(&1);

        assert_ne!(forward, different);
    }

    #[test]
    fn equality_compares_multiplicities() {
        let left = multiset!["a" => 2, "b" => 1];
        let right = multiset!["a" => 1, "b" => 2];

        // Same length and same distinct values, different multiplicities.
        assert_eq!(left.len(), right.len());
        assert_ne!(left, right);
    }

    #[test]
    fn macro_forms_agree() {
        let from_list = multiset!['x', 'x', 'y'];
        let from_counts = multiset!['x' => 2, 'y' => 1];

        assert_eq!(from_list, from_counts);

        let repeated = multiset!['x'; 4];

        assert_eq!(repeated.count(&'x'), 4);
        assert_eq!(repeated.len(), 4);

        let empty: HashMultiset<char> = multiset![];
        assert!(empty.is_empty());
    }

    #[test]
    fn counted_pairs_accumulate() {
        let bag: HashMultiset<&str> = vec![("a", 2), ("a", 3)].into_iter().collect();

        assert_eq!(bag.count("a"), 5);
    }

    #[test]
    fn into_iterator_yields_records() {
        let bag = multiset!["a" => 2];
        let records: Vec<(&str, usize)> = bag
            .into_iter()
            .map(|(value, multiplicity)| (value, multiplicity.get()))
            .collect();

        assert_eq!(records, vec![("a", 2)]);
    }
}

#[cfg(all(test, feature = "proptest"))]
mod props {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn length_is_the_sum_of_the_multiplicities(
            bag in any::<HashMultiset<u8>>(),
        ) {
            let total: usize = bag.counts().map(|(_, count)| count).sum();

            prop_assert_eq!(total, bag.len());
            prop_assert_eq!(bag.iter().count(), bag.len());
        }

        #[test]
        fn insert_then_remove_restores_the_count(
            bag in any::<HashMultiset<u8>>(),
            value in any::<u8>(),
            occurrences in 1usize..32,
        ) {
            let mut bag = bag;
            let before = bag.count(&value);

            bag.insert_multiple(value, occurrences).unwrap();
            prop_assert_eq!(bag.count(&value), before + occurrences);

            bag.remove_multiple(&value, occurrences);
            prop_assert_eq!(bag.count(&value), before);
        }

        #[test]
        fn construction_order_does_not_matter(
            values in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let forward: HashMultiset<u8> = values.iter().copied().collect();
            let backward: HashMultiset<u8> = values.iter().rev().copied().collect();

            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn a_cursor_agrees_with_the_borrowing_iterator(
            bag in any::<HashMultiset<u8>>(),
        ) {
            let mut cursor = bag.cursor();
            let mut drained = Vec::new();

            while let Some(value) = cursor.next(&bag).unwrap() {
                drained.push(*value);
            }

            let mut borrowed: Vec<u8> = bag.iter().copied().collect();
            drained.sort_unstable();
            borrowed.sort_unstable();

            prop_assert_eq!(drained, borrowed);
        }
    }
}
