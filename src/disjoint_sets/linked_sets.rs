//! A [disjoint-sets/union-find] implementation built on explicit linked
//! membership lists.
//!
//! See [`LinkedDisjointSets<T>`] for more information.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`LinkedDisjointSets<T>`]: struct.LinkedDisjointSets.html

use std::{
    collections::hash_set,
    fmt,
    iter::{FromIterator, FusedIterator},
    ops,
};

use rustc_hash::{FxHashMap, FxHashSet};

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

use crate::{disjoint_sets::node::Node, error::Error};

/// A [disjoint-sets/union-find] implementation built on explicit linked
/// membership lists.
///
/// Elements live in an arena and are designated by the `usize` index that
/// [`push`] returns. A freshly pushed element belongs to no set; [`make_set`]
/// registers it as a singleton, and [`union`] joins two sets by splicing the
/// membership chain of the smaller one into the chain of the larger one. The
/// chain of a set starts at its representative and visits every member
/// exactly once, which is what makes [`set`] iteration possible without
/// touching the rest of the structure.
///
/// [`find_set`] is `O(1)`: every member stores the index of its
/// representative directly and no path compression is needed. The price is
/// paid by [`union`], whose cost is exactly proportional to the cardinality
/// of the smaller operand set. Because the smaller set is always the one that
/// is absorbed, any sequence of unions over `n` elements costs `O(n log n)`
/// in total.
///
/// # Examples
///
/// ```
/// use setbag::disjoint_sets;
///
/// let mut sets = disjoint_sets!['a', 'b', 'c', 'd'];
/// sets.union(1, 2).unwrap();
/// sets.union(2, 3).unwrap();
///
/// assert!(sets.same_set(1, 3).unwrap());
/// assert_eq!(sets.amount_of_sets(), 2);
///
/// for (index, &value) in sets.set(1).unwrap() {
///     assert!(index >= 1);
///     assert!(value != 'a');
/// }
/// ```
///
/// [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
/// [`push`]: #method.push
/// [`make_set`]: #method.make_set
/// [`find_set`]: #method.find_set
/// [`union`]: #method.union
/// [`set`]: #method.set
#[derive(Clone)]
pub struct LinkedDisjointSets<T> {
    /// Each index has a payload.
    /// We store these in a separate `Vec` so we can easily dereference it to
    /// a slice.
    data: Vec<T>,
    /// The membership metadata for each payload, this vec will always have
    /// the same length as `data`.
    nodes: Vec<Node>,
    /// The indices of all current representatives, one per disjoint set.
    representatives: FxHashSet<usize>,
}

impl<T> LinkedDisjointSets<T> {
    /// Constructs a new, empty `LinkedDisjointSets<T>`.
    ///
    /// The `LinkedDisjointSets<T>` will not allocate until elements are
    /// pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// use setbag::LinkedDisjointSets;
    ///
    /// let mut sets: LinkedDisjointSets<()> = LinkedDisjointSets::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            nodes: Vec::new(),
            representatives: FxHashSet::default(),
        }
    }

    /// Constructs a new, empty `LinkedDisjointSets<T>` with the specified
    /// capacity.
    ///
    /// The `LinkedDisjointSets<T>` will be able to hold exactly `capacity`
    /// elements without reallocating the arena.
    /// If `capacity` is 0, it will not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::LinkedDisjointSets;
    ///
    /// let mut sets = LinkedDisjointSets::with_capacity(10);
    ///
    /// assert!(sets.len() == 0);
    /// assert!(sets.capacity() >= 10);
    ///
    /// // This can be done without reallocating.
    /// for i in 0 .. 10 {
    ///     sets.push(i);
    /// }
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            representatives: FxHashSet::default(),
        }
    }

    /// Returns the number of elements the arena can hold without
    /// reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        usize::min(self.data.capacity(), self.nodes.capacity())
    }

    /// Appends an element to the arena and returns its index.
    ///
    /// The element does not belong to any set yet; call [`make_set`] to
    /// register it as a singleton.
    ///
    /// # Panics
    ///
    /// Panics if the number of elements overflows a `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::LinkedDisjointSets;
    ///
    /// let mut sets = LinkedDisjointSets::new();
    ///
    /// let index = sets.push('a');
    ///
    /// assert!(!sets.is_present(index));
    /// sets.make_set(index).unwrap();
    /// assert!(sets.is_present(index));
    /// ```
    ///
    /// [`make_set`]: #method.make_set
    #[inline]
    pub fn push(&mut self, value: T) -> usize {
        let index = self.data.len();

        self.data.push(value);
        self.nodes.push(Node::detached());

        index
    }

    /// Appends an element that is immediately registered as the sole member
    /// of its own set, and returns its index.
    ///
    /// Equivalent to [`push`] followed by [`make_set`].
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::LinkedDisjointSets;
    ///
    /// let mut sets = LinkedDisjointSets::new();
    ///
    /// let index = sets.push_singleton('a');
    ///
    /// assert_eq!(sets.find_set(index), Ok(index));
    /// assert_eq!(sets.len_of_set(index), Ok(1));
    /// ```
    ///
    /// [`push`]: #method.push
    /// [`make_set`]: #method.make_set
    #[inline]
    pub fn push_singleton(&mut self, value: T) -> usize {
        let index = self.data.len();

        self.data.push(value);
        self.nodes.push(Node::singleton(index));
        self.representatives.insert(index);

        index
    }

    /// Returns `true` if the element at `index` belongs to some disjoint
    /// set.
    ///
    /// Unlike the other queries this method never panics and never fails: an
    /// index outside the arena designates no element and is simply not
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::LinkedDisjointSets;
    ///
    /// let mut sets = LinkedDisjointSets::new();
    /// let index = sets.push('a');
    ///
    /// assert!(!sets.is_present(index));
    /// assert!(!sets.is_present(1000));
    ///
    /// sets.make_set(index).unwrap();
    ///
    /// assert!(sets.is_present(index));
    /// ```
    #[inline]
    pub fn is_present(&self, index: usize) -> bool {
        self.nodes
            .get(index)
            .map_or(false, |node| node.representative().is_some())
    }

    /// Registers the element at `index` as the sole member of a new
    /// singleton set.
    ///
    /// The element becomes its own representative with cardinality 1, and is
    /// added to the collection of current representatives. `O(1)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInSet`] if the element already belongs to a
    /// disjoint set.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::{Error, LinkedDisjointSets};
    ///
    /// let mut sets = LinkedDisjointSets::new();
    /// let index = sets.push('a');
    ///
    /// assert_eq!(sets.make_set(index), Ok(()));
    /// assert_eq!(sets.make_set(index), Err(Error::AlreadyInSet));
    /// ```
    pub fn make_set(&mut self, index: usize) -> Result<(), Error> {
        if self.nodes[index].representative().is_some() {
            return Err(Error::AlreadyInSet);
        }

        self.nodes[index] = Node::singleton(index);
        self.representatives.insert(index);

        Ok(())
    }

    /// Returns the index of the representative of the set that `index`
    /// belongs to.
    ///
    /// `O(1)`: every member stores its representative directly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInAnySet`] if the element does not belong to any
    /// disjoint set.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::disjoint_sets;
    ///
    /// let mut sets = disjoint_sets!['a', 'b'];
    /// sets.union(0, 1).unwrap();
    ///
    /// assert_eq!(sets.find_set(1), Ok(0));
    /// ```
    #[inline]
    pub fn find_set(&self, index: usize) -> Result<usize, Error> {
        self.nodes[index].representative().ok_or(Error::NotInAnySet)
    }

    /// Joins the sets of `first_index` and `second_index`.
    ///
    /// If both elements already share a representative this is a no-op.
    /// Otherwise the set with the larger cardinality absorbs the smaller
    /// one; when the cardinalities are equal the set of `first_index`
    /// absorbs. The membership chain of the smaller set is spliced between
    /// the surviving representative and its old successor, every spliced
    /// member is rewritten to point at the surviving representative in a
    /// single pass, and the absorbed representative is removed from the
    /// collection of current representatives.
    ///
    /// The cost is exactly proportional to the cardinality of the smaller
    /// operand set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInAnySet`] if either element does not belong to
    /// any disjoint set. Nothing is mutated in that case.
    ///
    /// # Panics
    ///
    /// If `first_index` or `second_index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::disjoint_sets;
    ///
    /// let mut sets = disjoint_sets![(); 4];
    ///
    /// // All elements start out in their own sets.
    /// assert_eq!(sets.len_of_set(1), Ok(1));
    ///
    /// sets.union(1, 2).unwrap();
    ///
    /// // Now 1 and 2 share a set, and the tie went to the first operand.
    /// assert_eq!(sets.len_of_set(2), Ok(2));
    /// assert_eq!(sets.find_set(2), Ok(1));
    ///
    /// sets.union(3, 2).unwrap();
    ///
    /// // We added 3 to the larger existing set.
    /// assert_eq!(sets.len_of_set(3), Ok(3));
    /// assert_eq!(sets.find_set(3), Ok(1));
    /// ```
    pub fn union(&mut self, first_index: usize, second_index: usize) -> Result<(), Error> {
        let first_root = self.find_set(first_index)?;
        let second_root = self.find_set(second_index)?;

        if first_root == second_root {
            return Ok(());
        }

        // The larger set absorbs the smaller; ties go to the first operand.
        let (big, small) = if self.nodes[first_root].size() >= self.nodes[second_root].size() {
            (first_root, second_root)
        } else {
            (second_root, first_root)
        };

        self.representatives.remove(&small);

        let combined = self.nodes[big].size() + self.nodes[small].size();
        let old_next = self.nodes[big].next();
        self.nodes[big].set_next(Some(small));
        self.nodes[big].set_size(combined);

        // A single pass over the smaller chain rewrites every representative
        // and ends on the chain's last member.
        let mut current = small;
        loop {
            self.nodes[current].set_representative(Some(big));

            match self.nodes[current].next() {
                Some(next) => current = next,
                None => break,
            }
        }
        self.nodes[current].set_next(old_next);

        Ok(())
    }

    /// Returns `true` if `first_index` and `second_index` are members of the
    /// same set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInAnySet`] if either element does not belong to
    /// any disjoint set.
    ///
    /// # Panics
    ///
    /// If `first_index` or `second_index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::disjoint_sets;
    ///
    /// let mut sets = disjoint_sets![(); 4];
    ///
    /// sets.union(1, 3).unwrap();
    /// sets.union(0, 1).unwrap();
    ///
    /// assert_eq!(sets.same_set(0, 3), Ok(true));
    /// assert_eq!(sets.same_set(0, 2), Ok(false));
    /// ```
    #[inline]
    pub fn same_set(&self, first_index: usize, second_index: usize) -> Result<bool, Error> {
        Ok(self.find_set(first_index)? == self.find_set(second_index)?)
    }

    /// Returns the cardinality of the set that `index` belongs to.
    ///
    /// `O(1)`: the cardinality is stored on the representative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInAnySet`] if the element does not belong to any
    /// disjoint set.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::disjoint_sets;
    ///
    /// let mut sets = disjoint_sets!['a', 'b', 'c'];
    /// sets.union(0, 2).unwrap();
    ///
    /// assert_eq!(sets.len_of_set(0), Ok(2));
    /// assert_eq!(sets.len_of_set(1), Ok(1));
    /// ```
    #[inline]
    pub fn len_of_set(&self, index: usize) -> Result<usize, Error> {
        let root = self.find_set(index)?;

        Ok(self.nodes[root].size())
    }

    /// Returns an iterator over the members of the set that `index` belongs
    /// to, obtained by walking the membership chain from the representative.
    ///
    /// The iterator yields pairs `(i, &value)` where `i` is the index of the
    /// member and `value` is its payload. The representative is yielded
    /// first; the order of the remaining members is not specified. The next
    /// member is found in `O(1)` time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInAnySet`] if the element does not belong to any
    /// disjoint set.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::disjoint_sets;
    ///
    /// let mut sets = disjoint_sets![
    ///     'a' => "first set",
    ///     'b' => "first set",
    ///     'c' => "second set",
    /// ];
    ///
    /// let mut members: Vec<usize> = sets.set(0).unwrap().map(|(i, _)| i).collect();
    /// members.sort();
    ///
    /// assert_eq!(members, vec![0, 1]);
    /// ```
    #[inline]
    pub fn set(&self, index: usize) -> Result<Set<'_, T>, Error> {
        let root = self.find_set(index)?;

        Ok(Set {
            sets: self,
            current: Some(root),
        })
    }

    /// Returns an iterator over the indices of all current representatives.
    ///
    /// There is exactly one representative per disjoint set, so the length
    /// of this iterator is the number of partitions. The order is not
    /// specified.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::disjoint_sets;
    ///
    /// let mut sets = disjoint_sets!['a', 'b', 'c'];
    /// sets.union(0, 1).unwrap();
    ///
    /// let mut representatives: Vec<usize> = sets.representatives().collect();
    /// representatives.sort();
    ///
    /// assert_eq!(representatives, vec![0, 2]);
    /// ```
    #[inline]
    pub fn representatives(&self) -> Representatives<'_> {
        Representatives {
            inner: self.representatives.iter(),
        }
    }

    /// Returns the number of disjoint sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::disjoint_sets;
    ///
    /// let mut sets = disjoint_sets![(); 3];
    ///
    /// assert_eq!(sets.amount_of_sets(), 3);
    ///
    /// sets.union(0, 1).unwrap();
    /// sets.union(0, 2).unwrap();
    ///
    /// assert_eq!(sets.amount_of_sets(), 1);
    /// ```
    #[inline]
    pub fn amount_of_sets(&self) -> usize {
        self.representatives.len()
    }

    /// Returns an iterator over all current sets.
    ///
    /// The iterator yields a [`Set`] iterator for every partition, in no
    /// specified order.
    ///
    /// # Examples
    ///
    /// ```
    /// use setbag::disjoint_sets;
    ///
    /// let mut sets = disjoint_sets![
    ///     0 => 'a',
    ///     0 => 'a',
    ///     2 => 'b',
    ///     2 => 'b',
    /// ];
    ///
    /// for set in sets.all_sets() {
    ///     assert_eq!(set.count(), 2);
    /// }
    /// ```
    ///
    /// [`Set`]: struct.Set.html
    #[inline]
    pub fn all_sets(&self) -> AllSets<'_, T> {
        AllSets {
            sets: self,
            representatives: self.representatives.iter(),
        }
    }

    /// This method is used by the `disjoint_sets!` macro.
    #[doc(hidden)]
    #[inline]
    pub fn from_elem(elem: T, len: usize) -> Self
    where
        T: Clone,
    {
        Self {
            data: vec![elem; len],
            nodes: (0..len).map(Node::singleton).collect(),
            representatives: (0..len).collect(),
        }
    }
}

impl<T> Default for LinkedDisjointSets<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LinkedDisjointSets<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        // We map the representatives to `usize` names; detached elements are
        // shown with `_` in place of a name.
        let mut map = FxHashMap::default();
        let mut builder = formatter.debug_list();
        let mut names = 0;

        for index in 0..self.data.len() {
            match self.nodes[index].representative() {
                Some(root) => {
                    let name = *map.entry(root).or_insert_with(|| {
                        let new_name = names;
                        names += 1;

                        new_name
                    });

                    builder.entry(&format_args!("{:?} => {}", self.data[index], name));
                }
                None => {
                    builder.entry(&format_args!("{:?} => _", self.data[index]));
                }
            }
        }

        builder.finish()
    }
}

impl<T> PartialEq for LinkedDisjointSets<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.data.len() != other.data.len() {
            return false;
        }

        // We map the representatives of self to the representatives of
        // other. Equal cardinalities guarantee that matched sets coincide
        // instead of one merely containing the other.
        let mut map = FxHashMap::default();

        for index in 0..self.data.len() {
            if self.data[index] != other.data[index] {
                return false;
            }

            let self_root = self.nodes[index].representative();
            let other_root = other.nodes[index].representative();

            match (self_root, other_root) {
                (None, None) => {}
                (Some(self_root), Some(other_root)) => {
                    if let Some(&root) = map.get(&self_root) {
                        // If we have seen this representative we check that
                        // the mapping is the same.
                        if root != other_root {
                            return false;
                        }
                    } else {
                        if self.nodes[self_root].size() != other.nodes[other_root].size() {
                            return false;
                        }

                        map.insert(self_root, other_root);
                    }
                }
                _ => return false,
            }
        }

        true
    }
}

impl<T> Eq for LinkedDisjointSets<T> where T: Eq {}

impl<T, I> ops::Index<I> for LinkedDisjointSets<T>
where
    I: std::slice::SliceIndex<[T]>,
{
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &I::Output {
        (**self).index(index)
    }
}

impl<T, I> ops::IndexMut<I> for LinkedDisjointSets<T>
where
    I: std::slice::SliceIndex<[T]>,
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        (**self).index_mut(index)
    }
}

impl<T> ops::Deref for LinkedDisjointSets<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> ops::DerefMut for LinkedDisjointSets<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> From<Vec<T>> for LinkedDisjointSets<T> {
    fn from(vec: Vec<T>) -> Self {
        let len = vec.len();

        Self {
            data: vec,
            nodes: vec![Node::detached(); len],
            representatives: FxHashSet::default(),
        }
    }
}

impl<T> FromIterator<T> for LinkedDisjointSets<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Vec::from_iter(iter).into()
    }
}

impl<T> Extend<T> for LinkedDisjointSets<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> IntoIterator for LinkedDisjointSets<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> std::vec::IntoIter<T> {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a LinkedDisjointSets<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> std::slice::Iter<'a, T> {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedDisjointSets<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> std::slice::IterMut<'a, T> {
        self.data.iter_mut()
    }
}

#[cfg(feature = "rayon")]
impl<T> FromParallelIterator<T> for LinkedDisjointSets<T>
where
    T: Send,
{
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = T>,
    {
        Vec::from_par_iter(par_iter).into()
    }
}

#[cfg(feature = "rayon")]
impl<T> ParallelExtend<T> for LinkedDisjointSets<T>
where
    T: Send,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = T>,
    {
        let mut vec = Vec::new();
        vec.par_extend(par_iter);
        self.extend(vec);
    }
}

#[cfg(feature = "rayon")]
impl<T> IntoParallelIterator for LinkedDisjointSets<T>
where
    T: Send,
{
    type Item = T;
    type Iter = rayon::vec::IntoIter<T>;

    fn into_par_iter(self) -> Self::Iter {
        self.data.into_par_iter()
    }
}

#[cfg(feature = "rayon")]
impl<'a, T> IntoParallelIterator for &'a LinkedDisjointSets<T>
where
    T: Sync,
{
    type Item = &'a T;
    type Iter = rayon::slice::Iter<'a, T>;

    fn into_par_iter(self) -> Self::Iter {
        self.data.par_iter()
    }
}

#[cfg(feature = "proptest")]
impl<T> Arbitrary for LinkedDisjointSets<T>
where
    T: Arbitrary + 'static,
    T::Strategy: 'static,
{
    type Parameters = (proptest::collection::SizeRange, T::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        use std::collections::hash_map::Entry;

        let (size_range, params) = params;
        let params = (size_range, (params, ()));

        (Vec::<(T, usize)>::arbitrary_with(params))
            .prop_map(|vec| {
                let mut sets = Self::with_capacity(vec.len());

                // We map a `set_number` to an index of that set.
                let mut map = FxHashMap::default();

                for (value, set_number) in vec {
                    let index = sets.push_singleton(value);

                    let set_number = set_number.trailing_zeros();

                    match map.entry(set_number) {
                        Entry::Occupied(occupied) => {
                            let _ = sets.union(*occupied.get(), index);
                        }
                        Entry::Vacant(vacant) => {
                            vacant.insert(index);
                        }
                    }
                }

                sets
            })
            .boxed()
    }
}

/// An iterator over the members of one set in a `LinkedDisjointSets<T>`.
///
/// This struct is created by the [`set`] method on [`LinkedDisjointSets<T>`].
/// See its documentation for more.
///
/// [`set`]: struct.LinkedDisjointSets.html#method.set
/// [`LinkedDisjointSets<T>`]: struct.LinkedDisjointSets.html
#[derive(Clone, Debug)]
pub struct Set<'a, T: 'a> {
    sets: &'a LinkedDisjointSets<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for Set<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<(usize, &'a T)> {
        let current = self.current?;

        self.current = self.sets.nodes[current].next();

        Some((current, &self.sets.data[current]))
    }
}

impl<'a, T> FusedIterator for Set<'a, T> {}

/// An iterator over the indices of the current representatives of a
/// `LinkedDisjointSets<T>`.
///
/// This struct is created by the [`representatives`] method on
/// [`LinkedDisjointSets<T>`]. See its documentation for more.
///
/// [`representatives`]: struct.LinkedDisjointSets.html#method.representatives
/// [`LinkedDisjointSets<T>`]: struct.LinkedDisjointSets.html
#[derive(Clone, Debug)]
pub struct Representatives<'a> {
    inner: hash_set::Iter<'a, usize>,
}

impl<'a> Iterator for Representatives<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for Representatives<'a> {}

impl<'a> FusedIterator for Representatives<'a> {}

/// An iterator over all sets in a `LinkedDisjointSets<T>`.
///
/// This struct is created by the [`all_sets`] method on
/// [`LinkedDisjointSets<T>`]. See its documentation for more.
///
/// [`all_sets`]: struct.LinkedDisjointSets.html#method.all_sets
/// [`LinkedDisjointSets<T>`]: struct.LinkedDisjointSets.html
#[derive(Clone, Debug)]
pub struct AllSets<'a, T: 'a> {
    sets: &'a LinkedDisjointSets<T>,
    representatives: hash_set::Iter<'a, usize>,
}

impl<'a, T> Iterator for AllSets<'a, T> {
    type Item = Set<'a, T>;

    fn next(&mut self) -> Option<Set<'a, T>> {
        let root = *self.representatives.next()?;

        Some(Set {
            sets: self.sets,
            current: Some(root),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.representatives.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for AllSets<'a, T> {}

impl<'a, T> FusedIterator for AllSets<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_set_creates_a_singleton() {
        let mut sets = LinkedDisjointSets::new();
        let a = sets.push('a');

        assert!(!sets.is_present(a));
        assert_eq!(sets.make_set(a), Ok(()));

        assert!(sets.is_present(a));
        assert_eq!(sets.find_set(a), Ok(a));
        assert_eq!(sets.len_of_set(a), Ok(1));
        assert_eq!(sets.amount_of_sets(), 1);
    }

    #[test]
    fn make_set_rejects_registered_elements() {
        let mut sets = LinkedDisjointSets::new();
        let a = sets.push_singleton('a');

        assert_eq!(sets.make_set(a), Err(Error::AlreadyInSet));
    }

    #[test]
    fn queries_reject_detached_elements() {
        let mut sets = LinkedDisjointSets::new();
        let a = sets.push('a');
        let b = sets.push_singleton('b');

        assert_eq!(sets.find_set(a), Err(Error::NotInAnySet));
        assert_eq!(sets.len_of_set(a), Err(Error::NotInAnySet));
        assert_eq!(sets.union(a, b), Err(Error::NotInAnySet));
        assert_eq!(sets.union(b, a), Err(Error::NotInAnySet));
        assert_eq!(sets.same_set(a, b), Err(Error::NotInAnySet));
        assert!(sets.set(a).is_err());
    }

    #[test]
    fn is_present_tolerates_out_of_bounds_indices() {
        let sets: LinkedDisjointSets<char> = LinkedDisjointSets::new();

        assert!(!sets.is_present(0));
        assert!(!sets.is_present(1000));
    }

    #[test]
    fn union_merges_cardinalities_and_keeps_the_first_representative_on_ties() {
        let mut sets = LinkedDisjointSets::new();
        let a = sets.push_singleton('a');
        let b = sets.push_singleton('b');
        let c = sets.push_singleton('c');

        sets.union(a, b).unwrap();

        assert_eq!(sets.len_of_set(a), Ok(2));
        assert_eq!(sets.find_set(b), Ok(a));
        assert_eq!(sets.amount_of_sets(), 2);

        sets.union(b, c).unwrap();

        assert_eq!(sets.len_of_set(c), Ok(3));
        assert_eq!(sets.find_set(a), sets.find_set(c));
        assert_eq!(sets.amount_of_sets(), 1);
    }

    #[test]
    fn union_lets_the_larger_set_absorb_the_smaller() {
        let mut sets = LinkedDisjointSets::new();
        for value in 0..5 {
            sets.push_singleton(value);
        }

        sets.union(3, 4).unwrap();
        // The set {3, 4} is larger, so it absorbs {0} even though 0 is the
        // first operand.
        sets.union(0, 3).unwrap();

        assert_eq!(sets.find_set(0), Ok(3));
        assert_eq!(sets.len_of_set(0), Ok(3));
    }

    #[test]
    fn union_is_idempotent() {
        let mut sets = LinkedDisjointSets::new();
        let a = sets.push_singleton('a');
        let b = sets.push_singleton('b');

        sets.union(a, b).unwrap();
        let before = sets.amount_of_sets();
        sets.union(a, b).unwrap();
        sets.union(b, a).unwrap();

        assert_eq!(sets.amount_of_sets(), before);
        assert_eq!(sets.len_of_set(a), Ok(2));
    }

    #[test]
    fn set_walks_every_member_exactly_once() {
        let mut sets = LinkedDisjointSets::new();
        for value in 0..6 {
            sets.push_singleton(value);
        }
        sets.union(0, 1).unwrap();
        sets.union(2, 3).unwrap();
        sets.union(0, 2).unwrap();

        for member in 0..4 {
            let mut indices: Vec<usize> = sets.set(member).unwrap().map(|(i, _)| i).collect();
            indices.sort();

            assert_eq!(indices, vec![0, 1, 2, 3]);
            assert_eq!(indices.len(), sets.len_of_set(member).unwrap());
        }

        let lonely: Vec<usize> = sets.set(4).unwrap().map(|(i, _)| i).collect();
        assert_eq!(lonely, vec![4]);
    }

    #[test]
    fn set_yields_the_representative_first() {
        let mut sets = LinkedDisjointSets::new();
        let a = sets.push_singleton('a');
        let b = sets.push_singleton('b');
        sets.union(a, b).unwrap();

        let first = sets.set(b).unwrap().next().unwrap();

        assert_eq!(first, (a, &'a'));
    }

    #[test]
    fn representatives_track_unions() {
        let mut sets = LinkedDisjointSets::new();
        for value in 0..4 {
            sets.push_singleton(value);
        }
        sets.union(0, 1).unwrap();

        let mut representatives: Vec<usize> = sets.representatives().collect();
        representatives.sort();

        assert_eq!(representatives, vec![0, 2, 3]);
        assert_eq!(sets.representatives().len(), 3);
    }

    #[test]
    fn all_sets_covers_every_partition_once() {
        let mut sets = LinkedDisjointSets::new();
        for value in 0..5 {
            sets.push_singleton(value);
        }
        sets.union(0, 1).unwrap();
        sets.union(2, 3).unwrap();

        let mut seen: Vec<usize> = sets.all_sets().flat_map(|set| set.map(|(i, _)| i)).collect();
        seen.sort();

        assert_eq!(sets.all_sets().len(), 3);
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn payloads_are_reachable_through_deref() {
        let mut sets = LinkedDisjointSets::new();
        let a = sets.push('a');

        assert_eq!(sets[a], 'a');

        sets[a] = 'z';

        assert_eq!(sets.first(), Some(&'z'));
    }

    #[test]
    fn equality_is_structural() {
        let mut left = LinkedDisjointSets::new();
        let mut right = LinkedDisjointSets::new();
        for value in 0..3 {
            left.push_singleton(value);
            right.push_singleton(value);
        }

        // The same partition reached through different unions.
        left.union(0, 1).unwrap();
        right.union(1, 0).unwrap();

        assert_eq!(left, right);

        right.union(1, 2).unwrap();

        assert_ne!(left, right);
    }

    #[test]
    fn equality_distinguishes_split_partitions() {
        let mut left = LinkedDisjointSets::new();
        let mut right = LinkedDisjointSets::new();
        for value in 0..2 {
            left.push_singleton(value);
            right.push_singleton(value);
        }

        // Two singletons on the left, one joined pair on the right; a plain
        // representative mapping would conflate these.
        right.union(0, 1).unwrap();

        assert_ne!(left, right);
    }

    #[test]
    fn detached_elements_are_part_of_equality() {
        let mut left = LinkedDisjointSets::new();
        let mut right = LinkedDisjointSets::new();

        left.push('a');
        right.push_singleton('a');

        assert_ne!(left, right);
    }

    #[test]
    fn collected_elements_start_detached() {
        let sets: LinkedDisjointSets<u32> = (0..4).collect();

        assert_eq!(sets.len(), 4);
        assert_eq!(sets.amount_of_sets(), 0);
        assert!(!sets.is_present(0));
    }

    #[test]
    fn debug_names_sets_and_marks_detached_elements() {
        let mut sets = LinkedDisjointSets::new();
        sets.push_singleton('a');
        sets.push('b');

        assert_eq!(format!("{:?}", sets), "['a' => 0, 'b' => _]");
    }
}
