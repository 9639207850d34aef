/// The set membership of a single element in a [`LinkedDisjointSets`].
///
/// For each payload in the arena we store one `Node`.
///
/// [`LinkedDisjointSets`]: crate::LinkedDisjointSets
#[derive(Clone, Debug, Default)]
pub(crate) struct Node {
    /// The index of the representative of the set this element belongs to,
    /// or `None` while the element does not belong to any set.
    /// A representative points at itself.
    representative: Option<usize>,
    /// The index of the next member of the same set.
    /// These form a chain that starts at the representative and ends at
    /// `None`, visiting every member of the set exactly once.
    next: Option<usize>,
    /// The cardinality of the set.
    /// Only meaningful on the element currently serving as representative.
    size: usize,
}

impl Node {
    /// Create a `Node` for an element that belongs to no set yet.
    pub(crate) fn detached() -> Self {
        Self::default()
    }

    /// Create a `Node` for an element that is the sole member of its own set.
    pub(crate) fn singleton(index: usize) -> Self {
        Self {
            representative: Some(index),
            next: None,
            size: 1,
        }
    }

    /// Return the `representative` variable.
    pub(crate) fn representative(&self) -> Option<usize> {
        self.representative
    }

    /// Set the `representative` variable.
    pub(crate) fn set_representative(&mut self, value: Option<usize>) {
        self.representative = value;
    }

    /// Return the `next` variable.
    pub(crate) fn next(&self) -> Option<usize> {
        self.next
    }

    /// Set the `next` variable.
    pub(crate) fn set_next(&mut self, value: Option<usize>) {
        self.next = value;
    }

    /// Return the `size` variable.
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Set the `size` variable.
    pub(crate) fn set_size(&mut self, value: usize) {
        self.size = value;
    }
}
