//! A compact set of board cells.

use std::{fmt, iter::FusedIterator};

const WORD_BITS: usize = u64::BITS as usize;

/// A bitset of row-major cell indices for a board of a fixed cell count.
///
/// Used by the solver to pin cells whose tiles must not be moved.
///
/// # Examples
///
/// ```
/// use slidetile_core::CellSet;
///
/// let mut locked = CellSet::new(16);
/// assert!(locked.insert(3));
/// assert!(!locked.insert(3));
/// assert!(locked.contains(3));
/// assert_eq!(locked.iter().collect::<Vec<_>>(), vec![3]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CellSet {
    words: Vec<u64>,
    capacity: usize,
}

impl CellSet {
    /// Creates an empty set able to hold indices `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// Creates a set containing every index in `0..capacity` for which `f` returns `true`.
    #[must_use]
    pub fn from_fn<F>(capacity: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let mut set = Self::new(capacity);
        for i in 0..capacity {
            if f(i) {
                set.insert(i);
            }
        }
        set
    }

    /// Returns the number of indices the set can hold.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `index` is in the set. Out-of-range indices are never contained.
    #[must_use]
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.capacity && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Inserts `index`, returning `true` if it was not present.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the capacity.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(index < self.capacity, "cell index {index} out of range");
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1 << (index % WORD_BITS);
        let inserted = *word & mask == 0;
        *word |= mask;
        inserted
    }

    /// Removes `index`, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1 << (index % WORD_BITS);
        let removed = *word & mask != 0;
        *word &= !mask;
        removed
    }

    /// Removes every index.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Returns the number of indices in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterates over the indices in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            set: self,
            next: 0,
        }
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the indices of a [`CellSet`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    set: &'a CellSet,
    next: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.set.capacity {
            let word = self.set.words[self.next / WORD_BITS] >> (self.next % WORD_BITS);
            if word == 0 {
                self.next = (self.next / WORD_BITS + 1) * WORD_BITS;
                continue;
            }
            let index = self.next + word.trailing_zeros() as usize;
            self.next = index + 1;
            return Some(index);
        }
        None
    }
}

impl FusedIterator for Iter<'_> {}
