//! Insertion-ordered set of adjacent symbol pairs.
//!
//! The merge tie-break depends on the order in which pairs first occur in a
//! word, so this keeps a `Vec` for order and an `AHashSet` for O(1)
//! duplicate checks.

use crate::core::merges::Pair;
use ahash::AHashSet;
use compact_str::CompactString;

/// Distinct pairs in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct OrderedPairSet {
    order: Vec<Pair>,
    seen: AHashSet<Pair>,
}

impl OrderedPairSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            seen: AHashSet::with_capacity(capacity),
        }
    }

    /// Collect the distinct adjacent pairs of `word`, left to right.
    pub fn from_word(word: &[CompactString]) -> Self {
        let mut set = Self::with_capacity(word.len().saturating_sub(1));
        for window in word.windows(2) {
            set.insert((window[0].clone(), window[1].clone()));
        }
        set
    }

    /// Insert a pair. Returns `false` if it was already present, in which
    /// case its original position is kept.
    pub fn insert(&mut self, pair: Pair) -> bool {
        if self.seen.contains(&pair) {
            return false;
        }
        self.seen.insert(pair.clone());
        self.order.push(pair);
        true
    }

    /// Whether the pair is in the set.
    #[inline]
    pub fn contains(&self, pair: &Pair) -> bool {
        self.seen.contains(pair)
    }

    /// Pairs in first-occurrence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.order.iter()
    }

    /// Number of distinct pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'a> IntoIterator for &'a OrderedPairSet {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
