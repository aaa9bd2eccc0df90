//! Merge rank table for BPE.
//!
//! Merge rules are stored by symbol string. A rule's rank is its position in
//! the merge list: lower rank = merged earlier.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// A pair of adjacent symbols.
pub type Pair = (CompactString, CompactString);

/// Rank mapping: pair -> rank.
pub type MergeMap = AHashMap<Pair, u32>;

/// Immutable rank table over symbol pairs.
///
/// Pairs missing from the table report the sentinel rank. For a table read
/// from a merge list that is the number of rules; in every table it is
/// greater than each stored rank.
#[derive(Debug, Clone, Default)]
pub struct BpeRanks {
    /// Merge rules: pair -> rank
    ranks: MergeMap,
    /// Rank reported for unknown pairs
    sentinel: u32,
}

impl BpeRanks {
    /// Create an empty rank table. Nothing ever merges with it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rank table from an ordered list of merge rules.
    ///
    /// The first rule gets rank 0, the next rank 1, and so on. A pair that
    /// appears twice is rejected since it would leave a gap in the ranks.
    pub fn from_merges<I, A, B>(merges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<CompactString>,
        B: Into<CompactString>,
    {
        let merges = merges.into_iter();
        let mut ranks = MergeMap::with_capacity(merges.size_hint().0);

        for (rank, (first, second)) in merges.enumerate() {
            let pair = (first.into(), second.into());
            if ranks.contains_key(&pair) {
                return Err(TokenizerError::Load(format!(
                    "Duplicate merge rule '{} {}' at rank {}",
                    pair.0, pair.1, rank
                )));
            }
            ranks.insert(pair, rank as u32);
        }

        let sentinel = ranks.len() as u32;
        Ok(Self { ranks, sentinel })
    }

    /// Rank of the pair `(first, second)`, or the sentinel if unknown.
    #[inline]
    pub fn rank(&self, first: &str, second: &str) -> u32 {
        // CompactString keeps symbols up to 24 bytes inline.
        let key = (CompactString::new(first), CompactString::new(second));
        self.rank_of(&key)
    }

    /// Rank of an already-built pair, or the sentinel if unknown.
    #[inline]
    pub fn rank_of(&self, pair: &Pair) -> u32 {
        self.ranks.get(pair).copied().unwrap_or(self.sentinel)
    }

    /// The rank meaning "no known merge".
    #[inline]
    pub fn sentinel(&self) -> u32 {
        self.sentinel
    }

    /// Whether the pair has a merge rule.
    #[inline]
    pub fn contains(&self, first: &str, second: &str) -> bool {
        self.rank(first, second) != self.sentinel()
    }

    /// Iterate over `(pair, rank)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Pair, u32)> {
        self.ranks.iter().map(|(pair, &rank)| (pair, rank))
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Build a table from explicit `(pair, rank)` entries.
///
/// Unlike [`BpeRanks::from_merges`] this does not check that ranks are
/// unique or contiguous. The sentinel is raised above the largest rank, so
/// every entry still merges; an entry with rank `u32::MAX` never does.
impl<A, B> FromIterator<((A, B), u32)> for BpeRanks
where
    A: Into<CompactString>,
    B: Into<CompactString>,
{
    fn from_iter<T: IntoIterator<Item = ((A, B), u32)>>(iter: T) -> Self {
        let ranks: MergeMap = iter
            .into_iter()
            .map(|((first, second), rank)| ((first.into(), second.into()), rank))
            .collect();
        let above_max = ranks.values().max().map_or(0, |max| max.saturating_add(1));
        let sentinel = above_max.max(ranks.len() as u32);
        Self { ranks, sentinel }
    }
}
