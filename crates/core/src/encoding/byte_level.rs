//! Byte-level BPE merging (GPT-2 style).
//!
//! A token is first turned into its byte-mapped form, one symbol per byte.
//! The engine then repeatedly merges the best-ranked adjacent pair until no
//! pair in the word has a merge rule.

use super::byte_map::ByteUnicodeMapper;
use crate::core::{BpeRanks, OrderedPairSet, Pair};
use compact_str::CompactString;
use std::sync::Arc;

/// An in-progress token: its current symbols.
pub type Word = Vec<CompactString>;

/// Byte-level merge engine.
///
/// Holds the rank table behind an `Arc` so several encoders can share one
/// copy. The engine itself has no mutable state.
#[derive(Debug, Clone)]
pub struct BpeEngine {
    /// Merge ranks (lower = merged first)
    ranks: Arc<BpeRanks>,
    /// Byte to unicode mapping
    byte_mapper: &'static ByteUnicodeMapper,
}

impl BpeEngine {
    /// Create an engine over the given rank table.
    pub fn new(ranks: BpeRanks) -> Self {
        Self::with_arc(Arc::new(ranks))
    }

    /// Create an engine sharing an existing rank table.
    pub fn with_arc(ranks: Arc<BpeRanks>) -> Self {
        Self {
            ranks,
            byte_mapper: ByteUnicodeMapper::shared(),
        }
    }

    /// The rank table this engine merges with.
    pub fn ranks(&self) -> &Arc<BpeRanks> {
        &self.ranks
    }

    /// The byte mapping used for raw tokens.
    pub fn byte_mapper(&self) -> &ByteUnicodeMapper {
        self.byte_mapper
    }

    /// Byte-mapped form of a raw token.
    #[inline]
    pub fn byte_map(&self, token: &str) -> String {
        self.byte_mapper.map_bytes(token.as_bytes())
    }

    /// Merge a raw token.
    ///
    /// Returns the final symbols joined by single spaces.
    pub fn merge(&self, token: &str) -> String {
        self.merge_mapped(&self.byte_map(token))
    }

    /// Merge a token that is already byte-mapped (one symbol per char).
    pub fn merge_mapped(&self, mapped: &str) -> String {
        let mut word: Word = mapped
            .chars()
            .map(|ch| {
                let mut buf = [0u8; 4];
                CompactString::new(ch.encode_utf8(&mut buf))
            })
            .collect();

        if word.len() <= 1 {
            return mapped.to_string();
        }

        while word.len() > 1 {
            let pairs = OrderedPairSet::from_word(&word);
            let Some(best) = self.select_pair(&pairs) else {
                break;
            };
            word = merge_pair(&word, best);
        }

        word.join(" ")
    }

    /// Pick the pair to merge next, or `None` if nothing in `pairs` has a
    /// rule.
    ///
    /// Pairs are scanned from last to first and a candidate only replaces
    /// the current best on a strictly lower rank. On equal ranks the pair
    /// occurring later in the word therefore wins.
    pub fn select_pair<'p>(&self, pairs: &'p OrderedPairSet) -> Option<&'p Pair> {
        let sentinel = self.ranks.sentinel();
        let mut best: Option<(&Pair, u32)> = None;

        for pair in pairs.iter().rev() {
            let rank = self.ranks.rank_of(pair);
            if best.map_or(true, |(_, best_rank)| rank < best_rank) {
                best = Some((pair, rank));
            }
        }

        best.filter(|&(_, rank)| rank != sentinel)
            .map(|(pair, _)| pair)
    }
}

/// One left-to-right pass replacing each occurrence of `pair` with the
/// concatenation of its two symbols.
pub fn merge_pair(word: &[CompactString], pair: &Pair) -> Word {
    let (first, second) = pair;
    let mut merged = Word::with_capacity(word.len());
    let mut i = 0;

    while i < word.len() {
        if i + 1 < word.len() && &word[i] == first && &word[i + 1] == second {
            let mut symbol = first.clone();
            symbol.push_str(second);
            merged.push(symbol);
            i += 2;
        } else {
            merged.push(word[i].clone());
            i += 1;
        }
    }

    merged
}
