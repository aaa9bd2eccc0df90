//! Vocabulary storage and lookup.
//!
//! This module maps merged symbol strings to the integer ids a model
//! consumes. Storage uses AHashMap for fast lookups and CompactString for
//! memory-efficient keys.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Forward mapping: symbol string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Immutable symbol -> id table.
///
/// Deserializes directly from a `{"symbol": id, ...}` JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    vocab: Vocab,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the ID for a symbol string.
    #[inline]
    pub fn get_id(&self, symbol: &str) -> Option<u32> {
        self.vocab.get(symbol).copied()
    }

    /// Look up every space-separated symbol of a merged token.
    ///
    /// Fails with [`TokenizerError::VocabularyMismatch`] on the first symbol
    /// the vocabulary does not contain.
    pub fn ids_for(&self, merged: &str) -> Result<Vec<u32>> {
        let mut ids = Vec::new();
        self.extend_ids(merged, &mut ids)?;
        Ok(ids)
    }

    /// Like [`Vocabulary::ids_for`], appending to an existing buffer.
    ///
    /// On error `out` may already hold ids for the symbols before the
    /// missing one.
    pub fn extend_ids(&self, merged: &str, out: &mut Vec<u32>) -> Result<()> {
        for symbol in merged.split(' ') {
            let id = self
                .get_id(symbol)
                .ok_or_else(|| TokenizerError::VocabularyMismatch {
                    symbol: symbol.to_string(),
                })?;
            out.push(id);
        }
        Ok(())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}

impl<S: Into<CompactString>> FromIterator<(S, u32)> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        Self {
            vocab: iter
                .into_iter()
                .map(|(symbol, id)| (symbol.into(), id))
                .collect(),
        }
    }
}
