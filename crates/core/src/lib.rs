//! Bytepair-core - Core byte-level BPE algorithm
//!
//! This crate provides the fundamental data structures and the merge
//! algorithm for GPT-style byte-level byte-pair encoding, independent of
//! pre-tokenization, caching, or how the tables are loaded.
//!
//! # Features
//!
//! - Byte to printable-character mapping shared by every encoder
//! - Rank table and vocabulary using `AHashMap` and compact strings
//! - Pair merging with the GPT-2 tie-break rule
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use bytepair_core::{BpeEngine, BpeRanks, Vocabulary};
//!
//! let ranks = BpeRanks::from_merges([("a", "b")])?;
//! let vocab: Vocabulary = [("a", 1), ("b", 2), ("ab", 3)].into_iter().collect();
//!
//! let engine = BpeEngine::new(ranks);
//! let merged = engine.merge("ab");
//! assert_eq!(merged, "ab");
//! assert_eq!(vocab.ids_for(&merged)?, vec![3]);
//! # Ok::<(), bytepair_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data structures
pub mod core;
pub use crate::core::{BpeRanks, MergeMap, OrderedPairSet, Pair, Vocab, Vocabulary};

// Byte-level encoding
pub mod encoding;
pub use encoding::{BpeEngine, ByteUnicodeMapper, Word};
