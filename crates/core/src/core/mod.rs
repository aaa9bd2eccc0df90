//! Core BPE data structures.
//!
//! This module contains the rank table, the vocabulary, and the ordered pair
//! set the merge loop scans, independent of how symbols are produced.

pub mod merges;
pub mod pairs;
pub mod vocab;

pub use merges::{BpeRanks, MergeMap, Pair};
pub use pairs::OrderedPairSet;
pub use vocab::{Vocab, Vocabulary};
