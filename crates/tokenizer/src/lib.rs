//! Bytepair-tokenizer - GPT-style byte-level BPE encoder
//!
//! This crate turns text into the token ids of a byte-level BPE vocabulary,
//! integrating pre-tokenization, the merge engine from `bytepair-core`, a
//! per-token merge cache, and vocabulary lookup behind one `Tokenizer`.
//!
//! # Features
//!
//! - GPT-2 regex pre-tokenization (contractions, letters, numbers, symbols, whitespace)
//! - Unbounded write-once merge cache, safe to share across threads
//! - Parallel batch encoding
//! - Loading from HuggingFace (`vocab.json` + `merges.txt`) or GPT-2
//!   (`encoder.json` + `vocab.bpe`) files
//!
//! # Example
//!
//! ```rust
//! use bytepair_tokenizer::{BpeRanks, Tokenizer};
//!
//! let tokenizer = Tokenizer::builder()
//!     .vocab([("a", 1), ("b", 2), ("ab", 3)].into_iter().collect())
//!     .ranks(BpeRanks::from_merges([("a", "b")])?)
//!     .build()?;
//!
//! assert_eq!(tokenizer.encode("ab")?, vec![3]);
//! # Ok::<(), bytepair_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytepair_core::{BpeEngine, BpeRanks, ByteUnicodeMapper, Result, TokenizerError, Vocabulary};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO
pub mod io;
pub use io::{ModelFormat, ModelPaths, TokenizerLoader};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::Pretokenizer;

// Utilities
pub mod utils;
pub use utils::{CacheStats, EncodeCache};
