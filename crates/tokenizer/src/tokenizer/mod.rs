//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that runs the whole
//! pipeline: pre-tokenization, byte mapping, memoized merging, and id lookup.

use crate::io::{ModelFormat, ModelPaths, TokenizerLoader};
use crate::pre_tokenizer::Pretokenizer;
use crate::utils::{CacheStats, EncodeCache};
use bytepair_core::{BpeEngine, BpeRanks, Result, TokenizerError, Vocabulary};
use rayon::prelude::*;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Memoize merged pretokens
    pub use_cache: bool,
    /// Initial allocation for the merge cache (it still grows unbounded)
    pub cache_capacity: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            cache_capacity: 1000,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
    vocab: Option<Vocabulary>,
    ranks: Option<BpeRanks>,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vocabulary (required).
    pub fn vocab(mut self, vocab: Vocabulary) -> Self {
        self.vocab = Some(vocab);
        self
    }

    /// Set the merge rank table. Defaults to an empty table.
    pub fn ranks(mut self, ranks: BpeRanks) -> Self {
        self.ranks = Some(ranks);
        self
    }

    /// Enable or disable the merge cache.
    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.config.use_cache = enabled;
        self
    }

    /// Set the initial merge cache allocation.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TokenizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        let vocab = self.vocab.ok_or_else(|| {
            TokenizerError::InvalidConfig("a vocabulary is required".to_string())
        })?;
        let ranks = self.ranks.unwrap_or_default();
        Ok(Tokenizer::with_config(vocab, ranks, self.config))
    }
}

/// Main tokenizer struct.
///
/// Owns the immutable tables (behind `Arc`, so [`Tokenizer::fork`] can share
/// them) and the merge cache. All methods take `&self`; the cache does its
/// own locking, so one instance can serve several threads, e.g. through an
/// `Arc<Tokenizer>`.
pub struct Tokenizer {
    /// Symbol -> id table
    vocab: Arc<Vocabulary>,
    /// Pair merging over the rank table
    engine: BpeEngine,
    /// Text splitter
    pretokenizer: Pretokenizer,
    /// Merged pretokens, keyed by byte-mapped form
    cache: Option<EncodeCache>,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer with the default configuration.
    pub fn new(vocab: Vocabulary, ranks: BpeRanks) -> Self {
        Self::with_config(vocab, ranks, TokenizerConfig::default())
    }

    /// Create a tokenizer with the given configuration.
    pub fn with_config(vocab: Vocabulary, ranks: BpeRanks, config: TokenizerConfig) -> Self {
        log::debug!(
            "building tokenizer: {} vocabulary entries, {} merge rules, cache {}",
            vocab.len(),
            ranks.len(),
            if config.use_cache { "on" } else { "off" }
        );

        Self {
            vocab: Arc::new(vocab),
            engine: BpeEngine::new(ranks),
            pretokenizer: Pretokenizer::gpt2(),
            cache: Self::make_cache(&config),
            config,
        }
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    fn make_cache(config: &TokenizerConfig) -> Option<EncodeCache> {
        config
            .use_cache
            .then(|| EncodeCache::with_capacity(config.cache_capacity))
    }

    /// Load a tokenizer from a vocabulary file and a merge-rule file.
    pub fn from_files(vocab: &Path, merges: &Path) -> Result<Self> {
        let paths = ModelPaths {
            vocab: vocab.to_path_buf(),
            merges: merges.to_path_buf(),
        };
        let (vocab, ranks) = TokenizerLoader::load_paths(&paths)?;
        Ok(Self::new(vocab, ranks))
    }

    /// Load a tokenizer from a directory, detecting its layout.
    ///
    /// # Arguments
    /// * `path` - Directory containing vocab.json + merges.txt or
    ///   encoder.json + vocab.bpe
    pub fn load(path: &Path) -> Result<Self> {
        let format = ModelFormat::detect(path)?;
        Self::load_with_format(path, format)
    }

    /// Load a tokenizer from a directory in a known layout.
    pub fn load_with_format(path: &Path, format: ModelFormat) -> Result<Self> {
        let (vocab, ranks) = TokenizerLoader::load(path, format)?;
        Ok(Self::new(vocab, ranks))
    }

    /// A new instance sharing this one's tables but with its own empty
    /// cache.
    pub fn fork(&self) -> Self {
        Self {
            vocab: Arc::clone(&self.vocab),
            engine: self.engine.clone(),
            pretokenizer: self.pretokenizer,
            cache: Self::make_cache(&self.config),
            config: self.config.clone(),
        }
    }

    /// Encode text to token IDs.
    ///
    /// Fails with `VocabularyMismatch` if a merged symbol is missing from the
    /// vocabulary; the tokenizer remains usable afterwards.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let mut ids = Vec::with_capacity(text.len() / 2);
        for piece in self.pretokenizer.split(text) {
            let merged = self.merge_piece(piece);
            self.vocab.extend_ids(&merged, &mut ids)?;
        }
        Ok(ids)
    }

    /// Encode a batch of texts (parallelized).
    ///
    /// All texts share this tokenizer's cache. Results are in input order;
    /// the first error aborts the batch.
    pub fn encode_batch<S>(&self, texts: &[S]) -> Result<Vec<Vec<u32>>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.encode(text.as_ref()))
            .collect()
    }

    /// The merged symbols for `text`, in order: exactly the strings that
    /// [`Tokenizer::encode`] looks up in the vocabulary.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut symbols = Vec::new();
        for piece in self.pretokenizer.split(text) {
            let merged = self.merge_piece(piece);
            symbols.extend(merged.split(' ').map(str::to_string));
        }
        symbols
    }

    /// Merged form of one pretoken, from the cache when possible.
    fn merge_piece(&self, piece: &str) -> String {
        let mapped = self.engine.byte_map(piece);
        match &self.cache {
            Some(cache) => cache.get_or_merge(&mapped, |key| self.engine.merge_mapped(key)),
            None => self.engine.merge_mapped(&mapped),
        }
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get the number of merge rules.
    pub fn merge_count(&self) -> usize {
        self.engine.ranks().len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the merge engine.
    pub fn engine(&self) -> &BpeEngine {
        &self.engine
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Cache statistics, `None` when caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(EncodeCache::stats)
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("vocab_size", &self.vocab_size())
            .field("merge_count", &self.merge_count())
            .field("cache", &self.cache_stats())
            .field("config", &self.config)
            .finish()
    }
}
