//! Utility modules for the BPE encoder.
//!
//! This module contains the merge cache.

pub mod cache;

pub use cache::{CacheStats, EncodeCache};
