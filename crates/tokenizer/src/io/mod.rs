//! Loading of vocabulary and merge-rule resources.
//!
//! Supports the HuggingFace layout (`vocab.json` + `merges.txt`) and the
//! original GPT-2 release layout (`encoder.json` + `vocab.bpe`).

pub mod format;
pub mod load;

pub use format::{ModelFormat, ModelPaths};
pub use load::TokenizerLoader;
