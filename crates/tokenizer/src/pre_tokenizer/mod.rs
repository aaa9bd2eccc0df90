//! Pre-tokenization.
//!
//! Splits text into the pretokens that are merged independently.

pub mod split;

pub use split::{Pretokenizer, GPT2_PATTERN};
