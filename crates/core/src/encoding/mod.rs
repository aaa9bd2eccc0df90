//! Byte-level encoding for BPE.
//!
//! - `byte_map`: the byte <-> printable character bijection
//! - `byte_level`: the pair-merge engine working on byte-mapped symbols

pub mod byte_level;
pub mod byte_map;

pub use byte_level::{merge_pair, BpeEngine, Word};
pub use byte_map::ByteUnicodeMapper;
