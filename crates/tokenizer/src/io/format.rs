//! On-disk layouts for vocabulary and merge-rule resources.

use bytepair_core::{Result, TokenizerError};
use std::path::{Path, PathBuf};

/// Model format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// HuggingFace layout (vocab.json + merges.txt)
    HuggingFace,
    /// Original GPT-2 release layout (encoder.json + vocab.bpe)
    Gpt2,
}

impl ModelFormat {
    /// All known formats, in detection order.
    pub const ALL: [ModelFormat; 2] = [ModelFormat::HuggingFace, ModelFormat::Gpt2];

    /// File name of the vocabulary resource.
    pub fn vocab_file(self) -> &'static str {
        match self {
            ModelFormat::HuggingFace => "vocab.json",
            ModelFormat::Gpt2 => "encoder.json",
        }
    }

    /// File name of the merge-rule resource.
    pub fn merges_file(self) -> &'static str {
        match self {
            ModelFormat::HuggingFace => "merges.txt",
            ModelFormat::Gpt2 => "vocab.bpe",
        }
    }

    /// Paths of both resources inside `dir`.
    pub fn paths(self, dir: &Path) -> ModelPaths {
        ModelPaths {
            vocab: dir.join(self.vocab_file()),
            merges: dir.join(self.merges_file()),
        }
    }

    /// Find the format whose two files are both present in `dir`.
    pub fn detect(dir: &Path) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.paths(dir).exist())
            .ok_or_else(|| {
                TokenizerError::Load(format!(
                    "No vocabulary/merges pair found in {} (expected vocab.json + merges.txt or encoder.json + vocab.bpe)",
                    dir.display()
                ))
            })
    }
}

impl std::str::FromStr for ModelFormat {
    type Err = TokenizerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hf" | "huggingface" => Ok(ModelFormat::HuggingFace),
            "gpt2" | "openai" => Ok(ModelFormat::Gpt2),
            other => Err(TokenizerError::InvalidConfig(format!(
                "Unknown model format: {}",
                other
            ))),
        }
    }
}

/// Locations of a vocabulary and its merge rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    /// Vocabulary JSON
    pub vocab: PathBuf,
    /// Merge rules text
    pub merges: PathBuf,
}

impl ModelPaths {
    /// Whether both files exist.
    pub fn exist(&self) -> bool {
        self.vocab.is_file() && self.merges.is_file()
    }
}
