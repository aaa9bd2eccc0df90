//! Load functionality for pre-trained vocabularies.
//!
//! This module reads the two resources an encoder needs: the symbol -> id
//! vocabulary (JSON object) and the ordered merge-rule list (text, one
//! `first second` pair per line).

use super::format::{ModelFormat, ModelPaths};
use bytepair_core::{BpeRanks, ByteUnicodeMapper, Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Tokenizer loader - handles loading vocabulary and merge resources.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load both resources from a directory in the given layout.
    ///
    /// # Arguments
    /// * `dir` - Directory holding the two files
    /// * `format` - Which file names to expect
    pub fn load(dir: &Path, format: ModelFormat) -> Result<(Vocabulary, BpeRanks)> {
        Self::load_paths(&format.paths(dir))
    }

    /// Load both resources from explicit paths.
    pub fn load_paths(paths: &ModelPaths) -> Result<(Vocabulary, BpeRanks)> {
        let vocab = Self::load_vocab(&paths.vocab)?;
        let ranks = Self::load_merges(&paths.merges)?;

        log::debug!(
            "loaded {} vocabulary entries from {} and {} merge rules from {}",
            vocab.len(),
            paths.vocab.display(),
            ranks.len(),
            paths.merges.display()
        );
        Self::check_coverage(&vocab, &ranks);

        Ok((vocab, ranks))
    }

    /// Load a `{"symbol": id}` vocabulary file.
    pub fn load_vocab(path: &Path) -> Result<Vocabulary> {
        let file = File::open(path).map_err(|e| TokenizerError::io(path, e))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            TokenizerError::Load(format!(
                "Failed to deserialize vocabulary {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load a merge-rule file.
    pub fn load_merges(path: &Path) -> Result<BpeRanks> {
        let content = std::fs::read_to_string(path).map_err(|e| TokenizerError::io(path, e))?;
        Self::parse_merges(&content)
    }

    /// Parse merge rules from text.
    ///
    /// A first line starting with `#` is a header (`#version: 0.2`) and is
    /// skipped, as are trailing blank lines. Every other line must be two
    /// symbols separated by one space. Ranks follow line order from 0.
    pub fn parse_merges(content: &str) -> Result<BpeRanks> {
        let body = content.trim_end_matches(['\n', '\r']);
        let mut lines = body.lines().enumerate().peekable();

        let has_header = matches!(lines.peek(), Some((_, first)) if first.starts_with('#'));
        if has_header {
            lines.next();
        }

        let mut merges = Vec::new();
        for (line_num, line) in lines {
            let mut parts = line.split(' ');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(first), Some(second), None) if !first.is_empty() && !second.is_empty() => {
                    merges.push((first, second));
                }
                _ => {
                    return Err(TokenizerError::Load(format!(
                        "Invalid merge format at line {}: '{}'",
                        line_num + 1,
                        line
                    )));
                }
            }
        }

        BpeRanks::from_merges(merges)
    }

    /// Warn about symbols the merge rules or the byte mapping can produce
    /// but the vocabulary lacks. Encoding such a token later fails with
    /// `VocabularyMismatch`.
    fn check_coverage(vocab: &Vocabulary, ranks: &BpeRanks) {
        let mapper = ByteUnicodeMapper::shared();
        let missing_bytes = (0..=u8::MAX)
            .filter(|&b| vocab.get_id(mapper.char_for(b).encode_utf8(&mut [0u8; 4])).is_none())
            .count();
        if missing_bytes > 0 {
            log::warn!("vocabulary is missing {} of 256 byte symbols", missing_bytes);
        }

        let missing_merges = ranks
            .iter()
            .filter(|((first, second), _)| {
                let mut merged = first.clone();
                merged.push_str(second);
                vocab.get_id(&merged).is_none()
            })
            .count();
        if missing_merges > 0 {
            log::warn!(
                "vocabulary is missing {} of {} merge results",
                missing_merges,
                ranks.len()
            );
        }
    }
}
