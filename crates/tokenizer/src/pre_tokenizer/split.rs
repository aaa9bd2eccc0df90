//! Text splitting for pre-tokenization.
//!
//! GPT-2 splits text into contraction suffixes, runs of letters, runs of
//! numbers, runs of other symbols (each optionally led by one space), and
//! whitespace. Every pretoken is merged independently afterwards.

use regex::Regex;
use std::sync::OnceLock;

/// The GPT-2 pre-tokenization pattern. Alternatives are tried in order.
///
/// `\s+(?!\S)` keeps the last space of a whitespace run for the word that
/// follows it, so "a   b" splits as `a`, `  `, ` b`.
pub const GPT2_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

/// [`GPT2_PATTERN`] without the lookahead. A whitespace match that does not
/// reach the end of the text is shortened by one char in [`Pretokenizer::spans`],
/// which gives the same pieces.
const SPLIT_PATTERN: &str = r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+";

/// Regex pre-tokenizer.
///
/// Matching runs on a finite automaton, so input of any length and any
/// character mix is split without failure.
#[derive(Debug, Clone, Copy)]
pub struct Pretokenizer {
    regex: &'static Regex,
}

impl Pretokenizer {
    /// The GPT-2 pre-tokenizer, sharing one compiled pattern per process.
    pub fn gpt2() -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let regex = RE.get_or_init(|| Regex::new(SPLIT_PATTERN).expect("GPT-2 pattern compiles"));
        Self { regex }
    }

    /// Byte ranges of each pretoken, in order. The ranges are contiguous
    /// and cover all of `text`.
    pub fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut pos = 0;

        // Every char is matched by some alternative, so each match starts at `pos`.
        while let Some(m) = self.regex.find_at(text, pos) {
            let mut end = m.end();
            if end < text.len() {
                if let Some(last) = m.as_str().chars().next_back().filter(|c| c.is_whitespace()) {
                    if end - last.len_utf8() > m.start() {
                        end -= last.len_utf8();
                    }
                }
            }
            spans.push((m.start(), end));
            pos = end;
        }

        spans
    }

    /// Split text into pretokens. Concatenating them gives back `text`.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.spans(text)
            .into_iter()
            .map(|(start, end)| &text[start..end])
            .collect()
    }
}

impl Default for Pretokenizer {
    fn default() -> Self {
        Self::gpt2()
    }
}
