//! Byte to unicode mapping for byte-level BPE.
//!
//! Every byte value gets one printable character so that merge rules and
//! vocabulary entries can be stored as plain text. Bytes that are already
//! printable keep their own code point; the rest are shifted to 256 and up.

use ahash::AHashMap;
use std::sync::OnceLock;

/// Bytes that map to the character with the same code point.
#[inline]
fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x21..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}

/// Bijection between byte values and single characters.
#[derive(Debug, Clone)]
pub struct ByteUnicodeMapper {
    /// Byte to character (pre-computed for speed)
    byte_encoder: [char; 256],
    /// Character to byte
    byte_decoder: AHashMap<char, u8>,
}

impl ByteUnicodeMapper {
    /// Build the mapping.
    pub fn new() -> Self {
        let mut byte_encoder = ['\0'; 256];
        let mut byte_decoder = AHashMap::with_capacity(256);
        let mut next_codepoint = 256u32;

        for byte in 0..=u8::MAX {
            let ch = if is_printable(byte) {
                char::from(byte)
            } else {
                // At most 68 bytes are shifted, so this stays below 0x200.
                let shifted = char::from_u32(next_codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
                next_codepoint += 1;
                shifted
            };
            byte_encoder[byte as usize] = ch;
            byte_decoder.insert(ch, byte);
        }

        Self {
            byte_encoder,
            byte_decoder,
        }
    }

    /// Process-wide instance, built on first use.
    ///
    /// The mapping is immutable, so sharing one copy is equivalent to
    /// building a fresh one per encoder.
    pub fn shared() -> &'static Self {
        static MAPPER: OnceLock<ByteUnicodeMapper> = OnceLock::new();
        MAPPER.get_or_init(Self::new)
    }

    /// Character for a byte.
    #[inline]
    pub fn char_for(&self, byte: u8) -> char {
        self.byte_encoder[byte as usize]
    }

    /// Byte for a character, if the character is part of the mapping.
    #[inline]
    pub fn byte_for(&self, ch: char) -> Option<u8> {
        self.byte_decoder.get(&ch).copied()
    }

    /// Byte-mapped form of `bytes`: one character per byte.
    pub fn map_bytes(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.char_for(b)).collect()
    }
}

impl Default for ByteUnicodeMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn test_mapping_is_bijective() {
        let mapper = ByteUnicodeMapper::new();
        let chars: AHashSet<char> = (0..=u8::MAX).map(|b| mapper.char_for(b)).collect();
        assert_eq!(chars.len(), 256);

        for byte in 0..=u8::MAX {
            assert_eq!(mapper.byte_for(mapper.char_for(byte)), Some(byte));
        }
    }

    #[test]
    fn test_printable_bytes_keep_code_point() {
        let mapper = ByteUnicodeMapper::new();
        assert_eq!(mapper.char_for(b'a'), 'a');
        assert_eq!(mapper.char_for(b'!'), '!');
        assert_eq!(mapper.char_for(b'~'), '~');
        assert_eq!(mapper.char_for(0xA1), '\u{A1}');
        assert_eq!(mapper.char_for(0xFF), '\u{FF}');
    }

    #[test]
    fn test_shifted_bytes_count_up_from_256() {
        let mapper = ByteUnicodeMapper::new();
        assert_eq!(mapper.char_for(0x00), '\u{100}');
        assert_eq!(mapper.char_for(0x01), '\u{101}');
        // 0x00..=0x20 are the first 33 shifted bytes
        assert_eq!(mapper.char_for(b' '), '\u{120}');
        assert_eq!(mapper.char_for(b' '), 'Ġ');
        assert_eq!(mapper.char_for(0x7F), '\u{121}');
        // 0xAD sits between the two upper printable ranges
        assert_eq!(mapper.char_for(0xAD), '\u{143}');
    }

    #[test]
    fn test_map_bytes_multibyte_utf8() {
        let mapper = ByteUnicodeMapper::shared();
        // 'é' is 0xC3 0xA9, both printable
        assert_eq!(mapper.map_bytes("é".as_bytes()), "\u{C3}\u{A9}");
        assert_eq!(mapper.map_bytes(b" hi"), "Ġhi");
        assert_eq!(mapper.map_bytes(b""), "");
    }

    #[test]
    fn test_unmapped_char_has_no_byte() {
        let mapper = ByteUnicodeMapper::new();
        assert_eq!(mapper.byte_for(' '), None);
        assert_eq!(mapper.byte_for('\u{4E2D}'), None);
    }
}
