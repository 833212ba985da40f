//! Fixed-width name fields
//!
//! Names are stored one byte per character in one of two encodings:
//! - [`TextEncoding::Plain`]: the byte is the character's code point (Latin-1)
//! - [`TextEncoding::Device`]: the byte indexes the D-50's 64-symbol alphabet

use serde::{Deserialize, Serialize};

/// Character encoding of name fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    /// One byte per code point (bank dump files)
    #[default]
    Plain,
    /// D-50 alphabet indices (SysEx transfers and device memory)
    Device,
}

/// The D-50 character set, indexed by stored byte
pub const DEVICE_ALPHABET: [char; 64] = [
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', //
    'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', //
    'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', //
    'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', //
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', //
    'v', 'w', 'x', 'y', 'z', '1', '2', '3', //
    '4', '5', '6', '7', '8', '9', '0', '-', //
];

/// Replacement byte for plain-mode characters beyond U+00FF
const PLAIN_FALLBACK: u8 = b'?';

fn decode_char(byte: u8, encoding: TextEncoding) -> char {
    match encoding {
        TextEncoding::Plain => char::from(byte),
        TextEncoding::Device => DEVICE_ALPHABET.get(byte as usize).copied().unwrap_or(' '),
    }
}

fn encode_char(c: char, encoding: TextEncoding) -> u8 {
    match encoding {
        TextEncoding::Plain => u8::try_from(u32::from(c)).unwrap_or(PLAIN_FALLBACK),
        TextEncoding::Device => DEVICE_ALPHABET
            .iter()
            .position(|&a| a == c)
            .map_or(0, |i| i as u8),
    }
}

/// Decode every byte of `data` as one character
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    data.iter().map(|&b| decode_char(b, encoding)).collect()
}

/// Encode `text` into exactly `width` bytes.
///
/// Shorter input is padded with spaces, longer input is cut at `width`
/// characters.
pub fn encode_text(text: &str, width: usize, encoding: TextEncoding) -> Vec<u8> {
    text.chars()
        .chain(std::iter::repeat(' '))
        .take(width)
        .map(|c| encode_char(c, encoding))
        .collect()
}
