//! Byte-string decoding for C-style buffers handed over by plugins and disc images.

use thiserror::Error;

/// Strict decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    /// Input is not well-formed UTF-8.
    #[error("invalid utf-8 after {valid_up_to} bytes")]
    InvalidUtf8 {
        /// Length of the longest valid prefix.
        valid_up_to: usize,
    },
    /// Input contains a byte above `0x7F`.
    #[error("non-ascii byte {byte:#04x} at offset {offset}")]
    NonAscii {
        /// Offset of the offending byte.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    bytes
        .iter()
        .position(|byte| *byte == 0)
        .map_or(bytes, |end| &bytes[..end])
}

/// Decodes UTF-8 up to the first NUL, replacing malformed sequences with U+FFFD.
#[must_use]
pub fn from_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(until_nul(bytes)).into_owned()
}

/// Decodes ASCII up to the first NUL, replacing bytes above `0x7F` with U+FFFD.
#[must_use]
pub fn from_ascii(bytes: &[u8]) -> String {
    until_nul(bytes)
        .iter()
        .map(|&byte| {
            if byte.is_ascii() {
                char::from(byte)
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect()
}

/// Decodes UTF-8 up to the first NUL, rejecting malformed input.
pub fn try_from_utf8(bytes: &[u8]) -> Result<String, TextError> {
    std::str::from_utf8(until_nul(bytes))
        .map(str::to_owned)
        .map_err(|err| TextError::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        })
}

/// Decodes ASCII up to the first NUL, rejecting bytes above `0x7F`.
pub fn try_from_ascii(bytes: &[u8]) -> Result<String, TextError> {
    let bytes = until_nul(bytes);
    if let Some(offset) = bytes.iter().position(|byte| !byte.is_ascii()) {
        return Err(TextError::NonAscii {
            offset,
            byte: bytes[offset],
        });
    }
    Ok(bytes.iter().copied().map(char::from).collect())
}
