//! Percent-escaping of wire values.
//!
//! Letters, digits, space, comma and period survive unescaped; every other
//! byte becomes `%hh` (lowercase hex). Values that must stay a single
//! space-delimited token (callsigns, positions, facility names) use
//! [`escape_token`], which additionally encodes spaces.

use std::fmt::Write;

use thiserror::Error;

fn survives(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b' ' || byte == b'.' || byte == b','
}

fn escape_impl(input: &str, keep_spaces: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if survives(byte) && (keep_spaces || byte != b' ') {
            out.push(byte as char);
        } else {
            write!(out, "%{:02x}", byte).unwrap();
        }
    }
    out
}

/// Escapes a trailing value. Spaces survive.
pub fn escape_text(input: &str) -> String {
    escape_impl(input, true)
}

/// Escapes a single-token value. Spaces become `%20`.
pub fn escape_token(input: &str) -> String {
    escape_impl(input, false)
}

/// Error unescaping a wire value.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum UnescapeError {
    #[error("Truncated percent escape")]
    Truncated,
    #[error("Invalid hex digits in percent escape")]
    BadHex,
    #[error("Unescaped value is not valid UTF-8")]
    BadUtf8,
}

/// Reverses [`escape_text`] / [`escape_token`]. Accepts upper- or
/// lowercase hex.
pub fn unescape(input: &str) -> Result<String, UnescapeError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 3 > bytes.len() {
                return Err(UnescapeError::Truncated);
            }
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                .map_err(|_| UnescapeError::BadHex)?;
            let byte = u8::from_str_radix(hex, 16).map_err(|_| UnescapeError::BadHex)?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| UnescapeError::BadUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_keeps_spaces() {
        assert_eq!(escape_text("CLIMB NOW, PLEASE."), "CLIMB NOW, PLEASE.");
        assert_eq!(escape_text("A/B=C%D"), "A%2fB%3dC%25D");
    }

    #[test]
    fn test_escape_token_encodes_spaces() {
        assert_eq!(escape_token("OAKLAND CENTER"), "OAKLAND%20CENTER");
        assert_eq!(escape_token("SFO/123/10.5"), "SFO%2f123%2f10.5");
    }

    #[test]
    fn test_unescape_inverse_of_escape() {
        let inputs = [
            "",
            "plain text, with. punctuation",
            "slash/equals=percent%",
            "newline\nand\ttab",
            "unicode: über",
            "  leading and trailing  ",
        ];
        for input in inputs {
            assert_eq!(unescape(&escape_text(input)).unwrap(), input);
            assert_eq!(unescape(&escape_token(input)).unwrap(), input);
        }
    }

    #[test]
    fn test_unescape_accepts_uppercase_hex() {
        assert_eq!(unescape("A%2FB").unwrap(), "A/B");
    }

    #[test]
    fn test_unescape_rejects_malformed() {
        assert_eq!(unescape("abc%"), Err(UnescapeError::Truncated));
        assert_eq!(unescape("abc%2"), Err(UnescapeError::Truncated));
        assert_eq!(unescape("abc%zz"), Err(UnescapeError::BadHex));
        assert_eq!(unescape("%ff"), Err(UnescapeError::BadUtf8));
    }
}
