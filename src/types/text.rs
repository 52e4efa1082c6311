//! # Payload Text Encodings
//!
//! `C` field payloads are stored as raw bytes and interpreted under a
//! caller-selected encoding. Field widths are byte counts, not character
//! counts, so a multi-byte UTF-8 value can occupy fewer characters than
//! its width.
//!
//! Encoding can fail (the value has no representation in the chosen
//! encoding); decoding is total and substitutes `U+FFFD` for malformed
//! input rather than failing a whole-file read on one bad byte.

use std::borrow::Cow;

/// Caller-selected text encoding for `C` field payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, the default.
    #[default]
    Utf8,
    /// Strict 7-bit ASCII.
    Ascii,
    /// ISO-8859-1, one byte per code point up to U+00FF.
    Latin1,
}

impl TextEncoding {
    /// Human-readable encoding name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Ascii => "ASCII",
            TextEncoding::Latin1 => "Latin-1",
        }
    }

    /// Encodes `value`, or None when it cannot be represented.
    pub fn encode<'a>(&self, value: &'a str) -> Option<Cow<'a, [u8]>> {
        match self {
            TextEncoding::Utf8 => Some(Cow::Borrowed(value.as_bytes())),
            TextEncoding::Ascii => value.is_ascii().then(|| Cow::Borrowed(value.as_bytes())),
            TextEncoding::Latin1 => {
                let mut out = Vec::with_capacity(value.len());
                for ch in value.chars() {
                    let cp = ch as u32;
                    if cp > 0xFF {
                        return None;
                    }
                    out.push(cp as u8);
                }
                Some(Cow::Owned(out))
            }
        }
    }

    /// Decodes `bytes`, substituting `U+FFFD` for unrepresentable input.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        b as char
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}
