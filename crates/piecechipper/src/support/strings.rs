//! # String Utilities

use crate::alloc::{borrow::Cow, string::String};

/// The whitespace separator used by SentencePiece models (``U+2581``).
pub const WHITESPACE_SEPARATOR: char = '\u{2581}';

/// Replace every `' '` in `text` with [`WHITESPACE_SEPARATOR`].
///
/// This is the only normalization applied before encoding.
pub fn replace_spaces_by_separator(text: &str) -> Cow<'_, str> {
    if text.contains(' ') {
        // Each separator is 2 bytes wider than the space it replaces.
        let spaces = text.bytes().filter(|&b| b == b' ').count();
        let mut buf = String::with_capacity(text.len() + 2 * spaces);
        for c in text.chars() {
            buf.push(if c == ' ' { WHITESPACE_SEPARATOR } else { c });
        }
        Cow::Owned(buf)
    } else {
        Cow::Borrowed(text)
    }
}

/// Append `piece` to `buf`, replacing [`WHITESPACE_SEPARATOR`] with `' '`.
pub fn push_separators_as_spaces(
    piece: &str,
    buf: &mut String,
) {
    buf.extend(piece.chars().map(|c| {
        if c == WHITESPACE_SEPARATOR {
            ' '
        } else {
            c
        }
    }));
}

/// Append UTF-8 decoded `bytes` to `buf`, one replacement character per bad byte.
///
/// Unlike [`String::from_utf8_lossy`], which replaces each maximal invalid
/// subsequence once, every byte which cannot start a valid sequence is
/// replaced individually, and decoding resumes at the following byte.
pub fn push_utf8_lossy_bytewise(
    bytes: &[u8],
    buf: &mut String,
) {
    for chunk in bytes.utf8_chunks() {
        buf.push_str(chunk.valid());
        buf.extend(chunk.invalid().iter().map(|_| char::REPLACEMENT_CHARACTER));
    }
}
