//! # Byte Fallback Table

use core::fmt::Debug;

use crate::{
    PCError,
    PCResult,
    types::{PCHashMap, TokenType},
};

/// The size of the u8 space.
pub const U8_SIZE: usize = u8::MAX as usize + 1;

/// Parse a byte piece text of the form ``<0xXY>`` into its byte value.
///
/// Exactly two hex digits are accepted, in either case.
/// Returns `None` for anything else.
pub fn parse_byte_piece(piece: &str) -> Option<u8> {
    let hex = piece.strip_prefix("<0x")?.strip_suffix('>')?;
    if hex.len() != 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

/// Accumulates byte pieces while a vocabulary is being scanned.
#[derive(Debug)]
pub(crate) struct BytePieceTableBuilder<T: TokenType> {
    slots: [Option<T>; U8_SIZE],
}

impl<T: TokenType> Default for BytePieceTableBuilder<T> {
    fn default() -> Self {
        Self {
            slots: [None; U8_SIZE],
        }
    }
}

impl<T: TokenType> BytePieceTableBuilder<T> {
    /// Record the byte piece `piece` at `token`.
    pub(crate) fn insert(
        &mut self,
        piece: &str,
        token: T,
    ) -> PCResult<()> {
        let byte = parse_byte_piece(piece).ok_or_else(|| PCError::MalformedBytePiece {
            piece: piece.into(),
        })?;

        let slot = &mut self.slots[byte as usize];
        if slot.is_some() {
            return Err(PCError::DuplicateBytePiece { byte });
        }
        *slot = Some(token);
        Ok(())
    }

    /// Build the table, failing on the first missing byte value.
    pub(crate) fn build(self) -> PCResult<BytePieceTable<T>> {
        let mut byte_tokens = [T::zero(); U8_SIZE];
        for (byte, slot) in self.slots.iter().enumerate() {
            byte_tokens[byte] = slot.ok_or(PCError::IncompleteByteTable { byte: byte as u8 })?;
        }
        Ok(BytePieceTable::from_byte_to_token(byte_tokens))
    }
}

/// ``0..=255`` Byte/Token Bijection Table for byte fallback.
///
/// This will always have 256 entries, one for each byte value;
/// mapping to the ids of the model's ``<0xXY>`` pieces.
#[derive(Clone, PartialEq)]
pub struct BytePieceTable<T: TokenType> {
    /// Hash map from token to byte ordinal value.
    token_bytes: PCHashMap<T, u8>,

    /// Table mapping from byte ordinal (position) to token.
    byte_tokens: [T; U8_SIZE],
}

impl<T: TokenType> Debug for BytePieceTable<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("BytePieceTable")
            .field("byte_tokens", &self.byte_tokens)
            .finish()
    }
}

impl<T: TokenType> BytePieceTable<T> {
    fn from_byte_to_token(byte_tokens: [T; U8_SIZE]) -> Self {
        let mut token_bytes: PCHashMap<T, u8> = byte_tokens
            .iter()
            .enumerate()
            .map(|(b, &token)| (token, b as u8))
            .collect();
        token_bytes.shrink_to_fit();

        Self {
            token_bytes,
            byte_tokens,
        }
    }

    /// Get the byte-ord => token mapping table.
    pub fn byte_tokens(&self) -> &[T; U8_SIZE] {
        &self.byte_tokens
    }

    /// Get the token for a byte value.
    pub fn get_token(
        &self,
        byte: u8,
    ) -> T {
        self.byte_tokens[byte as usize]
    }

    /// Get the byte value of a token, if it is a byte token.
    pub fn get_byte(
        &self,
        token: T,
    ) -> Option<u8> {
        self.token_bytes.get(&token).copied()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn test_parse_byte_piece() {
        assert_eq!(parse_byte_piece("<0x40>"), Some(64));
        assert_eq!(parse_byte_piece("<0x00>"), Some(0));
        assert_eq!(parse_byte_piece("<0x1a>"), Some(26));
        assert_eq!(parse_byte_piece("<0xF3>"), Some(243));
        assert_eq!(parse_byte_piece("<0xFF>"), Some(255));

        assert_eq!(parse_byte_piece("0x12>"), None);
        assert_eq!(parse_byte_piece("<x12>"), None);
        assert_eq!(parse_byte_piece("<012>"), None);
        assert_eq!(parse_byte_piece("<0xTA>"), None);
        assert_eq!(parse_byte_piece("<0x1>"), None);
        assert_eq!(parse_byte_piece("<0x100>"), None);
        assert_eq!(parse_byte_piece("<0x+1>"), None);
        assert_eq!(parse_byte_piece("<0x12"), None);
    }

    #[test]
    fn test_build_table() {
        type T = u32;
        let mut builder = BytePieceTableBuilder::<T>::default();
        for b in 0..U8_SIZE {
            builder
                .insert(&format!("<0x{b:02X}>"), (b + 10) as T)
                .unwrap();
        }
        let table = builder.build().unwrap();

        assert_eq!(table.get_token(0x41), 0x41 + 10);
        assert_eq!(table.get_byte(0x41 + 10), Some(0x41));
        assert_eq!(table.get_byte(3), None);
        assert_eq!(table.byte_tokens().len(), U8_SIZE);
    }

    #[test]
    fn test_build_errors() {
        type T = u32;

        let mut builder = BytePieceTableBuilder::<T>::default();
        assert!(matches!(
            builder.insert("<0xZZ>", 1),
            Err(PCError::MalformedBytePiece { .. })
        ));
        builder.insert("<0x41>", 1).unwrap();
        assert!(matches!(
            builder.insert("<0x41>", 2),
            Err(PCError::DuplicateBytePiece { byte: 0x41 })
        ));

        let mut builder = BytePieceTableBuilder::<T>::default();
        for b in 0..U8_SIZE {
            if b != 0x7F {
                builder.insert(&format!("<0x{b:02x}>"), b as T).unwrap();
            }
        }
        assert!(matches!(
            builder.build(),
            Err(PCError::IncompleteByteTable { byte: 0x7F })
        ));
    }
}
