//! # Vocabulary Pieces

use crate::alloc::string::String;

/// The type of a [`SentencePiece`].
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum PieceType {
    /// A normal, mergeable subword.
    #[default]
    Normal,

    /// The unknown symbol placeholder.
    Unknown,

    /// A reserved symbol which produces no text, such as ``<bos>``.
    Control,

    /// A user-defined symbol, always matched whole and never merged.
    UserDefined,

    /// A single byte, written as ``<0xXY>``; used for byte fallback.
    Byte,

    /// A piece which is defined but never produced by training.
    Unused,
}

impl PieceType {
    /// Is this piece encodable text, as opposed to a reserved symbol?
    ///
    /// Normal, user-defined and unused pieces are looked up as merge targets;
    /// every other piece is reserved.
    pub fn is_normal(self) -> bool {
        match self {
            Self::Normal | Self::UserDefined | Self::Unused => true,
            Self::Unknown | Self::Control | Self::Byte => false,
        }
    }
}

/// A single vocabulary entry.
///
/// A piece is identified by its position in the piece list (its token id).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SentencePiece {
    /// The piece text.
    pub piece: String,

    /// The merge score; higher scores merge first.
    pub score: f32,

    /// The piece type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: PieceType,
}

impl SentencePiece {
    /// Create a new piece.
    pub fn new<S: Into<String>>(
        piece: S,
        score: f32,
        kind: PieceType,
    ) -> Self {
        Self {
            piece: piece.into(),
            score,
            kind,
        }
    }

    /// Create a new [`PieceType::Normal`] piece.
    pub fn normal<S: Into<String>>(
        piece: S,
        score: f32,
    ) -> Self {
        Self::new(piece, score, PieceType::Normal)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::alloc::string::ToString;

    #[test]
    fn test_piece_type_names() {
        assert_eq!(PieceType::UserDefined.to_string(), "USER_DEFINED");
        assert_eq!(PieceType::from_str("BYTE").unwrap(), PieceType::Byte);

        for kind in PieceType::iter() {
            assert_eq!(PieceType::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_is_normal() {
        let normal = PieceType::iter()
            .filter(|kind| kind.is_normal())
            .collect::<crate::alloc::vec::Vec<_>>();
        assert_eq!(
            normal,
            [PieceType::Normal, PieceType::UserDefined, PieceType::Unused]
        );
    }
}
