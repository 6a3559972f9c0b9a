//! # Error Types

use crate::{
    alloc::string::String,
    model::ModelType,
};

/// Errors from piecechipper operations.
#[derive(Debug, thiserror::Error)]
pub enum PCError {
    /// Only BPE models are supported.
    #[error("model type {model_type} not supported")]
    UnsupportedModelType {
        /// The rejected model type.
        model_type: ModelType,
    },

    /// The normalizer requests options this library does not implement.
    #[error(
        "normalizer options not supported: add_dummy_prefix={add_dummy_prefix}, remove_extra_whitespaces={remove_extra_whitespaces}"
    )]
    UnsupportedNormalizer {
        /// The `add_dummy_prefix` flag.
        add_dummy_prefix: bool,

        /// The `remove_extra_whitespaces` flag.
        remove_extra_whitespaces: bool,
    },

    /// The model has no `UNKNOWN` piece.
    #[error("unk symbol is not defined")]
    MissingUnknownPiece,

    /// The model has more than one `UNKNOWN` piece.
    #[error("unk redefined at id {id}")]
    DuplicateUnknownPiece {
        /// The id of the second `UNKNOWN` piece.
        id: usize,
    },

    /// A `BYTE` piece was found in a model without byte fallback.
    #[error("byte piece {piece:?} is found although `byte_fallback=false`")]
    UnexpectedBytePiece {
        /// The offending piece text.
        piece: String,
    },

    /// A `BYTE` piece whose text is not of the form `<0xXY>`.
    #[error("byte piece {piece:?} is not of the form <0xXY>")]
    MalformedBytePiece {
        /// The offending piece text.
        piece: String,
    },

    /// Two `BYTE` pieces map to the same byte value.
    #[error("byte value 0x{byte:02X} defined more than once")]
    DuplicateBytePiece {
        /// The duplicated byte value.
        byte: u8,
    },

    /// Byte fallback is enabled, but the byte table is incomplete.
    #[error("byte value 0x{byte:02X} not found")]
    IncompleteByteTable {
        /// The first missing byte value.
        byte: u8,
    },

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Token value out of range for the vocabulary.
    #[error("token {token} out of range for vocab size {vocab_size}")]
    TokenOutOfRange {
        /// The offending token, widened.
        token: u64,

        /// The size of the vocabulary.
        vocab_size: usize,
    },

    /// The user-defined symbol matcher could not be built.
    #[error("prefix matcher: {0}")]
    PrefixMatcher(String),
}

/// Result type for piecechipper operations.
pub type PCResult<T> = core::result::Result<T, PCError>;
