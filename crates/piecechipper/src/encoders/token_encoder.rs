//! # Token Encoder Trait

use crate::{
    Token,
    alloc::{sync::Arc, vec::Vec},
    types::TokenType,
    vocab::PieceVocab,
};

/// A trait for token encoders.
///
/// Encoding never fails; text with no vocabulary match falls back to
/// byte pieces, or to the unknown piece.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached vocabulary.
    fn vocab(&self) -> &Arc<PieceVocab<T>>;

    /// Encode text, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `tokens` - The target token buffer to append to.
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<Token<T>>,
    );

    /// Encode text into tokens.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// A vector of tokens; empty for empty text.
    fn encode(
        &self,
        text: &str,
    ) -> Vec<Token<T>> {
        let mut tokens = Vec::new();
        self.encode_append(text, &mut tokens);
        tokens
    }

    /// Encode text into token ids.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// A vector of token ids.
    fn encode_ids(
        &self,
        text: &str,
    ) -> Vec<T> {
        self.encode(text).into_iter().map(|token| token.id).collect()
    }

    /// Encode a batch of text into tokens.
    ///
    /// ## Arguments
    /// * `batch` - A slice of strings to encode.
    ///
    /// ## Returns
    /// A vector of token vectors.
    fn encode_batch(
        &self,
        batch: &[&str],
    ) -> Vec<Vec<Token<T>>> {
        batch.iter().map(|text| self.encode(text)).collect()
    }
}
