//! # Token Decoder Trait

use crate::{
    PCResult,
    Token,
    alloc::{string::String, vec::Vec},
    types::TokenType,
};

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decode tokens, appending to a target string.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    /// * `buf` - The target string to append to.
    ///
    /// ## Returns
    /// `Ok(())`, or [`crate::PCError::TokenOutOfRange`] for the first token
    /// outside the vocabulary; `buf` then holds the text decoded so far.
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut String,
    ) -> PCResult<()>;

    /// Decode tokens into a string.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// A `PCResult<String>`.
    fn try_decode(
        &self,
        tokens: &[T],
    ) -> PCResult<String> {
        let mut buf = String::new();
        self.try_decode_append(tokens, &mut buf)?;
        Ok(buf)
    }

    /// Decode tokens into a string.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// The decoded string.
    ///
    /// ## Panics
    /// Panics if any token is outside the vocabulary.
    fn decode(
        &self,
        tokens: &[T],
    ) -> String {
        self.try_decode(tokens)
            .expect("tokens must be in range for the vocabulary")
    }

    /// Decode a list of [`Token`]s; only their ids are used.
    ///
    /// ## Panics
    /// Panics if any token is outside the vocabulary.
    fn decode_tokens(
        &self,
        tokens: &[Token<T>],
    ) -> String {
        let ids = tokens.iter().map(|token| token.id).collect::<Vec<_>>();
        self.decode(&ids)
    }

    /// Decode a batch of tokens.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    ///
    /// ## Returns
    /// A `PCResult<Vec<String>>`; failing on the first bad token.
    fn try_decode_batch(
        &self,
        batch: &[&[T]],
    ) -> PCResult<Vec<String>> {
        batch.iter().map(|tokens| self.try_decode(tokens)).collect()
    }

    /// Decode a batch of tokens.
    ///
    /// ## Panics
    /// Panics if any token is outside the vocabulary.
    fn decode_batch(
        &self,
        batch: &[&[T]],
    ) -> Vec<String> {
        batch.iter().map(|tokens| self.decode(tokens)).collect()
    }
}
