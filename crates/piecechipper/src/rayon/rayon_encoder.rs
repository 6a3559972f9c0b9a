//! # Parallel Encoder

use std::{marker::PhantomData, sync::Arc};

use crate::{Token, TokenEncoder, TokenType, vocab::PieceVocab};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches when available.
#[derive(Debug, Clone)]
pub struct ParallelRayonEncoder<T: TokenType, E: TokenEncoder<T>> {
    /// Inner encoder.
    pub inner: E,

    _marker: PhantomData<T>,
}

impl<T, E> ParallelRayonEncoder<T, E>
where
    T: TokenType,
    E: TokenEncoder<T>,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonEncoder` instance.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, E> TokenEncoder<T> for ParallelRayonEncoder<T, E>
where
    T: TokenType,
    E: TokenEncoder<T>,
{
    fn vocab(&self) -> &Arc<PieceVocab<T>> {
        self.inner.vocab()
    }

    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<Token<T>>,
    ) {
        self.inner.encode_append(text, tokens)
    }

    fn encode_batch(
        &self,
        batch: &[&str],
    ) -> Vec<Vec<Token<T>>> {
        use rayon::prelude::*;

        batch.par_iter().map(|text| self.inner.encode(text)).collect()
    }
}
