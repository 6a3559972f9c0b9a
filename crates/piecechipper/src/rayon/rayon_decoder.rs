//! # Parallel Decoder

use std::marker::PhantomData;

use crate::{PCResult, TokenDecoder, TokenType};

/// Batch-Level Parallel Decoder Wrapper.
///
/// Enables ``rayon`` decoding of batches when available.
#[derive(Debug, Clone)]
pub struct ParallelRayonDecoder<T: TokenType, D: TokenDecoder<T>> {
    /// Wrapped decoder.
    pub inner: D,

    _marker: PhantomData<T>,
}

impl<T, D> ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    /// Create a new parallel token decoder.
    ///
    /// ## Arguments
    /// * `inner` - The token decoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonDecoder` instance.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, D> TokenDecoder<T> for ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut String,
    ) -> PCResult<()> {
        self.inner.try_decode_append(tokens, buf)
    }

    fn try_decode_batch(
        &self,
        batch: &[&[T]],
    ) -> PCResult<Vec<String>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.inner.try_decode(tokens))
            .collect()
    }

    fn decode_batch(
        &self,
        batch: &[&[T]],
    ) -> Vec<String> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.inner.decode(tokens))
            .collect()
    }
}
