//! Piece Encoder Options
//!
//! Options for building a [`PieceEncoder`].

use crate::{PieceEncoder, PieceVocab, TokenType, alloc::sync::Arc};

/// The default [`EncoderOptions::compaction_factor`].
pub const DEFAULT_COMPACTION_FACTOR: usize = 3;

/// Options for configuring a [`PieceEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// How far stale merge candidates may outnumber the queue before
    /// the queue is compacted.
    ///
    /// The queue is compacted when `stale * factor > queue.len()`;
    /// `0` disables compaction. Compaction never changes the output.
    pub compaction_factor: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            compaction_factor: DEFAULT_COMPACTION_FACTOR,
        }
    }
}

impl EncoderOptions {
    /// Gets the configured compaction factor.
    pub fn compaction_factor(&self) -> usize {
        self.compaction_factor
    }

    /// Sets the configured compaction factor.
    ///
    /// `0` disables queue compaction.
    pub fn set_compaction_factor(
        &mut self,
        compaction_factor: usize,
    ) {
        self.compaction_factor = compaction_factor;
    }

    /// Sets the configured compaction factor and return the builder.
    ///
    /// `0` disables queue compaction.
    pub fn with_compaction_factor(
        mut self,
        compaction_factor: usize,
    ) -> Self {
        self.set_compaction_factor(compaction_factor);
        self
    }

    /// Build a [`PieceEncoder`] for the given vocab.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<PieceVocab<T>>,
    ) -> PieceEncoder<T> {
        PieceEncoder::new_with_options(vocab, *self)
    }
}
