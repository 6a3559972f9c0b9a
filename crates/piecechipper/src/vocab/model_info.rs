//! # Model Info

use crate::{
    alloc::string::String,
    model::PieceType,
    types::TokenType,
    vocab::PieceVocab,
};

/// The default beginning-of-sentence symbol.
pub const DEFAULT_BOS_SYMBOL: &str = "<bos>";

/// The default end-of-sentence symbol.
pub const DEFAULT_EOS_SYMBOL: &str = "<eos>";

/// The default padding symbol.
pub const DEFAULT_PAD_SYMBOL: &str = "<pad>";

/// The reserved symbol names resolved into a [`ModelInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlSymbols {
    /// The beginning-of-sentence symbol.
    pub bos: String,

    /// The end-of-sentence symbol.
    pub eos: String,

    /// The padding symbol.
    pub pad: String,
}

impl Default for ControlSymbols {
    fn default() -> Self {
        Self {
            bos: DEFAULT_BOS_SYMBOL.into(),
            eos: DEFAULT_EOS_SYMBOL.into(),
            pad: DEFAULT_PAD_SYMBOL.into(),
        }
    }
}

impl ControlSymbols {
    /// Set the beginning-of-sentence symbol and return the builder.
    pub fn with_bos<S: Into<String>>(
        mut self,
        bos: S,
    ) -> Self {
        self.bos = bos.into();
        self
    }

    /// Set the end-of-sentence symbol and return the builder.
    pub fn with_eos<S: Into<String>>(
        mut self,
        eos: S,
    ) -> Self {
        self.eos = eos.into();
        self
    }

    /// Set the padding symbol and return the builder.
    pub fn with_pad<S: Into<String>>(
        mut self,
        pad: S,
    ) -> Self {
        self.pad = pad.into();
        self
    }
}

/// Summary ids of a loaded model.
///
/// The control ids are `None` unless their symbol names a `CONTROL` piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelInfo<T: TokenType> {
    /// The number of pieces.
    pub vocabulary_size: usize,

    /// The beginning-of-sentence id.
    pub bos_id: Option<T>,

    /// The end-of-sentence id.
    pub eos_id: Option<T>,

    /// The padding id.
    pub pad_id: Option<T>,

    /// The unknown id.
    pub unk_id: T,
}

impl<T: TokenType> ModelInfo<T> {
    /// Resolve the control symbols against a vocabulary.
    pub fn resolve(
        vocab: &PieceVocab<T>,
        symbols: &ControlSymbols,
    ) -> Self {
        let control_id = |symbol: &str| {
            let token = vocab.symbol_to_id(symbol);
            vocab
                .piece(token)
                .filter(|piece| piece.kind == PieceType::Control)
                .map(|_| token)
        };

        Self {
            vocabulary_size: vocab.len(),
            bos_id: control_id(&symbols.bos),
            eos_id: control_id(&symbols.eos),
            pad_id: control_id(&symbols.pad),
            unk_id: vocab.unk_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::testing::build_test_vocab;

    #[test]
    fn test_default_symbols() {
        type T = u32;
        let vocab = build_test_vocab::<T>();

        let info = ModelInfo::resolve(&vocab, &ControlSymbols::default());
        assert_eq!(
            info,
            ModelInfo {
                vocabulary_size: vocab.len(),
                bos_id: Some(2),
                eos_id: Some(1),
                pad_id: Some(0),
                unk_id: 3,
            }
        );
    }

    #[test]
    fn test_non_control_symbols() {
        type T = u16;
        let vocab = build_test_vocab::<T>();

        let symbols = ControlSymbols::default()
            // A user-defined piece.
            .with_bos("<mask>")
            // The unknown piece.
            .with_eos("<unk>")
            // Not in the vocabulary.
            .with_pad("<nope>");

        let info = ModelInfo::resolve(&vocab, &symbols);
        assert_eq!(info.bos_id, None);
        assert_eq!(info.eos_id, None);
        assert_eq!(info.pad_id, None);
        assert_eq!(info.unk_id, 3);
    }
}
