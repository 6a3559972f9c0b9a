//! # Model, Trainer and Normalizer Specs

use crate::{
    alloc::{string::String, vec::Vec},
    model::SentencePiece,
};

/// The default surface string for unknown pieces: ``" ⁇ "``.
pub const DEFAULT_UNK_SURFACE: &str = " \u{2047} ";

/// The segmentation algorithm a model was trained for.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ModelType {
    /// Unigram language model.
    #[default]
    Unigram,

    /// Byte-pair encoding; the only supported type.
    Bpe,

    /// Whitespace-delimited words.
    Word,

    /// Single characters.
    Char,
}

/// The trainer flags the encoder depends on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TrainerSpec {
    /// The model type.
    pub model_type: ModelType,

    /// Decompose unknown text into `BYTE` pieces.
    pub byte_fallback: bool,

    /// The text emitted when decoding the unknown piece.
    pub unk_surface: String,
}

impl Default for TrainerSpec {
    fn default() -> Self {
        Self {
            model_type: ModelType::default(),
            byte_fallback: false,
            unk_surface: DEFAULT_UNK_SURFACE.into(),
        }
    }
}

impl TrainerSpec {
    /// A BPE trainer spec with the given byte fallback setting.
    pub fn bpe(byte_fallback: bool) -> Self {
        Self {
            model_type: ModelType::Bpe,
            byte_fallback,
            ..Default::default()
        }
    }

    /// Set the unknown surface string and return the spec.
    pub fn with_unk_surface<S: Into<String>>(
        mut self,
        unk_surface: S,
    ) -> Self {
        self.unk_surface = unk_surface.into();
        self
    }
}

/// The normalizer flags.
///
/// Only the identity normalizer (both flags `false`) is supported.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct NormalizerSpec {
    /// Prepend a whitespace separator to the input.
    pub add_dummy_prefix: bool,

    /// Strip leading/trailing whitespace and collapse runs of it.
    pub remove_extra_whitespaces: bool,
}

impl Default for NormalizerSpec {
    fn default() -> Self {
        Self {
            add_dummy_prefix: true,
            remove_extra_whitespaces: true,
        }
    }
}

impl NormalizerSpec {
    /// A normalizer with every option disabled.
    pub fn identity() -> Self {
        Self {
            add_dummy_prefix: false,
            remove_extra_whitespaces: false,
        }
    }

    /// Does this normalizer request any transformation?
    pub fn is_identity(&self) -> bool {
        !self.add_dummy_prefix && !self.remove_extra_whitespaces
    }
}

/// A deserialized SentencePiece model.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ModelSpec {
    /// The ordered piece list; a piece's position is its token id.
    pub pieces: Vec<SentencePiece>,

    /// The trainer flags.
    pub trainer_spec: TrainerSpec,

    /// The normalizer flags.
    pub normalizer_spec: NormalizerSpec,
}

impl ModelSpec {
    /// Create a BPE model with an identity normalizer.
    pub fn bpe<I>(
        pieces: I,
        byte_fallback: bool,
    ) -> Self
    where
        I: IntoIterator<Item = SentencePiece>,
    {
        Self {
            pieces: pieces.into_iter().collect(),
            trainer_spec: TrainerSpec::bpe(byte_fallback),
            normalizer_spec: NormalizerSpec::identity(),
        }
    }
}
