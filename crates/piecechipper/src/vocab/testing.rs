//! # Vocab Testing Tools

use crate::{
    alloc::{format, vec::Vec},
    model::{ModelSpec, PieceType, SentencePiece},
    types::TokenType,
    vocab::PieceVocab,
};

/// Score of the single-character pieces; below every merge.
pub const TEST_CHAR_SCORE: f32 = -100.0;

/// Create a small byte-fallback test [`ModelSpec`].
///
/// Layout:
/// * `0..=2` - ``<pad>``, ``<eos>``, ``<bos>`` control pieces;
/// * `3` - ``<unk>``;
/// * `4..=6` - ``<mask>``, ``<td>``, ``▁▁`` user-defined pieces;
/// * `7..=262` - ``<0x00>`` .. ``<0xFF>`` byte pieces;
/// * `263..` - single characters, then merges, enough to
///   encode ``"hello world"``, ``"hi"`` and ``" bye"``.
pub fn build_test_model() -> ModelSpec {
    let mut pieces: Vec<SentencePiece> = Vec::new();

    pieces.extend(
        ["<pad>", "<eos>", "<bos>"]
            .into_iter()
            .map(|p| SentencePiece::new(p, 0.0, PieceType::Control)),
    );
    pieces.push(SentencePiece::new("<unk>", 0.0, PieceType::Unknown));
    pieces.extend(
        ["<mask>", "<td>", "▁▁"]
            .into_iter()
            .map(|p| SentencePiece::new(p, 0.0, PieceType::UserDefined)),
    );
    pieces.extend(
        (0..=255u8).map(|b| SentencePiece::new(format!("<0x{b:02X}>"), 0.0, PieceType::Byte)),
    );
    pieces.extend(
        ["▁", "a", "b", "d", "e", "h", "i", "l", "o", "r", "w", "y", "t"]
            .into_iter()
            .map(|p| SentencePiece::normal(p, TEST_CHAR_SCORE)),
    );
    pieces.extend(
        [
            ("he", -1.0),
            ("ll", -2.0),
            ("hell", -3.0),
            ("hello", -4.0),
            ("▁w", -5.0),
            ("or", -6.0),
            ("▁wor", -7.0),
            ("ld", -8.0),
            ("▁world", -9.0),
            ("hi", -10.0),
            ("▁b", -11.0),
            ("ye", -12.0),
            ("▁bye", -13.0),
        ]
        .into_iter()
        .map(|(p, score)| SentencePiece::normal(p, score)),
    );

    ModelSpec::bpe(pieces, true)
}

/// Create the test [`PieceVocab`] from [`build_test_model`].
///
/// ## Panics
/// Panics if `T` cannot hold the test vocabulary.
pub fn build_test_vocab<T: TokenType>() -> PieceVocab<T> {
    PieceVocab::from_model(build_test_model()).unwrap()
}

/// Create a BPE model from ``(piece, score)`` normal pieces.
///
/// The ``<unk>`` piece is prepended at id 0; byte fallback is off.
pub fn build_merge_model<'a, I>(merges: I) -> ModelSpec
where
    I: IntoIterator<Item = (&'a str, f32)>,
{
    let mut pieces = Vec::from([SentencePiece::new("<unk>", 0.0, PieceType::Unknown)]);
    pieces.extend(
        merges
            .into_iter()
            .map(|(p, score)| SentencePiece::normal(p, score)),
    );
    ModelSpec::bpe(pieces, false)
}
