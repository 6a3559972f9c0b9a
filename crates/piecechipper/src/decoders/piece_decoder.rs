//! # Piece Decoder

use crate::{
    PCResult,
    TokenDecoder,
    TokenType,
    alloc::{string::String, sync::Arc, vec::Vec},
    model::PieceType,
    support::strings::{push_separators_as_spaces, push_utf8_lossy_bytewise},
    vocab::PieceVocab,
};

/// A SentencePiece [`TokenDecoder`].
///
/// * Runs of byte pieces are joined and decoded as UTF-8, with one
///   replacement character per malformed byte;
/// * control pieces produce no text;
/// * the unknown piece produces the model's unknown surface;
/// * every other piece produces its text, with separators as spaces.
#[derive(Debug, Clone)]
pub struct PieceDecoder<T: TokenType> {
    vocab: Arc<PieceVocab<T>>,
}

impl<T: TokenType> PieceDecoder<T> {
    /// Create a new decoder.
    pub fn new(vocab: Arc<PieceVocab<T>>) -> Self {
        Self { vocab }
    }

    /// Get the attached vocabulary.
    pub fn vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }
}

/// Decode and clear a pending byte run.
fn flush_bytes(
    bytes: &mut Vec<u8>,
    buf: &mut String,
) {
    if !bytes.is_empty() {
        push_utf8_lossy_bytewise(bytes, buf);
        bytes.clear();
    }
}

impl<T: TokenType> TokenDecoder<T> for PieceDecoder<T> {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, tokens, buf))
    )]
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut String,
    ) -> PCResult<()> {
        let mut bytes: Vec<u8> = Vec::new();

        for &token in tokens {
            let piece = match self.vocab.try_piece(token) {
                Ok(piece) => piece,
                Err(err) => {
                    flush_bytes(&mut bytes, buf);
                    return Err(err);
                }
            };

            if piece.kind != PieceType::Byte {
                flush_bytes(&mut bytes, buf);
            }

            match piece.kind {
                PieceType::Byte => {
                    bytes.extend(self.vocab.byte_table().and_then(|t| t.get_byte(token)));
                }
                PieceType::Control => (),
                PieceType::Unknown => buf.push_str(self.vocab.unk_surface()),
                PieceType::Normal | PieceType::UserDefined | PieceType::Unused => {
                    push_separators_as_spaces(&piece.piece, buf)
                }
            }
        }

        flush_bytes(&mut bytes, buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        PCError,
        Token,
        alloc::vec,
        decoders::testing::common_decoder_tests,
        model::{ModelSpec, SentencePiece, TrainerSpec},
        vocab::testing::build_test_vocab,
    };

    fn test_decoder<T: TokenType>() -> PieceDecoder<T> {
        PieceDecoder::new(build_test_vocab::<T>().into())
    }

    #[test]
    fn test_common_u16() {
        common_decoder_tests(&test_decoder::<u16>());
    }

    #[test]
    fn test_common_u64() {
        common_decoder_tests(&test_decoder::<u64>());
    }

    #[test]
    fn test_out_of_range() {
        type T = u32;
        let decoder = test_decoder::<T>();
        let vocab = decoder.vocab().clone();
        let size = vocab.len() as T;
        let hi = vocab.lookup_piece("hi").unwrap();

        assert!(matches!(
            decoder.try_decode(&[hi, size]),
            Err(PCError::TokenOutOfRange { token, vocab_size })
                if token == size as u64 && vocab_size == vocab.len()
        ));

        // The text before the bad token is kept.
        let pound = "£"
            .bytes()
            .map(|b| vocab.byte_table().unwrap().get_token(b))
            .collect::<Vec<_>>();
        let mut buf = String::new();
        assert!(
            decoder
                .try_decode_append(&[hi, pound[0], pound[1], T::MAX], &mut buf)
                .is_err()
        );
        assert_eq!(buf, "hi£");

        assert!(decoder.try_decode_batch(&[&[hi], &[size]]).is_err());
    }

    #[test]
    #[should_panic]
    fn test_decode_panics_out_of_range() {
        let decoder = test_decoder::<u32>();
        decoder.decode(&[u32::MAX]);
    }

    #[test]
    fn test_custom_unk_surface() {
        type T = u16;
        let mut model = ModelSpec::bpe(
            vec![
                SentencePiece::new("<unk>", 0.0, PieceType::Unknown),
                SentencePiece::normal("▁a", 0.0),
            ],
            false,
        );
        model.trainer_spec = TrainerSpec::bpe(false).with_unk_surface("<?>");
        let decoder: PieceDecoder<T> =
            PieceDecoder::new(PieceVocab::from_model(model).unwrap().into());

        assert_eq!(decoder.decode(&[1, 0, 1]), " a<?> a");
        assert_eq!(
            decoder.decode_tokens(&[Token::new(1, "xxx"), Token::new(0, "yyy")]),
            " a<?>"
        );
    }
}
