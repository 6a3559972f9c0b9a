//! # Piece Vocabulary

use crate::{
    PCError,
    PCResult,
    Token,
    alloc::{string::String, vec::Vec},
    model::{ModelSpec, ModelType, PieceType, SentencePiece, TrainerSpec},
    types::{PCHashMap, TokenType, hash_map_new, hash_map_with_capacity},
    vocab::{
        PrefixMatcher,
        byte_table::{BytePieceTable, BytePieceTableBuilder},
    },
};

/// Validated, immutable SentencePiece BPE vocabulary.
///
/// Built once from a [`ModelSpec`], and shared read-only by encoders and
/// decoders (typically through an `Arc`).
///
/// Contains:
/// * `pieces` - the ordered piece list, indexed by token id;
/// * a ``{ text -> T }`` map of normal, user-defined and unused pieces;
/// * a ``{ text -> T }`` map of every other (reserved) piece;
/// * a [`BytePieceTable`], when byte fallback is enabled;
/// * a [`PrefixMatcher`] over the user-defined pieces.
#[derive(Debug, Clone)]
pub struct PieceVocab<T: TokenType> {
    pieces: Vec<SentencePiece>,
    trainer_spec: TrainerSpec,

    piece_ids: PCHashMap<String, T>,
    reserved_ids: PCHashMap<String, T>,

    unk_id: T,
    byte_table: Option<BytePieceTable<T>>,
    user_defined: PrefixMatcher,
}

impl<T: TokenType> PieceVocab<T> {
    /// Validate a model and build its vocabulary.
    ///
    /// ## Arguments
    /// * `model` - the deserialized model.
    ///
    /// ## Returns
    /// The vocabulary, or the first validation error:
    /// * [`PCError::UnsupportedModelType`] unless the model is BPE;
    /// * [`PCError::UnsupportedNormalizer`] unless the normalizer is the identity;
    /// * [`PCError::VocabSizeOverflow`] if ids do not fit in `T`;
    /// * [`PCError::UnexpectedBytePiece`], [`PCError::MalformedBytePiece`],
    ///   [`PCError::DuplicateBytePiece`] or [`PCError::IncompleteByteTable`]
    ///   for byte table problems;
    /// * [`PCError::MissingUnknownPiece`] or [`PCError::DuplicateUnknownPiece`].
    pub fn from_model(model: ModelSpec) -> PCResult<Self> {
        let ModelSpec {
            pieces,
            trainer_spec,
            normalizer_spec,
        } = model;

        if trainer_spec.model_type != ModelType::Bpe {
            return Err(PCError::UnsupportedModelType {
                model_type: trainer_spec.model_type,
            });
        }

        if !normalizer_spec.is_identity() {
            return Err(PCError::UnsupportedNormalizer {
                add_dummy_prefix: normalizer_spec.add_dummy_prefix,
                remove_extra_whitespaces: normalizer_spec.remove_extra_whitespaces,
            });
        }

        if !pieces.is_empty() && T::from_usize(pieces.len() - 1).is_none() {
            return Err(PCError::VocabSizeOverflow { size: pieces.len() });
        }

        let mut piece_ids: PCHashMap<String, T> = hash_map_with_capacity(pieces.len());
        let mut reserved_ids: PCHashMap<String, T> = hash_map_new();
        let mut user_defined: Vec<&str> = Vec::new();
        let mut bytes = trainer_spec
            .byte_fallback
            .then(BytePieceTableBuilder::<T>::default);
        let mut unk_id: Option<T> = None;

        for (id, piece) in pieces.iter().enumerate() {
            let token = T::from_usize(id).ok_or(PCError::VocabSizeOverflow {
                size: pieces.len(),
            })?;
            let text = piece.piece.as_str();

            if piece.kind.is_normal() {
                piece_ids.insert(text.into(), token);
            } else {
                reserved_ids.insert(text.into(), token);
            }

            match piece.kind {
                PieceType::UserDefined => user_defined.push(text),
                PieceType::Unknown => {
                    if unk_id.is_some() {
                        return Err(PCError::DuplicateUnknownPiece { id });
                    }
                    unk_id = Some(token);
                }
                PieceType::Byte => match bytes.as_mut() {
                    Some(builder) => builder.insert(text, token)?,
                    None => {
                        return Err(PCError::UnexpectedBytePiece { piece: text.into() });
                    }
                },
                PieceType::Normal | PieceType::Control | PieceType::Unused => (),
            }
        }

        let unk_id = unk_id.ok_or(PCError::MissingUnknownPiece)?;
        let byte_table = bytes.map(BytePieceTableBuilder::build).transpose()?;
        let user_defined = PrefixMatcher::new(user_defined)?;

        log::debug!(
            "built BPE vocab: {} pieces, {} user-defined, byte_fallback={}",
            pieces.len(),
            user_defined.len(),
            byte_table.is_some(),
        );

        Ok(Self {
            pieces,
            trainer_spec,
            piece_ids,
            reserved_ids,
            unk_id,
            byte_table,
            user_defined,
        })
    }

    /// The number of pieces in the vocabulary.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Is the vocabulary empty?
    ///
    /// A validated vocabulary always holds at least the unknown piece.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The ordered piece list.
    pub fn pieces(&self) -> &[SentencePiece] {
        &self.pieces
    }

    /// The trainer spec the vocabulary was built with.
    pub fn trainer_spec(&self) -> &TrainerSpec {
        &self.trainer_spec
    }

    /// Get the piece for `token`, if it is in range.
    pub fn piece(
        &self,
        token: T,
    ) -> Option<&SentencePiece> {
        token.to_usize().and_then(|id| self.pieces.get(id))
    }

    /// Get the piece for `token`, or [`PCError::TokenOutOfRange`].
    pub fn try_piece(
        &self,
        token: T,
    ) -> PCResult<&SentencePiece> {
        self.piece(token).ok_or_else(|| PCError::TokenOutOfRange {
            token: token.to_u64().unwrap_or(u64::MAX),
            vocab_size: self.len(),
        })
    }

    /// Look up a normal, user-defined or unused piece by text.
    pub fn lookup_piece(
        &self,
        text: &str,
    ) -> Option<T> {
        self.piece_ids.get(text).copied()
    }

    /// Look up a reserved (unknown, control or byte) piece by text.
    pub fn lookup_reserved(
        &self,
        text: &str,
    ) -> Option<T> {
        self.reserved_ids.get(text).copied()
    }

    /// The score of the normal piece `text`, if it may be produced by a merge.
    pub fn merge_score(
        &self,
        text: &str,
    ) -> Option<f32> {
        self.lookup_piece(text)
            .and_then(|token| self.piece(token))
            .map(|piece| piece.score)
    }

    /// Resolve a symbol's id: reserved pieces first, then normal pieces,
    /// falling back to [`Self::unk_id`].
    pub fn symbol_to_id(
        &self,
        symbol: &str,
    ) -> T {
        self.lookup_reserved(symbol)
            .or_else(|| self.lookup_piece(symbol))
            .unwrap_or(self.unk_id)
    }

    /// The id of the unknown piece.
    pub fn unk_id(&self) -> T {
        self.unk_id
    }

    /// The surface string emitted when decoding the unknown piece.
    pub fn unk_surface(&self) -> &str {
        &self.trainer_spec.unk_surface
    }

    /// Is byte fallback enabled?
    pub fn byte_fallback(&self) -> bool {
        self.byte_table.is_some()
    }

    /// The byte fallback table, when byte fallback is enabled.
    pub fn byte_table(&self) -> Option<&BytePieceTable<T>> {
        self.byte_table.as_ref()
    }

    /// The byte fallback [`Token`] for `byte`, when byte fallback is enabled.
    pub fn byte_token(
        &self,
        byte: u8,
    ) -> Option<Token<T>> {
        let token = self.byte_table()?.get_token(byte);
        let piece = self.piece(token)?;
        Some(Token::new(token, piece.piece.as_str()))
    }

    /// The matcher over user-defined pieces.
    pub fn user_defined_matcher(&self) -> &PrefixMatcher {
        &self.user_defined
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use super::*;
    use crate::{
        model::NormalizerSpec,
        support::traits::static_is_send_sync_check,
        vocab::testing::build_test_model,
    };

    fn unk() -> SentencePiece {
        SentencePiece::new("<unk>", 0.0, PieceType::Unknown)
    }

    fn byte_pieces() -> Vec<SentencePiece> {
        (0..=255u8)
            .map(|b| SentencePiece::new(format!("<0x{b:02X}>"), 0.0, PieceType::Byte))
            .collect()
    }

    #[test]
    fn test_build_test_vocab() {
        type T = u32;
        let vocab: PieceVocab<T> = PieceVocab::from_model(build_test_model()).unwrap();
        static_is_send_sync_check(&vocab);

        assert!(vocab.byte_fallback());
        assert_eq!(vocab.unk_id(), 3);
        assert_eq!(vocab.unk_surface(), " ⁇ ");
        assert_eq!(vocab.user_defined_matcher().len(), 3);

        // Exactly 256 byte pieces, one per byte value.
        let byte_ids = vocab
            .pieces()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind == PieceType::Byte)
            .map(|(id, _)| id as T)
            .collect::<Vec<_>>();
        assert_eq!(byte_ids.len(), 256);
        let table = vocab.byte_table().unwrap();
        for b in 0..=255u8 {
            let token = table.get_token(b);
            assert!(byte_ids.contains(&token));
            assert_eq!(table.get_byte(token), Some(b));
        }

        let token = vocab.byte_token(0xC6).unwrap();
        assert_eq!(token.text, "<0xC6>");
        assert_eq!(vocab.piece(token.id).unwrap().kind, PieceType::Byte);
    }

    #[test]
    fn test_lookups() {
        type T = u32;
        let vocab: PieceVocab<T> = PieceVocab::from_model(build_test_model()).unwrap();

        // User-defined pieces are normal lookups.
        let td = vocab.lookup_piece("<td>").unwrap();
        assert_eq!(vocab.lookup_reserved("<td>"), None);
        assert_eq!(vocab.symbol_to_id("<td>"), td);

        // Control and byte pieces are reserved.
        assert_eq!(vocab.lookup_reserved("<bos>"), Some(2));
        assert_eq!(vocab.lookup_piece("<bos>"), None);
        assert!(vocab.lookup_reserved("<0x41>").is_some());

        assert_eq!(vocab.symbol_to_id("no such piece"), vocab.unk_id());
        assert_eq!(vocab.symbol_to_id("<unk>"), vocab.unk_id());

        let hello = vocab.lookup_piece("hello").unwrap();
        assert_eq!(
            vocab.merge_score("hello"),
            Some(vocab.piece(hello).unwrap().score)
        );
        assert_eq!(vocab.merge_score("<bos>"), None);

        assert!(vocab.piece(vocab.len() as T).is_none());
        assert!(matches!(
            vocab.try_piece(vocab.len() as T),
            Err(PCError::TokenOutOfRange { .. })
        ));
    }

    #[test]
    fn test_without_byte_fallback() {
        let model = ModelSpec::bpe([unk(), SentencePiece::normal("a", 0.0)], false);
        let vocab: PieceVocab<u16> = PieceVocab::from_model(model).unwrap();
        assert!(!vocab.byte_fallback());
        assert!(vocab.byte_token(b'a').is_none());
        assert!(vocab.user_defined_matcher().is_empty());
    }

    #[test]
    fn test_unknown_at_id_zero_duplicated() {
        let model = ModelSpec::bpe([unk(), SentencePiece::normal("a", 0.0), unk()], false);
        assert!(matches!(
            PieceVocab::<u32>::from_model(model),
            Err(PCError::DuplicateUnknownPiece { id: 2 })
        ));
    }

    #[test]
    fn test_missing_unknown() {
        let model = ModelSpec::bpe([SentencePiece::normal("a", 0.0)], false);
        assert!(matches!(
            PieceVocab::<u32>::from_model(model),
            Err(PCError::MissingUnknownPiece)
        ));
    }

    #[test]
    fn test_unsupported_model_type() {
        let mut model = ModelSpec::bpe([unk()], false);
        model.trainer_spec.model_type = ModelType::Unigram;
        assert!(matches!(
            PieceVocab::<u32>::from_model(model),
            Err(PCError::UnsupportedModelType {
                model_type: ModelType::Unigram
            })
        ));
    }

    #[test]
    fn test_unsupported_normalizer() {
        for (add_dummy_prefix, remove_extra_whitespaces) in
            [(true, false), (false, true), (true, true)]
        {
            let mut model = ModelSpec::bpe([unk()], false);
            model.normalizer_spec = NormalizerSpec {
                add_dummy_prefix,
                remove_extra_whitespaces,
            };
            assert!(matches!(
                PieceVocab::<u32>::from_model(model),
                Err(PCError::UnsupportedNormalizer { .. })
            ));
        }
    }

    #[test]
    fn test_byte_piece_without_fallback() {
        let model = ModelSpec::bpe(
            [unk(), SentencePiece::new("<0x41>", 0.0, PieceType::Byte)],
            false,
        );
        assert!(matches!(
            PieceVocab::<u32>::from_model(model),
            Err(PCError::UnexpectedBytePiece { .. })
        ));
    }

    #[test]
    fn test_incomplete_byte_table() {
        let mut pieces = vec![unk()];
        pieces.extend(byte_pieces().into_iter().filter(|p| p.piece != "<0x80>"));
        let model = ModelSpec::bpe(pieces, true);
        assert!(matches!(
            PieceVocab::<u32>::from_model(model),
            Err(PCError::IncompleteByteTable { byte: 0x80 })
        ));
    }

    #[test]
    fn test_malformed_byte_piece() {
        let mut pieces = vec![unk()];
        pieces.extend(byte_pieces());
        pieces.push(SentencePiece::new("<0xG0>", 0.0, PieceType::Byte));
        let model = ModelSpec::bpe(pieces, true);
        assert!(matches!(
            PieceVocab::<u32>::from_model(model),
            Err(PCError::MalformedBytePiece { .. })
        ));
    }

    #[test]
    fn test_vocab_size_overflow() {
        let mut pieces = vec![unk()];
        pieces.extend(byte_pieces());
        let model = ModelSpec::bpe(pieces, true);

        assert!(matches!(
            PieceVocab::<u8>::from_model(model.clone()),
            Err(PCError::VocabSizeOverflow { size: 257 })
        ));
        assert!(PieceVocab::<u16>::from_model(model).is_ok());
    }
}
