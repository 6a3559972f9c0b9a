use crate::{
    PCResult,
    PieceDecoder,
    PieceVocab,
    ProcessorOptions,
    Token,
    TokenDecoder,
    TokenEncoder,
    TokenType,
    alloc::{string::String, sync::Arc, vec::Vec},
    model::ModelSpec,
    vocab::{ControlSymbols, ModelInfo},
};

/// SentencePiece BPE Processor.
///
/// Combines:
///  * [`PieceVocab`],
///  * [`TokenEncoder`], and
///  * [`TokenDecoder`] wrappers;
///
/// with the [`ModelInfo`] resolved at construction.
#[derive(Clone)]
pub struct Processor<T: TokenType> {
    vocab: Arc<PieceVocab<T>>,
    encoder: Arc<dyn TokenEncoder<T>>,
    decoder: Arc<dyn TokenDecoder<T>>,
    model_info: ModelInfo<T>,
}

impl<T: TokenType> core::fmt::Debug for Processor<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Processor")
            .field("model_info", &self.model_info)
            .finish_non_exhaustive()
    }
}

impl<T: TokenType> Processor<T> {
    /// Validate a model, and build a processor with default options.
    ///
    /// ## Returns
    /// The processor, or the first validation error from
    /// [`PieceVocab::from_model`].
    pub fn new(model: ModelSpec) -> PCResult<Self> {
        let vocab = PieceVocab::from_model(model)?;
        Ok(Self::from_vocab(vocab.into()))
    }

    /// Build a processor with default options.
    pub fn from_vocab(vocab: Arc<PieceVocab<T>>) -> Self {
        Self::from_vocab_with_options(vocab, &ProcessorOptions::default())
    }

    /// Build a processor.
    pub fn from_vocab_with_options(
        vocab: Arc<PieceVocab<T>>,
        options: &ProcessorOptions,
    ) -> Self {
        let encoder = options.encoder().build(vocab.clone());
        let decoder = PieceDecoder::new(vocab.clone());

        #[cfg(feature = "rayon")]
        if options.parallel() {
            use crate::rayon::{ParallelRayonDecoder, ParallelRayonEncoder};

            return Self::from_parts(
                vocab,
                Arc::new(ParallelRayonEncoder::new(encoder)),
                Arc::new(ParallelRayonDecoder::new(decoder)),
                options.control_symbols(),
            );
        }

        Self::from_parts(
            vocab,
            Arc::new(encoder),
            Arc::new(decoder),
            options.control_symbols(),
        )
    }

    /// Assemble a processor from its parts.
    ///
    /// The encoder and decoder are expected to share `vocab`.
    pub fn from_parts(
        vocab: Arc<PieceVocab<T>>,
        encoder: Arc<dyn TokenEncoder<T>>,
        decoder: Arc<dyn TokenDecoder<T>>,
        control_symbols: &ControlSymbols,
    ) -> Self {
        let model_info = ModelInfo::resolve(&vocab, control_symbols);
        log::debug!(
            "built processor: vocabulary_size={}, bos={:?}, eos={:?}, pad={:?}, unk={}",
            model_info.vocabulary_size,
            model_info.bos_id,
            model_info.eos_id,
            model_info.pad_id,
            model_info.unk_id,
        );

        Self {
            vocab,
            encoder,
            decoder,
            model_info,
        }
    }

    /// Get the underlying vocabulary.
    pub fn piece_vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }

    /// Get the underlying encoder.
    pub fn encoder(&self) -> &Arc<dyn TokenEncoder<T>> {
        &self.encoder
    }

    /// Get the underlying decoder.
    pub fn decoder(&self) -> &Arc<dyn TokenDecoder<T>> {
        &self.decoder
    }

    /// The number of pieces in the model.
    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }

    /// The resolved model info.
    pub fn model_info(&self) -> &ModelInfo<T> {
        &self.model_info
    }
}

impl<T: TokenType> TokenEncoder<T> for Processor<T> {
    fn vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }

    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<Token<T>>,
    ) {
        self.encoder.encode_append(text, tokens)
    }

    fn encode(
        &self,
        text: &str,
    ) -> Vec<Token<T>> {
        self.encoder.encode(text)
    }

    fn encode_batch(
        &self,
        batch: &[&str],
    ) -> Vec<Vec<Token<T>>> {
        self.encoder.encode_batch(batch)
    }
}

impl<T: TokenType> TokenDecoder<T> for Processor<T> {
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut String,
    ) -> PCResult<()> {
        self.decoder.try_decode_append(tokens, buf)
    }

    fn try_decode(
        &self,
        tokens: &[T],
    ) -> PCResult<String> {
        self.decoder.try_decode(tokens)
    }

    fn try_decode_batch(
        &self,
        batch: &[&[T]],
    ) -> PCResult<Vec<String>> {
        self.decoder.try_decode_batch(batch)
    }

    fn decode_batch(
        &self,
        batch: &[&[T]],
    ) -> Vec<String> {
        self.decoder.decode_batch(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        PCError,
        decoders::testing::common_decoder_tests,
        encoders::testing::common_encoder_tests,
        model::{ModelType, SentencePiece},
        support::traits::static_is_send_sync_check,
        vocab::testing::{build_merge_model, build_test_model, build_test_vocab},
    };

    #[test]
    fn test_processor() {
        type T = u32;
        let processor: Processor<T> = Processor::new(build_test_model()).unwrap();
        static_is_send_sync_check(&processor);

        assert_eq!(processor.vocabulary_size(), build_test_vocab::<T>().len());
        assert_eq!(
            processor.model_info(),
            &ModelInfo {
                vocabulary_size: processor.vocabulary_size(),
                bos_id: Some(2),
                eos_id: Some(1),
                pad_id: Some(0),
                unk_id: 3,
            }
        );

        common_encoder_tests(&processor);
        common_decoder_tests(&processor);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_processor() {
        type T = u16;
        let processor = ProcessorOptions::default()
            .with_parallel(true)
            .build::<T>(build_test_vocab::<T>().into());

        common_encoder_tests(processor.as_ref());
        common_decoder_tests(processor.as_ref());
    }

    #[test]
    fn test_missing_control_symbols() {
        let processor: Processor<u32> = Processor::new(build_merge_model([("a", 0.0)])).unwrap();
        let info = processor.model_info();
        assert_eq!(info.vocabulary_size, 2);
        assert_eq!((info.bos_id, info.eos_id, info.pad_id), (None, None, None));
        assert_eq!(info.unk_id, 0);
    }

    #[test]
    fn test_construction_errors() {
        let mut model = build_merge_model([("a", 0.0)]);
        model.trainer_spec.model_type = ModelType::Char;
        assert!(matches!(
            Processor::<u32>::new(model),
            Err(PCError::UnsupportedModelType { .. })
        ));

        let model = ModelSpec::bpe([SentencePiece::normal("a", 0.0)], true);
        assert!(matches!(
            Processor::<u32>::new(model),
            Err(PCError::MissingUnknownPiece)
        ));
    }

    #[test]
    fn test_empty_input() {
        let processor: Processor<u32> = Processor::new(build_test_model()).unwrap();
        assert!(processor.encode("").is_empty());
        assert!(processor.encode_ids("").is_empty());
        assert_eq!(processor.decode(&[]), "");
        assert_eq!(processor.decode_tokens(&[]), "");
    }
}
