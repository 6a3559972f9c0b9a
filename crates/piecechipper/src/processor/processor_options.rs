use crate::{
    EncoderOptions,
    PCResult,
    PieceVocab,
    Processor,
    TokenType,
    alloc::sync::Arc,
    model::ModelSpec,
    vocab::ControlSymbols,
};

/// Options for configuring a [`Processor`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessorOptions {
    /// Encoder options.
    pub encoder: EncoderOptions,

    /// Should batch calls be threaded?
    ///
    /// Only effective with the ``rayon`` feature.
    pub parallel: bool,

    /// The symbols resolved into [`crate::ModelInfo`].
    pub control_symbols: ControlSymbols,
}

impl ProcessorOptions {
    /// Gets the encoder options.
    pub fn encoder(&self) -> &EncoderOptions {
        &self.encoder
    }

    /// Sets the encoder options.
    pub fn set_encoder(
        &mut self,
        encoder: EncoderOptions,
    ) {
        self.encoder = encoder;
    }

    /// Sets the encoder options and return the builder.
    pub fn with_encoder(
        mut self,
        encoder: EncoderOptions,
    ) -> Self {
        self.set_encoder(encoder);
        self
    }

    /// Gets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded batch implementations.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded batch implementations.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded batch implementations.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Gets the control symbols.
    pub fn control_symbols(&self) -> &ControlSymbols {
        &self.control_symbols
    }

    /// Sets the control symbols.
    pub fn set_control_symbols(
        &mut self,
        control_symbols: ControlSymbols,
    ) {
        self.control_symbols = control_symbols;
    }

    /// Sets the control symbols and return the builder.
    pub fn with_control_symbols(
        mut self,
        control_symbols: ControlSymbols,
    ) -> Self {
        self.set_control_symbols(control_symbols);
        self
    }

    /// Build a [`Processor`] for the given vocab.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<PieceVocab<T>>,
    ) -> Arc<Processor<T>> {
        Processor::from_vocab_with_options(vocab, self).into()
    }

    /// Validate a model and build a [`Processor`] for it.
    pub fn build_model<T: TokenType>(
        &self,
        model: ModelSpec,
    ) -> PCResult<Arc<Processor<T>>> {
        let vocab = PieceVocab::from_model(model)?;
        Ok(self.build(vocab.into()))
    }
}
