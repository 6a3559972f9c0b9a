//! # `piecechipper` SentencePiece BPE Tokenizer
//!
//! This is a SentencePiece-compatible BPE tokenizer.
//!
//! `piecechipper` reproduces the token sequences of the reference SentencePiece
//! BPE implementation, including user-defined symbols and byte fallback.
//!
//! See:
//! * [`model`] for the deserialized model description consumed by the library.
//! * [`vocab`] for the validated [`PieceVocab`] built from a model.
//! * [`encoders`] to encode text into tokens.
//! * [`decoders`] to decode tokens into text.
//! * [`Processor`] for the combined encoder / decoder.
//!
//! Reading the SentencePiece protobuf wire format is left to the caller;
//! any loader which can fill in a [`ModelSpec`] will do. With the `serde`
//! feature, the model types can be deserialized directly.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
//!
//! ## Example
//!
//! ```rust,no_run
//! use piecechipper::{ModelSpec, PCResult, Processor, TokenDecoder, TokenEncoder};
//!
//! fn example(model: ModelSpec) -> PCResult<()> {
//!     let processor: Processor<u32> = Processor::new(model)?;
//!
//!     let tokens = processor.encode("hello world");
//!     for token in &tokens {
//!         println!("{}: {:?}", token.id, token.text);
//!     }
//!
//!     let text = processor.decode_tokens(&tokens);
//!     assert_eq!(text, "hello world");
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "rayon")]
pub mod rayon;

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod model;
pub mod processor;
pub mod support;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use decoders::{PieceDecoder, TokenDecoder};
#[doc(inline)]
pub use encoders::{EncoderOptions, PieceEncoder, TokenEncoder};
#[doc(inline)]
pub use errors::{PCError, PCResult};
#[doc(inline)]
pub use model::{ModelSpec, ModelType, NormalizerSpec, PieceType, SentencePiece, TrainerSpec};
#[doc(inline)]
pub use processor::{Processor, ProcessorOptions};
#[doc(inline)]
pub use types::{Token, TokenType};
#[doc(inline)]
pub use vocab::{ControlSymbols, ModelInfo, PieceVocab};
