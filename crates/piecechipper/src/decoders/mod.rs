//! # Token Decoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use piecechipper::{PCResult, PieceDecoder, PieceVocab, TokenDecoder};
//!
//! fn example(
//!     vocab: Arc<PieceVocab<u32>>,
//!     batch: &[&[u32]],
//! ) -> PCResult<Vec<String>> {
//!     let decoder = PieceDecoder::new(vocab);
//!     decoder.try_decode_batch(batch)
//! }
//! ```

mod piece_decoder;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod token_decoder;

#[doc(inline)]
pub use piece_decoder::*;
#[doc(inline)]
pub use token_decoder::*;
