//! # Token Encoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use piecechipper::{EncoderOptions, PieceVocab, Token, TokenEncoder};
//!
//! fn example(
//!     vocab: Arc<PieceVocab<u32>>,
//!     batch: &[&str],
//! ) -> Vec<Vec<Token<u32>>> {
//!     let encoder = EncoderOptions::default().build(vocab);
//!     encoder.encode_batch(batch)
//! }
//! ```

mod encoder_options;
pub mod merge_queue;
mod piece_encoder;
pub mod symbol_chain;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod token_encoder;

#[doc(inline)]
pub use encoder_options::*;
#[doc(inline)]
pub use merge_queue::{MergeCandidate, MergeQueue};
#[doc(inline)]
pub use piece_encoder::*;
#[doc(inline)]
pub use symbol_chain::{SymbolChain, SymbolNode};
#[doc(inline)]
pub use token_encoder::*;
