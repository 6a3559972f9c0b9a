//! # Model Description
//!
//! The in-memory form of a deserialized SentencePiece model.
//!
//! Reading the protobuf wire format is not handled here; a loader fills in a
//! [`ModelSpec`], which [`crate::vocab::PieceVocab`] then validates.
//!
//! The `Default` impls mirror the defaults of the SentencePiece model proto,
//! so that partially specified (serde) models behave as the proto would.

mod model_spec;
mod piece;

#[doc(inline)]
pub use model_spec::*;
#[doc(inline)]
pub use piece::*;
