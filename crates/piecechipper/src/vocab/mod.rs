//! # Vocabulary
//!
//! This module provides the validated vocabulary built from a [`crate::ModelSpec`].
//!
//! ## Piece Vocabulary
//!
//! The primary vocabulary is [`PieceVocab`], which contains:
//! * the ordered piece list,
//! * ``{ text -> T }`` maps for normal and reserved pieces,
//! * a [`BytePieceTable`] for byte fallback,
//! * a [`PrefixMatcher`] over the user-defined pieces.
//!
//! ## Model Info
//!
//! [`ModelInfo`] summarizes the control ids of a vocabulary,
//! as named by [`ControlSymbols`].

pub mod byte_table;
mod model_info;
mod piece_vocab;
pub mod prefix_matcher;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use byte_table::BytePieceTable;
#[doc(inline)]
pub use model_info::*;
#[doc(inline)]
pub use piece_vocab::PieceVocab;
#[doc(inline)]
pub use prefix_matcher::PrefixMatcher;
