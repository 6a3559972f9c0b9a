//! # Rayon Utilities
//!
//! [`rayon`] powered wrappers for parallel encoders and decoders.
//!
//! The vocabulary is read-only after construction, so batches are
//! split across the rayon thread pool with no coordination.

mod rayon_decoder;
mod rayon_encoder;

pub use rayon_decoder::ParallelRayonDecoder;
pub use rayon_encoder::ParallelRayonEncoder;
