//! # Combined Processor
//!
//! [`Processor`] pairs an encoder and a decoder over one shared vocabulary,
//! and summarizes the model as a [`crate::ModelInfo`].

mod processor_impl;
mod processor_options;

#[doc(inline)]
pub use processor_impl::*;
#[doc(inline)]
pub use processor_options::*;
