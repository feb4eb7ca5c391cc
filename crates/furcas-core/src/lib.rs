//! # Furcas Core
//!
//! Core error taxonomy, compression traits and shared types for the Furcas
//! network-weights codec.
//!
//! Furcas is named after the 50th demon of the Ars Goetia, a knight who
//! teaches philosophy and logic; the codec teaches an inference engine what a
//! training run learned without either side knowing the other.
//!
//! ## Core Traits
//!
//! - [`Compressor`] - One-shot compression of a whole container payload
//! - [`Decompressor`] - One-shot decompression of a whole container payload
//! - [`Codec`] - Combined compress/decompress capability
//!
//! Containers are always read and written whole, so there is no streaming
//! counterpart to these traits.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{Codec, Compressor, Decompressor, IdentityCodec};
pub use types::{Algorithm, CompressionLevel, CompressionRatio};
