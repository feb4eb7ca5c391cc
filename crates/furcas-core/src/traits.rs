//! Core traits for container compression and decompression.
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Compressor / Decompressor  (one-shot operations)
//!       ↓
//! Codec  (combined compress + decompress)
//! ```

use crate::error::Result;
use crate::types::{Algorithm, CompressionLevel};

/// One-shot compression operations.
pub trait Compressor {
    /// Get the compression algorithm.
    fn algorithm(&self) -> Algorithm;

    /// Get the configured compression level.
    fn level(&self) -> CompressionLevel;

    /// Compress data in one shot.
    ///
    /// # Arguments
    /// * `input` - Data to compress
    ///
    /// # Returns
    /// Compressed data as a vector.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// One-shot decompression operations.
pub trait Decompressor {
    /// Get the decompression algorithm.
    fn algorithm(&self) -> Algorithm;

    /// Decompress data in one shot.
    ///
    /// # Arguments
    /// * `input` - Compressed data
    ///
    /// # Returns
    /// Decompressed data as a vector.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Combined codec for both compression and decompression.
pub trait Codec: Compressor + Decompressor {
    /// Create a new codec with default settings.
    fn new() -> Self
    where
        Self: Sized;

    /// Create a new codec with specified level.
    fn with_level(level: CompressionLevel) -> Self
    where
        Self: Sized;
}

/// Pass-through codec.
///
/// Containers written with it are plain protobuf payloads; useful when the
/// caller compresses at a different layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCodec;

impl Compressor for IdentityCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Identity
    }

    fn level(&self) -> CompressionLevel {
        CompressionLevel::None
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(input.to_vec())
    }
}

impl Decompressor for IdentityCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Identity
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(input.to_vec())
    }
}

impl Codec for IdentityCodec {
    fn new() -> Self {
        IdentityCodec
    }

    fn with_level(_level: CompressionLevel) -> Self {
        IdentityCodec
    }
}
