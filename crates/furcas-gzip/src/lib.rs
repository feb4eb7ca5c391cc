//! # Furcas Gzip
//!
//! Gzip (RFC 1952) codec used to compress whole weight containers.
//!
//! Weight files carry the `.pb.gz` extension and are readable by any gzip
//! implementation, so the compressor delegates to `flate2` instead of
//! rolling its own DEFLATE.
//!
//! ## Example
//!
//! ```ignore
//! use furcas_gzip::GzipCodec;
//! use furcas_core::{Codec, Compressor, Decompressor};
//!
//! let gzip = GzipCodec::new();
//! let compressed = gzip.compress(payload)?;
//! let payload = gzip.decompress(&compressed)?;
//! ```

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use furcas_core::{Algorithm, Codec, CompressionLevel, Compressor, Decompressor, Error, Result};

/// Gzip magic bytes (ID1, ID2).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check whether a buffer starts with the gzip magic.
pub fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[..2] == GZIP_MAGIC
}

/// Gzip compressor.
#[derive(Debug, Clone)]
pub struct GzipCompressor {
    level: CompressionLevel,
}

impl GzipCompressor {
    /// Create a new Gzip compressor.
    pub fn new() -> Self {
        Self {
            level: CompressionLevel::Default,
        }
    }

    /// Create with compression level.
    pub fn with_level(level: CompressionLevel) -> Self {
        Self { level }
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for GzipCompressor {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn level(&self) -> CompressionLevel {
        self.level
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        // flate2 accepts 0-9
        let level = self.level.to_level().min(9);
        let mut encoder = GzEncoder::new(
            Vec::with_capacity(input.len() / 2),
            Compression::new(level),
        );
        encoder.write_all(input)?;
        Ok(encoder.finish()?)
    }
}

/// Gzip decompressor.
#[derive(Debug, Clone, Default)]
pub struct GzipDecompressor;

impl GzipDecompressor {
    /// Create a new Gzip decompressor.
    pub fn new() -> Self {
        Self
    }
}

impl Decompressor for GzipDecompressor {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        if !is_gzip(input) {
            return Err(Error::Decompression("missing gzip header".to_string()));
        }
        let mut decoder = GzDecoder::new(input);
        let mut output = Vec::with_capacity(input.len() * 2);
        decoder
            .read_to_end(&mut output)
            .map_err(|e| Error::Decompression(e.to_string()))?;
        Ok(output)
    }
}

/// Gzip codec.
#[derive(Debug, Clone)]
pub struct GzipCodec {
    compressor: GzipCompressor,
    decompressor: GzipDecompressor,
}

impl Compressor for GzipCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn level(&self) -> CompressionLevel {
        self.compressor.level()
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.compressor.compress(input)
    }
}

impl Decompressor for GzipCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompressor.decompress(input)
    }
}

impl Codec for GzipCodec {
    fn new() -> Self {
        Self::with_level(CompressionLevel::Default)
    }

    fn with_level(level: CompressionLevel) -> Self {
        Self {
            compressor: GzipCompressor::with_level(level),
            decompressor: GzipDecompressor::new(),
        }
    }
}

impl Default for GzipCodec {
    fn default() -> Self {
        <Self as Codec>::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let codec = GzipCodec::default();
        let input = b"min_val max_val params min_val max_val params min_val max_val params";

        let compressed = codec.compress(input).unwrap();
        assert!(is_gzip(&compressed));
        assert!(compressed.len() < input.len());

        let decompressed = codec.decompress(&compressed).unwrap();
        assert_eq!(decompressed, input);
    }

    #[test]
    fn test_empty_input() {
        let codec = GzipCodec::default();
        let compressed = codec.compress(&[]).unwrap();
        assert!(codec.decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_levels() {
        let input: Vec<u8> = (0..10_000).map(|i| (i % 17) as u8).collect();
        for level in [CompressionLevel::None, CompressionLevel::Fast, CompressionLevel::Best] {
            let codec = <GzipCodec as Codec>::with_level(level);
            let compressed = codec.compress(&input).unwrap();
            assert_eq!(codec.decompress(&compressed).unwrap(), input);
        }
    }

    #[test]
    fn test_rejects_non_gzip() {
        let codec = GzipCodec::default();
        let err = codec.decompress(b"not gzip at all").unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_truncated_stream() {
        let codec = GzipCodec::default();
        let compressed = codec.compress(&[7u8; 4096]).unwrap();
        let err = codec.decompress(&compressed[..compressed.len() / 2]).unwrap_err();
        assert!(matches!(err, Error::Decompression(_)));
    }
}
