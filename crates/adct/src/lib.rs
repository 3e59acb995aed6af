//! # ADCT - Adaptive DCT block codec
//!
//! This crate provides a high-level API for lossy compression of square blocks
//! of 8-bit samples: orthonormal DCT, quality-driven and optionally
//! variance-adaptive quantization, zigzag scan, run-length coding and a
//! per-block canonical Huffman code.
//!
//! ## Quick Start
//!
//! ```
//! use adct::{Block, BlockDecoder, BlockEncoder, CodecConfig};
//!
//! let config = CodecConfig::new().block_size(8).quality(75);
//! let encoder = BlockEncoder::new(config).unwrap();
//! let decoder = BlockDecoder::new(config).unwrap();
//!
//! let pixels: Vec<u8> = (0..64).map(|i| (i * 3) as u8).collect();
//! let samples = Block::from_pixels(&pixels, 8, 0, 0, 8).unwrap();
//!
//! let (encoded, report) = encoder.encode_to_vec(&samples).unwrap();
//! println!("{} bytes, {} payload bits", encoded.len(), report.entropy.payload_bits);
//!
//! let (restored, status) = decoder.decode_encoded(&encoded).unwrap();
//! assert!(status.is_complete());
//! assert_eq!(restored.to_pixels().len(), 64);
//! ```
//!
//! ## Bitstream
//!
//! Each block is self-describing: a 16-bit symbol count, then a 32-bit symbol
//! and 8-bit code length per distinct symbol, then the Huffman-coded payload,
//! MSB first. In adaptive mode the block variance travels outside the
//! bitstream, in [`EncodedBlock::variance`].
//!
//! ## Architecture
//!
//! - `adct-core`: blocks, configuration, constants, errors
//! - `adct-transform`: DCT, quantization, zigzag scan
//! - `adct-bitstream`: bit I/O, run-length coding, Huffman coding
//! - `adct-encoder` / `adct-decoder`: the block pipelines

// Re-export core types
pub use adct_core::{
    consts, validate_block_size, AdctError, AdctResult, Block, CodecConfig, EncodedBlock,
    ErrorCategory,
};

// Re-export pipeline stages
pub use adct_bitstream::{BitReader, BitWriter, HuffmanCode, RleSymbol};
pub use adct_transform::{QuantContext, TransformContext, ZigzagScan};

// Re-export decoder
pub use adct_decoder::{BlockDecoder, DecodeStatus, EntropyDecoder};

// Re-export encoder
pub use adct_encoder::{
    max_encoded_size, BlockEncoder, BlockReport, EncodeReport, EncodeStatus, EntropyEncoder,
    EntropyMode,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_codec_creation() {
        let config = CodecConfig::new().block_size(16).quality(90).adaptive(true);
        assert!(BlockEncoder::new(config).is_ok());
        assert!(BlockDecoder::new(config).is_ok());
        assert!(BlockEncoder::new(config.block_size(24)).is_err());
    }
}
