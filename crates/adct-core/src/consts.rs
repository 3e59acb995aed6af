//! Constants used throughout the block codec

/// Block size used when none is configured
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Largest accepted block size (keeps N² coefficients addressable by the symbol table)
pub const MAX_BLOCK_SIZE: usize = 128;

/// Default quality for lossy encoding (1-100)
pub const DEFAULT_QUALITY: u8 = 50;

/// Minimum and maximum quality values
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Midpoint subtracted from 8-bit samples before the forward transform
pub const LEVEL_SHIFT: f64 = 128.0;

/// Longest zero run a single run-length symbol may carry
pub const MAX_RUN_LENGTH: u32 = 255;

/// Largest number of distinct symbols one block header can describe
pub const MAX_SYMBOLS: usize = u16::MAX as usize;

/// Longest Huffman code the codec will emit or accept
pub const MAX_CODE_LENGTH: u8 = 64;

/// Header field widths, in bits
pub const SYMBOL_COUNT_BITS: usize = 16;
pub const SYMBOL_VALUE_BITS: usize = 32;
pub const CODE_LENGTH_BITS: usize = 8;

/// Adaptive quantization: variance is divided by this before clamping
pub const VARIANCE_NORMALIZER: f64 = 1000.0;

/// Clamp range for the normalized variance
pub const MIN_NORMALIZED_VARIANCE: f64 = 0.1;
pub const MAX_NORMALIZED_VARIANCE: f64 = 1.0;
