//! Codec configuration

use crate::block::validate_block_size;
use crate::consts;
use crate::AdctResult;

/// The three knobs the codec exposes: block size, quality and adaptivity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    /// Side length of a block (power of two)
    pub block_size: usize,
    /// Quality (1-100, higher is better)
    pub quality: u8,
    /// Rescale quantization per block from its variance
    pub adaptive: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            block_size: consts::DEFAULT_BLOCK_SIZE,
            quality: consts::DEFAULT_QUALITY,
            adaptive: false,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(consts::MIN_QUALITY, consts::MAX_QUALITY);
        self
    }

    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Check the block size; quality is clamped rather than rejected
    pub fn validate(&self) -> AdctResult<()> {
        validate_block_size(self.block_size)
    }
}
