//! Adaptive DCT block decoder
//!
//! [`BlockDecoder`] inverts the full pipeline: entropy decoding, dequantization
//! and inverse DCT. Output samples are still level-shifted; use
//! [`Block::to_pixels`] to get 8-bit samples back.

pub mod entropy;

pub use entropy::{DecodeStatus, EntropyDecoder};

use adct_core::{AdctError, AdctResult, Block, CodecConfig, EncodedBlock};
use adct_transform::{QuantContext, TransformContext};
use rayon::prelude::*;

/// Full-pipeline decoder for one block configuration
#[derive(Debug, Clone)]
pub struct BlockDecoder {
    config: CodecConfig,
    transform: TransformContext,
    quant: QuantContext,
    entropy: EntropyDecoder,
}

impl BlockDecoder {
    pub fn new(config: CodecConfig) -> AdctResult<Self> {
        config.validate()?;

        Ok(Self {
            transform: TransformContext::new(config.block_size)?,
            quant: QuantContext::new(config.block_size, config.quality, config.adaptive)?,
            entropy: EntropyDecoder::new(config.block_size)?,
            config,
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode one bitstream into level-shifted samples.
    ///
    /// `variance` must be the value the encoder reported; it is ignored unless
    /// the configuration is adaptive.
    pub fn decode(
        &self,
        data: &[u8],
        variance: f64,
        output: &mut Block<f64>,
    ) -> AdctResult<DecodeStatus> {
        if output.size() != self.config.block_size {
            return Err(AdctError::BlockSizeMismatch {
                expected: self.config.block_size,
                actual: output.size(),
            });
        }

        let mut quantized = Block::zeros(self.config.block_size);
        let status = self.entropy.decode_block(data, &mut quantized)?;
        let coeffs = self.quant.dequantize(&quantized, variance);
        output.copy_from(&self.transform.inverse(&coeffs))?;

        Ok(status)
    }

    /// Decode one [`EncodedBlock`] into a new block
    pub fn decode_encoded(&self, encoded: &EncodedBlock) -> AdctResult<(Block<f64>, DecodeStatus)> {
        let mut output = Block::zeros(self.config.block_size);
        let status = self.decode(&encoded.data, encoded.variance, &mut output)?;
        Ok((output, status))
    }

    /// Decode many blocks in parallel, preserving order
    pub fn decode_blocks(
        &self,
        blocks: &[EncodedBlock],
    ) -> AdctResult<Vec<(Block<f64>, DecodeStatus)>> {
        let decoded: Vec<(Block<f64>, DecodeStatus)> = blocks
            .par_iter()
            .map(|encoded| self.decode_encoded(encoded))
            .collect::<AdctResult<_>>()?;

        let degraded = decoded.iter().filter(|(_, s)| !s.is_complete()).count();
        if degraded > 0 {
            log::warn!("{} of {} blocks decoded degraded", degraded, decoded.len());
        }
        log::debug!("decoded {} blocks", decoded.len());
        Ok(decoded)
    }
}
