//! Adaptive DCT block encoder
//!
//! [`BlockEncoder`] runs the full forward pipeline on level-shifted samples:
//! variance estimate, forward DCT, (adaptive) quantization and entropy coding.
//! [`EntropyEncoder`] covers the last stage alone for callers that quantize
//! themselves.

pub mod entropy;

pub use entropy::{max_encoded_size, EncodeReport, EncodeStatus, EntropyEncoder, EntropyMode};

use adct_core::{AdctError, AdctResult, Block, CodecConfig, EncodedBlock};
use adct_transform::{block_variance, QuantContext, TransformContext};
use rayon::prelude::*;

/// Result of encoding one block through the full pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockReport {
    /// Variance the quantizer was adapted to; the decoder needs it back
    pub variance: f64,
    pub entropy: EncodeReport,
}

/// Full-pipeline encoder for one block configuration.
///
/// Holds only immutable contexts, so one encoder can serve many threads.
#[derive(Debug, Clone)]
pub struct BlockEncoder {
    config: CodecConfig,
    transform: TransformContext,
    quant: QuantContext,
    entropy: EntropyEncoder,
}

impl BlockEncoder {
    pub fn new(config: CodecConfig) -> AdctResult<Self> {
        config.validate()?;

        Ok(Self {
            transform: TransformContext::new(config.block_size)?,
            quant: QuantContext::new(config.block_size, config.quality, config.adaptive)?,
            entropy: EntropyEncoder::new(config.block_size)?,
            config,
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn quant_context(&self) -> &QuantContext {
        &self.quant
    }

    /// Forward DCT and quantization of one block; also returns the block variance
    pub fn quantize(&self, samples: &Block<f64>) -> AdctResult<(Block<i32>, f64)> {
        self.check_size(samples)?;
        let variance = block_variance(samples);
        let coeffs = self.transform.forward(samples);
        Ok((self.quant.quantize(&coeffs, variance), variance))
    }

    /// Encode level-shifted samples into `output`
    pub fn encode(&self, samples: &Block<f64>, output: &mut [u8]) -> AdctResult<BlockReport> {
        let (quantized, variance) = self.quantize(samples)?;
        let entropy = self.entropy.encode_block(&quantized, output)?;

        log::debug!(
            "block variance {:.2}, quality {}{}: {} bytes",
            variance,
            self.quant.quality(),
            if self.quant.is_adaptive() { " (adaptive)" } else { "" },
            entropy.bytes_written
        );

        Ok(BlockReport { variance, entropy })
    }

    /// Encode into a freshly allocated, exactly sized buffer
    pub fn encode_to_vec(&self, samples: &Block<f64>) -> AdctResult<(EncodedBlock, BlockReport)> {
        let mut buffer = vec![0u8; max_encoded_size(self.config.block_size)];
        let report = self.encode(samples, &mut buffer)?;
        buffer.truncate(report.entropy.bytes_written);
        Ok((EncodedBlock::new(buffer, report.variance), report))
    }

    /// Encode many blocks in parallel, preserving order
    pub fn encode_blocks(&self, blocks: &[Block<f64>]) -> AdctResult<Vec<EncodedBlock>> {
        let encoded: Vec<EncodedBlock> = blocks
            .par_iter()
            .map(|block| self.encode_to_vec(block).map(|(encoded, _)| encoded))
            .collect::<AdctResult<_>>()?;

        log::debug!(
            "encoded {} blocks into {} bytes",
            encoded.len(),
            encoded.iter().map(EncodedBlock::len).sum::<usize>()
        );
        Ok(encoded)
    }

    fn check_size(&self, samples: &Block<f64>) -> AdctResult<()> {
        if samples.size() != self.config.block_size {
            return Err(AdctError::BlockSizeMismatch {
                expected: self.config.block_size,
                actual: samples.size(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_block() -> Block<f64> {
        Block::from_fn(8, |row, col| (row * 16 + col * 4) as f64 - 128.0)
    }

    #[test]
    fn test_rejects_bad_config() {
        assert_eq!(
            BlockEncoder::new(CodecConfig::new().block_size(7)).unwrap_err(),
            AdctError::InvalidBlockSize(7)
        );
    }

    #[test]
    fn test_encode_reports_variance() {
        let encoder = BlockEncoder::new(CodecConfig::new().adaptive(true)).unwrap();
        let samples = gradient_block();
        let (encoded, report) = encoder.encode_to_vec(&samples).unwrap();

        assert_eq!(encoded.variance, block_variance(&samples));
        assert_eq!(encoded.len(), report.entropy.bytes_written);
        assert!(report.variance > 0.0);
    }

    #[test]
    fn test_size_mismatch() {
        let encoder = BlockEncoder::new(CodecConfig::default()).unwrap();
        let mut output = vec![0u8; max_encoded_size(8)];
        assert!(matches!(
            encoder.encode(&Block::zeros(16), &mut output),
            Err(AdctError::BlockSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let encoder = BlockEncoder::new(CodecConfig::new().quality(80)).unwrap();
        let mut rng = fastrand::Rng::with_seed(9);
        let blocks: Vec<Block<f64>> = (0..16)
            .map(|_| Block::from_fn(8, |_, _| rng.i32(-128..128) as f64))
            .collect();

        let parallel = encoder.encode_blocks(&blocks).unwrap();
        for (block, encoded) in blocks.iter().zip(&parallel) {
            let (sequential, _) = encoder.encode_to_vec(block).unwrap();
            assert_eq!(&sequential, encoded);
        }
    }
}
