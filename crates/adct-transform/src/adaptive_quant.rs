//! Adaptive quantization for perceptually better compression
//!
//! Adaptive quantization varies the quantization strength based on local block
//! detail. Flat blocks tolerate coarser steps, so their AC step sizes grow;
//! busy blocks keep the base table. The detail signal is the population
//! variance of the block before the forward transform.

use adct_core::consts::{MAX_NORMALIZED_VARIANCE, MIN_NORMALIZED_VARIANCE, VARIANCE_NORMALIZER};
use adct_core::Block;

/// Population variance `E[x²] − E[x]²` over all samples of a block
pub fn block_variance(block: &Block<f64>) -> f64 {
    let samples = block.as_slice();
    if samples.is_empty() {
        return 0.0;
    }

    let count = samples.len() as f64;
    let (sum, sum_sq) = samples
        .iter()
        .fold((0.0, 0.0), |(s, sq), &x| (s + x, sq + x * x));
    let mean = sum / count;
    sum_sq / count - mean * mean
}

/// Per-block step scaling derived from a variance estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveScale {
    /// Multiplier for quantization step sizes (1.0 to 1.9)
    pub quantize: f64,
    /// Multiplier for the reciprocal (dequantization) table, `1 / quantize`
    pub dequantize: f64,
}

impl AdaptiveScale {
    pub fn from_variance(variance: f64) -> Self {
        let normalized = normalize_variance(variance);
        let quantize = 2.0 - normalized;
        Self {
            quantize,
            dequantize: 1.0 / quantize,
        }
    }
}

/// Map variance into `[0.1, 1.0]`.
///
/// NaN maps to the high end, which leaves the base table unscaled.
pub fn normalize_variance(variance: f64) -> f64 {
    let normalized = variance / VARIANCE_NORMALIZER;
    if normalized.is_nan() {
        return MAX_NORMALIZED_VARIANCE;
    }
    normalized.clamp(MIN_NORMALIZED_VARIANCE, MAX_NORMALIZED_VARIANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_of_flat_block() {
        let block = Block::from_fn(8, |_, _| 42.0);
        assert!(block_variance(&block).abs() < 1e-9);
    }

    #[test]
    fn test_variance_known_values() {
        // Half -1, half +1: mean 0, variance 1
        let block = Block::from_fn(4, |_, col| if col < 2 { -1.0 } else { 1.0 });
        assert!((block_variance(&block) - 1.0).abs() < 1e-12);

        // 0..16: variance (n² - 1) / 12
        let block = Block::from_fn(4, |row, col| (row * 4 + col) as f64);
        assert!((block_variance(&block) - 255.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_range() {
        let flat = AdaptiveScale::from_variance(0.0);
        assert!((flat.quantize - 1.9).abs() < 1e-12);

        let busy = AdaptiveScale::from_variance(1e6);
        assert!((busy.quantize - 1.0).abs() < 1e-12);

        let middle = AdaptiveScale::from_variance(500.0);
        assert!((middle.quantize - 1.5).abs() < 1e-12);
        assert!((middle.quantize * middle.dequantize - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_is_monotonic() {
        let mut previous = f64::INFINITY;
        for variance in [0.0, 50.0, 100.0, 300.0, 700.0, 1000.0, 2000.0] {
            let scale = AdaptiveScale::from_variance(variance).quantize;
            assert!(scale <= previous);
            previous = scale;
        }
    }

    #[test]
    fn test_nan_variance_is_neutral() {
        assert_eq!(normalize_variance(f64::NAN), 1.0);
        assert_eq!(normalize_variance(-5.0), 0.1);
    }
}
