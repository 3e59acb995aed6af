//! Quantization for lossy compression

use crate::adaptive_quant::AdaptiveScale;
use adct_core::consts::{MAX_QUALITY, MIN_QUALITY};
use adct_core::{validate_block_size, AdctResult, Block};

/// Standard JPEG luminance quantization matrix (8x8, row-major)
pub const BASE_LUMA_QUANT: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, 12, 12, 14, 19, 26, 58, 60, 55, 14, 13, 16, 24, 40, 57, 69,
    56, 14, 17, 22, 29, 51, 87, 80, 62, 18, 22, 37, 56, 68, 109, 103, 77, 24, 35, 55, 64, 81,
    104, 113, 92, 49, 64, 78, 87, 103, 121, 120, 101, 72, 92, 95, 98, 112, 100, 103, 99,
];

const MIN_STEP: f64 = 1.0;
const MAX_STEP: f64 = 255.0;

/// Map quality (1-100) to the table scale factor, normalized so 50 → 1.0
pub fn quality_scale(quality: u8) -> f64 {
    let quality = quality.clamp(MIN_QUALITY, MAX_QUALITY) as f64;
    let scale = if quality < 50.0 {
        5000.0 / quality
    } else {
        200.0 - 2.0 * quality
    };
    scale / 100.0
}

/// Generate the quantization matrix for a block size and quality.
///
/// 8x8 blocks scale the JPEG luminance table. Other sizes use a synthetic
/// table that grows with the Euclidean distance from DC.
pub fn generate_quant_matrix(block_size: usize, quality: u8) -> Block<f64> {
    let scale = quality_scale(quality);

    if block_size == 8 {
        Block::from_fn(8, |i, j| {
            (BASE_LUMA_QUANT[i * 8 + j] as f64 * scale).clamp(MIN_STEP, MAX_STEP)
        })
    } else {
        Block::from_fn(block_size, |i, j| {
            let distance = ((i * i + j * j) as f64).sqrt();
            ((1.0 + distance) * scale * 8.0).clamp(MIN_STEP, MAX_STEP)
        })
    }
}

/// Elementwise reciprocal of a quantization matrix
pub fn generate_dequant_matrix(quant_matrix: &Block<f64>) -> Block<f64> {
    quant_matrix.map(|q| 1.0 / q)
}

/// Which side of the quantizer a derived matrix is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantDirection {
    Quantize,
    Dequantize,
}

/// Quantization state for one block size and quality.
///
/// The base matrices never change after construction. In adaptive mode a
/// per-block matrix is derived from the block variance on every call and
/// dropped afterwards.
#[derive(Debug, Clone)]
pub struct QuantContext {
    block_size: usize,
    quality: u8,
    adaptive: bool,
    quant_matrix: Block<f64>,
    dequant_matrix: Block<f64>,
}

impl QuantContext {
    /// Quality outside 1-100 is clamped
    pub fn new(block_size: usize, quality: u8, adaptive: bool) -> AdctResult<Self> {
        validate_block_size(block_size)?;
        let quality = quality.clamp(MIN_QUALITY, MAX_QUALITY);
        let quant_matrix = generate_quant_matrix(block_size, quality);
        let dequant_matrix = generate_dequant_matrix(&quant_matrix);

        Ok(Self {
            block_size,
            quality,
            adaptive,
            quant_matrix,
            dequant_matrix,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn is_adaptive(&self) -> bool {
        self.adaptive
    }

    pub fn quant_matrix(&self) -> &Block<f64> {
        &self.quant_matrix
    }

    pub fn dequant_matrix(&self) -> &Block<f64> {
        &self.dequant_matrix
    }

    /// Derive the per-block matrix for `variance`.
    ///
    /// The quantize side scales step sizes by `2 - norm(variance)`; the
    /// dequantize side scales the reciprocal table by the inverse. DC is
    /// never rescaled.
    pub fn adjusted_matrix(&self, variance: f64, direction: QuantDirection) -> Block<f64> {
        let scale = AdaptiveScale::from_variance(variance);
        let (source, factor) = match direction {
            QuantDirection::Quantize => (&self.quant_matrix, scale.quantize),
            QuantDirection::Dequantize => (&self.dequant_matrix, scale.dequantize),
        };

        Block::from_fn(self.block_size, |i, j| {
            let base = source[(i, j)];
            if i == 0 && j == 0 {
                base
            } else if direction == QuantDirection::Quantize {
                (base * factor).max(MIN_STEP)
            } else {
                base * factor
            }
        })
    }

    /// Divide by the step size and round to the nearest integer
    pub fn quantize(&self, coeffs: &Block<f64>, variance: f64) -> Block<i32> {
        self.check_size(coeffs.size());
        let adjusted;
        let steps = if self.adaptive {
            adjusted = self.adjusted_matrix(variance, QuantDirection::Quantize);
            &adjusted
        } else {
            &self.quant_matrix
        };

        Block::from_fn(self.block_size, |i, j| {
            (coeffs[(i, j)] / steps[(i, j)]).round() as i32
        })
    }

    /// Multiply back by the step size.
    ///
    /// Both paths read the dequant-domain (reciprocal) matrix and invert it, so
    /// the result is `q · step` whether or not the block was adaptively scaled.
    pub fn dequantize(&self, quantized: &Block<i32>, variance: f64) -> Block<f64> {
        self.check_size(quantized.size());
        let adjusted;
        let reciprocals = if self.adaptive {
            adjusted = self.adjusted_matrix(variance, QuantDirection::Dequantize);
            &adjusted
        } else {
            &self.dequant_matrix
        };

        Block::from_fn(self.block_size, |i, j| {
            quantized[(i, j)] as f64 / reciprocals[(i, j)]
        })
    }

    fn check_size(&self, size: usize) {
        assert_eq!(
            size, self.block_size,
            "quantization context built for {}x{} blocks",
            self.block_size, self.block_size
        );
    }
}
