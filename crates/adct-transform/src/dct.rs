//! DCT (Discrete Cosine Transform) implementation
//!
//! The separable 2D DCT-II is computed as two matrix products against a basis
//! precomputed once per block size: `C · X · Cᵗ` forward and `Cᵗ · X · C`
//! inverse. The basis is orthonormal, so the inverse reconstructs the input up
//! to floating-point rounding.

use adct_core::{validate_block_size, AdctResult, Block};
use std::f64::consts::PI;

/// Precomputed DCT basis for one block size.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct TransformContext {
    size: usize,
    basis: Block<f64>,
    transposed: Block<f64>,
}

impl TransformContext {
    /// Build the N×N basis `C[i][j] = α(i)·cos(π(2j+1)i / 2N)`
    pub fn new(block_size: usize) -> AdctResult<Self> {
        validate_block_size(block_size)?;

        let n = block_size as f64;
        let basis = Block::from_fn(block_size, |i, j| {
            let alpha = if i == 0 {
                1.0 / n.sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            alpha * ((PI * (2 * j + 1) as f64 * i as f64) / (2.0 * n)).cos()
        });
        let transposed = Block::from_fn(block_size, |i, j| basis[(j, i)]);

        Ok(Self {
            size: block_size,
            basis,
            transposed,
        })
    }

    pub fn block_size(&self) -> usize {
        self.size
    }

    /// The basis matrix `C`
    pub fn basis(&self) -> &Block<f64> {
        &self.basis
    }

    /// Forward DCT-II: spatial samples to frequency coefficients
    pub fn forward(&self, input: &Block<f64>) -> Block<f64> {
        self.check_size(input);
        let temp = multiply(&self.basis, input);
        multiply(&temp, &self.transposed)
    }

    /// Inverse DCT (DCT-III): frequency coefficients back to spatial samples
    pub fn inverse(&self, input: &Block<f64>) -> Block<f64> {
        self.check_size(input);
        let temp = multiply(&self.transposed, input);
        multiply(&temp, &self.basis)
    }

    fn check_size(&self, block: &Block<f64>) {
        assert_eq!(
            block.size(),
            self.size,
            "transform context built for {}x{} blocks",
            self.size,
            self.size
        );
    }
}

/// Plain N³ matrix product of two equally sized square blocks
fn multiply(a: &Block<f64>, b: &Block<f64>) -> Block<f64> {
    let n = a.size();
    let lhs = a.as_slice();
    let rhs = b.as_slice();
    Block::from_fn(n, |i, j| {
        (0..n).map(|k| lhs[i * n + k] * rhs[k * n + j]).sum()
    })
}
