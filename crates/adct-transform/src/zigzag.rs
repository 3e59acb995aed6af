//! Zigzag scanning for DCT coefficients
//!
//! Coefficients are read along anti-diagonals so that the 1D sequence runs from
//! DC outward to the highest spatial frequency, which groups the zeros left by
//! quantization into long trailing runs.

use adct_core::{validate_block_size, AdctResult, Block};

/// Standard 8×8 zigzag scan order (scan index → raster position)
pub const ZIGZAG_8X8: [usize; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27, 20,
    13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58, 59,
    52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// Build the zigzag order for an N×N block.
///
/// For diagonal `d = row + col`, even diagonals run up-right (row decreasing)
/// and odd diagonals run down-left (row increasing).
pub fn zigzag_order(size: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(size * size);
    if size == 0 {
        return order;
    }

    for d in 0..(2 * size - 1) {
        let first_row = d.saturating_sub(size - 1);
        let last_row = d.min(size - 1);
        if d % 2 == 0 {
            for row in (first_row..=last_row).rev() {
                order.push(row * size + (d - row));
            }
        } else {
            for row in first_row..=last_row {
                order.push(row * size + (d - row));
            }
        }
    }

    order
}

/// Zigzag scanner for one block size.
///
/// Holds the traversal table and its inverse so scanning never recomputes
/// the diagonal walk.
#[derive(Debug, Clone)]
pub struct ZigzagScan {
    size: usize,
    order: Vec<usize>,
    inverse: Vec<usize>,
}

impl ZigzagScan {
    pub fn new(block_size: usize) -> AdctResult<Self> {
        validate_block_size(block_size)?;

        let order = zigzag_order(block_size);
        let mut inverse = vec![0; order.len()];
        for (scan_idx, &pos) in order.iter().enumerate() {
            inverse[pos] = scan_idx;
        }

        Ok(Self {
            size: block_size,
            order,
            inverse,
        })
    }

    pub fn block_size(&self) -> usize {
        self.size
    }

    /// Scan index → raster position
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Raster position → scan index
    pub fn inverse_order(&self) -> &[usize] {
        &self.inverse
    }

    /// Flatten a block into zigzag order
    pub fn scan(&self, block: &Block<i32>) -> Vec<i32> {
        assert_eq!(block.size(), self.size, "zigzag scanner block size");
        let cells = block.as_slice();
        self.order.iter().map(|&pos| cells[pos]).collect()
    }

    /// Rebuild a block from a zigzag sequence.
    ///
    /// A short sequence leaves the remaining high-frequency cells at zero;
    /// anything past N² values is ignored.
    pub fn unscan(&self, sequence: &[i32]) -> Block<i32> {
        let mut block = Block::zeros(self.size);
        self.unscan_into(sequence, &mut block);
        block
    }

    /// Like [`ZigzagScan::unscan`], writing into an existing block
    pub fn unscan_into(&self, sequence: &[i32], block: &mut Block<i32>) {
        assert_eq!(block.size(), self.size, "zigzag scanner block size");
        block.clear();
        let cells = block.as_mut_slice();
        for (&pos, &value) in self.order.iter().zip(sequence) {
            cells[pos] = value;
        }
    }
}
