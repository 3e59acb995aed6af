//! Square sample/coefficient blocks

use crate::consts::{LEVEL_SHIFT, MAX_BLOCK_SIZE};
use crate::{AdctError, AdctResult};
use num_traits::Zero;
use std::ops::{Index, IndexMut};

/// Check that `size` is a block size the codec can work with
pub fn validate_block_size(size: usize) -> AdctResult<()> {
    if size.is_power_of_two() && size <= MAX_BLOCK_SIZE {
        Ok(())
    } else {
        Err(AdctError::InvalidBlockSize(size))
    }
}

/// An N×N block stored row-major in one contiguous buffer.
///
/// Indexing with `(row, col)` is bounds-checked against `[0, N) × [0, N)`, so a
/// column past the end of a row never silently reads into the next row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block<T> {
    size: usize,
    data: Vec<T>,
}

impl<T: Copy + Zero> Block<T> {
    /// Create a zero-filled block
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![T::zero(); size * size],
        }
    }

    /// Reset every element to zero
    pub fn clear(&mut self) {
        self.data.fill(T::zero());
    }
}

impl<T: Copy> Block<T> {
    /// Wrap a row-major buffer of exactly `size * size` elements
    pub fn from_vec(size: usize, data: Vec<T>) -> AdctResult<Self> {
        if data.len() != size * size {
            return Err(AdctError::InvalidParameter(format!(
                "block of size {} needs {} elements, got {}",
                size,
                size * size,
                data.len()
            )));
        }
        Ok(Self { size, data })
    }

    /// Build a block by evaluating `f(row, col)` for every cell
    pub fn from_fn<F>(size: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                data.push(f(row, col));
            }
        }
        Self { size, data }
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of elements (N²)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.size && col < self.size {
            Some(self.data[row * self.size + col])
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks() panics on 0, and an empty block has no rows anyway
        self.data.chunks(self.size.max(1))
    }

    /// Apply `f` to every element, producing a block of the same size
    pub fn map<U, F>(&self, f: F) -> Block<U>
    where
        U: Copy,
        F: FnMut(T) -> U,
    {
        Block {
            size: self.size,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Copy another block's contents into this one
    pub fn copy_from(&mut self, other: &Block<T>) -> AdctResult<()> {
        if other.size != self.size {
            return Err(AdctError::BlockSizeMismatch {
                expected: self.size,
                actual: other.size,
            });
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "index ({}, {}) out of bounds for {}x{} block",
            row,
            col,
            self.size,
            self.size
        );
        row * self.size + col
    }
}

impl<T: Copy> Index<(usize, usize)> for Block<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T: Copy> IndexMut<(usize, usize)> for Block<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }
}

impl Block<f64> {
    /// Extract an N×N tile of 8-bit samples and level-shift it to be centered on zero.
    ///
    /// `stride` is the row pitch of `pixels`; the tile starts at (`row`, `col`).
    pub fn from_pixels(
        pixels: &[u8],
        stride: usize,
        row: usize,
        col: usize,
        size: usize,
    ) -> AdctResult<Self> {
        if col + size > stride {
            return Err(AdctError::InvalidParameter(format!(
                "tile at column {} with size {} exceeds stride {}",
                col, size, stride
            )));
        }
        let last = (row + size) * stride;
        if size > 0 && last > pixels.len() {
            return Err(AdctError::BufferTooSmall {
                expected: last,
                actual: pixels.len(),
            });
        }

        Ok(Self::from_fn(size, |r, c| {
            pixels[(row + r) * stride + col + c] as f64 - LEVEL_SHIFT
        }))
    }

    /// Undo the level shift, rounding and clamping into the 8-bit sample range
    pub fn to_pixels(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v + LEVEL_SHIFT).round().clamp(0.0, 255.0) as u8)
            .collect()
    }

    /// Round every element to the nearest integer (half away from zero)
    pub fn round_to_int(&self) -> Block<i32> {
        self.map(|v| v.round() as i32)
    }
}

impl Block<i32> {
    /// Widen integer coefficients back to floating point
    pub fn to_f64(&self) -> Block<f64> {
        self.map(|v| v as f64)
    }
}
