//! Bitstream reader implementation

use adct_core::{AdctError, AdctResult};

/// Reads bits MSB-first from a byte slice
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Read a single bit
    pub fn read_bit(&mut self) -> AdctResult<bool> {
        if self.bits_remaining() == 0 {
            return Err(AdctError::BufferUnderflow);
        }
        let byte = self.data[self.bit_pos / 8];
        let bit = (byte >> (7 - self.bit_pos % 8)) & 1 == 1;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read up to 64 bits, most significant first.
    ///
    /// Fails without consuming anything if fewer than `num_bits` remain.
    pub fn read_bits(&mut self, num_bits: usize) -> AdctResult<u64> {
        if num_bits > 64 {
            return Err(AdctError::InvalidParameter(
                "Cannot read more than 64 bits at once".to_string(),
            ));
        }
        if num_bits > self.bits_remaining() {
            return Err(AdctError::BufferUnderflow);
        }

        let mut value = 0u64;
        for _ in 0..num_bits {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    pub fn bits_read(&self) -> usize {
        self.bit_pos
    }
}
