//! Bitstream writer implementation

use crate::huffman::HuffmanCode;
use adct_core::{AdctError, AdctResult};

/// Writes bits MSB-first into a caller-owned byte buffer.
///
/// The buffer is never grown. When a write does not fit, it fails with
/// [`AdctError::BufferOverflow`] and leaves everything written so far intact.
pub struct BitWriter<'a> {
    buffer: &'a mut [u8],
    bit_pos: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, bit_pos: 0 }
    }

    fn capacity_bits(&self) -> usize {
        self.buffer.len() * 8
    }

    fn overflow(&self) -> AdctError {
        AdctError::BufferOverflow {
            capacity: self.buffer.len(),
        }
    }

    /// Write a single bit
    pub fn write_bit(&mut self, bit: bool) -> AdctResult<()> {
        if self.bit_pos >= self.capacity_bits() {
            return Err(self.overflow());
        }
        self.push_bit(bit);
        Ok(())
    }

    /// Write the low `num_bits` of `value`, most significant first.
    ///
    /// Capacity is checked before any bit is written.
    pub fn write_bits(&mut self, value: u64, num_bits: usize) -> AdctResult<()> {
        if num_bits > 64 {
            return Err(AdctError::InvalidParameter(
                "Cannot write more than 64 bits at once".to_string(),
            ));
        }
        if self.bit_pos + num_bits > self.capacity_bits() {
            return Err(self.overflow());
        }

        for i in (0..num_bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Write a Huffman code pattern
    pub fn write_code(&mut self, code: HuffmanCode) -> AdctResult<()> {
        self.write_bits(code.bits, code.length as usize)
    }

    /// Total bits written so far
    pub fn bits_written(&self) -> usize {
        self.bit_pos
    }

    /// Bytes touched so far, counting a partially filled final byte
    pub fn bytes_used(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }

    /// Finish writing. The unused low bits of the last byte are already zero.
    pub fn finish(self) -> usize {
        self.bytes_used()
    }

    fn push_bit(&mut self, bit: bool) {
        let byte = self.bit_pos / 8;
        let shift = 7 - (self.bit_pos % 8);
        if shift == 7 {
            // First bit of a fresh byte; the caller's buffer may hold stale data
            self.buffer[byte] = 0;
        }
        if bit {
            self.buffer[byte] |= 1 << shift;
        }
        self.bit_pos += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits() {
        let mut output = [0u8; 3];
        let mut writer = BitWriter::new(&mut output);

        writer.write_bits(0b1010_1010, 8).unwrap();
        writer.write_bits(0b0101, 4).unwrap();
        writer.write_bits(0b0101, 4).unwrap();
        writer.write_bits(0b1111_0000, 8).unwrap();
        assert_eq!(writer.finish(), 3);

        assert_eq!(output, [0xAA, 0x55, 0xF0]);
    }

    #[test]
    fn test_write_bit() {
        let mut output = [0u8; 1];
        let mut writer = BitWriter::new(&mut output);

        for bit in [true, false, true, false, true, false, true, false] {
            writer.write_bit(bit).unwrap();
        }
        writer.finish();

        assert_eq!(output, [0b1010_1010]);
    }

    #[test]
    fn test_partial_byte_is_zero_padded() {
        let mut output = [0xFFu8; 2];
        let mut writer = BitWriter::new(&mut output);
        writer.write_bits(0b101, 3).unwrap();
        assert_eq!(writer.bits_written(), 3);
        assert_eq!(writer.finish(), 1);
        assert_eq!(output[0], 0b1010_0000);
        // Untouched byte stays as it was
        assert_eq!(output[1], 0xFF);
    }

    #[test]
    fn test_overflow_keeps_written_bits() {
        let mut output = [0u8; 1];
        let mut writer = BitWriter::new(&mut output);
        writer.write_bits(0b1111, 4).unwrap();

        let err = writer.write_bits(0b11111, 5).unwrap_err();
        assert_eq!(err, AdctError::BufferOverflow { capacity: 1 });
        // Nothing from the failed write landed
        assert_eq!(writer.bits_written(), 4);

        writer.write_bits(0b0011, 4).unwrap();
        assert!(writer.write_bit(true).is_err());
        writer.finish();
        assert_eq!(output, [0b1111_0011]);
    }

    #[test]
    fn test_empty_buffer_overflows() {
        let mut output: [u8; 0] = [];
        let mut writer = BitWriter::new(&mut output);
        assert!(writer.write_bit(false).is_err());
        assert!(writer.write_bits(0, 0).is_ok());
    }

    #[test]
    fn test_write_code() {
        let mut output = [0u8; 1];
        let mut writer = BitWriter::new(&mut output);
        writer
            .write_code(HuffmanCode {
                bits: 0b110,
                length: 3,
            })
            .unwrap();
        writer
            .write_code(HuffmanCode {
                bits: 0b01,
                length: 2,
            })
            .unwrap();
        writer.finish();
        assert_eq!(output, [0b1100_1000]);
    }

    #[test]
    fn test_rejects_wide_writes() {
        let mut output = [0u8; 16];
        let mut writer = BitWriter::new(&mut output);
        assert!(matches!(
            writer.write_bits(0, 65),
            Err(AdctError::InvalidParameter(_))
        ));
        writer.write_bits(u64::MAX, 64).unwrap();
        assert_eq!(writer.bytes_used(), 8);
    }
}
