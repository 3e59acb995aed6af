//! Entropy coding of one quantized block
//!
//! Bitstream layout, MSB first:
//!
//! ```text
//! [symbol count: 16]
//! [symbol value: 32][code length: 8]   × symbol count, in ascending value order
//! [code]...                            one per run-length symbol
//! ```
//!
//! The final byte is zero-padded.

use adct_bitstream::{
    canonical_codes, pack_symbol, run_length_encode, BitWriter, HuffmanTree, SymbolTable,
};
use adct_core::consts::{
    CODE_LENGTH_BITS, MAX_CODE_LENGTH, SYMBOL_COUNT_BITS, SYMBOL_VALUE_BITS,
};
use adct_core::{AdctError, AdctResult, Block};
use adct_transform::ZigzagScan;

/// Which entropy coder backs the block bitstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntropyMode {
    #[default]
    Huffman,
    /// Reserved; encoding with it fails with [`AdctError::UnsupportedFeature`]
    Arithmetic,
}

/// Whether any coefficient had to be clamped to fit the symbol format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStatus {
    Clean,
    /// `values` coefficients were clamped into [-32768, 32767]
    Saturated { values: usize },
}

/// Statistics for one entropy-coded block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeReport {
    pub bytes_written: usize,
    pub header_bits: usize,
    pub payload_bits: usize,
    /// Run-length symbols emitted, EOB and fillers included
    pub rle_symbols: usize,
    /// Distinct packed symbols in the header
    pub distinct_symbols: usize,
    pub status: EncodeStatus,
}

impl EncodeReport {
    pub fn total_bits(&self) -> usize {
        self.header_bits + self.payload_bits
    }

    pub fn is_saturated(&self) -> bool {
        matches!(self.status, EncodeStatus::Saturated { .. })
    }
}

/// Upper bound on the encoded size of one block, in bytes.
///
/// A block yields at most N² + 1 run-length symbols; in the worst case all of
/// them are distinct and each takes a maximum-length code.
pub fn max_encoded_size(block_size: usize) -> usize {
    let max_symbols = block_size * block_size + 1;
    let header_bits = SYMBOL_COUNT_BITS + max_symbols * (SYMBOL_VALUE_BITS + CODE_LENGTH_BITS);
    let payload_bits = max_symbols * MAX_CODE_LENGTH as usize;
    (header_bits + payload_bits).div_ceil(8)
}

/// Encodes quantized blocks of one size into self-describing bitstreams
#[derive(Debug, Clone)]
pub struct EntropyEncoder {
    zigzag: ZigzagScan,
    mode: EntropyMode,
}

impl EntropyEncoder {
    pub fn new(block_size: usize) -> AdctResult<Self> {
        Ok(Self {
            zigzag: ZigzagScan::new(block_size)?,
            mode: EntropyMode::default(),
        })
    }

    pub fn with_mode(mut self, mode: EntropyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn block_size(&self) -> usize {
        self.zigzag.block_size()
    }

    pub fn mode(&self) -> EntropyMode {
        self.mode
    }

    /// Entropy-code `block` into `output`.
    ///
    /// On [`AdctError::BufferOverflow`] the contents of `output` are
    /// unspecified; retry with a buffer of [`max_encoded_size`] bytes.
    pub fn encode_block(&self, block: &Block<i32>, output: &mut [u8]) -> AdctResult<EncodeReport> {
        if self.mode == EntropyMode::Arithmetic {
            return Err(AdctError::UnsupportedFeature(
                "arithmetic entropy coding".to_string(),
            ));
        }
        if block.size() != self.block_size() {
            return Err(AdctError::BlockSizeMismatch {
                expected: self.block_size(),
                actual: block.size(),
            });
        }

        // Step 1: Zigzag scan and run-length encode
        let scanned = self.zigzag.scan(block);
        let rle = run_length_encode(&scanned);

        // Step 2: Pack pairs into symbols, counting clamped values
        let mut saturated = 0;
        let packed: Vec<u32> = rle
            .iter()
            .map(|&symbol| {
                let (value, clamped) = pack_symbol(symbol);
                saturated += clamped as usize;
                value
            })
            .collect();

        // Step 3: Symbol table and canonical Huffman codes
        let table = SymbolTable::from_symbols(&packed)?;
        let lengths = HuffmanTree::build(&table.frequencies())?.code_lengths()?;
        let codes = canonical_codes(&lengths)?;

        // Step 4: Header
        let mut writer = BitWriter::new(output);
        writer.write_bits(table.len() as u64, SYMBOL_COUNT_BITS)?;
        for (symbol, &length) in table.symbols().zip(&lengths) {
            writer.write_bits(symbol as u64, SYMBOL_VALUE_BITS)?;
            writer.write_bits(length as u64, CODE_LENGTH_BITS)?;
        }
        let header_bits = writer.bits_written();

        // Step 5: Payload
        for (&symbol, pair) in packed.iter().zip(&rle) {
            let index = table.index_of(symbol).ok_or_else(|| {
                AdctError::InvalidParameter(format!("symbol {:#x} missing from table", symbol))
            })?;
            log::trace!("run {} value {} -> {:?}", pair.run, pair.value, codes[index]);
            writer.write_code(codes[index])?;
        }
        let payload_bits = writer.bits_written() - header_bits;
        let bytes_written = writer.finish();

        let status = if saturated > 0 {
            log::warn!(
                "{} coefficient(s) clamped to the 16-bit symbol range",
                saturated
            );
            EncodeStatus::Saturated { values: saturated }
        } else {
            EncodeStatus::Clean
        };

        log::debug!(
            "encoded {}x{} block: {} symbols ({} distinct), {} header + {} payload bits, {} bytes",
            self.block_size(),
            self.block_size(),
            rle.len(),
            table.len(),
            header_bits,
            payload_bits,
            bytes_written
        );

        Ok(EncodeReport {
            bytes_written,
            header_bits,
            payload_bits,
            rle_symbols: rle.len(),
            distinct_symbols: table.len(),
            status,
        })
    }
}
