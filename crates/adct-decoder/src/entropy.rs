//! Entropy decoding of one block bitstream

use adct_bitstream::{unpack_symbol, BitReader, HuffmanDecoder, RunLengthExpander};
use adct_core::consts::{
    CODE_LENGTH_BITS, MAX_CODE_LENGTH, SYMBOL_COUNT_BITS, SYMBOL_VALUE_BITS,
};
use adct_core::{AdctError, AdctResult, Block};
use adct_transform::ZigzagScan;

/// How much of a block was recovered from its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStatus {
    Complete,
    /// The payload broke off after `decoded` zigzag positions; the rest were
    /// zero-filled. The block is usable but not what was encoded.
    Degraded { decoded: usize, reason: AdctError },
}

impl DecodeStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, DecodeStatus::Complete)
    }
}

/// Symbol table parsed from a block header
struct Header {
    symbols: Vec<u32>,
    decoder: HuffmanDecoder,
}

fn truncated(err: AdctError) -> AdctError {
    match err {
        AdctError::BufferUnderflow => {
            AdctError::InvalidHeader("stream ends inside the symbol table".to_string())
        }
        other => other,
    }
}

impl Header {
    fn parse(reader: &mut BitReader<'_>) -> AdctResult<Self> {
        let count = reader.read_bits(SYMBOL_COUNT_BITS).map_err(truncated)? as usize;
        if count == 0 {
            return Err(AdctError::InvalidHeader("empty symbol table".to_string()));
        }

        let mut symbols = Vec::with_capacity(count);
        let mut lengths = Vec::with_capacity(count);
        for _ in 0..count {
            let symbol = reader.read_bits(SYMBOL_VALUE_BITS).map_err(truncated)? as u32;
            let length = reader.read_bits(CODE_LENGTH_BITS).map_err(truncated)? as u8;
            if length == 0 || length > MAX_CODE_LENGTH {
                return Err(AdctError::InvalidHeader(format!(
                    "code length {} for symbol {:#x} outside 1..={}",
                    length, symbol, MAX_CODE_LENGTH
                )));
            }
            symbols.push(symbol);
            lengths.push(length);
        }

        let decoder = HuffmanDecoder::from_lengths(&lengths)
            .map_err(|err| AdctError::InvalidHeader(err.to_string()))?;

        Ok(Self { symbols, decoder })
    }
}

/// Decodes block bitstreams of one size
#[derive(Debug, Clone)]
pub struct EntropyDecoder {
    zigzag: ZigzagScan,
}

impl EntropyDecoder {
    pub fn new(block_size: usize) -> AdctResult<Self> {
        Ok(Self {
            zigzag: ZigzagScan::new(block_size)?,
        })
    }

    pub fn block_size(&self) -> usize {
        self.zigzag.block_size()
    }

    /// Decode one block into `output`.
    ///
    /// A bad header is an error and leaves `output` untouched. Once the header
    /// is accepted, payload problems (an invalid code, the stream running out,
    /// a run past the end of the block) stop decoding, zero the remaining
    /// positions and report [`DecodeStatus::Degraded`].
    pub fn decode_block(&self, data: &[u8], output: &mut Block<i32>) -> AdctResult<DecodeStatus> {
        if output.size() != self.block_size() {
            return Err(AdctError::BlockSizeMismatch {
                expected: self.block_size(),
                actual: output.size(),
            });
        }

        let mut reader = BitReader::new(data);
        let header = Header::parse(&mut reader)?;

        let mut sequence = vec![0; output.len()];
        let mut expander = RunLengthExpander::new(&mut sequence);
        let mut failure = None;
        while !expander.is_complete() {
            let index = match header.decoder.decode(&mut || reader.read_bit()) {
                Ok(index) => index,
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            };
            let symbol = unpack_symbol(header.symbols[index]);
            log::trace!("decoded run {} value {}", symbol.run, symbol.value);
            if let Err(err) = expander.push(symbol) {
                failure = Some(err);
                break;
            }
        }
        let decoded = expander.position();

        self.zigzag.unscan_into(&sequence, output);

        let status = match failure {
            None => DecodeStatus::Complete,
            Some(reason) => {
                log::warn!(
                    "degraded block: {} of {} positions decoded ({})",
                    decoded,
                    output.len(),
                    reason
                );
                DecodeStatus::Degraded { decoded, reason }
            }
        };

        log::debug!(
            "decoded {}x{} block from {} bits ({} symbols in table)",
            self.block_size(),
            self.block_size(),
            reader.bits_read(),
            header.symbols.len()
        );

        Ok(status)
    }
}
