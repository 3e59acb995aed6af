//! Bitstream reading and writing for the adaptive DCT codec
//!
//! This crate provides MSB-first bit I/O over caller-owned buffers, run-length
//! coding of zigzag-ordered coefficients, symbol packing and canonical Huffman
//! coding.

pub mod bitreader;
pub mod bitwriter;
pub mod huffman;
pub mod rle;
pub mod symbol;

pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
pub use huffman::{canonical_codes, HuffmanCode, HuffmanDecoder, HuffmanTree};
pub use rle::{run_length_decode, run_length_encode, RleSymbol, RunLengthExpander};
pub use symbol::{fold_sign, pack_symbol, unfold_sign, unpack_symbol, Folded, SymbolTable};
