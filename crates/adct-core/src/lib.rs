//! Core types for the adaptive DCT block codec
//!
//! This crate provides the fundamental data structures shared by every stage of
//! the codec: the square [`Block`] container, the [`CodecConfig`] knobs, codec
//! constants, the [`EncodedBlock`] carrier and the error type.

pub mod block;
pub mod config;
pub mod consts;
pub mod encoded;
pub mod error;

pub use block::{validate_block_size, Block};
pub use config::CodecConfig;
pub use encoded::EncodedBlock;
pub use error::{AdctError, AdctResult, ErrorCategory};
