//! Transform operations for the adaptive DCT codec
//!
//! This crate implements the orthonormal DCT-II and its inverse, quality-driven
//! and variance-adaptive quantization, and zigzag coefficient scanning.

pub mod adaptive_quant;
pub mod dct;
pub mod quantization;
pub mod zigzag;

pub use adaptive_quant::*;
pub use dct::*;
pub use quantization::*;
pub use zigzag::*;
