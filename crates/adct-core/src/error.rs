//! Error types for block codec operations

use thiserror::Error;

/// Result type for block codec operations
pub type AdctResult<T> = Result<T, AdctError>;

/// Errors that can occur while transforming, quantizing or entropy coding a block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdctError {
    #[error("Invalid block size: {0} (must be a power of two no larger than {max})", max = crate::consts::MAX_BLOCK_SIZE)]
    InvalidBlockSize(usize),

    #[error("Block size mismatch: expected {expected}x{expected}, got {actual}x{actual}")]
    BlockSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("Bit writer overflow: buffer capacity of {capacity} bytes exhausted")]
    BufferOverflow { capacity: usize },

    #[error("Too many distinct symbols: {count} (maximum {max})")]
    TooManySymbols { count: usize, max: usize },

    #[error("Huffman code too long: {length} bits (maximum {max})")]
    CodeTooLong { length: usize, max: usize },

    #[error("Bit reader underflow: no bits left in the stream")]
    BufferUnderflow,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid bitstream: {0}")]
    InvalidBitstream(String),
}

/// Broad classes of failure a caller may want to react to differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller broke an API precondition; retrying with the same input is pointless
    ContractViolation,
    /// A fixed-size resource ran out; a larger buffer or smaller input may succeed
    ResourceExhaustion,
    /// The input stream is damaged or not a block bitstream
    StreamCorruption,
}

impl AdctError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdctError::InvalidBlockSize(_)
            | AdctError::BlockSizeMismatch { .. }
            | AdctError::InvalidParameter(_)
            | AdctError::BufferTooSmall { .. }
            | AdctError::UnsupportedFeature(_) => ErrorCategory::ContractViolation,
            AdctError::BufferOverflow { .. }
            | AdctError::TooManySymbols { .. }
            | AdctError::CodeTooLong { .. } => ErrorCategory::ResourceExhaustion,
            AdctError::BufferUnderflow
            | AdctError::InvalidHeader(_)
            | AdctError::InvalidBitstream(_) => ErrorCategory::StreamCorruption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            AdctError::InvalidBlockSize(6).category(),
            ErrorCategory::ContractViolation
        );
        assert_eq!(
            AdctError::BufferOverflow { capacity: 4 }.category(),
            ErrorCategory::ResourceExhaustion
        );
        assert_eq!(
            AdctError::BufferUnderflow.category(),
            ErrorCategory::StreamCorruption
        );
    }

    #[test]
    fn test_error_display() {
        let err = AdctError::TooManySymbols {
            count: 70000,
            max: 65535,
        };
        assert_eq!(
            err.to_string(),
            "Too many distinct symbols: 70000 (maximum 65535)"
        );
    }
}
