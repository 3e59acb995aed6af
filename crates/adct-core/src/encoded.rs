//! Encoded block container shared by the encoder and decoder

/// One block's bitstream plus the side information needed to decode it.
///
/// The bitstream does not carry the block variance. Adaptive decoding needs the
/// same variance the encoder used, so it travels alongside the bytes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedBlock {
    pub data: Vec<u8>,
    pub variance: f64,
}

impl EncodedBlock {
    pub fn new(data: Vec<u8>, variance: f64) -> Self {
        Self { data, variance }
    }

    /// Size of the bitstream in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
