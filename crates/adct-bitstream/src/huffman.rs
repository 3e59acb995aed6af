//! Huffman coding with canonical codes
//!
//! The tree is built from symbol frequencies only to obtain code lengths. The
//! codes that go on the wire are canonical: they are fully determined by the
//! lengths, so a decoder can rebuild them from a header of `(symbol, length)`
//! pairs. Trees live in flat arenas and are walked with explicit stacks.

use adct_core::consts::MAX_CODE_LENGTH;
use adct_core::{AdctError, AdctResult};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A code pattern, `length` bits wide, stored in the low bits of `bits`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HuffmanCode {
    pub bits: u64,
    pub length: u8,
}

#[derive(Debug, Clone, Copy)]
enum TreeNode {
    Leaf(usize),
    Internal { left: usize, right: usize },
}

/// Huffman tree over symbol indices `0..frequencies.len()`
#[derive(Debug)]
pub struct HuffmanTree {
    nodes: Vec<TreeNode>,
    root: usize,
    num_symbols: usize,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// Ties are broken by insertion order: leaves enter in index order and each
    /// merged node enters after everything already queued. The first node
    /// popped becomes the left child.
    pub fn build(frequencies: &[u64]) -> AdctResult<Self> {
        if frequencies.is_empty() {
            return Err(AdctError::InvalidParameter(
                "Cannot build a Huffman tree without symbols".to_string(),
            ));
        }

        let mut nodes = Vec::with_capacity(frequencies.len() * 2 - 1);
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        for (symbol, &freq) in frequencies.iter().enumerate() {
            nodes.push(TreeNode::Leaf(symbol));
            heap.push(Reverse((freq, symbol, symbol)));
        }

        let mut sequence = frequencies.len();
        while heap.len() > 1 {
            let (Some(Reverse((left_freq, _, left))), Some(Reverse((right_freq, _, right)))) =
                (heap.pop(), heap.pop())
            else {
                break;
            };

            let parent = nodes.len();
            nodes.push(TreeNode::Internal { left, right });
            heap.push(Reverse((left_freq + right_freq, sequence, parent)));
            sequence += 1;
        }

        let root = heap
            .pop()
            .map(|Reverse((_, _, node))| node)
            .unwrap_or_default();

        Ok(Self {
            nodes,
            root,
            num_symbols: frequencies.len(),
        })
    }

    pub fn num_symbols(&self) -> usize {
        self.num_symbols
    }

    /// Code length of every symbol, by index.
    ///
    /// A lone symbol gets length 1 so it still produces a bit per occurrence.
    pub fn code_lengths(&self) -> AdctResult<Vec<u8>> {
        let mut lengths = vec![0u8; self.num_symbols];
        for (symbol, code) in self.path_codes()?.into_iter().enumerate() {
            lengths[symbol] = code.length;
        }
        Ok(lengths)
    }

    /// Codes read off the tree: `0` for a left branch, `1` for a right one
    pub fn path_codes(&self) -> AdctResult<Vec<HuffmanCode>> {
        let mut codes = vec![HuffmanCode::default(); self.num_symbols];

        if let TreeNode::Leaf(symbol) = self.nodes[self.root] {
            codes[symbol] = HuffmanCode { bits: 0, length: 1 };
            return Ok(codes);
        }

        let mut stack = vec![(self.root, 0u64, 0usize)];
        while let Some((node, bits, depth)) = stack.pop() {
            match self.nodes[node] {
                TreeNode::Leaf(symbol) => {
                    codes[symbol] = HuffmanCode {
                        bits,
                        length: depth as u8,
                    };
                }
                TreeNode::Internal { left, right } => {
                    if depth >= MAX_CODE_LENGTH as usize {
                        return Err(AdctError::CodeTooLong {
                            length: depth + 1,
                            max: MAX_CODE_LENGTH as usize,
                        });
                    }
                    stack.push((right, (bits << 1) | 1, depth + 1));
                    stack.push((left, bits << 1, depth + 1));
                }
            }
        }

        Ok(codes)
    }
}

/// Assign canonical codes from code lengths.
///
/// Symbols are ordered by `(length, index)`; the first gets all zeros and each
/// following code is the previous one plus one, shifted left when the length
/// grows. Length 0 means the symbol is unused. A length set that needs more
/// codes than its lengths allow is rejected.
pub fn canonical_codes(lengths: &[u8]) -> AdctResult<Vec<HuffmanCode>> {
    let mut order: Vec<usize> = (0..lengths.len()).filter(|&i| lengths[i] > 0).collect();
    // Stable, so equal lengths keep index order
    order.sort_by_key(|&i| lengths[i]);

    let mut codes = vec![HuffmanCode::default(); lengths.len()];
    let mut code = 0u128;
    let mut prev_length = 0u8;

    for (rank, &symbol) in order.iter().enumerate() {
        let length = lengths[symbol];
        if length > MAX_CODE_LENGTH {
            return Err(AdctError::CodeTooLong {
                length: length as usize,
                max: MAX_CODE_LENGTH as usize,
            });
        }

        if rank > 0 {
            code += 1;
        }
        code <<= length - prev_length;
        if code >> length != 0 {
            return Err(AdctError::InvalidBitstream(
                "Huffman code lengths are over-subscribed".to_string(),
            ));
        }

        codes[symbol] = HuffmanCode {
            bits: code as u64,
            length,
        };
        prev_length = length;
    }

    Ok(codes)
}

const NO_CHILD: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct TrieNode {
    children: [u32; 2],
    symbol: Option<usize>,
}

impl TrieNode {
    const EMPTY: TrieNode = TrieNode {
        children: [NO_CHILD, NO_CHILD],
        symbol: None,
    };
}

/// Bit-by-bit decoder over a binary trie of canonical codes
#[derive(Debug)]
pub struct HuffmanDecoder {
    nodes: Vec<TrieNode>,
}

impl HuffmanDecoder {
    /// Build the trie from per-symbol code lengths
    pub fn from_lengths(code_lengths: &[u8]) -> AdctResult<Self> {
        let codes = canonical_codes(code_lengths)?;
        let mut decoder = Self {
            nodes: vec![TrieNode::EMPTY],
        };

        for (symbol, code) in codes.into_iter().enumerate() {
            if code.length > 0 {
                decoder.insert_code(symbol, code)?;
            }
        }

        Ok(decoder)
    }

    fn insert_code(&mut self, symbol: usize, code: HuffmanCode) -> AdctResult<()> {
        let mut node = 0usize;

        for i in (0..code.length).rev() {
            if self.nodes[node].symbol.is_some() {
                return Err(AdctError::InvalidBitstream(
                    "Invalid Huffman tree".to_string(),
                ));
            }
            let bit = ((code.bits >> i) & 1) as usize;
            let child = self.nodes[node].children[bit];
            node = if child == NO_CHILD {
                let next = self.nodes.len();
                self.nodes.push(TrieNode::EMPTY);
                self.nodes[node].children[bit] = next as u32;
                next
            } else {
                child as usize
            };
        }

        let target = &mut self.nodes[node];
        if target.symbol.is_some() || target.children != [NO_CHILD, NO_CHILD] {
            return Err(AdctError::InvalidBitstream(
                "Invalid Huffman tree".to_string(),
            ));
        }
        target.symbol = Some(symbol);
        Ok(())
    }

    /// Decode one symbol index, pulling bits from `read_bit`
    pub fn decode<F>(&self, read_bit: &mut F) -> AdctResult<usize>
    where
        F: FnMut() -> AdctResult<bool>,
    {
        let mut node = 0usize;

        loop {
            let current = self.nodes[node];
            if let Some(symbol) = current.symbol {
                return Ok(symbol);
            }
            let bit = read_bit()?;
            let child = current.children[bit as usize];
            if child == NO_CHILD {
                return Err(AdctError::InvalidBitstream(
                    "Invalid Huffman code".to_string(),
                ));
            }
            node = child as usize;
        }
    }
}
