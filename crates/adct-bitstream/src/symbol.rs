//! Packing run-length pairs into 32-bit entropy symbols
//!
//! A symbol is `(run << 16) | fold(value)`, where folding maps signed values
//! onto unsigned ones: `0 → 0`, `v > 0 → 2v`, `v < 0 → 2|v| − 1`.

use crate::rle::RleSymbol;
use adct_core::consts::MAX_SYMBOLS;
use adct_core::{AdctError, AdctResult};
use std::collections::BTreeMap;

/// Largest value that folds without saturating
pub const MAX_FOLDABLE: i32 = 32767;
/// Smallest value that folds without saturating
pub const MIN_FOLDABLE: i32 = -32768;

/// A sign-folded value and whether it had to be clamped to fit 16 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Folded {
    pub code: u16,
    pub saturated: bool,
}

pub fn fold_sign(value: i32) -> Folded {
    let clamped = value.clamp(MIN_FOLDABLE, MAX_FOLDABLE);
    let code = if clamped > 0 {
        (clamped as u32) * 2
    } else if clamped < 0 {
        clamped.unsigned_abs() * 2 - 1
    } else {
        0
    };
    Folded {
        code: code as u16,
        saturated: clamped != value,
    }
}

pub fn unfold_sign(code: u16) -> i32 {
    let code = code as i32;
    if code % 2 == 0 {
        code / 2
    } else {
        -(code + 1) / 2
    }
}

/// Pack a run-length pair. Returns the symbol and whether its value saturated.
///
/// Runs are at most 255 here, so they always fit the upper half.
pub fn pack_symbol(symbol: RleSymbol) -> (u32, bool) {
    let folded = fold_sign(symbol.value);
    ((symbol.run << 16) | folded.code as u32, folded.saturated)
}

pub fn unpack_symbol(packed: u32) -> RleSymbol {
    RleSymbol::new(packed >> 16, unfold_sign((packed & 0xFFFF) as u16))
}

/// Distinct packed symbols of one block with their frequencies.
///
/// Entries are kept in ascending symbol order; a symbol's index in the table
/// is its position in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<(u32, u64)>,
}

impl SymbolTable {
    pub fn from_symbols(symbols: &[u32]) -> AdctResult<Self> {
        let mut counts = BTreeMap::new();
        for &symbol in symbols {
            *counts.entry(symbol).or_insert(0u64) += 1;
        }
        if counts.len() > MAX_SYMBOLS {
            return Err(AdctError::TooManySymbols {
                count: counts.len(),
                max: MAX_SYMBOLS,
            });
        }

        Ok(Self {
            entries: counts.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols in index order
    pub fn symbols(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|&(symbol, _)| symbol)
    }

    /// Frequencies in index order
    pub fn frequencies(&self) -> Vec<u64> {
        self.entries.iter().map(|&(_, freq)| freq).collect()
    }

    pub fn index_of(&self, symbol: u32) -> Option<usize> {
        self.entries
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
    }
}
