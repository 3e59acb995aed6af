//! Run-length coding of zigzag-ordered coefficients
//!
//! Each symbol is a count of zeros followed by one value. `(0, 0)` marks the
//! end of the block: every remaining position is zero. Zero runs longer than
//! [`MAX_RUN_LENGTH`] are split with `(255, 0)` fillers, each standing for 256
//! zeros, so the run cap never loses information.

use adct_core::consts::MAX_RUN_LENGTH;
use adct_core::{AdctError, AdctResult};

/// One `(zero run, value)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RleSymbol {
    pub run: u32,
    pub value: i32,
}

impl RleSymbol {
    /// End of block
    pub const EOB: RleSymbol = RleSymbol { run: 0, value: 0 };

    pub const fn new(run: u32, value: i32) -> Self {
        Self { run, value }
    }

    pub fn is_eob(&self) -> bool {
        *self == Self::EOB
    }
}

/// Run-length encode a coefficient sequence
pub fn run_length_encode(sequence: &[i32]) -> Vec<RleSymbol> {
    let mut symbols = Vec::new();
    let mut run = 0u32;

    for &value in sequence {
        if value == 0 {
            run += 1;
            continue;
        }
        while run > MAX_RUN_LENGTH {
            symbols.push(RleSymbol::new(MAX_RUN_LENGTH, 0));
            run -= MAX_RUN_LENGTH + 1;
        }
        symbols.push(RleSymbol::new(run, value));
        run = 0;
    }

    if run > 0 {
        symbols.push(RleSymbol::EOB);
    }
    symbols
}

/// Expand symbols back into a sequence of exactly `len` values.
///
/// Fails if a symbol would write past `len`.
pub fn run_length_decode(symbols: &[RleSymbol], len: usize) -> AdctResult<Vec<i32>> {
    let mut output = vec![0; len];
    let mut expander = RunLengthExpander::new(&mut output);
    for &symbol in symbols {
        if expander.is_complete() {
            break;
        }
        expander.push(symbol)?;
    }
    Ok(output)
}

/// Incremental run-length expansion into a fixed output slice.
///
/// Lets a decoder stop as soon as the block is full or EOB arrives, and keep
/// what it has when a symbol turns out to be bad.
pub struct RunLengthExpander<'a> {
    output: &'a mut [i32],
    position: usize,
    finished: bool,
}

impl<'a> RunLengthExpander<'a> {
    /// The output is zeroed up front
    pub fn new(output: &'a mut [i32]) -> Self {
        output.fill(0);
        let finished = output.is_empty();
        Self {
            output,
            position: 0,
            finished,
        }
    }

    /// Apply one symbol
    pub fn push(&mut self, symbol: RleSymbol) -> AdctResult<()> {
        if self.finished {
            return Err(AdctError::InvalidBitstream(
                "symbol after end of block".to_string(),
            ));
        }
        if symbol.is_eob() {
            self.position = self.output.len();
            self.finished = true;
            return Ok(());
        }

        let target = self.position + symbol.run as usize;
        if target >= self.output.len() {
            return Err(AdctError::InvalidBitstream(format!(
                "run of {} at position {} overruns {} coefficients",
                symbol.run,
                self.position,
                self.output.len()
            )));
        }
        self.output[target] = symbol.value;
        self.position = target + 1;
        self.finished = self.position == self.output.len();
        Ok(())
    }

    /// Every position is accounted for
    pub fn is_complete(&self) -> bool {
        self.finished
    }

    /// Positions filled so far (explicitly or by EOB)
    pub fn position(&self) -> usize {
        self.position
    }
}
