use log::trace;

use crate::error::{CodecError, Result};

/// Longest run a single program byte can hold.
pub const MAX_RUN: usize = 255;

/// Which bit value the current run is made of. Every program starts with a run of zeros.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    ExpectingZero,
    ExpectingOne,
}

impl RunState {
    /// Bit value of runs in this state.
    pub fn bit(self) -> bool {
        matches!(self, RunState::ExpectingOne)
    }

    /// State of the run that follows this one.
    pub fn flip(self) -> Self {
        match self {
            RunState::ExpectingZero => RunState::ExpectingOne,
            RunState::ExpectingOne => RunState::ExpectingZero,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::ExpectingZero
    }
}

/// Push one run onto the program. Runs over 255 are split with an empty run of the other
/// value so the alternation is kept. A zero run is pushed as is.
fn push_run(program: &mut Vec<u8>, mut run: usize) {
    while run > MAX_RUN {
        program.push(MAX_RUN as u8);
        program.push(0);
        run -= MAX_RUN;
    }
    program.push(run as u8);
}

/// Encode a bit stream as alternating run lengths, starting with a run of zeros.
///
/// A stream that opens with a one gets a leading zero length run, so the value of run `i`
/// is always given by the parity of `i`.
pub fn rle_encode(bits: &[bool]) -> Vec<u8> {
    let mut program = Vec::with_capacity(bits.len() / 64 + 1);
    let mut state = RunState::default();
    let mut run = 0_usize;

    for &bit in bits {
        if bit != state.bit() {
            push_run(&mut program, run);
            run = 0;
            state = state.flip();
        }
        run += 1;
    }
    // Final flush. Only an empty stream leaves nothing to write.
    if run > 0 {
        push_run(&mut program, run);
    }
    trace!(
        "RLE: {} bits into {} run bytes, ending in {:?}",
        bits.len(),
        program.len(),
        state
    );
    program
}

/// Expand a run length program back into exactly `total_bits` bits.
///
/// A program that does not add up to `total_bits` is rejected before anything is allocated, so
/// a record claiming a huge block with a short program costs nothing.
pub fn rle_decode(program: &[u8], total_bits: usize) -> Result<Vec<bool>> {
    let found = program.iter().map(|&run| run as usize).sum::<usize>();
    if found != total_bits {
        return Err(CodecError::RunLengthMismatch {
            expected: total_bits,
            found,
        });
    }

    let mut bits = Vec::with_capacity(total_bits);
    let mut state = RunState::default();
    for &run in program {
        bits.resize(bits.len() + run as usize, state.bit());
        state = state.flip();
    }
    Ok(bits)
}
