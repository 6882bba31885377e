//! The tools module provides the per-stage helpers of the transform, plus the command line.
//!
//! The tools are:
//! - cli: Command line interface and program options.
//! - freq_count: Byte frequency count.
//! - rank_map: Frequency ranked renumbering of the byte values in a block.
//! - rle_bits: Alternating run-length coding of a bit stream.
//!
pub mod cli;
pub mod freq_count;
pub mod rank_map;
pub mod rle_bits;
