//! The compression module runs the block transform in both directions and reads and writes the container record.
//!
//! Encoding happens in the following steps:
//! - Block permutation: a Burrows-Wheeler style sort that clusters similar bytes together.
//! - Rank remapping: every byte value is replaced by its rank, most frequent first, so the
//!   common values become small numbers.
//! - Bit planes: the ranks are rewritten as eight planes, bit 0 of every rank first. Small ranks
//!   leave the upper planes almost entirely zero.
//! - Run length coding: the bit stream is stored as alternating run lengths of 0s and 1s, one
//!   byte per run. Runs over 255 are split with empty runs of the other value.
//! - Container: dictionary, run program, primary index and block length are written as one record.
//!
//! Decoding follows the inverse of this process. Each stage finishes before the next starts, and
//! the whole block is held in memory.
//!

pub mod compress;
pub mod container;
pub mod decompress;
