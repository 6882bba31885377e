//! Modified run-length compressor.
//!
//! Version 0.1.0
//!
//! Transforms a file into a form that suits run-length coding, and restores the original bytes
//! exactly. The input is sorted with a Burrows-Wheeler transform, every byte is renumbered by how
//! often it occurs, the numbers are split into eight bit planes, and the planes are stored as
//! alternating run lengths.
//!
//! Basic usage to encode a file is as follows:
//!
//! `$> rlenc -e test.txt`
//!
//! This will create the file test.txt.run. `rlenc -d test.txt.run` restores test.txt.
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod tools;

pub use compression::compress::{encode, encode_block};
pub use compression::container::Record;
pub use compression::decompress::{decode, decode_block};
pub use error::{CodecError, Result};
