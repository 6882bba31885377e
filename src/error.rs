//! Error type shared by the transform pipeline, the container codec and the file wrappers.
//!
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A container field could not be read in full.
    #[error("truncated record: {field} needs {needed} bytes at offset {offset}, only {available} left")]
    Truncated {
        /// Name of the field being read
        field: &'static str,
        /// Offset of the field within the record
        offset: usize,
        /// Bytes the field requires
        needed: usize,
        /// Bytes remaining in the record
        available: usize,
    },
    /// Bytes were left over after the final field.
    #[error("malformed record: {0} unexpected bytes after the final field")]
    TrailingBytes(usize),
    /// The run-length program does not expand to the recorded block length.
    #[error("run-length program expands to {found} bits, expected {expected}")]
    RunLengthMismatch { expected: usize, found: usize },
    /// A decoded rank has no dictionary entry.
    #[error("rank {rank} is outside the {size} entry dictionary")]
    RankOutOfRange { rank: u8, size: usize },
    /// The primary index cannot belong to a block of this length.
    #[error("primary index {index} is out of range for a block of {len} bytes")]
    PrimaryIndexOutOfRange { index: u32, len: usize },
    /// A value does not fit the fixed-width field reserved for it.
    #[error("{field} of {value} does not fit in its {width} byte field")]
    Capacity {
        field: &'static str,
        value: usize,
        width: usize,
    },
    /// The input file does not exist.
    #[error("no such file: {0}")]
    MissingInput(PathBuf),
    /// The output file exists and overwriting was not requested.
    #[error("file already exists: {0}")]
    OutputExists(PathBuf),
    /// Decode was asked for a file without the `.run` suffix.
    #[error("not a .run file: {0}")]
    NotRunFile(PathBuf),
    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
