//! Container: the on-disk record holding one encoded block.
//!
//! Layout (all counts little-endian):
//!
//! | size | field                                   |
//! |------|-----------------------------------------|
//! | 1    | dictionary size D (0 stands for 256)    |
//! | D    | dictionary, byte values in rank order   |
//! | 4    | run-length program length L             |
//! | L    | run-length program                      |
//! | 4    | primary index                           |
//! | 4    | original block length N                 |
//!
//! A block can use all 256 byte values, one more than the size byte holds. An empty dictionary
//! only ever goes with an empty block, so a size byte of 0 in front of a non-empty block means
//! a full dictionary. The block length sits at a fixed distance from the end of the record,
//! which lets the reader settle this before touching the dictionary.
//!
use log::trace;

use crate::error::{CodecError, Result};

/// Bytes taken by the fixed-width fields: size byte and three u32 counts.
pub const FIXED_FIELDS: usize = 1 + 4 + 4 + 4;
/// Largest dictionary a block can produce.
pub const MAX_DICTIONARY: usize = 256;

/// One encoded block, as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Byte values in rank order.
    pub dictionary: Vec<u8>,
    /// Alternating run lengths of the bit planes.
    pub program: Vec<u8>,
    /// Primary index from the block permutation.
    pub primary_index: u32,
    /// Length of the original block.
    pub original_len: u32,
}

/// Checks that a length fits a u32 field.
pub(crate) fn fit_u32(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| CodecError::Capacity {
        field,
        value,
        width: 4,
    })
}

impl Record {
    /// Serialize the record. Fails if a field does not fit its slot.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.dictionary.len() > MAX_DICTIONARY {
            return Err(CodecError::Capacity {
                field: "dictionary size",
                value: self.dictionary.len(),
                width: 1,
            });
        }
        let program_len = fit_u32("run-length program length", self.program.len())?;

        let mut out =
            Vec::with_capacity(FIXED_FIELDS + self.dictionary.len() + self.program.len());
        // 256 wraps to 0, see the module notes
        out.push(self.dictionary.len() as u8);
        out.extend_from_slice(&self.dictionary);
        out.extend_from_slice(&program_len.to_le_bytes());
        out.extend_from_slice(&self.program);
        out.extend_from_slice(&self.primary_index.to_le_bytes());
        out.extend_from_slice(&self.original_len.to_le_bytes());
        trace!(
            "Record: {} dictionary bytes, {} program bytes, {} total",
            self.dictionary.len(),
            self.program.len(),
            out.len()
        );
        Ok(out)
    }

    /// Parse a record. Every field must be present in full and nothing may follow the last one.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FIXED_FIELDS {
            return Err(CodecError::Truncated {
                field: "record header",
                offset: 0,
                needed: FIXED_FIELDS,
                available: bytes.len(),
            });
        }
        // The block length is always the last 4 bytes
        let mut tail = RecordReader::new(&bytes[bytes.len() - 4..]);
        let block_len = tail.u32_le("original block length")?;

        let mut rr = RecordReader::new(bytes);
        let dict_size = match rr.byte("dictionary size")? {
            0 if block_len > 0 => MAX_DICTIONARY,
            size => size as usize,
        };
        let dictionary = rr.bytes(dict_size, "dictionary")?.to_vec();
        let program_len = rr.u32_le("run-length program length")? as usize;
        let program = rr.bytes(program_len, "run-length program")?.to_vec();
        let primary_index = rr.u32_le("primary index")?;
        let original_len = rr.u32_le("original block length")?;
        if rr.remaining() > 0 {
            return Err(CodecError::TrailingBytes(rr.remaining()));
        }

        if original_len > 0 && primary_index >= original_len {
            return Err(CodecError::PrimaryIndexOutOfRange {
                index: primary_index,
                len: original_len as usize,
            });
        }

        Ok(Self {
            dictionary,
            program,
            primary_index,
            original_len,
        })
    }
}

/// Reads the fixed-order fields of a record, tracking the offset for error reports.
struct RecordReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> RecordReader<'a> {
    fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Return the next n bytes, or a Truncated error naming the field.
    fn bytes(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                field,
                offset: self.cursor,
                needed: n,
                available: self.remaining(),
            });
        }
        let out = &self.buffer[self.cursor..self.cursor + n];
        self.cursor += n;
        Ok(out)
    }

    fn byte(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.bytes(1, field)?[0])
    }

    fn u32_le(&mut self, field: &'static str) -> Result<u32> {
        let mut word = [0_u8; 4];
        word.copy_from_slice(self.bytes(4, field)?);
        Ok(u32::from_le_bytes(word))
    }
}
