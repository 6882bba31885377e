use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use super::compress::{create_output, read_input, RUN_SUFFIX};
use super::container::Record;
use crate::bitstream::bit_planes::{transpose_len, untranspose};
use crate::bwt_algorithms::bwt_sort::{BlockPermuter, RotationSort};
use crate::error::{CodecError, Result};
use crate::tools::cli::RlOpts;
use crate::tools::rank_map::unrank;
use crate::tools::rle_bits::rle_decode;

/// Undo the stages of `encode_block` in reverse order.
pub fn decode_block<P: BlockPermuter>(permuter: &P, record: &Record) -> Result<Vec<u8>> {
    let len = record.original_len as usize;
    let total_bits = transpose_len(len);

    let bits = rle_decode(&record.program, total_bits)?;
    debug!("Expanded {} run bytes into {} bits", record.program.len(), bits.len());

    let codes = untranspose(&bits, len);
    let permuted = unrank(&record.dictionary, &codes)?;
    permuter.unpermute(&permuted, record.primary_index)
}

/// Parse a record and decode it with the rotation sort permuter.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    let record = Record::from_bytes(bytes)?;
    decode_block(&RotationSort, &record)
}

/// Output name for a decoded file: the input name without `.run`.
pub fn original_path(input: &Path) -> Result<PathBuf> {
    let suffix = RUN_SUFFIX.trim_start_matches('.');
    // A bare ".run" has no extension, so it is rejected here too
    match input.extension() {
        Some(ext) if ext == suffix => Ok(input.with_extension("")),
        _ => Err(CodecError::NotRunFile(input.to_path_buf())),
    }
}

/// Decompress the `.run` file named in opts. Nothing is written unless the whole record decodes.
/// Returns the output path.
pub fn decompress(opts: &RlOpts) -> Result<PathBuf> {
    let input = opts.file.as_path();
    let out_path = original_path(input)?;
    if !opts.force_overwrite && out_path.exists() {
        return Err(CodecError::OutputExists(out_path));
    }

    let bytes = read_input(input)?;
    info!("Decoding {} ({} bytes)", input.display(), bytes.len());
    let data = decode(&bytes).map_err(|e| {
        error!("Fatal error: {} is not a valid record.", input.display());
        e
    })?;

    let mut f_out = create_output(&out_path, opts.force_overwrite)?;
    f_out.write_all(&data)?;
    info!("Wrote {} ({} bytes)", out_path.display(), data.len());
    Ok(out_path)
}

/// Check that the file named in opts decodes cleanly, without writing anything.
/// Returns the decoded length.
pub fn test_record(opts: &RlOpts) -> Result<usize> {
    let input = opts.file.as_path();
    let bytes = read_input(input)?;
    let data = decode(&bytes)?;
    info!("{}: ok, {} bytes", input.display(), data.len());
    Ok(data.len())
}
