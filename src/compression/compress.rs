use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::container::{fit_u32, Record};
use crate::bitstream::bit_planes::transpose;
use crate::bwt_algorithms::bwt_sort::{BlockPermuter, RotationSort};
use crate::error::{CodecError, Result};
use crate::tools::cli::RlOpts;
use crate::tools::rank_map::RankMap;
use crate::tools::rle_bits::rle_encode;

/// Suffix given to encoded files.
pub const RUN_SUFFIX: &str = ".run";

/// Sizes reported after encoding a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeStats {
    pub input_len: usize,
    pub dictionary_len: usize,
    pub program_len: usize,
    pub output_len: usize,
}

/// Run one block through the permutation, rank remapping, bit plane and run length stages.
pub fn encode_block<P: BlockPermuter>(permuter: &P, data: &[u8]) -> Result<Record> {
    // Check the length first so we never do the work for a block we can't record.
    let original_len = fit_u32("original block length", data.len())?;

    let (permuted, primary_index) = permuter.permute(data);
    debug!("Permuted {} bytes, primary index {}", data.len(), primary_index);

    let ranks = RankMap::build(&permuted);
    let codes = ranks.remap(&permuted);
    debug!("{} symbols in use", ranks.dictionary().len());

    let bits = transpose(&codes);
    let program = rle_encode(&bits);
    debug!("{} bits into {} run bytes", bits.len(), program.len());

    Ok(Record {
        dictionary: ranks.dictionary().to_vec(),
        program,
        primary_index,
        original_len,
    })
}

/// Encode a block with the rotation sort permuter and serialize the record.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    encode_with_stats(data).map(|(bytes, _)| bytes)
}

/// As `encode`, also returning the sizes of the record parts.
pub fn encode_with_stats(data: &[u8]) -> Result<(Vec<u8>, EncodeStats)> {
    let record = encode_block(&RotationSort, data)?;
    let bytes = record.to_bytes()?;
    let stats = EncodeStats {
        input_len: data.len(),
        dictionary_len: record.dictionary.len(),
        program_len: record.program.len(),
        output_len: bytes.len(),
    };
    Ok((bytes, stats))
}

/// Open a new output file. Unless forced, an existing file is an error, and the create is
/// atomic so a racing writer can't slip in between the check and the write.
pub(crate) fn create_output(path: &Path, force: bool) -> Result<fs::File> {
    let mut open = OpenOptions::new();
    open.write(true);
    if force {
        open.create(true).truncate(true);
    } else {
        open.create_new(true);
    }
    open.open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => CodecError::OutputExists(path.to_path_buf()),
        _ => CodecError::Io(e),
    })
}

/// Read the whole input file, reporting a missing file as such.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CodecError::MissingInput(path.to_path_buf()),
        _ => CodecError::Io(e),
    })
}

/// Output name for an encoded file: the input name with `.run` appended.
pub fn run_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(RUN_SUFFIX);
    PathBuf::from(name)
}

/// Compress the file named in opts, writing `<file>.run`. Returns the output path.
pub fn compress(opts: &RlOpts) -> Result<PathBuf> {
    let input = opts.file.as_path();
    let out_path = run_path(input);
    // Fail before the transform if we already know we can't write the result.
    if !opts.force_overwrite && out_path.exists() {
        return Err(CodecError::OutputExists(out_path));
    }

    let data = read_input(input)?;
    info!("Encoding {} ({} bytes)", input.display(), data.len());
    let (bytes, stats) = encode_with_stats(&data)?;

    let mut f_out = create_output(&out_path, opts.force_overwrite)?;
    f_out.write_all(&bytes)?;
    info!(
        "Wrote {}: {} bytes in, {} out ({} dictionary, {} run bytes)",
        out_path.display(),
        stats.input_len,
        stats.output_len,
        stats.dictionary_len,
        stats.program_len
    );
    Ok(out_path)
}
