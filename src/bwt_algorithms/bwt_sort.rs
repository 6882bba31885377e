use log::{debug, info};
use rayon::prelude::*;

use crate::error::{CodecError, Result};
use crate::tools::freq_count::freqs;

/// Blocks longer than this are sorted with Rayon.
const PARALLEL_SORT_MIN: usize = 40_000;

/// A reversible block permutation. `permute` returns the permuted block and the primary index
/// needed to undo it; `unpermute` must return the original block for any output of `permute`.
pub trait BlockPermuter {
    fn permute(&self, data: &[u8]) -> (Vec<u8>, u32);
    fn unpermute(&self, permuted: &[u8], primary_index: u32) -> Result<Vec<u8>>;
}

/// Burrows-Wheeler-Transform over the cyclic rotations of the block.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotationSort;

impl BlockPermuter for RotationSort {
    /// Sorts the rotations, then emits the byte preceding each one. The primary index is the row
    /// holding the unrotated block.
    fn permute(&self, data: &[u8]) -> (Vec<u8>, u32) {
        if data.is_empty() {
            return (Vec::new(), 0);
        }
        let end = data.len();
        let index = sort_rotations(data);

        let mut key = 0_u32;
        let mut bwt = Vec::with_capacity(end);
        for (row, &rotation) in index.iter().enumerate() {
            if rotation == 0 {
                key = row as u32;
            }
            bwt.push(data[(rotation as usize + end - 1) % end]);
        }
        debug!("BWT key is {}", key);
        (bwt, key)
    }

    /// Walks the transformation vector from the primary index to rebuild the block.
    fn unpermute(&self, bwt_in: &[u8], key: u32) -> Result<Vec<u8>> {
        // Calculate end once.
        let end = bwt_in.len();
        if end == 0 {
            return Ok(Vec::new());
        }
        if key as usize >= end {
            return Err(CodecError::PrimaryIndexOutOfRange {
                index: key,
                len: end,
            });
        }

        // Convert frequency count to a cumulative sum of frequencies
        let freq_in = freqs(bwt_in);
        let mut freq = [0_u32; 256];
        for i in 0..255 {
            freq[i + 1] = freq[i] + freq_in[i];
        }

        // Build the transformation vector to find the next character in the original data
        let mut t_vec = vec![0_u32; end];
        for (i, &s) in bwt_in.iter().enumerate() {
            t_vec[freq[s as usize] as usize] = i as u32;
            freq[s as usize] += 1
        }

        // Follow the chain from the key, reading one byte at each stop
        let mut data = Vec::with_capacity(end);
        let mut next = t_vec[key as usize];
        for _ in 0..end {
            data.push(bwt_in[next as usize]);
            next = t_vec[next as usize];
        }
        Ok(data)
    }
}

/// Sort the rotation start positions of the block by prefix doubling. After the pass with span h
/// each rank covers the first 2h bytes of its rotation; we stop once every rank is distinct or
/// the span covers the whole block (remaining ties are identical rotations).
fn sort_rotations(data: &[u8]) -> Vec<u32> {
    let end = data.len();
    let mut index = (0_u32..end as u32).collect::<Vec<u32>>();
    let mut rank = data.iter().map(|&b| b as u32).collect::<Vec<u32>>();
    let mut next_rank = vec![0_u32; end];
    let mut span = 1_usize;

    if end > PARALLEL_SORT_MIN {
        info!("Sorting {} rotations with rayon.", end);
    }

    loop {
        {
            let rank = &rank;
            let pair = |i: u32| (rank[i as usize], rank[(i as usize + span) % end]);
            if end > PARALLEL_SORT_MIN {
                index.par_sort_unstable_by_key(|&i| pair(i));
            } else {
                index.sort_unstable_by_key(|&i| pair(i));
            }

            // Rerank: rotations with equal pairs share a rank
            next_rank[index[0] as usize] = 0;
            for w in index.windows(2) {
                let bump = (pair(w[0]) != pair(w[1])) as u32;
                next_rank[w[1] as usize] = next_rank[w[0] as usize] + bump;
            }
        }
        std::mem::swap(&mut rank, &mut next_rank);

        let distinct = rank[index[end - 1] as usize] as usize + 1;
        if distinct == end || span * 2 >= end {
            break;
        }
        span *= 2;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn banana() {
        let (bwt, key) = RotationSort.permute(b"banana");
        // Rotations sorted: abanan, anaban, ananab, banana, nabana, nanaba
        assert_eq!(bwt, b"nnbaaa".to_vec());
        assert_eq!(key, 3);
        assert_eq!(RotationSort.unpermute(&bwt, key).unwrap(), b"banana".to_vec());
    }

    #[test]
    fn periodic_block() {
        let data = b"abababababab";
        let (bwt, key) = RotationSort.permute(data);
        assert_eq!(RotationSort.unpermute(&bwt, key).unwrap(), data.to_vec());
    }

    #[test]
    fn uniform_block() {
        let data = vec![0x41; 1000];
        let (bwt, key) = RotationSort.permute(&data);
        assert_eq!(bwt, data);
        assert_eq!(RotationSort.unpermute(&bwt, key).unwrap(), data);
    }

    #[test]
    fn single_byte_and_empty() {
        assert_eq!(RotationSort.permute(&[7]), (vec![7], 0));
        assert_eq!(RotationSort.unpermute(&[7], 0).unwrap(), vec![7]);
        assert_eq!(RotationSort.permute(&[]), (vec![], 0));
        assert!(RotationSort.unpermute(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn bad_key_is_rejected() {
        let result = RotationSort.unpermute(b"abc", 3);
        assert!(matches!(
            result,
            Err(CodecError::PrimaryIndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn large_block_uses_parallel_sort() {
        let data = (0..50_000_u32)
            .map(|i| ((i * i) % 7 + (i % 13)) as u8)
            .collect::<Vec<u8>>();
        let (bwt, key) = RotationSort.permute(&data);
        assert_eq!(bwt.len(), data.len());
        assert_eq!(RotationSort.unpermute(&bwt, key).unwrap(), data);
    }

    proptest! {
        #[test]
        fn unpermute_inverts_permute(data in prop::collection::vec(0_u8..4, 0..500)) {
            let (bwt, key) = RotationSort.permute(&data);
            prop_assert!(data.is_empty() || (key as usize) < data.len());
            prop_assert_eq!(RotationSort.unpermute(&bwt, key).unwrap(), data);
        }
    }
}
