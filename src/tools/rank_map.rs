use std::cmp::Reverse;

use log::trace;

use super::freq_count::freqs;
use crate::error::{CodecError, Result};

/// Dense, frequency ordered codes for the byte values used in a block.
///
/// The dictionary lists every byte value present, most frequent first, with ties going to the
/// lower byte value. A byte's rank is its position in the dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankMap {
    /// Byte values in rank order. This is what gets written to the container.
    dictionary: Vec<u8>,
    /// Rank of each byte value. Only meaningful for values present in the dictionary.
    ranks: [u8; 256],
}

impl RankMap {
    /// Build the rank map from the frequency table of a block.
    pub fn from_freqs(freqs: &[u32; 256]) -> Self {
        // Collect the symbols actually in use. A u8 range avoids a cast per symbol.
        let mut dictionary = (0..=255_u8)
            .filter(|&b| freqs[b as usize] > 0)
            .collect::<Vec<u8>>();
        dictionary.sort_unstable_by_key(|&b| (Reverse(freqs[b as usize]), b));

        let mut ranks = [0_u8; 256];
        // At most 256 entries, so every rank fits a u8.
        for (rank, &sym) in dictionary.iter().enumerate() {
            ranks[sym as usize] = rank as u8;
        }
        trace!("Rank dictionary: {:?}", dictionary);
        Self { dictionary, ranks }
    }

    /// Count the block and build its rank map.
    pub fn build(data: &[u8]) -> Self {
        Self::from_freqs(&freqs(data))
    }

    /// Rank of a byte value that appears in the block.
    pub fn rank_of(&self, byte: u8) -> u8 {
        self.ranks[byte as usize]
    }

    /// Byte values in rank order.
    pub fn dictionary(&self) -> &[u8] {
        &self.dictionary
    }

    /// Replace every byte of the block with its rank.
    pub fn remap(&self, data: &[u8]) -> Vec<u8> {
        data.iter().map(|&b| self.rank_of(b)).collect()
    }
}

/// Map rank codes back to byte values through a persisted dictionary.
pub fn unrank(dictionary: &[u8], codes: &[u8]) -> Result<Vec<u8>> {
    codes
        .iter()
        .map(|&rank| {
            dictionary
                .get(rank as usize)
                .copied()
                .ok_or(CodecError::RankOutOfRange {
                    rank,
                    size: dictionary.len(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_descending_frequency() {
        let map = RankMap::build(b"abracadabra");
        // a:5, b:2, r:2, c:1, d:1
        assert_eq!(map.dictionary(), b"abrcd");
        assert_eq!(map.rank_of(b'a'), 0);
        assert_eq!(map.rank_of(b'r'), 2);
        assert_eq!(map.rank_of(b'd'), 4);
    }

    #[test]
    fn ties_go_to_the_lower_byte() {
        let map = RankMap::build(&[9, 3, 200, 3, 9, 200]);
        assert_eq!(map.dictionary(), &[3, 9, 200]);
    }

    #[test]
    fn single_symbol_block() {
        let map = RankMap::build(&[0x41; 10]);
        assert_eq!(map.dictionary(), &[0x41]);
        assert_eq!(map.remap(&[0x41; 10]), vec![0; 10]);
    }

    #[test]
    fn full_alphabet_uses_every_rank() {
        let data = (0..=255_u8).rev().collect::<Vec<u8>>();
        let map = RankMap::build(&data);
        assert_eq!(map.dictionary().len(), 256);
        // All counts tie, so the order is ascending byte value.
        assert_eq!(map.dictionary(), (0..=255_u8).collect::<Vec<u8>>().as_slice());
        assert_eq!(map.rank_of(255), 255);
    }

    #[test]
    fn same_input_same_dictionary() {
        let data = b"the quick brown fox jumps over the lazy dog";
        assert_eq!(RankMap::build(data), RankMap::build(data));
    }

    #[test]
    fn unrank_inverts_remap() {
        let data = b"mississippi river";
        let map = RankMap::build(data);
        let codes = map.remap(data);
        assert_eq!(unrank(map.dictionary(), &codes).unwrap(), data.to_vec());
    }

    #[test]
    fn unrank_rejects_unknown_rank() {
        let result = unrank(&[7, 8], &[0, 1, 2]);
        assert!(matches!(
            result,
            Err(CodecError::RankOutOfRange { rank: 2, size: 2 })
        ));
    }
}
