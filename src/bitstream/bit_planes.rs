/// Number of bit planes in a rank code.
pub const PLANES: usize = 8;

/// Number of bits in the planes of a block of `len` codes.
pub fn transpose_len(len: usize) -> usize {
    len * PLANES
}

/// Rewrites rank codes as eight concatenated bit planes, least significant plane first.
/// Plane p holds bit p of every code, in block order, so the output is 8 * codes.len() long.
pub fn transpose(codes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(codes.len() * PLANES);
    for plane in 0..PLANES {
        bits.extend(codes.iter().map(|&code| (code >> plane) & 1 == 1));
    }
    bits
}

/// Rebuilds `len` rank codes from their bit planes. Expects exactly 8 * len bits.
pub fn untranspose(bits: &[bool], len: usize) -> Vec<u8> {
    debug_assert_eq!(bits.len(), len * PLANES);
    let mut codes = vec![0_u8; len];
    // chunks() panics on a zero size, and there is nothing to rebuild anyway
    if len == 0 {
        return codes;
    }
    for (plane, bit_plane) in bits.chunks(len).take(PLANES).enumerate() {
        codes
            .iter_mut()
            .zip(bit_plane)
            .for_each(|(code, &bit)| *code |= (bit as u8) << plane);
    }
    codes
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn planes_are_least_significant_first() {
        // 0b01 and 0b10
        let bits = transpose(&[1, 2]);
        assert_eq!(bits.len(), 16);
        assert_eq!(&bits[0..2], &[true, false]); // plane 0
        assert_eq!(&bits[2..4], &[false, true]); // plane 1
        assert!(bits[4..].iter().all(|&b| !b));
    }

    #[test]
    fn zero_codes_give_zero_planes() {
        let bits = transpose(&[0; 10]);
        assert_eq!(bits, vec![false; 80]);
        assert_eq!(untranspose(&bits, 10), vec![0; 10]);
    }

    #[test]
    fn high_bit_lands_in_last_plane() {
        let bits = transpose(&[0x80, 0x00, 0x80]);
        assert_eq!(&bits[21..24], &[true, false, true]);
        assert_eq!(bits.iter().filter(|&&b| b).count(), 2);
    }

    #[test]
    fn empty_block() {
        assert!(transpose(&[]).is_empty());
        assert!(untranspose(&[], 0).is_empty());
    }

    proptest! {
        #[test]
        fn untranspose_inverts_transpose(codes in prop::collection::vec(any::<u8>(), 0..2000)) {
            let bits = transpose(&codes);
            prop_assert_eq!(bits.len(), codes.len() * PLANES);
            prop_assert_eq!(untranspose(&bits, codes.len()), codes);
        }
    }
}
