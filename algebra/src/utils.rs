use crate::prelude::*;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use digest::generic_array::typenum::U64;
use digest::Digest;
use rand_chacha::ChaCha20Rng;

const BASE64_PADDING_CONFIG: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const BASE64_ENGINE: GeneralPurpose = GeneralPurpose::new(&URL_SAFE, BASE64_PADDING_CONFIG);

/// Read four little-endian u64 limbs from 32 bytes.
pub fn limbs_from_le_bytes(bytes: &[u8]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    LittleEndian::read_u64_into(&bytes[..32], &mut limbs);
    limbs
}

/// Write four u64 limbs as 32 little-endian bytes.
pub fn limbs_to_le_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    LittleEndian::write_u64_into(limbs, &mut bytes);
    bytes
}

/// Read four u64 limbs from a 32-byte big-endian integer.
pub fn limbs_from_be_bytes(bytes: &[u8]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        *limb = BigEndian::read_u64(&bytes[24 - 8 * i..32 - 8 * i]);
    }
    limbs
}

/// Write four u64 limbs as a 32-byte big-endian integer.
pub fn limbs_to_be_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        BigEndian::write_u64(&mut bytes[24 - 8 * i..32 - 8 * i], *limb);
    }
    bytes
}

/// Compute the minimum power of two that is greater or equal to the input
pub fn min_greater_equal_power_of_two(n: u32) -> u32 {
    if n == 0 {
        0
    } else {
        n.next_power_of_two()
    }
}

/// Test bit `i` of little-endian limbs.
#[inline]
pub fn get_bit(limbs: &[u64], i: usize) -> bool {
    let (limb, bit) = (i / 64, i % 64);
    limb < limbs.len() && (limbs[limb] >> bit) & 1 == 1
}

/// Number of significant bits of little-endian limbs.
pub fn num_bits(limbs: &[u64]) -> usize {
    for (i, limb) in limbs.iter().enumerate().rev() {
        if *limb != 0 {
            return 64 * i + 64 - limb.leading_zeros() as usize;
        }
    }
    0
}

/// Convert the input into the base64 encoding
pub fn b64enc<T: ?Sized + AsRef<[u8]>>(input: &T) -> String {
    BASE64_ENGINE.encode(input)
}

/// Reconstruct from the base64 encoding
pub fn b64dec<T: ?Sized + AsRef<[u8]>>(input: &T) -> Result<Vec<u8>> {
    BASE64_ENGINE
        .decode(input)
        .map_err(|_| AlgebraError::DeserializationError)
}

/// Derive a ChaCha20Rng PRNG from a digest from a hash function
pub fn derive_prng_from_hash<D>(hash: D) -> ChaCha20Rng
where
    D: Digest<OutputSize = U64> + Default,
{
    const SEED_SIZE: usize = 32;
    let mut seed: [u8; SEED_SIZE] = [0; SEED_SIZE];
    let result = hash.finalize();
    seed.copy_from_slice(&result[0..SEED_SIZE]);
    ChaCha20Rng::from_seed(seed)
}

/// Shift a little-endian byte vector right by one bit, dropping a zero top byte
pub fn shift_u8_vec(r: &mut Vec<u8>) {
    let mut next = 0u8;
    for e in r.iter_mut().rev() {
        let prev = *e;
        *e = (*e >> 1) | next;
        next = (prev % 2) << 7;
    }
    if r.len() > 1 && r.last() == Some(&0) {
        r.pop();
    }
}

/// Convert a u64 slice into a shrink bytes (little-endian)
pub fn u64_lsf_to_bytes(slice: &[u64]) -> Vec<u8> {
    let mut bytes = vec![];
    for a in slice {
        bytes.extend(&a.to_le_bytes()[..])
    }
    while let Some(b) = bytes.last() {
        if *b != 0 {
            break;
        }
        bytes.pop();
    }
    bytes
}

/// Convert a u64 slice from a shrink bytes (little-endian)
pub fn u64_limbs_from_bytes(slice: &[u8]) -> Vec<u64> {
    let mut r: Vec<u64> = vec![];
    for chunk in slice.chunks(8) {
        let mut u64_bytes = [0u8; 8];
        u64_bytes[..chunk.len()].copy_from_slice(chunk);
        r.push(u64::from_le_bytes(u64_bytes));
    }
    r
}

/// A short-hand macro for not matching an expression
#[macro_export]
macro_rules! not_matches {
   ($expression:expr, $( $pattern:pat_param )|+ $( if $guard: expr )?) => {
        match $expression {
            $( $pattern )|+ $( if $guard )? => false,
            _ => true
        }
    }
}

#[cfg(test)]
mod test {
    use ark_std::vec;

    #[test]
    fn be_and_le_limbs() {
        let limbs = [
            0x3c208c16d87cfd47,
            0x97816a916871ca8d,
            0xb85045b68181585d,
            0x30644e72e131a029,
        ];
        let be = super::limbs_to_be_bytes(&limbs);
        assert_eq!(be[0], 0x30);
        assert_eq!(be[31], 0x47);
        assert_eq!(super::limbs_from_be_bytes(&be), limbs);

        let le = super::limbs_to_le_bytes(&limbs);
        assert_eq!(le[0], 0x47);
        assert_eq!(le[31], 0x30);
        assert_eq!(super::limbs_from_le_bytes(&le), limbs);
    }

    #[test]
    fn bits() {
        let limbs = [0b1011u64, 0, 1];
        assert!(super::get_bit(&limbs, 0));
        assert!(!super::get_bit(&limbs, 2));
        assert!(super::get_bit(&limbs, 128));
        assert!(!super::get_bit(&limbs, 500));
        assert_eq!(super::num_bits(&limbs), 129);
        assert_eq!(super::num_bits(&[0u64, 0]), 0);
    }

    #[test]
    fn u64_lsf_to_bytes() {
        let n = vec![1, 2, 3, 4, 5];
        let bytes = super::u64_lsf_to_bytes(&n);
        assert!(bytes.len() < n.len() * 8);
        let nn = super::u64_limbs_from_bytes(&bytes);
        assert_eq!(n, nn);
    }

    #[test]
    fn shift_u8_vec() {
        let mut v = vec![0x03u8, 0x01];
        super::shift_u8_vec(&mut v);
        assert_eq!(v, vec![0x81]);
    }

    #[test]
    fn min_greater_equal_power_of_two() {
        assert_eq!(16, super::min_greater_equal_power_of_two(16));
        assert_eq!(16, super::min_greater_equal_power_of_two(15));
        assert_eq!(16, super::min_greater_equal_power_of_two(9));
        assert_eq!(8, super::min_greater_equal_power_of_two(5));
        assert_eq!(1, super::min_greater_equal_power_of_two(1));
        assert_eq!(0, super::min_greater_equal_power_of_two(0));
    }

    #[test]
    fn base64_round_trip() {
        let data = vec![0u8, 250, 17, 3, 99];
        let encoded = super::b64enc(&data);
        assert_eq!(super::b64dec(&encoded).unwrap(), data);
        assert!(super::b64dec("%%%").is_err());
    }

    #[test]
    fn test_not_matches_macro() {
        let foofoo = 'g';
        assert!(not_matches!(foofoo, 'a'..='f'));

        let barbar = Some(4);
        assert!(not_matches!(barbar, Some(x) if x < 2));
    }
}
