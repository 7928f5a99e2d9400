use crate::prelude::*;
pub use crate::field::LegendreSymbol;
use ark_std::{fmt::Debug, vec, vec::Vec};
use digest::{generic_array::typenum::U64, Digest};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// The trait for scalars
pub trait Scalar:
    Copy
    + Default
    + Debug
    + PartialEq
    + Eq
    + Serialize
    + for<'de> Deserialize<'de>
    + Into<BigUint>
    + for<'a> From<&'a BigUint>
    + Clone
    + One
    + Zero
    + Sized
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Sum<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> Sum<&'a Self>
    + From<u32>
    + From<u64>
    + Neg<Output = Self>
    + Sync
    + Send
{
    /// Return a random scalar
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Sample a scalar based on a hash value
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default;

    /// Return multiplicative generator of order r,
    /// which is also required to be a quadratic nonresidue
    fn multiplicative_generator() -> Self;

    /// Return the little-endian byte representations of the field size
    fn get_field_size_le_bytes() -> Vec<u8>;

    /// Return the field size as a BigUint
    fn get_field_size_biguint() -> BigUint;

    /// Return the little-endian byte representation of `(field_size - 1) / 2`,
    /// assuming that `field_size` is odd
    fn field_size_minus_one_half() -> Vec<u8> {
        let mut q_minus_1_half_le = Self::get_field_size_le_bytes();
        // divide by 2 by shifting, first bit is one since F is odd prime
        shift_u8_vec(&mut q_minus_1_half_le);
        q_minus_1_half_le
    }

    /// Return a representation of the scalar as a vector of u64 in the little-endian order
    fn get_little_endian_u64(&self) -> Vec<u64>;

    /// Return the len of the byte representation
    fn bytes_len() -> usize;

    /// Convert to bytes
    fn to_bytes(&self) -> Vec<u8>;

    /// Convert from canonical little-endian bytes, shorter inputs are zero-padded
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Return the modular inverse of the scalar if it exists
    fn inv(&self) -> Result<Self>;

    /// Return the square of the field element
    fn square(&self) -> Self;

    /// Return the square root, or `None` for a quadratic non-residue.
    fn sqrt(&self) -> Option<Self>;

    /// Return the legendre symbol of the field element
    fn legendre(&self) -> LegendreSymbol;

    /// exponent form: least significant limb first, with u64 limbs
    fn pow(&self, exponent: &[u64]) -> Self {
        let mut base = *self;
        let mut result = Self::one();
        for exp_u64 in exponent {
            let mut e = *exp_u64;
            // we have to square the base for 64 times.
            for _ in 0..64 {
                if e % 2 == 1 {
                    result.mul_assign(&base);
                }
                base = base.mul(&base);
                e >>= 1;
            }
        }
        result
    }
}

/// Scalars that carry a large power-of-two subgroup, as needed by FFTs.
pub trait Domain: Scalar {
    /// The largest `s` such that `2^s` divides the multiplicative group order.
    const TWO_ADICITY: u32;

    /// A primitive `2^TWO_ADICITY`-th root of unity.
    fn two_adic_root_of_unity() -> Self;

    /// A primitive `n`-th root of unity, if `n` is a power of two within range.
    fn get_root_of_unity(n: usize) -> Option<Self> {
        if n == 0 || !n.is_power_of_two() {
            return None;
        }
        let log_n = n.trailing_zeros();
        if log_n > Self::TWO_ADICITY {
            return None;
        }
        let mut omega = Self::two_adic_root_of_unity();
        for _ in log_n..Self::TWO_ADICITY {
            omega = omega.square();
        }
        Some(omega)
    }
}

/// The trait for group elements
pub trait Group:
    Debug
    + Default
    + Copy
    + Sized
    + PartialEq
    + Eq
    + Clone
    + Sync
    + Send
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self::ScalarType, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + Serialize
    + Neg<Output = Self>
    + for<'de> Deserialize<'de>
{
    /// The scalar type
    type ScalarType: Scalar;

    /// The number of bytes for a compressed representation of a group element
    const COMPRESSED_LEN: usize;

    /// The number of bytes for a uncompressed representation of a group element
    const UNCOMPRESSED_LEN: usize;

    /// Return the doubling of the group element
    fn double(&self) -> Self;

    /// Return the identity element (i.e., 0 * G)
    fn get_identity() -> Self;

    /// Return the base element (i.e., 1 * G)
    fn get_base() -> Self;

    /// Return a random element
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Convert to bytes in the compressed representation
    fn to_compressed_bytes(&self) -> Vec<u8>;

    /// Convert from bytes in the compressed representation
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self>;

    /// Convert to bytes in the unchecked representation
    fn to_unchecked_bytes(&self) -> Vec<u8>;

    /// Convert from bytes in the unchecked representation
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self>;

    /// Return the size of unchecked bytes.
    fn unchecked_size() -> usize {
        Self::UNCOMPRESSED_LEN
    }

    /// Sample a group element based on a hash value
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default;

    /// Compute the multiscalar multiplication
    #[inline]
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        pippenger(scalars, points).unwrap_or_else(|_| Self::get_identity())
    }
}

/// The trait for a pair of groups for pairing
pub trait Pairing {
    /// The scalar type
    type ScalarField: Scalar;

    /// The first group
    type G1: Group<ScalarType = Self::ScalarField>;

    /// The second group
    type G2: Group<ScalarType = Self::ScalarField>;

    /// The target group
    type Gt: Group<ScalarType = Self::ScalarField>;

    /// The pairing operation
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt;

    /// The product of pairing operation
    fn product_of_pairings(a: &[Self::G1], b: &[Self::G2]) -> Self::Gt;
}

/// The trait for get x-coordinate and y-coordinate.
pub trait CurveGroup: Group {
    /// The scalar type
    type BaseType: Scalar;

    /// Get the x-coordinate.
    fn get_x(&self) -> Self::BaseType;

    /// Get the y-coordinate.
    fn get_y(&self) -> Self::BaseType;

    /// Construct from x and y coordinates.
    fn new(x: &Self::BaseType, y: &Self::BaseType) -> Self;

    /// Get the base point divided by the cofactor.
    fn get_point_div_by_cofactor() -> Self;

    /// Multiply by the cofactor.
    fn multiply_by_cofactor(&self) -> Self;
}

/// Convert the scalar into signed digits of width `w`, each in `[-2^(w-1), 2^(w-1))`.
pub fn scalar_to_radix_2_power_w<S: Scalar>(scalar: &S, w: usize) -> Vec<i32> {
    limbs_to_radix_2_power_w(&scalar.get_little_endian_u64(), w)
}

/// Signed radix-`2^w` recoding of little-endian limbs.
pub fn limbs_to_radix_2_power_w(scalar64: &[u64], w: usize) -> Vec<i32> {
    assert!(w >= 1 && w <= 16);
    if scalar64.iter().all(|l| *l == 0) {
        return vec![0i32];
    }

    let radix: u64 = 1 << (w as u64);
    let window_mask: u64 = radix - 1;

    let mut carry = 0u64;
    let mut digits = vec![];

    let mut i = 0;
    loop {
        // Construct a buffer of bits of the scalar, starting at `bit_offset`.
        let bit_offset = i * w;
        let u64_idx = bit_offset / 64;
        let bit_idx = bit_offset % 64;
        if u64_idx >= scalar64.len() {
            digits.push(carry as i32);
            break;
        }
        let is_last = u64_idx == scalar64.len() - 1;

        // Read the bits from the scalar
        let bit_buf = if bit_idx < 64 - w || is_last {
            // This window's bits are contained in a single u64,
            scalar64[u64_idx] >> (bit_idx as u64)
        } else {
            // Combine the current u64's bits with the bits from the next u64
            (scalar64[u64_idx] >> bit_idx) | (scalar64[1 + u64_idx] << (64 - bit_idx))
        };

        // Read the actual coefficient value from the window
        let coef = carry + (bit_buf & window_mask); // coef = [0, 2^r)

        // Recenter coefficients from [0,2^w) to [-2^w/2, 2^w/2)
        carry = (coef + (radix / 2)) >> w;
        digits.push(((coef as i64) - (carry << w) as i64) as i32);
        i += 1;
    }

    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
    digits
}

/// The window size for bucket multi-exponentiation of `size` terms.
pub(crate) fn pippenger_window(size: usize) -> usize {
    if size < 32 {
        3
    } else if size < 500 {
        6
    } else if size < 800 {
        7
    } else {
        8
    }
}

/// Sum the buckets with the running-sum technique: `sum((i + 1) * buckets[i])`.
pub(crate) fn sum_buckets<G: Copy>(
    buckets: &[G],
    identity: G,
    add: impl Fn(&G, &G) -> G,
) -> G {
    let mut intermediate_sum = identity;
    let mut sum = identity;
    for b in buckets.iter().rev() {
        intermediate_sum = add(&intermediate_sum, b);
        sum = add(&sum, &intermediate_sum);
    }
    sum
}

/// Run the pippenger algorithm to compute multiscalar multiplication
pub fn pippenger<G: Group>(scalars: &[&G::ScalarType], elems: &[&G]) -> Result<G> {
    let size = scalars.len();

    if size == 0 || size != elems.len() {
        return Err(AlgebraError::ParameterError);
    }

    let w = pippenger_window(size);

    let digits_vec: Vec<Vec<i32>> = scalars
        .iter()
        .map(|s| scalar_to_radix_2_power_w::<G::ScalarType>(s, w))
        .collect();

    let digits_count = digits_vec.iter().map(|d| d.len()).max().unwrap_or(0);

    // init all the buckets
    let mut buckets: Vec<G> = vec![G::get_identity(); 1 << (w - 1)];

    let mut res = G::get_identity();
    for index in (0..digits_count).rev() {
        for _ in 0..w {
            res = res.double();
        }
        // empty each bucket
        for b in buckets.iter_mut() {
            *b = G::get_identity();
        }
        for (digits, elem) in digits_vec.iter().zip(elems) {
            if index >= digits.len() {
                continue;
            }
            let digit = digits[index];
            if digit > 0 {
                buckets[(digit - 1) as usize].add_assign(*elem);
            } else if digit < 0 {
                buckets[(-digit - 1) as usize].sub_assign(*elem);
            }
        }
        res = res + &sum_buckets(&buckets, G::get_identity(), |a, b| *a + b);
    }
    Ok(res)
}

/// Compute `sum(scalars[i] * points[i])` one term at a time, as a reference.
pub fn naive_multi_exp<G: Group>(scalars: &[&G::ScalarType], points: &[&G]) -> G {
    scalars
        .iter()
        .zip(points.iter())
        .fold(G::get_identity(), |acc, (s, p)| acc + &(**p * *s))
}

#[cfg(test)]
pub(crate) mod group_tests {
    use crate::prelude::*;
    use crate::traits::{scalar_to_radix_2_power_w, Scalar};

    pub(crate) fn test_scalar_operations<S: Scalar>() {
        let a = S::from(40u32);
        let b = S::from(60u32);
        let c = a.add(&b);
        let d = S::from(100u32);
        assert_eq!(c, d);

        let mut x = S::from(0u32);
        x.add_assign(&a);
        x.add_assign(&b);
        assert_eq!(x, d);

        let a = S::from(10u32);
        let b = S::from(40u32);
        let c = a.mul(&b);
        let d = S::from(400u32);
        assert_eq!(c, d);

        let mut x = S::from(1u32);
        x.mul_assign(&a);
        x.mul_assign(&b);
        assert_eq!(x, d);

        let a = S::from(0xFFFFFFFFu32);
        let b = S::from(1u32);
        let c = a.add(&b);
        let d = S::from(0x100000000u64);
        assert_eq!(c, d);

        let a = S::from(40u32);
        let b = S::from(60u32);
        let c = b.sub(&a);
        let d = S::from(20u32);
        assert_eq!(c, d);

        let a = S::from(40u32);
        let b = a.neg();
        let c = b.add(&a);
        assert_eq!(c, S::zero());

        let a = S::from(40u32);
        let b = a.inv().unwrap();
        let c = b.mul(&a);
        assert_eq!(c, S::one());
        assert!(S::zero().inv().is_err());

        let a = S::from(3u32);
        let c = a.pow(&[20]);
        let d = S::from(3486784401u64);
        assert_eq!(c, d);

        let a = S::from(49u32);
        let root = a.sqrt().unwrap();
        assert_eq!(root.square(), a);
        assert_eq!(
            S::multiplicative_generator().legendre(),
            LegendreSymbol::QuadraticNonResidue
        );
        assert!(S::multiplicative_generator().sqrt().is_none());

        let v = S::get_field_size_biguint().to_bytes_le();
        assert_eq!(v, S::get_field_size_le_bytes());
    }

    pub(crate) fn test_scalar_serialization<S: Scalar>() {
        let a = S::from(100u32);
        let bytes = a.to_bytes();
        let b = S::from_bytes(bytes.as_slice()).unwrap();
        assert_eq!(a, b);

        // the modulus itself is not a canonical encoding
        assert!(S::from_bytes(&S::get_field_size_le_bytes()).is_err());
    }

    pub(crate) fn test_to_radix<S: Scalar>() {
        let int = S::from(41u32);
        let w = 2;
        let r = scalar_to_radix_2_power_w(&int, w);
        let expected = [1i32, -2, -1, 1]; // 41 = 1 + -2*4 + -1*16 + 64
        assert_eq!(r.as_slice(), expected.as_ref());

        let int = S::from(0u32);
        let r = scalar_to_radix_2_power_w(&int, 2);
        assert_eq!([0i32].as_ref(), r.as_slice());

        let int = S::from(1000u32);
        let r = scalar_to_radix_2_power_w(&int, 6);
        assert_eq!([-24i32, 16].as_ref(), r.as_slice());
    }

    pub(crate) fn run_multiexp_test<G: Group>() {
        let g = G::multi_exp(&[], &[]);
        assert_eq!(g, G::get_identity());

        let g1 = G::get_base();
        let zero = G::ScalarType::from(0u32);
        let g = G::multi_exp(&[&zero], &[&g1]);
        assert_eq!(g, G::get_identity());

        let one = G::ScalarType::from(1u32);
        let g = G::multi_exp(&[&one], &[&g1]);
        assert_eq!(g, G::get_base());

        let g1p = G::get_base();
        let g = G::multi_exp(&[&one, &zero], &[&g1, &g1p]);
        assert_eq!(g, G::get_base());

        let g2 = g1.add(&g1);
        let g3 = g1.mul(&G::ScalarType::from(500u32));
        let thousand = G::ScalarType::from(1000u32);
        let two = G::ScalarType::from(2u32);
        let three = G::ScalarType::from(3u32);
        let g = G::multi_exp(&[&thousand, &two, &three], &[&g1, &g2, &g3]);
        let expected = G::get_base().mul(&G::ScalarType::from((1000 + 4 + 1500) as u32));
        assert_eq!(g, expected);

        let minus_one = G::ScalarType::zero() - G::ScalarType::one();
        let g = G::multi_exp(&[&minus_one], &[&g1]);
        assert_eq!(g, -g1);
    }

    pub(crate) fn run_pippenger_against_naive<G: Group>(n: usize) {
        let mut prng = test_rng();
        let scalars: Vec<G::ScalarType> =
            (0..n).map(|_| G::ScalarType::random(&mut prng)).collect();
        let points: Vec<G> = (0..n).map(|_| G::random(&mut prng)).collect();
        let scalars_ref: Vec<&G::ScalarType> = scalars.iter().collect();
        let points_ref: Vec<&G> = points.iter().collect();

        let expected = super::naive_multi_exp(&scalars_ref, &points_ref);
        assert_eq!(super::pippenger(&scalars_ref, &points_ref).unwrap(), expected);
        assert_eq!(G::multi_exp(&scalars_ref, &points_ref), expected);
    }
}
