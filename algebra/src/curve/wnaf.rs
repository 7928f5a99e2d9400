//! Fixed-window non-adjacent form with a skew bit.
//!
//! A scalar `k` is recoded as odd digits `d_i` in `(-2^w, 2^w)` with
//! `k = sum(d_i * 2^(w * i)) - skew`, where `skew` is set when `k` is even.
//! Digit `i` belongs to bit position `w * i`. The top digit is always positive.

use crate::curve::{Affine, CurveParams, Jacobian};
use crate::field::{Fp, FpParams};
use crate::prelude::*;

/// The window width used for curve scalar multiplication.
pub const WNAF_WINDOW: usize = 5;

/// Read `w` bits of little-endian limbs starting at `offset`.
fn read_window(limbs: &[u64], offset: usize, w: usize) -> u64 {
    let mut v = 0u64;
    for j in 0..w {
        if get_bit(limbs, offset + j) {
            v |= 1 << j;
        }
    }
    v
}

/// Recode a scalar below `2^num_bits` into `ceil(num_bits / w)` odd digits and
/// a skew bit.
pub fn fixed_wnaf(scalar: &[u64], num_bits: usize, w: usize) -> (Vec<i64>, bool) {
    assert!(w >= 2 && w < 32);
    let skew = scalar.first().map_or(true, |l| l & 1 == 0);

    // Adding the skew cannot overflow: an even scalar has a clear low bit.
    let mut k = scalar.to_vec();
    if k.is_empty() {
        k.push(0);
    }
    if skew {
        k[0] |= 1;
    }

    let n = (num_bits + w - 1) / w;
    let mut digits = Vec::with_capacity(n);
    for i in 0..n {
        let mut u = read_window(&k, w * i, w) as i64;
        if i > 0 && u & 1 == 0 {
            digits[i - 1] -= 1i64 << w;
            u += 1;
        }
        digits.push(u);
    }
    (digits, skew)
}

/// Recover the scalar limbs from digits produced by [`fixed_wnaf`].
pub fn wnaf_to_scalar(digits: &[i64], skew: bool, w: usize) -> Vec<u64> {
    use num_bigint::BigInt;
    use num_traits::{Signed, Zero};

    let mut acc = BigInt::zero();
    for d in digits.iter().rev() {
        acc <<= w;
        acc += BigInt::from(*d);
    }
    if skew {
        acc -= 1;
    }
    debug_assert!(!acc.is_negative());
    let (_, limbs) = acc.to_u64_digits();
    limbs
}

/// The odd multiples `P, 3P, 5P, ..., (2^w - 1)P` in affine form.
fn odd_multiples<C: CurveParams>(points: &[Jacobian<C>], w: usize) -> Vec<Vec<Affine<C>>> {
    let size = 1usize << (w - 1);
    let mut all = Vec::with_capacity(points.len() * size);
    for p in points {
        let p2 = p.double();
        let mut cur = *p;
        all.push(cur);
        for _ in 1..size {
            cur = cur.add(&p2);
            all.push(cur);
        }
    }
    Jacobian::batch_normalize(&all)
        .chunks(size)
        .map(|c| c.to_vec())
        .collect()
}

#[inline]
fn add_digit<C: CurveParams>(acc: &mut Jacobian<C>, table: &[Affine<C>], d: i64) {
    if d > 0 {
        *acc = acc.add_mixed(&table[((d - 1) / 2) as usize]);
    } else {
        *acc = acc.sub_mixed(&table[((-d - 1) / 2) as usize]);
    }
}

/// Interleaved wNAF evaluation of `sum(scalars[i] * points[i])` where every
/// scalar is below `2^num_bits`. The doublings are shared by all terms.
pub fn wnaf_multi_mul<C: CurveParams>(
    points: &[Jacobian<C>],
    scalars: &[&[u64]],
    num_bits: usize,
    w: usize,
) -> Jacobian<C> {
    assert_eq!(points.len(), scalars.len());
    if points.is_empty() {
        return Jacobian::identity();
    }

    let tables = odd_multiples(points, w);
    let recoded: Vec<(Vec<i64>, bool)> = scalars
        .iter()
        .map(|s| fixed_wnaf(s, num_bits, w))
        .collect();
    let n = recoded[0].0.len();

    let mut acc = Jacobian::identity();
    for (table, (digits, _)) in tables.iter().zip(recoded.iter()) {
        // the top digit is positive
        acc = acc.add_mixed(&table[((digits[n - 1] - 1) / 2) as usize]);
    }

    for i in (0..n - 1).rev() {
        for _ in 0..w {
            acc = acc.double();
        }
        for (table, (digits, _)) in tables.iter().zip(recoded.iter()) {
            add_digit(&mut acc, table, digits[i]);
        }
    }

    for (table, (_, skew)) in tables.iter().zip(recoded.iter()) {
        if *skew {
            acc = acc.sub_mixed(&table[0]);
        }
    }
    acc
}

/// Variable-base scalar multiplication by wNAF.
pub fn wnaf_mul<C: CurveParams>(point: &Jacobian<C>, scalar: &Fp<C::ScalarParams>) -> Jacobian<C> {
    let limbs = scalar.into_raw();
    wnaf_multi_mul(
        &[*point],
        &[&limbs[..]],
        <C::ScalarParams as FpParams>::NUM_BITS as usize,
        WNAF_WINDOW,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bn254::{Fr, FrParameters, G1Projective};
    use crate::field::FpParams;

    fn round_trip(limbs: [u64; 4]) {
        for w in [2usize, 4, 5, 7] {
            let (digits, skew) = fixed_wnaf(&limbs, 254, w);
            assert_eq!(digits.len(), (254 + w - 1) / w);
            assert!(digits.iter().all(|d| d & 1 == 1));
            assert!(*digits.last().unwrap() > 0);
            assert!(digits.iter().all(|d| d.abs() < (1 << w)));

            let mut back = wnaf_to_scalar(&digits, skew, w);
            back.resize(4, 0);
            assert_eq!(back, limbs.to_vec());
        }
    }

    #[test]
    fn wnaf_round_trip_edge_values() {
        round_trip([0, 0, 0, 0]);
        round_trip([1, 0, 0, 0]);
        round_trip([2, 0, 0, 0]);

        let mut r_minus_one = FrParameters::MODULUS;
        r_minus_one[0] -= 1;
        round_trip(r_minus_one);
    }

    #[test]
    fn wnaf_round_trip_random() {
        let mut prng = test_rng();
        for _ in 0..50 {
            round_trip(Fr::random(&mut prng).into_raw());
        }
    }

    #[test]
    fn wnaf_mul_matches_double_and_add() {
        let mut prng = test_rng();
        let g = G1Projective::generator();

        assert!(wnaf_mul(&g, &Fr::zero()).is_identity());
        assert_eq!(wnaf_mul(&g, &Fr::one()), g);
        assert_eq!(wnaf_mul(&g, &-Fr::one()), -g);

        for _ in 0..10 {
            let k = Fr::random(&mut prng);
            let expected = g.mul_by_limbs(&k.into_raw());
            assert_eq!(wnaf_mul(&g, &k), expected);
        }
    }

    #[test]
    fn interleaved_matches_separate() {
        let mut prng = test_rng();
        let p = G1Projective::random(&mut prng);
        let q = G1Projective::random(&mut prng);
        let a = Fr::random(&mut prng).into_raw();
        let b = Fr::random(&mut prng).into_raw();

        let joint = wnaf_multi_mul(&[p, q], &[&a[..], &b[..]], 254, 4);
        let expected = p.mul_by_limbs(&a).add(&q.mul_by_limbs(&b));
        assert_eq!(joint, expected);
    }
}
