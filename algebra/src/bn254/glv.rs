//! The GLV endomorphism of BN254 G1.
//!
//! `phi(x, y) = (BETA * x, y)` acts on G1 as multiplication by `LAMBDA`, so a
//! 254-bit scalar `k` can be replaced by two scalars of at most 128 bits with
//! `k = k1 - LAMBDA * k2 (mod r)`.

use crate::bn254::{Fq, Fr};
use crate::field::arithmetic::mul_wide;

/// A cube root of unity in the base field.
pub const BETA: Fq = Fq::from_raw([0x5763473177fffffe, 0xd4f263f1acdb5c4f, 0x59e26bcea0d48bac, 0]);

/// The eigenvalue of `phi` on G1, a cube root of unity in the scalar field.
pub const LAMBDA: Fr = Fr::from_raw([0x8b17ea66b99c90dd, 0x5bfc41088d8daaa7, 0xb3c4d79d41a91758, 0]);

// short lattice basis `(a1, b1), (a2, b2)` of `{(x, y) : x - LAMBDA * y = 0 mod r}`
const A1: [u64; 4] = [0x89d3256894d213e3, 0, 0, 0];
const MINUS_B1: [u64; 4] = [0x8211bbeb7d4f1128, 0x6f4d8248eeb859fc, 0, 0];
const A2: [u64; 4] = [0x0be4e1541221250b, 0x6f4d8248eeb859fd, 0, 0];
const B2: [u64; 4] = [0x89d3256894d213e3, 0, 0, 0];

// round(b2 * 2^256 / r) and round(-b1 * 2^256 / r)
const G1: [u64; 4] = [0xd91d232ec7e0b3d7, 0x2, 0, 0];
const G2: [u64; 4] = [0x7a7bd9d4391eb18e, 0x4ccef014a773d2cf, 0x2, 0];

/// A half-size scalar as a sign and a magnitude below `2^128`.
pub type SignedHalfScalar = (bool, [u64; 2]);

/// `(k * g) >> 256`
#[inline]
fn mul_shift(k: &[u64; 4], g: &[u64; 4]) -> Fr {
    let wide = mul_wide(k, g);
    Fr::from_raw([wide[4], wide[5], 0, 0])
}

/// Map a field element of small absolute value to a sign and magnitude.
fn to_signed(v: Fr) -> SignedHalfScalar {
    let raw = v.into_raw();
    if raw[2] == 0 && raw[3] == 0 {
        (false, [raw[0], raw[1]])
    } else {
        let n = (-v).into_raw();
        (true, [n[0], n[1]])
    }
}

/// Decompose `k` into `(k1, k2)` with `k1 - LAMBDA * k2 = k (mod r)`.
/// Each half is returned as `(is_negative, magnitude)`.
pub fn split_scalar(k: &Fr) -> (SignedHalfScalar, SignedHalfScalar) {
    let limbs = k.into_raw();
    let c1 = mul_shift(&limbs, &G1);
    let c2 = mul_shift(&limbs, &G2);

    let k1 = *k - &(c1 * &Fr::from_raw(A1)) - &(c2 * &Fr::from_raw(A2));
    let k2 = c2 * &Fr::from_raw(B2) - &(c1 * &Fr::from_raw(MINUS_B1));
    (to_signed(k1), to_signed(k2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bn254::{FrParameters, G1Affine, G1Projective};
    use crate::field::FpParams;
    use crate::prelude::*;

    fn recombine(((n1, k1), (n2, k2)): (SignedHalfScalar, SignedHalfScalar)) -> Fr {
        let f1 = Fr::from_raw([k1[0], k1[1], 0, 0]);
        let f2 = Fr::from_raw([k2[0], k2[1], 0, 0]);
        let f1 = if n1 { -f1 } else { f1 };
        let f2 = if n2 { -f2 } else { f2 };
        f1 - &(LAMBDA * &f2)
    }

    #[test]
    fn constants_are_cube_roots() {
        assert!(BETA.pow([3u64]).is_one());
        assert!(!BETA.is_one());
        assert!(LAMBDA.pow([3u64]).is_one());

        let g = G1Affine::generator();
        let phi = G1Affine::new_unchecked(g.x * &BETA, g.y);
        assert_eq!(phi.to_jacobian(), G1Projective::generator().mul_by_limbs(&LAMBDA.into_raw()));
    }

    #[test]
    fn split_small_values() {
        assert_eq!(split_scalar(&Fr::zero()), ((false, [0, 0]), (false, [0, 0])));
        assert_eq!(split_scalar(&Fr::one()), ((false, [1, 0]), (false, [0, 0])));

        let mut r_minus_one = FrParameters::MODULUS;
        r_minus_one[0] -= 1;
        let (k1, k2) = split_scalar(&Fr::from_raw(r_minus_one));
        assert_eq!(k1, (false, [9931322734385697762, 0]));
        // 147946756881789319000765030803803410728
        let expected: u128 = 147946756881789319000765030803803410728;
        assert_eq!(k2, (false, [expected as u64, (expected >> 64) as u64]));
    }

    #[test]
    fn split_recombines() {
        let mut prng = test_rng();
        for _ in 0..200 {
            let k = Fr::random(&mut prng);
            let parts = split_scalar(&k);
            assert_eq!(recombine(parts), k);
        }
        assert_eq!(recombine(split_scalar(&LAMBDA)), LAMBDA);
    }
}
