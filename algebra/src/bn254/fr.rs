use crate::field::{Fp, FpParams};
use crate::prelude::*;
use digest::{consts::U64, Digest};

/// The constants of the BN254 scalar field `r`.
pub struct FrParameters;

impl FpParams for FrParameters {
    const MODULUS: [u64; 4] = [
        0x43e1f593f0000001,
        0x2833e84879b97091,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const R: [u64; 4] = [
        0xac96341c4ffffffb,
        0x36fc76959f60cd29,
        0x666ea36f7879462e,
        0x0e0a77c19a07df2f,
    ];
    const R2: [u64; 4] = [
        0x1bb8e645ae216da7,
        0x53fe3ab1e35c59e3,
        0x8c49833d53bb8085,
        0x0216d0b17f4e44a5,
    ];
    const INV: u64 = 0xc2e1f593efffffff;
    const GENERATOR: [u64; 4] = [5, 0, 0, 0];
    const TWO_ADICITY: u32 = 28;
    const ROOT_OF_UNITY: [u64; 4] = [
        0x9bd61b6e725b19f0,
        0x402d111e41112ed4,
        0x00e0a7eb8ef62abc,
        0x2a3c09f0a58a7e85,
    ];
    const T: [u64; 4] = [
        0x9b9709143e1f593f,
        0x181585d2833e8487,
        0x131a029b85045b68,
        0x000000030644e72e,
    ];
    const T_MINUS_ONE_DIV_TWO: [u64; 4] = [
        0xcdcb848a1f0fac9f,
        0x0c0ac2e9419f4243,
        0x098d014dc2822db4,
        0x0000000183227397,
    ];
    const MODULUS_MINUS_ONE_DIV_TWO: [u64; 4] = [
        0xa1f0fac9f8000000,
        0x9419f4243cdcb848,
        0xdc2822db40c0ac2e,
        0x183227397098d014,
    ];
    const NUM_BITS: u32 = 254;
}

/// An element of the BN254 scalar field.
pub type Fr = Fp<FrParameters>;

/// The wrapped struct for the BN254 scalar field
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct BN254Scalar(pub(crate) Fr);

impl_wrapped_prime_field!(BN254Scalar, Fr, FrParameters);

impl Domain for BN254Scalar {
    const TWO_ADICITY: u32 = FrParameters::TWO_ADICITY;

    #[inline]
    fn two_adic_root_of_unity() -> Self {
        Self(Fr::from_raw(FrParameters::ROOT_OF_UNITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::field_tests::check_field_laws;
    use num_bigint::BigUint;

    #[test]
    fn fr_field_laws() {
        let mut prng = test_rng();
        check_field_laws(
            &mut prng,
            |p| Fr::random(p),
            Fr::zero(),
            Fr::one(),
            |a| a.inverse(),
        );
    }

    #[test]
    fn montgomery_multiplication_matches_biguint() {
        let r = BN254Scalar::get_field_size_biguint();
        let mut prng = test_rng();
        let minus_one = -BN254Scalar::one();
        let samples = [
            BN254Scalar::zero(),
            BN254Scalar::one(),
            minus_one,
            minus_one - &BN254Scalar::one(),
            BN254Scalar::random(&mut prng),
            BN254Scalar::random(&mut prng),
        ];
        for a in samples.iter() {
            for b in samples.iter() {
                let expected = (BigUint::from(*a) * BigUint::from(*b)) % &r;
                assert_eq!(BigUint::from(*a * b), expected);
                let expected = (BigUint::from(*a) + BigUint::from(*b)) % &r;
                assert_eq!(BigUint::from(*a + b), expected);
            }
        }
    }

    #[test]
    fn roots_of_unity() {
        let omega = BN254Scalar::two_adic_root_of_unity();
        let mut x = omega;
        for _ in 0..FrParameters::TWO_ADICITY - 1 {
            x = x.square();
        }
        assert_eq!(x, -BN254Scalar::one());
        assert_eq!(x.square(), BN254Scalar::one());

        let w8 = BN254Scalar::get_root_of_unity(8).unwrap();
        assert_eq!(w8.pow(&[8]), BN254Scalar::one());
        assert_ne!(w8.pow(&[4]), BN254Scalar::one());
        assert!(BN254Scalar::get_root_of_unity(6).is_none());
        assert!(BN254Scalar::get_root_of_unity(1 << 29).is_none());
    }

    #[test]
    fn inverse_and_sqrt_edge_cases() {
        assert_eq!(
            BN254Scalar::zero().inv(),
            Err(AlgebraError::GroupInversionError)
        );
        assert_eq!(BN254Scalar::zero().sqrt(), Some(BN254Scalar::zero()));

        let mut prng = test_rng();
        for _ in 0..20 {
            let a = BN254Scalar::random(&mut prng);
            let sq = a.square();
            let root = sq.sqrt().unwrap();
            assert!(root == a || root == -a);
            if a.legendre() == LegendreSymbol::QuadraticNonResidue {
                assert!(a.sqrt().is_none());
            }
        }
    }

    #[test]
    fn le_bytes_mod_order() {
        let bytes = [0xffu8; 64];
        let expected = BigUint::from_bytes_le(&bytes) % BN254Scalar::get_field_size_biguint();
        let v = BN254Scalar::from_le_bytes_mod_order(&bytes);
        assert_eq!(BigUint::from(v), expected);
    }
}
