use crate::bn254::{Fq, FqParameters};
use crate::field::{Fp2, Fp2Params};

/// The parameters of `Fq2 = Fq[u] / (u^2 + 1)`.
pub struct Fq2Parameters;

impl Fp2Params for Fq2Parameters {
    type Fp = FqParameters;

    /// `-1`
    const NONRESIDUE: Fq = Fq::from_raw([
        0x3c208c16d87cfd46,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ]);

    const FROBENIUS_COEFF_C1: [Fq; 2] = [
        Fq::one(),
        Fq::from_raw([
            0x3c208c16d87cfd46,
            0x97816a916871ca8d,
            0xb85045b68181585d,
            0x30644e72e131a029,
        ]),
    ];

    #[inline]
    fn mul_fp_by_nonresidue(fe: &Fq) -> Fq {
        -*fe
    }
}

/// An element of the quadratic extension of the BN254 base field.
pub type Fq2 = Fp2<Fq2Parameters>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::field_tests::check_field_laws;
    use crate::field::FpParams;
    use crate::prelude::*;

    #[test]
    fn fq2_field_laws() {
        let mut prng = test_rng();
        check_field_laws(
            &mut prng,
            |p| Fq2::random(p),
            Fq2::zero(),
            Fq2::one(),
            |a| a.inverse(),
        );
    }

    #[test]
    fn fq2_frobenius_is_conjugation() {
        let mut prng = test_rng();
        let a = Fq2::random(&mut prng);
        assert_eq!(a.frobenius_map(1), a.conjugate());
        assert_eq!(a.frobenius_map(2), a);
        // Frobenius is the p-th power
        assert_eq!(a.frobenius_map(1), a.pow(FqParameters::MODULUS));
    }

    #[test]
    fn fq2_sqrt() {
        let mut prng = test_rng();
        for _ in 0..20 {
            let a = Fq2::random(&mut prng);
            let sq = a.square();
            let root = sq.sqrt().unwrap();
            assert_eq!(root.square(), sq);
        }
        // 9 + u is a non-residue
        let nr = Fq2::new(Fq::from(9u64), Fq::one());
        assert!(nr.sqrt().is_none());
        assert_eq!(Fq2::zero().sqrt(), Some(Fq2::zero()));
    }
}
