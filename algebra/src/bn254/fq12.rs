use crate::bn254::{Fq2, Fq6Parameters};
use crate::field::{Fp12, Fp12Params};

/// The parameters of `Fq12 = Fq6[w] / (w^2 - v)`.
pub struct Fq12Parameters;

impl Fp12Params for Fq12Parameters {
    type Fp6Params = Fq6Parameters;

    const FROBENIUS_COEFF_C1: [Fq2; 12] = [
        Fq2::from_raw([0x0000000000000001, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0xd60b35dadcc9e470, 0x5c521e08292f2176, 0xe8b99fdd76e68b60, 0x1284b71c2865a7df], [0xca5cf05f80f362ac, 0x747992778eeec7e5, 0xa6327cfe12150b8e, 0x246996f3b4fae7e6]),
        Fq2::from_raw([0xe4bd44e5607cfd49, 0xc28f069fbb966e3d, 0x5e6dd9e7e0acccb0, 0x30644e72e131a029], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0xe86f7d391ed4a67f, 0x894cb38dbe55d24a, 0xefe9608cd0acaa90, 0x19dc81cfcc82e4bb], [0x7694aa2bf4c0c101, 0x7f03a5e397d439ec, 0x06cbeee33576139d, 0x00abf8b60be77d73]),
        Fq2::from_raw([0xe4bd44e5607cfd48, 0xc28f069fbb966e3d, 0x5e6dd9e7e0acccb0, 0x30644e72e131a029], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x1264475e420ac20f, 0x2cfa95859526b0d4, 0x072fc0af59c61f30, 0x0757cab3a41d3cdc], [0xe85845e34c4a5b9c, 0xa20b7dfd71573c93, 0x18e9b79ba4e2606c, 0x0ca6b035381e35b6]),
        Fq2::from_raw([0x3c208c16d87cfd46, 0x97816a916871ca8d, 0xb85045b68181585d, 0x30644e72e131a029], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x6615563bfbb318d7, 0x3b2f4c893f42a916, 0xcf96a5d90a9accfd, 0x1ddf9756b8cbf849], [0x71c39bb757899a9b, 0x2307d819d98302a7, 0x121dc8b86f6c4ccf, 0x0bfab77f2c36b843]),
        Fq2::from_raw([0x5763473177fffffe, 0xd4f263f1acdb5c4f, 0x59e26bcea0d48bac, 0x0000000000000000], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x53b10eddb9a856c8, 0x0e34b703aa1bf842, 0xc866e529b0d4adcd, 0x1687cca314aebb6d], [0xc58be1eae3bc3c46, 0x187dc4add09d90a0, 0xb18456d34c0b44c0, 0x2fb855bcd54a22b6]),
        Fq2::from_raw([0x5763473177ffffff, 0xd4f263f1acdb5c4f, 0x59e26bcea0d48bac, 0x0000000000000000], [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000]),
        Fq2::from_raw([0x29bc44b896723b38, 0x6a86d50bd34b19b9, 0xb120850727bb392d, 0x290c83bf3d14634d], [0x53c846338c32a1ab, 0xf575ec93f71a8df9, 0x9f668e1adc9ef7f0, 0x23bd9e3da9136a73]),
    ];
}

/// An element of the degree-12 extension, where pairings take their values.
pub type Fq12 = Fp12<Fq12Parameters>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bn254::{Fq6, FqParameters};
    use crate::field::field_tests::check_field_laws;
    use crate::field::FpParams;
    use crate::prelude::*;

    #[test]
    fn fq12_field_laws() {
        let mut prng = test_rng();
        check_field_laws(
            &mut prng,
            |p| Fq12::random(p),
            Fq12::zero(),
            Fq12::one(),
            |a| a.inverse(),
        );
    }

    #[test]
    fn fq12_frobenius_is_p_power() {
        let mut prng = test_rng();
        let a = Fq12::random(&mut prng);
        assert_eq!(a.frobenius_map(1), a.pow(FqParameters::MODULUS));
        let mut p = a;
        for i in 1..12 {
            p = p.frobenius_map(1);
            assert_eq!(p, a.frobenius_map(i));
        }
        assert_eq!(p.frobenius_map(1), a);
    }

    #[test]
    fn sparse_mul_matches_dense() {
        let mut prng = test_rng();
        let a = Fq12::random(&mut prng);
        let c0 = Fq2::random(&mut prng);
        let c3 = Fq2::random(&mut prng);
        let c4 = Fq2::random(&mut prng);
        let dense = Fq12::new(
            Fq6::new(c0, Fq2::zero(), Fq2::zero()),
            Fq6::new(c3, c4, Fq2::zero()),
        );
        assert_eq!(a.mul_by_034(&c0, &c3, &c4), a * &dense);
        assert_eq!(a.square(), a * &a);
    }

    #[test]
    fn cyclotomic_operations() {
        let mut prng = test_rng();
        let f = Fq12::random(&mut prng);
        // f^((p^6 - 1)(p^2 + 1)) lies in the cyclotomic subgroup
        let mut g = f.conjugate() * &f.inverse().unwrap();
        g = g.frobenius_map(2) * &g;

        assert_eq!(g.cyclotomic_square(), g.square());
        assert_eq!(g.conjugate() * &g, Fq12::one());
        let e = [0x1234_5678_9abc_def0u64, 0x42];
        assert_eq!(g.cyclotomic_exp(e), g.pow(e));
        assert_eq!(g.cyclotomic_exp([0u64]), Fq12::one());
    }
}
