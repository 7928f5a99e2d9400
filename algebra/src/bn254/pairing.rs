//! The optimal ate pairing on BN254.
//!
//! G2 points are first "prepared": the doubling and addition steps of the
//! Miller loop only depend on `Q`, so their line coefficients are computed
//! once in homogeneous projective coordinates on the twist and reused for
//! every G1 point paired against `Q`.

use crate::bn254::{
    BN254Gt, BN254Scalar, Fq, Fq12, Fq2, G1Affine, G2Affine, G2Params, BN254G1, BN254G2,
};
use crate::curve::CurveParams;
use crate::prelude::*;
use crate::traits::Pairing;

/// The curve parameter `x`, with `p` and `r` polynomials in `x`.
pub const BN_X: u64 = 4965661367192848881;

/// `6x + 2` in non-adjacent form, least significant digit first.
pub const ATE_LOOP_COUNT: [i8; 66] = [
    0, 0, 0, 1, 0, 1, 0, -1, 0, 0, -1, 0, 0, 0, 1, 0, 0, -1, 0, -1, 0, 0, 0, 1, 0, -1, 0, 0, 0, 0,
    -1, 0, 0, 1, 0, -1, 0, 0, 1, 0, 0, 0, 0, 0, -1, 0, 0, -1, 0, 1, 0, -1, 0, 0, 0, -1, 0, -1, 0,
    0, 0, 1, 0, -1, 0, 1,
];

/// `xi^((p - 1) / 3)`
const TWIST_MUL_BY_Q_X: Fq2 = Fq2::from_raw(
    [0x99e39557176f553d, 0xb78cc310c2c3330c, 0x4c0bec3cf559b143, 0x2fb347984f7911f7],
    [0x1665d51c640fcba2, 0x32ae2a1d0b7c9dce, 0x4ba4cc8bd75a0794, 0x16c9e55061ebae20],
);

/// `xi^((p - 1) / 2)`
const TWIST_MUL_BY_Q_Y: Fq2 = Fq2::from_raw(
    [0xdc54014671a0135a, 0xdbaae0eda9c95998, 0xdc5ec698b6e2f9b9, 0x063cf305489af5dc],
    [0x82d37f632623b0e3, 0x21807dc98fa25bd2, 0x0704b5a7ec796f2b, 0x07c03cbcac41049a],
);

/// `1 / 2` in the base field.
const TWO_INV: Fq = Fq::from_raw([
    0x9e10460b6c3e7ea4,
    0xcbc0b548b438e546,
    0xdc2822db40c0ac2e,
    0x183227397098d014,
]);

/// The coefficients `(c0, c1, c2)` of one line; evaluated at `P` it becomes the
/// sparse element `(c0 * P.y, 0, 0) + (c1 * P.x, c2, 0) * w`.
pub type EllCoeff = (Fq2, Fq2, Fq2);

/// The line coefficients of a G2 point, in Miller loop order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct G2Prepared {
    /// One entry per doubling or addition step.
    pub ell_coeffs: Vec<EllCoeff>,
    /// The prepared point was the identity.
    pub infinity: bool,
}

/// A point `(x : y : z)` on the twist standing for `(x / z, y / z)`.
struct HomogeneousPoint {
    x: Fq2,
    y: Fq2,
    z: Fq2,
}

impl HomogeneousPoint {
    fn double_in_place(&mut self) -> EllCoeff {
        let a = (self.x * &self.y).mul_by_fp(&TWO_INV);
        let b = self.y.square();
        let c = self.z.square();
        let e = G2Params::COEFF_B * &(c.double() + &c);
        let f = e.double() + &e;
        let g = (b + &f).mul_by_fp(&TWO_INV);
        let h = (self.y + &self.z).square() - &(b + &c);
        let i = e - &b;
        let j = self.x.square();
        let e_square = e.square();

        self.x = a * &(b - &f);
        self.y = g.square() - &(e_square.double() + &e_square);
        self.z = b * &h;
        (-h, j.double() + &j, i)
    }

    fn add_in_place(&mut self, q: &G2Affine) -> EllCoeff {
        let theta = self.y - &(q.y * &self.z);
        let lambda = self.x - &(q.x * &self.z);
        let c = theta.square();
        let d = lambda.square();
        let e = lambda * &d;
        let f = self.z * &c;
        let g = self.x * &d;
        let h = e + &f - &g.double();

        self.x = lambda * &h;
        self.y = theta * &(g - &h) - &(e * &self.y);
        self.z *= &e;
        let j = theta * &q.x - &(lambda * &q.y);
        (lambda, -theta, j)
    }
}

/// The untwist-Frobenius-twist endomorphism `psi`.
fn mul_by_char(q: &G2Affine) -> G2Affine {
    G2Affine::new_unchecked(
        q.x.frobenius_map(1) * &TWIST_MUL_BY_Q_X,
        q.y.frobenius_map(1) * &TWIST_MUL_BY_Q_Y,
    )
}

/// Precompute the Miller loop lines of `q`.
pub fn prepare_g2(q: &G2Affine) -> G2Prepared {
    if q.infinity {
        return G2Prepared {
            ell_coeffs: vec![],
            infinity: true,
        };
    }

    let mut ell_coeffs = Vec::with_capacity(ATE_LOOP_COUNT.len() * 2);
    let mut r = HomogeneousPoint {
        x: q.x,
        y: q.y,
        z: Fq2::one(),
    };
    let neg_q = -*q;

    for bit in ATE_LOOP_COUNT[..ATE_LOOP_COUNT.len() - 1].iter().rev() {
        ell_coeffs.push(r.double_in_place());
        match *bit {
            1 => ell_coeffs.push(r.add_in_place(q)),
            -1 => ell_coeffs.push(r.add_in_place(&neg_q)),
            _ => {}
        }
    }

    let q1 = mul_by_char(q);
    let q2 = -mul_by_char(&q1);
    ell_coeffs.push(r.add_in_place(&q1));
    ell_coeffs.push(r.add_in_place(&q2));

    G2Prepared {
        ell_coeffs,
        infinity: false,
    }
}

#[inline]
fn ell(f: &mut Fq12, coeffs: &EllCoeff, p: &G1Affine) {
    let c0 = coeffs.0.mul_by_fp(&p.y);
    let c1 = coeffs.1.mul_by_fp(&p.x);
    *f = f.mul_by_034(&c0, &c1, &coeffs.2);
}

/// The shared Miller loop of several pairs. Pairs involving an identity point
/// contribute nothing.
pub fn miller_loop(pairs: &[(&G1Affine, &G2Prepared)]) -> Fq12 {
    let mut pairs: Vec<(&G1Affine, core::slice::Iter<'_, EllCoeff>)> = pairs
        .iter()
        .filter(|(p, q)| !p.infinity && !q.infinity)
        .map(|(p, q)| (*p, q.ell_coeffs.iter()))
        .collect();

    let mut f = Fq12::one();
    let n = ATE_LOOP_COUNT.len();
    for i in (1..n).rev() {
        if i != n - 1 {
            f = f.square();
        }
        apply_next_lines(&mut f, &mut pairs);
        if ATE_LOOP_COUNT[i - 1] != 0 {
            apply_next_lines(&mut f, &mut pairs);
        }
    }
    apply_next_lines(&mut f, &mut pairs);
    apply_next_lines(&mut f, &mut pairs);
    f
}

fn apply_next_lines(f: &mut Fq12, pairs: &mut [(&G1Affine, core::slice::Iter<'_, EllCoeff>)]) {
    for (p, coeffs) in pairs.iter_mut() {
        if let Some(c) = coeffs.next() {
            ell(f, c, p);
        }
    }
}

/// `f^(-x)` for `f` in the cyclotomic subgroup.
#[inline]
fn exp_by_neg_x(f: &Fq12) -> Fq12 {
    f.cyclotomic_exp([BN_X]).conjugate()
}

/// Raise the Miller loop output to `(p^12 - 1) / r`. Returns `None` for zero.
pub fn final_exponentiation(f: &Fq12) -> Option<Fq12> {
    // easy part: f^((p^6 - 1)(p^2 + 1))
    let mut r = f.conjugate() * &f.inverse()?;
    r = r.frobenius_map(2) * &r;

    // hard part, following Fuentes-Castaneda et al.
    let y0 = exp_by_neg_x(&r);
    let y1 = y0.cyclotomic_square();
    let y2 = y1.cyclotomic_square();
    let mut y3 = y2 * &y1;
    let y4 = exp_by_neg_x(&y3);
    let y5 = y4.cyclotomic_square();
    let mut y6 = exp_by_neg_x(&y5);
    y3 = y3.conjugate();
    y6 = y6.conjugate();
    let y7 = y6 * &y4;
    let mut y8 = y7 * &y3;
    let y9 = y8 * &y1;
    let y10 = y8 * &y4;
    let y11 = y10 * &r;
    let y12 = y9.frobenius_map(1);
    let y13 = y12 * &y11;
    y8 = y8.frobenius_map(2);
    let y14 = y8 * &y13;
    r = r.conjugate();
    let y15 = (r * &y9).frobenius_map(3);
    Some(y15 * &y14)
}

/// The pairing engine for BN254
pub struct BN254PairingEngine;

impl BN254PairingEngine {
    /// Pair against G2 points that were already prepared.
    pub fn product_of_prepared_pairings(a: &[G1Affine], b: &[G2Prepared]) -> BN254Gt {
        let pairs: Vec<(&G1Affine, &G2Prepared)> = a.iter().zip(b.iter()).collect();
        let f = miller_loop(&pairs);
        // a Miller loop output is never zero
        BN254Gt(final_exponentiation(&f).unwrap_or_else(Fq12::one))
    }
}

impl Pairing for BN254PairingEngine {
    type ScalarField = BN254Scalar;
    type G1 = BN254G1;
    type G2 = BN254G2;
    type Gt = BN254Gt;

    #[inline]
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt {
        Self::product_of_pairings(&[*a], &[*b])
    }

    fn product_of_pairings(a: &[Self::G1], b: &[Self::G2]) -> Self::Gt {
        let c1 = BN254G1::batch_to_affine(a);
        let c2: Vec<G2Prepared> = b
            .iter()
            .map(|q| prepare_g2(&q.to_affine()))
            .collect();
        Self::product_of_prepared_pairings(&c1, &c2)
    }
}
