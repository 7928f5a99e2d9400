use crate::field::{impl_field_ops_from_assign, impl_field_trait, Fp2, Fp2Params};
use crate::prelude::*;
use ark_std::fmt::{Debug, Formatter};

/// Parameters of a cubic extension `Fp2[v] / (v^3 - NONRESIDUE)`.
pub trait Fp6Params: 'static + Send + Sync + Sized {
    /// The quadratic extension below.
    type Fp2Params: Fp2Params;

    /// The cubic non-residue `v^3`.
    const NONRESIDUE: Fp2<Self::Fp2Params>;

    /// `NONRESIDUE^((p^i - 1) / 3)` for `i = 0..6`.
    const FROBENIUS_COEFF_C1: [Fp2<Self::Fp2Params>; 6];

    /// `NONRESIDUE^((2p^i - 2) / 3)` for `i = 0..6`.
    const FROBENIUS_COEFF_C2: [Fp2<Self::Fp2Params>; 6];

    /// Multiply an element of the quadratic extension by the non-residue.
    #[inline]
    fn mul_fp2_by_nonresidue(fe: &Fp2<Self::Fp2Params>) -> Fp2<Self::Fp2Params> {
        Self::NONRESIDUE * fe
    }
}

/// An element `c0 + c1 * v + c2 * v^2` of a cubic extension.
pub struct Fp6<P: Fp6Params> {
    pub c0: Fp2<P::Fp2Params>,
    pub c1: Fp2<P::Fp2Params>,
    pub c2: Fp2<P::Fp2Params>,
}

impl<P: Fp6Params> Fp6<P> {
    #[inline]
    pub const fn new(
        c0: Fp2<P::Fp2Params>,
        c1: Fp2<P::Fp2Params>,
        c2: Fp2<P::Fp2Params>,
    ) -> Self {
        Self { c0, c1, c2 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Fp2::zero(), Fp2::zero(), Fp2::zero())
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(Fp2::one(), Fp2::zero(), Fp2::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.c0.is_one() && self.c1.is_zero() && self.c2.is_zero()
    }

    #[inline]
    pub fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double(), self.c2.double())
    }

    /// Multiply by `v`: `(c0, c1, c2) -> (NONRESIDUE * c2, c0, c1)`.
    #[inline]
    pub fn mul_by_nonresidue(&self) -> Self {
        Self::new(P::mul_fp2_by_nonresidue(&self.c2), self.c0, self.c1)
    }

    /// Chung-Hasan SQR2 squaring.
    pub fn square(&self) -> Self {
        let s0 = self.c0.square();
        let s1 = (self.c0 * &self.c1).double();
        let s2 = (self.c0 - &self.c1 + &self.c2).square();
        let s3 = (self.c1 * &self.c2).double();
        let s4 = self.c2.square();

        Self::new(
            s0 + &P::mul_fp2_by_nonresidue(&s3),
            s1 + &P::mul_fp2_by_nonresidue(&s4),
            s1 + &s2 + &s3 - &s0 - &s4,
        )
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        let c0 = self.c0.square() - &P::mul_fp2_by_nonresidue(&(self.c1 * &self.c2));
        let c1 = P::mul_fp2_by_nonresidue(&self.c2.square()) - &(self.c0 * &self.c1);
        let c2 = self.c1.square() - &(self.c0 * &self.c2);

        let t = P::mul_fp2_by_nonresidue(&(self.c2 * &c1 + &(self.c1 * &c2))) + &(self.c0 * &c0);
        let t = t.inverse()?;
        Some(Self::new(c0 * &t, c1 * &t, c2 * &t))
    }

    /// Multiply by `c0 + c1 * v`.
    pub fn mul_by_01(&self, c0: &Fp2<P::Fp2Params>, c1: &Fp2<P::Fp2Params>) -> Self {
        let a_a = self.c0 * c0;
        let b_b = self.c1 * c1;

        let t1 = P::mul_fp2_by_nonresidue(&(*c1 * &(self.c1 + &self.c2) - &b_b)) + &a_a;
        let t2 = (*c0 + c1) * &(self.c0 + &self.c1) - &a_a - &b_b;
        let t3 = *c0 * &(self.c0 + &self.c2) - &a_a + &b_b;

        Self::new(t1, t2, t3)
    }

    /// Multiply by `c1 * v`.
    pub fn mul_by_1(&self, c1: &Fp2<P::Fp2Params>) -> Self {
        Self::new(
            P::mul_fp2_by_nonresidue(&(self.c2 * c1)),
            self.c0 * c1,
            self.c1 * c1,
        )
    }

    /// Multiply every coefficient by an element of the quadratic extension.
    #[inline]
    pub fn mul_by_fp2(&self, fe: &Fp2<P::Fp2Params>) -> Self {
        Self::new(self.c0 * fe, self.c1 * fe, self.c2 * fe)
    }

    /// The `p^power` Frobenius endomorphism.
    pub fn frobenius_map(&self, power: usize) -> Self {
        Self::new(
            self.c0.frobenius_map(power),
            self.c1.frobenius_map(power) * &P::FROBENIUS_COEFF_C1[power % 6],
            self.c2.frobenius_map(power) * &P::FROBENIUS_COEFF_C2[power % 6],
        )
    }

    pub fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self::new(Fp2::random(prng), Fp2::random(prng), Fp2::random(prng))
    }
}

impl<P: Fp6Params> Copy for Fp6<P> {}

impl<P: Fp6Params> Clone for Fp6<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fp6Params> PartialEq for Fp6<P> {
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1 && self.c2 == other.c2
    }
}

impl<P: Fp6Params> Eq for Fp6<P> {}

impl<P: Fp6Params> Default for Fp6<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: Fp6Params> Debug for Fp6<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        write!(f, "Fp6({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}

impl<P: Fp6Params> Neg for Fp6<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }
}

impl<'a, P: Fp6Params> AddAssign<&'a Fp6<P>> for Fp6<P> {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Fp6<P>) {
        self.c0 += &rhs.c0;
        self.c1 += &rhs.c1;
        self.c2 += &rhs.c2;
    }
}

impl<'a, P: Fp6Params> SubAssign<&'a Fp6<P>> for Fp6<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Fp6<P>) {
        self.c0 -= &rhs.c0;
        self.c1 -= &rhs.c1;
        self.c2 -= &rhs.c2;
    }
}

impl<'a, P: Fp6Params> MulAssign<&'a Fp6<P>> for Fp6<P> {
    /// Karatsuba: six multiplications in the quadratic extension.
    fn mul_assign(&mut self, rhs: &'a Fp6<P>) {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let (b0, b1, b2) = (rhs.c0, rhs.c1, rhs.c2);

        let aa = a0 * &b0;
        let bb = a1 * &b1;
        let cc = a2 * &b2;

        let t1 = P::mul_fp2_by_nonresidue(&((a1 + &a2) * &(b1 + &b2) - &bb - &cc)) + &aa;
        let t2 = (a0 + &a1) * &(b0 + &b1) - &aa - &bb + &P::mul_fp2_by_nonresidue(&cc);
        let t3 = (a0 + &a2) * &(b0 + &b2) - &aa - &cc + &bb;

        self.c0 = t1;
        self.c1 = t2;
        self.c2 = t3;
    }
}

impl_field_ops_from_assign!(Fp6, Fp6Params);
impl_field_trait!(Fp6, Fp6Params);
