use crate::field::{impl_field_ops_from_assign, impl_field_trait, Fp2, Fp6, Fp6Params};
use crate::prelude::*;
use ark_std::fmt::{Debug, Formatter};

type Fp2Of<P> = Fp2<<<P as Fp12Params>::Fp6Params as Fp6Params>::Fp2Params>;

/// Parameters of the quadratic extension `Fp6[w] / (w^2 - v)`.
pub trait Fp12Params: 'static + Send + Sync + Sized {
    /// The cubic extension below.
    type Fp6Params: Fp6Params;

    /// `NONRESIDUE^((p^i - 1) / 6)` for `i = 0..12`.
    const FROBENIUS_COEFF_C1: [Fp2Of<Self>; 12];
}

/// An element `c0 + c1 * w` of the degree-12 extension.
pub struct Fp12<P: Fp12Params> {
    pub c0: Fp6<P::Fp6Params>,
    pub c1: Fp6<P::Fp6Params>,
}

impl<P: Fp12Params> Fp12<P> {
    #[inline]
    pub const fn new(c0: Fp6<P::Fp6Params>, c1: Fp6<P::Fp6Params>) -> Self {
        Self { c0, c1 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Fp6::zero(), Fp6::zero())
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(Fp6::one(), Fp6::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.c0.is_one() && self.c1.is_zero()
    }

    #[inline]
    pub fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    /// `c0 - c1 * w`, which is the inverse for unitary elements.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Complex squaring over the cubic extension.
    pub fn square(&self) -> Self {
        let ab = self.c0 * &self.c1;
        let c0 = (self.c0 + &self.c1) * &(self.c0 + &self.c1.mul_by_nonresidue())
            - &ab
            - &ab.mul_by_nonresidue();
        Self::new(c0, ab.double())
    }

    pub fn inverse(&self) -> Option<Self> {
        let t = (self.c0.square() - &self.c1.square().mul_by_nonresidue()).inverse()?;
        Some(Self::new(self.c0 * &t, -(self.c1 * &t)))
    }

    /// The `p^power` Frobenius endomorphism.
    pub fn frobenius_map(&self, power: usize) -> Self {
        let c0 = self.c0.frobenius_map(power);
        let c1 = self
            .c1
            .frobenius_map(power)
            .mul_by_fp2(&P::FROBENIUS_COEFF_C1[power % 12]);
        Self::new(c0, c1)
    }

    /// Multiply by the sparse element `(c0, 0, 0) + (c3, c4, 0) * w` produced
    /// by a line evaluation. Matches the general product.
    pub fn mul_by_034(&self, c0: &Fp2Of<P>, c3: &Fp2Of<P>, c4: &Fp2Of<P>) -> Self {
        let a = self.c0.mul_by_fp2(c0);
        let b = self.c1.mul_by_01(c3, c4);
        let e = (self.c0 + &self.c1).mul_by_01(&(*c0 + c3), c4);

        let c1 = e - &(a + &b);
        let c0 = b.mul_by_nonresidue() + &a;
        Self::new(c0, c1)
    }

    /// Squaring in the cyclotomic subgroup (Granger-Scott).
    ///
    /// Only valid for elements of norm one, i.e. after the easy part of the
    /// final exponentiation.
    pub fn cyclotomic_square(&self) -> Self {
        let fp2_nr = <P::Fp6Params as Fp6Params>::mul_fp2_by_nonresidue;

        let z0 = self.c0.c0;
        let z4 = self.c0.c1;
        let z3 = self.c0.c2;
        let z2 = self.c1.c0;
        let z1 = self.c1.c1;
        let z5 = self.c1.c2;

        // (a + b * y)^2 with y^2 = NONRESIDUE
        let sq = |a: &Fp2Of<P>, b: &Fp2Of<P>| {
            let tmp = *a * b;
            let even = (*a + b) * &(*a + &fp2_nr(b)) - &tmp - &fp2_nr(&tmp);
            (even, tmp.double())
        };

        let (t0, t1) = sq(&z0, &z1);
        let (t2, t3) = sq(&z2, &z3);
        let (t4, t5) = sq(&z4, &z5);

        // 3t - 2z and 3t + 2z
        let sub3 = |t: &Fp2Of<P>, z: &Fp2Of<P>| (*t - z).double() + t;
        let add3 = |t: &Fp2Of<P>, z: &Fp2Of<P>| (*t + z).double() + t;

        let z0 = sub3(&t0, &z0);
        let z1 = add3(&t1, &z1);
        let z2 = add3(&fp2_nr(&t5), &z2);
        let z3 = sub3(&t4, &z3);
        let z4 = sub3(&t2, &z4);
        let z5 = add3(&t3, &z5);

        Self::new(Fp6::new(z0, z4, z3), Fp6::new(z2, z1, z5))
    }

    /// Exponentiation in the cyclotomic subgroup by little-endian limbs.
    pub fn cyclotomic_exp<S: AsRef<[u64]>>(&self, exp: S) -> Self {
        let mut res = Self::one();
        let mut found_one = false;
        for limb in exp.as_ref().iter().rev() {
            for i in (0..64).rev() {
                if found_one {
                    res = res.cyclotomic_square();
                }
                if (limb >> i) & 1 == 1 {
                    found_one = true;
                    res *= self;
                }
            }
        }
        res
    }

    /// Raise to a power given as little-endian limbs.
    pub fn pow<S: AsRef<[u64]>>(&self, exp: S) -> Self {
        let mut res = Self::one();
        for limb in exp.as_ref().iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if (limb >> i) & 1 == 1 {
                    res *= self;
                }
            }
        }
        res
    }

    pub fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self::new(Fp6::random(prng), Fp6::random(prng))
    }
}

impl<P: Fp12Params> Copy for Fp12<P> {}

impl<P: Fp12Params> Clone for Fp12<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fp12Params> PartialEq for Fp12<P> {
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<P: Fp12Params> Eq for Fp12<P> {}

impl<P: Fp12Params> Default for Fp12<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: Fp12Params> Debug for Fp12<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        write!(f, "Fp12({:?}, {:?})", self.c0, self.c1)
    }
}

impl<P: Fp12Params> Neg for Fp12<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<'a, P: Fp12Params> AddAssign<&'a Fp12<P>> for Fp12<P> {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Fp12<P>) {
        self.c0 += &rhs.c0;
        self.c1 += &rhs.c1;
    }
}

impl<'a, P: Fp12Params> SubAssign<&'a Fp12<P>> for Fp12<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Fp12<P>) {
        self.c0 -= &rhs.c0;
        self.c1 -= &rhs.c1;
    }
}

impl<'a, P: Fp12Params> MulAssign<&'a Fp12<P>> for Fp12<P> {
    fn mul_assign(&mut self, rhs: &'a Fp12<P>) {
        let v0 = self.c0 * &rhs.c0;
        let v1 = self.c1 * &rhs.c1;
        let c1 = (self.c0 + &self.c1) * &(rhs.c0 + &rhs.c1) - &v0 - &v1;
        self.c0 = v0 + &v1.mul_by_nonresidue();
        self.c1 = c1;
    }
}

impl_field_ops_from_assign!(Fp12, Fp12Params);
impl_field_trait!(Fp12, Fp12Params);
