use crate::field::{impl_field_ops_from_assign, impl_field_trait, Fp, FpParams};
use crate::prelude::*;
use ark_std::fmt::{Debug, Formatter};

/// Parameters of a quadratic extension `Fp[u] / (u^2 - NONRESIDUE)`.
pub trait Fp2Params: 'static + Send + Sync + Sized {
    /// The base prime field.
    type Fp: FpParams;

    /// The quadratic non-residue `u^2`.
    const NONRESIDUE: Fp<Self::Fp>;

    /// `NONRESIDUE^((p^i - 1) / 2)` for `i = 0, 1`.
    const FROBENIUS_COEFF_C1: [Fp<Self::Fp>; 2];

    /// Multiply a base field element by the non-residue.
    #[inline]
    fn mul_fp_by_nonresidue(fe: &Fp<Self::Fp>) -> Fp<Self::Fp> {
        Self::NONRESIDUE * fe
    }
}

/// An element `c0 + c1 * u` of a quadratic extension.
pub struct Fp2<P: Fp2Params> {
    /// The constant coefficient.
    pub c0: Fp<P::Fp>,
    /// The coefficient of `u`.
    pub c1: Fp<P::Fp>,
}

impl<P: Fp2Params> Fp2<P> {
    /// Create from the two coefficients.
    #[inline]
    pub const fn new(c0: Fp<P::Fp>, c1: Fp<P::Fp>) -> Self {
        Self { c0, c1 }
    }

    /// Create from canonical limbs of the two coefficients.
    pub const fn from_raw(c0: [u64; 4], c1: [u64; 4]) -> Self {
        Self::new(Fp::from_raw(c0), Fp::from_raw(c1))
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Fp::zero(), Fp::zero())
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(Fp::one(), Fp::zero())
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

    /// Complex squaring: two multiplications in the base field.
    pub fn square(&self) -> Self {
        let v0 = self.c0 - &self.c1;
        let v3 = self.c0 - &P::mul_fp_by_nonresidue(&self.c1);
        let v2 = self.c0 * &self.c1;
        let v0 = v0 * &v3 + &v2;
        Self::new(v0 + &P::mul_fp_by_nonresidue(&v2), v2.double())
    }

    /// `c0 - c1 * u`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// `c0^2 - NONRESIDUE * c1^2`, the norm down to the base field.
    #[inline]
    pub fn norm(&self) -> Fp<P::Fp> {
        self.c0.square() - &P::mul_fp_by_nonresidue(&self.c1.square())
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        let t = self.norm().inverse()?;
        Some(Self::new(self.c0 * &t, -(self.c1 * &t)))
    }

    /// Multiply both coefficients by a base field element.
    #[inline]
    pub fn mul_by_fp(&self, fe: &Fp<P::Fp>) -> Self {
        Self::new(self.c0 * fe, self.c1 * fe)
    }

    /// The `p^power` Frobenius endomorphism.
    #[inline]
    pub fn frobenius_map(&self, power: usize) -> Self {
        Self::new(self.c0, self.c1 * &P::FROBENIUS_COEFF_C1[power % 2])
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

    /// Square root for `p = 3 mod 4` and `u^2 = -1`, using the complex method.
    /// Returns `None` for non-squares.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(*self);
        }
        let m = <P::Fp as FpParams>::MODULUS;
        // (p - 3) / 4, which is p >> 2 since p = 3 mod 4.
        let exp = [
            (m[0] >> 2) | (m[1] << 62),
            (m[1] >> 2) | (m[2] << 62),
            (m[2] >> 2) | (m[3] << 62),
            m[3] >> 2,
        ];
        let minus_one = -Self::one();

        let a1 = self.pow(exp);
        let alpha = a1.square() * self;
        let a0 = alpha.frobenius_map(1) * &alpha;
        if a0 == minus_one {
            return None;
        }

        let x0 = a1 * self;
        let x = if alpha == minus_one {
            Self::new(-x0.c1, x0.c0)
        } else {
            let b = (alpha + &Self::one()).pow(<P::Fp as FpParams>::MODULUS_MINUS_ONE_DIV_TWO);
            b * &x0
        };
        if x.square() == *self {
            Some(x)
        } else {
            None
        }
    }

    /// Sample a uniformly random element.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self::new(Fp::random(prng), Fp::random(prng))
    }

    /// Lexicographic sign used by point compression: compare `c1`, then `c0`.
    pub fn is_lexicographically_largest(&self) -> bool {
        if self.c1.is_zero() {
            self.c0.is_lexicographically_largest()
        } else {
            self.c1.is_lexicographically_largest()
        }
    }
}

impl<P: Fp2Params> Copy for Fp2<P> {}

impl<P: Fp2Params> Clone for Fp2<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fp2Params> PartialEq for Fp2<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<P: Fp2Params> Eq for Fp2<P> {}

impl<P: Fp2Params> Default for Fp2<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: Fp2Params> Debug for Fp2<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        write!(f, "Fp2({:?} + {:?} * u)", self.c0, self.c1)
    }
}

impl<P: Fp2Params> Neg for Fp2<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<'a, P: Fp2Params> AddAssign<&'a Fp2<P>> for Fp2<P> {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Fp2<P>) {
        self.c0 += &rhs.c0;
        self.c1 += &rhs.c1;
    }
}

impl<'a, P: Fp2Params> SubAssign<&'a Fp2<P>> for Fp2<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Fp2<P>) {
        self.c0 -= &rhs.c0;
        self.c1 -= &rhs.c1;
    }
}

impl<'a, P: Fp2Params> MulAssign<&'a Fp2<P>> for Fp2<P> {
    /// Karatsuba: three base field multiplications.
    fn mul_assign(&mut self, rhs: &'a Fp2<P>) {
        let v0 = self.c0 * &rhs.c0;
        let v1 = self.c1 * &rhs.c1;
        let c1 = (self.c0 + &self.c1) * &(rhs.c0 + &rhs.c1) - &v0 - &v1;
        self.c0 = v0 + &P::mul_fp_by_nonresidue(&v1);
        self.c1 = c1;
    }
}

impl_field_ops_from_assign!(Fp2, Fp2Params);
impl_field_trait!(Fp2, Fp2Params);
