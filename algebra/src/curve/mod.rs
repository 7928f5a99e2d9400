//! Short Weierstrass curves `y^2 = x^3 + b` in affine and Jacobian coordinates.
//!
//! A curve is described by a marker type implementing [`CurveParams`]. The
//! coordinate field may be a prime field or an extension, so the same code
//! serves both BN254 G1 and its sextic twist G2.

use crate::field::{Field, Fp, FpParams};
use crate::prelude::*;
use ark_std::fmt::{Debug, Formatter};

pub mod wnaf;

/// The constants of a short Weierstrass curve with `a = 0`.
pub trait CurveParams: 'static + Send + Sync + Sized {
    /// The field of the coordinates.
    type BaseField: Field;
    /// The prime field of the group order.
    type ScalarParams: FpParams;

    /// The constant `b` in `y^2 = x^3 + b`.
    const COEFF_B: Self::BaseField;
    /// The x-coordinate of the fixed generator.
    const GENERATOR_X: Self::BaseField;
    /// The y-coordinate of the fixed generator.
    const GENERATOR_Y: Self::BaseField;

    /// Scalar multiplication. Curves with an efficient endomorphism override this.
    fn mul_projective(
        point: &Jacobian<Self>,
        scalar: &Fp<Self::ScalarParams>,
    ) -> Jacobian<Self> {
        wnaf::wnaf_mul(point, scalar)
    }
}

/// A point in affine coordinates with an explicit flag for the point at infinity.
pub struct Affine<C: CurveParams> {
    pub x: C::BaseField,
    pub y: C::BaseField,
    pub infinity: bool,
}

impl<C: CurveParams> Affine<C> {
    /// Build a point without checking the curve equation.
    #[inline]
    pub const fn new_unchecked(x: C::BaseField, y: C::BaseField) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    /// Build a point, rejecting coordinates off the curve.
    pub fn new(x: C::BaseField, y: C::BaseField) -> Result<Self> {
        let p = Self::new_unchecked(x, y);
        if p.is_on_curve() {
            Ok(p)
        } else {
            Err(AlgebraError::NotOnCurveError)
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            x: C::BaseField::zero(),
            y: C::BaseField::zero(),
            infinity: true,
        }
    }

    #[inline]
    pub const fn generator() -> Self {
        Self::new_unchecked(C::GENERATOR_X, C::GENERATOR_Y)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Check `y^2 = x^3 + b`. The point at infinity is on every curve.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        self.y.square() == self.x.square() * &self.x + &C::COEFF_B
    }

    #[inline]
    pub fn to_jacobian(&self) -> Jacobian<C> {
        if self.infinity {
            Jacobian::identity()
        } else {
            Jacobian {
                x: self.x,
                y: self.y,
                z: C::BaseField::one(),
            }
        }
    }
}

impl<C: CurveParams> Copy for Affine<C> {}

impl<C: CurveParams> Clone for Affine<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams> PartialEq for Affine<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self.infinity, other.infinity) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl<C: CurveParams> Eq for Affine<C> {}

impl<C: CurveParams> Default for Affine<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: CurveParams> Debug for Affine<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        if self.infinity {
            write!(f, "Affine(infinity)")
        } else {
            write!(f, "Affine(x={:?}, y={:?})", self.x, self.y)
        }
    }
}

impl<C: CurveParams> Neg for Affine<C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.infinity {
            self
        } else {
            Self::new_unchecked(self.x, -self.y)
        }
    }
}

impl<C: CurveParams> From<Jacobian<C>> for Affine<C> {
    #[inline]
    fn from(p: Jacobian<C>) -> Self {
        p.to_affine()
    }
}

impl<C: CurveParams> From<Affine<C>> for Jacobian<C> {
    #[inline]
    fn from(p: Affine<C>) -> Self {
        p.to_jacobian()
    }
}

/// A point `(X : Y : Z)` standing for the affine point `(X / Z^2, Y / Z^3)`.
/// The identity has `Z = 0`.
pub struct Jacobian<C: CurveParams> {
    pub x: C::BaseField,
    pub y: C::BaseField,
    pub z: C::BaseField,
}

impl<C: CurveParams> Jacobian<C> {
    #[inline]
    pub fn identity() -> Self {
        Self {
            x: C::BaseField::one(),
            y: C::BaseField::one(),
            z: C::BaseField::zero(),
        }
    }

    #[inline]
    pub fn generator() -> Self {
        Affine::<C>::generator().to_jacobian()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Check `Y^2 = X^3 + b * Z^6`.
    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        let z2 = self.z.square();
        let z6 = z2.square() * &z2;
        self.y.square() == self.x.square() * &self.x + &(C::COEFF_B * &z6)
    }

    /// Point doubling (`dbl-2009-l`, for `a = 0`).
    pub fn double(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + &b).square() - &a - &c).double();
        let e = a.double() + &a;
        let f = e.square();

        let x3 = f - &d.double();
        let c8 = c.double().double().double();
        let y3 = e * &(d - &x3) - &c8;
        let z3 = (self.y * &self.z).double();
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Full Jacobian addition (`add-2007-bl`).
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }
        if other.is_identity() {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * &z2z2;
        let u2 = other.x * &z1z1;
        let s1 = self.y * &other.z * &z2z2;
        let s2 = other.y * &self.z * &z1z1;

        if u1 == u2 {
            return if s1 == s2 {
                self.double()
            } else {
                Self::identity()
            };
        }

        let h = u2 - &u1;
        let i = h.double().square();
        let j = h * &i;
        let r = (s2 - &s1).double();
        let v = u1 * &i;

        let x3 = r.square() - &j - &v.double();
        let y3 = r * &(v - &x3) - &(s1 * &j).double();
        let z3 = ((self.z + &other.z).square() - &z1z1 - &z2z2) * &h;
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Add an affine point (`madd-2007-bl`).
    pub fn add_mixed(&self, other: &Affine<C>) -> Self {
        if other.infinity {
            return *self;
        }
        if self.is_identity() {
            return other.to_jacobian();
        }

        let z1z1 = self.z.square();
        let u2 = other.x * &z1z1;
        let s2 = other.y * &self.z * &z1z1;
        let h = u2 - &self.x;
        let r = (s2 - &self.y).double();

        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::identity()
            };
        }

        let hh = h.square();
        let i = hh.double().double();
        let j = h * &i;
        let v = self.x * &i;

        let x3 = r.square() - &j - &v.double();
        let y3 = r * &(v - &x3) - &(self.y * &j).double();
        let z3 = (self.z + &h).square() - &z1z1 - &hh;
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Subtract an affine point.
    #[inline]
    pub fn sub_mixed(&self, other: &Affine<C>) -> Self {
        self.add_mixed(&-*other)
    }

    /// Rescale to `Z = 1` with one inversion.
    pub fn to_affine(&self) -> Affine<C> {
        match self.z.inverse() {
            None => Affine::identity(),
            Some(z_inv) => {
                let z_inv2 = z_inv.square();
                Affine::new_unchecked(self.x * &z_inv2, self.y * &z_inv2 * &z_inv)
            }
        }
    }

    /// Convert many points to affine form sharing a single field inversion.
    pub fn batch_normalize(points: &[Self]) -> Vec<Affine<C>> {
        let one = C::BaseField::one();
        let mut prefix = Vec::with_capacity(points.len());
        let mut acc = one;
        for p in points {
            if !p.is_identity() {
                acc *= &p.z;
            }
            prefix.push(acc);
        }

        let mut res = vec![Affine::identity(); points.len()];
        let mut acc_inv = match acc.inverse() {
            Some(v) => v,
            None => return res,
        };

        for (i, p) in points.iter().enumerate().rev() {
            if p.is_identity() {
                continue;
            }
            let before = if i == 0 { one } else { prefix[i - 1] };
            let z_inv = acc_inv * &before;
            acc_inv *= &p.z;

            let z_inv2 = z_inv.square();
            res[i] = Affine::new_unchecked(p.x * &z_inv2, p.y * &z_inv2 * &z_inv);
        }
        res
    }

    /// Scalar multiplication through the curve's preferred method.
    #[inline]
    pub fn mul(&self, scalar: &Fp<C::ScalarParams>) -> Self {
        C::mul_projective(self, scalar)
    }

    /// Double-and-add by an integer given as little-endian limbs, which may
    /// exceed the group order (used for subgroup and cofactor checks).
    pub fn mul_by_limbs(&self, limbs: &[u64]) -> Self {
        let mut res = Self::identity();
        for i in (0..num_bits(limbs)).rev() {
            res = res.double();
            if get_bit(limbs, i) {
                res = res.add(self);
            }
        }
        res
    }

    /// True if the point is killed by the group order.
    pub fn is_in_prime_order_subgroup(&self) -> bool {
        self.mul_by_limbs(&<C::ScalarParams as FpParams>::MODULUS)
            .is_identity()
    }

    pub fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self::generator().mul(&Fp::random(prng))
    }
}

impl<C: CurveParams> Copy for Jacobian<C> {}

impl<C: CurveParams> Clone for Jacobian<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams> PartialEq for Jacobian<C> {
    /// Compare `X1 Z2^2 = X2 Z1^2` and `Y1 Z2^3 = Y2 Z1^3`.
    fn eq(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        if self.x * &z2z2 != other.x * &z1z1 {
            return false;
        }
        self.y * &(z2z2 * &other.z) == other.y * &(z1z1 * &self.z)
    }
}

impl<C: CurveParams> Eq for Jacobian<C> {}

impl<C: CurveParams> Default for Jacobian<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: CurveParams> Debug for Jacobian<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <Affine<C> as Debug>::fmt(&self.to_affine(), f)
    }
}

impl<C: CurveParams> Neg for Jacobian<C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<'a, C: CurveParams> Add<&'a Jacobian<C>> for Jacobian<C> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &'a Jacobian<C>) -> Self {
        Jacobian::add(&self, rhs)
    }
}

impl<'a, C: CurveParams> Sub<&'a Jacobian<C>> for Jacobian<C> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &'a Jacobian<C>) -> Self {
        Jacobian::add(&self, &-*rhs)
    }
}

impl<'a, C: CurveParams> AddAssign<&'a Jacobian<C>> for Jacobian<C> {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Jacobian<C>) {
        *self = Jacobian::add(self, rhs);
    }
}

impl<'a, C: CurveParams> SubAssign<&'a Jacobian<C>> for Jacobian<C> {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Jacobian<C>) {
        *self = Jacobian::add(self, &-*rhs);
    }
}

impl<'a, C: CurveParams> AddAssign<&'a Affine<C>> for Jacobian<C> {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Affine<C>) {
        *self = self.add_mixed(rhs);
    }
}

impl<'a, C: CurveParams> SubAssign<&'a Affine<C>> for Jacobian<C> {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Affine<C>) {
        *self = self.sub_mixed(rhs);
    }
}

impl<'a, C: CurveParams> Mul<&'a Fp<C::ScalarParams>> for Jacobian<C> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &'a Fp<C::ScalarParams>) -> Self {
        C::mul_projective(&self, rhs)
    }
}
