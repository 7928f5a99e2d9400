//! Prime fields in Montgomery form and the extension towers built on them.
//!
//! A concrete field is obtained by implementing [`FpParams`] for a marker type
//! and using [`Fp`] over it. The towers [`Fp2`], [`Fp6`] and [`Fp12`] are
//! instantiated the same way through [`Fp2Params`], [`Fp6Params`] and
//! [`Fp12Params`].

pub(crate) mod arithmetic;
mod fp12;
mod fp2;
mod fp6;

pub use fp12::*;
pub use fp2::*;
pub use fp6::*;

use crate::prelude::*;
use arithmetic::*;
use ark_std::fmt::{Debug, Formatter};
use ark_std::hash::{Hash, Hasher};

/// The result of a quadratic character evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LegendreSymbol {
    /// The element is zero.
    Zero,
    /// The element is a non-zero square.
    QuadraticResidue,
    /// The element is not a square.
    QuadraticNonResidue,
}

/// The operations shared by prime fields and their extensions, used by the
/// curve arithmetic that is generic over its coordinate field.
pub trait Field:
    'static
    + Copy
    + Clone
    + Debug
    + Default
    + Eq
    + Send
    + Sync
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Sum
    + Product
{
    /// The additive identity.
    fn zero() -> Self;
    /// The multiplicative identity.
    fn one() -> Self;
    /// Test for zero.
    fn is_zero(&self) -> bool;
    /// Test for one.
    fn is_one(&self) -> bool;
    /// Return `2 * self`.
    fn double(&self) -> Self;
    /// Return `self^2`.
    fn square(&self) -> Self;
    /// Multiplicative inverse; `None` for zero.
    fn inverse(&self) -> Option<Self>;
    /// Sample a uniformly random element.
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self;
}

/// Implement [`Field`] by forwarding to the inherent methods of a field type.
macro_rules! impl_field_trait {
    ($field:ident, $params:ident) => {
        impl<P: $params> $crate::field::Field for $field<P> {
            #[inline]
            fn zero() -> Self {
                $field::zero()
            }
            #[inline]
            fn one() -> Self {
                $field::one()
            }
            #[inline]
            fn is_zero(&self) -> bool {
                $field::is_zero(self)
            }
            #[inline]
            fn is_one(&self) -> bool {
                $field::is_one(self)
            }
            #[inline]
            fn double(&self) -> Self {
                $field::double(self)
            }
            #[inline]
            fn square(&self) -> Self {
                $field::square(self)
            }
            #[inline]
            fn inverse(&self) -> Option<Self> {
                $field::inverse(self)
            }
            #[inline]
            fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
                $field::random(prng)
            }
        }
    };
}

pub(crate) use impl_field_trait;

/// The constants defining a 254-bit prime field.
///
/// All limb arrays are little-endian. `R`, `R2` and `INV` are the Montgomery
/// constants, the other values are given in canonical (non-Montgomery) form.
pub trait FpParams: 'static + Send + Sync + Sized {
    /// The modulus `p`.
    const MODULUS: [u64; 4];
    /// `2^256 mod p`.
    const R: [u64; 4];
    /// `2^512 mod p`.
    const R2: [u64; 4];
    /// `-p^{-1} mod 2^64`.
    const INV: u64;
    /// A multiplicative generator that is also a quadratic non-residue.
    const GENERATOR: [u64; 4];
    /// The largest `s` with `2^s | p - 1`.
    const TWO_ADICITY: u32;
    /// `GENERATOR^T`, a primitive `2^TWO_ADICITY`-th root of unity.
    const ROOT_OF_UNITY: [u64; 4];
    /// The odd part `T` of `p - 1`.
    const T: [u64; 4];
    /// `(T - 1) / 2`.
    const T_MINUS_ONE_DIV_TWO: [u64; 4];
    /// `(p - 1) / 2`.
    const MODULUS_MINUS_ONE_DIV_TWO: [u64; 4];
    /// The bit length of the modulus.
    const NUM_BITS: u32;
}

/// A prime field element stored in Montgomery form.
pub struct Fp<P: FpParams>(pub(crate) [u64; 4], PhantomData<P>);

impl<P: FpParams> Fp<P> {
    /// Convert canonical limbs into Montgomery form. The input must be below the modulus.
    pub const fn from_raw(limbs: [u64; 4]) -> Self {
        Self(mont_mul(&limbs, &P::R2, &P::MODULUS, P::INV), PhantomData)
    }

    /// Convert canonical limbs, rejecting values that are not below the modulus.
    pub fn from_canonical(limbs: [u64; 4]) -> Option<Self> {
        if lt(&limbs, &P::MODULUS) {
            Some(Self::from_raw(limbs))
        } else {
            None
        }
    }

    /// Return the canonical limbs of this element.
    pub const fn into_raw(&self) -> [u64; 4] {
        let l = &self.0;
        montgomery_reduce([l[0], l[1], l[2], l[3], 0, 0, 0, 0], &P::MODULUS, P::INV)
    }

    /// The additive identity.
    #[inline]
    pub const fn zero() -> Self {
        Self([0u64; 4], PhantomData)
    }

    /// The multiplicative identity.
    #[inline]
    pub const fn one() -> Self {
        Self(P::R, PhantomData)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u64; 4]
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.0 == P::R
    }

    #[inline]
    pub fn double(&self) -> Self {
        Self(add_mod(&self.0, &self.0, &P::MODULUS), PhantomData)
    }

    #[inline]
    pub fn square(&self) -> Self {
        Self(
            mont_mul(&self.0, &self.0, &P::MODULUS, P::INV),
            PhantomData,
        )
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

    /// Multiplicative inverse by Fermat's little theorem; `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let (e0, borrow) = sbb(P::MODULUS[0], 2, 0);
        let (e1, borrow) = sbb(P::MODULUS[1], 0, borrow);
        let (e2, borrow) = sbb(P::MODULUS[2], 0, borrow);
        let (e3, _) = sbb(P::MODULUS[3], 0, borrow);
        Some(self.pow([e0, e1, e2, e3]))
    }

    /// Euler's criterion.
    pub fn legendre(&self) -> LegendreSymbol {
        if self.is_zero() {
            return LegendreSymbol::Zero;
        }
        let s = self.pow(P::MODULUS_MINUS_ONE_DIV_TWO);
        if s.is_one() {
            LegendreSymbol::QuadraticResidue
        } else {
            LegendreSymbol::QuadraticNonResidue
        }
    }

    /// Tonelli-Shanks square root. Returns `None` for non-residues.
    ///
    /// For a modulus with two-adicity one this collapses into a single
    /// exponentiation by `(p + 1) / 4`.
    pub fn sqrt(&self) -> Option<Self> {
        match self.legendre() {
            LegendreSymbol::Zero => return Some(*self),
            LegendreSymbol::QuadraticNonResidue => return None,
            LegendreSymbol::QuadraticResidue => {}
        }

        let mut z = Self::from_raw(P::ROOT_OF_UNITY);
        let mut w = self.pow(P::T_MINUS_ONE_DIV_TWO);
        let mut x = w * self;
        let mut b = x * &w;
        let mut v = P::TWO_ADICITY as usize;

        while !b.is_one() {
            let mut k = 0usize;
            let mut b2k = b;
            while !b2k.is_one() {
                b2k = b2k.square();
                k += 1;
            }
            if k == v {
                return None;
            }
            let j = v - k - 1;
            w = z;
            for _ in 0..j {
                w = w.square();
            }
            z = w.square();
            b *= &z;
            x *= &w;
            v = k;
        }
        Some(x)
    }

    /// Sample a uniformly random element.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        let top_mask = u64::MAX >> (256 - P::NUM_BITS);
        loop {
            let mut limbs = [0u64; 4];
            for limb in limbs.iter_mut() {
                *limb = prng.next_u64();
            }
            limbs[3] &= top_mask;
            if lt(&limbs, &P::MODULUS) {
                return Self(limbs, PhantomData);
            }
        }
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn to_bytes_le(&self) -> [u8; 32] {
        limbs_to_le_bytes(&self.into_raw())
    }

    /// Decode a canonical 32-byte little-endian encoding.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(AlgebraError::DeserializationError);
        }
        Self::from_canonical(limbs_from_le_bytes(bytes))
            .ok_or(AlgebraError::NonCanonicalEncodingError)
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        limbs_to_be_bytes(&self.into_raw())
    }

    /// Decode a canonical 32-byte big-endian encoding.
    pub fn from_bytes_be(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(AlgebraError::DeserializationError);
        }
        Self::from_canonical(limbs_from_be_bytes(bytes))
            .ok_or(AlgebraError::NonCanonicalEncodingError)
    }

    /// Reduce little-endian bytes of any length modulo `p`.
    pub fn from_le_bytes_mod_order(bytes: &[u8]) -> Self {
        // 2^248: each 31-byte chunk is below the modulus.
        let base = Self::from_raw([0, 0, 0, 1 << 56]);
        let mut res = Self::zero();
        for chunk in bytes.chunks(31).rev() {
            let mut buf = [0u8; 32];
            buf[..chunk.len()].copy_from_slice(chunk);
            res = res * &base + &Self::from_raw(limbs_from_le_bytes(&buf));
        }
        res
    }

    /// True if the canonical value is larger than `(p - 1) / 2`.
    pub fn is_lexicographically_largest(&self) -> bool {
        lt(&P::MODULUS_MINUS_ONE_DIV_TWO, &self.into_raw())
    }
}

impl<P: FpParams> Copy for Fp<P> {}

impl<P: FpParams> Clone for Fp<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FpParams> PartialEq for Fp<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: FpParams> Eq for Fp<P> {}

impl<P: FpParams> Hash for Fp<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<P: FpParams> Default for Fp<P> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: FpParams> Debug for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        let r = self.into_raw();
        write!(f, "0x{:016x}{:016x}{:016x}{:016x}", r[3], r[2], r[1], r[0])
    }
}

impl<P: FpParams> From<u64> for Fp<P> {
    #[inline]
    fn from(v: u64) -> Self {
        Self::from_raw([v, 0, 0, 0])
    }
}

impl<P: FpParams> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(neg_mod(&self.0, &P::MODULUS), PhantomData)
    }
}

impl<'a, P: FpParams> AddAssign<&'a Fp<P>> for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Fp<P>) {
        self.0 = add_mod(&self.0, &rhs.0, &P::MODULUS);
    }
}

impl<'a, P: FpParams> SubAssign<&'a Fp<P>> for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Fp<P>) {
        self.0 = sub_mod(&self.0, &rhs.0, &P::MODULUS);
    }
}

impl<'a, P: FpParams> MulAssign<&'a Fp<P>> for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a Fp<P>) {
        self.0 = mont_mul(&self.0, &rhs.0, &P::MODULUS, P::INV);
    }
}

/// Derive the by-value and by-reference arithmetic operators of a field type
/// from its `AddAssign<&Self>`, `SubAssign<&Self>` and `MulAssign<&Self>` impls.
macro_rules! impl_field_ops_from_assign {
    ($field:ident, $params:ident) => {
        impl<P: $params> core::ops::Add for $field<P> {
            type Output = Self;

            #[inline]
            fn add(mut self, rhs: Self) -> Self {
                self += &rhs;
                self
            }
        }

        impl<'a, P: $params> core::ops::Add<&'a $field<P>> for $field<P> {
            type Output = Self;

            #[inline]
            fn add(mut self, rhs: &'a $field<P>) -> Self {
                self += rhs;
                self
            }
        }

        impl<'a, 'b, P: $params> core::ops::Add<&'b $field<P>> for &'a $field<P> {
            type Output = $field<P>;

            #[inline]
            fn add(self, rhs: &'b $field<P>) -> $field<P> {
                let mut r = *self;
                r += rhs;
                r
            }
        }

        impl<P: $params> core::ops::AddAssign for $field<P> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self += &rhs;
            }
        }

        impl<P: $params> core::ops::Sub for $field<P> {
            type Output = Self;

            #[inline]
            fn sub(mut self, rhs: Self) -> Self {
                self -= &rhs;
                self
            }
        }

        impl<'a, P: $params> core::ops::Sub<&'a $field<P>> for $field<P> {
            type Output = Self;

            #[inline]
            fn sub(mut self, rhs: &'a $field<P>) -> Self {
                self -= rhs;
                self
            }
        }

        impl<'a, 'b, P: $params> core::ops::Sub<&'b $field<P>> for &'a $field<P> {
            type Output = $field<P>;

            #[inline]
            fn sub(self, rhs: &'b $field<P>) -> $field<P> {
                let mut r = *self;
                r -= rhs;
                r
            }
        }

        impl<P: $params> core::ops::SubAssign for $field<P> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self -= &rhs;
            }
        }

        impl<P: $params> core::ops::Mul for $field<P> {
            type Output = Self;

            #[inline]
            fn mul(mut self, rhs: Self) -> Self {
                self *= &rhs;
                self
            }
        }

        impl<'a, P: $params> core::ops::Mul<&'a $field<P>> for $field<P> {
            type Output = Self;

            #[inline]
            fn mul(mut self, rhs: &'a $field<P>) -> Self {
                self *= rhs;
                self
            }
        }

        impl<'a, 'b, P: $params> core::ops::Mul<&'b $field<P>> for &'a $field<P> {
            type Output = $field<P>;

            #[inline]
            fn mul(self, rhs: &'b $field<P>) -> $field<P> {
                let mut r = *self;
                r *= rhs;
                r
            }
        }

        impl<P: $params> core::ops::MulAssign for $field<P> {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self *= &rhs;
            }
        }

        impl<P: $params> core::iter::Sum for $field<P> {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc + &x)
            }
        }

        impl<'a, P: $params> core::iter::Sum<&'a $field<P>> for $field<P> {
            fn sum<I: Iterator<Item = &'a $field<P>>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc + x)
            }
        }

        impl<P: $params> core::iter::Product for $field<P> {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::one(), |acc, x| acc * &x)
            }
        }
    };
}

pub(crate) use impl_field_ops_from_assign;

impl_field_ops_from_assign!(Fp, FpParams);
impl_field_trait!(Fp, FpParams);
