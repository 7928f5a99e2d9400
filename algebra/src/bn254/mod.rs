/// The number of bytes for a scalar value over BN254.
pub const BN254_SCALAR_LEN: usize = 32;

/// Wrap a 32-byte prime field into a type implementing [`Scalar`](crate::traits::Scalar).
macro_rules! impl_wrapped_prime_field {
    ($wrapper:ident, $field:ident, $params:ident) => {
        impl $wrapper {
            /// Create from canonical little-endian limbs, which must be below the modulus.
            #[inline]
            pub const fn from_raw(limbs: [u64; 4]) -> Self {
                Self($crate::field::Fp::from_raw(limbs))
            }

            /// Return the inner field element.
            #[inline]
            pub fn get_field(&self) -> $field {
                self.0
            }

            /// Wrap a field element.
            #[inline]
            pub fn from_field(field: $field) -> Self {
                Self(field)
            }

            /// Reduce little-endian bytes of any length modulo the field size.
            #[inline]
            pub fn from_le_bytes_mod_order(bytes: &[u8]) -> Self {
                Self($field::from_le_bytes_mod_order(bytes))
            }
        }

        impl ark_std::fmt::Debug for $wrapper {
            fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
                <num_bigint::BigUint as ark_std::fmt::Debug>::fmt(&(*self).into(), f)
            }
        }

        impl ark_std::str::FromStr for $wrapper {
            type Err = AlgebraError;

            /// Parse a decimal string, reducing it modulo the field size.
            fn from_str(string: &str) -> core::result::Result<Self, AlgebraError> {
                let v = num_bigint::BigUint::parse_bytes(string.as_bytes(), 10)
                    .ok_or(AlgebraError::DeserializationError)?;
                Ok(Self::from(&v))
            }
        }

        impl From<$wrapper> for num_bigint::BigUint {
            #[inline]
            fn from(val: $wrapper) -> Self {
                num_bigint::BigUint::from_bytes_le(&val.0.to_bytes_le())
            }
        }

        impl<'a> From<&'a num_bigint::BigUint> for $wrapper {
            fn from(src: &num_bigint::BigUint) -> Self {
                let modulus = <$wrapper as Scalar>::get_field_size_biguint();
                let reduced = (src % &modulus).to_bytes_le();
                let mut bytes = [0u8; 32];
                bytes[..reduced.len()].copy_from_slice(&reduced);
                Self($field::from_raw(limbs_from_le_bytes(&bytes)))
            }
        }

        impl One for $wrapper {
            #[inline]
            fn one() -> Self {
                Self($field::one())
            }
        }

        impl Zero for $wrapper {
            #[inline]
            fn zero() -> Self {
                Self($field::zero())
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.0.is_zero()
            }
        }

        impl Add for $wrapper {
            type Output = $wrapper;

            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + &rhs.0)
            }
        }

        impl Sub for $wrapper {
            type Output = $wrapper;

            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - &rhs.0)
            }
        }

        impl Mul for $wrapper {
            type Output = $wrapper;

            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                Self(self.0 * &rhs.0)
            }
        }

        impl Sum<$wrapper> for $wrapper {
            #[inline]
            fn sum<I: Iterator<Item = $wrapper>>(iter: I) -> Self {
                iter.fold(Self::zero(), Add::add)
            }
        }

        impl<'a> Sum<&'a $wrapper> for $wrapper {
            #[inline]
            fn sum<I: Iterator<Item = &'a $wrapper>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc + x)
            }
        }

        impl<'a> Add<&'a $wrapper> for $wrapper {
            type Output = $wrapper;

            #[inline]
            fn add(self, rhs: &Self) -> Self::Output {
                Self(self.0 + &rhs.0)
            }
        }

        impl<'a> AddAssign<&'a $wrapper> for $wrapper {
            #[inline]
            fn add_assign(&mut self, rhs: &Self) {
                self.0 += &rhs.0;
            }
        }

        impl<'a> Sub<&'a $wrapper> for $wrapper {
            type Output = $wrapper;

            #[inline]
            fn sub(self, rhs: &Self) -> Self::Output {
                Self(self.0 - &rhs.0)
            }
        }

        impl<'a> SubAssign<&'a $wrapper> for $wrapper {
            #[inline]
            fn sub_assign(&mut self, rhs: &Self) {
                self.0 -= &rhs.0;
            }
        }

        impl<'a> Mul<&'a $wrapper> for $wrapper {
            type Output = $wrapper;

            #[inline]
            fn mul(self, rhs: &Self) -> Self::Output {
                Self(self.0 * &rhs.0)
            }
        }

        impl<'a> MulAssign<&'a $wrapper> for $wrapper {
            #[inline]
            fn mul_assign(&mut self, rhs: &Self) {
                self.0 *= &rhs.0;
            }
        }

        impl Neg for $wrapper {
            type Output = $wrapper;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl From<u32> for $wrapper {
            #[inline]
            fn from(value: u32) -> Self {
                Self::from(value as u64)
            }
        }

        impl From<u64> for $wrapper {
            #[inline]
            fn from(value: u64) -> Self {
                Self($field::from(value))
            }
        }

        impl From<u128> for $wrapper {
            #[inline]
            fn from(value: u128) -> Self {
                Self($field::from_raw([value as u64, (value >> 64) as u64, 0, 0]))
            }
        }

        impl Scalar for $wrapper {
            #[inline]
            fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
                Self($field::random(rng))
            }

            #[inline]
            fn from_hash<D>(hash: D) -> Self
            where
                D: Digest<OutputSize = U64> + Default,
            {
                let mut prng = derive_prng_from_hash::<D>(hash);
                Self::random(&mut prng)
            }

            #[inline]
            fn multiplicative_generator() -> Self {
                Self($field::from_raw(<$params as FpParams>::GENERATOR))
            }

            #[inline]
            fn get_field_size_le_bytes() -> Vec<u8> {
                limbs_to_le_bytes(&<$params as FpParams>::MODULUS).to_vec()
            }

            #[inline]
            fn get_field_size_biguint() -> num_bigint::BigUint {
                num_bigint::BigUint::from_bytes_le(&Self::get_field_size_le_bytes())
            }

            #[inline]
            fn get_little_endian_u64(&self) -> Vec<u64> {
                self.0.into_raw().to_vec()
            }

            #[inline]
            fn bytes_len() -> usize {
                $crate::bn254::BN254_SCALAR_LEN
            }

            #[inline]
            fn to_bytes(&self) -> Vec<u8> {
                self.0.to_bytes_le().to_vec()
            }

            #[inline]
            fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() > Self::bytes_len() {
                    return Err(AlgebraError::DeserializationError);
                }
                let mut array = [0u8; $crate::bn254::BN254_SCALAR_LEN];
                array[0..bytes.len()].copy_from_slice(bytes);
                Ok(Self($field::from_bytes_le(&array)?))
            }

            /// Fails with `GroupInversionError` on zero.
            #[inline]
            fn inv(&self) -> Result<Self> {
                self.0
                    .inverse()
                    .map(Self)
                    .ok_or(AlgebraError::GroupInversionError)
            }

            #[inline]
            fn square(&self) -> Self {
                Self(self.0.square())
            }

            #[inline]
            fn sqrt(&self) -> Option<Self> {
                self.0.sqrt().map(Self)
            }

            #[inline]
            fn legendre(&self) -> LegendreSymbol {
                self.0.legendre()
            }

            #[inline]
            fn pow(&self, exponent: &[u64]) -> Self {
                Self(self.0.pow(exponent))
            }
        }
    };
}

mod fr;
pub use fr::*;

mod fq;
pub use fq::*;

mod fq2;
pub use fq2::*;

mod fq6;
pub use fq6::*;

mod fq12;
pub use fq12::*;

mod glv;
pub use glv::*;

mod g1;
pub use g1::*;

mod g2;
pub use g2::*;

mod gt;
pub use gt::*;

mod pairing;
pub use pairing::*;

/// A convenient macro to initialize a field element over the BN254 curve
/// from a decimal literal.
#[macro_export]
macro_rules! new_bn254_fr {
    ($c0:expr) => {{
        <$crate::bn254::BN254Scalar as core::str::FromStr>::from_str($c0)
    }};
}
