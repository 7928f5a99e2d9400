//! Baby Jubjub, the twisted Edwards curve `a * x^2 + y^2 = 1 + d * x^2 * y^2`
//! over the BN254 scalar field.
//!
//! Points are kept in projective coordinates `(X : Y : Z)` standing for
//! `(X / Z, Y / Z)`. Since `a` is a square and `d` is not, the addition law is
//! complete and needs no special cases.

use crate::bn254::{BN254Scalar, Fr};
use crate::field::{Fp, FpParams};
use crate::prelude::*;
use ark_std::fmt::{Debug, Formatter};
use digest::{consts::U64, Digest};

/// The constants of the prime-order subgroup's scalar field `l`.
pub struct FsParameters;

impl FpParams for FsParameters {
    const MODULUS: [u64; 4] = [
        0x677297dc392126f1,
        0xab3eedb83920ee0a,
        0x370a08b6d0302b0b,
        0x060c89ce5c263405,
    ];
    const R: [u64; 4] = [
        0x073315dea08f9c76,
        0xe7acffc6a098f24b,
        0xf85a9201d818f015,
        0x01f16424e1bb7724,
    ];
    const R2: [u64; 4] = [
        0x35e44abee7ecb21e,
        0x74646cacf5f84ec4,
        0xe472df203faa158f,
        0x0445b524f1ba50a8,
    ];
    const INV: u64 = 0x532ce5aebc48f5ef;
    const GENERATOR: [u64; 4] = [19, 0, 0, 0];
    const TWO_ADICITY: u32 = 4;
    const ROOT_OF_UNITY: [u64; 4] = [
        0xaa5f1ef09efcfc0b,
        0xc052c295d8aa6795,
        0x5e197770aef1311e,
        0x03a66642c6eefa63,
    ];
    const T: [u64; 4] = [
        0xa677297dc392126f,
        0xbab3eedb83920ee0,
        0x5370a08b6d0302b0,
        0x0060c89ce5c26340,
    ];
    const T_MINUS_ONE_DIV_TWO: [u64; 4] = [
        0x533b94bee1c90937,
        0x5d59f76dc1c90770,
        0x29b85045b6818158,
        0x0030644e72e131a0,
    ];
    const MODULUS_MINUS_ONE_DIV_TWO: [u64; 4] = [
        0x33b94bee1c909378,
        0xd59f76dc1c907705,
        0x9b85045b68181585,
        0x030644e72e131a02,
    ];
    const NUM_BITS: u32 = 251;
}

/// An element of the Baby Jubjub scalar field.
pub type Fs = Fp<FsParameters>;

/// The wrapped struct for the Baby Jubjub scalar field
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct BabyJubjubScalar(pub(crate) Fs);

impl_wrapped_prime_field!(BabyJubjubScalar, Fs, FsParameters);

/// The curve coefficient `a`.
pub const EDWARDS_A: Fr = Fr::from_raw([168700, 0, 0, 0]);

/// The curve coefficient `d`.
pub const EDWARDS_D: Fr = Fr::from_raw([168696, 0, 0, 0]);

/// The generator of the prime-order subgroup (often called `Base8`).
const BASE_X: Fr = Fr::from_raw([
    0x2893f3f6bb957051,
    0x2ab8d8010534e0b6,
    0x4eacb2e09d6277c1,
    0x0bb77a6ad63e739b,
]);
const BASE_Y: Fr = Fr::from_raw([
    0x4b3c257a872d7d8b,
    0xfce0051fb9e13377,
    0x25572e1cd16bf9ed,
    0x25797203f7a0b249,
]);

/// `Base8 / 8` inside the prime-order subgroup.
const BASE_DIV_COFACTOR_X: Fr = Fr::from_raw([
    0x74fc8e577f751837,
    0x055fba524d37dca0,
    0x1b342f9aa3f5ad5c,
    0x21207a738aab8a33,
]);
const BASE_DIV_COFACTOR_Y: Fr = Fr::from_raw([
    0xa768c6d3ba35924a,
    0xcbc1539da608db57,
    0xf77135e740bff1d6,
    0x06a0c864077b95f8,
]);

const FLAG_X_LARGEST: u8 = 0x80;

/// A Baby Jubjub point.
#[derive(Copy, Clone)]
pub struct BabyJubjubPoint {
    x: Fr,
    y: Fr,
    z: Fr,
}

impl BabyJubjubPoint {
    /// Build from affine coordinates without checking the curve equation.
    #[inline]
    pub const fn new_unchecked(x: Fr, y: Fr) -> Self {
        Self { x, y, z: Fr::one() }
    }

    /// Check `a * X^2 * Z^2 + Y^2 * Z^2 = Z^4 + d * X^2 * Y^2`.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        let z2 = self.z.square();
        (EDWARDS_A * &x2 + &y2) * &z2 == z2.square() + &(EDWARDS_D * &x2 * &y2)
    }

    /// Affine coordinates `(x, y)`.
    pub fn to_affine(&self) -> (Fr, Fr) {
        // Z is never zero on this curve
        let z_inv = self.z.inverse().unwrap_or_else(Fr::zero);
        (self.x * &z_inv, self.y * &z_inv)
    }

    /// Complete addition (`add-2008-bbjlp`).
    pub fn add_point(&self, other: &Self) -> Self {
        let a = self.z * &other.z;
        let b = a.square();
        let c = self.x * &other.x;
        let d = self.y * &other.y;
        let e = EDWARDS_D * &c * &d;
        let f = b - &e;
        let g = b + &e;
        let x3 = a * &f * &((self.x + &self.y) * &(other.x + &other.y) - &c - &d);
        let y3 = a * &g * &(d - &(EDWARDS_A * &c));
        Self {
            x: x3,
            y: y3,
            z: f * &g,
        }
    }

    /// Doubling (`dbl-2008-bbjlp`).
    pub fn double_point(&self) -> Self {
        let b = (self.x + &self.y).square();
        let c = self.x.square();
        let d = self.y.square();
        let e = EDWARDS_A * &c;
        let f = e + &d;
        let h = self.z.square();
        let j = f - &h.double();
        Self {
            x: (b - &c - &d) * &j,
            y: f * &(e - &d),
            z: f * &j,
        }
    }

    /// Double-and-add by an integer given as little-endian limbs.
    pub fn mul_by_limbs(&self, limbs: &[u64]) -> Self {
        let mut res = Self::get_identity();
        for i in (0..num_bits(limbs)).rev() {
            res = res.double_point();
            if get_bit(limbs, i) {
                res = res.add_point(self);
            }
        }
        res
    }

    /// Multiply by the integer value of a BN254 scalar. This is how circuits
    /// over BN254 use the curve: their scalars are bits of an `Fr` element.
    #[inline]
    pub fn mul_by_fr(&self, scalar: &BN254Scalar) -> Self {
        self.mul_by_limbs(&scalar.get_little_endian_u64())
    }

    /// True if the point is killed by the subgroup order `l`.
    pub fn is_in_prime_order_subgroup(&self) -> bool {
        self.mul_by_limbs(&FsParameters::MODULUS) == Self::get_identity()
    }

    /// Recover `x` from `y`: `x^2 = (1 - y^2) / (a - d * y^2)`.
    fn recover_x(y: &Fr, x_largest: bool) -> Result<Fr> {
        let y2 = y.square();
        let num = Fr::one() - &y2;
        let den = (EDWARDS_A - &(EDWARDS_D * &y2))
            .inverse()
            .ok_or(AlgebraError::DecompressElementError)?;
        let mut x = (num * &den)
            .sqrt()
            .ok_or(AlgebraError::DecompressElementError)?;
        if x.is_lexicographically_largest() != x_largest {
            x = -x;
        }
        Ok(x)
    }
}

impl PartialEq for BabyJubjubPoint {
    fn eq(&self, other: &Self) -> bool {
        self.x * &other.z == other.x * &self.z && self.y * &other.z == other.y * &self.z
    }
}

impl Eq for BabyJubjubPoint {}

impl Default for BabyJubjubPoint {
    fn default() -> Self {
        Self::get_identity()
    }
}

impl Debug for BabyJubjubPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        let (x, y) = self.to_affine();
        write!(f, "BabyJubjubPoint(x={:?}, y={:?})", x, y)
    }
}

impl Group for BabyJubjubPoint {
    type ScalarType = BabyJubjubScalar;
    const COMPRESSED_LEN: usize = 32;
    const UNCOMPRESSED_LEN: usize = 64;

    #[inline]
    fn double(&self) -> Self {
        self.double_point()
    }

    #[inline]
    fn get_identity() -> Self {
        Self::new_unchecked(Fr::zero(), Fr::one())
    }

    #[inline]
    fn get_base() -> Self {
        Self::new_unchecked(BASE_X, BASE_Y)
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::get_base().mul(&BabyJubjubScalar::random(rng))
    }

    /// `y` in little-endian order with the sign of `x` in the top bit.
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let (x, y) = self.to_affine();
        let mut buf = y.to_bytes_le();
        if x.is_lexicographically_largest() {
            buf[31] |= FLAG_X_LARGEST;
        }
        buf.to_vec()
    }

    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::COMPRESSED_LEN {
            return Err(AlgebraError::DecompressElementError);
        }
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        let x_largest = buf[31] & FLAG_X_LARGEST != 0;
        buf[31] &= !FLAG_X_LARGEST;

        let y = Fr::from_bytes_le(&buf)?;
        let x = Self::recover_x(&y, x_largest)?;
        let p = Self::new_unchecked(x, y);
        if !p.is_in_prime_order_subgroup() {
            return Err(AlgebraError::NotInSubgroupError);
        }
        Ok(p)
    }

    /// `x || y` in little-endian order.
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let (x, y) = self.to_affine();
        let mut buf = Vec::with_capacity(Self::UNCOMPRESSED_LEN);
        buf.extend_from_slice(&x.to_bytes_le());
        buf.extend_from_slice(&y.to_bytes_le());
        buf
    }

    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::UNCOMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let x = Fr::from_bytes_le(&bytes[..32])?;
        let y = Fr::from_bytes_le(&bytes[32..])?;
        let p = Self::new_unchecked(x, y);
        if !p.is_on_curve() {
            return Err(AlgebraError::NotOnCurveError);
        }
        Ok(p)
    }

    #[inline]
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut prng = derive_prng_from_hash::<D>(hash);
        Self::random(&mut prng)
    }
}

impl<'a> Add<&'a BabyJubjubPoint> for BabyJubjubPoint {
    type Output = BabyJubjubPoint;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        self.add_point(rhs)
    }
}

impl<'a> Sub<&'a BabyJubjubPoint> for BabyJubjubPoint {
    type Output = BabyJubjubPoint;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        self.add_point(&rhs.neg())
    }
}

impl<'a> Mul<&'a BabyJubjubScalar> for BabyJubjubPoint {
    type Output = BabyJubjubPoint;

    #[inline]
    fn mul(self, rhs: &BabyJubjubScalar) -> Self::Output {
        self.mul_by_limbs(&rhs.0.into_raw())
    }
}

impl<'a> AddAssign<&'a BabyJubjubPoint> for BabyJubjubPoint {
    #[inline]
    fn add_assign(&mut self, rhs: &BabyJubjubPoint) {
        *self = self.add_point(rhs);
    }
}

impl<'a> SubAssign<&'a BabyJubjubPoint> for BabyJubjubPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BabyJubjubPoint) {
        *self = self.add_point(&rhs.neg());
    }
}

impl<'a> MulAssign<&'a BabyJubjubScalar> for BabyJubjubPoint {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a BabyJubjubScalar) {
        *self = *self * rhs;
    }
}

impl Neg for BabyJubjubPoint {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
        }
    }
}

impl CurveGroup for BabyJubjubPoint {
    type BaseType = BN254Scalar;

    #[inline]
    fn get_x(&self) -> Self::BaseType {
        BN254Scalar::from_field(self.to_affine().0)
    }

    #[inline]
    fn get_y(&self) -> Self::BaseType {
        BN254Scalar::from_field(self.to_affine().1)
    }

    #[inline]
    fn new(x: &Self::BaseType, y: &Self::BaseType) -> Self {
        Self::new_unchecked(x.get_field(), y.get_field())
    }

    #[inline]
    fn get_point_div_by_cofactor() -> Self {
        Self::new_unchecked(BASE_DIV_COFACTOR_X, BASE_DIV_COFACTOR_Y)
    }

    #[inline]
    fn multiply_by_cofactor(&self) -> Self {
        self.double().double().double()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::group_tests::{test_scalar_operations, test_scalar_serialization};

    #[test]
    fn test_scalar_ops() {
        test_scalar_operations::<BabyJubjubScalar>();
        test_scalar_serialization::<BabyJubjubScalar>();
    }

    #[test]
    fn base_point_has_prime_order() {
        let base = BabyJubjubPoint::get_base();
        assert!(base.is_on_curve());
        assert!(base.is_in_prime_order_subgroup());
        assert_ne!(base, BabyJubjubPoint::get_identity());
        assert_eq!(base.mul(&-BabyJubjubScalar::one()), -base);
    }

    #[test]
    fn correctness_div_by_cofactor() {
        let p = BabyJubjubPoint::get_point_div_by_cofactor();
        assert!(p.is_on_curve());
        assert!(p.is_in_prime_order_subgroup());
        assert_eq!(p.multiply_by_cofactor(), BabyJubjubPoint::get_base());
    }

    #[test]
    fn addition_matches_affine_formula() {
        let mut prng = test_rng();
        let p = BabyJubjubPoint::random(&mut prng);
        let q = BabyJubjubPoint::random(&mut prng);
        let (x1, y1) = p.to_affine();
        let (x2, y2) = q.to_affine();
        let t = EDWARDS_D * &x1 * &x2 * &y1 * &y2;
        let x3 = (x1 * &y2 + &(y1 * &x2)) * &(Fr::one() + &t).inverse().unwrap();
        let y3 = (y1 * &y2 - &(EDWARDS_A * &x1 * &x2)) * &(Fr::one() - &t).inverse().unwrap();
        assert_eq!(p.add(&q).to_affine(), (x3, y3));

        assert_eq!(p.double(), p.add(&p));
        assert_eq!(p.add(&BabyJubjubPoint::get_identity()), p);
        assert_eq!(p.sub(&p), BabyJubjubPoint::get_identity());
        assert!(p.add(&q).is_on_curve());
    }

    #[test]
    fn fr_scalars_act_as_integers() {
        let base = BabyJubjubPoint::get_base();
        let k = BN254Scalar::from(1000u32);
        assert_eq!(base.mul_by_fr(&k), base.mul(&BabyJubjubScalar::from(1000u32)));
        // r is not a multiple of l, so r - 1 does not act as -1
        let minus_one = -BN254Scalar::one();
        assert_ne!(base.mul_by_fr(&minus_one), -base);
    }

    #[test]
    fn schnorr_identification_protocol() {
        let mut rng = test_rng();

        let alpha = BabyJubjubScalar::random(&mut rng);
        let base = BabyJubjubPoint::get_base();
        let u = base.mul(&alpha);

        let c = BabyJubjubScalar::random(&mut rng);
        let alpha_t = BabyJubjubScalar::random(&mut rng);
        let u_t = base.mul(&alpha_t);
        let alpha_z = alpha_t.add(&c.mul(&alpha));

        let left = base.mul(&alpha_z);
        let right = u_t.add(&u.mul(&c));
        assert_eq!(left, right);
    }

    #[test]
    fn encodings() {
        let mut prng = test_rng();
        let p = BabyJubjubPoint::random(&mut prng);
        let bytes = p.to_compressed_bytes();
        assert_eq!(BabyJubjubPoint::from_compressed_bytes(&bytes).unwrap(), p);
        assert_eq!(
            BabyJubjubPoint::from_compressed_bytes(&(-p).to_compressed_bytes()).unwrap(),
            -p
        );
        let bytes = p.to_unchecked_bytes();
        assert_eq!(BabyJubjubPoint::from_unchecked_bytes(&bytes).unwrap(), p);

        let mut bad = bytes.clone();
        bad[0] ^= 1;
        assert_eq!(
            BabyJubjubPoint::from_unchecked_bytes(&bad),
            Err(AlgebraError::NotOnCurveError)
        );

        // points of small order decode but fail the subgroup check
        let small = BabyJubjubPoint::new_unchecked(Fr::zero(), -Fr::one());
        assert!(small.is_on_curve());
        assert_eq!(
            BabyJubjubPoint::from_compressed_bytes(&small.to_compressed_bytes()),
            Err(AlgebraError::NotInSubgroupError)
        );
    }

    #[test]
    fn json_round_trip() {
        let mut prng = test_rng();
        let p = BabyJubjubPoint::random(&mut prng);
        let json = serde_json::to_string(&p).unwrap();
        let back: BabyJubjubPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
