use crate::bn254::{split_scalar, BN254Fq, BN254Scalar, Fq, FrParameters, BETA};
use crate::curve::wnaf::{wnaf_multi_mul, WNAF_WINDOW};
use crate::curve::{Affine, CurveParams, Jacobian};
use crate::field::Fp;
use crate::prelude::*;
use ark_std::fmt::{Debug, Formatter};
use digest::{consts::U64, Digest};

/// The curve `y^2 = x^3 + 3` over the base field.
pub struct G1Params;

impl CurveParams for G1Params {
    type BaseField = Fq;
    type ScalarParams = FrParameters;

    const COEFF_B: Fq = Fq::from_raw([3, 0, 0, 0]);
    const GENERATOR_X: Fq = Fq::from_raw([1, 0, 0, 0]);
    const GENERATOR_Y: Fq = Fq::from_raw([2, 0, 0, 0]);

    /// Multiply through the GLV decomposition: both halves are at most
    /// 128 bits and share their doublings.
    fn mul_projective(point: &G1Projective, scalar: &Fp<FrParameters>) -> G1Projective {
        let ((k1_neg, k1), (k2_neg, k2)) = split_scalar(scalar);
        let p = if k1_neg { -*point } else { *point };
        // k * P = k1 * P - k2 * phi(P)
        let phi = endomorphism(point);
        let q = if k2_neg { phi } else { -phi };
        wnaf_multi_mul(&[p, q], &[&k1[..], &k2[..]], 128, WNAF_WINDOW)
    }
}

/// A G1 point in affine coordinates.
pub type G1Affine = Affine<G1Params>;

/// A G1 point in Jacobian coordinates.
pub type G1Projective = Jacobian<G1Params>;

/// `phi(X : Y : Z) = (BETA * X : Y : Z)`, which equals `LAMBDA * P`.
#[inline]
pub fn endomorphism(point: &G1Projective) -> G1Projective {
    Jacobian {
        x: point.x * &BETA,
        y: point.y,
        z: point.z,
    }
}

/// `phi` on affine points.
#[inline]
pub fn endomorphism_affine(point: &G1Affine) -> G1Affine {
    if point.infinity {
        *point
    } else {
        G1Affine::new_unchecked(point.x * &BETA, point.y)
    }
}

const FLAG_Y_LARGEST: u8 = 0x80;
const FLAG_INFINITY: u8 = 0x40;
const FLAG_MASK: u8 = FLAG_Y_LARGEST | FLAG_INFINITY;

/// The G1 group of BN254.
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BN254G1(pub(crate) G1Projective);

impl Debug for BN254G1 {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <G1Affine as Debug>::fmt(&self.0.to_affine(), f)
    }
}

impl Group for BN254G1 {
    type ScalarType = BN254Scalar;
    const COMPRESSED_LEN: usize = 32;
    const UNCOMPRESSED_LEN: usize = 64;

    #[inline]
    fn double(&self) -> Self {
        Self(self.0.double())
    }

    #[inline]
    fn get_identity() -> Self {
        Self(G1Projective::identity())
    }

    #[inline]
    fn get_base() -> Self {
        Self(G1Projective::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self(G1Projective::random(prng))
    }

    /// The x-coordinate in little-endian order, with the sign of `y` and the
    /// infinity marker in the two top bits.
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let affine = self.0.to_affine();
        let mut buf = [0u8; 32];
        if affine.infinity {
            buf[31] |= FLAG_INFINITY;
        } else {
            buf.copy_from_slice(&affine.x.to_bytes_le());
            if affine.y.is_lexicographically_largest() {
                buf[31] |= FLAG_Y_LARGEST;
            }
        }
        buf.to_vec()
    }

    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::COMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        let flags = buf[31] & FLAG_MASK;
        buf[31] &= !FLAG_MASK;

        if flags & FLAG_INFINITY != 0 {
            // the identity has a single encoding
            if flags != FLAG_INFINITY || buf.iter().any(|b| *b != 0) {
                return Err(AlgebraError::DeserializationError);
            }
            return Ok(Self::get_identity());
        }

        let x = Fq::from_bytes_le(&buf)?;
        let rhs = x.square() * &x + &G1Params::COEFF_B;
        let mut y = rhs.sqrt().ok_or(AlgebraError::DecompressElementError)?;
        if y.is_lexicographically_largest() != (flags & FLAG_Y_LARGEST != 0) {
            y = -y;
        }
        Ok(Self(G1Affine::new_unchecked(x, y).to_jacobian()))
    }

    /// `x || y` in little-endian order.
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let affine = self.0.to_affine();
        let mut buf = vec![0u8; Self::UNCOMPRESSED_LEN];
        if affine.infinity {
            buf[63] |= FLAG_INFINITY;
        } else {
            buf[..32].copy_from_slice(&affine.x.to_bytes_le());
            buf[32..].copy_from_slice(&affine.y.to_bytes_le());
        }
        buf
    }

    /// Skips the subgroup check, which is trivial for G1, but still rejects
    /// coordinates off the curve.
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::UNCOMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let mut buf = [0u8; 64];
        buf.copy_from_slice(bytes);
        let flags = buf[63] & FLAG_MASK;
        buf[63] &= !FLAG_MASK;

        if flags & FLAG_INFINITY != 0 {
            // the identity has a single encoding
            if flags != FLAG_INFINITY || buf.iter().any(|b| *b != 0) {
                return Err(AlgebraError::DeserializationError);
            }
            return Ok(Self::get_identity());
        }

        let x = Fq::from_bytes_le(&buf[..32])?;
        let y = Fq::from_bytes_le(&buf[32..])?;
        Ok(Self(G1Affine::new(x, y)?.to_jacobian()))
    }

    #[inline]
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut prng = derive_prng_from_hash::<D>(hash);
        Self(G1Projective::random(&mut prng))
    }

    #[inline]
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        Self::common_multi_exp(scalars, points)
    }
}

impl<'a> Add<&'a BN254G1> for BN254G1 {
    type Output = BN254G1;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0.add(&rhs.0))
    }
}

impl<'a> Sub<&'a BN254G1> for BN254G1 {
    type Output = BN254G1;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254G1 {
    type Output = BN254G1;

    #[inline]
    fn mul(self, rhs: &BN254Scalar) -> Self::Output {
        Self(self.0.mul(&rhs.0))
    }
}

impl<'a> AddAssign<&'a BN254G1> for BN254G1 {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BN254G1) {
        self.0 += &rhs.0;
    }
}

impl<'a> SubAssign<&'a BN254G1> for BN254G1 {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BN254G1) {
        self.0 -= &rhs.0;
    }
}

impl<'a> MulAssign<&'a BN254Scalar> for BN254G1 {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a BN254Scalar) {
        self.0 = self.0.mul(&rhs.0);
    }
}

impl Neg for BN254G1 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl BN254G1 {
    /// Get the x-coordinate of the affine point, zero for the identity.
    #[inline]
    pub fn get_x(&self) -> BN254Fq {
        BN254Fq(self.0.to_affine().x)
    }

    /// Get the y-coordinate of the affine point, zero for the identity.
    #[inline]
    pub fn get_y(&self) -> BN254Fq {
        BN254Fq(self.0.to_affine().y)
    }

    /// Construct from the x-coordinate and y-coordinate, with `(0, 0)`
    /// standing for the identity. The curve equation is not checked.
    pub fn from_xy(x: BN254Fq, y: BN254Fq) -> Self {
        if x.is_zero() && y.is_zero() {
            Self::get_identity()
        } else {
            Self(G1Affine::new_unchecked(x.0, y.0).to_jacobian())
        }
    }

    /// The affine form of the point.
    #[inline]
    pub fn to_affine(&self) -> G1Affine {
        self.0.to_affine()
    }

    /// Wrap an affine point.
    #[inline]
    pub fn from_affine(p: &G1Affine) -> Self {
        Self(p.to_jacobian())
    }

    /// Normalize many points with a single inversion.
    pub fn batch_to_affine(points: &[Self]) -> Vec<G1Affine> {
        let raw: Vec<_> = points.iter().map(|p| p.0).collect();
        G1Projective::batch_normalize(&raw)
    }

    /// Precompute the Pippenger table `[P0, phi(P0), P1, phi(P1), ...]` for fixed bases.
    pub fn pippenger_point_table(points: &[Self]) -> Vec<G1Affine> {
        crate::multi_exp::generate_pippenger_point_table(&Self::batch_to_affine(points))
    }

    /// Multi-exponentiation against a table from [`Self::pippenger_point_table`].
    /// Only the first `scalars.len()` bases of the table are used.
    pub fn multi_exp_with_table(scalars: &[BN254Scalar], table: &[G1Affine]) -> Self {
        let n = scalars.len().min(table.len() / 2);
        let scalars_raw: Vec<_> = scalars[..n].iter().map(|r| r.0).collect();
        Self(crate::multi_exp::pippenger_with_table(
            &scalars_raw,
            &table[..2 * n],
        ))
    }

    #[inline]
    fn common_multi_exp(scalars: &[&<Self as Group>::ScalarType], points: &[&Self]) -> Self {
        if scalars.is_empty() || scalars.len() != points.len() {
            return Self::get_identity();
        }
        let scalars: Vec<BN254Scalar> = scalars.iter().map(|r| **r).collect();
        let points: Vec<Self> = points.iter().map(|r| **r).collect();
        Self::multi_exp_with_table(&scalars, &Self::pippenger_point_table(&points))
    }
}
