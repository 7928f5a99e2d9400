use crate::bn254::{BN254Scalar, Fq2, FrParameters};
use crate::curve::{Affine, CurveParams, Jacobian};
use crate::prelude::*;
use ark_std::fmt::{Debug, Formatter};
use digest::{consts::U64, Digest};

/// The sextic twist `y^2 = x^3 + 3 / (9 + u)` over `Fq2`.
pub struct G2Params;

impl CurveParams for G2Params {
    type BaseField = Fq2;
    type ScalarParams = FrParameters;

    const COEFF_B: Fq2 = Fq2::from_raw(
        [0x3267e6dc24a138e5, 0xb5b4c5e559dbefa3, 0x81be18991be06ac3, 0x2b149d40ceb8aaae],
        [0xe4a2bd0685c315d2, 0xa74fa084e52d1852, 0xcd2cafadeed8fdf4, 0x009713b03af0fed4],
    );

    const GENERATOR_X: Fq2 = Fq2::from_raw(
        [0x46debd5cd992f6ed, 0x674322d4f75edadd, 0x426a00665e5c4479, 0x1800deef121f1e76],
        [0x97e485b7aef312c2, 0xf1aa493335a9e712, 0x7260bfb731fb5d25, 0x198e9393920d483a],
    );

    const GENERATOR_Y: Fq2 = Fq2::from_raw(
        [0x4ce6cc0166fa7daa, 0xe3d1e7690c43d37b, 0x4aab71808dcb408f, 0x12c85ea5db8c6deb],
        [0x55acdadcd122975b, 0xbc4b313370b38ef3, 0xec9e99ad690c3395, 0x090689d0585ff075],
    );
}

/// A G2 point in affine coordinates.
pub type G2Affine = Affine<G2Params>;

/// A G2 point in Jacobian coordinates.
pub type G2Projective = Jacobian<G2Params>;

const FLAG_Y_LARGEST: u8 = 0x80;
const FLAG_INFINITY: u8 = 0x40;
const FLAG_MASK: u8 = FLAG_Y_LARGEST | FLAG_INFINITY;

fn fq2_to_bytes(v: &Fq2, out: &mut [u8]) {
    out[..32].copy_from_slice(&v.c0.to_bytes_le());
    out[32..64].copy_from_slice(&v.c1.to_bytes_le());
}

fn fq2_from_bytes(bytes: &[u8]) -> Result<Fq2> {
    Ok(Fq2::new(
        crate::bn254::Fq::from_bytes_le(&bytes[..32])?,
        crate::bn254::Fq::from_bytes_le(&bytes[32..64])?,
    ))
}

/// The G2 group of BN254.
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BN254G2(pub(crate) G2Projective);

impl Debug for BN254G2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <G2Affine as Debug>::fmt(&self.0.to_affine(), f)
    }
}

impl Group for BN254G2 {
    type ScalarType = BN254Scalar;
    const COMPRESSED_LEN: usize = 64;
    const UNCOMPRESSED_LEN: usize = 128;

    #[inline]
    fn double(&self) -> Self {
        Self(self.0.double())
    }

    #[inline]
    fn get_identity() -> Self {
        Self(G2Projective::identity())
    }

    #[inline]
    fn get_base() -> Self {
        Self(G2Projective::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self(G2Projective::random(prng))
    }

    fn to_compressed_bytes(&self) -> Vec<u8> {
        let affine = self.0.to_affine();
        let mut buf = vec![0u8; Self::COMPRESSED_LEN];
        if affine.infinity {
            buf[63] |= FLAG_INFINITY;
        } else {
            fq2_to_bytes(&affine.x, &mut buf);
            if affine.y.is_lexicographically_largest() {
                buf[63] |= FLAG_Y_LARGEST;
            }
        }
        buf
    }

    /// Decompress and check membership in the order-`r` subgroup; the twist
    /// has a large cofactor.
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::COMPRESSED_LEN {
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

        let x = fq2_from_bytes(&buf)?;
        let rhs = x.square() * &x + &G2Params::COEFF_B;
        let mut y = rhs.sqrt().ok_or(AlgebraError::DecompressElementError)?;
        if y.is_lexicographically_largest() != (flags & FLAG_Y_LARGEST != 0) {
            y = -y;
        }
        let p = G2Affine::new_unchecked(x, y).to_jacobian();
        if !p.is_in_prime_order_subgroup() {
            return Err(AlgebraError::NotInSubgroupError);
        }
        Ok(Self(p))
    }

    /// `x.c0 || x.c1 || y.c0 || y.c1` in little-endian order.
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let affine = self.0.to_affine();
        let mut buf = vec![0u8; Self::UNCOMPRESSED_LEN];
        if affine.infinity {
            buf[127] |= FLAG_INFINITY;
        } else {
            fq2_to_bytes(&affine.x, &mut buf[..64]);
            fq2_to_bytes(&affine.y, &mut buf[64..]);
        }
        buf
    }

    /// Rejects points off the curve but skips the subgroup check.
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::UNCOMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let mut buf = [0u8; 128];
        buf.copy_from_slice(bytes);
        let flags = buf[127] & FLAG_MASK;
        buf[127] &= !FLAG_MASK;

        if flags & FLAG_INFINITY != 0 {
            // the identity has a single encoding
            if flags != FLAG_INFINITY || buf.iter().any(|b| *b != 0) {
                return Err(AlgebraError::DeserializationError);
            }
            return Ok(Self::get_identity());
        }

        let x = fq2_from_bytes(&buf[..64])?;
        let y = fq2_from_bytes(&buf[64..])?;
        Ok(Self(G2Affine::new(x, y)?.to_jacobian()))
    }

    #[inline]
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut prng = derive_prng_from_hash::<D>(hash);
        Self(G2Projective::random(&mut prng))
    }
}

impl<'a> Add<&'a BN254G2> for BN254G2 {
    type Output = BN254G2;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0.add(&rhs.0))
    }
}

impl<'a> Sub<&'a BN254G2> for BN254G2 {
    type Output = BN254G2;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254G2 {
    type Output = BN254G2;

    #[inline]
    fn mul(self, rhs: &BN254Scalar) -> Self::Output {
        Self(self.0.mul(&rhs.0))
    }
}

impl<'a> AddAssign<&'a BN254G2> for BN254G2 {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BN254G2) {
        self.0 += &rhs.0;
    }
}

impl<'a> SubAssign<&'a BN254G2> for BN254G2 {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BN254G2) {
        self.0 -= &rhs.0;
    }
}

impl<'a> MulAssign<&'a BN254Scalar> for BN254G2 {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a BN254Scalar) {
        self.0 = self.0.mul(&rhs.0);
    }
}

impl Neg for BN254G2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl BN254G2 {
    /// The affine form of the point.
    #[inline]
    pub fn to_affine(&self) -> G2Affine {
        self.0.to_affine()
    }

    /// Wrap an affine point.
    #[inline]
    pub fn from_affine(p: &G2Affine) -> Self {
        Self(p.to_jacobian())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bn254::Fq;

    #[test]
    fn identity_encoding_is_canonical() {
        let identity = BN254G2::get_identity();
        let compressed = identity.to_compressed_bytes();
        let unchecked = identity.to_unchecked_bytes();
        assert_eq!(BN254G2::from_compressed_bytes(&compressed), Ok(identity));
        assert_eq!(BN254G2::from_unchecked_bytes(&unchecked), Ok(identity));

        let mut bad = compressed.clone();
        bad[0] = 1;
        assert_eq!(
            BN254G2::from_compressed_bytes(&bad),
            Err(AlgebraError::DeserializationError)
        );
        let mut bad = compressed;
        let last = bad.len() - 1;
        bad[last] |= FLAG_Y_LARGEST;
        assert_eq!(
            BN254G2::from_compressed_bytes(&bad),
            Err(AlgebraError::DeserializationError)
        );
        let mut bad = unchecked;
        bad[5] = 7;
        assert_eq!(
            BN254G2::from_unchecked_bytes(&bad),
            Err(AlgebraError::DeserializationError)
        );

        let p = BN254G2::get_base();
        assert_eq!(BN254G2::from_compressed_bytes(&p.to_compressed_bytes()), Ok(p));
    }

    #[test]
    fn generator_is_in_subgroup() {
        assert!(G2Affine::generator().is_on_curve());
        assert!(G2Projective::generator().is_in_prime_order_subgroup());
    }

    #[test]
    fn twist_formulas_agree() {
        let mut prng = test_rng();
        let p = G2Projective::random(&mut prng);
        let q = G2Projective::random(&mut prng);
        assert_eq!(p.add(&p), p.double());
        assert_eq!(p.add_mixed(&q.to_affine()), p.add(&q));
        assert_eq!(p.sub_mixed(&q.to_affine()).add(&q), p);
        assert!(p.add(&q).is_on_curve());
        assert!(p.is_in_prime_order_subgroup());
    }

    #[test]
    fn points_outside_subgroup_are_rejected() {
        // find a point on the twist; with overwhelming probability it is
        // not in the order-r subgroup
        let mut i = 1u64;
        let p = loop {
            let x = Fq2::new(Fq::from(i), Fq::one());
            let rhs = x.square() * &x + &G2Params::COEFF_B;
            if let Some(y) = rhs.sqrt() {
                break G2Affine::new_unchecked(x, y);
            }
            i += 1;
        };
        assert!(p.is_on_curve());
        assert!(!p.to_jacobian().is_in_prime_order_subgroup());

        let bytes = BN254G2(p.to_jacobian()).to_compressed_bytes();
        assert_eq!(
            BN254G2::from_compressed_bytes(&bytes),
            Err(AlgebraError::NotInSubgroupError)
        );
        // the unchecked decoding only checks the curve equation
        let bytes = BN254G2(p.to_jacobian()).to_unchecked_bytes();
        assert!(BN254G2::from_unchecked_bytes(&bytes).is_ok());
    }

    #[test]
    fn compressed_sign_flag() {
        let mut prng = test_rng();
        let q = BN254G2::random(&mut prng);
        let a = q.to_compressed_bytes();
        let b = (-q).to_compressed_bytes();
        assert_eq!(a[..63], b[..63]);
        assert_ne!(a[63] & FLAG_Y_LARGEST, b[63] & FLAG_Y_LARGEST);
        assert_eq!(BN254G2::from_compressed_bytes(&b).unwrap(), -q);
    }
}
