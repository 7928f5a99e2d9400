use crate::bn254::{BN254PairingEngine, BN254Scalar, Fq, Fq12, Fq2, Fq6, BN254G1, BN254G2};
use crate::prelude::*;
use crate::traits::Pairing;
use digest::{consts::U64, Digest};

/// The target group of the BN254 pairing, written additively: `+` is the
/// `Fq12` product and scalar multiplication is exponentiation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BN254Gt(pub(crate) Fq12);

impl Default for BN254Gt {
    fn default() -> Self {
        Self::get_identity()
    }
}

impl Neg for BN254Gt {
    type Output = Self;

    /// Pairing outputs are unitary, so the inverse is the conjugate.
    fn neg(self) -> Self::Output {
        Self(self.0.conjugate())
    }
}

impl<'a> Add<&'a BN254Gt> for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn add(self, rhs: &'a BN254Gt) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl<'a> Sub<&'a BN254Gt> for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn sub(self, rhs: &'a BN254Gt) -> Self::Output {
        Self(self.0 * &rhs.0.conjugate())
    }
}

impl<'a> MulAssign<&'a BN254Scalar> for BN254Gt {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a BN254Scalar) {
        *self = *self * rhs;
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn mul(self, rhs: &'a BN254Scalar) -> Self::Output {
        Self(self.0.cyclotomic_exp(rhs.0.into_raw()))
    }
}

impl<'a> AddAssign<&'a BN254Gt> for BN254Gt {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BN254Gt) {
        self.0 *= &rhs.0;
    }
}

impl<'a> SubAssign<&'a BN254Gt> for BN254Gt {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BN254Gt) {
        self.0 *= &rhs.0.conjugate();
    }
}

fn fq12_coefficients(v: &Fq12) -> [Fq; 12] {
    let mut out = [Fq::zero(); 12];
    let fq6 = [v.c0, v.c1];
    for (i, c) in fq6.iter().enumerate() {
        for (j, e) in [c.c0, c.c1, c.c2].iter().enumerate() {
            out[6 * i + 2 * j] = e.c0;
            out[6 * i + 2 * j + 1] = e.c1;
        }
    }
    out
}

fn fq12_from_coefficients(c: &[Fq; 12]) -> Fq12 {
    let fq2 = |i: usize| Fq2::new(c[i], c[i + 1]);
    Fq12::new(
        Fq6::new(fq2(0), fq2(2), fq2(4)),
        Fq6::new(fq2(6), fq2(8), fq2(10)),
    )
}

impl Group for BN254Gt {
    type ScalarType = BN254Scalar;

    const COMPRESSED_LEN: usize = 384;
    const UNCOMPRESSED_LEN: usize = 384;

    #[inline]
    fn double(&self) -> Self {
        Self(self.0.square())
    }

    #[inline]
    fn get_identity() -> Self {
        Self(Fq12::one())
    }

    #[inline]
    fn get_base() -> Self {
        BN254PairingEngine::pairing(&BN254G1::get_base(), &BN254G2::get_base())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self::get_base() * &BN254Scalar::random(prng)
    }

    /// The twelve base field coefficients in little-endian order.
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::COMPRESSED_LEN);
        for c in fq12_coefficients(&self.0).iter() {
            buf.extend_from_slice(&c.to_bytes_le());
        }
        buf
    }

    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::COMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let mut coefficients = [Fq::zero(); 12];
        for (c, chunk) in coefficients.iter_mut().zip(bytes.chunks(32)) {
            *c = Fq::from_bytes_le(chunk)?;
        }
        let v = fq12_from_coefficients(&coefficients);
        if v.is_zero() {
            return Err(AlgebraError::DeserializationError);
        }
        Ok(Self(v))
    }

    #[inline]
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    #[inline]
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_compressed_bytes(bytes)
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

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha512;

    #[test]
    fn group_law_in_multiplicative_notation() {
        let mut prng = test_rng();
        let a = BN254Gt::random(&mut prng);
        let b = BN254Gt::random(&mut prng);
        assert_eq!((a + &b) - &b, a);
        assert_eq!(a + &(-a), BN254Gt::get_identity());
        assert_eq!(a.double(), a + &a);
        assert_eq!(a * &BN254Scalar::from(3u32), a + &a + &a);
        assert_eq!(a * &BN254Scalar::zero(), BN254Gt::get_identity());
    }

    #[test]
    fn encoding_rejects_zero_and_bad_lengths() {
        let zero = vec![0u8; 384];
        assert!(BN254Gt::from_compressed_bytes(&zero).is_err());
        assert!(BN254Gt::from_compressed_bytes(&zero[..383]).is_err());

        let one = BN254Gt::get_identity().to_compressed_bytes();
        assert_eq!(one[0], 1);
        assert_eq!(BN254Gt::from_unchecked_bytes(&one).unwrap(), BN254Gt::get_identity());
    }

    #[test]
    fn from_hash_is_deterministic() {
        use digest::Digest;
        let mut h1 = Sha512::new();
        h1.update(b"gt");
        let mut h2 = Sha512::new();
        h2.update(b"gt");
        assert_eq!(BN254Gt::from_hash(h1), BN254Gt::from_hash(h2));
    }
}
