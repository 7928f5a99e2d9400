use crate::poly_commit::{errors::PolyComSchemeError, field_polynomial::FpPolynomial};
use ark_std::fmt::Debug;
use merlin::Transcript;
use quill_algebra::prelude::*;
use serde::{Deserialize, Serialize};

/// The trait for help serialize to bytes,
/// implement by polynomial commitment.
pub trait ToBytes {
    /// Convert to bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// The trait for homomorphic polynomial commitment or polynomial.
/// Commitments and the committed polynomials share this interface, so the
/// linearization can be built on either side with the same code.
pub trait HomomorphicPolyComElem: ToBytes {
    /// This is the scalar field of the polynomial.
    type Scalar;

    /// Get base (generator) of the group.
    fn get_base() -> Self;

    /// Get identity of the group.
    fn get_identity() -> Self;

    /// Add the underlying polynomials.
    fn add(&self, other: &Self) -> Self;

    /// Add assign the underlying polynomials.
    fn add_assign(&mut self, other: &Self);

    /// Subtract the underlying polynomials.
    fn sub(&self, other: &Self) -> Self;

    /// Subtract assign the underlying polynomials.
    fn sub_assign(&mut self, other: &Self);

    /// Multiply underlying polynomial by scalar `exp`.
    fn mul(&self, exp: &Self::Scalar) -> Self;

    /// Multiply underlying polynomial by scalar `exp`.
    fn mul_assign(&mut self, exp: &Self::Scalar);
}

/// Trait for polynomial commitment scheme.
pub trait PolyComScheme: Sized {
    /// Type of prime field.
    type Field: Domain;

    /// Type of commitment produces, need to implement `HomomorphicPolyComElem`.
    type Commitment: HomomorphicPolyComElem<Scalar = Self::Field>
        + Debug
        + PartialEq
        + Eq
        + Clone
        + Serialize
        + for<'de> Deserialize<'de>;

    /// Return the max degree of the polynomial that can be committed.
    fn max_degree(&self) -> usize;

    /// Commit to the polynomial, commitment is binding.
    fn commit(
        &self,
        polynomial: &FpPolynomial<Self::Field>,
    ) -> Result<Self::Commitment, PolyComSchemeError>;

    /// Evaluate the polynomial.
    fn eval(&self, polynomial: &FpPolynomial<Self::Field>, point: &Self::Field) -> Self::Field;

    /// Shift the commitment of `f(X)` to that of `f(X) + (1 - X^zeroing_degree) * sum blinds[i] X^i`,
    /// a polynomial taking the same values on the domain of size `zeroing_degree`.
    fn apply_blind_factors(
        &self,
        commitment: &Self::Commitment,
        blinds: &[Self::Field],
        zeroing_degree: usize,
    ) -> Self::Commitment;

    /// Compute the commitment of the quotient `(f(X) - f(x)) / (X - x)`.
    fn prove(
        &self,
        polynomial: &FpPolynomial<Self::Field>,
        point: &Self::Field,
        max_degree: usize,
    ) -> Result<Self::Commitment, PolyComSchemeError>;

    /// Verify an evaluation proof that polynomial inside commitment
    /// evaluates to `eval` on input `point`.
    fn verify(
        &self,
        commitment: &Self::Commitment,
        degree: usize,
        point: &Self::Field,
        eval: &Self::Field,
        proof: &Self::Commitment,
    ) -> Result<(), PolyComSchemeError>;

    /// Verify several opening proofs at different points with one pairing product,
    /// combining them with powers of `challenge`.
    fn batch_verify_diff_points(
        &self,
        transcript: &mut Transcript,
        commitments: &[Self::Commitment],
        degree: usize,
        points: &[Self::Field],
        evals: &[Self::Field],
        proofs: &[Self::Commitment],
        challenge: &Self::Field,
    ) -> Result<(), PolyComSchemeError>;

    /// Keep only the parameters needed by a verifier.
    fn shrink_to_verifier_only(&self) -> Self;

    /// Combine polynomials opened at the same point with powers of `challenge`
    /// and compute a single opening proof.
    fn batch_prove(
        &self,
        polynomials: &[&FpPolynomial<Self::Field>],
        point: &Self::Field,
        challenge: &Self::Field,
        max_degree: usize,
    ) -> Result<Self::Commitment, PolyComSchemeError> {
        let combined = combine_with_powers(polynomials, challenge, FpPolynomial::zero());
        self.prove(&combined, point, max_degree)
    }

    /// Combine commitments and claimed evaluations at a common point
    /// with powers of `challenge`.
    fn batch(
        &self,
        commitments: &[&Self::Commitment],
        evals: &[Self::Field],
        challenge: &Self::Field,
    ) -> (Self::Commitment, Self::Field) {
        let commitment =
            combine_with_powers(commitments, challenge, Self::Commitment::get_identity());
        let mut eval = Self::Field::zero();
        let mut multiplier = Self::Field::one();
        for e in evals.iter() {
            eval.add_assign(&e.mul(&multiplier));
            multiplier.mul_assign(challenge);
        }
        (commitment, eval)
    }
}

/// Return `sum challenge^i * elems[i]`.
fn combine_with_powers<F: Scalar, E: HomomorphicPolyComElem<Scalar = F> + Clone>(
    elems: &[&E],
    challenge: &F,
    identity: E,
) -> E {
    let mut res = identity;
    let mut multiplier = F::one();
    for elem in elems.iter() {
        res.add_assign(&elem.mul(&multiplier));
        multiplier.mul_assign(challenge);
    }
    res
}

impl<F: Scalar> ToBytes for FpPolynomial<F> {
    fn to_bytes(&self) -> Vec<u8> {
        self.coefs.iter().flat_map(|c| c.to_bytes()).collect()
    }
}

impl<F: Domain> HomomorphicPolyComElem for FpPolynomial<F> {
    type Scalar = F;

    fn get_base() -> Self {
        Self::one()
    }

    fn get_identity() -> Self {
        Self::zero()
    }

    fn add(&self, other: &Self) -> Self {
        self.add(other)
    }

    fn add_assign(&mut self, other: &Self) {
        self.add_assign(other)
    }

    fn sub(&self, other: &Self) -> Self {
        self.sub(other)
    }

    fn sub_assign(&mut self, other: &Self) {
        self.sub_assign(other)
    }

    fn mul(&self, exp: &F) -> Self {
        self.mul_scalar(exp)
    }

    fn mul_assign(&mut self, exp: &F) {
        self.mul_scalar_assign(exp)
    }
}
