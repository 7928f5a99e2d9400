//! The Fiat-Shamir transcript of the PLONK protocol.
//!
//! Every message of a proof session is appended under a name to a merlin
//! transcript, and challenges are squeezed from everything appended so far.
//! The prover and the verifier must append the same elements in the same order.
use crate::errors::{PlonkError, Result};
use crate::plonk::indexer::PlonkVerifierParams;
use crate::poly_commit::{pcs::ToBytes, transcript::PolyComTranscript};
use merlin::Transcript;
use quill_algebra::prelude::*;

/// A PLONK session on top of a merlin transcript: the ordered list of named
/// elements and the cache of derived challenges.
pub struct PlonkTranscript<'a, F> {
    transcript: &'a mut Transcript,
    group_order: usize,
    elements: Vec<(&'static str, Vec<u8>)>,
    challenges: Vec<(&'static str, F)>,
}

impl<'a, F: Scalar> PlonkTranscript<'a, F> {
    /// Start a session for a circuit of `group_order` constraints.
    pub fn new(transcript: &'a mut Transcript, group_order: usize) -> Self {
        PlonkTranscript {
            transcript,
            group_order,
            elements: Vec::new(),
            challenges: Vec::new(),
        }
    }

    /// Return the size of the evaluation domain the challenges must avoid.
    pub fn group_order(&self) -> usize {
        self.group_order
    }

    /// Append a named element.
    pub fn add_element(&mut self, name: &'static str, bytes: &[u8]) {
        self.transcript.append_message(name.as_bytes(), bytes);
        self.elements.push((name, bytes.to_vec()));
    }

    /// Append a named commitment.
    pub fn add_commitment<C: ToBytes>(&mut self, name: &'static str, commitment: &C) {
        self.add_element(name, &commitment.to_bytes());
    }

    /// Append a named field element.
    pub fn add_field_elem(&mut self, name: &'static str, elem: &F) {
        self.add_element(name, &elem.to_bytes());
    }

    /// Derive the challenge `name` from all the elements appended so far.
    /// Challenges that are `n`-th roots of unity are discarded and re-derived,
    /// so that the opening points never fall in the domain.
    pub fn apply_fiat_shamir(&mut self, name: &'static str) -> Result<F> {
        if self.challenges.iter().any(|(n, _)| *n == name) {
            return Err(PlonkError::ChallengeError);
        }
        loop {
            let challenge: F = self.transcript.get_challenge_field_elem(name.as_bytes());
            if challenge.pow(&[self.group_order as u64]) != F::one() {
                self.challenges.push((name, challenge));
                return Ok(challenge);
            }
        }
    }

    /// Return a challenge already derived.
    pub fn get_challenge(&self, name: &str) -> Result<F> {
        self.challenges
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
            .ok_or(PlonkError::ChallengeError)
    }

    /// Return the named elements in the order they were appended.
    pub fn elements(&self) -> &[(&'static str, Vec<u8>)] {
        &self.elements
    }

    /// Borrow the underlying merlin transcript.
    pub fn transcript_mut(&mut self) -> &mut Transcript {
        self.transcript
    }
}

/// Bind the circuit and the public inputs to the session.
pub(crate) fn transcript_init_plonk<C: ToBytes, F: Scalar>(
    transcript: &mut PlonkTranscript<F>,
    params: &PlonkVerifierParams<C, F>,
    public_inputs: &[F],
) {
    transcript.add_element("domain separator", b"PLONK");
    transcript.add_element("circuit size", &(params.cs_size as u64).to_le_bytes());
    transcript.add_element("field size", &F::get_field_size_le_bytes());
    for cm_q in params.cm_q_vec.iter() {
        transcript.add_commitment("selector", cm_q);
    }
    for cm_s in params.cm_s_vec.iter() {
        transcript.add_commitment("sigma", cm_s);
    }
    transcript.add_field_elem("root of unity", &params.domain.group_gen);
    for k in params.k.iter() {
        transcript.add_field_elem("coset constant", k);
    }
    for pi in public_inputs.iter() {
        transcript.add_field_elem("public input", pi);
    }
}

#[cfg(test)]
mod test {
    use super::PlonkTranscript;
    use crate::errors::PlonkError;
    use merlin::Transcript;
    use quill_algebra::{bn254::BN254Scalar, prelude::*};

    type F = BN254Scalar;

    fn run_session(elems: &[(&'static str, F)]) -> (F, F) {
        let mut merlin = Transcript::new(b"session");
        let mut transcript = PlonkTranscript::<F>::new(&mut merlin, 8);
        for (name, elem) in elems.iter() {
            transcript.add_field_elem(*name, elem);
        }
        let beta = transcript.apply_fiat_shamir("beta").unwrap();
        transcript.add_element("round", b"two");
        let gamma = transcript.apply_fiat_shamir("gamma").unwrap();
        (beta, gamma)
    }

    #[test]
    fn test_same_elements_same_challenges() {
        let elems = [("a", F::from(3u32)), ("b", F::from(5u32))];
        assert_eq!(run_session(&elems), run_session(&elems));

        let swapped = [("b", F::from(5u32)), ("a", F::from(3u32))];
        assert_ne!(run_session(&elems).0, run_session(&swapped).0);
    }

    #[test]
    fn test_challenge_cache() {
        let mut merlin = Transcript::new(b"session");
        let mut transcript = PlonkTranscript::<F>::new(&mut merlin, 8);
        transcript.add_element("x", &[1, 2, 3]);
        assert_eq!(
            transcript.get_challenge("alpha"),
            Err(PlonkError::ChallengeError)
        );
        let alpha = transcript.apply_fiat_shamir("alpha").unwrap();
        assert_eq!(transcript.get_challenge("alpha").unwrap(), alpha);
        assert!(transcript.apply_fiat_shamir("alpha").is_err());
        assert_ne!(alpha.pow(&[8]), F::one());
        assert_eq!(transcript.elements().len(), 1);
        assert_eq!(transcript.elements()[0], ("x", vec![1, 2, 3]));
    }
}
