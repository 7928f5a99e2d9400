use crate::poly_commit::pcs::ToBytes;
use merlin::Transcript;
use quill_algebra::prelude::*;
use rand_chacha::ChaChaRng;

/// The trait for polynomial commitment transcript.
pub trait PolyComTranscript {
    /// Append the commitment to the transcript.
    fn append_commitment<C: ToBytes>(&mut self, label: &'static [u8], commitment: &C);

    /// Append the field to the transcript.
    fn append_field_elem<F: Scalar>(&mut self, label: &'static [u8], point: &F);

    /// Get challenge result.
    fn get_challenge_field_elem<F: Scalar>(&mut self, label: &'static [u8]) -> F;
}

impl PolyComTranscript for Transcript {
    fn append_commitment<C: ToBytes>(&mut self, label: &'static [u8], commitment: &C) {
        self.append_message(label, &commitment.to_bytes());
    }

    fn append_field_elem<F: Scalar>(&mut self, label: &'static [u8], field_elem: &F) {
        self.append_message(label, &field_elem.to_bytes());
    }

    fn get_challenge_field_elem<F: Scalar>(&mut self, label: &'static [u8]) -> F {
        let mut buff = [0u8; 32];
        self.challenge_bytes(label, &mut buff[..]);
        F::random(&mut ChaChaRng::from_seed(buff))
    }
}
