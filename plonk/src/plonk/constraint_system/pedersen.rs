//! Pedersen compression of two field elements over Baby Jubjub.
//!
//! `compress(a, b)` is the x-coordinate of `a * G0 + b * G1`, where `a` and `b`
//! are read as 254-bit integers and the generators are fixed.
use crate::plonk::constraint_system::{ecc::compute_base_multiples, TurboCS, VarIndex};
use quill_algebra::{bn254::BN254Scalar, ed_on_bn254::BabyJubjubPoint, prelude::*};
use rand_chacha::ChaChaRng;

type F = BN254Scalar;

/// The number of bits of a compressed input.
pub const PEDERSEN_INPUT_BITS: usize = 254;

const GENERATORS_SEED: [u8; 32] = *b"quill pedersen compression gens.";

/// The two generators of the compression function, with their window tables.
pub struct PedersenGens {
    generators: [BabyJubjubPoint; 2],
    tables: [[Vec<BabyJubjubPoint>; 3]; 2],
}

impl Default for PedersenGens {
    fn default() -> Self {
        Self::new()
    }
}

impl PedersenGens {
    /// Derive the generators deterministically in the prime-order subgroup.
    pub fn new() -> Self {
        let mut prng = ChaChaRng::from_seed(GENERATORS_SEED);
        let g0 = BabyJubjubPoint::random(&mut prng);
        let g1 = BabyJubjubPoint::random(&mut prng);
        let half = PEDERSEN_INPUT_BITS / 2;
        PedersenGens {
            generators: [g0, g1],
            tables: [
                compute_base_multiples(g0, half),
                compute_base_multiples(g1, half),
            ],
        }
    }

    /// Return the generators.
    pub fn generators(&self) -> &[BabyJubjubPoint; 2] {
        &self.generators
    }

    /// Compute `a * G0 + b * G1`.
    pub fn commit(&self, a: &F, b: &F) -> BabyJubjubPoint {
        self.generators[0]
            .mul_by_fr(a)
            .add(&self.generators[1].mul_by_fr(b))
    }

    /// Compress two field elements into one.
    pub fn compress(&self, a: &F, b: &F) -> F {
        self.commit(a, b).get_x()
    }
}

impl TurboCS<F> {
    /// Return a variable holding `compress(witness[a], witness[b])`.
    pub fn pedersen_compress(
        &mut self,
        gens: &PedersenGens,
        a_var: VarIndex,
        b_var: VarIndex,
    ) -> VarIndex {
        let mut terms = vec![];
        for (var, table) in [a_var, b_var].iter().zip(gens.tables.iter()) {
            let bits = self.decompose_into_bits(*var, PEDERSEN_INPUT_BITS);
            let point_var =
                self.const_base_scalar_mul_with_bases(&table[0], &table[1], &table[2], &bits);
            let point = BabyJubjubPoint::new(
                &self.witness[point_var.get_x()],
                &self.witness[point_var.get_y()],
            );
            terms.push((point_var, point));
        }
        let sum = self.ecc_add(&terms[0].0, &terms[1].0, &terms[0].1, &terms[1].1);
        sum.get_var().get_x()
    }
}
