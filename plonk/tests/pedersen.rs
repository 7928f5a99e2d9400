use merlin::Transcript;
use quill_algebra::{bn254::BN254Scalar, prelude::*};
use quill_plonk::plonk::{
    constraint_system::{pedersen::PedersenGens, ConstraintSystem, TurboCS},
    indexer::indexer,
    prover::prover,
    verifier::verifier,
};
use quill_plonk::poly_commit::kzg_poly_com::KZGCommitmentScheme;

type F = BN254Scalar;

#[test]
fn test_pedersen_compression() {
    let mut prng = test_rng();
    let gens = PedersenGens::new();
    let left = F::random(&mut prng);
    let right = F::from(0xdead_beef_u64);
    let expected = gens.compress(&left, &right);
    assert_eq!(expected, gens.commit(&left, &right).get_x());
    assert_ne!(expected, gens.compress(&right, &left));

    let mut cs = TurboCS::new();
    let left_var = cs.new_variable(left);
    let right_var = cs.new_variable(right);
    let out_var = cs.pedersen_compress(&gens, left_var, right_var);
    assert_eq!(cs.witness[out_var], expected);
    cs.prepare_pi_variable(out_var);
    cs.pad();

    let witness = cs.get_and_clear_witness();
    assert!(cs.verify_witness(&witness, &[expected]).is_ok());

    let pcs = KZGCommitmentScheme::new(cs.size() + 2, &mut prng);
    let prover_params = indexer(&cs, &pcs).unwrap();

    let mut transcript = Transcript::new(b"Pedersen");
    let proof = prover(
        &mut prng,
        &mut transcript,
        &pcs,
        &cs,
        &prover_params,
        &witness,
    )
    .unwrap();

    let verifier_cs = cs.shrink_to_verifier_only();
    let verifier_params = prover_params.get_verifier_params();
    let mut transcript = Transcript::new(b"Pedersen");
    assert!(verifier(
        &mut transcript,
        &pcs,
        &verifier_cs,
        &verifier_params,
        &[expected],
        &proof,
    )
    .is_ok());
}

#[test]
fn test_pedersen_compression_of_zero() {
    let gens = PedersenGens::new();
    let zero = F::zero();
    let one = F::one();

    let mut cs = TurboCS::new();
    let zero_var = cs.new_variable(zero);
    let one_var = cs.new_variable(one);
    let out_var = cs.pedersen_compress(&gens, zero_var, one_var);
    assert_eq!(cs.witness[out_var], gens.compress(&zero, &one));
    assert_eq!(cs.witness[out_var], gens.generators()[1].get_x());

    let witness = cs.get_and_clear_witness();
    assert!(cs.verify_witness(&witness, &[]).is_ok());
}
