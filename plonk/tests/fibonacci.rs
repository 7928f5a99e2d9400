use merlin::Transcript;
use quill_algebra::{bn254::BN254Scalar, prelude::*};
use quill_plonk::errors::PlonkError;
use quill_plonk::plonk::{
    constraint_system::{ConstraintSystem, TurboCS, VarIndex},
    indexer::indexer,
    prover::prover,
    verifier::verifier,
};
use quill_plonk::poly_commit::kzg_poly_com::KZGCommitmentScheme;

type F = BN254Scalar;

const N_STEPS: usize = 17;

/// Build `c = a + b` repeated `N_STEPS` times from `a = b = 1` and
/// expose the last derived value.
fn fibonacci_circuit() -> (TurboCS<F>, Vec<VarIndex>) {
    let mut cs = TurboCS::new();
    let mut a = cs.new_variable(F::one());
    let mut b = cs.new_variable(F::one());
    let mut derived = Vec::with_capacity(N_STEPS);
    for _ in 0..N_STEPS {
        let c = cs.add(a, b);
        derived.push(c);
        a = b;
        b = c;
    }
    cs.prepare_pi_variable(derived[N_STEPS - 1]);
    cs.pad();
    (cs, derived)
}

#[test]
fn test_fibonacci() {
    let (mut cs, derived) = fibonacci_circuit();
    assert_eq!(cs.witness[derived[0]], F::from(2u32));
    assert_eq!(cs.witness[derived[15]], F::from(2584u32));
    assert_eq!(cs.witness[derived[16]], F::from(4181u32));

    let witness = cs.get_and_clear_witness();
    let online_vars = [F::from(4181u32)];
    assert!(cs.verify_witness(&witness, &online_vars).is_ok());
    assert!(cs.verify_witness(&witness, &[F::from(4180u32)]).is_err());

    let mut prng = test_rng();
    let pcs = KZGCommitmentScheme::new(cs.size() + 2, &mut prng);
    let prover_params = indexer(&cs, &pcs).unwrap();

    let mut transcript = Transcript::new(b"Fibonacci");
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
    let mut transcript = Transcript::new(b"Fibonacci");
    assert!(verifier(
        &mut transcript,
        &pcs,
        &verifier_cs,
        &prover_params.verifier_params,
        &online_vars,
        &proof,
    )
    .is_ok());

    let mut transcript = Transcript::new(b"Fibonacci");
    assert!(verifier(
        &mut transcript,
        &pcs,
        &verifier_cs,
        &prover_params.verifier_params,
        &[F::from(2584u32)],
        &proof,
    )
    .is_err());
}

#[test]
fn test_flipped_wire_is_rejected() {
    let (mut cs, derived) = fibonacci_circuit();
    let mut witness = cs.get_and_clear_witness();
    witness[derived[7]] = witness[derived[7]].add(&F::one());
    let online_vars = [F::from(4181u32)];
    assert!(cs.verify_witness(&witness, &online_vars).is_err());

    let mut prng = test_rng();
    let pcs = KZGCommitmentScheme::new(cs.size() + 2, &mut prng);
    let prover_params = indexer(&cs, &pcs).unwrap();

    // The quotient of an unsatisfied circuit is not a polynomial of the expected
    // degree, so its last chunk exceeds the reference string.
    let mut transcript = Transcript::new(b"Fibonacci");
    match prover(
        &mut prng,
        &mut transcript,
        &pcs,
        &cs,
        &prover_params,
        &witness,
    ) {
        Err(e) => assert_eq!(e, PlonkError::CommitmentError),
        Ok(proof) => {
            let mut transcript = Transcript::new(b"Fibonacci");
            assert_eq!(
                verifier(
                    &mut transcript,
                    &pcs,
                    &cs,
                    &prover_params.verifier_params,
                    &online_vars,
                    &proof,
                ),
                Err(PlonkError::VerificationError)
            );
        }
    }
}
