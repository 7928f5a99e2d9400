use criterion::{criterion_group, criterion_main, Criterion};
use merlin::Transcript;
use quill_algebra::{bn254::BN254Scalar, prelude::*};
use quill_plonk::plonk::constraint_system::{
    merkle::MerkleTree, pedersen::PedersenGens, ConstraintSystem, TurboCS,
};
use quill_plonk::plonk::indexer::indexer;
use quill_plonk::plonk::prover::prover;
use quill_plonk::plonk::verifier::verifier;
use quill_plonk::poly_commit::kzg_poly_com::KZGCommitmentScheme;

fn bench_verifier(c: &mut Criterion) {
    let mut prng = test_rng();
    let gens = PedersenGens::new();

    let mut tree = MerkleTree::new(&gens, 2);
    for i in 0..4u64 {
        tree.add_leaf(&gens, BN254Scalar::from(i + 1)).unwrap();
    }
    let path = tree.path(2).unwrap();

    let mut cs = TurboCS::new();
    let leaf_var = cs.new_variable(BN254Scalar::from(3u64));
    let root_var = cs.new_variable(tree.root());
    let path_vars = cs.add_merkle_path_variables(&path);
    let is_member = cs.check_merkle_membership(&gens, leaf_var, &path_vars, root_var);
    cs.insert_constant_gate(is_member, BN254Scalar::one());
    cs.prepare_pi_variable(root_var);
    cs.pad();

    let witness = cs.get_and_clear_witness();
    cs.verify_witness(&witness, &[tree.root()]).unwrap();

    let pcs = KZGCommitmentScheme::new(cs.size() + 3, &mut prng);
    let prover_params = indexer(&cs, &pcs).unwrap();
    let verifier_params_ref = &prover_params.verifier_params;

    let mut transcript = Transcript::new(b"TestTurboPlonk");
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
    let online_vars = [tree.root()];

    let mut verifier_group = c.benchmark_group("bench_verifier");
    verifier_group.bench_function("verifier".to_string(), |b| {
        b.iter(|| {
            let mut transcript = Transcript::new(b"TestTurboPlonk");
            verifier(
                &mut transcript,
                &pcs,
                &verifier_cs,
                verifier_params_ref,
                &online_vars,
                &proof,
            )
            .unwrap()
        })
    });
    verifier_group.finish();
}

criterion_group!(benches, bench_verifier);
criterion_main!(benches);
