use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::{widget::N_NEXT_ROW_WIRES, ConstraintSystem},
    helpers::{eval_pi_poly, r_commitment, r_eval_zeta, PlonkChallenges},
    indexer::{PlonkPf, PlonkVK},
    transcript::{transcript_init_plonk, PlonkTranscript},
};
use crate::poly_commit::pcs::PolyComScheme;
use ark_std::{end_timer, start_timer};
use merlin::Transcript;
use quill_algebra::prelude::*;

/// Verify a proof. Any failure, malformed proof or wrong public inputs
/// included, is reported as [`PlonkError::VerificationError`].
pub fn verifier<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    transcript: &mut Transcript,
    pcs: &PCS,
    cs: &CS,
    verifier_params: &PlonkVK<PCS>,
    pi: &[PCS::Field],
    proof: &PlonkPf<PCS>,
) -> Result<()> {
    let verifier_timer = start_timer!(|| "TurboPlonk::Verifier");
    let res = verify_proof(transcript, pcs, cs, verifier_params, pi, proof)
        .map_err(|_| PlonkError::VerificationError);
    end_timer!(verifier_timer);
    res
}

fn verify_proof<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    transcript: &mut Transcript,
    pcs: &PCS,
    cs: &CS,
    verifier_params: &PlonkVK<PCS>,
    pi: &[PCS::Field],
    proof: &PlonkPf<PCS>,
) -> Result<()> {
    check_proof_shape::<PCS, CS>(verifier_params, pi, proof)?;
    let n = verifier_params.cs_size;
    let domain = &verifier_params.domain;

    let mut transcript = PlonkTranscript::new(transcript, n);
    transcript_init_plonk(&mut transcript, verifier_params, pi);

    // 1. compute all challenges such as beta, gamma, alpha, zeta, v and u.
    let challenges = compute_challenges::<PCS>(&mut transcript, proof)?;
    let zeta = *challenges.get_zeta()?;
    let v = challenges.get_v()?;

    // 2. compute Z_h(\zeta) and L_1(\zeta).
    let z_h_eval_zeta = domain.evaluate_vanishing_polynomial(&zeta);
    let first_lagrange_eval_zeta = domain.first_lagrange_eval(&zeta);

    // 3. compute PI(\zeta).
    let pi_eval_zeta = eval_pi_poly::<PCS>(verifier_params, pi, &z_h_eval_zeta, &zeta)?;

    // 4. derive the linearization polynomial commitment and its evaluation.
    let r_eval_zeta =
        r_eval_zeta::<PCS>(proof, &challenges, &pi_eval_zeta, &first_lagrange_eval_zeta)?;
    let cm_r = r_commitment::<PCS, CS>(
        cs,
        verifier_params,
        proof,
        &challenges,
        &first_lagrange_eval_zeta,
        &z_h_eval_zeta,
        n + 2,
    )?;

    // 5. verify opening proofs.
    let mut commitments: Vec<&PCS::Commitment> = proof
        .cm_w_vec
        .iter()
        .chain(
            verifier_params
                .cm_s_vec
                .iter()
                .take(CS::n_wires_per_gate() - 1),
        )
        .collect();
    commitments.push(&cm_r);

    let mut values: Vec<PCS::Field> = proof
        .w_polys_eval_zeta
        .iter()
        .chain(proof.s_polys_eval_zeta.iter())
        .cloned()
        .collect();
    values.push(r_eval_zeta);

    let zeta_omega = zeta.mul(&domain.group_gen);
    let (comm, val) = pcs.batch(&commitments, &values, v);

    let commitments_omega: Vec<&PCS::Commitment> = Some(&proof.cm_z)
        .into_iter()
        .chain(proof.cm_w_vec.iter().take(N_NEXT_ROW_WIRES))
        .collect();
    let values_omega: Vec<PCS::Field> = Some(&proof.z_eval_zeta_omega)
        .into_iter()
        .chain(proof.w_polys_eval_zeta_omega.iter())
        .cloned()
        .collect();
    let (comm_omega, val_omega) = pcs.batch(&commitments_omega, &values_omega, v);

    pcs.batch_verify_diff_points(
        transcript.transcript_mut(),
        &[comm, comm_omega],
        n + 2,
        &[zeta, zeta_omega],
        &[val, val_omega],
        &[
            proof.opening_witness_zeta.clone(),
            proof.opening_witness_zeta_omega.clone(),
        ],
        challenges.get_u()?,
    )
    .map_err(|_| PlonkError::VerificationError)
}

fn check_proof_shape<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    verifier_params: &PlonkVK<PCS>,
    pi: &[PCS::Field],
    proof: &PlonkPf<PCS>,
) -> Result<()> {
    let n_wires_per_gate = CS::n_wires_per_gate();
    if proof.cm_w_vec.len() != n_wires_per_gate
        || proof.cm_t_vec.len() != n_wires_per_gate
        || proof.w_polys_eval_zeta.len() != n_wires_per_gate
        || proof.s_polys_eval_zeta.len() + 1 != n_wires_per_gate
        || proof.w_polys_eval_zeta_omega.len() != N_NEXT_ROW_WIRES
        || verifier_params.cm_s_vec.len() != n_wires_per_gate
        || verifier_params.k.len() != n_wires_per_gate
        || pi.len() != verifier_params.public_vars_constraint_indices.len()
    {
        return Err(PlonkError::VerificationError);
    }
    Ok(())
}

/// Replay the prover's transcript and derive every challenge.
fn compute_challenges<PCS: PolyComScheme>(
    transcript: &mut PlonkTranscript<PCS::Field>,
    proof: &PlonkPf<PCS>,
) -> Result<PlonkChallenges<PCS::Field>> {
    let mut challenges = PlonkChallenges::new();

    // 1. compute beta and gamma challenges.
    for cm_w in proof.cm_w_vec.iter() {
        transcript.add_commitment("wire commitment", cm_w);
    }
    let beta = transcript.apply_fiat_shamir("beta")?;
    let gamma = transcript.apply_fiat_shamir("gamma")?;
    challenges.insert_beta_gamma(beta, gamma)?;

    // 2. compute alpha challenge.
    transcript.add_commitment("z commitment", &proof.cm_z);
    let alpha = transcript.apply_fiat_shamir("alpha")?;
    challenges.insert_alpha(alpha)?;

    // 3. compute zeta challenge.
    for cm_t in proof.cm_t_vec.iter() {
        transcript.add_commitment("t commitment", cm_t);
    }
    let zeta = transcript.apply_fiat_shamir("zeta")?;
    challenges.insert_zeta(zeta)?;

    // 4. compute v challenge.
    for eval in proof.w_polys_eval_zeta.iter() {
        transcript.add_field_elem("wire eval zeta", eval);
    }
    for eval in proof.s_polys_eval_zeta.iter() {
        transcript.add_field_elem("sigma eval zeta", eval);
    }
    transcript.add_field_elem("z eval zeta omega", &proof.z_eval_zeta_omega);
    for eval in proof.w_polys_eval_zeta_omega.iter() {
        transcript.add_field_elem("wire eval zeta omega", eval);
    }
    let v = transcript.apply_fiat_shamir("v")?;
    challenges.insert_v(v)?;

    // 5. compute u challenge.
    transcript.add_commitment("opening zeta", &proof.opening_witness_zeta);
    transcript.add_commitment("opening zeta omega", &proof.opening_witness_zeta_omega);
    let u = transcript.apply_fiat_shamir("u")?;
    challenges.insert_u(u)?;

    Ok(challenges)
}
