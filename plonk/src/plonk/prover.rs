use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::{widget::N_NEXT_ROW_WIRES, ConstraintSystem},
    helpers::{
        hide_polynomial, pi_poly, r_poly, split_t_and_commit, t_poly, z_poly, PlonkChallenges,
    },
    indexer::{PlonkPK, PlonkPf, PlonkProof},
    transcript::{transcript_init_plonk, PlonkTranscript},
};
use crate::poly_commit::{
    evaluation_domain::EvaluationDomain, field_polynomial::FpPolynomial, pcs::PolyComScheme,
};
use ark_std::{end_timer, start_timer};
use merlin::Transcript;
use quill_algebra::prelude::*;

/// The number of blinding points of the first `N_NEXT_ROW_WIRES` wires,
/// which are opened at two points.
const HIDING_DEGREE_TWO_POINTS: usize = 2;
/// The number of blinding points of the other wires.
const HIDING_DEGREE_ONE_POINT: usize = 1;
/// The number of blinding points of z(X), opened at \zeta\omega and
/// evaluated at \zeta through the linearization.
const Z_HIDING_DEGREE: usize = 2;

/// The progress of a proof session. Every call to [`Prover::execute_round`]
/// moves one step forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProverState {
    /// Nothing has been computed.
    Initialized,
    /// The wire values and public inputs are bound to the transcript.
    WitnessComputed,
    /// The wire polynomials are committed.
    Round1,
    /// `beta` and `gamma` are derived and the grand product is committed.
    Round2,
    /// `alpha` is derived and the quotient chunks are committed.
    Round3,
    /// `zeta` is derived and the evaluations are appended.
    Round4,
    /// `v` is derived and the openings are computed.
    ProofConstructed,
}

/// A PLONK proof session for one witness.
pub struct Prover<'a, PCS: PolyComScheme, CS> {
    pcs: &'a PCS,
    lagrange_pcs: Option<&'a PCS>,
    cs: &'a CS,
    params: &'a PlonkPK<PCS>,
    witness: &'a [PCS::Field],
    state: ProverState,
    challenges: PlonkChallenges<PCS::Field>,
    extended_witness: Vec<PCS::Field>,
    pi: FpPolynomial<PCS::Field>,
    w_polys: Vec<FpPolynomial<PCS::Field>>,
    cm_w_vec: Vec<PCS::Commitment>,
    z: Option<(FpPolynomial<PCS::Field>, PCS::Commitment)>,
    t_polys: Vec<FpPolynomial<PCS::Field>>,
    cm_t_vec: Vec<PCS::Commitment>,
    w_polys_eval_zeta: Vec<PCS::Field>,
    s_polys_eval_zeta: Vec<PCS::Field>,
    z_eval_zeta_omega: PCS::Field,
    w_polys_eval_zeta_omega: Vec<PCS::Field>,
    proof: Option<PlonkPf<PCS>>,
}

impl<'a, PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>> Prover<'a, PCS, CS> {
    /// Start a session. `lagrange_pcs` is only used when its size matches the circuit.
    pub fn new(
        pcs: &'a PCS,
        lagrange_pcs: Option<&'a PCS>,
        cs: &'a CS,
        params: &'a PlonkPK<PCS>,
        witness: &'a [PCS::Field],
    ) -> Self {
        let lagrange_pcs = lagrange_pcs.filter(|p| p.max_degree() + 1 == cs.size());
        Prover {
            pcs,
            lagrange_pcs,
            cs,
            params,
            witness,
            state: ProverState::Initialized,
            challenges: PlonkChallenges::new(),
            extended_witness: vec![],
            pi: FpPolynomial::zero(),
            w_polys: vec![],
            cm_w_vec: vec![],
            z: None,
            t_polys: vec![],
            cm_t_vec: vec![],
            w_polys_eval_zeta: vec![],
            s_polys_eval_zeta: vec![],
            z_eval_zeta_omega: PCS::Field::zero(),
            w_polys_eval_zeta_omega: vec![],
            proof: None,
        }
    }

    /// Return the current state.
    pub fn state(&self) -> ProverState {
        self.state
    }

    fn domain(&self) -> &EvaluationDomain<PCS::Field> {
        &self.params.verifier_params.domain
    }

    /// Check that the witness has one value per circuit variable, then bind
    /// the circuit and the public inputs to the transcript. The gates are not
    /// evaluated here: an unsatisfying witness makes a later round fail.
    pub fn compute_witness(&mut self, transcript: &mut PlonkTranscript<PCS::Field>) -> Result<()> {
        if self.state != ProverState::Initialized {
            return Err(PlonkError::RoundOrderError);
        }
        if self.cs.is_verifier_only() {
            return Err(PlonkError::FuncParamsError);
        }
        let n = self.cs.size();
        if self.witness.len() != self.cs.num_vars() || self.domain().size != n {
            return Err(PlonkError::ProofErrorInvalidWitness);
        }

        let online_values_timer = start_timer!(|| "List the online variables");
        let online_values: Vec<PCS::Field> = self
            .cs
            .public_vars_witness_indices()
            .iter()
            .map(|index| self.witness[*index])
            .collect();
        end_timer!(online_values_timer);

        transcript_init_plonk(transcript, &self.params.verifier_params, &online_values);

        let extended_witness_and_pi_timer =
            start_timer!(|| "Prepare the extended witness and the input");
        self.extended_witness = self.cs.extend_witness(self.witness);
        self.pi = pi_poly::<PCS>(self.params, &online_values);
        end_timer!(extended_witness_and_pi_timer);

        self.state = ProverState::WitnessComputed;
        Ok(())
    }

    /// Run the next round of the protocol.
    pub fn execute_round<R: CryptoRng + RngCore>(
        &mut self,
        prng: &mut R,
        transcript: &mut PlonkTranscript<PCS::Field>,
    ) -> Result<()> {
        match self.state {
            ProverState::Initialized => Err(PlonkError::RoundOrderError),
            ProverState::WitnessComputed => self.commit_wires(prng, transcript),
            ProverState::Round1 => self.commit_grand_product(prng, transcript),
            ProverState::Round2 => self.commit_quotient(prng, transcript),
            ProverState::Round3 => self.evaluate(transcript),
            ProverState::Round4 => self.open(transcript),
            ProverState::ProofConstructed => Err(PlonkError::RoundOrderError),
        }
    }

    /// Return the proof once all the rounds have been run.
    pub fn construct_proof(&self) -> Result<PlonkPf<PCS>> {
        match (&self.state, &self.proof) {
            (ProverState::ProofConstructed, Some(proof)) => Ok(proof.clone()),
            _ => Err(PlonkError::RoundOrderError),
        }
    }

    /// Drop every round result, keeping the circuit, parameters and witness.
    pub fn reset(&mut self) {
        *self = Prover::new(
            self.pcs,
            self.lagrange_pcs,
            self.cs,
            self.params,
            self.witness,
        );
    }

    // Round 1: interpolate the wires, blind and commit them.
    fn commit_wires<R: CryptoRng + RngCore>(
        &mut self,
        prng: &mut R,
        transcript: &mut PlonkTranscript<PCS::Field>,
    ) -> Result<()> {
        let w_timer = start_timer!(|| "Round 1: witness polynomials");
        let n = self.cs.size();
        let domain = *self.domain();
        for i in 0..CS::n_wires_per_gate() {
            let this_w_timer = start_timer!(|| format!("Round 1: processing wire {}", i));
            let evals = &self.extended_witness[i * n..(i + 1) * n];
            let mut f_coefs = FpPolynomial::ifft_with_domain(&domain, evals);
            let hiding_degree = if i < N_NEXT_ROW_WIRES {
                HIDING_DEGREE_TWO_POINTS
            } else {
                HIDING_DEGREE_ONE_POINT
            };
            let blinds = hide_polynomial(prng, &mut f_coefs, hiding_degree, n);

            let cm_w = match self.lagrange_pcs {
                Some(lagrange_pcs) => {
                    let cm = lagrange_pcs
                        .commit(&FpPolynomial::from_coefs(evals.to_vec()))
                        .map_err(|_| PlonkError::CommitmentError)?;
                    self.pcs.apply_blind_factors(&cm, &blinds, n)
                }
                None => self
                    .pcs
                    .commit(&f_coefs)
                    .map_err(|_| PlonkError::CommitmentError)?,
            };
            transcript.add_commitment("wire commitment", &cm_w);
            self.w_polys.push(f_coefs);
            self.cm_w_vec.push(cm_w);
            end_timer!(this_w_timer);
        }
        end_timer!(w_timer);

        self.state = ProverState::Round1;
        Ok(())
    }

    // Round 2: derive beta and gamma, build the grand product, blind and commit it.
    fn commit_grand_product<R: CryptoRng + RngCore>(
        &mut self,
        prng: &mut R,
        transcript: &mut PlonkTranscript<PCS::Field>,
    ) -> Result<()> {
        let beta = transcript.apply_fiat_shamir("beta")?;
        let gamma = transcript.apply_fiat_shamir("gamma")?;
        self.challenges.insert_beta_gamma(beta, gamma)?;

        let z_timer = start_timer!(|| "Round 2: z polynomial");
        let n = self.cs.size();
        let z_evals = z_poly::<PCS, CS>(
            self.cs,
            self.params,
            &self.extended_witness,
            &self.challenges,
        )?;
        let mut z_coefs = FpPolynomial::ifft_with_domain(self.domain(), &z_evals);
        let blinds = hide_polynomial(prng, &mut z_coefs, Z_HIDING_DEGREE, n);

        let cm_z = match self.lagrange_pcs {
            Some(lagrange_pcs) => {
                let cm = lagrange_pcs
                    .commit(&FpPolynomial::from_coefs(z_evals))
                    .map_err(|_| PlonkError::CommitmentError)?;
                self.pcs.apply_blind_factors(&cm, &blinds, n)
            }
            None => self
                .pcs
                .commit(&z_coefs)
                .map_err(|_| PlonkError::CommitmentError)?,
        };
        transcript.add_commitment("z commitment", &cm_z);
        self.z = Some((z_coefs, cm_z));
        end_timer!(z_timer);

        self.state = ProverState::Round2;
        Ok(())
    }

    // Round 3: derive alpha, build t, split it into degree-(n+2) chunks and commit.
    fn commit_quotient<R: CryptoRng + RngCore>(
        &mut self,
        prng: &mut R,
        transcript: &mut PlonkTranscript<PCS::Field>,
    ) -> Result<()> {
        let alpha = transcript.apply_fiat_shamir("alpha")?;
        self.challenges.insert_alpha(alpha)?;

        let t_timer = start_timer!(|| "Round 3: t polynomial");
        let (z, _) = self.z.as_ref().ok_or(PlonkError::RoundOrderError)?;
        let t = t_poly::<PCS, CS>(
            self.cs,
            self.params,
            &self.w_polys,
            z,
            &self.challenges,
            &self.pi,
        )?;
        let (cm_t_vec, t_polys) = split_t_and_commit(
            prng,
            self.pcs,
            &t,
            CS::n_wires_per_gate(),
            self.cs.size() + 2,
        )?;
        for cm_t in cm_t_vec.iter() {
            transcript.add_commitment("t commitment", cm_t);
        }
        self.cm_t_vec = cm_t_vec;
        self.t_polys = t_polys;
        end_timer!(t_timer);

        self.state = ProverState::Round3;
        Ok(())
    }

    // Round 4: derive zeta and evaluate the witness and permutation polynomials
    // at \zeta, and z(X) and the first wires at \zeta\omega.
    fn evaluate(&mut self, transcript: &mut PlonkTranscript<PCS::Field>) -> Result<()> {
        let zeta = transcript.apply_fiat_shamir("zeta")?;
        self.challenges.insert_zeta(zeta)?;

        let eval_timer = start_timer!(|| "Round 4: evaluation of polynomials");
        let (z, _) = self.z.as_ref().ok_or(PlonkError::RoundOrderError)?;
        let zeta_omega = self.domain().group_gen.mul(&zeta);
        let pcs = self.pcs;

        self.w_polys_eval_zeta = self.w_polys.iter().map(|p| pcs.eval(p, &zeta)).collect();
        self.s_polys_eval_zeta = self
            .params
            .s_polys
            .iter()
            .take(CS::n_wires_per_gate() - 1)
            .map(|p| pcs.eval(p, &zeta))
            .collect();
        self.z_eval_zeta_omega = pcs.eval(z, &zeta_omega);
        self.w_polys_eval_zeta_omega = self
            .w_polys
            .iter()
            .take(N_NEXT_ROW_WIRES)
            .map(|p| pcs.eval(p, &zeta_omega))
            .collect();

        for eval in self.w_polys_eval_zeta.iter() {
            transcript.add_field_elem("wire eval zeta", eval);
        }
        for eval in self.s_polys_eval_zeta.iter() {
            transcript.add_field_elem("sigma eval zeta", eval);
        }
        transcript.add_field_elem("z eval zeta omega", &self.z_eval_zeta_omega);
        for eval in self.w_polys_eval_zeta_omega.iter() {
            transcript.add_field_elem("wire eval zeta omega", eval);
        }
        end_timer!(eval_timer);

        self.state = ProverState::Round4;
        Ok(())
    }

    // Round 5: derive v, build the linearization r(X) and open at both points.
    fn open(&mut self, transcript: &mut PlonkTranscript<PCS::Field>) -> Result<()> {
        let v = transcript.apply_fiat_shamir("v")?;
        self.challenges.insert_v(v)?;

        let r_timer = start_timer!(|| "Round 5: r polynomial and openings");
        let (z, cm_z) = self.z.as_ref().ok_or(PlonkError::RoundOrderError)?;
        let n = self.cs.size();
        let domain = self.domain();
        let zeta = *self.challenges.get_zeta()?;
        let zeta_omega = domain.group_gen.mul(&zeta);
        let z_h_eval_zeta = domain.evaluate_vanishing_polynomial(&zeta);
        let first_lagrange_eval_zeta = domain.first_lagrange_eval(&zeta);

        let r = r_poly::<PCS, CS>(
            self.cs,
            self.params,
            z,
            &self.w_polys_eval_zeta,
            &self.s_polys_eval_zeta,
            &self.z_eval_zeta_omega,
            &self.w_polys_eval_zeta_omega,
            &self.challenges,
            &self.t_polys,
            &first_lagrange_eval_zeta,
            &z_h_eval_zeta,
            n + 2,
        )?;

        let mut polys_to_open: Vec<&FpPolynomial<PCS::Field>> = self
            .w_polys
            .iter()
            .chain(
                self.params
                    .s_polys
                    .iter()
                    .take(CS::n_wires_per_gate() - 1),
            )
            .collect();
        polys_to_open.push(&r);
        let opening_witness_zeta = self
            .pcs
            .batch_prove(&polys_to_open, &zeta, &v, n + 2)
            .map_err(|_| PlonkError::ProofError)?;

        let polys_to_open: Vec<&FpPolynomial<PCS::Field>> = Some(z)
            .into_iter()
            .chain(self.w_polys.iter().take(N_NEXT_ROW_WIRES))
            .collect();
        let opening_witness_zeta_omega = self
            .pcs
            .batch_prove(&polys_to_open, &zeta_omega, &v, n + 2)
            .map_err(|_| PlonkError::ProofError)?;

        transcript.add_commitment("opening zeta", &opening_witness_zeta);
        transcript.add_commitment("opening zeta omega", &opening_witness_zeta_omega);
        let u = transcript.apply_fiat_shamir("u")?;
        self.challenges.insert_u(u)?;
        end_timer!(r_timer);

        self.proof = Some(PlonkProof {
            cm_w_vec: self.cm_w_vec.clone(),
            cm_z: cm_z.clone(),
            cm_t_vec: self.cm_t_vec.clone(),
            w_polys_eval_zeta: self.w_polys_eval_zeta.clone(),
            s_polys_eval_zeta: self.s_polys_eval_zeta.clone(),
            z_eval_zeta_omega: self.z_eval_zeta_omega,
            w_polys_eval_zeta_omega: self.w_polys_eval_zeta_omega.clone(),
            opening_witness_zeta,
            opening_witness_zeta_omega,
        });
        self.state = ProverState::ProofConstructed;
        Ok(())
    }
}

/// PLONK Prover: it produces a proof that `witness` satisfies the constraint system `cs`,
/// Proof verifier must use a transcript with same state as prover and match the public parameters,
/// It returns [PlonkError] if an error occurs in computing proof commitments, meaning parameters of the polynomial
/// commitment scheme `pcs` do not match the constraint system parameters.
/// # Example
/// ```
/// use quill_plonk::plonk::{
///     constraint_system::TurboCS,
///     verifier::verifier,
///     prover::prover,
///     indexer::indexer
/// };
/// use quill_plonk::poly_commit::kzg_poly_com::KZGCommitmentScheme;
/// use merlin::Transcript;
/// use rand_chacha::ChaChaRng;
/// use quill_algebra::{prelude::*, bn254::BN254Scalar};
///
/// let mut prng = ChaChaRng::from_seed([0u8; 32]);
/// let pcs = KZGCommitmentScheme::new(20, &mut prng);
/// let mut cs = TurboCS::new();
///
/// // circuit (x_0 + x_1);
/// let one = BN254Scalar::one();
/// let two = one.add(&one);
/// let three = two.add(&one);
/// let var_one = cs.new_variable(one);
/// let var_two = cs.new_variable(two);
/// let var_three = cs.new_variable(three);
/// cs.insert_add_gate(var_one, var_two, var_three);
/// cs.pad();
///
/// let witness = cs.get_and_clear_witness();
/// let prover_params = indexer(&cs, &pcs).unwrap();
///
/// let proof = {
///     let mut transcript = Transcript::new(b"Test");
///     prover(
///         &mut prng,
///         &mut transcript,
///         &pcs,
///         &cs,
///         &prover_params,
///         &witness,
///     )
///         .unwrap()
/// };
///
/// let mut transcript = Transcript::new(b"Test");
/// assert!(
///     verifier(&mut transcript, &pcs, &cs, &prover_params.get_verifier_params(), &[], &proof).is_ok()
/// )
/// ```
pub fn prover<
    R: CryptoRng + RngCore,
    PCS: PolyComScheme,
    CS: ConstraintSystem<Field = PCS::Field>,
>(
    prng: &mut R,
    transcript: &mut Transcript,
    pcs: &PCS,
    cs: &CS,
    params: &PlonkPK<PCS>,
    witness: &[PCS::Field],
) -> Result<PlonkPf<PCS>> {
    prover_with_lagrange(prng, transcript, pcs, None, cs, params, witness)
}

/// Prover that uses Lagrange bases
pub fn prover_with_lagrange<
    R: CryptoRng + RngCore,
    PCS: PolyComScheme,
    CS: ConstraintSystem<Field = PCS::Field>,
>(
    prng: &mut R,
    transcript: &mut Transcript,
    pcs: &PCS,
    lagrange_pcs: Option<&PCS>,
    cs: &CS,
    prover_params: &PlonkPK<PCS>,
    w: &[PCS::Field],
) -> Result<PlonkPf<PCS>> {
    let prover_timer = start_timer!(|| "TurboPlonk::Prover");
    let mut transcript = PlonkTranscript::new(transcript, cs.size());
    let mut prover = Prover::new(pcs, lagrange_pcs, cs, prover_params, w);
    prover.compute_witness(&mut transcript)?;
    while prover.state() != ProverState::ProofConstructed {
        prover.execute_round(prng, &mut transcript)?;
    }
    let proof = prover.construct_proof();
    end_timer!(prover_timer);
    proof
}
