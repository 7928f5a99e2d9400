use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::{
        widget::{N_ALPHA_POWERS, N_NEXT_ROW_WIRES},
        ConstraintSystem,
    },
    indexer::{encode_perm_to_group, PlonkPK, PlonkPf, PlonkVK},
};
use crate::poly_commit::{
    evaluation_domain::{batch_inversion, powers, EvaluationDomain},
    field_polynomial::FpPolynomial,
    pcs::{HomomorphicPolyComElem, PolyComScheme},
};
use ark_std::cmp::min;
use quill_algebra::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The data structure for challenges in Plonk.
#[derive(Default)]
pub(super) struct PlonkChallenges<F> {
    challenges: Vec<F>,
}

impl<F: Scalar> PlonkChallenges<F> {
    /// Create a challenges with capacity 6.
    pub(super) fn new() -> PlonkChallenges<F> {
        PlonkChallenges {
            challenges: Vec::with_capacity(6),
        }
    }

    /// Insert beta and gamma.
    pub(super) fn insert_beta_gamma(&mut self, beta: F, gamma: F) -> Result<()> {
        if self.challenges.is_empty() {
            self.challenges.push(beta);
            self.challenges.push(gamma);
            Ok(())
        } else {
            Err(PlonkError::ChallengeError)
        }
    }

    /// Insert alpha.
    pub(super) fn insert_alpha(&mut self, alpha: F) -> Result<()> {
        self.insert_at(2, alpha)
    }

    /// Insert zeta.
    pub(super) fn insert_zeta(&mut self, zeta: F) -> Result<()> {
        self.insert_at(3, zeta)
    }

    /// Insert v.
    pub(super) fn insert_v(&mut self, v: F) -> Result<()> {
        self.insert_at(4, v)
    }

    /// Insert u.
    pub(super) fn insert_u(&mut self, u: F) -> Result<()> {
        self.insert_at(5, u)
    }

    fn insert_at(&mut self, index: usize, challenge: F) -> Result<()> {
        if self.challenges.len() == index {
            self.challenges.push(challenge);
            Ok(())
        } else {
            Err(PlonkError::ChallengeError)
        }
    }

    fn get(&self, index: usize) -> Result<&F> {
        self.challenges
            .get(index)
            .ok_or(PlonkError::ChallengeError)
    }

    /// Return beta and gamma.
    pub(super) fn get_beta_gamma(&self) -> Result<(&F, &F)> {
        Ok((self.get(0)?, self.get(1)?))
    }

    /// Return alpha.
    pub(super) fn get_alpha(&self) -> Result<&F> {
        self.get(2)
    }

    /// Return zeta.
    pub(super) fn get_zeta(&self) -> Result<&F> {
        self.get(3)
    }

    /// Return v.
    pub(super) fn get_v(&self) -> Result<&F> {
        self.get(4)
    }

    /// Return u.
    pub(super) fn get_u(&self) -> Result<&F> {
        self.get(5)
    }

    /// Return `[1, alpha, ..., alpha^{N_ALPHA_POWERS - 1}]`.
    pub(super) fn get_alpha_powers(&self) -> Result<Vec<F>> {
        Ok(powers(self.get_alpha()?, N_ALPHA_POWERS))
    }
}

/// Return the PI polynomial.
pub(super) fn pi_poly<PCS: PolyComScheme>(
    prover_params: &PlonkPK<PCS>,
    pi: &[PCS::Field],
) -> FpPolynomial<PCS::Field> {
    let verifier_params = &prover_params.verifier_params;
    let mut evals = vec![PCS::Field::zero(); verifier_params.cs_size];
    for (index, value) in verifier_params
        .public_vars_constraint_indices
        .iter()
        .zip(pi.iter())
    {
        evals[*index] = *value;
    }
    FpPolynomial::ifft_with_domain(&verifier_params.domain, &evals)
}

/// Add a random degree `num_hide_points`+`zeroing_degree` polynomial
/// that vanishes on X^{zeroing_degree} -1. Goal is to randomize
/// `polynomial` maintaining output values for elements in a sub group
/// of order N. Eg, when num_hide_points is 1, then it adds
/// (r1 + r2*X) * (X^zeroing_degree - 1) to `polynomial.
pub(super) fn hide_polynomial<R: CryptoRng + RngCore, F: Scalar>(
    prng: &mut R,
    polynomial: &mut FpPolynomial<F>,
    num_hide_points: usize,
    zeroing_degree: usize,
) -> Vec<F> {
    let mut blinds = Vec::new();
    for i in 0..num_hide_points + 1 {
        let mut blind = F::random(prng);
        blinds.push(blind);
        polynomial.add_coef_assign(&blind, i);
        blind = blind.neg();
        polynomial.add_coef_assign(&blind, zeroing_degree + i);
    }
    blinds
}

/// Build the evaluations of the z polynomial over the domain:
/// z(\omega^{i+1}) = z(\omega^i)\prod_{j=1}^{n_wires_per_gate}(fj(\omega^i)
/// + \beta * k_j * \omega^i +\gamma)/(fj(\omega^i) + \beta * perm_j(\omega^i) +\gamma)
/// and setting z(1) = 1 for the base case
pub(super) fn z_poly<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    prover_params: &PlonkPK<PCS>,
    w: &[PCS::Field],
    challenges: &PlonkChallenges<PCS::Field>,
) -> Result<Vec<PCS::Field>> {
    let n_wires_per_gate = CS::n_wires_per_gate();
    let n = cs.size();
    if w.len() != n_wires_per_gate * n {
        return Err(PlonkError::FuncParamsError);
    }
    let (beta, gamma) = challenges.get_beta_gamma()?;
    let k = &prover_params.verifier_params.k;
    let group = prover_params.verifier_params.domain.elements();
    let perm = encode_perm_to_group(&group, &cs.compute_permutation()?, k);

    // 1. numerator = prod_{j=1..n_wires_per_gate}(fj(\omega^i) + \beta * k_j * \omega^i + \gamma)
    // 2. denominator = prod_{j=1..n_wires_per_gate}(fj(\omega^i) + \beta * permj(\omega^i) +\gamma)
    let mut numerators = vec![PCS::Field::one(); n];
    let mut denominators = vec![PCS::Field::one(); n];
    for j in 0..n_wires_per_gate {
        let beta_k = beta.mul(&k[j]);
        for i in 0..n {
            let f_plus_gamma = w[j * n + i].add(gamma);
            numerators[i].mul_assign(&f_plus_gamma.add(&beta_k.mul(&group[i])));
            denominators[i].mul_assign(&f_plus_gamma.add(&beta.mul(&perm[j * n + i])));
        }
    }
    if denominators.iter().any(|d| d.is_zero()) {
        return Err(PlonkError::DivisionByZero);
    }
    batch_inversion(&mut denominators);

    // z(\omega^{i+1}) = z(\omega^i) * numerator_i / denominator_i
    let mut z_evals = Vec::with_capacity(n);
    let mut prev = PCS::Field::one();
    z_evals.push(prev);
    for i in 0..n - 1 {
        prev.mul_assign(&numerators[i].mul(&denominators[i]));
        z_evals.push(prev);
    }
    Ok(z_evals)
}

/// Compute the t polynomial over the coset of the quotient domain.
pub(super) fn t_poly<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    prover_params: &PlonkPK<PCS>,
    w_polys: &[FpPolynomial<PCS::Field>],
    z: &FpPolynomial<PCS::Field>,
    challenges: &PlonkChallenges<PCS::Field>,
    pi: &FpPolynomial<PCS::Field>,
) -> Result<FpPolynomial<PCS::Field>> {
    let n = cs.size();
    let m = cs.quot_eval_dom_size();
    let factor = m / n;
    if n * factor != m || prover_params.domain_m.size != m {
        return Err(PlonkError::SetupError);
    }
    let domain_m = &prover_params.domain_m;
    let k = &prover_params.verifier_params.k;

    // Compute the evaluations of w/pi/z polynomials on the coset g * <root_m>.
    let w_polys_coset_evals: Vec<Vec<PCS::Field>> = w_polys
        .iter()
        .map(|poly| poly.coset_fft_with_domain(domain_m))
        .collect();
    let pi_coset_evals = pi.coset_fft_with_domain(domain_m);
    let z_coset_evals = z.coset_fft_with_domain(domain_m);
    let mut coset_points = domain_m.elements();
    for point in coset_points.iter_mut() {
        point.mul_assign(&domain_m.generator);
    }

    let (beta, gamma) = challenges.get_beta_gamma()?;
    let alpha = challenges.get_alpha()?;
    let alpha_sq = alpha.mul(alpha);
    let alpha_pows = challenges.get_alpha_powers()?;
    let one = PCS::Field::one();
    let q_coset_evals = &prover_params.q_coset_evals;
    let s_coset_evals = &prover_params.s_coset_evals;
    let l1_coset_evals = &prover_params.l1_coset_evals;
    let z_h_inv_coset_evals = &prover_params.z_h_inv_coset_evals;

    let eval_point = |point: usize| -> Result<PCS::Field> {
        let next = (point + factor) % m;
        let w_vals: Vec<PCS::Field> = w_polys_coset_evals.iter().map(|e| e[point]).collect();
        let w_vals_next: Vec<PCS::Field> = w_polys_coset_evals.iter().map(|e| e[next]).collect();
        let q_vals: Vec<PCS::Field> = q_coset_evals.iter().map(|e| e[point]).collect();
        // sum of the widgets' identities, plus PI
        let term1 =
            cs.eval_gate_func(&w_vals, &w_vals_next, &q_vals, &pi_coset_evals[point], &alpha_pows)?;

        // alpha * [z(X)\prod_j (fj(X) + beta * kj * X + gamma)]
        let mut term2 = alpha.mul(&z_coset_evals[point]);
        for (w_val, k_j) in w_vals.iter().zip(k.iter()) {
            term2.mul_assign(&w_val.add(gamma).add(&beta.mul(&k_j.mul(&coset_points[point]))));
        }

        // alpha * [z(\omega * X)\prod_j (fj(X) + beta * perm_j(X) + gamma)]
        let mut term3 = alpha.mul(&z_coset_evals[next]);
        for (w_val, s_evals) in w_vals.iter().zip(s_coset_evals.iter()) {
            term3.mul_assign(&w_val.add(gamma).add(&beta.mul(&s_evals[point])));
        }

        // alpha^2 * (z(X) - 1) * L_1(X)
        let term4 = alpha_sq
            .mul(&l1_coset_evals[point])
            .mul(&z_coset_evals[point].sub(&one));

        let numerator = term1.add(&term2).add(&term4).sub(&term3);
        Ok(numerator.mul(&z_h_inv_coset_evals[point]))
    };

    #[cfg(feature = "parallel")]
    let t_coset_evals = (0..m)
        .into_par_iter()
        .map(eval_point)
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let t_coset_evals = (0..m).map(eval_point).collect::<Result<Vec<_>>>()?;

    Ok(FpPolynomial::coset_ifft_with_domain(domain_m, &t_coset_evals))
}

/// The evaluations a linearization is built from.
pub(super) struct LinearizationInputs<'a, F> {
    /// The selector multipliers at \zeta.
    pub(super) selector_multipliers: &'a [F],
    /// The openings of the witness polynomials at \zeta.
    pub(super) w_polys_eval_zeta: &'a [F],
    /// The openings of the first permutation polynomials at \zeta.
    pub(super) s_polys_eval_zeta: &'a [F],
    /// The opening of z(X) at \zeta * \omega.
    pub(super) z_eval_zeta_omega: &'a F,
    /// L_1(\zeta).
    pub(super) first_lagrange_eval_zeta: &'a F,
    /// Z_H(\zeta).
    pub(super) z_h_eval_zeta: &'a F,
}

/// Compute r polynomial or commitment.
fn r_poly_or_comm<F: Scalar, PCSType: HomomorphicPolyComElem<Scalar = F>>(
    q_polys_or_comms: &[PCSType],
    k: &[F],
    last_s_poly_or_comm: &PCSType,
    z_poly_or_comm: &PCSType,
    t_polys_or_comms: &[PCSType],
    inputs: &LinearizationInputs<F>,
    challenges: &PlonkChallenges<F>,
    n_t_polys: usize,
) -> Result<PCSType> {
    let (beta, gamma) = challenges.get_beta_gamma()?;
    let alpha = challenges.get_alpha()?;
    let zeta = challenges.get_zeta()?;
    if q_polys_or_comms.len() != inputs.selector_multipliers.len()
        || inputs.s_polys_eval_zeta.len() + 1 != inputs.w_polys_eval_zeta.len()
    {
        return Err(PlonkError::FuncParamsError);
    }

    // 1. sum_{i=1..n_selectors} wi * qi(X)
    let mut l = PCSType::get_identity();
    for (q, multiplier) in q_polys_or_comms
        .iter()
        .zip(inputs.selector_multipliers.iter())
    {
        if !multiplier.is_zero() {
            l.add_assign(&q.mul(multiplier));
        }
    }

    // 2. z(X) [ alpha * prod_{j=1..n_wires_per_gate} (fj(zeta) + beta * kj * zeta + gamma)
    //              + alpha^2 * L1(zeta)]
    let z_scalar = compute_z_scalar_in_r(
        inputs.w_polys_eval_zeta,
        k,
        challenges,
        inputs.first_lagrange_eval_zeta,
    )?;
    l.add_assign(&z_poly_or_comm.mul(&z_scalar));

    // 3. - perm_{n_wires_per_gate}(X) [alpha * z(zeta * omega) * beta
    //    * prod_{j=1..n_wires_per_gate-1}(fj(zeta) + beta * perm_j(zeta) + gamma)]
    let mut s_last_poly_scalar = alpha.mul(&inputs.z_eval_zeta_omega.mul(beta));
    for (w_eval, s_eval) in inputs
        .w_polys_eval_zeta
        .iter()
        .zip(inputs.s_polys_eval_zeta.iter())
    {
        s_last_poly_scalar.mul_assign(&w_eval.add(&beta.mul(s_eval)).add(gamma));
    }
    l.sub_assign(&last_s_poly_or_comm.mul(&s_last_poly_scalar));

    // 4. subtract Z_H(zeta) * sum_i zeta^{i * n_t_polys} t_i(X)
    let factor = zeta.pow(&[n_t_polys as u64]);
    let mut exponent = *inputs.z_h_eval_zeta;
    for t_poly in t_polys_or_comms.iter() {
        l.sub_assign(&t_poly.mul(&exponent));
        exponent.mul_assign(&factor);
    }
    Ok(l)
}

/// Return the openings of the wires read on the next row, padded to a full gate.
pub(super) fn next_row_wire_evals<F: Scalar>(
    w_polys_eval_zeta_omega: &[F],
    n_wires_per_gate: usize,
) -> Result<Vec<F>> {
    if w_polys_eval_zeta_omega.len() != N_NEXT_ROW_WIRES || n_wires_per_gate < N_NEXT_ROW_WIRES {
        return Err(PlonkError::FuncParamsError);
    }
    let mut w_next = w_polys_eval_zeta_omega.to_vec();
    w_next.resize(n_wires_per_gate, F::zero());
    Ok(w_next)
}

/// Compute the r polynomial.
pub(super) fn r_poly<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    prover_params: &PlonkPK<PCS>,
    z: &FpPolynomial<PCS::Field>,
    w_polys_eval_zeta: &[PCS::Field],
    s_polys_eval_zeta: &[PCS::Field],
    z_eval_zeta_omega: &PCS::Field,
    w_polys_eval_zeta_omega: &[PCS::Field],
    challenges: &PlonkChallenges<PCS::Field>,
    t_polys: &[FpPolynomial<PCS::Field>],
    first_lagrange_eval_zeta: &PCS::Field,
    z_h_eval_zeta: &PCS::Field,
    n_t_polys: usize,
) -> Result<FpPolynomial<PCS::Field>> {
    let w_next = next_row_wire_evals(w_polys_eval_zeta_omega, CS::n_wires_per_gate())?;
    let selector_multipliers = cs.eval_selector_multipliers(
        w_polys_eval_zeta,
        &w_next,
        &challenges.get_alpha_powers()?,
    )?;
    let last_s_poly = prover_params
        .s_polys
        .last()
        .ok_or(PlonkError::FuncParamsError)?;
    r_poly_or_comm::<PCS::Field, FpPolynomial<PCS::Field>>(
        &prover_params.q_polys,
        &prover_params.verifier_params.k,
        last_s_poly,
        z,
        t_polys,
        &LinearizationInputs {
            selector_multipliers: &selector_multipliers,
            w_polys_eval_zeta,
            s_polys_eval_zeta,
            z_eval_zeta_omega,
            first_lagrange_eval_zeta,
            z_h_eval_zeta,
        },
        challenges,
        n_t_polys,
    )
}

/// Commit the r commitment.
pub(super) fn r_commitment<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    verifier_params: &PlonkVK<PCS>,
    proof: &PlonkPf<PCS>,
    challenges: &PlonkChallenges<PCS::Field>,
    first_lagrange_eval_zeta: &PCS::Field,
    z_h_eval_zeta: &PCS::Field,
    n_t_polys: usize,
) -> Result<PCS::Commitment> {
    let w_next = next_row_wire_evals(&proof.w_polys_eval_zeta_omega, CS::n_wires_per_gate())?;
    let selector_multipliers = cs.eval_selector_multipliers(
        &proof.w_polys_eval_zeta,
        &w_next,
        &challenges.get_alpha_powers()?,
    )?;
    let last_cm_s = verifier_params
        .cm_s_vec
        .last()
        .ok_or(PlonkError::FuncParamsError)?;
    r_poly_or_comm::<PCS::Field, PCS::Commitment>(
        &verifier_params.cm_q_vec,
        &verifier_params.k,
        last_cm_s,
        &proof.cm_z,
        &proof.cm_t_vec,
        &LinearizationInputs {
            selector_multipliers: &selector_multipliers,
            w_polys_eval_zeta: &proof.w_polys_eval_zeta,
            s_polys_eval_zeta: &proof.s_polys_eval_zeta,
            z_eval_zeta_omega: &proof.z_eval_zeta_omega,
            first_lagrange_eval_zeta,
            z_h_eval_zeta,
        },
        challenges,
        n_t_polys,
    )
}

/// Compute sum_{i=1}^\ell w_i L_j(X), where j is the constraint
/// index for the i-th public value. L_j(X) = (X^n-1) / (X - \omega^j) is
/// the j-th lagrange base (zero for every X = \omega^i, except when i == j)
pub(super) fn eval_pi_poly<PCS: PolyComScheme>(
    verifier_params: &PlonkVK<PCS>,
    public_inputs: &[PCS::Field],
    z_h_eval_zeta: &PCS::Field,
    eval_point: &PCS::Field,
) -> Result<PCS::Field> {
    if public_inputs.len() != verifier_params.public_vars_constraint_indices.len()
        || public_inputs.len() != verifier_params.lagrange_constants.len()
    {
        return Err(PlonkError::FuncParamsError);
    }
    let mut eval = PCS::Field::zero();
    for ((constraint_index, public_value), lagrange_constant) in verifier_params
        .public_vars_constraint_indices
        .iter()
        .zip(public_inputs)
        .zip(verifier_params.lagrange_constants.iter())
    {
        // X - \omega^j j-th Lagrange denominator
        let root_to_j = verifier_params.domain.element(*constraint_index);
        let denominator_inv = eval_point
            .sub(&root_to_j)
            .inv()
            .map_err(|_| PlonkError::DivisionByZero)?;
        let lagrange_i = lagrange_constant.mul(&denominator_inv);
        eval.add_assign(&lagrange_i.mul(public_value));
    }
    Ok(eval.mul(z_h_eval_zeta))
}

/// Compute constant c_j such that L_j(X) = c_j (X^n-1) / (X- \omega^j),
/// which is c_j = \omega^j / n.
pub(super) fn compute_lagrange_constant<F: Domain>(
    domain: &EvaluationDomain<F>,
    base_index: usize,
) -> F {
    domain.element(base_index).mul(&domain.size_inv)
}

/// compute the scalar factor of z(X) in the r poly.
/// prod(fi(\zeta) + \beta * k_i * \zeta + \gamma) * \alpha
///       + L_1(\zeta) * \alpha^2
fn compute_z_scalar_in_r<F: Scalar>(
    w_polys_eval_zeta: &[F],
    k: &[F],
    challenges: &PlonkChallenges<F>,
    first_lagrange_eval_zeta: &F,
) -> Result<F> {
    let (beta, gamma) = challenges.get_beta_gamma()?;
    let alpha = challenges.get_alpha()?;
    let zeta = challenges.get_zeta()?;

    // 1. alpha * prod_{i=1..n_wires_per_gate}(fi(\zeta) + \beta * k_i * \zeta + \gamma)
    let beta_zeta = beta.mul(zeta);
    let mut z_scalar = *alpha;
    for (w_eval, k_i) in w_polys_eval_zeta.iter().zip(k.iter()) {
        z_scalar.mul_assign(&w_eval.add(&k_i.mul(&beta_zeta)).add(gamma));
    }

    // 2. alpha^2 * L_1(\zeta)
    z_scalar.add_assign(&first_lagrange_eval_zeta.mul(&alpha.mul(alpha)));
    Ok(z_scalar)
}

/// Evaluate the r polynomial at point \zeta.
pub(super) fn r_eval_zeta<PCS: PolyComScheme>(
    proof: &PlonkPf<PCS>,
    challenges: &PlonkChallenges<PCS::Field>,
    pi_eval_zeta: &PCS::Field,
    first_lagrange_eval_zeta: &PCS::Field,
) -> Result<PCS::Field> {
    let alpha = challenges.get_alpha()?;
    let (beta, gamma) = challenges.get_beta_gamma()?;
    let w_last = proof
        .w_polys_eval_zeta
        .last()
        .ok_or(PlonkError::FuncParamsError)?;

    let mut term1 = alpha.mul(&proof.z_eval_zeta_omega);
    for (w_eval, s_eval) in proof
        .w_polys_eval_zeta
        .iter()
        .zip(proof.s_polys_eval_zeta.iter())
    {
        term1.mul_assign(&w_eval.add(&beta.mul(s_eval)).add(gamma));
    }
    term1.mul_assign(&w_last.add(gamma));

    let term2 = first_lagrange_eval_zeta.mul(&alpha.mul(alpha));
    Ok(term1.add(&term2).sub(pi_eval_zeta))
}

/// Split the t polynomial into `n_t_polys` polynomials of degree `chunk_len` and commit.
/// Consecutive chunks are linked by a random coefficient added at `X^{chunk_len}` of
/// one chunk and subtracted from the constant term of the next.
pub(super) fn split_t_and_commit<R: CryptoRng + RngCore, PCS: PolyComScheme>(
    prng: &mut R,
    pcs: &PCS,
    t: &FpPolynomial<PCS::Field>,
    n_t_polys: usize,
    chunk_len: usize,
) -> Result<(Vec<PCS::Commitment>, Vec<FpPolynomial<PCS::Field>>)> {
    let mut cm_t_vec = vec![];
    let mut t_polys = vec![];
    let coefs_len = t.get_coefs_ref().len();

    let zero = PCS::Field::zero();
    let mut prev_coef = zero;

    for i in 0..n_t_polys {
        let coefs_start = i * chunk_len;
        let coefs_end = if i == n_t_polys - 1 {
            coefs_len
        } else {
            (i + 1) * chunk_len
        };
        let mut coefs = if coefs_start < coefs_len {
            t.get_coefs_ref()[coefs_start..min(coefs_len, coefs_end)].to_vec()
        } else {
            vec![]
        };

        if i != n_t_polys - 1 {
            let rand = PCS::Field::random(prng);
            coefs.resize(chunk_len + 1, zero);
            coefs[chunk_len].add_assign(&rand);
            coefs[0].sub_assign(&prev_coef);
            prev_coef = rand;
        } else if coefs.is_empty() {
            coefs = vec![prev_coef.neg()];
        } else {
            coefs[0].sub_assign(&prev_coef);
        }

        let t_poly = FpPolynomial::from_coefs(coefs);
        let cm_t = pcs
            .commit(&t_poly)
            .map_err(|_| PlonkError::CommitmentError)?;
        cm_t_vec.push(cm_t);
        t_polys.push(t_poly);
    }

    Ok((cm_t_vec, t_polys))
}

#[cfg(test)]
mod test {
    use crate::plonk::{
        constraint_system::{ConstraintSystem, TurboCS},
        helpers::{hide_polynomial, split_t_and_commit, z_poly, PlonkChallenges},
        indexer::indexer,
    };
    use crate::poly_commit::{
        evaluation_domain::EvaluationDomain, field_polynomial::FpPolynomial,
        kzg_poly_com::KZGCommitmentScheme, pcs::PolyComScheme,
    };
    use quill_algebra::{bn254::BN254Scalar, prelude::*};
    use rand_chacha::ChaChaRng;

    type F = BN254Scalar;

    #[test]
    fn test_z_polynomial() {
        let mut cs = TurboCS::new();

        let one = F::one();
        let two = one.add(&one);
        let three = two.add(&one);
        let four = three.add(&one);
        let five = four.add(&one);
        let six = five.add(&one);
        let seven = six.add(&one);

        let witness = [one, three, five, four, two, two, seven, six, three];
        cs.add_variables(&witness);

        cs.insert_add_gate(0 + 2, 4 + 2, 1 + 2);
        cs.insert_add_gate(1 + 2, 4 + 2, 2 + 2);
        cs.insert_add_gate(2 + 2, 4 + 2, 6 + 2);
        cs.insert_add_gate(3 + 2, 5 + 2, 7 + 2);
        cs.pad();

        let mut prng = ChaChaRng::from_seed([0_u8; 32]);
        let pcs = KZGCommitmentScheme::new(20, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let full_witness = cs.get_and_clear_witness();
        let extended = cs.extend_witness(&full_witness);

        let mut challenges = PlonkChallenges::<F>::new();
        challenges
            .insert_beta_gamma(F::random(&mut prng), F::random(&mut prng))
            .unwrap();
        let z = z_poly::<KZGCommitmentScheme, TurboCS<F>>(&cs, &params, &extended, &challenges)
            .unwrap();
        assert_eq!(z[0], one);
        assert_eq!(z.len(), cs.size());

        // the grand product wraps around to one when the copy constraints hold
        let n = cs.size();
        let (beta, gamma) = challenges.get_beta_gamma().unwrap();
        let group = params.verifier_params.domain.elements();
        let perm = crate::plonk::indexer::encode_perm_to_group(
            &group,
            &cs.compute_permutation().unwrap(),
            &params.verifier_params.k,
        );
        let mut last = z[n - 1];
        for j in 0..TurboCS::<F>::n_wires_per_gate() {
            let f = extended[j * n + n - 1];
            let num = f + beta.mul(&params.verifier_params.k[j].mul(&group[n - 1])) + gamma;
            let den = f + beta.mul(&perm[j * n + n - 1]) + gamma;
            last = last.mul(&num).mul(&den.inv().unwrap());
        }
        assert_eq!(last, one);

        // breaking a copy constraint breaks the wrap-around
        let mut broken = extended.clone();
        broken[n + 2] = broken[n + 2].add(&one);
        let z_broken = z_poly::<KZGCommitmentScheme, TurboCS<F>>(
            &cs,
            &params,
            &broken,
            &challenges,
        )
        .unwrap();
        assert_ne!(z_broken, z);
    }

    #[test]
    fn test_hide_polynomial_keeps_domain_values() {
        let mut prng = ChaChaRng::from_seed([1_u8; 32]);
        let domain = EvaluationDomain::<F>::new(8).unwrap();
        let poly = FpPolynomial::<F>::random(&mut prng, 7);
        let mut hidden = poly.clone();
        let blinds = hide_polynomial(&mut prng, &mut hidden, 2, 8);
        assert_eq!(blinds.len(), 3);
        assert_eq!(hidden.degree(), 10);
        assert_eq!(
            hidden.fft_with_domain(&domain),
            poly.fft_with_domain(&domain)
        );
    }

    #[test]
    fn test_split_t() {
        let mut prng = ChaChaRng::from_seed([2_u8; 32]);
        let pcs = KZGCommitmentScheme::new(10, &mut prng);
        let t = FpPolynomial::<F>::random(&mut prng, 27);
        let (cm_t_vec, t_polys) = split_t_and_commit(&mut prng, &pcs, &t, 5, 6).unwrap();
        assert_eq!(cm_t_vec.len(), 5);

        let x = F::random(&mut prng);
        let factor = x.pow(&[6]);
        let mut combined = F::zero();
        let mut multiplier = F::one();
        for (t_poly, cm_t) in t_polys.iter().zip(cm_t_vec.iter()) {
            assert!(t_poly.degree() <= 6);
            assert_eq!(&pcs.commit(t_poly).unwrap(), cm_t);
            combined.add_assign(&t_poly.eval(&x).mul(&multiplier));
            multiplier.mul_assign(&factor);
        }
        assert_eq!(combined, t.eval(&x));
    }
}
