use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::{widget::N_NEXT_ROW_WIRES, ConstraintSystem},
    helpers::compute_lagrange_constant,
};
use crate::poly_commit::{
    evaluation_domain::{batch_inversion, EvaluationDomain},
    field_polynomial::FpPolynomial,
    kzg_poly_com::KZGCommitment,
    pcs::PolyComScheme,
};
use ark_std::{end_timer, start_timer};
use quill_algebra::prelude::*;
use rand_chacha::ChaChaRng;
use serde::Serialize;
use sha2::{Digest, Sha512};

/// The data structure of a Plonk proof.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize, Clone)]
pub struct PlonkProof<C, F> {
    /// The witness polynomial commitments.
    pub cm_w_vec: Vec<C>,
    /// The grand product polynomial commitment.
    pub cm_z: C,
    /// The split quotient polynomial commitments
    pub cm_t_vec: Vec<C>,
    /// The openings of witness polynomials at \zeta.
    pub w_polys_eval_zeta: Vec<F>,
    /// The openings of the first `n_wires_per_gate - 1` permutation polynomials at \zeta.
    pub s_polys_eval_zeta: Vec<F>,
    /// The opening of z(X) at point \zeta * \omega.
    pub z_eval_zeta_omega: F,
    /// The openings of witness polynomials (first three) at \zeta * \omega.
    pub w_polys_eval_zeta_omega: Vec<F>,
    /// The commitment for the first witness polynomial, for \zeta.
    pub opening_witness_zeta: C,
    /// The commitment for the second witness polynomial, for \zeta\omega.
    pub opening_witness_zeta_omega: C,
}

/// The type of the Plonk proof with a specific polynomial commitment scheme.
pub type PlonkPf<PCS> =
    PlonkProof<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

impl<G: Group, F: Scalar> PlonkProof<KZGCommitment<G>, F> {
    /// Encode the proof in the order its elements enter the transcript:
    /// wire commitments, `z`, quotient chunks, the evaluations and the two openings.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![];
        for cm in self
            .cm_w_vec
            .iter()
            .chain(Some(&self.cm_z))
            .chain(self.cm_t_vec.iter())
        {
            bytes.extend(cm.0.to_compressed_bytes());
        }
        for eval in self
            .w_polys_eval_zeta
            .iter()
            .chain(self.s_polys_eval_zeta.iter())
            .chain(Some(&self.z_eval_zeta_omega))
            .chain(self.w_polys_eval_zeta_omega.iter())
        {
            bytes.extend(eval.to_bytes());
        }
        bytes.extend(self.opening_witness_zeta.0.to_compressed_bytes());
        bytes.extend(self.opening_witness_zeta_omega.0.to_compressed_bytes());
        bytes
    }

    /// Decode a proof for a circuit with `n_wires_per_gate` wires.
    /// Trailing or missing bytes and invalid points are rejected.
    pub fn from_bytes(bytes: &[u8], n_wires_per_gate: usize) -> Result<Self> {
        if n_wires_per_gate <= N_NEXT_ROW_WIRES {
            return Err(PlonkError::FuncParamsError);
        }
        let mut reader = ProofReader { bytes };
        let cm_w_vec = reader.commitments(n_wires_per_gate)?;
        let cm_z = reader.commitment()?;
        let cm_t_vec = reader.commitments(n_wires_per_gate)?;
        let w_polys_eval_zeta = reader.scalars(n_wires_per_gate)?;
        let s_polys_eval_zeta = reader.scalars(n_wires_per_gate - 1)?;
        let z_eval_zeta_omega = reader.scalar()?;
        let w_polys_eval_zeta_omega = reader.scalars(N_NEXT_ROW_WIRES)?;
        let opening_witness_zeta = reader.commitment()?;
        let opening_witness_zeta_omega = reader.commitment()?;
        if !reader.bytes.is_empty() {
            return Err(PlonkError::SerializationError);
        }
        Ok(PlonkProof {
            cm_w_vec,
            cm_z,
            cm_t_vec,
            w_polys_eval_zeta,
            s_polys_eval_zeta,
            z_eval_zeta_omega,
            w_polys_eval_zeta_omega,
            opening_witness_zeta,
            opening_witness_zeta_omega,
        })
    }
}

struct ProofReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ProofReader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.bytes.len() < len {
            return Err(PlonkError::SerializationError);
        }
        let (head, tail) = self.bytes.split_at(len);
        self.bytes = tail;
        Ok(head)
    }

    fn commitment<G: Group>(&mut self) -> Result<KZGCommitment<G>> {
        let bytes = self.take(G::COMPRESSED_LEN)?;
        G::from_compressed_bytes(bytes)
            .map(KZGCommitment)
            .map_err(|_| PlonkError::SerializationError)
    }

    fn commitments<G: Group>(&mut self, n: usize) -> Result<Vec<KZGCommitment<G>>> {
        (0..n).map(|_| self.commitment()).collect()
    }

    fn scalar<F: Scalar>(&mut self) -> Result<F> {
        let bytes = self.take(F::bytes_len())?;
        F::from_bytes(bytes).map_err(|_| PlonkError::SerializationError)
    }

    fn scalars<F: Scalar>(&mut self, n: usize) -> Result<Vec<F>> {
        (0..n).map(|_| self.scalar()).collect()
    }
}

/// Plonk prover parameters.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlonkProverParams<O, C, F> {
    /// The polynomials of the selectors.
    pub q_polys: Vec<O>,
    /// The polynomials of perm1, perm2, ..., perm_{n_wires_per_gate}.
    pub s_polys: Vec<O>,
    /// The Plonk verifier parameters.
    pub verifier_params: PlonkVerifierParams<C, F>,
    /// The evaluation domain for computing the quotient polynomial,
    /// whose coset `g * H_m` is where the quotient is evaluated.
    pub domain_m: EvaluationDomain<F>,
    /// The first Lagrange polynomial over the coset.
    pub l1_coset_evals: Vec<F>,
    /// The inverses of the vanishing polynomial over the coset.
    pub z_h_inv_coset_evals: Vec<F>,
    /// The selector polynomials over the coset.
    pub q_coset_evals: Vec<Vec<F>>,
    /// The permutation polynomials over the coset.
    pub s_coset_evals: Vec<Vec<F>>,
}

/// Prover parameters over a particular polynomial commitment scheme.
pub type PlonkPK<PCS> = PlonkProverParams<
    FpPolynomial<<PCS as PolyComScheme>::Field>,
    <PCS as PolyComScheme>::Commitment,
    <PCS as PolyComScheme>::Field,
>;

impl<O, C, F> PlonkProverParams<O, C, F> {
    /// Return the verifier parameters.
    pub fn get_verifier_params(self) -> PlonkVerifierParams<C, F> {
        self.verifier_params
    }

    /// Return a reference of verifier parameters.
    pub fn get_verifier_params_ref(&self) -> &PlonkVerifierParams<C, F> {
        &self.verifier_params
    }
}

/// Plonk verifier parameters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlonkVerifierParams<C, F> {
    /// The commitments of the selectors.
    pub cm_q_vec: Vec<C>,
    /// The commitments of perm1, perm2, ..., perm_{n_wires_per_gate}.
    pub cm_s_vec: Vec<C>,
    /// `n_wires_per_gate` different quadratic non-residue in F_q-{0}.
    pub k: Vec<F>,
    /// The evaluation domain of the circuit.
    pub domain: EvaluationDomain<F>,
    /// The size of constraint system.
    pub cs_size: usize,
    /// The public constrain variables indices.
    pub public_vars_constraint_indices: Vec<usize>,
    /// The constrain lagrange base by public constrain variables.
    pub lagrange_constants: Vec<F>,
}

/// Define the PLONK verifier params by given `PolyComScheme`.
pub type PlonkVK<PCS> =
    PlonkVerifierParams<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

impl<C: Serialize, F: Scalar> PlonkVerifierParams<C, F> {
    /// Fingerprint of the circuit: SHA-512 of the bincode encoding, reduced into the field.
    pub fn hash(&self) -> Result<F> {
        let bytes = bincode::serialize(self).map_err(|_| PlonkError::SerializationError)?;
        let mut hasher = Sha512::new();
        hasher.update(&bytes);
        Ok(F::from_hash(hasher))
    }
}

/// Encode the permutation value, from an index to a group element.
pub fn encode_perm_to_group<F: Scalar>(group: &[F], perm: &[usize], k: &[F]) -> Vec<F> {
    let n = group.len();
    perm.iter()
        .map(|pi| {
            for (i, ki) in k.iter().enumerate().skip(1) {
                if *pi < (i + 1) * n && *pi >= i * n {
                    return ki.mul(&group[pi % n]);
                }
            }
            group[pi % n]
        })
        .collect()
}

/// Find `n_wires_per_gate - 1` different quadratic non-residue in F_q-{0}.
pub fn choose_ks<R: CryptoRng + RngCore, F: Scalar>(
    prng: &mut R,
    n_wires_per_gate: usize,
) -> Vec<F> {
    let mut k = vec![F::one()];
    let exp = { u64_limbs_from_bytes(&F::field_size_minus_one_half()) };

    for _ in 1..n_wires_per_gate {
        loop {
            let ki = F::random(prng);
            if ki == F::zero() {
                continue;
            }
            if k.iter().all(|x| x != &ki) && ki.pow(&exp) != F::one() {
                k.push(ki);
                break;
            }
        }
    }
    k
}

/// Run the Plonk indexer.
/// Before invoking indexer function, the constraint system `cs` should pad the number of
/// constraints to a power of two.
pub fn indexer<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    pcs: &PCS,
) -> Result<PlonkPK<PCS>> {
    indexer_with_lagrange(cs, pcs, None, None)
}

/// The Plonk indexer that leverages Lagrange bases.
/// `lagrange_pcs` is only used when it holds exactly `cs.size()` points, and the
/// commitments are skipped when `verifier_params` are given.
pub fn indexer_with_lagrange<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    pcs: &PCS,
    lagrange_pcs: Option<&PCS>,
    verifier_params: Option<PlonkVK<PCS>>,
) -> Result<PlonkPK<PCS>> {
    if cs.is_verifier_only() {
        return Err(PlonkError::FuncParamsError);
    }
    let indexer_timer = start_timer!(|| "TurboPlonk::Indexer");
    let no_verifier = verifier_params.is_none();

    // It's okay to choose a fixed seed to generate quadratic non-residue.
    let mut prng = ChaChaRng::from_seed([0u8; 32]);
    let n_wires_per_gate = CS::n_wires_per_gate();
    let n = cs.size();
    let m = cs.quot_eval_dom_size();
    // blinded wires and quotient chunks have degree n + 2
    if m % n != 0 || pcs.max_degree() < n + 2 {
        return Err(PlonkError::SetupError);
    }
    let lagrange_pcs = lagrange_pcs.filter(|p| p.max_degree() + 1 == n);

    let domain = EvaluationDomain::<PCS::Field>::new(n)
        .map_err(|_| PlonkError::GroupNotFound(n))?;
    let domain_m = EvaluationDomain::<PCS::Field>::new(m)
        .map_err(|_| PlonkError::GroupNotFound(m))?;
    let group = domain.elements();
    let k = choose_ks::<_, PCS::Field>(&mut prng, n_wires_per_gate);

    let commit = |evals: &[PCS::Field],
                  polynomial: &FpPolynomial<PCS::Field>|
     -> Result<PCS::Commitment> {
        let cm = match lagrange_pcs {
            Some(lagrange_pcs) => lagrange_pcs.commit(&FpPolynomial::from_coefs(evals.to_vec())),
            None => pcs.commit(polynomial),
        };
        cm.map_err(|_| PlonkError::SetupError)
    };

    // Step 1: compute permutation polynomials and commit them.
    let perm_timer = start_timer!(|| "Permutation polynomials");
    let raw_perm = cs.compute_permutation()?;
    let encoded_perm = encode_perm_to_group(&group, &raw_perm, &k);
    let mut s_coset_evals = Vec::with_capacity(n_wires_per_gate);
    let mut s_polys = Vec::with_capacity(n_wires_per_gate);
    let mut cm_s_vec = vec![];
    for s_evals in encoded_perm.chunks(n) {
        let s_coefs = FpPolynomial::ifft_with_domain(&domain, s_evals);
        s_coset_evals.push(s_coefs.coset_fft_with_domain(&domain_m));
        if no_verifier {
            cm_s_vec.push(commit(s_evals, &s_coefs)?);
        }
        s_polys.push(s_coefs);
    }
    end_timer!(perm_timer);

    // Step 2: compute selector polynomials and commit them.
    let selector_timer = start_timer!(|| "Selector polynomials");
    let mut q_coset_evals = Vec::with_capacity(cs.num_selectors());
    let mut q_polys = Vec::with_capacity(cs.num_selectors());
    let mut cm_q_vec = vec![];
    for i in 0..cs.num_selectors() {
        let q_evals = cs.selector(i)?;
        if q_evals.len() != n {
            return Err(PlonkError::FuncParamsError);
        }
        let q_coefs = FpPolynomial::ifft_with_domain(&domain, q_evals);
        q_coset_evals.push(q_coefs.coset_fft_with_domain(&domain_m));
        if no_verifier {
            cm_q_vec.push(commit(q_evals, &q_coefs)?);
        }
        q_polys.push(q_coefs);
    }
    end_timer!(selector_timer);

    // Step 3: precompute two helper functions, L1 and Z_H.
    let mut l1_evals = vec![PCS::Field::zero(); n];
    l1_evals[0] = PCS::Field::one();
    let l1_coset_evals =
        FpPolynomial::ifft_with_domain(&domain, &l1_evals).coset_fft_with_domain(&domain_m);

    let z_h_coefs = {
        let mut v = vec![PCS::Field::zero(); n + 1];
        v[0] = PCS::Field::one().neg();
        v[n] = PCS::Field::one();
        FpPolynomial::from_coefs(v)
    };
    let mut z_h_inv_coset_evals = z_h_coefs.coset_fft_with_domain(&domain_m);
    if z_h_inv_coset_evals.iter().any(|x| x.is_zero()) {
        return Err(PlonkError::DivisionByZero);
    }
    batch_inversion(&mut z_h_inv_coset_evals);

    // Step 4: compute the Lagrange interpolation constants.
    let lagrange_constants = if no_verifier {
        cs.public_vars_constraint_indices()
            .iter()
            .map(|index| compute_lagrange_constant(&domain, *index))
            .collect()
    } else {
        vec![]
    };

    let verifier_params = match verifier_params {
        Some(verifier_params) => verifier_params,
        None => PlonkVerifierParams {
            cm_q_vec,
            cm_s_vec,
            k,
            domain,
            cs_size: n,
            public_vars_constraint_indices: cs.public_vars_constraint_indices().to_vec(),
            lagrange_constants,
        },
    };
    end_timer!(indexer_timer);

    Ok(PlonkProverParams {
        q_polys,
        s_polys,
        verifier_params,
        domain_m,
        l1_coset_evals,
        z_h_inv_coset_evals,
        q_coset_evals,
        s_coset_evals,
    })
}

#[cfg(test)]
mod test {
    use crate::plonk::{
        constraint_system::{ConstraintSystem, TurboCS},
        indexer::{choose_ks, encode_perm_to_group, indexer},
    };
    use crate::poly_commit::{
        evaluation_domain::EvaluationDomain, kzg_poly_com::KZGCommitmentScheme,
    };
    use quill_algebra::{bn254::BN254Scalar, prelude::*};
    use rand_chacha::ChaChaRng;

    type F = BN254Scalar;

    #[test]
    fn test_choose_ks() {
        let mut prng = test_rng();
        let m = 8;
        let k = choose_ks::<_, F>(&mut prng, m);
        let exp = u64_limbs_from_bytes(&F::field_size_minus_one_half());
        assert_eq!(k[0], F::one());
        assert!(k.iter().skip(1).all(|x| *x != F::zero()));
        assert!(k.iter().skip(1).all(|x| x.pow(&exp) != F::one()));
        for i in 1..m {
            for j in 0..i {
                assert_ne!(k[i], k[j]);
            }
        }
    }

    #[test]
    fn test_encode_perm_to_group() {
        let domain = EvaluationDomain::<F>::new(4).unwrap();
        let group = domain.elements();
        let k = vec![F::one(), F::from(7u32)];
        // swap (column 0, row 1) with (column 1, row 2)
        let perm = vec![0, 6, 2, 3, 4, 5, 1, 7];
        let encoded = encode_perm_to_group(&group, &perm, &k);
        assert_eq!(encoded[0], group[0]);
        assert_eq!(encoded[1], k[1].mul(&group[2]));
        assert_eq!(encoded[6], group[1]);
        assert_eq!(encoded[7], k[1].mul(&group[3]));
    }

    fn sample_circuit() -> TurboCS<F> {
        let mut cs = TurboCS::new();
        let a = cs.new_variable(F::from(3u32));
        let b = cs.new_variable(F::from(4u32));
        let c = cs.mul(a, b);
        cs.prepare_pi_variable(c);
        cs.pad();
        cs
    }

    #[test]
    fn test_indexer_is_deterministic() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentScheme::new(40, &mut prng);
        let cs = sample_circuit();

        let params = indexer(&cs, &pcs).unwrap();
        let again = indexer(&cs, &pcs).unwrap();
        let vk = params.get_verifier_params_ref();
        assert_eq!(vk, again.get_verifier_params_ref());
        assert_eq!(vk.hash().unwrap(), again.verifier_params.hash().unwrap());
        assert_eq!(vk.cm_q_vec.len(), cs.num_selectors());
        assert_eq!(vk.cm_s_vec.len(), TurboCS::<F>::n_wires_per_gate());
        assert_eq!(vk.public_vars_constraint_indices, vec![3]);

        // the fingerprint depends on the circuit
        let mut other = TurboCS::new();
        let a = other.new_variable(F::from(3u32));
        let b = other.new_variable(F::from(4u32));
        let c = other.add(a, b);
        other.prepare_pi_variable(c);
        other.pad();
        let other_params = indexer(&other, &pcs).unwrap();
        assert_ne!(vk.hash().unwrap(), other_params.verifier_params.hash().unwrap());
    }

    #[test]
    fn test_indexer_rejects_small_srs() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentScheme::new(2, &mut prng);
        let cs = sample_circuit();
        assert!(indexer(&cs, &pcs).is_err());
    }
}
