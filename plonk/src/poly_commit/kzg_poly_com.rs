use crate::poly_commit::{
    errors::PolyComSchemeError,
    evaluation_domain::EvaluationDomain,
    field_polynomial::FpPolynomial,
    pcs::{HomomorphicPolyComElem, PolyComScheme, ToBytes},
};
use ark_std::{end_timer, start_timer};
use merlin::Transcript;
use quill_algebra::{
    bn254::{
        BN254Gt, BN254PairingEngine, BN254Scalar, Fq, Fq2, G1Affine, G2Affine, BN254G1, BN254G2,
    },
    prelude::*,
};

/// The byte length of an SRS point in G1, `x || y` big-endian.
pub const SRS_G1_LEN: usize = 64;

/// The byte length of an SRS point in G2, `x.c0 || x.c1 || y.c0 || y.c1` big-endian.
pub const SRS_G2_LEN: usize = 128;

/// KZG commitment scheme over the `Group`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct KZGCommitment<G>(pub G);

impl<G: Group> ToBytes for KZGCommitment<G> {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_compressed_bytes()
    }
}

impl HomomorphicPolyComElem for KZGCommitment<BN254G1> {
    type Scalar = BN254Scalar;

    fn get_base() -> Self {
        KZGCommitment(BN254G1::get_base())
    }

    fn get_identity() -> Self {
        KZGCommitment(BN254G1::get_identity())
    }

    fn add(&self, other: &Self) -> Self {
        KZGCommitment(self.0.add(&other.0))
    }

    fn add_assign(&mut self, other: &Self) {
        self.0.add_assign(&other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        KZGCommitment(self.0.sub(&other.0))
    }

    fn sub_assign(&mut self, other: &Self) {
        self.0.sub_assign(&other.0)
    }

    fn mul(&self, exp: &BN254Scalar) -> Self {
        KZGCommitment(self.0.mul(exp))
    }

    fn mul_assign(&mut self, exp: &BN254Scalar) {
        self.0.mul_assign(exp)
    }
}

/// KZG commitment scheme over BN254.
///
/// `public_parameter_group_1` holds `[s^i] G1` (or the Lagrange basis `[L_i(s)] G1`
/// for a scheme built by [`KZGCommitmentScheme::to_lagrange_basis`]) and
/// `public_parameter_group_2` holds `[1] G2, [s] G2`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "KZGPublicParameters")]
pub struct KZGCommitmentScheme {
    /// public parameter about G1.
    pub public_parameter_group_1: Vec<BN254G1>,
    /// public parameter about G2.
    pub public_parameter_group_2: Vec<BN254G2>,
    /// The Pippenger table of `public_parameter_group_1`, rebuilt on load.
    #[serde(skip)]
    point_table: Vec<G1Affine>,
}

/// The serialized form of [`KZGCommitmentScheme`].
#[derive(Deserialize)]
struct KZGPublicParameters {
    public_parameter_group_1: Vec<BN254G1>,
    public_parameter_group_2: Vec<BN254G2>,
}

impl TryFrom<KZGPublicParameters> for KZGCommitmentScheme {
    type Error = PolyComSchemeError;

    fn try_from(params: KZGPublicParameters) -> Result<Self, PolyComSchemeError> {
        check_parameter_lengths(
            params.public_parameter_group_1.len(),
            params.public_parameter_group_2.len(),
        )?;
        Ok(Self::from_parameters(
            params.public_parameter_group_1,
            params.public_parameter_group_2,
        ))
    }
}

/// At least `[1] G1` and exactly `[1] G2, [s] G2` are needed to verify openings.
fn check_parameter_lengths(len_1: usize, len_2: usize) -> Result<(), PolyComSchemeError> {
    if len_1 == 0 || len_2 != 2 {
        return Err(PolyComSchemeError::DeserializationError);
    }
    Ok(())
}

impl KZGCommitmentScheme {
    /// Create a new instance of a KZG polynomial commitment scheme.
    /// `max_degree` - max degree of the polynomial,
    /// `prng` - pseudo-random generator.
    /// The trapdoor is sampled and dropped, so this is only fit for tests and benchmarks.
    pub fn new<R: CryptoRng + RngCore>(max_degree: usize, prng: &mut R) -> KZGCommitmentScheme {
        let timer = start_timer!(|| format!("KZG setup of degree {}", max_degree));
        let s = BN254Scalar::random(prng);

        let mut public_parameter_group_1 = Vec::with_capacity(max_degree + 1);
        let mut elem_g1 = BN254G1::get_base();
        for _ in 0..=max_degree {
            public_parameter_group_1.push(elem_g1);
            elem_g1 = elem_g1.mul(&s);
        }

        let elem_g2 = BN254G2::get_base();
        let public_parameter_group_2 = vec![elem_g2, elem_g2.mul(&s)];
        end_timer!(timer);

        Self::from_parameters(public_parameter_group_1, public_parameter_group_2)
    }

    /// Build the scheme from already validated parameters.
    pub fn from_parameters(
        public_parameter_group_1: Vec<BN254G1>,
        public_parameter_group_2: Vec<BN254G2>,
    ) -> KZGCommitmentScheme {
        let point_table = BN254G1::pippenger_point_table(&public_parameter_group_1);
        KZGCommitmentScheme {
            public_parameter_group_1,
            public_parameter_group_2,
            point_table,
        }
    }

    /// Parse a reference string: `g1_bytes` is a concatenation of 64-byte
    /// monomial points starting with the generator, `g2_bytes` is the 128-byte
    /// encoding of `[s] G2`. Field elements are big-endian.
    pub fn from_srs_bytes(
        g1_bytes: &[u8],
        g2_bytes: &[u8],
    ) -> Result<KZGCommitmentScheme, PolyComSchemeError> {
        if g1_bytes.is_empty()
            || g1_bytes.len() % SRS_G1_LEN != 0
            || g2_bytes.len() != SRS_G2_LEN
        {
            return Err(PolyComSchemeError::DeserializationError);
        }

        let public_parameter_group_1 = g1_bytes
            .chunks(SRS_G1_LEN)
            .map(|chunk| {
                let x = Fq::from_bytes_be(&chunk[..32])?;
                let y = Fq::from_bytes_be(&chunk[32..])?;
                Ok(BN254G1::from_affine(&G1Affine::new(x, y)?))
            })
            .collect::<Result<Vec<BN254G1>, AlgebraError>>()?;
        if public_parameter_group_1[0] != BN254G1::get_base() {
            return Err(PolyComSchemeError::DeserializationError);
        }

        let fq2 = |bytes: &[u8]| -> Result<Fq2, AlgebraError> {
            Ok(Fq2::new(
                Fq::from_bytes_be(&bytes[..32])?,
                Fq::from_bytes_be(&bytes[32..64])?,
            ))
        };
        let g2_x = G2Affine::new(fq2(&g2_bytes[..64])?, fq2(&g2_bytes[64..])?)?;
        if !g2_x.to_jacobian().is_in_prime_order_subgroup() {
            return Err(AlgebraError::NotInSubgroupError.into());
        }

        Ok(Self::from_parameters(
            public_parameter_group_1,
            vec![BN254G2::get_base(), BN254G2::from_affine(&g2_x)],
        ))
    }

    /// Encode the parameters in the layout read by [`Self::from_srs_bytes`].
    pub fn to_srs_bytes(&self) -> (Vec<u8>, Vec<u8>) {
        let mut g1_bytes = Vec::with_capacity(self.public_parameter_group_1.len() * SRS_G1_LEN);
        for p in BN254G1::batch_to_affine(&self.public_parameter_group_1) {
            g1_bytes.extend_from_slice(&p.x.to_bytes_be());
            g1_bytes.extend_from_slice(&p.y.to_bytes_be());
        }

        let mut g2_bytes = Vec::with_capacity(SRS_G2_LEN);
        if let Some(g2_x) = self.public_parameter_group_2.get(1) {
            let p = g2_x.to_affine();
            for c in [p.x.c0, p.x.c1, p.y.c0, p.y.c1].iter() {
                g2_bytes.extend_from_slice(&c.to_bytes_be());
            }
        }
        (g1_bytes, g2_bytes)
    }

    /// Serialize the parameters to unchecked bytes.
    pub fn to_unchecked_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![];
        let len_1 = self.public_parameter_group_1.len() as u32;
        let len_2 = self.public_parameter_group_2.len() as u32;
        bytes.extend(len_1.to_le_bytes());
        bytes.extend(len_2.to_le_bytes());

        for i in &self.public_parameter_group_1 {
            bytes.extend(i.to_unchecked_bytes());
        }
        for i in &self.public_parameter_group_2 {
            bytes.extend(i.to_unchecked_bytes());
        }
        bytes
    }

    /// Deserialize the parameters from unchecked bytes.
    pub fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self, PolyComSchemeError> {
        if bytes.len() < 8 {
            return Err(PolyComSchemeError::DeserializationError);
        }
        let mut len_1_bytes = [0u8; 4];
        let mut len_2_bytes = [0u8; 4];
        len_1_bytes.copy_from_slice(&bytes[0..4]);
        len_2_bytes.copy_from_slice(&bytes[4..8]);
        let len_1 = u32::from_le_bytes(len_1_bytes) as usize;
        let len_2 = u32::from_le_bytes(len_2_bytes) as usize;
        check_parameter_lengths(len_1, len_2)?;
        let n_1 = BN254G1::unchecked_size();
        let n_2 = BN254G2::unchecked_size();
        if bytes.len() != 8 + n_1 * len_1 + n_2 * len_2 {
            return Err(PolyComSchemeError::DeserializationError);
        }

        let (bytes_1, bytes_2) = bytes[8..].split_at(n_1 * len_1);
        let p1 = bytes_1
            .chunks(n_1)
            .map(BN254G1::from_unchecked_bytes)
            .collect::<Result<Vec<_>, AlgebraError>>()?;
        let p2 = bytes_2
            .chunks(n_2)
            .map(BN254G2::from_unchecked_bytes)
            .collect::<Result<Vec<_>, AlgebraError>>()?;

        Ok(Self::from_parameters(p1, p2))
    }

    /// Derive the scheme committing to evaluations over the domain of size `n`:
    /// its G1 parameters are `[L_i(s)] G1 = (1/n) sum_j omega^{-ij} [s^j] G1`.
    pub fn to_lagrange_basis(&self, n: usize) -> Result<Self, PolyComSchemeError> {
        if n > self.public_parameter_group_1.len() {
            return Err(PolyComSchemeError::DegreeError);
        }
        let domain = EvaluationDomain::<BN254Scalar>::new(n)?;
        let timer = start_timer!(|| format!("Lagrange basis of size {}", n));
        let mut points = self.public_parameter_group_1[..n].to_vec();
        group_fft_in_place(&mut points, &domain.group_gen_inv, domain.log_size);
        for p in points.iter_mut() {
            p.mul_assign(&domain.size_inv);
        }
        end_timer!(timer);
        Ok(Self::from_parameters(
            points,
            self.public_parameter_group_2.clone(),
        ))
    }

    fn verifier_points(&self) -> Result<(BN254G1, BN254G2, BN254G2), PolyComSchemeError> {
        match (
            self.public_parameter_group_1.first(),
            self.public_parameter_group_2.as_slice(),
        ) {
            (Some(g1_0), [g2_0, g2_1]) => Ok((*g1_0, *g2_0, *g2_1)),
            _ => Err(PolyComSchemeError::DeserializationError),
        }
    }

    fn multi_exp(&self, scalars: &[BN254Scalar]) -> BN254G1 {
        if self.point_table.len() >= 2 * scalars.len() {
            BN254G1::multi_exp_with_table(scalars, &self.point_table)
        } else {
            let scalars: Vec<&BN254Scalar> = scalars.iter().collect();
            let bases: Vec<&BN254G1> = self.public_parameter_group_1[..scalars.len()]
                .iter()
                .collect();
            BN254G1::multi_exp(&scalars, &bases)
        }
    }
}

/// Radix-2 transform of group elements in the exponent.
fn group_fft_in_place(a: &mut [BN254G1], omega: &BN254Scalar, log_n: u32) {
    let n = a.len();
    for k in 0..n {
        let mut rk = 0;
        let mut t = k;
        for _ in 0..log_n {
            rk = (rk << 1) | (t & 1);
            t >>= 1;
        }
        if k < rk {
            a.swap(k, rk);
        }
    }
    let mut m = 1;
    for _ in 0..log_n {
        let w_m = omega.pow(&[(n / (2 * m)) as u64]);
        for chunk in a.chunks_mut(2 * m) {
            let mut w = BN254Scalar::one();
            let (lo, hi) = chunk.split_at_mut(m);
            for (x, y) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = y.mul(&w);
                *y = x.sub(&t);
                x.add_assign(&t);
                w.mul_assign(&w_m);
            }
        }
        m *= 2;
    }
}

impl PolyComScheme for KZGCommitmentScheme {
    type Field = BN254Scalar;
    type Commitment = KZGCommitment<BN254G1>;

    fn max_degree(&self) -> usize {
        self.public_parameter_group_1.len().saturating_sub(1)
    }

    fn commit(
        &self,
        polynomial: &FpPolynomial<BN254Scalar>,
    ) -> Result<Self::Commitment, PolyComSchemeError> {
        let coefs = polynomial.get_coefs_ref();
        if coefs.len() > self.public_parameter_group_1.len() {
            return Err(PolyComSchemeError::DegreeError);
        }
        Ok(KZGCommitment(self.multi_exp(coefs)))
    }

    fn eval(&self, poly: &FpPolynomial<BN254Scalar>, point: &BN254Scalar) -> BN254Scalar {
        poly.eval(point)
    }

    fn apply_blind_factors(
        &self,
        commitment: &Self::Commitment,
        blinds: &[BN254Scalar],
        zeroing_degree: usize,
    ) -> Self::Commitment {
        let mut commitment = commitment.0;
        for (i, blind) in blinds.iter().enumerate() {
            commitment.add_assign(&self.public_parameter_group_1[i].mul(blind));
            commitment.sub_assign(&self.public_parameter_group_1[zeroing_degree + i].mul(blind));
        }
        KZGCommitment(commitment)
    }

    fn prove(
        &self,
        poly: &FpPolynomial<BN254Scalar>,
        x: &BN254Scalar,
        max_degree: usize,
    ) -> Result<Self::Commitment, PolyComSchemeError> {
        if poly.degree() > max_degree {
            return Err(PolyComSchemeError::DegreeError);
        }
        // (f(X) - f(x)) / (X - x)
        let q_poly = poly.divide_by_x_minus(x);
        self.commit(&q_poly)
            .map_err(|_| PolyComSchemeError::PCSProveEvalError)
    }

    fn verify(
        &self,
        cm: &Self::Commitment,
        _degree: usize,
        point: &BN254Scalar,
        eval: &BN254Scalar,
        proof: &Self::Commitment,
    ) -> Result<(), PolyComSchemeError> {
        let (g1_0, g2_0, g2_1) = self.verifier_points()?;

        // e(C - eval * G, H) = e(proof, [s - point] H)
        let x_minus_point = g2_1.sub(&g2_0.mul(point));
        let pairing_eval = BN254PairingEngine::product_of_pairings(
            &[cm.0.sub(&g1_0.mul(eval)), proof.0.neg()],
            &[g2_0, x_minus_point],
        );

        if pairing_eval == BN254Gt::get_identity() {
            Ok(())
        } else {
            Err(PolyComSchemeError::PCSProveEvalError)
        }
    }

    fn batch_verify_diff_points(
        &self,
        _transcript: &mut Transcript,
        cm_vec: &[Self::Commitment],
        _degree: usize,
        point_vec: &[BN254Scalar],
        eval_vec: &[BN254Scalar],
        proofs: &[Self::Commitment],
        challenge: &BN254Scalar,
    ) -> Result<(), PolyComSchemeError> {
        if proofs.is_empty()
            || proofs.len() != point_vec.len()
            || proofs.len() != eval_vec.len()
            || proofs.len() != cm_vec.len()
        {
            return Err(PolyComSchemeError::PCSProveEvalError);
        }

        let (g1_0, g2_0, g2_1) = self.verifier_points()?;

        // sum c^i W_i paired with [s] H must equal
        // sum c^i (C_i - y_i G + z_i W_i) paired with H
        let mut left_first = proofs[0].0;
        let mut right_first = proofs[0].0.mul(&point_vec[0]);
        let mut right_first_val = eval_vec[0];
        let mut right_first_comm = cm_vec[0].0;

        let mut cur_challenge = *challenge;
        for i in 1..proofs.len() {
            let new_comm = proofs[i].0.mul(&cur_challenge);

            left_first.add_assign(&new_comm);
            right_first.add_assign(&new_comm.mul(&point_vec[i]));
            right_first_val.add_assign(&eval_vec[i].mul(&cur_challenge));
            right_first_comm.add_assign(&cm_vec[i].0.mul(&cur_challenge));

            cur_challenge.mul_assign(challenge);
        }
        right_first.sub_assign(&g1_0.mul(&right_first_val));
        right_first.add_assign(&right_first_comm);

        let pairing_eval = BN254PairingEngine::product_of_pairings(
            &[left_first, right_first.neg()],
            &[g2_1, g2_0],
        );

        if pairing_eval == BN254Gt::get_identity() {
            Ok(())
        } else {
            Err(PolyComSchemeError::PCSProveEvalError)
        }
    }

    fn shrink_to_verifier_only(&self) -> Self {
        Self {
            public_parameter_group_1: self
                .public_parameter_group_1
                .iter()
                .take(1)
                .copied()
                .collect(),
            public_parameter_group_2: self.public_parameter_group_2.clone(),
            point_table: vec![],
        }
    }
}

#[cfg(test)]
mod tests_kzg_impl {
    use crate::poly_commit::{
        errors::PolyComSchemeError,
        evaluation_domain::EvaluationDomain,
        field_polynomial::FpPolynomial,
        kzg_poly_com::KZGCommitmentScheme,
        pcs::{HomomorphicPolyComElem, PolyComScheme},
    };
    use merlin::Transcript;
    use quill_algebra::{
        bn254::{BN254PairingEngine, BN254Scalar, BN254G1, BN254G2},
        prelude::*,
    };
    use rand_chacha::ChaChaRng;

    type Field = BN254Scalar;

    #[test]
    fn test_public_parameters() {
        let param_size = 5;
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let kzg_scheme = KZGCommitmentScheme::new(param_size, &mut prng);
        assert_eq!(kzg_scheme.public_parameter_group_1.len(), param_size + 1);
        assert_eq!(kzg_scheme.public_parameter_group_2.len(), 2);
        assert_eq!(kzg_scheme.max_degree(), param_size);

        let g2_power1 = kzg_scheme.public_parameter_group_2[1];
        for i in 0..param_size {
            let this = kzg_scheme.public_parameter_group_1[i];
            let next = kzg_scheme.public_parameter_group_1[i + 1];
            assert_eq!(
                BN254PairingEngine::pairing(&next, &BN254G2::get_base()),
                BN254PairingEngine::pairing(&this, &g2_power1)
            );
        }
    }

    #[test]
    fn test_homomorphic_poly_com_elem() {
        let mut prng = ChaChaRng::from_seed([1u8; 32]);
        let pcs = KZGCommitmentScheme::new(20, &mut prng);
        let one = Field::one();
        let two = one.add(&one);
        let three = two.add(&one);
        let four = three.add(&one);
        let six = three.add(&three);
        let eight = six.add(&two);
        let poly1 = FpPolynomial::from_coefs(vec![two, three, six]);
        let commitment1 = pcs.commit(&poly1).unwrap();
        let poly2 = FpPolynomial::from_coefs(vec![one, eight, four]);
        let commitment2 = pcs.commit(&poly2).unwrap();

        let commitment_sum = pcs.commit(&poly1.add(&poly2)).unwrap();
        assert_eq!(commitment_sum, commitment1.add(&commitment2));

        let exponent = four.add(&one);
        let commitment_poly1_mult_5 = pcs.commit(&poly1.mul_scalar(&exponent)).unwrap();
        assert_eq!(commitment_poly1_mult_5, commitment1.mul(&exponent));
    }

    #[test]
    fn test_commit() {
        let mut prng = ChaChaRng::from_seed([2u8; 32]);
        let pcs = KZGCommitmentScheme::new(10, &mut prng);
        let fq_poly = FpPolynomial::<Field>::random(&mut prng, 10);
        let commitment = pcs.commit(&fq_poly).unwrap();

        // Doing the multiexp by hand
        let mut expected = BN254G1::get_identity();
        for (i, coef) in fq_poly.get_coefs_ref().iter().enumerate() {
            expected = expected.add(&pcs.public_parameter_group_1[i].mul(coef));
        }
        assert_eq!(expected, commitment.0);

        let too_long = FpPolynomial::<Field>::random(&mut prng, 11);
        assert_eq!(pcs.commit(&too_long), Err(PolyComSchemeError::DegreeError));
    }

    #[test]
    fn test_eval() {
        let mut prng = ChaChaRng::from_seed([3u8; 32]);
        let pcs = KZGCommitmentScheme::new(10, &mut prng);
        let one = Field::one();
        let two = one.add(&one);
        let four = two.add(&two);
        let seven = four.add(&two).add(&one);
        let fq_poly = FpPolynomial::from_coefs(vec![one, two, four]);
        let point = one;
        let degree = fq_poly.degree();
        let commitment_value = pcs.commit(&fq_poly).unwrap();

        assert!(pcs.prove(&fq_poly, &point, 1).is_err());
        let proof = pcs.prove(&fq_poly, &point, degree).unwrap();
        assert!(pcs
            .verify(&commitment_value, degree, &point, &seven, &proof)
            .is_ok());

        let new_pcs = pcs.shrink_to_verifier_only();
        assert!(new_pcs
            .verify(&commitment_value, degree, &point, &seven, &proof)
            .is_ok());
        assert!(pcs
            .verify(&commitment_value, degree, &point, &one, &proof)
            .is_err());
    }

    #[test]
    fn test_batch_verify_diff_points() {
        let mut prng = ChaChaRng::from_seed([4u8; 32]);
        let pcs = KZGCommitmentScheme::new(16, &mut prng);
        let mut cms = vec![];
        let mut points = vec![];
        let mut evals = vec![];
        let mut proofs = vec![];
        for _ in 0..3 {
            let poly = FpPolynomial::<Field>::random(&mut prng, 16);
            let point = Field::random(&mut prng);
            cms.push(pcs.commit(&poly).unwrap());
            evals.push(poly.eval(&point));
            proofs.push(pcs.prove(&poly, &point, 16).unwrap());
            points.push(point);
        }
        let challenge = Field::random(&mut prng);
        let mut transcript = Transcript::new(b"kzg batch");
        assert!(pcs
            .batch_verify_diff_points(
                &mut transcript,
                &cms,
                16,
                &points,
                &evals,
                &proofs,
                &challenge
            )
            .is_ok());

        evals[1] = evals[1].add(&Field::one());
        assert!(pcs
            .batch_verify_diff_points(
                &mut transcript,
                &cms,
                16,
                &points,
                &evals,
                &proofs,
                &challenge
            )
            .is_err());
    }

    #[test]
    fn test_batch_prove_same_point() {
        let mut prng = ChaChaRng::from_seed([5u8; 32]);
        let pcs = KZGCommitmentScheme::new(12, &mut prng);
        let polys: Vec<FpPolynomial<Field>> = (0..3)
            .map(|_| FpPolynomial::random(&mut prng, 12))
            .collect();
        let refs: Vec<&FpPolynomial<Field>> = polys.iter().collect();
        let cms: Vec<_> = polys.iter().map(|p| pcs.commit(p).unwrap()).collect();
        let cm_refs: Vec<_> = cms.iter().collect();
        let point = Field::random(&mut prng);
        let challenge = Field::random(&mut prng);
        let evals: Vec<Field> = polys.iter().map(|p| p.eval(&point)).collect();

        let proof = pcs.batch_prove(&refs, &point, &challenge, 12).unwrap();
        let (cm, eval) = pcs.batch(&cm_refs, &evals, &challenge);
        assert!(pcs.verify(&cm, 12, &point, &eval, &proof).is_ok());
    }

    #[test]
    fn test_blind_factors_and_lagrange_basis() {
        let mut prng = ChaChaRng::from_seed([6u8; 32]);
        let pcs = KZGCommitmentScheme::new(12, &mut prng);
        let n = 8;
        let domain = EvaluationDomain::<Field>::new(n).unwrap();
        let evals: Vec<Field> = (0..n).map(|_| Field::random(&mut prng)).collect();
        let poly = FpPolynomial::ifft_with_domain(&domain, &evals);

        let lagrange_pcs = pcs.to_lagrange_basis(n).unwrap();
        let cm_lagrange = lagrange_pcs
            .commit(&FpPolynomial::from_coefs(evals.clone()))
            .unwrap();
        assert_eq!(cm_lagrange, pcs.commit(&poly).unwrap());

        // f(X) + (1 - X^n) * (b0 + b1 X)
        let blinds = [Field::random(&mut prng), Field::random(&mut prng)];
        let mut blinded = poly.clone();
        for (i, b) in blinds.iter().enumerate() {
            blinded.add_coef_assign(b, i);
            blinded.add_coef_assign(&b.neg(), n + i);
        }
        assert_eq!(
            pcs.apply_blind_factors(&cm_lagrange, &blinds, n),
            pcs.commit(&blinded).unwrap()
        );
        assert!(pcs.to_lagrange_basis(16).is_err());
    }

    #[test]
    fn test_srs_bytes() {
        let mut prng = ChaChaRng::from_seed([7u8; 32]);
        let pcs = KZGCommitmentScheme::new(6, &mut prng);
        let (g1_bytes, g2_bytes) = pcs.to_srs_bytes();
        assert_eq!(g1_bytes.len(), 7 * 64);
        assert_eq!(g2_bytes.len(), 128);
        // the generator (1, 2) in big-endian
        assert_eq!(g1_bytes[31], 1);
        assert_eq!(g1_bytes[63], 2);

        let parsed = KZGCommitmentScheme::from_srs_bytes(&g1_bytes, &g2_bytes).unwrap();
        assert_eq!(parsed.public_parameter_group_1, pcs.public_parameter_group_1);
        assert_eq!(parsed.public_parameter_group_2, pcs.public_parameter_group_2);

        assert!(KZGCommitmentScheme::from_srs_bytes(&g1_bytes[..100], &g2_bytes).is_err());
        let mut bad = g1_bytes.clone();
        bad[70] ^= 1;
        assert!(KZGCommitmentScheme::from_srs_bytes(&bad, &g2_bytes).is_err());

        let unchecked = pcs.to_unchecked_bytes();
        let parsed = KZGCommitmentScheme::from_unchecked_bytes(&unchecked).unwrap();
        assert_eq!(parsed.public_parameter_group_1, pcs.public_parameter_group_1);
        assert!(KZGCommitmentScheme::from_unchecked_bytes(&unchecked[..50]).is_err());
    }

    #[test]
    fn test_truncated_parameters() {
        let mut prng = ChaChaRng::from_seed([8u8; 32]);
        let pcs = KZGCommitmentScheme::new(4, &mut prng);

        // one G1 point and no G2 point
        let mut bytes = vec![];
        bytes.extend(1u32.to_le_bytes());
        bytes.extend(0u32.to_le_bytes());
        bytes.extend(pcs.public_parameter_group_1[0].to_unchecked_bytes());
        assert_eq!(
            KZGCommitmentScheme::from_unchecked_bytes(&bytes).unwrap_err(),
            PolyComSchemeError::DeserializationError
        );

        // no G1 point
        let mut bytes = vec![];
        bytes.extend(0u32.to_le_bytes());
        bytes.extend(2u32.to_le_bytes());
        for p in pcs.public_parameter_group_2.iter() {
            bytes.extend(p.to_unchecked_bytes());
        }
        assert_eq!(
            KZGCommitmentScheme::from_unchecked_bytes(&bytes).unwrap_err(),
            PolyComSchemeError::DeserializationError
        );

        let poly = FpPolynomial::from_coefs(vec![Field::one(), Field::one()]);
        let cm = pcs.commit(&poly).unwrap();
        let point = Field::one();
        let eval = poly.eval(&point);
        let proof = pcs.prove(&poly, &point, 1).unwrap();
        let broken = KZGCommitmentScheme::from_parameters(
            pcs.public_parameter_group_1.clone(),
            pcs.public_parameter_group_2[..1].to_vec(),
        );
        assert_eq!(
            broken.verify(&cm, 1, &point, &eval, &proof),
            Err(PolyComSchemeError::DeserializationError)
        );
        let mut transcript = Transcript::new(b"kzg truncated");
        assert_eq!(
            broken.batch_verify_diff_points(
                &mut transcript,
                &[cm],
                1,
                &[point],
                &[eval],
                &[proof],
                &Field::one()
            ),
            Err(PolyComSchemeError::DeserializationError)
        );
        assert!(pcs.verify(&cm, 1, &point, &eval, &proof).is_ok());
    }

    #[test]
    fn test_point_table_after_deserialization() {
        let mut prng = ChaChaRng::from_seed([9u8; 32]);
        let pcs = KZGCommitmentScheme::new(8, &mut prng);
        let bytes = bincode::serialize(&pcs).unwrap();
        let loaded: KZGCommitmentScheme = bincode::deserialize(&bytes).unwrap();
        assert_eq!(loaded.public_parameter_group_1, pcs.public_parameter_group_1);
        assert_eq!(loaded.public_parameter_group_2, pcs.public_parameter_group_2);
        assert_eq!(loaded.point_table.len(), 2 * 9);
        assert_eq!(loaded.point_table, pcs.point_table);

        let poly = FpPolynomial::<Field>::random(&mut prng, 8);
        assert_eq!(loaded.commit(&poly).unwrap(), pcs.commit(&poly).unwrap());

        let json = serde_json::to_string(&pcs).unwrap();
        let loaded: KZGCommitmentScheme = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.point_table.len(), 2 * 9);

        let shrunk = bincode::serialize(&KZGCommitmentScheme::from_parameters(
            pcs.public_parameter_group_1.clone(),
            pcs.public_parameter_group_2[..1].to_vec(),
        ))
        .unwrap();
        assert!(bincode::deserialize::<KZGCommitmentScheme>(&shrunk).is_err());
    }
}
