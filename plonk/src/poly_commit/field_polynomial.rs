use crate::poly_commit::evaluation_domain::EvaluationDomain;
use quill_algebra::prelude::*;

/// Field polynomial in coefficient form, low-order coefficient first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpPolynomial<F> {
    /// Coefficients of the polynomial
    pub coefs: Vec<F>,
}

impl<F: Scalar> FpPolynomial<F> {
    /// Return the polynomial coefs reference.
    pub fn get_coefs_ref(&self) -> &[F] {
        self.coefs.as_slice()
    }

    /// Return the constant zero polynomial
    /// # Example
    /// ```
    /// use quill_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use quill_algebra::bn254::BN254Scalar;
    /// use quill_algebra::{Zero, One};
    /// let poly = FpPolynomial::<BN254Scalar>::zero();
    /// let zero = BN254Scalar::zero();
    /// assert_eq!(poly.degree(), 0);
    /// assert_eq!(poly.eval(&zero), zero);
    /// assert_eq!(poly.eval(&BN254Scalar::one()), zero);
    /// ```
    pub fn zero() -> Self {
        Self::from_coefs(vec![F::zero()])
    }

    /// Return the constant one polynomial
    pub fn one() -> Self {
        Self::from_coefs(vec![F::one()])
    }

    /// Build a polynomial from the coefficient vector, low-order coefficient first.
    /// High-order zero coefficient are trimmed.
    /// # Example
    /// ```
    /// use quill_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use quill_algebra::bn254::BN254Scalar;
    /// use quill_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let five = two.add(&two).add(&one);
    /// let poly = FpPolynomial::from_coefs(vec![one, zero, one]);
    /// assert_eq!(poly.degree(), 2);
    /// assert_eq!(poly.eval(&zero), one);
    /// assert_eq!(poly.eval(&one), two);
    /// assert_eq!(poly.eval(&two), five);
    /// let poly2 = FpPolynomial::from_coefs(vec![one, zero, one, zero, zero, zero]);
    /// assert_eq!(poly, poly2);
    /// ```
    pub fn from_coefs(coefs: Vec<F>) -> Self {
        let mut p = FpPolynomial { coefs };
        p.trim_coefs();
        p
    }

    /// Build a polynomial from its zeroes/roots.
    /// # Example
    /// ```
    /// use quill_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use quill_algebra::bn254::BN254Scalar;
    /// use quill_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let five = two.add(&two).add(&one);
    /// let poly = FpPolynomial::from_zeroes(&[one, zero, five, two]);
    /// assert_eq!(poly.degree(), 4);
    /// assert_eq!(poly.eval(&five), zero);
    /// assert_eq!(poly.eval(&two), zero);
    /// ```
    pub fn from_zeroes(zeroes: &[F]) -> Self {
        let mut r = Self::one();
        for root in zeroes.iter() {
            let mut p = r.clone();
            r.coefs.insert(0, F::zero()); // multiply by X
            p.mul_scalar_assign(root);
            r.sub_assign(&p); // r = r * (X - root)
        }
        r.trim_coefs();
        r
    }

    /// Return a polynomial of `degree` + 1 uniformly random coefficients.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R, degree: usize) -> FpPolynomial<F> {
        let coefs = (0..degree + 1).map(|_| F::random(prng)).collect();
        Self::from_coefs(coefs)
    }

    /// Remove high degree zero-coefficients
    fn trim_coefs(&mut self) {
        while self.coefs.len() > 1 && self.coefs.last().map_or(false, |c| c.is_zero()) {
            self.coefs.pop();
        }
    }

    /// Return degree of the polynomial
    pub fn degree(&self) -> usize {
        self.coefs.len().saturating_sub(1)
    }

    /// Test if polynomial is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefs.iter().all(|c| c.is_zero())
    }

    /// Evaluate a polynomial on a point with Horner's rule.
    pub fn eval(&self, point: &F) -> F {
        self.coefs
            .iter()
            .rev()
            .fold(F::zero(), |acc, coef| acc.mul(point).add(coef))
    }

    /// Add another polynomial to self.
    pub fn add_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.add_assign(other_coef);
        }
        let n = self.coefs.len();
        if n < other.coefs.len() {
            self.coefs.extend_from_slice(&other.coefs[n..]);
        }
        self.trim_coefs();
    }

    /// Add with another polynomial, producing a new polynomial.
    /// # Example:
    /// ```
    /// use quill_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use quill_algebra::bn254::BN254Scalar;
    /// use quill_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let three = two.add(&one);
    /// let poly1 = FpPolynomial::from_coefs(vec![zero, one, two, three]);
    /// let poly2 = FpPolynomial::from_coefs(vec![three, two, one, zero, one]);
    /// let expected = FpPolynomial::from_coefs(vec![three, three, three, three, one]);
    /// assert_eq!(poly1.add(&poly2), expected);
    /// assert_eq!(poly2.add(&poly1), expected);
    /// ```
    pub fn add(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.add_assign(other);
        new
    }

    /// Subtracts another polynomial from self.
    pub fn sub_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.sub_assign(other_coef);
        }
        let n = self.coefs.len();
        if other.coefs.len() > n {
            for other_coef in other.coefs[n..].iter() {
                self.coefs.push(other_coef.neg());
            }
        }
        self.trim_coefs();
    }

    /// Subtract another polynomial from self, producing a new polynomial.
    /// # Example:
    /// ```
    /// use quill_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use quill_algebra::bn254::BN254Scalar;
    /// use quill_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let three = two.add(&one);
    /// let poly1 = FpPolynomial::from_coefs(vec![three, three, two]);
    /// let poly2 = FpPolynomial::from_coefs(vec![three, two, one, one]);
    /// let expected = FpPolynomial::from_coefs(vec![zero, one, one, one.neg()]);
    /// assert_eq!(poly1.sub(&poly2), expected);
    /// ```
    pub fn sub(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.sub_assign(other);
        new
    }

    /// Negate the coefficients.
    pub fn neg_assign(&mut self) {
        for coef in self.coefs.iter_mut() {
            *coef = coef.neg();
        }
    }

    /// Negate the coefficients into a new polynomial.
    pub fn neg(&self) -> Self {
        let mut new = self.clone();
        new.neg_assign();
        new
    }

    /// Add `coef` to the coefficient of order `order`.
    /// # Example:
    /// ```
    /// use quill_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use quill_algebra::bn254::BN254Scalar;
    /// use quill_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let mut poly = FpPolynomial::from_coefs(vec![zero, one, one]);
    /// poly.add_coef_assign(&one, 1);
    /// assert_eq!(poly, FpPolynomial::from_coefs(vec![zero, two, one]));
    /// poly.add_coef_assign(&one, 3);
    /// poly.add_coef_assign(&one.neg(), 3);
    /// assert_eq!(poly, FpPolynomial::from_coefs(vec![zero, two, one]));
    /// ```
    pub fn add_coef_assign(&mut self, coef: &F, order: usize) {
        if self.coefs.len() <= order {
            self.coefs.resize(order + 1, F::zero());
        }
        self.coefs[order].add_assign(coef);
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar.
    pub fn mul_scalar_assign(&mut self, scalar: &F) {
        for coef in self.coefs.iter_mut() {
            coef.mul_assign(scalar)
        }
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar into a new polynomial.
    pub fn mul_scalar(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        new.mul_scalar_assign(scalar);
        new
    }

    /// Multiply the polynomial variable by a scalar.
    /// mul_var(\sum a_i X^i, b) = \sum a_i b^i X^i
    /// # Example:
    /// ```
    /// use quill_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use quill_algebra::bn254::BN254Scalar;
    /// use quill_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let four = two.add(&two);
    /// let poly = FpPolynomial::from_coefs(vec![zero, one, one]);
    /// assert_eq!(poly.mul_var(&two), FpPolynomial::from_coefs(vec![zero, two, four]));
    /// ```
    pub fn mul_var(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        let mut r = F::one();
        for coef in new.coefs.iter_mut() {
            coef.mul_assign(&r);
            r.mul_assign(scalar);
        }
        new.trim_coefs();
        new
    }

    /// Multiply by `X^n`.
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let mut coefs = vec![F::zero(); n];
        coefs.extend_from_slice(&self.coefs);
        Self { coefs }
    }

    /// Divide polynomial to produce the quotient and remainder polynomials.
    /// Return `None` if the divisor is the zero polynomial.
    /// # Example:
    /// ```
    /// use quill_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use quill_algebra::bn254::BN254Scalar;
    /// use quill_algebra::{Zero, One};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let poly = FpPolynomial::from_coefs(vec![one, one, one]);
    /// let divisor = FpPolynomial::from_coefs(vec![one, one]);
    /// let (q, r) = poly.div_rem(&divisor).unwrap();
    /// assert_eq!(q, FpPolynomial::from_coefs(vec![zero, one]));
    /// assert_eq!(r, FpPolynomial::from_coefs(vec![one]));
    /// ```
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        if divisor.is_zero() {
            return None;
        }
        let k = self.coefs.len();
        let l = divisor.coefs.len();
        if l > k {
            return Some((Self::zero(), self.clone()));
        }
        let bl_inv = divisor.coefs[l - 1].inv().ok()?;
        let mut rem = self.coefs.clone();
        let mut quo = vec![F::zero(); k - l + 1];
        for i in (0..(k - l + 1)).rev() {
            let qi = bl_inv.mul(&rem[i + l - 1]);
            for (j, d) in divisor.coefs.iter().enumerate() {
                rem[i + j].sub_assign(&qi.mul(d));
            }
            quo[i] = qi;
        }
        rem.truncate(l - 1);
        if rem.is_empty() {
            rem.push(F::zero());
        }
        Some((Self::from_coefs(quo), Self::from_coefs(rem)))
    }

    /// Compute `(self(X) - self(point)) / (X - point)` by synthetic division.
    /// The remainder `self(point)` is dropped.
    pub fn divide_by_x_minus(&self, point: &F) -> Self {
        let n = self.coefs.len();
        if n <= 1 {
            return Self::zero();
        }
        let mut quo = vec![F::zero(); n - 1];
        let mut carry = F::zero();
        for i in (1..n).rev() {
            carry = carry.mul(point).add(&self.coefs[i]);
            quo[i - 1] = carry;
        }
        Self::from_coefs(quo)
    }
}

impl<F: Domain> FpPolynomial<F> {
    /// Reduce the coefficients modulo `X^n - 1` into a vector of length `n`.
    fn fold_coefs(&self, n: usize) -> Vec<F> {
        let mut folded = vec![F::zero(); n];
        for (i, c) in self.coefs.iter().enumerate() {
            folded[i % n].add_assign(c);
        }
        folded
    }

    /// Evaluate the polynomial over the domain `H`.
    /// Polynomials longer than the domain are first reduced modulo `X^n - 1`,
    /// which leaves their values on `H` unchanged.
    pub fn fft_with_domain(&self, domain: &EvaluationDomain<F>) -> Vec<F> {
        let mut evals = self.fold_coefs(domain.size);
        domain.fft_in_place(&mut evals);
        evals
    }

    /// Evaluate the polynomial over the coset `g * H`.
    pub fn coset_fft_with_domain(&self, domain: &EvaluationDomain<F>) -> Vec<F> {
        self.mul_var(&domain.generator).fft_with_domain(domain)
    }

    /// Interpolate the polynomial taking `values` over `H`.
    /// Missing values are treated as zero.
    pub fn ifft_with_domain(domain: &EvaluationDomain<F>, values: &[F]) -> Self {
        assert!(values.len() <= domain.size, "too many values for the domain");
        let mut coefs = values.to_vec();
        coefs.resize(domain.size, F::zero());
        domain.ifft_in_place(&mut coefs);
        Self::from_coefs(coefs)
    }

    /// Interpolate the polynomial taking `values` over `g * H`.
    pub fn coset_ifft_with_domain(domain: &EvaluationDomain<F>, values: &[F]) -> Self {
        assert!(values.len() <= domain.size, "too many values for the domain");
        let mut coefs = values.to_vec();
        coefs.resize(domain.size, F::zero());
        domain.coset_ifft_in_place(&mut coefs);
        Self::from_coefs(coefs)
    }

    /// Multiply two polynomials through the smallest domain holding the product.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let n = self.coefs.len() + other.coefs.len() - 1;
        match EvaluationDomain::with_min_size(n) {
            Ok(domain) => {
                let a = self.fft_with_domain(&domain);
                let b = other.fft_with_domain(&domain);
                let prod: Vec<F> = a.iter().zip(b.iter()).map(|(x, y)| x.mul(y)).collect();
                Self::ifft_with_domain(&domain, &prod)
            }
            Err(_) => self.mul_schoolbook(other),
        }
    }

    fn mul_schoolbook(&self, other: &Self) -> Self {
        let mut coefs = vec![F::zero(); self.coefs.len() + other.coefs.len() - 1];
        for (i, a) in self.coefs.iter().enumerate() {
            for (j, b) in other.coefs.iter().enumerate() {
                coefs[i + j].add_assign(&a.mul(b));
            }
        }
        Self::from_coefs(coefs)
    }
}

#[cfg(test)]
mod test {
    use crate::poly_commit::{evaluation_domain::EvaluationDomain, field_polynomial::FpPolynomial};
    use quill_algebra::{bn254::BN254Scalar, prelude::*};
    use rand_chacha::ChaChaRng;

    type F = BN254Scalar;

    #[test]
    fn from_zeroes() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let zeroes: Vec<F> = (0..10).map(|_| F::random(&mut prng)).collect();
        let poly = FpPolynomial::from_zeroes(&zeroes[..]);
        assert_eq!(poly.degree(), 10);
        for root in zeroes.iter() {
            assert_eq!(F::zero(), poly.eval(root));
        }
    }

    #[test]
    fn test_divide_by_x_minus() {
        let mut prng = ChaChaRng::from_seed([1u8; 32]);
        let poly = FpPolynomial::<F>::random(&mut prng, 20);
        let point = F::random(&mut prng);
        let quo = poly.divide_by_x_minus(&point);

        let mut expected = poly.clone();
        expected.add_coef_assign(&poly.eval(&point).neg(), 0);
        let divisor = FpPolynomial::from_coefs(vec![point.neg(), F::one()]);
        let (q, r) = expected.div_rem(&divisor).unwrap();
        assert!(r.is_zero());
        assert_eq!(q, quo);
        assert!(poly.div_rem(&FpPolynomial::zero()).is_none());
    }

    #[test]
    fn test_fft_with_domain() {
        let mut prng = ChaChaRng::from_seed([2u8; 32]);
        let domain = EvaluationDomain::<F>::new(32).unwrap();
        let poly = FpPolynomial::<F>::random(&mut prng, 31);

        let evals = poly.fft_with_domain(&domain);
        for (i, e) in evals.iter().enumerate() {
            assert_eq!(*e, poly.eval(&domain.element(i)));
        }
        assert_eq!(FpPolynomial::ifft_with_domain(&domain, &evals), poly);

        let coset_evals = poly.coset_fft_with_domain(&domain);
        let g = domain.generator;
        assert_eq!(coset_evals[7], poly.eval(&g.mul(&domain.element(7))));
        assert_eq!(
            FpPolynomial::coset_ifft_with_domain(&domain, &coset_evals),
            poly
        );

        // values of a long polynomial on H are those of its reduction mod X^n - 1
        let long = FpPolynomial::<F>::random(&mut prng, 70);
        let evals = long.fft_with_domain(&domain);
        assert_eq!(evals[3], long.eval(&domain.element(3)));
    }

    #[test]
    fn test_mul() {
        let mut prng = ChaChaRng::from_seed([3u8; 32]);
        let a = FpPolynomial::<F>::random(&mut prng, 9);
        let b = FpPolynomial::<F>::random(&mut prng, 14);
        let c = a.mul(&b);
        assert_eq!(c.degree(), 23);
        assert_eq!(c, a.mul_schoolbook(&b));
        let x = F::random(&mut prng);
        assert_eq!(c.eval(&x), a.eval(&x).mul(&b.eval(&x)));
        assert_eq!(a.shift(2).eval(&x), a.eval(&x).mul(&x.square()));
    }
}
