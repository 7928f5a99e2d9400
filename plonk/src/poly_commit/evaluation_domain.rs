//! Radix-2 evaluation domains: the multiplicative subgroup `H = <omega>` of
//! order `n = 2^k`, together with the coset `g * H` shifted by the
//! multiplicative generator of the field.
//!
//! Evaluations are stored in natural order, i.e. the `i`-th value belongs to
//! `omega^i` (or `g * omega^i` on the coset).

use crate::poly_commit::errors::PolyComSchemeError;
use quill_algebra::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this length the butterflies of a layer are not split across threads.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_CHUNK: usize = 1 << 10;

/// A multiplicative subgroup of the field used for FFTs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationDomain<F> {
    /// The number of points `n`.
    pub size: usize,
    /// `log2(n)`.
    pub log_size: u32,
    /// A primitive `n`-th root of unity `omega`.
    pub group_gen: F,
    /// `omega^{-1}`.
    pub group_gen_inv: F,
    /// `n^{-1}`.
    pub size_inv: F,
    /// The coset shift `g`, a multiplicative generator of the field.
    pub generator: F,
    /// `g^{-1}`.
    pub generator_inv: F,
}

impl<F: Domain> EvaluationDomain<F> {
    /// Build the domain of exactly `size` points.
    /// Fails if `size` is not a power of two or does not divide `q - 1`.
    pub fn new(size: usize) -> Result<Self, PolyComSchemeError> {
        let group_gen = F::get_root_of_unity(size).ok_or(PolyComSchemeError::DomainSizeError)?;
        let group_gen_inv = group_gen.inv()?;
        let size_inv = F::from(size as u64).inv()?;
        let generator = F::multiplicative_generator();
        let generator_inv = generator.inv()?;
        Ok(Self {
            size,
            log_size: size.trailing_zeros(),
            group_gen,
            group_gen_inv,
            size_inv,
            generator,
            generator_inv,
        })
    }

    /// Build the smallest domain holding at least `num_coefs` points.
    pub fn with_min_size(num_coefs: usize) -> Result<Self, PolyComSchemeError> {
        Self::new(num_coefs.max(1).next_power_of_two())
    }

    /// Return `omega^i`.
    pub fn element(&self, i: usize) -> F {
        self.group_gen.pow(&[i as u64])
    }

    /// Return `[1, omega, omega^2, ..., omega^{n-1}]`.
    pub fn elements(&self) -> Vec<F> {
        powers(&self.group_gen, self.size)
    }

    /// Evaluate the coefficients `coefs` (of length `n`) over the domain.
    pub fn fft_in_place(&self, coefs: &mut [F]) {
        assert_eq!(coefs.len(), self.size, "fft input length mismatch");
        radix2_fft(coefs, &self.group_gen, self.log_size);
    }

    /// Interpolate the evaluations `evals` (of length `n`) into coefficients.
    pub fn ifft_in_place(&self, evals: &mut [F]) {
        assert_eq!(evals.len(), self.size, "ifft input length mismatch");
        radix2_fft(evals, &self.group_gen_inv, self.log_size);
        ark_std::cfg_iter_mut!(evals).for_each(|v| v.mul_assign(&self.size_inv));
    }

    /// Evaluate the coefficients `coefs` over the coset `g * H`.
    pub fn coset_fft_in_place(&self, coefs: &mut [F]) {
        distribute_powers(coefs, &self.generator);
        self.fft_in_place(coefs);
    }

    /// Interpolate evaluations taken over the coset `g * H`.
    pub fn coset_ifft_in_place(&self, evals: &mut [F]) {
        self.ifft_in_place(evals);
        distribute_powers(evals, &self.generator_inv);
    }

    /// Return `Z_H(tau) = tau^n - 1`.
    pub fn evaluate_vanishing_polynomial(&self, tau: &F) -> F {
        tau.pow(&[self.size as u64]).sub(&F::one())
    }

    /// Return the evaluations of `Z_H` over the coset `g * H`.
    /// The value `g^n * omega^{i n} - 1 = g^n - 1` is the same on every point.
    pub fn vanishing_polynomial_on_coset(&self) -> F {
        self.evaluate_vanishing_polynomial(&self.generator)
    }

    /// Return `[L_0(tau), ..., L_{n-1}(tau)]` for the Lagrange basis of the domain.
    pub fn evaluate_all_lagrange_coefficients(&self, tau: &F) -> Vec<F> {
        let z_h_at_tau = self.evaluate_vanishing_polynomial(tau);
        if z_h_at_tau.is_zero() {
            // tau is a point of the domain
            let mut res = vec![F::zero(); self.size];
            let mut omega_i = F::one();
            for v in res.iter_mut() {
                if omega_i == *tau {
                    *v = F::one();
                    break;
                }
                omega_i.mul_assign(&self.group_gen);
            }
            return res;
        }

        // L_i(tau) = Z_H(tau) * omega^i / (n * (tau - omega^i))
        let elements = self.elements();
        let mut denominators: Vec<F> = elements.iter().map(|w| tau.sub(w)).collect();
        batch_inversion(&mut denominators);
        let scale = z_h_at_tau.mul(&self.size_inv);
        elements
            .iter()
            .zip(denominators.iter())
            .map(|(w, d)| scale.mul(w).mul(d))
            .collect()
    }

    /// Return `L_0(tau) = (tau^n - 1) / (n * (tau - 1))`.
    pub fn first_lagrange_eval(&self, tau: &F) -> F {
        if *tau == F::one() {
            return F::one();
        }
        let z_h_at_tau = self.evaluate_vanishing_polynomial(tau);
        match tau.sub(&F::one()).inv() {
            Ok(denominator) => z_h_at_tau.mul(&self.size_inv).mul(&denominator),
            Err(_) => F::zero(),
        }
    }
}

/// Return `[1, base, base^2, ..., base^{n-1}]`.
pub fn powers<F: Scalar>(base: &F, n: usize) -> Vec<F> {
    let mut res = Vec::with_capacity(n);
    let mut cur = F::one();
    for _ in 0..n {
        res.push(cur);
        cur.mul_assign(base);
    }
    res
}

/// Multiply the `i`-th value by `base^i`.
pub fn distribute_powers<F: Scalar>(values: &mut [F], base: &F) {
    let mut cur = F::one();
    for v in values.iter_mut() {
        v.mul_assign(&cur);
        cur.mul_assign(base);
    }
}

/// Invert every non-zero value with a single field inversion.
/// Zero values are left untouched.
pub fn batch_inversion<F: Scalar>(values: &mut [F]) {
    let mut prod = Vec::with_capacity(values.len());
    let mut acc = F::one();
    for v in values.iter().filter(|v| !v.is_zero()) {
        acc.mul_assign(v);
        prod.push(acc);
    }

    let mut acc_inv = match acc.inv() {
        Ok(v) => v,
        Err(_) => return,
    };

    for (v, p) in values
        .iter_mut()
        .rev()
        .filter(|v| !v.is_zero())
        .zip(prod.into_iter().rev().skip(1).map(Some).chain(Some(None)))
    {
        let new_acc = acc_inv.mul(&*v);
        *v = match p {
            Some(p) => acc_inv.mul(&p),
            None => acc_inv,
        };
        acc_inv = new_acc;
    }
}

#[inline]
fn bitreverse(mut n: usize, log_n: u32) -> usize {
    let mut r = 0;
    for _ in 0..log_n {
        r = (r << 1) | (n & 1);
        n >>= 1;
    }
    r
}

/// Iterative Cooley-Tukey transform with the input permuted into bit-reversed order.
fn radix2_fft<F: Scalar>(a: &mut [F], omega: &F, log_n: u32) {
    let n = a.len();
    if n <= 1 {
        return;
    }
    for k in 0..n {
        let rk = bitreverse(k, log_n);
        if k < rk {
            a.swap(rk, k);
        }
    }

    let mut m = 1;
    for _ in 0..log_n {
        let w_m = omega.pow(&[(n / (2 * m)) as u64]);
        let twiddles = powers(&w_m, m);

        #[cfg(feature = "parallel")]
        {
            if n >= MIN_PARALLEL_CHUNK {
                a.par_chunks_mut(2 * m)
                    .for_each(|chunk| butterfly(chunk, &twiddles, m));
            } else {
                a.chunks_mut(2 * m)
                    .for_each(|chunk| butterfly(chunk, &twiddles, m));
            }
        }
        #[cfg(not(feature = "parallel"))]
        a.chunks_mut(2 * m)
            .for_each(|chunk| butterfly(chunk, &twiddles, m));

        m *= 2;
    }
}

#[inline]
fn butterfly<F: Scalar>(chunk: &mut [F], twiddles: &[F], m: usize) {
    let (lo, hi) = chunk.split_at_mut(m);
    for ((x, y), w) in lo.iter_mut().zip(hi.iter_mut()).zip(twiddles.iter()) {
        let t = y.mul(w);
        *y = x.sub(&t);
        x.add_assign(&t);
    }
}
