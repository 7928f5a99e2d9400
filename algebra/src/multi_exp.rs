//! Bucket multi-scalar multiplication over BN254 G1 with a precomputed
//! endomorphism table.
//!
//! Each input point `P` is stored next to `phi(P)`, so every 254-bit scalar is
//! consumed as two GLV halves of at most 128 bits. That halves the number of
//! windows at the cost of twice as many bucket additions per window.

use crate::bn254::{endomorphism_affine, split_scalar, Fr, G1Affine, G1Projective};
use crate::prelude::*;
use crate::traits::{limbs_to_radix_2_power_w, pippenger_window, sum_buckets};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Build the table `[P0, phi(P0), P1, phi(P1), ...]`.
pub fn generate_pippenger_point_table(points: &[G1Affine]) -> Vec<G1Affine> {
    let mut table = Vec::with_capacity(points.len() * 2);
    for p in points {
        table.push(*p);
        table.push(endomorphism_affine(p));
    }
    table
}

/// Compute `sum(scalars[i] * P_i)` from a table built by
/// [`generate_pippenger_point_table`].
pub fn pippenger_with_table(scalars: &[Fr], table: &[G1Affine]) -> G1Projective {
    if scalars.is_empty() || table.len() != scalars.len() * 2 {
        return G1Projective::identity();
    }
    let timer = ark_std::start_timer!(|| "Pippenger with endomorphism table");

    // k * P = k1 * P - k2 * phi(P)
    let mut points = Vec::with_capacity(table.len());
    let mut digits = Vec::with_capacity(table.len());
    let w = pippenger_window(table.len());
    for (k, pair) in scalars.iter().zip(table.chunks(2)) {
        let ((k1_neg, k1), (k2_neg, k2)) = split_scalar(k);
        points.push(if k1_neg { -pair[0] } else { pair[0] });
        points.push(if k2_neg { pair[1] } else { -pair[1] });
        digits.push(limbs_to_radix_2_power_w(&k1, w));
        digits.push(limbs_to_radix_2_power_w(&k2, w));
    }
    let digits_count = digits.iter().map(|d| d.len()).max().unwrap_or(0);

    let window_sums: Vec<G1Projective> = ark_std::cfg_into_iter!(0..digits_count)
        .map(|index| {
            let mut buckets = vec![G1Projective::identity(); 1 << (w - 1)];
            for (d, p) in digits.iter().zip(points.iter()) {
                match d.get(index) {
                    Some(digit) if *digit > 0 => {
                        buckets[(*digit - 1) as usize] += p;
                    }
                    Some(digit) if *digit < 0 => {
                        buckets[(-*digit - 1) as usize] -= p;
                    }
                    _ => {}
                }
            }
            sum_buckets(&buckets, G1Projective::identity(), |a, b| a.add(b))
        })
        .collect();

    let mut res = G1Projective::identity();
    for sum in window_sums.iter().rev() {
        for _ in 0..w {
            res = res.double();
        }
        res += sum;
    }

    ark_std::end_timer!(timer);
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(scalars: &[Fr], points: &[G1Projective]) -> G1Projective {
        scalars
            .iter()
            .zip(points.iter())
            .fold(G1Projective::identity(), |acc, (s, p)| {
                acc.add(&p.mul_by_limbs(&s.into_raw()))
            })
    }

    #[test]
    fn table_pippenger_equals_naive() {
        let mut prng = test_rng();
        for n in [1usize, 3, 40, 130] {
            let scalars: Vec<Fr> = (0..n).map(|_| Fr::random(&mut prng)).collect();
            let points: Vec<G1Projective> =
                (0..n).map(|_| G1Projective::random(&mut prng)).collect();
            let table = generate_pippenger_point_table(&G1Projective::batch_normalize(&points));
            assert_eq!(table.len(), 2 * n);
            assert_eq!(pippenger_with_table(&scalars, &table), naive(&scalars, &points));
        }
    }

    #[test]
    fn table_pippenger_edge_cases() {
        let mut prng = test_rng();
        let g = G1Projective::generator();
        let table = generate_pippenger_point_table(&[g.to_affine(), G1Affine::identity()]);

        assert!(pippenger_with_table(&[], &[]).is_identity());
        assert!(pippenger_with_table(&[Fr::one()], &table).is_identity());

        let k = Fr::random(&mut prng);
        let res = pippenger_with_table(&[k, Fr::random(&mut prng)], &table);
        assert_eq!(res, g.mul_by_limbs(&k.into_raw()));

        let res = pippenger_with_table(&[Fr::zero(), Fr::zero()], &table);
        assert!(res.is_identity());
        let res = pippenger_with_table(&[-Fr::one(), Fr::zero()], &table);
        assert_eq!(res, -g);
    }
}
