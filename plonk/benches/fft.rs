use criterion::{criterion_group, criterion_main, Criterion};
use quill_algebra::{bn254::BN254Scalar, prelude::*};
use quill_plonk::poly_commit::{
    evaluation_domain::EvaluationDomain, field_polynomial::FpPolynomial,
};

fn bench_fft(c: &mut Criterion) {
    let mut prng = test_rng();
    let n = 1 << 14;
    let domain = EvaluationDomain::<BN254Scalar>::new(n).unwrap();
    let poly = FpPolynomial::<BN254Scalar>::random(&mut prng, n - 1);
    let evals = poly.fft_with_domain(&domain);

    let mut fft_group = c.benchmark_group("bench_fft");
    fft_group.sample_size(10);
    fft_group.bench_function("fft".to_string(), |b| {
        b.iter(|| poly.fft_with_domain(&domain))
    });
    fft_group.bench_function("ifft".to_string(), |b| {
        b.iter(|| FpPolynomial::ifft_with_domain(&domain, &evals))
    });
    fft_group.bench_function("coset fft".to_string(), |b| {
        b.iter(|| poly.coset_fft_with_domain(&domain))
    });
    fft_group.finish();
}

criterion_group!(benches, bench_fft);
criterion_main!(benches);
