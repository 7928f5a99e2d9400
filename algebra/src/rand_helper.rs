use rand_chacha::ChaChaRng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

fn fixed_seed_rng() -> ChaChaRng {
    let seed = [
        7, 0, 0, 0, 41, 0, 0, 0, 254, 0, 0, 0, 13, 17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0,
    ];
    ChaChaRng::from_seed(seed)
}

/// Randomness source for tests and benchmarks only.
///
/// Seeded from entropy, unless the environment sets `DETERMINISTIC_TEST_RNG=1`.
#[cfg(feature = "std")]
pub fn test_rng() -> impl RngCore + CryptoRng {
    let is_deterministic =
        std::env::vars().any(|(key, val)| key == "DETERMINISTIC_TEST_RNG" && val == "1");
    if is_deterministic {
        fixed_seed_rng()
    } else {
        ChaChaRng::from_entropy()
    }
}

/// Randomness source for tests and benchmarks only.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> impl RngCore + CryptoRng {
    fixed_seed_rng()
}

#[cfg(all(test, feature = "std"))]
mod test {
    use crate::bn254::BN254Scalar;
    use crate::traits::Scalar;

    #[test]
    fn deterministic_rng_repeats() {
        // entropy seeded by default
        let a = BN254Scalar::random(&mut super::test_rng());
        let b = BN254Scalar::random(&mut super::test_rng());
        assert_ne!(a, b);

        std::env::set_var("DETERMINISTIC_TEST_RNG", "1");
        let a = BN254Scalar::random(&mut super::test_rng());
        let b = BN254Scalar::random(&mut super::test_rng());
        assert_eq!(a, b);
        std::env::remove_var("DETERMINISTIC_TEST_RNG");
    }
}
