//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Creates a reproducible RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws from `N(mean, std_dev)`.
///
/// A zero standard deviation returns `mean` without consuming randomness.
/// Callers validate `std_dev` upstream; an invalid value also yields `mean`.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return mean;
    }
    match Normal::new(mean, std_dev) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_zero_std_dev_is_mean() {
        let mut rng = create_rng(1);
        assert_eq!(gaussian(&mut rng, 3.5, 0.0), 3.5);
    }

    #[test]
    fn test_gaussian_mean() {
        let mut rng = create_rng(42);
        let n = 20_000;
        let mean = (0..n).map(|_| gaussian(&mut rng, 1.0, 0.1)).sum::<f64>() / n as f64;
        assert!((mean - 1.0).abs() < 0.01, "sample mean {mean}");
    }
}
