//! Measurement noise sources
//!
//! The sensor owns its noise source so that scans are reproducible from a seed, or entirely
//! noise free when testing.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A source of zero-mean Gaussian noise.
pub trait NoiseSource {
    /// Draw one sample with the given standard deviation.
    fn gaussian(&mut self, std_dev: f64) -> f64;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Pseudo-random Gaussian noise from a seedable generator.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: SmallRng,
}

/// A noise source which never perturbs anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNoise;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SeededNoise {
    /// Create a generator which produces the same sequence for the same seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn gaussian(&mut self, std_dev: f64) -> f64 {
        if std_dev == 0.0 {
            return 0.0;
        }

        let n: f64 = self.rng.sample(StandardNormal);
        n * std_dev
    }
}

impl NoiseSource for NoNoise {
    fn gaussian(&mut self, _std_dev: f64) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deterministic_seed() {
        let mut a = SeededNoise::new(42);
        let mut b = SeededNoise::new(42);

        for _ in 0..100 {
            assert_eq!(a.gaussian(1.0), b.gaussian(1.0));
        }
    }

    #[test]
    fn test_zero_std_dev() {
        let mut n = SeededNoise::new(7);
        for _ in 0..10 {
            assert_eq!(n.gaussian(0.0), 0.0);
        }
        assert_eq!(NoNoise.gaussian(10.0), 0.0);
    }

    #[test]
    fn test_statistics() {
        let mut n = SeededNoise::new(1234);
        let samples: Vec<f64> = (0..20_000).map(|_| n.gaussian(2.0)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.1, "mean {}", mean);
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std dev {}", var.sqrt());
    }
}
