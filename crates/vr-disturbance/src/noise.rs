//! Gaussian noise disturbance.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::error::{DisturbanceError, DisturbanceResult};
use crate::source::Disturbance;

/// Zero-mean Gaussian white noise, independent of `t`.
///
/// With `seed = Some(s)` every run replays the same sequence; with `None`
/// the generator is seeded from OS entropy and runs are not reproducible.
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    std_dev: f64,
    seed: Option<u64>,
    rng: StdRng,
    distribution: Normal<f64>,
}

impl WhiteNoise {
    /// Create white noise with standard deviation and optional seed.
    ///
    /// # Errors
    ///
    /// Returns error if `std_dev` is negative or not finite.
    pub fn new(std_dev: f64, seed: Option<u64>) -> DisturbanceResult<Self> {
        let std_dev = vr_core::ensure_non_negative(std_dev, "std_dev must be finite and non-negative")?;
        let distribution = Normal::new(0.0, std_dev).map_err(|_| DisturbanceError::InvalidArg {
            what: "std_dev must be finite and non-negative",
        })?;
        Ok(Self {
            std_dev,
            seed,
            rng: rng_for(seed),
            distribution,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Restart the sequence from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

impl Disturbance for WhiteNoise {
    fn sample(&mut self, _t: f64) -> f64 {
        self.distribution.sample(&mut self.rng)
    }

    fn label(&self) -> &str {
        "white_noise"
    }
}
