//! Accelerometer noise model for simulation
//!
//! Per-axis Gaussian jitter and random read dropouts, seeded for
//! reproducible runs.

use crate::config::SimulationConfig;
use crate::core::types::MotionSample;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, StandardNormal, Uniform};

/// Seeded noise applied to simulated readings
#[derive(Clone)]
pub struct SensorNoise {
    rng: SmallRng,
    /// Per-axis standard deviation (g); 0 disables jitter
    stddev: f64,
    /// Probability of a failed read, clamped to [0, 1]
    dropout_rate: f64,
}

impl SensorNoise {
    /// Create a noise model
    ///
    /// Seed 0 draws from entropy, any other seed is reproducible.
    /// Negative or NaN parameters count as 0.
    pub fn new(seed: u64, stddev: f64, dropout_rate: f64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };

        Self {
            rng,
            stddev: stddev.max(0.0),
            dropout_rate: dropout_rate.clamp(0.0, 1.0).max(0.0),
        }
    }

    /// Noise model described by the `[sensor.simulation]` section
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.random_seed, config.noise_stddev, config.dropout_rate)
    }

    /// Add independent jitter to each axis of a clean reading
    pub fn jitter(&mut self, clean: MotionSample) -> MotionSample {
        MotionSample::new(
            clean.x + self.axis_noise(),
            clean.y + self.axis_noise(),
            clean.z + self.axis_noise(),
        )
    }

    /// Decide whether this read fails
    pub fn dropout(&mut self) -> bool {
        self.dropout_rate > 0.0
            && Uniform::new(0.0f64, 1.0).sample(&mut self.rng) < self.dropout_rate
    }

    #[inline]
    fn axis_noise(&mut self) -> f64 {
        if self.stddev == 0.0 {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * self.stddev
    }
}
