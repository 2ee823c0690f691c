//! Simulated accelerometer for hardware-free runs
//!
//! The simulated device lies flat and is rocked back and forth about its x
//! axis. With tilt θ, gravity projects onto the sensor axes as:
//!
//! ```text
//! x ≈ 0          (no roll)
//! y = sin θ      (axis of interest)
//! z = cos θ      (≈ 1 while roughly flat)
//! ```
//!
//! θ follows a sine sweep of `amplitude_deg` over `period_ms`. Gaussian
//! noise is added per axis, and reads can be made to fail at random to
//! exercise the sensor-unavailable path.
//!
//! With the default 30° amplitude the sweep passes beyond the point where
//! z drops under 0.9, so the extremes of every sweep are rejected by the
//! gate and the last accepted frame stays on screen.

pub mod noise;

use super::MotionSource;
use crate::config::SimulationConfig;
use crate::core::types::MotionSample;
use crate::error::{Error, Result};
use noise::SensorNoise;
use std::f64::consts::TAU;
use std::time::{Duration, Instant};

/// Simulated accelerometer with configurable sweep and noise
pub struct SimulatedAccelerometer {
    config: SimulationConfig,
    noise: SensorNoise,
    started: Instant,
}

impl SimulatedAccelerometer {
    /// Create a new simulated accelerometer
    pub fn new(config: &SimulationConfig) -> Self {
        log::info!(
            "Simulated accelerometer: ±{:.1}° over {}ms, noise σ={} g, dropout {:.0}%",
            config.amplitude_deg,
            config.period_ms,
            config.noise_stddev,
            config.dropout_rate * 100.0
        );

        Self {
            config: config.clone(),
            noise: SensorNoise::from_config(config),
            started: Instant::now(),
        }
    }

    /// Tilt of the simulated device at time `t` (degrees)
    pub fn tilt_at(&self, t: Duration) -> f64 {
        let period = self.config.period_ms.max(1) as f64 / 1000.0;
        let phase = TAU * t.as_secs_f64() / period;
        self.config.amplitude_deg * phase.sin()
    }

    /// Generate the reading at time `t` since start
    pub fn sample_at(&mut self, t: Duration) -> Result<MotionSample> {
        if self.noise.dropout() {
            return Err(Error::SensorUnavailable("simulated dropout".to_string()));
        }

        let theta = self.tilt_at(t).to_radians();
        Ok(self
            .noise
            .jitter(MotionSample::new(0.0, theta.sin(), theta.cos())))
    }
}

impl MotionSource for SimulatedAccelerometer {
    fn name(&self) -> &str {
        "simulated"
    }

    fn read(&mut self) -> Result<MotionSample> {
        let t = self.started.elapsed();
        self.sample_at(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapper;
    use approx::assert_relative_eq;

    fn quiet_config() -> SimulationConfig {
        SimulationConfig {
            noise_stddev: 0.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_starts_level() {
        let mut accel = SimulatedAccelerometer::new(&quiet_config());
        let sample = accel.sample_at(Duration::ZERO).unwrap();

        assert_relative_eq!(sample.x, 0.0);
        assert_relative_eq!(sample.y, 0.0);
        assert_relative_eq!(sample.z, 1.0);
    }

    #[test]
    fn test_peak_tilt_at_quarter_period() {
        let config = quiet_config();
        let accel = SimulatedAccelerometer::new(&config);
        let quarter = Duration::from_millis(config.period_ms / 4);

        assert_relative_eq!(accel.tilt_at(quarter), config.amplitude_deg, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_extremes_fail_gate() {
        // 30° tilt puts z at cos 30° ≈ 0.87, under the 0.9 gate
        let config = quiet_config();
        let mut accel = SimulatedAccelerometer::new(&config);
        let quarter = Duration::from_millis(config.period_ms / 4);

        let sample = accel.sample_at(quarter).unwrap();
        assert!(!mapper::is_usable(&sample));
    }

    #[test]
    fn test_noise_stays_small() {
        let mut accel = SimulatedAccelerometer::new(&SimulationConfig::default());
        for i in 0..100 {
            let sample = accel.sample_at(Duration::from_millis(i * 10)).unwrap();
            assert!(sample.x.abs() < 0.02, "x={}", sample.x);
        }
    }

    #[test]
    fn test_full_dropout_never_delivers() {
        let config = SimulationConfig {
            dropout_rate: 1.0,
            ..SimulationConfig::default()
        };
        let mut accel = SimulatedAccelerometer::new(&config);
        for _ in 0..10 {
            assert!(matches!(accel.read(), Err(Error::SensorUnavailable(_))));
        }
    }
}
