//! Motion sources feeding the sampling bridge

pub mod iio;
pub mod mock;

use crate::config::{SensorConfig, SourceKind};
use crate::core::types::MotionSample;
use crate::error::Result;

pub use iio::IioAccelerometer;
pub use mock::SimulatedAccelerometer;

/// Accelerometer driver trait
///
/// `read` is polled from the feed thread once per interval. A failed read
/// means "no sample this time"; the bridge counts it and keeps polling.
pub trait MotionSource: Send {
    /// Short name for log messages
    fn name(&self) -> &str;

    /// Read one sample (units of g)
    fn read(&mut self) -> Result<MotionSample>;
}

/// Create a motion source based on configuration
pub fn create_source(config: &SensorConfig) -> Result<Box<dyn MotionSource>> {
    match config.source {
        SourceKind::Iio => {
            let source = IioAccelerometer::open(&config.iio_device)?;
            Ok(Box::new(source))
        }
        SourceKind::Simulated => {
            let source = SimulatedAccelerometer::new(&config.simulation);
            Ok(Box::new(source))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_simulated_source() {
        let config = SensorConfig::default();
        let mut source = create_source(&config).unwrap();
        assert_eq!(source.name(), "simulated");
        assert!(source.read().unwrap().is_finite());
    }

    #[test]
    fn test_missing_iio_device_still_creates_source() {
        let config = SensorConfig {
            source: SourceKind::Iio,
            iio_device: "/nonexistent/iio:device9".to_string(),
            ..SensorConfig::default()
        };
        let mut source = create_source(&config).unwrap();
        assert!(source.read().is_err());
    }
}
