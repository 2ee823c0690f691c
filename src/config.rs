//! Configuration for TiltView
//!
//! Loads configuration from a TOML file. Every field has a default, so an
//! empty file (or no file at all) gives a working simulated setup.
//!
//! ```toml
//! [sensor]
//! source = "iio"                 # "iio" or "simulated"
//! interval_ms = 500
//! iio_device = "/sys/bus/iio/devices/iio:device0"
//!
//! [sensor.simulation]
//! period_ms = 6000
//! amplitude_deg = 30.0
//! random_seed = 42               # 0 = random each run
//!
//! [assets]
//! directory = "frames"           # frame_00.png .. frame_71.png
//!
//! [display]
//! rotation_path = "/sys/class/graphics/fbcon/rotate"
//!
//! [logging]
//! level = "info"
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which motion source feeds the sampling bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Linux IIO accelerometer (sysfs)
    Iio,
    /// Simulated accelerometer, no hardware needed
    Simulated,
}

/// Sensor sampling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorConfig {
    /// Motion source to use
    #[serde(default = "default_source")]
    pub source: SourceKind,

    /// Minimum spacing between delivered samples (milliseconds)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Samples buffered between feed thread and foreground loop
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// IIO device directory holding `in_accel_*` attributes
    #[serde(default = "default_iio_device")]
    pub iio_device: String,

    /// Simulated accelerometer parameters
    #[serde(default)]
    pub simulation: SimulationConfig,
}

fn default_source() -> SourceKind {
    SourceKind::Simulated
}
fn default_interval_ms() -> u64 {
    500
}
fn default_channel_capacity() -> usize {
    16
}
fn default_iio_device() -> String {
    "/sys/bus/iio/devices/iio:device0".to_string()
}

impl SensorConfig {
    /// Sampling interval as a Duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            interval_ms: default_interval_ms(),
            channel_capacity: default_channel_capacity(),
            iio_device: default_iio_device(),
            simulation: SimulationConfig::default(),
        }
    }
}

/// Simulated accelerometer parameters
///
/// The simulated device is held flat and rocked back and forth about its
/// x axis, sweeping the y reading through ±`amplitude_deg`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Duration of one full back-and-forth sweep (milliseconds)
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,

    /// Peak tilt of the sweep (degrees)
    #[serde(default = "default_amplitude_deg")]
    pub amplitude_deg: f64,

    /// Per-axis Gaussian noise standard deviation (g)
    #[serde(default = "default_noise_stddev")]
    pub noise_stddev: f64,

    /// Probability that a read fails (0.0-1.0), exercises sensor dropouts
    #[serde(default)]
    pub dropout_rate: f64,

    /// Noise seed (0 = random each run)
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
}

fn default_period_ms() -> u64 {
    6000
}
fn default_amplitude_deg() -> f64 {
    30.0
}
fn default_noise_stddev() -> f64 {
    0.002
}
fn default_random_seed() -> u64 {
    42
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
            amplitude_deg: default_amplitude_deg(),
            noise_stddev: default_noise_stddev(),
            dropout_rate: 0.0,
            random_seed: default_random_seed(),
        }
    }
}

/// Frame asset location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetsConfig {
    /// Directory with the 72 frame images (unset = named placeholders)
    #[serde(default)]
    pub directory: Option<String>,

    /// File name prefix, followed by the two-digit frame index
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// File extension without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_prefix() -> String {
    "frame_".to_string()
}
fn default_extension() -> String {
    "png".to_string()
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            directory: None,
            prefix: default_prefix(),
            extension: default_extension(),
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Console rotation attribute written once at startup (unset = log only)
    #[serde(default)]
    pub rotation_path: Option<String>,

    /// Value written to `rotation_path` for landscape (fbcon: 1 = 90° clockwise)
    #[serde(default = "default_rotation_value")]
    pub rotation_value: u8,
}

fn default_rotation_value() -> u8 {
    1
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rotation_path: None,
            rotation_value: default_rotation_value(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use tiltview::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("tiltview.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
