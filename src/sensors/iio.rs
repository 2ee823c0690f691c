//! Linux IIO accelerometer driver (sysfs)
//!
//! Reads the unbuffered sysfs interface of an IIO accelerometer:
//!
//! ```text
//! /sys/bus/iio/devices/iio:deviceN/
//! ├── in_accel_x_raw        raw counts
//! ├── in_accel_y_raw
//! ├── in_accel_z_raw
//! └── in_accel_scale        m/s² per count (or in_accel_{x,y,z}_scale)
//! ```
//!
//! Readings are converted to g so a device lying flat reads z ≈ 1.

use super::MotionSource;
use crate::core::types::MotionSample;
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Standard gravity (m/s²)
const STANDARD_GRAVITY: f64 = 9.806_65;

const AXES: [&str; 3] = ["x", "y", "z"];

/// IIO sysfs accelerometer
pub struct IioAccelerometer {
    device: PathBuf,
    /// Per-axis scale in m/s² per count, resolved lazily
    scale: Option<[f64; 3]>,
}

impl IioAccelerometer {
    /// Open an IIO device directory
    ///
    /// A missing device is not an error here: the sensor may appear later
    /// (module load, hotplug). Reads fail with `SensorUnavailable` until it
    /// does.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self> {
        let device = device.as_ref().to_path_buf();

        let scale = if device.is_dir() {
            match read_scales(&device) {
                Ok(scale) => {
                    log::info!(
                        "IIO: accelerometer at {} (scale {:?} m/s² per count)",
                        device.display(),
                        scale
                    );
                    Some(scale)
                }
                Err(e) => {
                    log::warn!("IIO: {} has no usable scale yet: {}", device.display(), e);
                    None
                }
            }
        } else {
            log::warn!(
                "IIO: device {} not found, no samples will be delivered",
                device.display()
            );
            None
        };

        Ok(Self { device, scale })
    }

    fn scale(&mut self) -> Result<[f64; 3]> {
        match self.scale {
            Some(scale) => Ok(scale),
            None => {
                let scale = read_scales(&self.device)?;
                self.scale = Some(scale);
                Ok(scale)
            }
        }
    }
}

impl MotionSource for IioAccelerometer {
    fn name(&self) -> &str {
        "iio"
    }

    fn read(&mut self) -> Result<MotionSample> {
        let scale = self.scale()?;

        let mut g = [0.0; 3];
        for (i, axis) in AXES.iter().enumerate() {
            let raw = read_attribute(&self.device.join(format!("in_accel_{axis}_raw")))?;
            g[i] = raw * scale[i] / STANDARD_GRAVITY;
        }

        Ok(MotionSample::new(g[0], g[1], g[2]))
    }
}

/// Resolve per-axis scale: axis-specific attribute first, then shared one
fn read_scales(device: &Path) -> Result<[f64; 3]> {
    let shared = device.join("in_accel_scale");
    let mut scale = [0.0; 3];

    for (i, axis) in AXES.iter().enumerate() {
        let per_axis = device.join(format!("in_accel_{axis}_scale"));
        scale[i] = if per_axis.exists() {
            read_attribute(&per_axis)?
        } else {
            read_attribute(&shared)?
        };

        if !(scale[i] > 0.0 && scale[i].is_finite()) {
            return Err(Error::InvalidReading {
                source_name: "iio".to_string(),
                reason: format!("unusable scale {} for axis {}", scale[i], axis),
            });
        }
    }

    Ok(scale)
}

/// Read a numeric sysfs attribute
fn read_attribute(path: &Path) -> Result<f64> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::SensorUnavailable(format!("{} missing", path.display())),
        _ => Error::Io(e),
    })?;

    text.trim().parse::<f64>().map_err(|e| Error::InvalidReading {
        source_name: "iio".to_string(),
        reason: format!("{}: {:?} ({})", path.display(), text.trim(), e),
    })
}
