//! Landscape orientation lock
//!
//! Requested once on activation. The request is fire-and-forget: callers
//! log a failure and carry on.

use crate::config::DisplayConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Display orientation control
pub trait OrientationLock {
    /// Constrain the display to landscape
    fn lock_landscape(&mut self) -> Result<()>;
}

/// Console that cannot rotate; records the request only
pub struct ConsoleRotation;

impl OrientationLock for ConsoleRotation {
    fn lock_landscape(&mut self) -> Result<()> {
        log::debug!("Console output, landscape lock is a no-op");
        Ok(())
    }
}

/// Rotation through a sysfs attribute such as `/sys/class/graphics/fbcon/rotate`
pub struct SysfsRotation {
    path: PathBuf,
    value: u8,
}

impl SysfsRotation {
    /// Create a rotation writer for `path`, writing `value` for landscape
    pub fn new(path: impl Into<PathBuf>, value: u8) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }
}

impl OrientationLock for SysfsRotation {
    fn lock_landscape(&mut self) -> Result<()> {
        fs::write(&self.path, format!("{}\n", self.value)).map_err(|e| {
            Error::Other(format!(
                "Failed to write rotation {} to {}: {}",
                self.value,
                self.path.display(),
                e
            ))
        })?;

        log::info!(
            "Display locked to landscape ({} = {})",
            self.path.display(),
            self.value
        );
        Ok(())
    }
}

/// Create the orientation lock described by the `[display]` config section
pub fn create_orientation_lock(config: &DisplayConfig) -> Box<dyn OrientationLock> {
    match &config.rotation_path {
        Some(path) => Box::new(SysfsRotation::new(path, config.rotation_value)),
        None => Box::new(ConsoleRotation),
    }
}

/// Issue the landscape request, logging instead of failing
pub fn request_landscape(lock: &mut dyn OrientationLock) {
    if let Err(e) = lock.lock_landscape() {
        log::warn!("Orientation lock failed (continuing): {}", e);
    }
}
