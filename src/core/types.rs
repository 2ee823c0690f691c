//! Core data types for motion samples and frame selection.
//!
//! - [`MotionSample`]: one accelerometer reading in units of g
//! - [`FrameIndex`]: index into the 72-entry frame table, always in range
//! - [`TiltReading`]: what the mapper emits for an accepted sample

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of pre-rendered frames in the asset table
pub const FRAME_COUNT: usize = 72;

/// Accelerometer reading (gravity components in g)
///
/// Axis values are nominally in [-1, 1]. When the device lies flat and
/// still, z reads about +1 and x, y about 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    /// Create a new sample
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Round every axis to 4 decimal places
    ///
    /// Raw sensor values carry noise well below 1e-4 g; gating and angle
    /// computation work on the rounded values. NaN stays NaN.
    pub fn quantized(&self) -> Self {
        Self {
            x: round_to_4(self.x),
            y: round_to_4(self.y),
            z: round_to_4(self.z),
        }
    }

    /// True when all three axes are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Round to 4 decimal places from the exact binary value
///
/// Matches decimal fixed-point formatting: `1.10005` is stored as
/// 1.1000499.. and rounds down to 1.1. Exact ties (only possible for odd
/// multiples of 1/32) round away from zero. Huge values stay finite.
fn round_to_4(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let magnitude = value.abs();

    // n / 20000 with n odd is a tie; it is exact only when 625 divides n
    let twice = magnitude * 20_000.0;
    let rounded = if twice.fract() == 0.0
        && twice % 1250.0 == 625.0
        && twice / 20_000.0 == magnitude
    {
        ((twice + 1.0) / 2.0) / 10_000.0
    } else {
        // Float formatting rounds the exact value; the string is always a number
        format!("{:.4}", magnitude).parse::<f64>().unwrap_or(magnitude)
    };

    if rounded == 0.0 {
        0.0
    } else {
        rounded.copysign(value)
    }
}

/// Index of the frame to display, guaranteed to be in `0..FRAME_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameIndex(u8);

impl FrameIndex {
    /// First frame (device tilted fully to one side)
    pub const MIN: FrameIndex = FrameIndex(0);
    /// Last frame (device tilted fully to the other side)
    pub const MAX: FrameIndex = FrameIndex((FRAME_COUNT - 1) as u8);

    /// Create an index, clamping out-of-range values to the last frame
    pub fn saturating(index: usize) -> Self {
        Self(index.min(FRAME_COUNT - 1) as u8)
    }

    /// Index as usize (for table lookups)
    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output of the mapper for an accepted sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltReading {
    /// Tilt angle derived from the y axis (degrees, unclamped)
    pub angle_deg: f64,
    /// Frame selected for this angle
    pub frame: FrameIndex,
}
