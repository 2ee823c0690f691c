//! Tilt angle to frame index mapping
//!
//! Pure functions, no state. A sample goes through three steps:
//!
//! ```text
//! MotionSample ──quantize──▶ gate (|z| ≈ 1, |x| ≈ 0) ──▶ atan(y) in degrees
//!                                  │                         │
//!                               rejected            clamp ±25° ─▶ rescale 0..=71
//! ```
//!
//! The angle uses the y axis alone (`atan(y)`), not `atan2` over two axes.
//! This is an approximation; it defines the visible mapping and is kept
//! as-is. The gate isolates rotation about the axis of interest by
//! rejecting samples taken while the device is tilted out of plane.

use super::types::{FrameIndex, MotionSample, TiltReading};

/// Lower end of the tilt range (degrees), maps to the first frame
pub const MIN_ANGLE_DEG: f64 = -25.0;
/// Upper end of the tilt range (degrees), maps to the last frame
pub const MAX_ANGLE_DEG: f64 = 25.0;

/// Accepted range for |z| (device roughly flat)
pub const Z_GATE: (f64, f64) = (0.9, 1.1);
/// Accepted range for |x| (no roll about the long axis)
pub const X_GATE: (f64, f64) = (0.0, 0.1);

/// Gating predicate: does this sample reflect the intended orientation?
///
/// NaN on either gated axis fails the comparisons and is rejected.
pub fn is_usable(sample: &MotionSample) -> bool {
    let z = sample.z.abs();
    let x = sample.x.abs();
    z >= Z_GATE.0 && z <= Z_GATE.1 && x >= X_GATE.0 && x <= X_GATE.1
}

/// Tilt angle in degrees derived from the y axis only
#[inline]
pub fn tilt_angle_degrees(y: f64) -> f64 {
    y.atan().to_degrees()
}

/// Map a tilt angle to a frame index
///
/// The angle is clamped to [`MIN_ANGLE_DEG`, `MAX_ANGLE_DEG`] and rescaled
/// linearly onto `0..=71`. Ties round half up, so 0° lands on frame 36.
/// Total over all inputs; NaN maps to the first frame.
pub fn map_index(angle_deg: f64) -> FrameIndex {
    if angle_deg.is_nan() {
        return FrameIndex::MIN;
    }

    let clamped = angle_deg.clamp(MIN_ANGLE_DEG, MAX_ANGLE_DEG);
    let min_index = FrameIndex::MIN.get() as f64;
    let max_index = FrameIndex::MAX.get() as f64;

    let scaled = (clamped - MIN_ANGLE_DEG) / (MAX_ANGLE_DEG - MIN_ANGLE_DEG)
        * (max_index - min_index)
        + min_index;

    // Half up: floor(x + 0.5). scaled is never negative here.
    FrameIndex::saturating((scaled + 0.5).floor() as usize)
}

/// Full mapping for one sample: quantize, gate, angle, index
///
/// Returns `None` for rejected samples. A sample with a non-finite y axis is
/// rejected too so NaN never reaches displayed state.
pub fn map_sample(sample: &MotionSample) -> Option<TiltReading> {
    let sample = sample.quantized();

    if !is_usable(&sample) || !sample.y.is_finite() {
        return None;
    }

    let angle_deg = tilt_angle_degrees(sample.y);
    let frame = map_index(angle_deg);

    log::debug!(
        "Screen is horizontal with tilt angle: {:.1} degrees (frame {})",
        angle_deg,
        frame
    );

    Some(TiltReading { angle_deg, frame })
}
