//! View state owned by the foreground loop
//!
//! Holds the last raw readout, the accepted tilt and the frame on screen.
//! Only [`ViewState::apply`] mutates it, one sample at a time.

use super::mapper;
use super::types::{FrameIndex, MotionSample, TiltReading};

/// Current and previous accepted tilt angles (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltState {
    pub current_deg: f64,
    pub previous_deg: f64,
}

impl TiltState {
    /// Record a newly accepted angle
    pub fn accept(&mut self, angle_deg: f64) {
        self.previous_deg = self.current_deg;
        self.current_deg = angle_deg;
    }

    /// Change since the previous accepted sample
    pub fn delta_deg(&self) -> f64 {
        self.current_deg - self.previous_deg
    }
}

/// What happened to a sample handed to [`ViewState::apply`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Passed the gate; tilt and frame were updated
    Accepted(TiltReading),
    /// Failed the gate; only the raw readout changed
    Rejected,
    /// Contained NaN or infinity; nothing changed
    Discarded,
}

/// Everything the presentation surface shows
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewState {
    /// Last finite raw sample (for the x/y/z readout)
    pub raw: MotionSample,
    /// Accepted tilt angles
    pub tilt: TiltState,
    /// Frame currently on screen
    pub frame: FrameIndex,
    /// Samples accepted since startup
    pub accepted: u64,
    /// Samples rejected or discarded since startup
    pub rejected: u64,
}

impl ViewState {
    /// Create the startup state: zero readout, zero tilt, first frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one sample
    ///
    /// Raw readouts follow every finite sample. Tilt and frame change only
    /// when the mapper accepts the sample.
    pub fn apply(&mut self, sample: &MotionSample) -> SampleOutcome {
        if !sample.is_finite() {
            self.rejected += 1;
            return SampleOutcome::Discarded;
        }

        self.raw = *sample;

        match mapper::map_sample(sample) {
            Some(reading) => {
                self.tilt.accept(reading.angle_deg);
                self.frame = reading.frame;
                self.accepted += 1;
                SampleOutcome::Accepted(reading)
            }
            None => {
                self.rejected += 1;
                SampleOutcome::Rejected
            }
        }
    }

    /// Readout line for the raw axes, two decimal places
    pub fn axes_text(&self) -> String {
        format!(
            "x: {:.2}, y: {:.2}, z: {:.2}",
            self.raw.x, self.raw.y, self.raw.z
        )
    }

    /// Readout line for the accepted tilt angle, two decimal places
    pub fn angle_text(&self) -> String {
        format!("Adjusted tilt angle: {:.2} degrees", self.tilt.current_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ViewState::new();
        assert_eq!(state.frame, FrameIndex::MIN);
        assert_eq!(state.tilt.current_deg, 0.0);
        assert_eq!(state.axes_text(), "x: 0.00, y: 0.00, z: 0.00");
        assert_eq!(state.angle_text(), "Adjusted tilt angle: 0.00 degrees");
    }

    #[test]
    fn test_accepted_sample_updates_frame_and_tilt() {
        let mut state = ViewState::new();
        let outcome = state.apply(&MotionSample::new(0.0, 0.0, 1.0));

        assert!(matches!(outcome, SampleOutcome::Accepted(_)));
        assert_eq!(state.frame.get(), 36);
        assert_eq!(state.accepted, 1);
    }

    #[test]
    fn test_rejected_sample_keeps_frame() {
        let mut state = ViewState::new();
        state.apply(&MotionSample::new(0.0, 1.0, 1.0));
        assert_eq!(state.frame, FrameIndex::MAX);
        let tilt_before = state.tilt;

        let outcome = state.apply(&MotionSample::new(0.5, 0.3, 1.0));
        assert_eq!(outcome, SampleOutcome::Rejected);
        assert_eq!(state.frame, FrameIndex::MAX);
        assert_eq!(state.tilt, tilt_before);
        // Raw readout still follows the sample
        assert_eq!(state.raw, MotionSample::new(0.5, 0.3, 1.0));
    }

    #[test]
    fn test_nan_sample_changes_nothing() {
        let mut state = ViewState::new();
        state.apply(&MotionSample::new(0.0, 0.0, 1.0));
        let before = state;

        let outcome = state.apply(&MotionSample::new(f64::NAN, f64::NAN, f64::NAN));

        assert_eq!(outcome, SampleOutcome::Discarded);
        assert_eq!(state.frame, before.frame);
        assert_eq!(state.tilt, before.tilt);
        assert_eq!(state.raw, before.raw);
        assert_eq!(state.rejected, before.rejected + 1);
    }

    #[test]
    fn test_tilt_tracks_previous_angle() {
        let mut tilt = TiltState::default();
        tilt.accept(10.0);
        tilt.accept(12.5);
        assert_eq!(tilt.previous_deg, 10.0);
        assert_eq!(tilt.current_deg, 12.5);
        assert_eq!(tilt.delta_deg(), 2.5);
    }

    #[test]
    fn test_readout_formatting() {
        let mut state = ViewState::new();
        state.apply(&MotionSample::new(0.031, -0.2449, 0.987));
        assert_eq!(state.axes_text(), "x: 0.03, y: -0.24, z: 0.99");
        assert!(state.angle_text().starts_with("Adjusted tilt angle: -13.7"));
    }
}
