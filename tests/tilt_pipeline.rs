//! Tilt Pipeline Tests
//!
//! Scripted accelerometer sequences run through the whole chain:
//! feed thread -> subscription -> gate/mapper -> view state -> presenter.
//!
//! Run with: `cargo test --test tilt_pipeline`

use approx::assert_relative_eq;
use std::time::Duration;
use tiltview::config::AppConfig;
use tiltview::display::{ConsolePresenter, FrameAssetTable, Presenter};
use tiltview::{
    Error, FRAME_COUNT, FrameIndex, MotionSample, MotionSource, Result, SampleOutcome,
    SamplingBridge, TiltApp, ViewState, map_sample,
};

// ============================================================================
// Helpers
// ============================================================================

/// Replays a fixed sequence, then reports the sensor as gone
struct ScriptedSource {
    samples: Vec<MotionSample>,
    next: usize,
}

impl ScriptedSource {
    fn boxed(samples: Vec<MotionSample>) -> Box<dyn MotionSource> {
        Box::new(Self { samples, next: 0 })
    }
}

impl MotionSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn read(&mut self) -> Result<MotionSample> {
        let sample = self
            .samples
            .get(self.next)
            .copied()
            .ok_or_else(|| Error::SensorUnavailable("script exhausted".to_string()))?;
        self.next += 1;
        Ok(sample)
    }
}

/// Flat device tilted so that atan(y) equals `deg`
fn tilted(deg: f64) -> MotionSample {
    MotionSample::new(0.0, deg.to_radians().tan(), 1.0)
}

fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.sensor.interval_ms = 2;
    config
}

const WAIT: Duration = Duration::from_secs(2);

// ============================================================================
// End-to-end mapping
// ============================================================================

#[test]
fn test_level_device_shows_middle_frame() {
    let reading = map_sample(&MotionSample::new(0.0, 0.0, 1.0)).unwrap();
    assert_relative_eq!(reading.angle_deg, 0.0);
    // 35.5 rounds half up
    assert_eq!(reading.frame.get(), 36);
}

#[test]
fn test_steep_tilt_clamps_to_last_frame() {
    let reading = map_sample(&MotionSample::new(0.0, 1.0, 1.0)).unwrap();
    assert_relative_eq!(reading.angle_deg, 45.0, epsilon = 1e-9);
    assert_eq!(reading.frame, FrameIndex::MAX);

    let reading = map_sample(&MotionSample::new(0.0, -1.0, 1.0)).unwrap();
    assert_eq!(reading.frame, FrameIndex::MIN);
}

#[test]
fn test_nan_sample_keeps_frame() {
    let mut view = ViewState::new();
    view.apply(&tilted(10.0));
    let before = view.frame;

    let outcome = view.apply(&MotionSample::new(f64::NAN, f64::NAN, f64::NAN));

    assert_eq!(outcome, SampleOutcome::Discarded);
    assert_eq!(view.frame, before);
}

#[test]
fn test_sweep_is_monotonic_and_covers_all_frames() {
    let mut view = ViewState::new();
    let mut seen = vec![false; FRAME_COUNT];
    let mut last = 0;

    // -30° .. 30° in 0.1° steps
    for step in -300..=300 {
        let outcome = view.apply(&tilted(step as f64 / 10.0));
        assert!(matches!(outcome, SampleOutcome::Accepted(_)));

        let index = view.frame.get();
        assert!(index >= last, "frame went backwards at {}", step);
        seen[index] = true;
        last = index;
    }

    assert!(seen.iter().all(|&s| s), "every frame reachable by sweeping");
}

// ============================================================================
// Bridge + view
// ============================================================================

#[test]
fn test_rejected_samples_hold_frame_through_bridge() {
    let script = vec![
        tilted(-20.0),
        MotionSample::new(0.5, 0.1, 1.0), // x out of gate
        MotionSample::new(0.0, 0.1, 0.5), // z out of gate
        tilted(20.0),
    ];
    let mut bridge = SamplingBridge::new(ScriptedSource::boxed(script), 16);
    let mut view = ViewState::new();
    let mut frames = Vec::new();

    {
        let sub = bridge.subscribe(Duration::from_millis(2)).unwrap();
        for _ in 0..4 {
            let sample = sub.recv_timeout(WAIT).expect("scripted sample");
            view.apply(&sample);
            frames.push(view.frame.get());
        }
    }

    assert!(!bridge.is_active());
    assert_eq!(frames[0], frames[1]);
    assert_eq!(frames[1], frames[2]);
    assert!(frames[3] > frames[2]);
    assert_eq!(view.accepted, 2);
    assert_eq!(view.rejected, 2);
    assert_relative_eq!(view.tilt.previous_deg, -20.0, epsilon = 1e-2);
    assert_relative_eq!(view.tilt.current_deg, 20.0, epsilon = 1e-2);
}

#[test]
fn test_bridge_restarts_after_release() {
    let mut bridge = SamplingBridge::new(ScriptedSource::boxed(vec![tilted(0.0); 8]), 16);

    for _ in 0..2 {
        let sub = bridge.subscribe(Duration::from_millis(2)).unwrap();
        assert!(sub.recv_timeout(WAIT).is_some());
    }

    let stats = bridge.stats();
    assert_eq!(stats.starts, 2);
    assert_eq!(stats.releases, 2);
    assert!(!bridge.is_active());
}

// ============================================================================
// Full application
// ============================================================================

#[test]
fn test_app_presents_each_new_frame() {
    let script = vec![tilted(0.0), tilted(0.0), tilted(25.0), tilted(-25.0)];
    let mut app = TiltApp::new(
        fast_config(),
        ScriptedSource::boxed(script),
        ConsolePresenter::new(Vec::new()),
    )
    .unwrap();

    app.run_until(|view| view.accepted >= 4).unwrap();

    let text = String::from_utf8_lossy(app.presenter().get_ref()).into_owned();
    let headers: Vec<&str> = text.lines().filter(|l| l.starts_with("[frame")).collect();
    assert_eq!(
        headers,
        vec![
            "[frame 0/71] frame_00.png",
            "[frame 36/71] frame_36.png",
            "[frame 71/71] frame_71.png",
            "[frame 0/71] frame_00.png",
        ]
    );
    assert!(text.contains("Adjusted tilt angle: 25.00 degrees"));
}

#[test]
fn test_app_with_asset_directory() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..FRAME_COUNT {
        std::fs::write(dir.path().join(format!("tilt_{:02}.jpg", i)), [i as u8]).unwrap();
    }

    let mut config = fast_config();
    config.assets.directory = Some(dir.path().display().to_string());
    config.assets.prefix = "tilt_".to_string();
    config.assets.extension = "jpg".to_string();

    // Presenter that records the bytes of each frame shown
    struct Recorder(Vec<u8>);
    impl Presenter for Recorder {
        fn present(
            &mut self,
            _view: &ViewState,
            frame: &tiltview::display::FrameAsset,
        ) -> Result<()> {
            self.0.extend_from_slice(&frame.data);
            Ok(())
        }
    }

    let mut app = TiltApp::new(
        config,
        ScriptedSource::boxed(vec![tilted(0.0)]),
        Recorder(Vec::new()),
    )
    .unwrap();
    app.run_until(|view| view.accepted >= 1).unwrap();

    assert_eq!(app.presenter().0, vec![0u8, 36]);
}

#[test]
fn test_missing_assets_fail_startup() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fast_config();
    config.assets.directory = Some(dir.path().display().to_string());

    let result = TiltApp::new(
        config,
        ScriptedSource::boxed(Vec::new()),
        ConsolePresenter::new(Vec::new()),
    );
    assert!(matches!(result, Err(Error::AssetMissing(_))));

    // Placeholder table is the fallback shape
    assert_eq!(FrameAssetTable::placeholder("frame_", "png").len(), FRAME_COUNT);
}
