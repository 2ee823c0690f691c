//! Application orchestration for TiltView
//!
//! Owns the sampling bridge, the view state and the presenter, and runs the
//! foreground loop: every sample from the subscription goes through the
//! mapper, updates the view and is presented before the next one is taken.

use crate::bridge::SamplingBridge;
use crate::config::AppConfig;
use crate::core::state::{SampleOutcome, ViewState};
use crate::core::types::MotionSample;
use crate::display::{
    FrameAssetTable, OrientationLock, Presenter, create_orientation_lock, request_landscape,
};
use crate::error::Result;
use crate::sensors::MotionSource;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How long the foreground loop waits for a sample before rechecking shutdown
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// How often feed statistics are logged
const STATUS_INTERVAL: Duration = Duration::from_secs(10);

/// Main application structure that manages all components
pub struct TiltApp<P: Presenter> {
    config: AppConfig,
    bridge: SamplingBridge,
    assets: FrameAssetTable,
    orientation: Box<dyn OrientationLock>,
    presenter: P,
    view: ViewState,
    shutdown: Arc<AtomicBool>,
}

impl<P: Presenter> TiltApp<P> {
    /// Create a new TiltApp
    ///
    /// Loads the frame table; nothing starts sampling until `run`.
    pub fn new(config: AppConfig, source: Box<dyn MotionSource>, presenter: P) -> Result<Self> {
        log::info!("Initializing TiltView");

        let assets = FrameAssetTable::from_config(&config.assets)?;
        let orientation = create_orientation_lock(&config.display);
        let bridge = SamplingBridge::new(source, config.sensor.channel_capacity);
        log::info!(
            "Motion source: {}, {} frames, buffer {} samples",
            bridge.source_name(),
            assets.len(),
            config.sensor.channel_capacity
        );

        Ok(Self {
            config,
            bridge,
            assets,
            orientation,
            presenter,
            view: ViewState::new(),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag that stops `run` when set (e.g. from a signal handler)
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Current view state
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The presenter
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Run until the shutdown flag is set
    pub fn run(&mut self) -> Result<()> {
        self.run_until(|_| false)
    }

    /// Run until the shutdown flag is set or `done` returns true
    ///
    /// `done` is checked after every handled sample. The subscription is
    /// released when this returns, on success and on error.
    pub fn run_until<F>(&mut self, mut done: F) -> Result<()>
    where
        F: FnMut(&ViewState) -> bool,
    {
        request_landscape(self.orientation.as_mut());

        // Startup frame before the first sample arrives
        self.presenter
            .present(&self.view, self.assets.get(self.view.frame))?;

        let interval = self.config.sensor.interval();
        let subscription = self.bridge.subscribe(interval)?;
        log::info!("TiltView running. Press Ctrl-C to stop.");

        let mut last_status = Instant::now();

        while !self.shutdown.load(Ordering::Relaxed) {
            if let Some(sample) = subscription.recv_timeout(POLL_TIMEOUT) {
                handle_sample(&mut self.view, &mut self.presenter, &self.assets, &sample)?;
                if done(&self.view) {
                    break;
                }
            }

            if last_status.elapsed() >= STATUS_INTERVAL {
                let stats = subscription.bridge().stats();
                log::info!(
                    "Feed: {} delivered, {} read errors, {} dropped | view: {} accepted, {} rejected, frame {}",
                    stats.delivered,
                    stats.read_errors,
                    stats.dropped,
                    self.view.accepted,
                    self.view.rejected,
                    self.view.frame
                );
                last_status = Instant::now();
            }
        }

        drop(subscription);
        log::info!("TiltView stopped");
        Ok(())
    }
}

/// Apply one sample to the view and present the result
fn handle_sample<P: Presenter>(
    view: &mut ViewState,
    presenter: &mut P,
    assets: &FrameAssetTable,
    sample: &MotionSample,
) -> Result<()> {
    match view.apply(sample) {
        SampleOutcome::Accepted(reading) => {
            log::trace!(
                "Accepted {:?}: {:.2}° ({:+.2}°) -> frame {}",
                sample,
                reading.angle_deg,
                view.tilt.delta_deg(),
                reading.frame
            );
        }
        SampleOutcome::Rejected => {
            log::trace!("Rejected {:?}: device not flat", sample);
        }
        SampleOutcome::Discarded => {
            log::debug!("Discarded non-finite sample {:?}", sample);
        }
    }

    presenter.present(view, assets.get(view.frame))
}
