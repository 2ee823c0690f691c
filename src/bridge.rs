//! Sampling bridge: periodic motion feed with scoped lifetime
//!
//! A feed thread polls the [`MotionSource`] once per interval and pushes
//! each sample into a bounded channel. The foreground loop receives from the
//! channel and handles samples one at a time, in arrival order.
//!
//! ```text
//! ┌──────────────┐  read()   ┌─────────────┐  MotionSample  ┌─────────────────┐
//! │ MotionSource │◀──────────│ motion-feed │───────────────▶│ foreground loop │
//! └──────────────┘ interval  │   thread    │ bounded chan   │ (Subscription)  │
//!                            └─────────────┘                └─────────────────┘
//! ```
//!
//! Lifetime is scoped: [`SamplingBridge::subscribe`] returns a
//! [`Subscription`] that stops the feed when dropped, whichever way the
//! consuming scope is left. `start` and `stop` are both idempotent, so one
//! start is matched by exactly one release.
//!
//! The source moves into the feed thread and comes back when the thread is
//! joined, so a stopped bridge can be started again.

use crate::core::types::MotionSample;
use crate::error::{Error, Result};
use crate::sensors::MotionSource;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Feed counters, shared with the feed thread
#[derive(Default)]
struct FeedCounters {
    delivered: AtomicU64,
    read_errors: AtomicU64,
    dropped: AtomicU64,
}

/// Snapshot of bridge statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedStats {
    /// Samples pushed to the foreground
    pub delivered: u64,
    /// Failed source reads
    pub read_errors: u64,
    /// Samples dropped because the channel was full
    pub dropped: u64,
    /// Feeds started
    pub starts: u64,
    /// Feeds released
    pub releases: u64,
}

/// Running feed thread
struct ActiveFeed {
    /// Dropping this wakes and stops the feed thread
    stop_tx: Sender<()>,
    handle: JoinHandle<Box<dyn MotionSource>>,
    interval: Duration,
}

/// Periodic motion sample feed
pub struct SamplingBridge {
    source: Option<Box<dyn MotionSource>>,
    source_name: String,
    feed: Option<ActiveFeed>,
    sample_tx: Sender<MotionSample>,
    sample_rx: Receiver<MotionSample>,
    counters: Arc<FeedCounters>,
    starts: u64,
    releases: u64,
}

impl SamplingBridge {
    /// Create a bridge over `source`
    ///
    /// `capacity` bounds the samples buffered between feed and foreground.
    pub fn new(source: Box<dyn MotionSource>, capacity: usize) -> Self {
        let (sample_tx, sample_rx) = crossbeam_channel::bounded(capacity.max(1));
        let source_name = source.name().to_string();

        Self {
            source: Some(source),
            source_name,
            feed: None,
            sample_tx,
            sample_rx,
            counters: Arc::new(FeedCounters::default()),
            starts: 0,
            releases: 0,
        }
    }

    /// Start the feed thread
    ///
    /// Does nothing if a feed is already running; the running feed keeps
    /// its current interval.
    pub fn start(&mut self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(Error::InvalidParameter(
                "sampling interval must be positive".to_string(),
            ));
        }

        if let Some(feed) = &self.feed {
            if feed.interval != interval {
                log::warn!(
                    "Feed already running at {:?}, ignoring restart at {:?}",
                    feed.interval,
                    interval
                );
            } else {
                log::debug!("Feed already running, start ignored");
            }
            return Ok(());
        }

        let source = self.source.take().ok_or(Error::SourceLost)?;
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let sample_tx = self.sample_tx.clone();
        let counters = Arc::clone(&self.counters);

        let handle = thread::Builder::new()
            .name("motion-feed".to_string())
            .spawn(move || feed_loop(source, interval, sample_tx, stop_rx, counters))
            .map_err(|e| Error::Other(format!("Failed to spawn feed thread: {}", e)))?;

        self.feed = Some(ActiveFeed {
            stop_tx,
            handle,
            interval,
        });
        self.starts += 1;

        log::info!(
            "Motion feed started: source={}, interval={:?}",
            self.source_name,
            interval
        );
        Ok(())
    }

    /// Stop the feed thread and release the subscription
    ///
    /// Does nothing if no feed is running. Samples still queued are
    /// discarded.
    pub fn stop(&mut self) -> Result<()> {
        let Some(feed) = self.feed.take() else {
            return Ok(());
        };

        drop(feed.stop_tx);
        self.releases += 1;

        let joined = feed.handle.join();
        let discarded = self.sample_rx.try_iter().count();
        if discarded > 0 {
            log::debug!("Discarded {} queued samples on stop", discarded);
        }

        match joined {
            Ok(source) => {
                self.source = Some(source);
                log::info!("Motion feed stopped: source={}", self.source_name);
                Ok(())
            }
            Err(_) => {
                log::error!("Motion feed thread panicked, source lost");
                Err(Error::SourceLost)
            }
        }
    }

    /// Start the feed and tie its lifetime to the returned guard
    pub fn subscribe(&mut self, interval: Duration) -> Result<Subscription<'_>> {
        self.start(interval)?;
        Ok(Subscription { bridge: self })
    }

    /// Check if the feed thread is running
    pub fn is_active(&self) -> bool {
        self.feed.is_some()
    }

    /// Name of the underlying source
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Get feed statistics
    pub fn stats(&self) -> FeedStats {
        FeedStats {
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            read_errors: self.counters.read_errors.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            starts: self.starts,
            releases: self.releases,
        }
    }
}

impl Drop for SamplingBridge {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("Failed to stop motion feed: {}", e);
        }
    }
}

/// Active subscription; stops the feed when dropped
pub struct Subscription<'a> {
    bridge: &'a mut SamplingBridge,
}

impl Subscription<'_> {
    /// Wait up to `timeout` for the next sample
    pub fn recv_timeout(&self, timeout: Duration) -> Option<MotionSample> {
        match self.bridge.sample_rx.recv_timeout(timeout) {
            Ok(sample) => Some(sample),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// The bridge behind this subscription
    pub fn bridge(&self) -> &SamplingBridge {
        &*self.bridge
    }
}

impl Drop for Subscription<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.bridge.stop() {
            log::error!("Failed to release motion subscription: {}", e);
        }
    }
}

/// Feed loop - polls the source and pushes samples until told to stop
fn feed_loop(
    mut source: Box<dyn MotionSource>,
    interval: Duration,
    sample_tx: Sender<MotionSample>,
    stop_rx: Receiver<()>,
    counters: Arc<FeedCounters>,
) -> Box<dyn MotionSource> {
    let mut consecutive_errors: u64 = 0;

    loop {
        let loop_start = Instant::now();

        match source.read() {
            Ok(sample) => {
                if consecutive_errors > 0 {
                    log::info!(
                        "Motion source {} recovered after {} failed reads",
                        source.name(),
                        consecutive_errors
                    );
                    consecutive_errors = 0;
                }

                match sample_tx.try_send(sample) {
                    Ok(()) => {
                        counters.delivered.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(TrySendError::Full(_)) => {
                        let dropped = counters.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                        if dropped % 100 == 1 {
                            log::warn!("Sample channel full, {} samples dropped", dropped);
                        }
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
            Err(e) => {
                counters.read_errors.fetch_add(1, Ordering::Relaxed);
                consecutive_errors += 1;
                // First failure and then every 100th, the source may stay down for good
                if consecutive_errors % 100 == 1 {
                    log::warn!(
                        "Motion source {} read failed ({} in a row): {}",
                        source.name(),
                        consecutive_errors,
                        e
                    );
                }
            }
        }

        // Sleep for remaining interval, waking early on stop
        let remaining = interval.saturating_sub(loop_start.elapsed());
        match stop_rx.recv_timeout(remaining) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    log::debug!("Motion feed thread exiting");
    source
}
