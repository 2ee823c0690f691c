//! TiltView - accelerometer tilt to image frame selector
//!
//! Turns a stream of 3-axis accelerometer samples into one of 72
//! pre-rendered frames, so a handheld device held flat shows an image that
//! follows its tilt.
//!
//! - [`bridge`]: periodic motion feed with scoped start/stop
//! - [`core`]: sample types, tilt gate and angle-to-frame mapping, view state
//! - [`sensors`]: IIO accelerometer and simulated source
//! - [`display`]: frame table, orientation lock, presenter
//! - [`app`]: foreground loop tying them together

pub mod app;
pub mod bridge;
pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod sensors;

pub use app::TiltApp;
pub use bridge::{FeedStats, SamplingBridge, Subscription};
pub use config::AppConfig;
pub use crate::core::mapper::{map_index, map_sample, tilt_angle_degrees};
pub use crate::core::state::{SampleOutcome, ViewState};
pub use crate::core::types::{FRAME_COUNT, FrameIndex, MotionSample, TiltReading};
pub use error::{Error, Result};
pub use sensors::{MotionSource, create_source};
