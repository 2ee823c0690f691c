//! Core types and tilt mapping logic.
//!
//! Nothing in here touches threads or I/O:
//! - [`types`]: samples, frame indices, mapper output
//! - [`mapper`]: gating predicate and angle-to-index mapping
//! - [`state`]: view state updated once per sample

pub mod mapper;
pub mod state;
pub mod types;
