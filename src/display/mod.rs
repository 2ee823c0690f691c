//! Presentation surface
//!
//! - [`assets`]: the 72-entry frame table
//! - [`orientation`]: best-effort landscape lock
//! - [`console`]: text presenter

pub mod assets;
pub mod console;
pub mod orientation;

use crate::core::state::ViewState;
use crate::error::Result;

pub use assets::{FrameAsset, FrameAssetTable};
pub use console::ConsolePresenter;
pub use orientation::{OrientationLock, create_orientation_lock, request_landscape};

/// Renders the current view
pub trait Presenter {
    /// Show `frame` together with the readouts from `view`
    fn present(&mut self, view: &ViewState, frame: &FrameAsset) -> Result<()>;
}
