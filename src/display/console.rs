//! Text presenter
//!
//! Writes one block per change:
//!
//! ```text
//! [frame 36/71] frame_36.png
//! x: 0.00, y: 0.00, z: 1.00
//! Adjusted tilt angle: 0.00 degrees
//! ```

use super::{FrameAsset, Presenter};
use crate::core::state::ViewState;
use crate::core::types::FrameIndex;
use crate::error::Result;
use std::io::{self, Stdout, Write};

/// Presenter writing readouts to any `Write` sink
pub struct ConsolePresenter<W: Write> {
    out: W,
    /// Last block written, to skip redraws when nothing visible changed
    last: Option<String>,
}

impl ConsolePresenter<Stdout> {
    /// Presenter on standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsolePresenter<W> {
    /// Create a presenter writing to `out`
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    /// Sink the presenter writes to
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn render(view: &ViewState, frame: &FrameAsset) -> String {
        format!(
            "[frame {}/{}] {}\n{}\n{}\n",
            view.frame,
            FrameIndex::MAX,
            frame.name,
            view.axes_text(),
            view.angle_text()
        )
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn present(&mut self, view: &ViewState, frame: &FrameAsset) -> Result<()> {
        let block = Self::render(view, frame);
        if self.last.as_deref() == Some(block.as_str()) {
            return Ok(());
        }

        self.out.write_all(block.as_bytes())?;
        self.out.flush()?;
        self.last = Some(block);
        Ok(())
    }
}
