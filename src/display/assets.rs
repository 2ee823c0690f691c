//! Frame asset table
//!
//! 72 pre-rendered images, one per frame index, loaded once at startup and
//! never modified. Files are named `<prefix><NN>.<ext>` with the index
//! zero-padded to two digits (`frame_00.png` .. `frame_71.png`).

use crate::config::AssetsConfig;
use crate::core::types::{FRAME_COUNT, FrameIndex};
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// One frame image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameAsset {
    /// File name (or placeholder name)
    pub name: String,
    /// Encoded image bytes, empty for placeholders
    pub data: Vec<u8>,
}

/// Immutable table of all frames, indexed by [`FrameIndex`]
#[derive(Debug, Clone)]
pub struct FrameAssetTable {
    frames: Vec<FrameAsset>,
}

impl FrameAssetTable {
    /// Load all frames from a directory
    ///
    /// Every one of the 72 files must exist; a missing frame is a startup
    /// error rather than a gap on screen later.
    pub fn load<P: AsRef<Path>>(directory: P, prefix: &str, extension: &str) -> Result<Self> {
        let directory = directory.as_ref();
        let mut frames = Vec::with_capacity(FRAME_COUNT);
        let mut total_bytes = 0usize;

        for index in 0..FRAME_COUNT {
            let name = frame_file_name(prefix, index, extension);
            let path = directory.join(&name);

            let data = fs::read(&path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::AssetMissing(path.display().to_string()),
                _ => Error::Io(e),
            })?;

            total_bytes += data.len();
            frames.push(FrameAsset { name, data });
        }

        log::info!(
            "Loaded {} frames from {} ({} KiB)",
            frames.len(),
            directory.display(),
            total_bytes / 1024
        );

        Ok(Self { frames })
    }

    /// Named entries without image data, for runs without an asset directory
    pub fn placeholder(prefix: &str, extension: &str) -> Self {
        let frames = (0..FRAME_COUNT)
            .map(|index| FrameAsset {
                name: frame_file_name(prefix, index, extension),
                data: Vec::new(),
            })
            .collect();

        Self { frames }
    }

    /// Build the table described by the `[assets]` config section
    pub fn from_config(config: &AssetsConfig) -> Result<Self> {
        match &config.directory {
            Some(directory) => Self::load(directory, &config.prefix, &config.extension),
            None => {
                log::info!("No asset directory configured, using placeholder frames");
                Ok(Self::placeholder(&config.prefix, &config.extension))
            }
        }
    }

    /// Frame for an index
    pub fn get(&self, index: FrameIndex) -> &FrameAsset {
        // FrameIndex is always < FRAME_COUNT and the table always has FRAME_COUNT entries
        &self.frames[index.get()]
    }

    /// Number of frames (always 72)
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the table has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn frame_file_name(prefix: &str, index: usize, extension: &str) -> String {
    format!("{prefix}{index:02}.{extension}")
}
