//! Persisting rendered frames.

use std::path::{Path, PathBuf};

use crate::animation::Animation;
use crate::error::OutputError;
use crate::frame::Frame;

/// Destination for a sequence of rendered frames.
pub trait FrameSink {
    fn write_frame(&mut self, sequence: u64, frame: &Frame) -> Result<(), OutputError>;
}

/// Writes frames as `<dir>/<prefix>_<sequence>.png`, sequence zero-padded to five digits.
pub struct PngSequenceWriter {
    dir: PathBuf,
    prefix: String,
}

impl PngSequenceWriter {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self, OutputError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a given sequence number is written to.
    pub fn path_for(&self, sequence: u64) -> PathBuf {
        self.dir.join(format!("{}_{sequence:05}.png", self.prefix))
    }
}

impl FrameSink for PngSequenceWriter {
    fn write_frame(&mut self, sequence: u64, frame: &Frame) -> Result<(), OutputError> {
        let path = self.path_for(sequence);
        frame
            .to_rgba_image()
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| OutputError::Encode {
                path: path.clone(),
                source,
            })?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Outcome of draining an animation into a sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: u64,
    pub written: u64,
    pub failed: u64,
}

/// Render every frame of `animation` and hand it to `sink`.
///
/// A frame that fails to persist is logged and counted; the sweep continues.
pub fn run_animation(animation: Animation<'_>, sink: &mut dyn FrameSink) -> RunSummary {
    let mut summary = RunSummary::default();
    for step in animation {
        summary.rendered += 1;
        match sink.write_frame(step.sequence, &step.frame) {
            Ok(()) => summary.written += 1,
            Err(e) => {
                log::warn!("Skipping frame {}: {e}", step.sequence);
                summary.failed += 1;
            }
        }
    }
    summary
}
