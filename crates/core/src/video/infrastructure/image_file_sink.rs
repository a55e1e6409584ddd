use std::path::{Path, PathBuf};

use image::GrayImage;
use thiserror::Error;

use crate::boundary::domain::boundary::Boundary;
use crate::shared::config::DisplayConfig;
use crate::shared::frame::Frame;
use crate::shared::frame_report::FrameReport;
use crate::shared::mask::Mask;
use crate::video::domain::debug_sink::DebugSink;

use super::frame_annotator::FrameAnnotator;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Writes the annotated frame and its mask as PNG files.
///
/// Files are named `frame_NNNNNN.png` and `mask_NNNNNN.png` after the frame
/// index. Frames that cannot be viewed as RGB only get their mask written.
pub struct ImageFileSink {
    dir: PathBuf,
    annotator: FrameAnnotator,
    written: usize,
}

impl ImageFileSink {
    pub fn new(
        dir: impl Into<PathBuf>,
        display: DisplayConfig,
        boundary: Boundary,
    ) -> Result<Self, SinkError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            annotator: FrameAnnotator::new(boundary, display),
            written: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames consumed so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl DebugSink for ImageFileSink {
    fn consume(
        &mut self,
        frame: &Frame,
        mask: &Mask,
        report: &FrameReport,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let index = report.frame_index;

        match self.annotator.annotate(frame, report) {
            Some(annotated) => {
                let path = self.dir.join(format!("frame_{index:06}.png"));
                annotated
                    .save(&path)
                    .map_err(|source| SinkError::Write { path, source })?;
            }
            None => log::debug!("Frame {index} is malformed, writing mask only"),
        }

        if mask.width() > 0 && mask.height() > 0 {
            if let Some(gray) = GrayImage::from_raw(mask.width(), mask.height(), mask.to_bytes()) {
                let path = self.dir.join(format!("mask_{index:06}.png"));
                gray.save(&path)
                    .map_err(|source| SinkError::Write { path, source })?;
            }
        }

        self.written += 1;
        Ok(())
    }
}
