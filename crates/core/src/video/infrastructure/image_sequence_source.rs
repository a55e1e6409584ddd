use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::shared::source_metadata::SourceMetadata;
use crate::video::domain::frame_source::FrameSource;

#[derive(Error, Debug)]
pub enum FrameSourceError {
    #[error("no image frames found in {0}")]
    Empty(PathBuf),
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("frame source not opened")]
    NotOpened,
}

/// Replays a still image or a directory of images as a frame stream.
///
/// Directory entries with an image extension are played in file-name order.
/// Frames are decoded lazily and stamped at `index / fps` seconds.
pub struct ImageSequenceSource {
    fps: f64,
    paths: Vec<PathBuf>,
    opened: bool,
}

impl ImageSequenceSource {
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            paths: Vec::new(),
            opened: false,
        }
    }
}

fn timestamp(fps: f64, index: usize) -> Duration {
    if fps > 0.0 {
        Duration::from_secs_f64(index as f64 / fps)
    } else {
        Duration::ZERO
    }
}

impl Default for ImageSequenceSource {
    fn default() -> Self {
        Self::new(crate::shared::constants::FPS_TARGET)
    }
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, FrameSourceError> {
    let list_err = |source| FrameSourceError::List {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn decode(path: &Path, index: usize, timestamp: Duration) -> Result<Frame, FrameSourceError> {
    let img = image::open(path)
        .map_err(|source| FrameSourceError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(img.into_raw(), width, height, 3, index, timestamp))
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
        let paths = if path.is_dir() {
            list_images(path)?
        } else {
            vec![path.to_path_buf()]
        };
        let first = paths
            .first()
            .ok_or_else(|| FrameSourceError::Empty(path.to_path_buf()))?;
        let (width, height) =
            image::image_dimensions(first).map_err(|source| FrameSourceError::Decode {
                path: first.clone(),
                source,
            })?;

        log::info!(
            "Opened {} frame(s) from {} ({width}x{height})",
            paths.len(),
            path.display()
        );

        let metadata = SourceMetadata {
            width,
            height,
            fps: self.fps,
            total_frames: paths.len(),
            source_path: Some(path.to_path_buf()),
        };
        self.paths = paths;
        self.opened = true;
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if !self.opened {
            let err: Box<dyn std::error::Error> = Box::new(FrameSourceError::NotOpened);
            return Box::new(std::iter::once(Err(err)));
        }
        let fps = self.fps;
        Box::new(self.paths.iter().enumerate().map(
            move |(i, path)| -> Result<Frame, Box<dyn std::error::Error>> {
                Ok(decode(path, i, timestamp(fps, i))?)
            },
        ))
    }

    fn close(&mut self) {
        self.paths.clear();
        self.opened = false;
    }
}
