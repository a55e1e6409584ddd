use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::source_metadata::SourceMetadata;

/// Supplies frames to the pipeline.
///
/// Implementations handle acquisition details (files, devices, streams)
/// while the pipeline works with the abstract `Frame` and `SourceMetadata`
/// types. A failed frame is yielded as an `Err` item and does not end the
/// stream.
pub trait FrameSource: Send {
    /// Opens the source at `path` and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in capture order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
