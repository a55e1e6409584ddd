use crate::shared::frame::Frame;
use crate::shared::mask::Mask;

/// Domain interface for turning a color frame into a binary hand mask.
///
/// Segmentation is infallible: degenerate input yields an empty mask.
/// Implementations may keep scratch buffers between frames, hence
/// `&mut self`.
pub trait Segmenter: Send {
    fn segment(&mut self, frame: &Frame) -> Mask;
}
