use crate::shared::geometry::{Pixel, Point, Rect};

/// The largest skin region of a frame, accepted as the hand.
///
/// `area` is the region's pixel count and is never below the extractor's
/// minimum. The contour is the closed outer boundary, clockwise on screen,
/// starting at the region's first pixel in raster order.
#[derive(Clone, Debug, PartialEq)]
pub struct HandCandidate {
    pub contour: Vec<Pixel>,
    pub area: f64,
    pub centroid: Point,
    pub bounding_box: Rect,
}
