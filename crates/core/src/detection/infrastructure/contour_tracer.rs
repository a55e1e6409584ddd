//! Outer boundary of a labeled region via `imageproc` border following.

use imageproc::contours::{find_contours, BorderType};

use crate::shared::geometry::Pixel;

use super::connected_components::{Components, Region};

/// Traces the outer boundary of `region`, clockwise on screen, starting
/// from its first pixel in raster order.
///
/// The region is drawn alone on a background-framed image so that regions
/// touching the frame edge still have an outer border. Pixels where the
/// boundary pinches may appear more than once.
pub fn trace_outer(components: &Components, region: &Region) -> Vec<Pixel> {
    let image = components.padded_region_image(region);
    let Some(outer) = find_contours::<i32>(&image)
        .into_iter()
        .find(|c| c.border_type == BorderType::Outer && c.parent.is_none())
    else {
        return Vec::new();
    };

    let mut contour: Vec<Pixel> = outer
        .points
        .iter()
        .map(|p| Pixel::new(p.x - 1, p.y - 1))
        .collect();
    if signed_area2(&contour) < 0 {
        contour[1..].reverse();
    }
    contour
}

/// Twice the shoelace area with y pointing down; positive when the points
/// run clockwise on screen.
fn signed_area2(points: &[Pixel]) -> i64 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum()
}
