use crate::detection::domain::hand_candidate::HandCandidate;
use crate::detection::domain::hand_extractor::HandExtractor;
use crate::shared::config::DetectionConfig;
use crate::shared::geometry::{Point, Rect};
use crate::shared::mask::Mask;

use super::connected_components::{self, Region};
use super::contour_tracer;

/// Picks the largest 8-connected foreground region as the hand.
///
/// Ties go to the region whose first pixel comes first in raster order.
/// Regions smaller than `min_area` pixels are rejected.
pub struct LargestRegionExtractor {
    min_area: f64,
}

impl LargestRegionExtractor {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            min_area: config.min_contour_area,
        }
    }
}

impl Default for LargestRegionExtractor {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

impl HandExtractor for LargestRegionExtractor {
    fn extract(&self, mask: &Mask) -> Option<HandCandidate> {
        let components = connected_components::label(mask);

        // Regions arrive in raster order; keeping the incumbent on ties
        // favours the earliest.
        let largest = components
            .regions
            .iter()
            .fold(None::<&Region>, |best, r| match best {
                Some(b) if b.area >= r.area => Some(b),
                _ => Some(r),
            })?;

        let area = largest.area as f64;
        if area < self.min_area {
            log::debug!(
                "Largest region ({area} px) below minimum area {}",
                self.min_area
            );
            return None;
        }

        Some(HandCandidate {
            contour: contour_tracer::trace_outer(&components, largest),
            area,
            centroid: Point::new(
                largest.sum_x as f64 / area,
                largest.sum_y as f64 / area,
            ),
            bounding_box: Rect::new(
                largest.min_x as f64,
                largest.min_y as f64,
                (largest.max_x - largest.min_x + 1) as f64,
                (largest.max_y - largest.min_y + 1) as f64,
            ),
        })
    }
}
