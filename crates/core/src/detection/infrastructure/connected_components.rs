//! 8-connected component labeling with per-region moments and bounds.

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};

use crate::shared::mask::{Mask, FOREGROUND};

/// Per-region statistics gathered from the label image.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub label: u32,
    /// Pixel count.
    pub area: usize,
    /// Raster index (`y * width + x`) of the region's first pixel.
    pub first_index: usize,
    pub sum_x: u64,
    pub sum_y: u64,
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

/// Label image plus the regions found in it.
///
/// Label `0` is background. Regions are ordered by their first pixel in
/// raster scan order.
#[derive(Clone, Debug)]
pub struct Components {
    pub labels: ImageBuffer<Luma<u32>, Vec<u32>>,
    pub regions: Vec<Region>,
}

impl Components {
    pub fn label_at(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 {
            return 0;
        }
        self.labels
            .get_pixel_checked(x as u32, y as u32)
            .map_or(0, |p| p[0])
    }

    /// Binary image holding only `region`, framed by one background pixel
    /// on every side.
    pub fn padded_region_image(&self, region: &Region) -> GrayImage {
        let (w, h) = self.labels.dimensions();
        GrayImage::from_fn(w + 2, h + 2, |x, y| {
            let inside = x >= 1
                && y >= 1
                && self.label_at(x as i32 - 1, y as i32 - 1) == region.label;
            Luma([if inside { FOREGROUND } else { 0 }])
        })
    }
}

pub fn label(mask: &Mask) -> Components {
    let (width, height) = (mask.width(), mask.height());
    if width == 0 || height == 0 || mask.is_blank() {
        return Components {
            labels: ImageBuffer::new(width, height),
            regions: Vec::new(),
        };
    }

    let labels = connected_components(&mask.to_gray_image(), Connectivity::Eight, Luma([0u8]));

    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    // Maps a label to its index in `regions`.
    let mut slot: Vec<Option<usize>> = vec![None; max_label + 1];
    let mut regions: Vec<Region> = Vec::new();

    for (x, y, p) in labels.enumerate_pixels() {
        let l = p[0];
        if l == 0 {
            continue;
        }
        let (x, y) = (x as usize, y as usize);
        let i = *slot[l as usize].get_or_insert_with(|| {
            regions.push(Region {
                label: l,
                area: 0,
                first_index: y * width as usize + x,
                sum_x: 0,
                sum_y: 0,
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            });
            regions.len() - 1
        });
        let r = &mut regions[i];
        r.area += 1;
        r.sum_x += x as u64;
        r.sum_y += y as u64;
        r.min_x = r.min_x.min(x);
        r.max_x = r.max_x.max(x);
        r.max_y = y;
    }

    Components { labels, regions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_mask_has_no_regions() {
        let c = label(&Mask::empty(10, 10));
        assert!(c.regions.is_empty());
        assert!(c.labels.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_zero_sized_mask_has_no_regions() {
        let c = label(&Mask::empty(0, 0));
        assert!(c.regions.is_empty());
        assert_eq!(c.labels.dimensions(), (0, 0));
    }

    #[test]
    fn test_two_separate_blobs() {
        let mut m = Mask::empty(20, 10);
        m.fill_rect(1, 1, 4, 4, true);
        m.fill_rect(10, 2, 15, 8, true);
        let c = label(&m);
        assert_eq!(c.regions.len(), 2);
        assert_eq!(c.regions[0].area, 16);
        assert_eq!(c.regions[1].area, 42);
        assert_eq!(c.regions[0].first_index, 20 + 1);
        assert_ne!(c.label_at(1, 1), c.label_at(10, 2));
    }

    #[test]
    fn test_diagonal_pixels_are_connected() {
        let mut m = Mask::empty(5, 5);
        m.set(0, 0, true);
        m.set(1, 1, true);
        m.set(2, 2, true);
        let c = label(&m);
        assert_eq!(c.regions.len(), 1);
        assert_eq!(c.regions[0].area, 3);
    }

    #[test]
    fn test_u_shape_merges_into_one_region() {
        // Two arms that only join at the bottom row.
        let mut m = Mask::empty(7, 5);
        m.fill_rect(0, 0, 0, 4, true);
        m.fill_rect(6, 0, 6, 4, true);
        m.fill_rect(0, 4, 6, 4, true);
        let c = label(&m);
        assert_eq!(c.regions.len(), 1);
        assert_eq!(c.regions[0].area, 5 + 5 + 5);
        assert_eq!(c.regions[0].first_index, 0);
        assert_eq!(c.label_at(0, 0), c.label_at(6, 0));
    }

    #[test]
    fn test_region_statistics() {
        let mut m = Mask::empty(10, 10);
        m.fill_rect(2, 3, 5, 6, true);
        let c = label(&m);
        let r = &c.regions[0];
        assert_eq!((r.min_x, r.min_y, r.max_x, r.max_y), (2, 3, 5, 6));
        assert_eq!(r.sum_x, (2 + 3 + 4 + 5) * 4);
        assert_eq!(r.sum_y, (3 + 4 + 5 + 6) * 4);
    }

    #[test]
    fn test_regions_ordered_by_first_pixel() {
        let mut m = Mask::empty(10, 10);
        m.fill_rect(6, 0, 8, 1, true); // starts at row 0
        m.fill_rect(0, 5, 2, 7, true); // starts at row 5
        let c = label(&m);
        assert!(c.regions[0].first_index < c.regions[1].first_index);
        assert_eq!(c.regions[0].min_x, 6);
    }

    #[test]
    fn test_label_at_out_of_bounds_is_background() {
        let mut m = Mask::empty(3, 3);
        m.fill_rect(0, 0, 2, 2, true);
        let c = label(&m);
        assert_eq!(c.label_at(-1, 0), 0);
        assert_eq!(c.label_at(0, 3), 0);
        assert_ne!(c.label_at(2, 2), 0);
    }

    #[test]
    fn test_padded_region_image_isolates_one_region() {
        let mut m = Mask::empty(6, 4);
        m.fill_rect(0, 0, 1, 1, true);
        m.fill_rect(4, 2, 5, 3, true);
        let c = label(&m);
        let img = c.padded_region_image(&c.regions[1]);
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.get_pixel(5, 3)[0], FOREGROUND);
        assert_eq!(img.get_pixel(1, 1)[0], 0);
        assert_eq!(img.pixels().filter(|p| p[0] == FOREGROUND).count(), 4);
    }
}
