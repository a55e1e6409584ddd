use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};

use crate::shared::mask::Mask;

/// Square structuring element morphology on binary masks.
///
/// A `kernel_size` square is the L-infinity ball of radius
/// `kernel_size / 2`; even sizes therefore act like the next odd size.
/// Pixels outside the image never influence the result: erosion does not
/// eat in from the frame border and dilation does not grow from it.
#[derive(Clone, Copy, Debug)]
pub struct Morphology {
    radius: u8,
}

impl Morphology {
    pub fn new(kernel_size: usize) -> Self {
        // Distances saturate at 255, so 254 is the widest exact radius.
        let radius = (kernel_size / 2).min(254) as u8;
        Self { radius }
    }

    pub fn erode(&self, mask: &Mask) -> Mask {
        // A mask with no background has nothing to erode from.
        if self.radius == 0 || mask.count_set() == mask_area(mask) {
            return mask.clone();
        }
        Mask::from_gray_image(&erode(&mask.to_gray_image(), Norm::LInf, self.radius))
    }

    pub fn dilate(&self, mask: &Mask) -> Mask {
        if self.radius == 0 || mask.is_blank() {
            return mask.clone();
        }
        Mask::from_gray_image(&dilate(&mask.to_gray_image(), Norm::LInf, self.radius))
    }

    /// `iterations` erosions followed by `iterations` dilations.
    pub fn open(&self, mask: &Mask, iterations: usize) -> Mask {
        let mut out = mask.clone();
        for _ in 0..iterations {
            out = self.erode(&out);
        }
        for _ in 0..iterations {
            out = self.dilate(&out);
        }
        out
    }
}

fn mask_area(mask: &Mask) -> usize {
    mask.width() as usize * mask.height() as usize
}

impl Default for Morphology {
    fn default() -> Self {
        Self::new(crate::shared::constants::MORPH_KERNEL_SIZE)
    }
}
