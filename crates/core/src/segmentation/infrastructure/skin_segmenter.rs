use crate::segmentation::domain::segmenter::Segmenter;
use crate::shared::config::{ChannelBounds, ColorSpace, SegmentationConfig};
use crate::shared::constants::MAX_MASK_PIXELS;
use crate::shared::frame::Frame;
use crate::shared::mask::Mask;

use super::color_space::{rgb_to_hsv, rgb_to_ycrcb};
use super::gaussian;
use super::morphology::Morphology;

/// Skin-color segmenter: optional Gaussian pre-blur, per-pixel color-space
/// threshold, then morphological opening.
pub struct SkinSegmenter {
    color_space: ColorSpace,
    bounds: ChannelBounds,
    blur_kernel: Option<Vec<f32>>,
    morphology: Morphology,
    iterations: usize,
    lower_screen_threshold: Option<f64>,
    pixel_buf: Vec<u8>,
    blur_temp: Vec<f32>,
    blur_scratch: Vec<f32>,
}

impl SkinSegmenter {
    pub fn new(config: SegmentationConfig) -> Self {
        let blur_kernel = (config.blur_kernel_size > 1)
            .then(|| gaussian::gaussian_kernel_1d(config.blur_kernel_size | 1));
        Self {
            color_space: config.color_space,
            bounds: config.active_bounds(),
            blur_kernel,
            morphology: Morphology::new(config.morph_kernel_size),
            iterations: config.morph_iterations,
            lower_screen_threshold: config
                .prefer_lower_screen
                .then_some(config.lower_screen_threshold.clamp(0.0, 1.0)),
            pixel_buf: Vec::new(),
            blur_temp: Vec::new(),
            blur_scratch: Vec::new(),
        }
    }

    fn threshold(&self, width: usize, height: usize, channels: usize) -> Mask {
        let mut mask = Mask::empty(width as u32, height as u32);
        let convert = match self.color_space {
            ColorSpace::Hsv => rgb_to_hsv,
            ColorSpace::YCrCb => rgb_to_ycrcb,
        };
        for (i, px) in self.pixel_buf.chunks_exact(channels).enumerate() {
            if self.bounds.contains(convert([px[0], px[1], px[2]])) {
                mask.set(i % width, i / width, true);
            }
        }
        mask
    }
}

impl Default for SkinSegmenter {
    fn default() -> Self {
        Self::new(SegmentationConfig::default())
    }
}

impl Segmenter for SkinSegmenter {
    fn segment(&mut self, frame: &Frame) -> Mask {
        if !frame.is_well_formed() {
            log::debug!(
                "Frame {} is malformed ({}x{}x{}, {} bytes), returning empty mask",
                frame.index(),
                frame.width(),
                frame.height(),
                frame.channels(),
                frame.data().len()
            );
            let pixels = (frame.width() as usize).checked_mul(frame.height() as usize);
            let (w, h) = match pixels {
                Some(n) if n > 0 && n <= MAX_MASK_PIXELS => (frame.width(), frame.height()),
                _ => (0, 0),
            };
            return Mask::empty(w, h);
        }

        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let channels = frame.channels() as usize;

        self.pixel_buf.clear();
        self.pixel_buf.extend_from_slice(frame.data());
        if let Some(kernel) = &self.blur_kernel {
            gaussian::separable_gaussian_blur(
                &mut self.pixel_buf,
                width,
                height,
                channels,
                kernel,
                &mut self.blur_temp,
                &mut self.blur_scratch,
            );
        }

        let raw = self.threshold(width, height, channels);
        let mut mask = self.morphology.open(&raw, self.iterations);

        if let Some(fraction) = self.lower_screen_threshold {
            let cutoff = (height as f64 * fraction).floor() as usize;
            if cutoff > 0 {
                mask.fill_rect(0, 0, width - 1, cutoff - 1, false);
            }
        }
        mask
    }
}
