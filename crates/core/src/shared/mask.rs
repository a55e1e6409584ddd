use image::{GrayImage, Luma};
use ndarray::{s, Array2};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Binary image marking candidate skin pixels.
///
/// Indexed `[[row, col]]`. Every cell is either [`FOREGROUND`] or
/// [`BACKGROUND`].
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    pixels: Array2<u8>,
}

impl Mask {
    /// All-background mask of the given dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            pixels: Array2::from_elem((height as usize, width as usize), BACKGROUND),
        }
    }

    /// Wraps a pixel array, normalising any non-zero value to foreground.
    pub fn from_array(mut pixels: Array2<u8>) -> Self {
        pixels.mapv_inplace(|v| if v > 0 { FOREGROUND } else { BACKGROUND });
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get((y, x))
            .is_some_and(|&v| v == FOREGROUND)
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if let Some(v) = self.pixels.get_mut((y, x)) {
            *v = if on { FOREGROUND } else { BACKGROUND };
        }
    }

    /// Sets or clears every pixel of the inclusive rectangle
    /// `[x0, x1] × [y0, y1]`, clipped to the mask.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, on: bool) {
        let value = if on { FOREGROUND } else { BACKGROUND };
        let x1 = x1.min(self.pixels.ncols().saturating_sub(1));
        let y1 = y1.min(self.pixels.nrows().saturating_sub(1));
        if self.pixels.is_empty() || x0 > x1 || y0 > y1 {
            return;
        }
        self.pixels
            .slice_mut(s![y0..=y1, x0..=x1])
            .fill(value);
    }

    pub fn count_set(&self) -> usize {
        self.pixels.iter().filter(|&&v| v == FOREGROUND).count()
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&v| v == BACKGROUND)
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.pixels
    }

    pub fn as_array_mut(&mut self) -> &mut Array2<u8> {
        &mut self.pixels
    }

    /// Row-major bytes, suitable for writing a grayscale image.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().copied().collect()
    }

    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            Luma([self.pixels[[y as usize, x as usize]]])
        })
    }

    /// Any non-zero pixel of `image` becomes foreground.
    pub fn from_gray_image(image: &GrayImage) -> Self {
        let (w, h) = image.dimensions();
        Self::from_array(Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
            image.get_pixel(x as u32, y as u32)[0]
        }))
    }
}
