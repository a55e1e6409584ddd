pub const CAMERA_WIDTH: u32 = 640;
pub const CAMERA_HEIGHT: u32 = 480;
/// Minimum acceptable processing rate; a warning is logged below it.
pub const FPS_TARGET: f64 = 8.0;
/// Flip frames horizontally so on-screen motion matches the user's.
pub const MIRROR_CAMERA: bool = true;

/// HSV skin bounds in OpenCV's 8-bit convention (H in 0..=179).
pub const LOWER_SKIN_HSV: [u8; 3] = [0, 20, 70];
pub const UPPER_SKIN_HSV: [u8; 3] = [20, 255, 255];

/// YCrCb skin bounds, channel order Y, Cr, Cb.
pub const LOWER_SKIN_YCRCB: [u8; 3] = [0, 133, 77];
pub const UPPER_SKIN_YCRCB: [u8; 3] = [255, 173, 127];

/// Vertical boundary line at the horizontal center of a 640px frame.
pub const BOUNDARY_X: f64 = 320.0;
pub const BOUNDARY_COLOR: [u8; 3] = [255, 0, 0];
pub const BOUNDARY_THICKNESS: u32 = 3;

/// Pixels. Strictly beyond this is SAFE.
pub const SAFE_DISTANCE: f64 = 100.0;
/// Pixels. Strictly within this is DANGER.
pub const DANGER_DISTANCE: f64 = 50.0;

pub const SAFE_COLOR: [u8; 3] = [0, 255, 0];
pub const WARNING_COLOR: [u8; 3] = [255, 165, 0];
pub const DANGER_COLOR: [u8; 3] = [255, 0, 0];

pub const MORPH_KERNEL_SIZE: usize = 5;
pub const MORPH_ITERATIONS: usize = 2;

/// Minimum area (pixels²) for a region to count as a hand.
pub const MIN_CONTOUR_AREA: f64 = 1000.0;
pub const BLUR_KERNEL_SIZE: usize = 5;

pub const FPS_BUFFER_SIZE: usize = 30;
/// Emit a status line every N frames.
pub const PRINT_INTERVAL: usize = 30;

pub const LOWER_SCREEN_THRESHOLD: f64 = 0.4;

/// Largest mask, in pixels, allocated for a malformed frame; beyond this
/// the empty mask is 0x0.
pub const MAX_MASK_PIXELS: usize = 1 << 26;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
