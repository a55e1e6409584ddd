use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boundary::domain::boundary::Boundary;
use crate::boundary::domain::boundary_state::{BoundaryState, DistanceThresholds};
use crate::shared::constants;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Hsv,
    YCrCb,
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpace::Hsv => write!(f, "HSV"),
            ColorSpace::YCrCb => write!(f, "YCrCb"),
        }
    }
}

/// Inclusive per-channel bounds in the segmenter's color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBounds {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ChannelBounds {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, px: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= px[i] && px[i] <= self.upper[i])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub fps_target: f64,
    /// Flip frames horizontally before processing.
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: constants::CAMERA_WIDTH,
            height: constants::CAMERA_HEIGHT,
            fps_target: constants::FPS_TARGET,
            mirror: constants::MIRROR_CAMERA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    pub color_space: ColorSpace,
    pub hsv_bounds: ChannelBounds,
    pub ycrcb_bounds: ChannelBounds,
    /// Gaussian pre-blur kernel size (odd); 0 or 1 disables the blur.
    pub blur_kernel_size: usize,
    pub morph_kernel_size: usize,
    pub morph_iterations: usize,
    /// Ignore skin pixels in the upper part of the frame.
    pub prefer_lower_screen: bool,
    /// Fraction of the frame height, from the top, that is ignored.
    pub lower_screen_threshold: f64,
}

impl SegmentationConfig {
    /// Bounds for the configured color space.
    pub fn active_bounds(&self) -> ChannelBounds {
        match self.color_space {
            ColorSpace::Hsv => self.hsv_bounds,
            ColorSpace::YCrCb => self.ycrcb_bounds,
        }
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Hsv,
            hsv_bounds: ChannelBounds::new(constants::LOWER_SKIN_HSV, constants::UPPER_SKIN_HSV),
            ycrcb_bounds: ChannelBounds::new(
                constants::LOWER_SKIN_YCRCB,
                constants::UPPER_SKIN_YCRCB,
            ),
            blur_kernel_size: constants::BLUR_KERNEL_SIZE,
            morph_kernel_size: constants::MORPH_KERNEL_SIZE,
            morph_iterations: constants::MORPH_ITERATIONS,
            prefer_lower_screen: false,
            lower_screen_threshold: constants::LOWER_SCREEN_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub min_contour_area: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_contour_area: constants::MIN_CONTOUR_AREA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// EMA weight of the newest centroid; 1.0 disables smoothing.
    pub smoothing_alpha: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: crate::tracking::domain::centroid_tracker::DEFAULT_ALPHA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    pub shape: Boundary,
    pub thresholds: DistanceThresholds,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            shape: Boundary::vertical(constants::BOUNDARY_X, constants::CAMERA_HEIGHT as f64),
            thresholds: DistanceThresholds::default(),
        }
    }
}

/// RGB colors used by the annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub boundary_color: [u8; 3],
    pub boundary_thickness: u32,
    pub safe_color: [u8; 3],
    pub warning_color: [u8; 3],
    pub danger_color: [u8; 3],
    /// Hand the mask and annotated frame to the debug sink.
    pub show_debug: bool,
}

impl DisplayConfig {
    pub fn state_color(&self, state: BoundaryState) -> [u8; 3] {
        match state {
            BoundaryState::Safe => self.safe_color,
            BoundaryState::Warning => self.warning_color,
            BoundaryState::Danger => self.danger_color,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            boundary_color: constants::BOUNDARY_COLOR,
            boundary_thickness: constants::BOUNDARY_THICKNESS,
            safe_color: constants::SAFE_COLOR,
            warning_color: constants::WARNING_COLOR,
            danger_color: constants::DANGER_COLOR,
            show_debug: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Frames averaged for the FPS estimate.
    pub fps_buffer_size: usize,
    /// Status line every N frames.
    pub print_interval: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            fps_buffer_size: constants::FPS_BUFFER_SIZE,
            print_interval: constants::PRINT_INTERVAL,
        }
    }
}

/// Process-wide settings, built once at startup and never mutated.
///
/// Components take the section they need by value at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub segmentation: SegmentationConfig,
    pub detection: DetectionConfig,
    pub tracking: TrackingConfig,
    pub boundary: BoundaryConfig,
    pub display: DisplayConfig,
    pub performance: PerformanceConfig,
}

impl Config {
    /// Parses a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        let t = &self.boundary.thresholds;
        writeln!(f, "{rule}")?;
        writeln!(f, "HAND PROXIMITY GUARD - CONFIGURATION")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Camera: {}x{}", self.camera.width, self.camera.height)?;
        writeln!(f, "Target FPS: >={}", self.camera.fps_target)?;
        writeln!(f, "Color Space: {}", self.segmentation.color_space)?;
        match &self.boundary.shape {
            Boundary::Line { from, to } if from.x == to.x => {
                writeln!(f, "Boundary: line at x={}", from.x)?
            }
            Boundary::Line { from, to } => writeln!(
                f,
                "Boundary: line ({}, {}) -> ({}, {})",
                from.x, from.y, to.x, to.y
            )?,
            Boundary::Box { rect } => writeln!(
                f,
                "Boundary: box at ({}, {}) size {}x{}",
                rect.x, rect.y, rect.width, rect.height
            )?,
            Boundary::Circle { center, radius } => writeln!(
                f,
                "Boundary: circle at ({}, {}) r={}",
                center.x, center.y, radius
            )?,
        }
        writeln!(f)?;
        writeln!(f, "Distance Thresholds:")?;
        writeln!(f, "  SAFE:    > {}px", t.safe_distance)?;
        writeln!(f, "  WARNING: {}-{}px", t.danger_distance, t.safe_distance)?;
        writeln!(f, "  DANGER:  < {}px", t.danger_distance)?;
        write!(f, "{rule}")
    }
}
