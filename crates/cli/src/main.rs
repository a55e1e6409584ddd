use std::path::PathBuf;
use std::process;

use clap::Parser;

use handguard_core::boundary::domain::boundary::Boundary;
use handguard_core::pipeline::frame_pipeline::FramePipeline;
use handguard_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use handguard_core::shared::config::{ColorSpace, Config};
use handguard_core::video::infrastructure::image_file_sink::ImageFileSink;
use handguard_core::video::infrastructure::image_sequence_source::ImageSequenceSource;

/// Hand proximity alerting over a recorded frame sequence.
#[derive(Parser)]
#[command(name = "handguard")]
struct Cli {
    /// Input image file or directory of frames.
    input: Option<PathBuf>,

    /// JSON configuration file; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write annotated frames and masks to this directory.
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Nominal frame rate used to timestamp replayed frames.
    #[arg(long)]
    fps: Option<f64>,

    /// Skin color space: hsv or ycrcb.
    #[arg(long)]
    color_space: Option<String>,

    /// Minimum hand area in pixels.
    #[arg(long)]
    min_area: Option<f64>,

    /// Place a vertical boundary line at this x coordinate.
    #[arg(long)]
    boundary_x: Option<f64>,

    /// Process frames as captured instead of mirrored.
    #[arg(long)]
    no_mirror: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    validate_config(&config)?;

    if cli.print_config {
        println!("{config}");
        return Ok(());
    }

    let input = cli
        .input
        .ok_or("Input image or directory is required unless --print-config is used")?;
    if !input.exists() {
        return Err(format!("Input not found: {}", input.display()).into());
    }

    let fps = cli.fps.unwrap_or(config.camera.fps_target);
    if fps <= 0.0 {
        return Err(format!("FPS must be positive, got {fps}").into());
    }

    let logger = StdoutPipelineLogger::new(config.performance.print_interval);
    let mut pipeline = FramePipeline::from_config(&config, Box::new(logger));

    if let Some(dir) = &cli.debug_dir {
        if config.display.show_debug {
            let sink = ImageFileSink::new(dir, config.display.clone(), config.boundary.shape)?;
            pipeline = pipeline.with_debug_sink(Box::new(sink));
        } else {
            log::warn!("Debug output disabled in configuration; ignoring --debug-dir");
        }
    }

    let mut source = ImageSequenceSource::new(fps);
    let processed = pipeline.run(&mut source, &input)?;
    log::info!("Processed {processed} frame(s) from {}", input.display());
    if let Some(dir) = &cli.debug_dir {
        log::info!("Debug output written to {}", dir.display());
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(name) = &cli.color_space {
        config.segmentation.color_space = parse_color_space(name)?;
    }
    if let Some(area) = cli.min_area {
        config.detection.min_contour_area = area;
    }
    if let Some(x) = cli.boundary_x {
        config.boundary.shape = Boundary::vertical(x, config.camera.height as f64);
    }
    if cli.no_mirror {
        config.camera.mirror = false;
    }
    Ok(config)
}

fn parse_color_space(name: &str) -> Result<ColorSpace, Box<dyn std::error::Error>> {
    match name.to_lowercase().as_str() {
        "hsv" => Ok(ColorSpace::Hsv),
        "ycrcb" => Ok(ColorSpace::YCrCb),
        _ => Err(format!("Color space must be 'hsv' or 'ycrcb', got '{name}'").into()),
    }
}

fn validate_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let seg = &config.segmentation;
    if seg.blur_kernel_size > 1 && seg.blur_kernel_size % 2 == 0 {
        return Err(format!(
            "Blur kernel size must be odd, got {}",
            seg.blur_kernel_size
        )
        .into());
    }
    if seg.morph_kernel_size == 0 {
        return Err("Morphology kernel size must be at least 1".into());
    }
    if !(0.0..=1.0).contains(&seg.lower_screen_threshold) {
        return Err(format!(
            "Lower screen threshold must be between 0.0 and 1.0, got {}",
            seg.lower_screen_threshold
        )
        .into());
    }
    if config.detection.min_contour_area < 0.0 {
        return Err(format!(
            "Minimum area must not be negative, got {}",
            config.detection.min_contour_area
        )
        .into());
    }
    let alpha = config.tracking.smoothing_alpha;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(format!("Smoothing alpha must be between 0.0 and 1.0, got {alpha}").into());
    }
    let t = &config.boundary.thresholds;
    if t.danger_distance < 0.0 || t.danger_distance > t.safe_distance {
        return Err(format!(
            "Distance thresholds must satisfy 0 <= danger <= safe, got danger {} and safe {}",
            t.danger_distance, t.safe_distance
        )
        .into());
    }
    if let Boundary::Circle { radius, .. } = config.boundary.shape {
        if radius < 0.0 {
            return Err(format!("Boundary radius must not be negative, got {radius}").into());
        }
    }
    if config.performance.fps_buffer_size < 2 {
        return Err(format!(
            "FPS buffer must hold at least 2 frames, got {}",
            config.performance.fps_buffer_size
        )
        .into());
    }
    if config.performance.print_interval == 0 {
        return Err("Print interval must be at least 1".into());
    }
    Ok(())
}
