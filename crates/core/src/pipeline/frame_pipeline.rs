use std::path::Path;
use std::time::{Duration, Instant};

use crate::boundary::domain::boundary_evaluator::BoundaryEvaluator;
use crate::detection::domain::hand_extractor::HandExtractor;
use crate::detection::infrastructure::largest_region_extractor::LargestRegionExtractor;
use crate::pipeline::fps_meter::FpsMeter;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::segmentation::domain::segmenter::Segmenter;
use crate::segmentation::infrastructure::skin_segmenter::SkinSegmenter;
use crate::shared::config::Config;
use crate::shared::frame::Frame;
use crate::shared::frame_report::FrameReport;
use crate::tracking::domain::centroid_tracker::{CentroidTracker, ReferencePointTracker};
use crate::video::domain::debug_sink::DebugSink;
use crate::video::domain::frame_source::FrameSource;

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Monotonic time since a fixed origin, read once per processed frame.
pub type Clock = Box<dyn FnMut() -> Duration + Send>;

fn monotonic_clock() -> Clock {
    let origin = Instant::now();
    Box::new(move || origin.elapsed())
}

/// Per-frame orchestration: segment → extract → track → evaluate.
///
/// Frames are processed one at a time on the caller's thread. The tracker
/// history and FPS window live here and carry over between frames.
pub struct FramePipeline {
    segmenter: Box<dyn Segmenter>,
    extractor: Box<dyn HandExtractor>,
    tracker: Box<dyn ReferencePointTracker>,
    evaluator: BoundaryEvaluator,
    fps_meter: FpsMeter,
    logger: Box<dyn PipelineLogger>,
    debug_sink: Option<Box<dyn DebugSink>>,
    mirror: bool,
    fps_target: f64,
    below_target: bool,
    fps_warnings: usize,
    clock: Clock,
}

impl FramePipeline {
    pub fn new(
        segmenter: Box<dyn Segmenter>,
        extractor: Box<dyn HandExtractor>,
        tracker: Box<dyn ReferencePointTracker>,
        evaluator: BoundaryEvaluator,
        fps_meter: FpsMeter,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            segmenter,
            extractor,
            tracker,
            evaluator,
            fps_meter,
            logger,
            debug_sink: None,
            mirror: false,
            fps_target: 0.0,
            below_target: false,
            fps_warnings: 0,
            clock: monotonic_clock(),
        }
    }

    /// Wires the default components from `config`.
    pub fn from_config(config: &Config, logger: Box<dyn PipelineLogger>) -> Self {
        Self::new(
            Box::new(SkinSegmenter::new(config.segmentation.clone())),
            Box::new(LargestRegionExtractor::new(config.detection.clone())),
            Box::new(CentroidTracker::new(config.tracking.clone())),
            BoundaryEvaluator::new(config.boundary.shape, config.boundary.thresholds),
            FpsMeter::new(config.performance.fps_buffer_size),
            logger,
        )
        .with_mirror(config.camera.mirror)
        .with_fps_target(config.camera.fps_target)
    }

    pub fn with_debug_sink(mut self, sink: Box<dyn DebugSink>) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// A warning is logged whenever the measured rate falls below `fps`.
    pub fn with_fps_target(mut self, fps: f64) -> Self {
        self.fps_target = fps;
        self
    }

    /// Replaces the frame completion clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn evaluator(&self) -> &BoundaryEvaluator {
        &self.evaluator
    }

    /// Number of times the rate has dropped below the target.
    pub fn fps_warnings(&self) -> usize {
        self.fps_warnings
    }

    /// Runs every stage on one frame and reports the outcome.
    pub fn process(&mut self, frame: &Frame) -> FrameReport {
        let mirrored;
        let frame = if self.mirror {
            mirrored = frame.mirrored();
            &mirrored
        } else {
            frame
        };

        let t = Instant::now();
        let mask = self.segmenter.segment(frame);
        self.logger.timing("segment", elapsed_ms(t));

        let t = Instant::now();
        let candidate = self.extractor.extract(&mask);
        self.logger.timing("extract", elapsed_ms(t));
        if let Some(c) = &candidate {
            self.logger.metric("candidate_area", c.area);
        }

        let t = Instant::now();
        let reference_point = self.tracker.track(candidate.as_ref());
        let proximity = reference_point.map(|p| self.evaluator.evaluate(&p));
        self.logger.timing("evaluate", elapsed_ms(t));

        self.fps_meter.record((self.clock)());
        let fps = self.fps_meter.fps();

        let report = FrameReport {
            frame_index: frame.index(),
            candidate,
            reference_point,
            distance: proximity.map(|p| p.distance),
            state: proximity.map(|p| p.state),
            fps,
        };

        self.logger.status(&report);
        self.check_fps(fps);

        if let Some(sink) = self.debug_sink.as_mut() {
            if let Err(e) = sink.consume(frame, &mask, &report) {
                log::warn!("Debug output failed for frame {}: {e}", report.frame_index);
            }
        }

        report
    }

    /// Drains `source` after opening `input`, returning the number of
    /// frames processed. Frames the source fails to produce are skipped.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        input: &Path,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let metadata = source.open(input)?;
        self.logger.info(&format!(
            "Replaying {} frame(s) at {}x{}",
            metadata.total_frames, metadata.width, metadata.height
        ));

        let mut processed = 0;
        for (i, result) in source.frames().enumerate() {
            match result {
                Ok(frame) => {
                    self.process(&frame);
                    processed += 1;
                }
                Err(e) => log::warn!("Skipping frame {i}: {e}"),
            }
        }
        source.close();

        self.logger.summary();
        Ok(processed)
    }

    /// Warns on the first frame below target; re-arms once the rate
    /// recovers. Returns whether a warning was issued.
    fn check_fps(&mut self, fps: f64) -> bool {
        let below = fps > 0.0 && fps < self.fps_target;
        let fired = below && !self.below_target;
        if fired {
            self.fps_warnings += 1;
            log::warn!(
                "Processing rate {fps:.1} fps is below target {:.1} fps",
                self.fps_target
            );
        }
        self.below_target = below;
        fired
    }
}
