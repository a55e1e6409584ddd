use std::collections::HashMap;
use std::time::Instant;

use crate::boundary::domain::boundary_state::BoundaryState;
use crate::shared::frame_report::FrameReport;

/// Observer for frame pipeline events.
///
/// Keeps status printing and run statistics out of the per-frame loop so
/// the same pipeline can run silently in tests.
pub trait PipelineLogger: Send {
    /// Called once per processed frame.
    fn status(&mut self, report: &FrameReport);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. candidate area).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn status(&mut self, _report: &FrameReport) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Count, sum and extremes of a stream of values, in constant space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStat {
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl RunningStat {
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Prints a status line every `print_interval` frames and keeps stage
/// timings, metrics and per-state frame counts for the closing summary.
///
/// Memory stays constant over an unbounded stream: each key keeps a
/// [`RunningStat`], not its history.
pub struct StdoutPipelineLogger {
    print_interval: usize,
    timings: HashMap<String, RunningStat>,
    metrics: HashMap<String, RunningStat>,
    state_counts: HashMap<BoundaryState, usize>,
    start_time: Instant,
    frames: usize,
    lines_printed: usize,
    last_status_line: Option<String>,
}

impl StdoutPipelineLogger {
    pub fn new(print_interval: usize) -> Self {
        Self {
            print_interval: print_interval.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            state_counts: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
            lines_printed: 0,
            last_status_line: None,
        }
    }

    /// Returns the formatted summary, or `None` before any frame is seen.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames;
        let mut lines = vec![format!(
            "Session summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let stat = &self.timings[stage];
            lines.push(format!(
                "  {stage:12}: avg {:6.2}ms  max {:6.2}ms  total {:7.0}ms",
                stat.mean(),
                stat.max,
                stat.sum
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let stat = &self.metrics[name];
            lines.push(format!(
                "  {name}: avg {:.1}  min {:.1}  max {:.1}",
                stat.mean(),
                stat.min,
                stat.max
            ));
        }

        let with_hand: usize = self.state_counts.values().sum();
        for &state in BoundaryState::ALL {
            let count = self.state_counts.get(&state).copied().unwrap_or(0);
            lines.push(format!("  {state:8}: {count} frames"));
        }
        lines.push(format!("  no hand : {} frames", frames - with_hand));

        if elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of status lines emitted so far.
    pub fn lines_printed(&self) -> usize {
        self.lines_printed
    }

    pub fn last_status_line(&self) -> Option<&str> {
        self.last_status_line.as_deref()
    }

    pub fn timings_for(&self, stage: &str) -> Option<&RunningStat> {
        self.timings.get(stage)
    }

    pub fn metrics_for(&self, name: &str) -> Option<&RunningStat> {
        self.metrics.get(name)
    }

    pub fn state_count(&self, state: BoundaryState) -> usize {
        self.state_counts.get(&state).copied().unwrap_or(0)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(crate::shared::constants::PRINT_INTERVAL)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn status(&mut self, report: &FrameReport) {
        self.frames += 1;
        if let Some(state) = report.state {
            *self.state_counts.entry(state).or_default() += 1;
        }
        if self.frames % self.print_interval == 0 {
            let line = report.status_line();
            log::info!("{line}");
            self.lines_printed += 1;
            self.last_status_line = Some(line);
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings.entry(stage.to_string()).or_default().push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::hand_candidate::HandCandidate;
    use crate::shared::geometry::{Point, Rect};
    use approx::assert_relative_eq;

    fn report(index: usize, state: Option<BoundaryState>) -> FrameReport {
        let candidate = state.map(|_| HandCandidate {
            contour: Vec::new(),
            area: 1200.0,
            centroid: Point::new(100.0, 100.0),
            bounding_box: Rect::new(80.0, 80.0, 40.0, 40.0),
        });
        FrameReport {
            frame_index: index,
            reference_point: candidate.as_ref().map(|c| c.centroid),
            distance: state.map(|_| 220.0),
            candidate,
            state,
            fps: 15.0,
        }
    }

    #[test]
    fn test_null_logger_accepts_all_events() {
        let mut logger = NullPipelineLogger;
        logger.status(&report(0, None));
        logger.timing("segment", 5.0);
        logger.metric("candidate_area", 3.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_running_stats() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("segment", 20.0);
        logger.timing("segment", 30.0);
        logger.timing("extract", 5.0);

        let segment = logger.timings_for("segment").unwrap();
        assert_eq!(segment.count, 2);
        assert_relative_eq!(segment.mean(), 25.0);
        assert_relative_eq!(segment.min, 20.0);
        assert_relative_eq!(segment.max, 30.0);
        assert_eq!(logger.timings_for("extract").unwrap().count, 1);
        assert!(logger.timings_for("track").is_none());
    }

    #[test]
    fn test_metric_records_running_stats() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.metric("candidate_area", 1500.0);
        logger.metric("candidate_area", 2500.0);
        let area = logger.metrics_for("candidate_area").unwrap();
        assert_eq!(area.count, 2);
        assert_relative_eq!(area.sum, 4000.0);
    }

    #[test]
    fn test_long_stream_keeps_one_stat_per_key() {
        let mut logger = StdoutPipelineLogger::new(10);
        for i in 0..100_000 {
            logger.timing("segment", 1.0);
            logger.metric("candidate_area", i as f64);
        }
        assert_eq!(logger.timings.len(), 1);
        assert_eq!(logger.metrics.len(), 1);
        let segment = logger.timings_for("segment").unwrap();
        assert_eq!(segment.count, 100_000);
        assert_relative_eq!(segment.sum, 100_000.0);
        assert_relative_eq!(logger.metrics_for("candidate_area").unwrap().max, 99_999.0);
    }

    #[test]
    fn test_running_stat_starts_empty() {
        let stat = RunningStat::default();
        assert_eq!(stat.count, 0);
        assert_relative_eq!(stat.mean(), 0.0);
    }

    #[test]
    fn test_negative_first_value_sets_min_and_max() {
        let mut stat = RunningStat::default();
        stat.push(-4.0);
        stat.push(-9.0);
        assert_relative_eq!(stat.min, -9.0);
        assert_relative_eq!(stat.max, -4.0);
    }

    #[test]
    fn test_status_counts_frames_and_states() {
        let mut logger = StdoutPipelineLogger::new(2);
        logger.status(&report(0, Some(BoundaryState::Safe)));
        logger.status(&report(1, Some(BoundaryState::Danger)));
        logger.status(&report(2, None));
        logger.status(&report(3, Some(BoundaryState::Danger)));

        assert_eq!(logger.frames(), 4);
        assert_eq!(logger.state_count(BoundaryState::Safe), 1);
        assert_eq!(logger.state_count(BoundaryState::Warning), 0);
        assert_eq!(logger.state_count(BoundaryState::Danger), 2);
    }

    #[test]
    fn test_summary_lists_stages_metrics_and_states() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.status(&report(0, Some(BoundaryState::Warning)));
        logger.status(&report(1, None));
        logger.timing("segment", 4.0);
        logger.metric("candidate_area", 1000.0);
        logger.metric("candidate_area", 2000.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Session summary (2 frames"));
        assert!(summary.contains("segment"));
        assert!(summary.contains("candidate_area: avg 1500.0"));
        assert!(summary.contains("WARNING : 1 frames"));
        assert!(summary.contains("no hand : 1 frames"));
    }

    #[test]
    fn test_summary_none_before_first_frame() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("segment", 1.0);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_status_line_printed_every_interval() {
        let mut logger = StdoutPipelineLogger::new(3);
        for i in 0..10 {
            logger.status(&report(i, Some(BoundaryState::Safe)));
            let seen = i + 1;
            assert_eq!(logger.lines_printed(), seen / 3, "after {seen} frames");
            if seen % 3 == 0 {
                let expected = report(i, Some(BoundaryState::Safe)).status_line();
                assert_eq!(logger.last_status_line(), Some(expected.as_str()));
            }
        }
        assert_eq!(logger.lines_printed(), 3);
        assert_eq!(
            logger.last_status_line(),
            Some(report(8, Some(BoundaryState::Safe)).status_line().as_str())
        );
    }

    #[test]
    fn test_no_status_line_before_first_interval() {
        let mut logger = StdoutPipelineLogger::new(30);
        for i in 0..29 {
            logger.status(&report(i, None));
        }
        assert_eq!(logger.lines_printed(), 0);
        assert!(logger.last_status_line().is_none());
        logger.status(&report(29, None));
        assert_eq!(logger.lines_printed(), 1);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let logger = StdoutPipelineLogger::new(0);
        assert_eq!(logger.print_interval, 1);
    }

    #[test]
    fn test_default_interval() {
        let logger = StdoutPipelineLogger::default();
        assert_eq!(logger.print_interval, crate::shared::constants::PRINT_INTERVAL);
    }
}
