use std::collections::VecDeque;
use std::time::Duration;

/// Moving-average frame rate over the most recent frame timestamps.
///
/// Holds at most `capacity` samples; the oldest is dropped first.
pub struct FpsMeter {
    capacity: usize,
    samples: VecDeque<Duration>,
}

impl FpsMeter {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Records the completion time of one frame, measured from any fixed
    /// origin.
    pub fn record(&mut self, timestamp: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(timestamp);
    }

    /// Frames per second across the buffered samples; 0 with fewer than two
    /// samples or a non-positive time span.
    pub fn fps(&self) -> f64 {
        let (Some(oldest), Some(newest)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let span = newest.as_secs_f64() - oldest.as_secs_f64();
        if self.samples.len() < 2 || span <= 0.0 {
            return 0.0;
        }
        (self.samples.len() - 1) as f64 / span
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(crate::shared::constants::FPS_BUFFER_SIZE)
    }
}
