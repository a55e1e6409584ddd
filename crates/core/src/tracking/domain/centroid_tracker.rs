use crate::detection::domain::hand_candidate::HandCandidate;
use crate::shared::config::TrackingConfig;
use crate::shared::geometry::Point;

/// Domain interface for deriving the per-frame reference point of the hand.
pub trait ReferencePointTracker: Send {
    /// Returns the reference point for this frame, or `None` when there is
    /// no hand. A missing hand clears any smoothing history.
    fn track(&mut self, candidate: Option<&HandCandidate>) -> Option<Point>;
}

/// EMA (Exponential Moving Average) smoother over the hand centroid.
///
/// Formula: `p[t] = alpha * current + (1 - alpha) * p[t-1]`
/// Default alpha: 0.6
pub struct CentroidTracker {
    alpha: f64,
    state: Option<Point>,
}

pub const DEFAULT_ALPHA: f64 = 0.6;

impl CentroidTracker {
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            alpha: config.smoothing_alpha,
            state: None,
        }
    }

    pub fn last(&self) -> Option<Point> {
        self.state
    }
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(TrackingConfig::default())
    }
}

impl ReferencePointTracker for CentroidTracker {
    fn track(&mut self, candidate: Option<&HandCandidate>) -> Option<Point> {
        let Some(current) = candidate.map(|c| c.centroid) else {
            self.state = None;
            return None;
        };

        let smoothed = match self.state {
            None => current,
            Some(prev) => Point::new(
                self.alpha * current.x + (1.0 - self.alpha) * prev.x,
                self.alpha * current.y + (1.0 - self.alpha) * prev.y,
            ),
        };

        self.state = Some(smoothed);
        Some(smoothed)
    }
}
