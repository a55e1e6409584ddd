use crate::boundary::domain::boundary_state::BoundaryState;
use crate::detection::domain::hand_candidate::HandCandidate;
use crate::shared::geometry::Point;

/// Outcome of processing one frame.
///
/// `reference_point`, `distance` and `state` are present exactly when a
/// candidate was found.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub frame_index: usize,
    pub candidate: Option<HandCandidate>,
    pub reference_point: Option<Point>,
    pub distance: Option<f64>,
    pub state: Option<BoundaryState>,
    /// Moving-average processing rate at the time this frame completed.
    pub fps: f64,
}

impl FrameReport {
    pub fn hand_detected(&self) -> bool {
        self.candidate.is_some()
    }

    /// One-line status, e.g. `frame 30 | 12.5 fps | WARNING (72.0px)`.
    pub fn status_line(&self) -> String {
        match (self.state, self.distance) {
            (Some(state), Some(distance)) => format!(
                "frame {} | {:.1} fps | {state} ({distance:.1}px)",
                self.frame_index, self.fps
            ),
            _ => format!("frame {} | {:.1} fps | no hand", self.frame_index, self.fps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::Rect;

    fn report(state: Option<BoundaryState>) -> FrameReport {
        let candidate = state.map(|_| HandCandidate {
            contour: Vec::new(),
            area: 1500.0,
            centroid: Point::new(10.0, 10.0),
            bounding_box: Rect::new(0.0, 0.0, 20.0, 20.0),
        });
        FrameReport {
            frame_index: 30,
            reference_point: candidate.as_ref().map(|c| c.centroid),
            distance: state.map(|_| 72.0),
            candidate,
            state,
            fps: 12.5,
        }
    }

    #[test]
    fn test_status_line_with_hand() {
        let r = report(Some(BoundaryState::Warning));
        assert!(r.hand_detected());
        assert_eq!(r.status_line(), "frame 30 | 12.5 fps | WARNING (72.0px)");
    }

    #[test]
    fn test_status_line_without_hand() {
        let r = report(None);
        assert!(!r.hand_detected());
        assert_eq!(r.status_line(), "frame 30 | 12.5 fps | no hand");
    }
}
