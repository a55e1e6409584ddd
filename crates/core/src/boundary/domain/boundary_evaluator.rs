use crate::shared::geometry::Point;

use super::boundary::Boundary;
use super::boundary_state::{BoundaryState, DistanceThresholds};

/// Distance and resulting state for one reference point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proximity {
    pub distance: f64,
    pub state: BoundaryState,
}

/// Measures a reference point against the configured boundary and maps the
/// distance onto the SAFE / WARNING / DANGER bands.
#[derive(Clone, Debug)]
pub struct BoundaryEvaluator {
    boundary: Boundary,
    thresholds: DistanceThresholds,
}

impl BoundaryEvaluator {
    pub fn new(boundary: Boundary, thresholds: DistanceThresholds) -> Self {
        Self {
            boundary,
            thresholds,
        }
    }

    pub fn evaluate(&self, point: &Point) -> Proximity {
        let distance = self.boundary.distance(point);
        Proximity {
            distance,
            state: self.thresholds.classify(distance),
        }
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn thresholds(&self) -> &DistanceThresholds {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::Rect;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn line_evaluator() -> BoundaryEvaluator {
        BoundaryEvaluator::new(
            Boundary::vertical(320.0, 480.0),
            DistanceThresholds::new(100.0, 50.0),
        )
    }

    #[rstest]
    #[case::safe(100.0, BoundaryState::Safe)]
    #[case::safe_edge(220.0, BoundaryState::Warning)]
    #[case::warning(250.0, BoundaryState::Warning)]
    #[case::danger_edge(270.0, BoundaryState::Warning)]
    #[case::danger(300.0, BoundaryState::Danger)]
    #[case::crossing(330.0, BoundaryState::Danger)]
    #[case::other_side_safe(500.0, BoundaryState::Safe)]
    fn test_line_states(#[case] x: f64, #[case] expected: BoundaryState) {
        let result = line_evaluator().evaluate(&Point::new(x, 240.0));
        assert_eq!(result.state, expected);
    }

    #[test]
    fn test_reports_distance() {
        let result = line_evaluator().evaluate(&Point::new(245.0, 10.0));
        assert_relative_eq!(result.distance, 75.0);
        assert_eq!(result.state, BoundaryState::Warning);
    }

    #[test]
    fn test_inside_box_is_danger() {
        let evaluator = BoundaryEvaluator::new(
            Boundary::Box {
                rect: Rect::new(200.0, 200.0, 100.0, 100.0),
            },
            DistanceThresholds::default(),
        );
        let result = evaluator.evaluate(&Point::new(250.0, 250.0));
        assert_relative_eq!(result.distance, 0.0);
        assert_eq!(result.state, BoundaryState::Danger);
    }

    #[test]
    fn test_circle_radius_delta() {
        let evaluator = BoundaryEvaluator::new(
            Boundary::Circle {
                center: Point::new(0.0, 0.0),
                radius: 100.0,
            },
            DistanceThresholds::default(),
        );
        let result = evaluator.evaluate(&Point::new(0.0, 150.0));
        assert_relative_eq!(result.distance, 50.0);
        assert_eq!(result.state, BoundaryState::Warning);
    }

    #[test]
    fn test_accessors() {
        let evaluator = line_evaluator();
        assert_eq!(evaluator.boundary().kind(), "line");
        assert_relative_eq!(evaluator.thresholds().safe_distance, 100.0);
    }
}
