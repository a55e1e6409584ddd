use serde::{Deserialize, Serialize};

use crate::shared::geometry::{Point, Rect};

/// Virtual reference geometry that the hand must keep its distance from.
///
/// Box and circle boundaries are treated as zones: a point inside them is at
/// distance 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Boundary {
    /// Infinite line through two distinct points.
    Line { from: Point, to: Point },
    Box { rect: Rect },
    Circle { center: Point, radius: f64 },
}

impl Boundary {
    /// Vertical line at `x`, spanning a frame of the given height.
    pub fn vertical(x: f64, height: f64) -> Self {
        Boundary::Line {
            from: Point::new(x, 0.0),
            to: Point::new(x, height),
        }
    }

    /// Distance in pixels from `p` to this boundary.
    ///
    /// - line: perpendicular distance to the infinite line
    /// - box: distance to the nearest edge from outside, 0 inside
    /// - circle: `max(|p - center| - radius, 0)`
    pub fn distance(&self, p: &Point) -> f64 {
        match self {
            Boundary::Line { from, to } => perpendicular_distance(p, from, to),
            Boundary::Box { rect } => rect.distance_to(p),
            Boundary::Circle { center, radius } => (p.distance_to(center) - radius).max(0.0),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Boundary::Line { .. } => "line",
            Boundary::Box { .. } => "box",
            Boundary::Circle { .. } => "circle",
        }
    }
}

/// Degenerate lines (coincident endpoints) collapse to point distance.
fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return p.distance_to(a);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::left_of_line(Point::new(220.0, 100.0), 100.0)]
    #[case::right_of_line(Point::new(370.0, 400.0), 50.0)]
    #[case::on_line(Point::new(320.0, 10.0), 0.0)]
    #[case::beyond_segment_ends(Point::new(300.0, 5000.0), 20.0)]
    fn test_vertical_line_distance(#[case] p: Point, #[case] expected: f64) {
        let b = Boundary::vertical(320.0, 480.0);
        assert_relative_eq!(b.distance(&p), expected);
    }

    #[test]
    fn test_diagonal_line_distance() {
        // y = x; distance from (0, 2) is sqrt(2)
        let b = Boundary::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 1.0),
        };
        assert_relative_eq!(b.distance(&Point::new(0.0, 2.0)), 2f64.sqrt());
    }

    #[test]
    fn test_degenerate_line_uses_point_distance() {
        let b = Boundary::Line {
            from: Point::new(1.0, 1.0),
            to: Point::new(1.0, 1.0),
        };
        assert_relative_eq!(b.distance(&Point::new(4.0, 5.0)), 5.0);
    }

    #[rstest]
    #[case::inside(Point::new(150.0, 150.0), 0.0)]
    #[case::outside_left(Point::new(40.0, 150.0), 60.0)]
    #[case::outside_corner(Point::new(97.0, 96.0), 5.0)]
    fn test_box_distance(#[case] p: Point, #[case] expected: f64) {
        let b = Boundary::Box {
            rect: Rect::new(100.0, 100.0, 100.0, 100.0),
        };
        assert_relative_eq!(b.distance(&p), expected);
    }

    #[rstest]
    #[case::center(Point::new(100.0, 100.0), 0.0)]
    #[case::inside(Point::new(130.0, 100.0), 0.0)]
    #[case::on_rim(Point::new(150.0, 100.0), 0.0)]
    #[case::outside(Point::new(100.0, 230.0), 80.0)]
    fn test_circle_distance(#[case] p: Point, #[case] expected: f64) {
        let b = Boundary::Circle {
            center: Point::new(100.0, 100.0),
            radius: 50.0,
        };
        assert_relative_eq!(b.distance(&p), expected);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Boundary::vertical(1.0, 1.0).kind(), "line");
        let bx = Boundary::Box {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
        };
        assert_eq!(bx.kind(), "box");
        let c = Boundary::Circle {
            center: Point::default(),
            radius: 1.0,
        };
        assert_eq!(c.kind(), "circle");
    }

    #[test]
    fn test_serde_tagged_representation() {
        let json = r#"{"type":"circle","center":{"x":10.0,"y":20.0},"radius":5.0}"#;
        let b: Boundary = serde_json::from_str(json).unwrap();
        assert_eq!(
            b,
            Boundary::Circle {
                center: Point::new(10.0, 20.0),
                radius: 5.0
            }
        );
    }
}
