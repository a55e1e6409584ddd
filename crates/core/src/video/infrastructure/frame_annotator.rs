use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut,
    draw_line_segment_mut,
};
use imageproc::rect::Rect as PixelRect;

use crate::boundary::domain::boundary::Boundary;
use crate::shared::config::DisplayConfig;
use crate::shared::frame::Frame;
use crate::shared::frame_report::FrameReport;

const MARKER_RADIUS: i32 = 6;
const BANNER_HEIGHT: u32 = 12;

/// Renders the boundary, hand contour and reference point onto a copy of a
/// frame.
///
/// A banner along the top edge shows the current state color; it uses the
/// boundary color when no hand is present.
pub struct FrameAnnotator {
    boundary: Boundary,
    display: DisplayConfig,
}

impl FrameAnnotator {
    pub fn new(boundary: Boundary, display: DisplayConfig) -> Self {
        Self { boundary, display }
    }

    /// Returns `None` for frames that cannot be viewed as RGB.
    pub fn annotate(&self, frame: &Frame, report: &FrameReport) -> Option<RgbImage> {
        let mut canvas = to_rgb_image(frame)?;
        let state_color = Rgb(report
            .state
            .map(|s| self.display.state_color(s))
            .unwrap_or(self.display.boundary_color));

        self.draw_boundary(&mut canvas);

        if let Some(candidate) = &report.candidate {
            let points = &candidate.contour;
            for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
                draw_line_segment_mut(
                    &mut canvas,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    state_color,
                );
            }
        }

        if let Some(p) = report.reference_point {
            draw_filled_circle_mut(
                &mut canvas,
                (p.x.round() as i32, p.y.round() as i32),
                MARKER_RADIUS,
                state_color,
            );
        }

        let (canvas_w, canvas_h) = canvas.dimensions();
        let banner_h = BANNER_HEIGHT.min(canvas_h).max(1);
        draw_filled_rect_mut(
            &mut canvas,
            PixelRect::at(0, 0).of_size(canvas_w, banner_h),
            state_color,
        );
        Some(canvas)
    }

    fn draw_boundary(&self, canvas: &mut RgbImage) {
        let color = Rgb(self.display.boundary_color);
        let thickness = self.display.boundary_thickness.max(1) as i32;
        let spread = (-(thickness - 1) / 2)..=(thickness / 2);

        match self.boundary {
            Boundary::Line { from, to } => {
                let dx = to.x - from.x;
                let dy = to.y - from.y;
                let len = dx.hypot(dy);
                if len == 0.0 {
                    return;
                }
                // Extend across the whole canvas; drawing clips to bounds.
                let reach = (canvas.width() + canvas.height()) as f64 / len;
                let (ux, uy) = (dx * reach, dy * reach);
                // Unit normal for thickness offsets.
                let (nx, ny) = (-dy / len, dx / len);
                for k in spread {
                    let ox = nx * k as f64;
                    let oy = ny * k as f64;
                    draw_line_segment_mut(
                        canvas,
                        ((from.x - ux + ox) as f32, (from.y - uy + oy) as f32),
                        ((from.x + ux + ox) as f32, (from.y + uy + oy) as f32),
                        color,
                    );
                }
            }
            Boundary::Box { rect } => {
                for k in spread {
                    let w = rect.width.round() as i32 + 2 * k;
                    let h = rect.height.round() as i32 + 2 * k;
                    if w <= 0 || h <= 0 {
                        continue;
                    }
                    draw_hollow_rect_mut(
                        canvas,
                        PixelRect::at(rect.x.round() as i32 - k, rect.y.round() as i32 - k)
                            .of_size(w as u32, h as u32),
                        color,
                    );
                }
            }
            Boundary::Circle { center, radius } => {
                let c = (center.x.round() as i32, center.y.round() as i32);
                for k in spread {
                    let r = radius.round() as i32 + k;
                    if r > 0 {
                        draw_hollow_circle_mut(canvas, c, r, color);
                    }
                }
            }
        }
    }
}

/// Copies the first three channels of a well-formed frame into an image.
pub fn to_rgb_image(frame: &Frame) -> Option<RgbImage> {
    if !frame.is_well_formed() {
        return None;
    }
    let channels = frame.channels() as usize;
    let data = if channels == 3 {
        frame.data().to_vec()
    } else {
        frame
            .data()
            .chunks_exact(channels)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    };
    RgbImage::from_raw(frame.width(), frame.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::domain::boundary_state::BoundaryState;
    use crate::detection::domain::hand_candidate::HandCandidate;
    use crate::shared::geometry::{Pixel, Point, Rect};
    use std::time::Duration;

    fn gray_frame(width: u32, height: u32) -> Frame {
        Frame::new(
            vec![50; (width * height * 3) as usize],
            width,
            height,
            3,
            0,
            Duration::ZERO,
        )
    }

    fn empty_report() -> FrameReport {
        FrameReport {
            frame_index: 0,
            candidate: None,
            reference_point: None,
            distance: None,
            state: None,
            fps: 0.0,
        }
    }

    fn hand_report(state: BoundaryState) -> FrameReport {
        let contour = vec![
            Pixel::new(20, 30),
            Pixel::new(40, 30),
            Pixel::new(40, 50),
            Pixel::new(20, 50),
        ];
        FrameReport {
            frame_index: 3,
            candidate: Some(HandCandidate {
                contour,
                area: 441.0,
                centroid: Point::new(30.0, 40.0),
                bounding_box: Rect::new(20.0, 30.0, 21.0, 21.0),
            }),
            reference_point: Some(Point::new(30.0, 40.0)),
            distance: Some(70.0),
            state: Some(state),
            fps: 10.0,
        }
    }

    fn annotator(boundary: Boundary) -> FrameAnnotator {
        FrameAnnotator::new(boundary, DisplayConfig::default())
    }

    #[test]
    fn test_vertical_line_is_drawn_with_thickness() {
        let img = annotator(Boundary::vertical(50.0, 80.0))
            .annotate(&gray_frame(100, 80), &empty_report())
            .unwrap();
        let red = Rgb([255, 0, 0]);
        assert_eq!(*img.get_pixel(50, 60), red);
        assert_eq!(*img.get_pixel(49, 60), red);
        assert_eq!(*img.get_pixel(51, 60), red);
        assert_eq!(*img.get_pixel(53, 60), Rgb([50, 50, 50]));
    }

    #[test]
    fn test_contour_and_marker_use_state_color() {
        let img = annotator(Boundary::vertical(90.0, 80.0))
            .annotate(&gray_frame(100, 80), &hand_report(BoundaryState::Warning))
            .unwrap();
        let orange = Rgb([255, 165, 0]);
        assert_eq!(*img.get_pixel(30, 40), orange); // marker
        assert_eq!(*img.get_pixel(30, 30), orange); // contour top edge
        assert_eq!(*img.get_pixel(20, 45), orange); // contour closing edge
        assert_eq!(*img.get_pixel(5, 5), orange); // banner
        assert_eq!(*img.get_pixel(5, 70), Rgb([50, 50, 50]));
    }

    #[test]
    fn test_banner_uses_boundary_color_without_hand() {
        let img = annotator(Boundary::vertical(90.0, 80.0))
            .annotate(&gray_frame(100, 80), &empty_report())
            .unwrap();
        assert_eq!(*img.get_pixel(5, 5), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_banner_spans_full_width_of_short_frame() {
        let img = annotator(Boundary::vertical(200.0, 6.0))
            .annotate(&gray_frame(40, 6), &hand_report(BoundaryState::Danger))
            .unwrap();
        let banner = Rgb([255, 0, 0]);
        assert_eq!(*img.get_pixel(0, 0), banner);
        assert_eq!(*img.get_pixel(39, 5), banner);
    }

    #[test]
    fn test_box_boundary_outline() {
        let boundary = Boundary::Box {
            rect: Rect::new(20.0, 30.0, 40.0, 30.0),
        };
        let img = annotator(boundary)
            .annotate(&gray_frame(100, 80), &empty_report())
            .unwrap();
        assert_eq!(*img.get_pixel(20, 45), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(40, 45), Rgb([50, 50, 50]));
    }

    #[test]
    fn test_circle_boundary_outline() {
        let boundary = Boundary::Circle {
            center: Point::new(50.0, 50.0),
            radius: 20.0,
        };
        let img = annotator(boundary)
            .annotate(&gray_frame(100, 80), &empty_report())
            .unwrap();
        assert_eq!(*img.get_pixel(70, 50), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(50, 50), Rgb([50, 50, 50]));
    }

    #[test]
    fn test_malformed_frame_is_not_annotated() {
        let frame = Frame::new(vec![0; 7], 10, 10, 3, 0, Duration::ZERO);
        assert!(annotator(Boundary::vertical(5.0, 10.0))
            .annotate(&frame, &empty_report())
            .is_none());
    }

    #[test]
    fn test_to_rgb_image_drops_alpha() {
        let frame = Frame::new(vec![1, 2, 3, 255, 4, 5, 6, 255], 2, 1, 4, 0, Duration::ZERO);
        let img = to_rgb_image(&frame).unwrap();
        assert_eq!(img.into_raw(), vec![1, 2, 3, 4, 5, 6]);
    }
}
