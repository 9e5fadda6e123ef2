//! Path-building helpers and the reusable Path2D handle.
//!
//! The free functions implement the CanvasPath operations over a raster
//! path. Every helper silently does nothing when any numeric argument is
//! non-finite; a negative radius, by contrast, is a caller bug and is
//! reported as an error.

use std::f32::consts::PI;

use kurbo::Rect;

use crate::error::{CanvasError, CanvasResult};
use crate::matrix::Matrix;
use crate::raster::path::Path;
use crate::util::{all_finite, almost_equal, radians_to_degrees};

pub(crate) fn move_to(path: &mut Path, x: f32, y: f32) {
    if !all_finite(&[x, y]) {
        return;
    }
    path.move_to(x, y);
}

pub(crate) fn line_to(path: &mut Path, x: f32, y: f32) {
    if !all_finite(&[x, y]) {
        return;
    }
    // a lineTo without a previous point has a moveTo inserted before it
    if path.is_empty() {
        path.move_to(x, y);
    }
    path.line_to(x, y);
}

pub(crate) fn close_path(path: &mut Path) {
    if path.is_empty() {
        return;
    }
    // closing a path that is a single point would introduce a spurious
    // segment
    let bounds = path.bounds();
    if bounds.width() != 0.0 || bounds.height() != 0.0 {
        path.close();
    }
}

pub(crate) fn quadratic_curve_to(path: &mut Path, cpx: f32, cpy: f32, x: f32, y: f32) {
    if !all_finite(&[cpx, cpy, x, y]) {
        return;
    }
    if path.is_empty() {
        path.move_to(cpx, cpy);
    }
    path.quad_to(cpx, cpy, x, y);
}

pub(crate) fn bezier_curve_to(
    path: &mut Path,
    cp1x: f32,
    cp1y: f32,
    cp2x: f32,
    cp2y: f32,
    x: f32,
    y: f32,
) {
    if !all_finite(&[cp1x, cp1y, cp2x, cp2y, x, y]) {
        return;
    }
    if path.is_empty() {
        path.move_to(cp1x, cp1y);
    }
    path.cubic_to(cp1x, cp1y, cp2x, cp2y, x, y);
}

pub(crate) fn arc_to(
    path: &mut Path,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    radius: f32,
) -> CanvasResult<()> {
    if !all_finite(&[x1, y1, x2, y2, radius]) {
        return Ok(());
    }
    if radius < 0.0 {
        return Err(CanvasError::NegativeRadius(radius));
    }
    if path.is_empty() {
        path.move_to(x1, y1);
    }
    path.arc_to_tangent(x1, y1, x2, y2, radius);
    Ok(())
}

pub(crate) fn rect(path: &mut Path, x: f32, y: f32, width: f32, height: f32) {
    if !all_finite(&[x, y, width, height]) {
        return;
    }
    path.move_to(x, y);
    path.line_to(x + width, y);
    path.line_to(x + width, y + height);
    path.line_to(x, y + height);
    path.close();
}

fn ellipse_helper(
    path: &mut Path,
    x: f32,
    y: f32,
    radius_x: f32,
    radius_y: f32,
    start_angle: f32,
    end_angle: f32,
) {
    let sweep_degrees = radians_to_degrees(end_angle - start_angle);
    let start_degrees = radians_to_degrees(start_angle);
    let oval = Rect::new(
        (x - radius_x) as f64,
        (y - radius_y) as f64,
        (x + radius_x) as f64,
        (y + radius_y) as f64,
    );

    // draw a full sweep as two 180 degree segments: a single 360 degree
    // arc call draws nothing
    if almost_equal(sweep_degrees.abs(), 360.0) {
        let half_sweep = sweep_degrees / 2.0;
        path.arc_to_oval(oval, start_degrees, half_sweep, false);
        path.arc_to_oval(oval, start_degrees + half_sweep, half_sweep, false);
        return;
    }

    path.arc_to_oval(oval, start_degrees, sweep_degrees, false);
}

/// Append an elliptical arc.
///
/// The start angle is canonicalized into [0, 2pi) with the end angle
/// shifted by the same delta, then the end angle is adjusted so the sweep
/// matches the `counterclockwise` flag and never exceeds one full turn
/// unless the caller asked for a complete ellipse. The arc is never
/// implicitly closed: a later fill that wants a closed contour must call
/// closePath.
#[allow(clippy::too_many_arguments)]
pub(crate) fn ellipse(
    path: &mut Path,
    x: f32,
    y: f32,
    radius_x: f32,
    radius_y: f32,
    rotation: f32,
    start_angle: f32,
    end_angle: f32,
    counterclockwise: bool,
) -> CanvasResult<()> {
    if !all_finite(&[x, y, radius_x, radius_y, rotation, start_angle, end_angle]) {
        return Ok(());
    }
    if radius_x < 0.0 || radius_y < 0.0 {
        return Err(CanvasError::NegativeRadius(radius_x.min(radius_y)));
    }

    let tau = 2.0 * PI;
    let mut new_start = start_angle % tau;
    if new_start < 0.0 {
        new_start += tau;
    }
    let delta = new_start - start_angle;
    let start_angle = new_start;
    let mut end_angle = end_angle + delta;

    if !counterclockwise && end_angle - start_angle >= tau {
        // complete ellipse
        end_angle = start_angle + tau;
    } else if counterclockwise && start_angle - end_angle >= tau {
        // complete ellipse
        end_angle = start_angle - tau;
    } else if !counterclockwise && start_angle > end_angle {
        end_angle = start_angle + (tau - (start_angle - end_angle) % tau);
    } else if counterclockwise && start_angle < end_angle {
        end_angle = start_angle - (tau - (end_angle - start_angle) % tau);
    }

    if rotation == 0.0 {
        ellipse_helper(path, x, y, radius_x, radius_y, start_angle, end_angle);
        return Ok(());
    }

    // rotate the path back by -rotation about the center, draw the
    // unrotated ellipse, rotate forward again: the ellipse lands already
    // rotated in the path's coordinate space
    path.transform(&Matrix::rotated(-rotation, x, y));
    ellipse_helper(path, x, y, radius_x, radius_y, start_angle, end_angle);
    path.transform(&Matrix::rotated(rotation, x, y));
    Ok(())
}

/// Append a circular arc; a simpler version of [`ellipse`].
pub(crate) fn arc(
    path: &mut Path,
    x: f32,
    y: f32,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    counterclockwise: bool,
) -> CanvasResult<()> {
    ellipse(
        path,
        x,
        y,
        radius,
        radius,
        0.0,
        start_angle,
        end_angle,
        counterclockwise,
    )
}

/// A reusable path object wrapping the same helpers, usable independently
/// of any context (for hit testing or reuse across draws).
#[derive(Debug, Clone, Default)]
pub struct Path2D {
    path: Path,
}

impl Path2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy another path's accumulated geometry.
    pub fn from_path(other: &Path2D) -> Self {
        other.clone()
    }

    /// Build a Path2D from SVG path data.
    ///
    /// Supports the full command set; arcs are converted to cubic curves.
    pub fn from_svg_path_data(data: &str) -> CanvasResult<Self> {
        let mut path = Path2D::new();
        for segment in svgtypes::SimplifyingPathParser::from(data) {
            let segment = segment.map_err(|e| {
                CanvasError::InvalidArgument(format!("invalid SVG path data: {:?}", e))
            })?;
            match segment {
                svgtypes::SimplePathSegment::MoveTo { x, y } => {
                    path.move_to(x as f32, y as f32);
                }
                svgtypes::SimplePathSegment::LineTo { x, y } => {
                    path.line_to(x as f32, y as f32);
                }
                svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    path.quadratic_curve_to(x1 as f32, y1 as f32, x as f32, y as f32);
                }
                svgtypes::SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    path.bezier_curve_to(
                        x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
                    );
                }
                svgtypes::SimplePathSegment::ClosePath => {
                    path.close_path();
                }
            }
        }
        Ok(path)
    }

    /// Append another path, optionally transformed.
    pub fn add_path(&mut self, other: &Path2D, transform: Option<&Matrix>) {
        let mut copy = other.path.clone();
        if let Some(matrix) = transform {
            copy.transform(matrix);
        }
        self.path.extend(&copy);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        move_to(&mut self.path, x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        line_to(&mut self.path, x, y);
    }

    pub fn close_path(&mut self) {
        close_path(&mut self.path);
    }

    pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        quadratic_curve_to(&mut self.path, cpx, cpy, x, y);
    }

    pub fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32) {
        bezier_curve_to(&mut self.path, cp1x, cp1y, cp2x, cp2y, x, y);
    }

    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) -> CanvasResult<()> {
        arc_to(&mut self.path, x1, y1, x2, y2, radius)
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        rect(&mut self.path, x, y, width, height);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    ) -> CanvasResult<()> {
        ellipse(
            &mut self.path,
            x,
            y,
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
            counterclockwise,
        )
    }

    pub fn arc(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    ) -> CanvasResult<()> {
        arc(
            &mut self.path,
            x,
            y,
            radius,
            start_angle,
            end_angle,
            counterclockwise,
        )
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_non_finite_arguments_are_silent_noops() {
        let mut path = Path::new();
        move_to(&mut path, f32::NAN, 0.0);
        line_to(&mut path, f32::INFINITY, 1.0);
        quadratic_curve_to(&mut path, 0.0, 0.0, f32::NEG_INFINITY, 1.0);
        bezier_curve_to(&mut path, 0.0, f32::NAN, 1.0, 1.0, 2.0, 2.0);
        rect(&mut path, 0.0, 0.0, f32::NAN, 5.0);
        assert!(arc_to(&mut path, 0.0, 0.0, 1.0, 1.0, f32::NAN).is_ok());
        assert!(ellipse(&mut path, 0.0, 0.0, 1.0, 1.0, 0.0, f32::INFINITY, 1.0, false).is_ok());
        assert!(path.is_empty());
    }

    #[test]
    fn test_negative_radius_is_an_error() {
        let mut path = Path::new();
        assert!(matches!(
            arc_to(&mut path, 0.0, 0.0, 1.0, 1.0, -1.0),
            Err(CanvasError::NegativeRadius(_))
        ));
        assert!(matches!(
            ellipse(&mut path, 0.0, 0.0, -2.0, 1.0, 0.0, 0.0, 1.0, false),
            Err(CanvasError::NegativeRadius(_))
        ));
        assert!(matches!(
            arc(&mut path, 0.0, 0.0, -1.0, 0.0, 1.0, false),
            Err(CanvasError::NegativeRadius(_))
        ));
    }

    #[test]
    fn test_line_to_on_empty_path_inserts_move() {
        let mut path = Path::new();
        line_to(&mut path, 10.0, 20.0);
        assert!(matches!(path.elements()[0], PathEl::MoveTo(_)));
        assert!(matches!(path.elements()[1], PathEl::LineTo(_)));
    }

    #[test]
    fn test_close_path_on_empty_path_is_noop() {
        let mut path = Path::new();
        close_path(&mut path);
        assert!(path.is_empty());
    }

    #[test]
    fn test_close_path_on_single_point_adds_nothing() {
        let mut path = Path::new();
        move_to(&mut path, 5.0, 5.0);
        let before = path.verb_count();
        close_path(&mut path);
        assert_eq!(path.verb_count(), before);
    }

    #[test]
    fn test_close_path_on_real_contour_closes() {
        let mut path = Path::new();
        move_to(&mut path, 0.0, 0.0);
        line_to(&mut path, 10.0, 0.0);
        close_path(&mut path);
        assert!(matches!(
            path.elements().last(),
            Some(PathEl::ClosePath)
        ));
    }

    #[test]
    fn test_quadratic_on_empty_path_moves_to_control_point() {
        let mut path = Path::new();
        quadratic_curve_to(&mut path, 3.0, 4.0, 10.0, 10.0);
        match path.elements()[0] {
            PathEl::MoveTo(p) => {
                assert_eq!((p.x, p.y), (3.0, 4.0));
            }
            ref other => panic!("expected MoveTo, got {:?}", other),
        }
    }

    fn full_circle(counterclockwise: bool) -> Path {
        let mut path = Path::new();
        arc(
            &mut path,
            50.0,
            50.0,
            25.0,
            0.0,
            2.0 * std::f32::consts::PI,
            counterclockwise,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_full_circle_both_directions() {
        for ccw in [false, true] {
            let path = full_circle(ccw);
            // the circle covers its interior...
            assert!(path.contains(50.0, 50.0), "ccw={}", ccw);
            assert!(path.contains(70.0, 50.0), "ccw={}", ccw);
            assert!(!path.contains(80.0, 80.0), "ccw={}", ccw);
            // ...and is left open: no implicit close for later fills
            assert!(
                !matches!(path.elements().last(), Some(PathEl::ClosePath)),
                "ccw={}",
                ccw
            );
        }
        // both directions produce the same two-half-sweep structure
        assert_eq!(
            full_circle(false).verb_count(),
            full_circle(true).verb_count()
        );
    }

    #[test]
    fn test_arc_sweep_is_clamped_to_one_turn() {
        let mut once = Path::new();
        arc(&mut once, 0.0, 0.0, 10.0, 0.0, 2.0 * PI, false).unwrap();
        let mut thrice = Path::new();
        arc(&mut thrice, 0.0, 0.0, 10.0, 0.0, 6.0 * PI, false).unwrap();
        assert_eq!(once.verb_count(), thrice.verb_count());
    }

    #[test]
    fn test_arc_direction_flag_flips_short_sweep() {
        // 0 -> pi/2 clockwise is a quarter turn; counterclockwise is the
        // complementary three-quarter turn through the top of the circle
        let mut cw = Path::new();
        arc(&mut cw, 50.0, 50.0, 20.0, 0.0, PI / 2.0, false).unwrap();
        let mut ccw = Path::new();
        arc(&mut ccw, 50.0, 50.0, 20.0, 0.0, PI / 2.0, true).unwrap();
        assert!(ccw.verb_count() > cw.verb_count());
    }

    #[test]
    fn test_rotated_ellipse_lands_rotated() {
        // a flat ellipse rotated 90 degrees becomes tall
        let mut path = Path::new();
        ellipse(
            &mut path,
            50.0,
            50.0,
            20.0,
            5.0,
            PI / 2.0,
            0.0,
            2.0 * PI,
            false,
        )
        .unwrap();
        assert!(path.contains(50.0, 65.0));
        assert!(!path.contains(65.0, 50.0));
    }

    #[test]
    fn test_ellipse_with_canonicalized_negative_start() {
        let mut path = Path::new();
        // -pi/2 canonicalizes to 3pi/2 with the sweep preserved
        arc(&mut path, 50.0, 50.0, 20.0, -PI / 2.0, PI / 2.0, false).unwrap();
        assert!(!path.is_empty());
        // quarter sweeps on either side of angle 0 pass through (70, 50)
        let mut probe = path.clone();
        probe.close();
        assert!(probe.contains(65.0, 50.0));
    }

    #[test]
    fn test_path2d_svg_path_data() {
        let path = Path2D::from_svg_path_data("M 0 0 L 20 0 L 20 20 Z").unwrap();
        assert!(path.path().contains(15.0, 5.0));
        assert!(Path2D::from_svg_path_data("M 10 % nonsense").is_err());
    }

    #[test]
    fn test_path2d_add_path_with_transform() {
        let mut square = Path2D::new();
        square.rect(0.0, 0.0, 10.0, 10.0);
        let mut combined = Path2D::new();
        combined.add_path(&square, Some(&Matrix::translated(100.0, 0.0)));
        assert!(combined.path().contains(105.0, 5.0));
        assert!(!combined.path().contains(5.0, 5.0));
    }
}
