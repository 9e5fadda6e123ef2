//! Current-path building and containment queries.

use super::CanvasRenderingContext2D;
use crate::error::CanvasResult;
use crate::path2d::{self, Path2D};
use crate::raster::path::{Path, StrokeProps};
use crate::style::FillRule;

/// Stroke-outline flattening precision for hit tests; the value Chrome
/// uses for this computation.
const STROKE_PRECISION: f32 = 0.3;

impl CanvasRenderingContext2D {
    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        path2d::move_to(&mut self.current_path, x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        path2d::line_to(&mut self.current_path, x, y);
    }

    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "closePath");
        path2d::close_path(&mut self.current_path);
    }

    pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        path2d::quadratic_curve_to(&mut self.current_path, cpx, cpy, x, y);
    }

    pub fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32) {
        path2d::bezier_curve_to(&mut self.current_path, cp1x, cp1y, cp2x, cp2y, x, y);
    }

    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) -> CanvasResult<()> {
        path2d::arc_to(&mut self.current_path, x1, y1, x2, y2, radius)
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        log::debug!(target: "canvas", "rect {} {} {} {}", x, y, width, height);
        path2d::rect(&mut self.current_path, x, y, width, height);
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
        path2d::arc(
            &mut self.current_path,
            x,
            y,
            radius,
            start_angle,
            end_angle,
            counterclockwise,
        )
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
        path2d::ellipse(
            &mut self.current_path,
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

    // --- containment queries ---
    //
    // Query points arrive in canvas coordinates, unaffected by the CTM;
    // stored path geometry is transform-invariant. The point is mapped
    // through the inverse of the current matrix before testing.

    /// Whether `(x, y)` is inside the current path (non-zero rule).
    pub fn is_point_in_path(&self, x: f32, y: f32) -> bool {
        self.is_point_in_path_with_rule(x, y, "nonzero")
    }

    /// Whether `(x, y)` is inside the current path under the named rule.
    /// Non-finite coordinates and unrecognized rules test false.
    pub fn is_point_in_path_with_rule(&self, x: f32, y: f32, fill_rule: &str) -> bool {
        self.point_in_path(&self.current_path, x, y, fill_rule)
    }

    /// Whether `(x, y)` is inside a reusable path.
    pub fn is_point_in_path2d(&self, path: &Path2D, x: f32, y: f32, fill_rule: &str) -> bool {
        self.point_in_path(path.path(), x, y, fill_rule)
    }

    fn point_in_path(&self, path: &Path, x: f32, y: f32, fill_rule: &str) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let Ok(rule) = fill_rule.parse::<FillRule>() else {
            return false;
        };
        let Some((local_x, local_y)) = self.map_to_local(x, y) else {
            return false;
        };
        path.contains_with_rule(local_x, local_y, rule)
    }

    /// Whether `(x, y)` lies on the stroked outline of the current path
    /// under the current stroke settings.
    pub fn is_point_in_stroke(&self, x: f32, y: f32) -> bool {
        self.point_in_stroke(&self.current_path, x, y)
    }

    /// Whether `(x, y)` lies on the stroked outline of a reusable path.
    pub fn is_point_in_stroke_path2d(&self, path: &Path2D, x: f32, y: f32) -> bool {
        self.point_in_stroke(path.path(), x, y)
    }

    fn point_in_stroke(&self, path: &Path, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let Some((local_x, local_y)) = self.map_to_local(x, y) else {
            return false;
        };
        let outline = path.stroke_outline(&StrokeProps {
            width: self.state.line_width,
            miter_limit: self.state.miter_limit,
            cap: self.state.line_cap,
            join: self.state.line_join,
            precision: STROKE_PRECISION,
        });
        outline.contains_with_rule(local_x, local_y, FillRule::NonZero)
    }

    fn map_to_local(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let inverted = self.state.transform.invert()?;
        Some(inverted.map_point(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_context() -> CanvasRenderingContext2D {
        CanvasRenderingContext2D::new(200, 200, fontdb::Database::new()).unwrap()
    }

    #[test]
    fn test_point_in_path_basic() {
        let mut ctx = new_context();
        ctx.begin_path();
        ctx.rect(10.0, 10.0, 30.0, 30.0);
        assert!(ctx.is_point_in_path(25.0, 25.0));
        assert!(!ctx.is_point_in_path(50.0, 50.0));
    }

    #[test]
    fn test_point_in_path_after_translate() {
        let mut ctx = new_context();
        ctx.translate(50.0, 50.0);
        ctx.begin_path();
        ctx.rect(0.0, 0.0, 20.0, 20.0);
        // the query point is in canvas coordinates: the rect now sits at
        // (50, 50)..(70, 70) on screen
        assert!(ctx.is_point_in_path(60.0, 60.0));
        assert!(!ctx.is_point_in_path(10.0, 10.0));
    }

    #[test]
    fn test_point_in_path_rejects_bad_input() {
        let mut ctx = new_context();
        ctx.begin_path();
        ctx.rect(0.0, 0.0, 100.0, 100.0);
        assert!(!ctx.is_point_in_path(f32::NAN, 5.0));
        assert!(!ctx.is_point_in_path_with_rule(5.0, 5.0, "diagonal"));
        assert!(ctx.is_point_in_path_with_rule(5.0, 5.0, "evenodd"));
    }

    #[test]
    fn test_point_in_stroke_respects_line_width() {
        let mut ctx = new_context();
        ctx.begin_path();
        ctx.move_to(10.0, 50.0);
        ctx.line_to(90.0, 50.0);

        ctx.set_line_width(2.0);
        assert!(!ctx.is_point_in_stroke(50.0, 55.0));

        ctx.set_line_width(20.0);
        assert!(ctx.is_point_in_stroke(50.0, 55.0));
        assert!(!ctx.is_point_in_stroke(50.0, 70.0));
    }

    #[test]
    fn test_point_in_stroke_on_path2d() {
        let ctx = {
            let mut ctx = new_context();
            ctx.set_line_width(4.0);
            ctx
        };
        let mut path = Path2D::new();
        path.move_to(0.0, 0.0);
        path.line_to(100.0, 0.0);
        assert!(ctx.is_point_in_stroke_path2d(&path, 50.0, 1.0));
        assert!(!ctx.is_point_in_stroke_path2d(&path, 50.0, 10.0));
    }
}
