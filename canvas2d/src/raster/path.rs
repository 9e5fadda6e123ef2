//! The path primitive.
//!
//! tiny-skia's `PathBuilder` is write-only, which rules out the
//! re-transforming and hit-testing the context needs on recorded geometry.
//! Geometry therefore lives in a `kurbo::BezPath` and is converted to a
//! tiny-skia path at draw time.

use kurbo::{Affine, Arc, BezPath, PathEl, Point, Rect, Shape, Stroke, StrokeOpts, Vec2};

use crate::matrix::Matrix;
use crate::style::FillRule;
use crate::util::degrees_to_radians;

/// Tolerance for flattening arcs into cubic segments.
const ARC_TOLERANCE: f64 = 0.1;

/// Stroke parameters for outline expansion.
#[derive(Debug, Clone, Copy)]
pub struct StrokeProps {
    pub width: f32,
    pub miter_limit: f32,
    pub cap: crate::style::LineCap,
    pub join: crate::style::LineJoin,
    /// Flattening precision for the expanded outline.
    pub precision: f32,
}

/// An ordered sequence of drawing verbs plus a fill-rule tag.
#[derive(Debug, Clone, Default)]
pub struct Path {
    elements: BezPath,
    fill_rule: FillRule,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.elements().is_empty()
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.fill_rule = rule;
    }

    /// The recorded verbs.
    pub fn elements(&self) -> &[PathEl] {
        self.elements.elements()
    }

    pub fn verb_count(&self) -> usize {
        self.elements.elements().len()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        let p = Point::new(x as f64, y as f64);
        self.elements.move_to(p);
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        let p = Point::new(x as f64, y as f64);
        self.ensure_current(p);
        self.elements.line_to(p);
        self.current = Some(p);
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let c = Point::new(cx as f64, cy as f64);
        let p = Point::new(x as f64, y as f64);
        self.ensure_current(c);
        self.elements.quad_to(c, p);
        self.current = Some(p);
    }

    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let c1 = Point::new(c1x as f64, c1y as f64);
        let c2 = Point::new(c2x as f64, c2y as f64);
        let p = Point::new(x as f64, y as f64);
        self.ensure_current(c1);
        self.elements.curve_to(c1, c2, p);
        self.current = Some(p);
    }

    pub fn close(&mut self) {
        if self.is_empty() {
            return;
        }
        self.elements.close_path();
        self.current = self.subpath_start;
    }

    /// A curve verb with no preceding move gets one, at the verb's first
    /// point.
    fn ensure_current(&mut self, p: Point) {
        if self.current.is_none() {
            self.elements.move_to(p);
            self.subpath_start = Some(p);
            self.current = Some(p);
        }
    }

    /// Append every verb of `other`, continuing from that path's state.
    pub fn extend(&mut self, other: &Path) {
        if other.is_empty() {
            return;
        }
        for el in other.elements.elements() {
            self.elements.push(*el);
        }
        self.current = other.current;
        self.subpath_start = other.subpath_start;
    }

    /// Axis-aligned bounding box of the recorded geometry.
    pub fn bounds(&self) -> Rect {
        if self.is_empty() {
            return Rect::ZERO;
        }
        self.elements.bounding_box()
    }

    /// Transform every recorded point by `matrix` (affine part).
    pub fn transform(&mut self, matrix: &Matrix) {
        let (a, b, c, d, e, f) = matrix.to_row();
        let affine = Affine::new([a as f64, b as f64, c as f64, d as f64, e as f64, f as f64]);
        self.elements.apply_affine(affine);
        self.current = self.current.map(|p| affine * p);
        self.subpath_start = self.subpath_start.map(|p| affine * p);
    }

    /// Containment under this path's own fill rule.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.contains_with_rule(x, y, self.fill_rule)
    }

    /// Containment under an explicit fill rule. Open subpaths are treated
    /// as closed, matching how fills rasterize them.
    pub fn contains_with_rule(&self, x: f32, y: f32, rule: FillRule) -> bool {
        let winding = self
            .closed_elements()
            .winding(Point::new(x as f64, y as f64));
        match rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }

    /// Expand this path to its stroked outline.
    pub fn stroke_outline(&self, props: &StrokeProps) -> Path {
        let style = Stroke::new(props.width as f64)
            .with_caps(props.cap.into())
            .with_join(props.join.into())
            .with_miter_limit(props.miter_limit as f64);
        let outline = kurbo::stroke(
            self.elements.elements().iter().copied(),
            &style,
            &StrokeOpts::default(),
            props.precision as f64,
        );
        Path {
            elements: outline,
            fill_rule: FillRule::NonZero,
            current: None,
            subpath_start: None,
        }
    }

    /// Append an arc of the axis-aligned oval bounded by `oval`, starting
    /// at `start_degrees` and sweeping `sweep_degrees` (negative sweeps run
    /// counterclockwise). Connects to the current point with a line unless
    /// `force_move_to` is set or the path is empty.
    pub fn arc_to_oval(
        &mut self,
        oval: Rect,
        start_degrees: f32,
        sweep_degrees: f32,
        force_move_to: bool,
    ) {
        let rx = oval.width() / 2.0;
        let ry = oval.height() / 2.0;
        let center = Point::new(oval.x0 + rx, oval.y0 + ry);
        let start = degrees_to_radians(start_degrees) as f64;
        let sweep = degrees_to_radians(sweep_degrees) as f64;

        let first = Point::new(center.x + rx * start.cos(), center.y + ry * start.sin());
        if force_move_to || self.is_empty() {
            self.elements.move_to(first);
            self.subpath_start = Some(first);
        } else {
            self.elements.line_to(first);
        }
        self.current = Some(first);

        if sweep == 0.0 {
            return;
        }
        let arc = Arc {
            center,
            radii: Vec2::new(rx, ry),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        arc.to_cubic_beziers(ARC_TOLERANCE, |c1, c2, p| {
            self.elements.curve_to(c1, c2, p);
            self.current = Some(p);
        });
    }

    /// Append an arc of radius `radius` tangent to the line from the
    /// current point to `(x1, y1)` and the line from `(x1, y1)` to
    /// `(x2, y2)`. Degenerate configurations fall back to a line to the
    /// corner, as the engine contract requires.
    pub fn arc_to_tangent(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        let Some(p0) = self.current else {
            self.move_to(x1, y1);
            return;
        };
        if radius <= 0.0 {
            self.line_to(x1, y1);
            return;
        }
        let (x0, y0) = (p0.x as f32, p0.y as f32);

        // unit vectors from the corner to the adjacent points
        let (v1x, v1y) = (x0 - x1, y0 - y1);
        let (v2x, v2y) = (x2 - x1, y2 - y1);
        let len1 = (v1x * v1x + v1y * v1y).sqrt();
        let len2 = (v2x * v2x + v2y * v2y).sqrt();
        if len1 < 1e-6 || len2 < 1e-6 {
            self.line_to(x1, y1);
            return;
        }
        let (v1x, v1y) = (v1x / len1, v1y / len1);
        let (v2x, v2y) = (v2x / len2, v2y / len2);

        let cross = v1x * v2y - v1y * v2x;
        let dot = v1x * v2x + v1y * v2y;
        let angle = cross.atan2(dot);
        if angle.abs() < 1e-6 {
            // collinear: no arc fits
            self.line_to(x1, y1);
            return;
        }

        // tangent points along both legs
        let tan_half = (angle / 2.0).tan().abs();
        let seg_len = radius / tan_half;
        let start_x = x1 + v1x * seg_len;
        let start_y = y1 + v1y * seg_len;
        let end_x = x1 + v2x * seg_len;
        let end_y = y1 + v2y * seg_len;

        // arc center sits perpendicular to the first leg
        let sign = if cross < 0.0 { -1.0 } else { 1.0 };
        let cx = start_x + -v1y * sign * radius;
        let cy = start_y + v1x * sign * radius;

        let start_angle = (start_y - cy).atan2(start_x - cx);
        let end_angle = (end_y - cy).atan2(end_x - cx);
        let mut sweep = end_angle - start_angle;
        if cross > 0.0 {
            // counterclockwise arcs sweep negative
            if sweep > 0.0 {
                sweep -= std::f32::consts::TAU;
            }
        } else if sweep < 0.0 {
            sweep += std::f32::consts::TAU;
        }

        self.line_to(start_x, start_y);
        let oval = Rect::new(
            (cx - radius) as f64,
            (cy - radius) as f64,
            (cx + radius) as f64,
            (cy + radius) as f64,
        );
        self.arc_to_oval(
            oval,
            crate::util::radians_to_degrees(start_angle),
            crate::util::radians_to_degrees(sweep),
            false,
        );
    }

    /// Copy with open subpaths closed, for containment queries.
    fn closed_elements(&self) -> BezPath {
        let mut out = BezPath::new();
        let mut open = false;
        for el in self.elements.elements() {
            match el {
                PathEl::MoveTo(p) => {
                    if open {
                        out.close_path();
                    }
                    out.move_to(*p);
                    open = false;
                }
                PathEl::ClosePath => {
                    out.close_path();
                    open = false;
                }
                other => {
                    out.push(*other);
                    open = true;
                }
            }
        }
        if open {
            out.close_path();
        }
        out
    }

    /// The finished tiny-skia path, or `None` when there is nothing to
    /// rasterize.
    pub(crate) fn to_tiny_skia(&self) -> Option<tiny_skia::Path> {
        let mut pb = tiny_skia::PathBuilder::new();
        for el in self.elements.elements() {
            match el {
                PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
                PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
                PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
                PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                ),
                PathEl::ClosePath => pb.close(),
            }
        }
        pb.finish()
    }
}
