//! Gradient style objects with deferred shader resolution.
//!
//! A gradient stores control points and color stops; it only becomes a
//! renderer shader at draw time, under the transform current at that
//! moment. Handles are shared: the clone kept in a saved state snapshot
//! and the one the application mutates are the same object.

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::{multiply_by_alpha, parse_color, Color};
use crate::error::{CanvasError, CanvasResult};
use crate::matrix::Matrix;

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy)]
pub struct GradientStop {
    /// Offset position in [0, 1].
    pub offset: f32,
    /// Color at this stop.
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
enum GradientGeometry {
    /// From (x0, y0) to (x1, y1).
    Linear { x0: f32, y0: f32, x1: f32, y1: f32 },
    /// From the circle at (x0, y0) with radius r0 to the circle at
    /// (x1, y1) with radius r1.
    Radial {
        x0: f32,
        y0: f32,
        r0: f32,
        x1: f32,
        y1: f32,
        r1: f32,
    },
}

#[derive(Debug)]
struct GradientInner {
    geometry: GradientGeometry,
    stops: Vec<GradientStop>,
}

/// Shared handle to a linear or radial gradient.
#[derive(Debug, Clone)]
pub struct CanvasGradient {
    inner: Rc<RefCell<GradientInner>>,
}

impl CanvasGradient {
    pub(crate) fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::with_geometry(GradientGeometry::Linear { x0, y0, x1, y1 })
    }

    pub(crate) fn new_radial(x0: f32, y0: f32, r0: f32, x1: f32, y1: f32, r1: f32) -> Self {
        Self::with_geometry(GradientGeometry::Radial {
            x0,
            y0,
            r0,
            x1,
            y1,
            r1,
        })
    }

    fn with_geometry(geometry: GradientGeometry) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GradientInner {
                geometry,
                stops: Vec::new(),
            })),
        }
    }

    /// Add a color stop.
    ///
    /// Offsets outside [0, 1] or non-finite are an error. Adding a stop at
    /// an offset already present overwrites the color at that offset: of
    /// several stops at one point only the first and last would be visible,
    /// and stops cannot be removed afterwards. A new offset is inserted in
    /// sorted position.
    pub fn add_color_stop(&self, offset: f32, color: &str) -> CanvasResult<()> {
        if !offset.is_finite() || !(0.0..=1.0).contains(&offset) {
            return Err(CanvasError::InvalidGradientStop(offset));
        }
        let color = parse_color(color)?;
        let mut inner = self.inner.borrow_mut();
        match inner.stops.iter_mut().find(|s| s.offset == offset) {
            Some(stop) => stop.color = color,
            None => {
                let idx = inner
                    .stops
                    .iter()
                    .position(|s| s.offset > offset)
                    .unwrap_or(inner.stops.len());
                inner.stops.insert(idx, GradientStop { offset, color });
            }
        }
        Ok(())
    }

    /// Snapshot of the stops in gradient order.
    pub fn stops(&self) -> Vec<GradientStop> {
        self.inner.borrow().stops.clone()
    }

    /// Resolve to a renderer shader under `transform`.
    ///
    /// The gradient's points must be transformed by the current
    /// transformation matrix when rendering, so resolution happens per
    /// draw, not at creation. The returned shader is owned by the
    /// transient paint and dropped with it; nothing stale is retained.
    /// `None` when the gradient has no stops or degenerate geometry.
    pub(crate) fn shader(
        &self,
        transform: &Matrix,
        global_alpha: f32,
    ) -> Option<tiny_skia::Shader<'static>> {
        let inner = self.inner.borrow();
        if inner.stops.is_empty() {
            return None;
        }
        let stops: Vec<tiny_skia::GradientStop> = inner
            .stops
            .iter()
            .map(|s| {
                let color = multiply_by_alpha(s.color, global_alpha);
                tiny_skia::GradientStop::new(s.offset, color.into())
            })
            .collect();

        match inner.geometry {
            GradientGeometry::Linear { x0, y0, x1, y1 } => {
                let mut pts = [x0, y0, x1, y1];
                transform.map_points(&mut pts).ok()?;
                tiny_skia::LinearGradient::new(
                    tiny_skia::Point {
                        x: pts[0],
                        y: pts[1],
                    },
                    tiny_skia::Point {
                        x: pts[2],
                        y: pts[3],
                    },
                    stops,
                    tiny_skia::SpreadMode::Pad,
                    tiny_skia::Transform::identity(),
                )
            }
            GradientGeometry::Radial {
                x0,
                y0,
                r0,
                x1,
                y1,
                r1,
            } => {
                // coincident circles paint nothing
                if x0 == x1 && y0 == y1 && r0 == r1 {
                    return None;
                }
                tiny_skia::RadialGradient::new(
                    tiny_skia::Point { x: x0, y: y0 },
                    tiny_skia::Point { x: x1, y: y1 },
                    r1,
                    stops,
                    tiny_skia::SpreadMode::Pad,
                    transform.to_transform(),
                )
            }
        }
    }
}
