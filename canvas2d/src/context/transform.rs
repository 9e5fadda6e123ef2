//! Transform operations.
//!
//! The current path is stored in a transform-invariant local space; the
//! device canvas carries the active matrix and applies it at draw time.
//! Composing a new matrix therefore retroactively applies its inverse to
//! the already-recorded path, so geometry recorded under the old
//! transform keeps rendering where it was recorded.

use super::CanvasRenderingContext2D;
use crate::matrix::Matrix;
use crate::util::all_finite;

impl CanvasRenderingContext2D {
    pub fn translate(&mut self, dx: f32, dy: f32) {
        if !all_finite(&[dx, dy]) {
            return;
        }
        log::debug!(target: "canvas", "translate {} {}", dx, dy);
        self.transform(1.0, 0.0, 0.0, 1.0, dx, dy);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        if !all_finite(&[sx, sy]) {
            return;
        }
        log::debug!(target: "canvas", "scale {} {}", sx, sy);
        self.transform(sx, 0.0, 0.0, sy, 0.0, 0.0);
    }

    pub fn rotate(&mut self, radians: f32) {
        if !radians.is_finite() {
            return;
        }
        log::debug!(target: "canvas", "rotate {}", radians);
        let (sin, cos) = radians.sin_cos();
        self.transform(cos, sin, -sin, cos, 0.0, 0.0);
    }

    /// Compose `(a, b, c, d, e, f)` into the running transform.
    ///
    /// A singular incoming matrix still concatenates (the geometry
    /// collapses at render time), but the retroactive path adjustment is
    /// skipped since no inverse exists.
    pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        if !all_finite(&[a, b, c, d, e, f]) {
            return;
        }
        log::debug!(target: "canvas", "transform {} {} {} {} {} {}", a, b, c, d, e, f);
        let matrix = Matrix::from_row(a, b, c, d, e, f);
        if let Some(inverted) = matrix.invert() {
            self.current_path.transform(&inverted);
        }
        self.canvas.concat(&matrix);
        self.state.transform = self.canvas.total_matrix();
    }

    /// Bake the current transform into the stored path geometry, then
    /// reset the device transform to identity.
    pub fn reset_transform(&mut self) {
        log::debug!(target: "canvas", "resetTransform");
        self.current_path.transform(&self.state.transform);
        match self.state.transform.invert() {
            Some(inverted) => self.canvas.concat(&inverted),
            None => self.canvas.set_matrix(&Matrix::identity()),
        }
        // identity modulo floating-point drift: re-read the device total
        self.state.transform = self.canvas.total_matrix();
    }

    /// Replace the transform: reset, then compose the new matrix.
    pub fn set_transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        if !all_finite(&[a, b, c, d, e, f]) {
            return;
        }
        log::debug!(target: "canvas", "setTransform {} {} {} {} {} {}", a, b, c, d, e, f);
        self.reset_transform();
        self.transform(a, b, c, d, e, f);
    }

    /// The current transformation matrix as `(a, b, c, d, e, f)`.
    pub fn get_transform(&self) -> (f32, f32, f32, f32, f32, f32) {
        self.state.transform.to_row()
    }

    /// The current transformation matrix.
    pub fn current_transform(&self) -> Matrix {
        self.state.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_context() -> CanvasRenderingContext2D {
        CanvasRenderingContext2D::new(100, 100, fontdb::Database::new()).unwrap()
    }

    #[test]
    fn test_translate_composes() {
        let mut ctx = new_context();
        ctx.translate(10.0, 20.0);
        ctx.translate(30.0, 40.0);
        let (_, _, _, _, e, f) = ctx.get_transform();
        assert_eq!((e, f), (40.0, 60.0));
    }

    #[test]
    fn test_scale_then_translate_order() {
        let mut ctx = new_context();
        ctx.scale(2.0, 2.0);
        ctx.translate(10.0, 0.0);
        // the translate happens in the scaled space
        let (x, y) = ctx.current_transform().map_point(0.0, 0.0);
        assert_eq!((x, y), (20.0, 0.0));
    }

    #[test]
    fn test_non_finite_transforms_are_ignored() {
        let mut ctx = new_context();
        ctx.translate(5.0, 5.0);
        ctx.translate(f32::NAN, 1.0);
        ctx.scale(f32::INFINITY, 1.0);
        ctx.rotate(f32::NAN);
        ctx.transform(f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.set_transform(1.0, 0.0, 0.0, f32::NEG_INFINITY, 0.0, 0.0);
        let (_, _, _, _, e, f) = ctx.get_transform();
        assert_eq!((e, f), (5.0, 5.0));
    }

    #[test]
    fn test_recorded_path_survives_later_transforms() {
        // geometry recorded before a transform() keeps rendering where it
        // was recorded: the retroactive inverse cancels the new matrix
        let mut ctx = new_context();
        ctx.begin_path();
        ctx.rect(10.0, 10.0, 20.0, 20.0);
        ctx.translate(50.0, 50.0);
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill();
        let data = ctx.get_image_data(15, 15, 1, 1).unwrap();
        assert_eq!(data.data[3], 255);
        let shifted = ctx.get_image_data(65, 65, 1, 1).unwrap();
        assert_eq!(shifted.data[3], 0);
    }

    #[test]
    fn test_reset_transform_bakes_path_geometry() {
        let mut ctx = new_context();
        ctx.translate(30.0, 0.0);
        ctx.begin_path();
        ctx.rect(0.0, 0.0, 10.0, 10.0);
        ctx.reset_transform();
        // the rect stays at device (30, 0) even though the transform is
        // now identity
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill();
        let inside = ctx.get_image_data(35, 5, 1, 1).unwrap();
        assert_eq!(inside.data[3], 255);
        let origin = ctx.get_image_data(5, 5, 1, 1).unwrap();
        assert_eq!(origin.data[3], 0);
    }

    #[test]
    fn test_set_transform_replaces() {
        let mut ctx = new_context();
        ctx.translate(10.0, 10.0);
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 3.0, 4.0);
        let (a, b, c, d, e, f) = ctx.get_transform();
        assert_eq!((a, b, c, d), (1.0, 0.0, 0.0, 1.0));
        assert_eq!((e, f), (3.0, 4.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut ctx = new_context();
        ctx.rotate(std::f32::consts::FRAC_PI_2);
        let (x, y) = ctx.current_transform().map_point(10.0, 0.0);
        assert!(x.abs() < 1e-4);
        assert!((y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_save_restore_transform() {
        let mut ctx = new_context();
        ctx.translate(10.0, 20.0);
        ctx.save();
        ctx.translate(30.0, 40.0);
        let (_, _, _, _, e, f) = ctx.get_transform();
        assert_eq!((e, f), (40.0, 60.0));
        ctx.restore();
        let (_, _, _, _, e, f) = ctx.get_transform();
        assert_eq!((e, f), (10.0, 20.0));
    }
}
