//! Row-major 3x3 matrices for 2D transforms.
//!
//! The matrix is stored as nine floats in row-major order:
//!
//! ```text
//! | A B C |       x' = (A*x + B*y + C) / (G*x + H*y + I)
//! | D E F |       y' = (D*x + E*y + F) / (G*x + H*y + I)
//! | G H I |
//! ```
//!
//! Affine transforms keep the last row at `[0, 0, 1]`, but inversion and
//! point mapping handle the general 3x3 case. Every operation returns a new
//! matrix; a singular matrix inverts to `None`, which callers treat as a
//! recoverable condition (skip the transform-dependent operation).

use crate::error::{CanvasError, CanvasResult};

/// An immutable 3x3 transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(pub [f32; 9]);

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub fn identity() -> Self {
        Matrix([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Build from the canvas-style `(a, b, c, d, e, f)` components, where
    /// `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.
    pub fn from_row(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Matrix([a, c, e, b, d, f, 0.0, 0.0, 1.0])
    }

    /// The canvas-style `(a, b, c, d, e, f)` components.
    pub fn to_row(&self) -> (f32, f32, f32, f32, f32, f32) {
        let m = &self.0;
        (m[0], m[3], m[1], m[4], m[2], m[5])
    }

    /// Matrix product `self * other`. Multiplication is associative but not
    /// commutative: to first apply `a` and then `b` to a point, compose as
    /// `b.multiply(&a)` under this library's point-mapping convention.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        let a = &self.0;
        let b = &other.0;
        let mut out = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] =
                    a[row * 3] * b[col] + a[row * 3 + 1] * b[3 + col] + a[row * 3 + 2] * b[6 + col];
            }
        }
        Matrix(out)
    }

    /// Multiply two or more matrices together, left to right as given.
    pub fn multiply_many(matrices: &[Matrix]) -> CanvasResult<Matrix> {
        match matrices {
            [first, rest @ ..] if !rest.is_empty() => {
                Ok(rest.iter().fold(*first, |acc, m| acc.multiply(m)))
            }
            _ => Err(CanvasError::MatrixArity),
        }
    }

    /// The inverse, or `None` when the determinant is zero.
    ///
    /// The determinant comes from the rule of Sarrus and the inverse from
    /// the adjugate formula `adj(m) / det`: the adjugate of a 3x3 is the
    /// transpose of its cofactor matrix, each term an alternating-sign 2x2
    /// determinant formed by removing the term's row and column.
    pub fn invert(&self) -> Option<Matrix> {
        let m = &self.0;
        let det = m[0] * m[4] * m[8] + m[1] * m[5] * m[6] + m[2] * m[3] * m[7]
            - m[2] * m[4] * m[6]
            - m[1] * m[3] * m[8]
            - m[0] * m[5] * m[7];
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Matrix([
            (m[4] * m[8] - m[5] * m[7]) / det,
            (m[2] * m[7] - m[1] * m[8]) / det,
            (m[1] * m[5] - m[2] * m[4]) / det,
            (m[5] * m[6] - m[3] * m[8]) / det,
            (m[0] * m[8] - m[2] * m[6]) / det,
            (m[2] * m[3] - m[0] * m[5]) / det,
            (m[3] * m[7] - m[4] * m[6]) / det,
            (m[1] * m[6] - m[0] * m[7]) / det,
            (m[0] * m[4] - m[1] * m[3]) / det,
        ]))
    }

    /// Map a flat sequence of (x, y) pairs in place, with perspective
    /// division by the homogeneous w component (`G*x + H*y + I`).
    pub fn map_points(&self, points: &mut [f32]) -> CanvasResult<()> {
        if points.len() % 2 != 0 {
            return Err(CanvasError::OddPointList(points.len()));
        }
        let m = &self.0;
        for pair in points.chunks_exact_mut(2) {
            let (x, y) = (pair[0], pair[1]);
            let denom = m[6] * x + m[7] * y + m[8];
            pair[0] = (m[0] * x + m[1] * y + m[2]) / denom;
            pair[1] = (m[3] * x + m[4] * y + m[5]) / denom;
        }
        Ok(())
    }

    /// Map a single point.
    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.0;
        let denom = m[6] * x + m[7] * y + m[8];
        (
            (m[0] * x + m[1] * y + m[2]) / denom,
            (m[3] * x + m[4] * y + m[5]) / denom,
        )
    }

    pub fn translated(dx: f32, dy: f32) -> Matrix {
        Matrix([1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0])
    }

    /// Scale about the pivot `(px, py)`; pass `(0, 0)` for the origin.
    pub fn scaled(sx: f32, sy: f32, px: f32, py: f32) -> Matrix {
        Matrix([
            sx,
            0.0,
            px - sx * px,
            0.0,
            sy,
            py - sy * py,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Skew about the pivot `(px, py)`.
    pub fn skewed(kx: f32, ky: f32, px: f32, py: f32) -> Matrix {
        Matrix([1.0, kx, -kx * px, ky, 1.0, -ky * py, 0.0, 0.0, 1.0])
    }

    /// Rotate by `radians` about the pivot `(px, py)`.
    pub fn rotated(radians: f32, px: f32, py: f32) -> Matrix {
        let (sin, cos) = radians.sin_cos();
        Matrix([
            cos,
            -sin,
            sin * py + (1.0 - cos) * px,
            sin,
            cos,
            -sin * px + (1.0 - cos) * py,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// The affine part as a tiny-skia transform for rasterization.
    pub(crate) fn to_transform(&self) -> tiny_skia::Transform {
        let (a, b, c, d, e, f) = self.to_row();
        tiny_skia::Transform::from_row(a, b, c, d, e, f)
    }
}

impl From<tiny_skia::Transform> for Matrix {
    fn from(t: tiny_skia::Transform) -> Self {
        Matrix::from_row(t.sx, t.ky, t.kx, t.sy, t.tx, t.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_matrix_near(a: &Matrix, b: &Matrix, tolerance: f32) {
        for (x, y) in a.0.iter().zip(b.0.iter()) {
            assert!(
                (x - y).abs() < tolerance,
                "matrices differ: {:?} vs {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_identity_maps_points_unchanged() {
        let mut pts = vec![0.0, 0.0, 1.5, -2.5, 100.0, 42.0];
        let original = pts.clone();
        Matrix::identity().map_points(&mut pts).unwrap();
        assert_eq!(pts, original);
    }

    #[test]
    fn test_map_points_odd_length_is_an_error() {
        let mut pts = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            Matrix::identity().map_points(&mut pts),
            Err(CanvasError::OddPointList(3))
        ));
    }

    #[rstest]
    #[case(Matrix::translated(10.0, -3.0))]
    #[case(Matrix::scaled(2.0, 0.5, 0.0, 0.0))]
    #[case(Matrix::scaled(3.0, 3.0, 7.0, -2.0))]
    #[case(Matrix::rotated(0.7, 0.0, 0.0))]
    #[case(Matrix::rotated(-2.1, 5.0, 5.0))]
    #[case(Matrix::skewed(0.3, -0.2, 1.0, 2.0))]
    #[case(Matrix::from_row(2.0, 1.0, -1.0, 3.0, 40.0, -7.0))]
    fn test_multiply_by_inverse_is_identity(#[case] m: Matrix) {
        let inv = m.invert().expect("test matrices are invertible");
        assert_matrix_near(&m.multiply(&inv), &Matrix::identity(), 1e-4);
        assert_matrix_near(&inv.multiply(&m), &Matrix::identity(), 1e-4);
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        assert!(Matrix::scaled(0.0, 0.0, 0.0, 0.0).invert().is_none());
        assert!(Matrix::from_row(1.0, 2.0, 2.0, 4.0, 0.0, 0.0)
            .invert()
            .is_none());
    }

    #[test]
    fn test_multiply_many_requires_two() {
        assert!(matches!(
            Matrix::multiply_many(&[]),
            Err(CanvasError::MatrixArity)
        ));
        assert!(matches!(
            Matrix::multiply_many(&[Matrix::identity()]),
            Err(CanvasError::MatrixArity)
        ));
        let product =
            Matrix::multiply_many(&[Matrix::translated(1.0, 0.0), Matrix::translated(0.0, 2.0)])
                .unwrap();
        assert_eq!(product.map_point(0.0, 0.0), (1.0, 2.0));
    }

    #[test]
    fn test_scaled_about_pivot_matches_composition() {
        // scale about (px, py) == translate(px, py) * scale * translate(-px, -py)
        let composed = Matrix::multiply_many(&[
            Matrix::translated(7.0, -2.0),
            Matrix::scaled(3.0, 0.5, 0.0, 0.0),
            Matrix::translated(-7.0, 2.0),
        ])
        .unwrap();
        assert_matrix_near(&Matrix::scaled(3.0, 0.5, 7.0, -2.0), &composed, 1e-4);
    }

    #[test]
    fn test_rotated_about_pivot_matches_composition() {
        let composed = Matrix::multiply_many(&[
            Matrix::translated(5.0, 5.0),
            Matrix::rotated(1.1, 0.0, 0.0),
            Matrix::translated(-5.0, -5.0),
        ])
        .unwrap();
        assert_matrix_near(&Matrix::rotated(1.1, 5.0, 5.0), &composed, 1e-4);
    }

    #[test]
    fn test_skewed_about_pivot_matches_composition() {
        let composed = Matrix::multiply_many(&[
            Matrix::translated(1.0, 2.0),
            Matrix::skewed(0.4, 0.25, 0.0, 0.0),
            Matrix::translated(-1.0, -2.0),
        ])
        .unwrap();
        assert_matrix_near(&Matrix::skewed(0.4, 0.25, 1.0, 2.0), &composed, 1e-4);
    }

    #[test]
    fn test_row_round_trip() {
        let m = Matrix::from_row(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(m.to_row(), (1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        let t = m.to_transform();
        assert_eq!(Matrix::from(t), m);
    }

    #[test]
    fn test_perspective_division() {
        // A matrix with a non-trivial last row exercises the w divide.
        let m = Matrix([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(m.map_point(4.0, 6.0), (2.0, 3.0));
    }
}
