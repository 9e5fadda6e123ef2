//! Small numeric helpers shared by the path and context modules.

use std::f32::consts::PI;

/// True when every value is finite. The guard for path and transform
/// arguments: a single NaN or infinity makes the whole call a silent
/// no-op.
pub(crate) fn all_finite(values: &[f32]) -> bool {
    values.iter().all(|v| v.is_finite())
}

pub(crate) fn radians_to_degrees(rad: f32) -> f32 {
    rad / PI * 180.0
}

pub(crate) fn degrees_to_radians(deg: f32) -> f32 {
    deg / 180.0 * PI
}

pub(crate) fn almost_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_finite() {
        assert!(all_finite(&[0.0, -1.5, 1e30]));
        assert!(!all_finite(&[0.0, f32::NAN]));
        assert!(!all_finite(&[f32::INFINITY]));
        assert!(!all_finite(&[f32::NEG_INFINITY, 1.0]));
        assert!(all_finite(&[]));
    }

    #[test]
    fn test_angle_conversions() {
        assert!(almost_equal(radians_to_degrees(PI), 180.0));
        assert!(almost_equal(degrees_to_radians(180.0), PI));
        assert!(almost_equal(degrees_to_radians(radians_to_degrees(1.25)), 1.25));
    }
}
