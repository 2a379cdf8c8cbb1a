pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix type.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Normalizes an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Returns `true` when `phi` lies in the sector `[start, start + span]`.
///
/// A span of a full turn accepts every angle.
#[must_use]
pub fn angle_in_sector(phi: f64, start: f64, span: f64) -> bool {
    if span >= std::f64::consts::TAU - TOLERANCE {
        return true;
    }
    let offset = normalize_angle(phi - start);
    offset <= span + TOLERANCE || offset >= std::f64::consts::TAU - TOLERANCE
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::*;

    #[test]
    fn normalize_wraps_negative() {
        assert!((normalize_angle(-FRAC_PI_2) - 1.5 * PI).abs() < TOLERANCE);
        assert!(normalize_angle(TAU).abs() < TOLERANCE);
    }

    #[test]
    fn sector_membership() {
        assert!(angle_in_sector(0.1, 0.0, FRAC_PI_2));
        assert!(!angle_in_sector(PI, 0.0, FRAC_PI_2));
        // sector crossing the branch cut
        assert!(angle_in_sector(-0.1, -0.5, 1.0));
        assert!(angle_in_sector(PI, 0.0, TAU));
    }
}
