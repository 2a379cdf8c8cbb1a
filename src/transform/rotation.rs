use std::ops::Mul;

use nalgebra::{Rotation3, Unit};

use crate::error::{GeometryError, Result};
use crate::math::{Matrix3, Vector3};

/// Tolerance used when accepting a caller-supplied rotation matrix.
const ORTHONORMAL_TOLERANCE: f64 = 1e-9;

/// An orthonormal 3x3 rotation.
///
/// Built by chaining axis rotations. Each `rotate_*` call applies a further
/// rotation about a fixed axis of the parent frame, so
/// `Rotation::identity().rotate_x(a).rotate_z(b)` equals `Rz(b) * Rx(a)`.
/// The order is significant and follows the assembly drawings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(Rotation3<f64>);

impl Rotation {
    /// The identity rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self(Rotation3::identity())
    }

    /// Applies a further rotation of `angle` radians about the X axis.
    #[must_use]
    pub fn rotate_x(self, angle: f64) -> Self {
        self.rotate_axis(Vector3::x_axis(), angle)
    }

    /// Applies a further rotation of `angle` radians about the Y axis.
    #[must_use]
    pub fn rotate_y(self, angle: f64) -> Self {
        self.rotate_axis(Vector3::y_axis(), angle)
    }

    /// Applies a further rotation of `angle` radians about the Z axis.
    #[must_use]
    pub fn rotate_z(self, angle: f64) -> Self {
        self.rotate_axis(Vector3::z_axis(), angle)
    }

    fn rotate_axis(self, axis: Unit<Vector3>, angle: f64) -> Self {
        Self(Rotation3::from_axis_angle(&axis, angle) * self.0)
    }

    /// Creates a rotation from an explicit matrix.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] if the matrix is not
    /// orthonormal or has a negative determinant.
    pub fn from_matrix(matrix: Matrix3) -> Result<Self> {
        let deviation = (matrix.transpose() * matrix - Matrix3::identity()).amax();
        if !deviation.is_finite() || deviation > ORTHONORMAL_TOLERANCE {
            return Err(GeometryError::invalid(
                "rotation",
                "orthonormality",
                deviation,
                "matrix is not orthonormal",
            )
            .into());
        }
        let det = matrix.determinant();
        if det < 0.0 {
            return Err(GeometryError::invalid(
                "rotation",
                "determinant",
                det,
                "matrix is a reflection",
            )
            .into());
        }
        Ok(Self(Rotation3::from_matrix_unchecked(matrix)))
    }

    /// Returns the inverse (transposed) rotation.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// Returns the underlying matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        self.0.matrix()
    }

    /// Rotates a vector.
    #[must_use]
    pub fn apply(&self, v: &Vector3) -> Vector3 {
        self.0 * v
    }

    /// Returns `true` when every entry is within `tol` of the identity.
    #[must_use]
    pub fn is_identity(&self, tol: f64) -> bool {
        (self.matrix() - Matrix3::identity()).amax() <= tol
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Rotation {
        Rotation(self.0 * rhs.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn rotate_x_quarter_turn() {
        let r = Rotation::identity().rotate_x(FRAC_PI_2);
        let out = r.apply(&v(0.0, 1.0, 0.0));
        assert_relative_eq!(out, v(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn chained_rotations_apply_in_call_order() {
        // x first, then z: y -> z -> z
        let r = Rotation::identity().rotate_x(FRAC_PI_2).rotate_z(FRAC_PI_2);
        assert_relative_eq!(r.apply(&v(0.0, 1.0, 0.0)), v(0.0, 0.0, 1.0), epsilon = 1e-12);
        // z first, then x: y -> -x -> -x
        let r = Rotation::identity().rotate_z(FRAC_PI_2).rotate_x(FRAC_PI_2);
        assert_relative_eq!(r.apply(&v(0.0, 1.0, 0.0)), v(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn order_is_not_commutative() {
        let a = Rotation::identity().rotate_x(0.3).rotate_y(0.7);
        let b = Rotation::identity().rotate_y(0.7).rotate_x(0.3);
        assert!((a.matrix() - b.matrix()).amax() > 1e-3);
    }

    #[test]
    fn inverse_undoes_rotation() {
        let r = Rotation::identity().rotate_x(0.4).rotate_y(-1.1).rotate_z(2.5);
        assert!((r * r.inverse()).is_identity(1e-12));
    }

    #[test]
    fn from_matrix_accepts_rotation() {
        let m = *Rotation::identity().rotate_z(0.25).matrix();
        let r = Rotation::from_matrix(m).unwrap();
        assert_relative_eq!(*r.matrix(), m, epsilon = 1e-15);
    }

    #[test]
    fn from_matrix_rejects_scaling() {
        let m = Matrix3::identity() * 2.0;
        assert!(Rotation::from_matrix(m).is_err());
    }

    #[test]
    fn from_matrix_rejects_reflection() {
        let m = Matrix3::from_diagonal(&v(1.0, 1.0, -1.0));
        assert!(Rotation::from_matrix(m).is_err());
    }
}
