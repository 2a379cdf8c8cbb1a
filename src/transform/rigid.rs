use crate::math::{Point3, Vector3};

use super::Rotation;

/// A rigid-body transform mapping child coordinates into the parent frame:
/// `p_parent = rotation * p_child + translation`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    rotation: Rotation,
    translation: Vector3,
}

impl Transform {
    /// Creates a transform from an active rotation and a translation.
    #[must_use]
    pub fn new(rotation: Rotation, translation: Vector3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// A pure translation.
    #[must_use]
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::new(Rotation::identity(), Vector3::new(x, y, z))
    }

    /// Creates a transform from a frame rotation.
    ///
    /// Placements and boolean operands are specified by the rotation of the
    /// child's axes relative to the parent's ("frame" or passive form). The
    /// child content is therefore turned by the inverse of `frame`.
    #[must_use]
    pub fn from_frame(frame: Rotation, translation: Vector3) -> Self {
        Self::new(frame.inverse(), translation)
    }

    /// Returns the active rotation.
    #[must_use]
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Returns the translation.
    #[must_use]
    pub fn translation_vector(&self) -> &Vector3 {
        &self.translation
    }

    /// Expresses `child` (given in this transform's local frame) in the
    /// frame this transform maps into.
    #[must_use]
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform {
            rotation: self.rotation * child.rotation,
            translation: self.translation + self.rotation.apply(&child.translation),
        }
    }

    /// Returns the inverse transform, so that `t.compose(&t.inverse())` is
    /// the identity.
    #[must_use]
    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.inverse();
        Transform {
            rotation,
            translation: -rotation.apply(&self.translation),
        }
    }

    /// Maps a point from the child frame into the parent frame.
    #[must_use]
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        Point3::from(self.rotation.apply(&p.coords) + self.translation)
    }

    /// Maps a direction from the child frame into the parent frame.
    #[must_use]
    pub fn apply_vector(&self, v: &Vector3) -> Vector3 {
        self.rotation.apply(v)
    }

    /// Returns `true` when rotation and translation are within `tol` of the
    /// identity.
    #[must_use]
    pub fn is_identity(&self, tol: f64) -> bool {
        self.rotation.is_identity(tol) && self.translation.amax() <= tol
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn compose_applies_child_first() {
        let parent = Transform::new(Rotation::identity().rotate_z(FRAC_PI_2), v(10.0, 0.0, 0.0));
        let child = Transform::translation(1.0, 0.0, 0.0);
        let chained = parent.compose(&child);
        let direct = parent.apply_point(&child.apply_point(&p(0.0, 0.0, 0.0)));
        assert_relative_eq!(chained.apply_point(&p(0.0, 0.0, 0.0)), direct, epsilon = 1e-12);
        assert_relative_eq!(direct, p(10.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn frame_rotation_turns_content_backwards() {
        let frame = Rotation::identity().rotate_z(FRAC_PI_2);
        let t = Transform::from_frame(frame, Vector3::zeros());
        assert_relative_eq!(t.apply_point(&p(1.0, 0.0, 0.0)), p(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn compose_is_associative() {
        let a = Transform::new(Rotation::identity().rotate_x(0.3), v(1.0, 2.0, 3.0));
        let b = Transform::new(Rotation::identity().rotate_y(-0.8), v(-4.0, 0.5, 2.0));
        let c = Transform::new(Rotation::identity().rotate_z(1.9), v(0.0, -7.0, 1.0));
        let left = a.compose(&b).compose(&c);
        let right = a.compose(&b.compose(&c));
        assert!(left.compose(&right.inverse()).is_identity(1e-9));
    }

    #[test]
    fn compose_is_not_commutative() {
        let a = Transform::new(Rotation::identity().rotate_x(FRAC_PI_2), v(0.0, 1.0, 0.0));
        let b = Transform::translation(0.0, 0.0, 5.0);
        let ab = a.compose(&b);
        let ba = b.compose(&a);
        assert!(!ab.compose(&ba.inverse()).is_identity(1e-6));
    }

    fn rotation_strategy() -> impl Strategy<Value = Rotation> {
        (-7.0..7.0_f64, -7.0..7.0_f64, -7.0..7.0_f64)
            .prop_map(|(a, b, c)| Rotation::identity().rotate_x(a).rotate_y(b).rotate_z(c))
    }

    proptest! {
        #[test]
        fn compose_with_inverse_is_identity(
            rot in rotation_strategy(),
            x in -5000.0..5000.0_f64,
            y in -5000.0..5000.0_f64,
            z in -5000.0..5000.0_f64,
        ) {
            let t = Transform::new(rot, v(x, y, z));
            let id = t.compose(&t.inverse());
            prop_assert!(id.rotation().is_identity(1e-9));
            prop_assert!(id.translation_vector().amax() < 1e-9);
            let id = t.inverse().compose(&t);
            prop_assert!(id.is_identity(1e-9));
        }

        #[test]
        fn inverse_maps_points_back(
            rot in rotation_strategy(),
            x in -100.0..100.0_f64,
            px in -100.0..100.0_f64,
            pz in -100.0..100.0_f64,
        ) {
            let t = Transform::new(rot, v(x, -x, 2.0 * x));
            let pt = p(px, 1.0, pz);
            let back = t.inverse().apply_point(&t.apply_point(&pt));
            prop_assert!((back - pt).amax() < 1e-9);
        }
    }
}
