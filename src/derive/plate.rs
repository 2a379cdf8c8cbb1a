//! Local frames of flat plates turned about the vertical axis.

use crate::math::Vector3;
use crate::transform::{Rotation, Transform};

/// Which front corner of a beam plate an adjoining plate hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Beam left, `+x`.
    Left,
    /// Beam right, `-x`.
    Right,
}

/// Orthonormal axes of a plate turned by `angle` about `+y`.
///
/// The plate's own `x` runs along its width, `y` is vertical and `z` is the
/// plate normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateFrame {
    angle: f64,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    pub z_axis: Vector3,
}

impl PlateFrame {
    /// Axes of a plate turned by `angle` about `+y` (right-handed).
    #[must_use]
    pub fn turned(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            angle,
            x_axis: Vector3::new(c, 0.0, -s),
            y_axis: Vector3::y(),
            z_axis: Vector3::new(s, 0.0, c),
        }
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Active rotation taking plate-local coordinates to the parent frame.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        Rotation::identity().rotate_y(self.angle)
    }

    /// Placement of something aligned with the plate at `position`.
    #[must_use]
    pub fn placement(&self, position: Vector3) -> Transform {
        Transform::new(self.rotation(), position)
    }

    /// Converts plate-local components to a parent-frame vector.
    #[must_use]
    pub fn to_parent(&self, x: f64, y: f64, z: f64) -> Vector3 {
        self.x_axis * x + self.y_axis * y + self.z_axis * z
    }
}

/// Position of the downstream front corner of a beam plate of width
/// `width` and thickness `thickness`, relative to the plate centre.
#[must_use]
pub fn front_corner(width: f64, thickness: f64, side: Side) -> Vector3 {
    let x = match side {
        Side::Left => width / 2.0,
        Side::Right => -width / 2.0,
    };
    Vector3::new(x, 0.0, thickness / 2.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::units::DEG;
    use approx::assert_relative_eq;

    #[test]
    fn axes_are_orthonormal_and_right_handed() {
        let frame = PlateFrame::turned(27.5 * DEG);
        assert_relative_eq!(frame.x_axis.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(frame.x_axis.dot(&frame.z_axis), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.x_axis.cross(&frame.y_axis), frame.z_axis, epsilon = 1e-12);
    }

    #[test]
    fn negative_turn_mirrors_normal() {
        let frame = PlateFrame::turned(-22.0 * DEG);
        let s = (22.0 * DEG).sin();
        assert_relative_eq!(frame.z_axis, Vector3::new(-s, 0.0, (22.0 * DEG).cos()), epsilon = 1e-12);
        assert_relative_eq!(frame.x_axis.z, s, epsilon = 1e-12);
    }

    #[test]
    fn rotation_maps_local_axes_onto_frame() {
        let frame = PlateFrame::turned(-22.0 * DEG);
        let rot = frame.rotation();
        assert_relative_eq!(rot.apply(&Vector3::x()), frame.x_axis, epsilon = 1e-12);
        assert_relative_eq!(rot.apply(&Vector3::z()), frame.z_axis, epsilon = 1e-12);
    }

    #[test]
    fn placement_matches_frame_rotation_form() {
        let frame = PlateFrame::turned(-22.0 * DEG);
        let pos = Vector3::new(1.0, 2.0, 3.0);
        let a = frame.placement(pos);
        let b = Transform::from_frame(Rotation::identity().rotate_y(22.0 * DEG), pos);
        let p = Point3::new(0.3, -0.7, 5.0);
        assert_relative_eq!(a.apply_point(&p), b.apply_point(&p), epsilon = 1e-12);
    }

    #[test]
    fn front_corners_straddle_beam_plate() {
        let left = front_corner(10.0, 1.0, Side::Left);
        let right = front_corner(10.0, 1.0, Side::Right);
        assert_relative_eq!(left, Vector3::new(5.0, 0.0, 0.5));
        assert_relative_eq!(right, Vector3::new(-5.0, 0.0, 0.5));
    }

    #[test]
    fn to_parent_combines_axes() {
        let frame = PlateFrame::turned(90.0 * DEG);
        let v = frame.to_parent(1.0, 2.0, 3.0);
        assert_relative_eq!(v, Vector3::new(3.0, 2.0, -1.0), epsilon = 1e-12);
    }
}
