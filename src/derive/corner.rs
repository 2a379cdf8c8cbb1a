//! Rounded corners for rectangular window apertures.
//!
//! There is no rounded-rectangle primitive, so rounded apertures are made
//! either by filling the corners of a sharp cut-out with
//! [`rounded_corner_piece`]s, or by cutting the rounded shape directly with
//! [`rounded_rect_cutout`].

use crate::error::{GeometryError, Result};
use crate::solid::Solid;
use crate::transform::Transform;
use crate::units::MM;

/// Extra half-length given to cutting cylinders so they pass cleanly
/// through the faces of the part.
const CUT_CLEARANCE: f64 = 1.0 * MM;

/// A square of side `bend_radius` with a quarter disc of the same radius
/// removed around its `(+x, +y)` corner.
///
/// Placed unrotated, the remaining material fills the `(-x, -y)` corner of
/// a sharp rectangular opening.
///
/// # Errors
///
/// Returns `InvalidDimension` if `bend_radius` or `thickness` is not
/// positive.
pub fn rounded_corner_piece(name: &str, bend_radius: f64, thickness: f64) -> Result<Solid> {
    let half = bend_radius / 2.0;
    let square = Solid::box_shape(&format!("{name}_box"), half, half, thickness / 2.0)?;
    let cylinder = Solid::tube(
        &format!("{name}_cyl"),
        0.0,
        bend_radius,
        thickness / 2.0 + CUT_CLEARANCE,
        0.0,
        std::f64::consts::TAU,
    )?;
    Ok(square.subtract(name, &cylinder, Transform::translation(half, half, 0.0)))
}

/// Cuts a `width` x `height` opening with corners of radius `bend_radius`
/// through `base`, centred on the base's origin.
///
/// The cut is made of four corner cylinders and two crossing boxes, each
/// `cut_half_thickness` deep on either side of the base's mid-plane.
///
/// # Errors
///
/// Returns `InvalidDimension` if the corner radius does not fit inside the
/// opening or any dimension is not positive.
pub fn rounded_rect_cutout(
    base: &Solid,
    name: &str,
    width: f64,
    height: f64,
    bend_radius: f64,
    cut_half_thickness: f64,
) -> Result<Solid> {
    let limit = width.min(height) / 2.0;
    if bend_radius.is_nan() || bend_radius <= 0.0 || bend_radius >= limit {
        return Err(GeometryError::invalid(
            name,
            "bend_radius",
            bend_radius,
            "must be positive and less than half the opening",
        )
        .into());
    }

    let hx = width / 2.0 - bend_radius;
    let hy = height / 2.0 - bend_radius;
    let cylinder = Solid::tube(
        &format!("{name}_cut_0"),
        0.0,
        bend_radius,
        cut_half_thickness,
        0.0,
        std::f64::consts::TAU,
    )?;

    let mut solid = base.clone();
    for (suffix, x, y) in [("tr", hx, hy), ("br", hx, -hy), ("bl", -hx, -hy), ("tl", -hx, hy)] {
        solid = solid.subtract(
            format!("{name}_h{suffix}"),
            &cylinder,
            Transform::translation(x, y, 0.0),
        );
    }

    let narrow = Solid::box_shape(&format!("{name}_cut_1"), hx, height / 2.0, cut_half_thickness)?;
    let wide = Solid::box_shape(&format!("{name}_cut_2"), width / 2.0, hy, cut_half_thickness)?;
    let solid = solid.subtract(format!("{name}_1"), &narrow, Transform::identity());
    Ok(solid.subtract(name, &wide, Transform::identity()))
}
