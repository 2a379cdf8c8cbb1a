//! Polycone taper profiles.

use std::f64::consts::FRAC_PI_2;

use crate::error::{GeometryError, Result};
use crate::math::TOLERANCE;
use crate::solid::ZPlane;

/// Radius at `z` on a cone wall that passes through `r_ref` at `z_ref` and
/// leans by `taper` from the z axis: `R(z) = r_ref + (z - z_ref) / tan(taper)`.
///
/// A negative `taper` mirrors the wall, so the radius shrinks with z.
///
/// # Errors
///
/// Returns `InvalidDimension` if `taper` is zero, not finite, or not
/// strictly between -90 and 90 degrees.
pub fn taper_radius(r_ref: f64, z_ref: f64, z: f64, taper: f64) -> Result<f64> {
    check_taper(taper)?;
    Ok(r_ref + (z - z_ref) / taper.tan())
}

/// Evaluates [`taper_radius`] at every breakpoint of `z`.
///
/// # Errors
///
/// Returns `InvalidDimension` for a bad taper or when `z` is not strictly
/// increasing.
pub fn taper_profile(r_ref: f64, z_ref: f64, z: &[f64], taper: f64) -> Result<Vec<f64>> {
    check_taper(taper)?;
    require_increasing(z)?;
    z.iter()
        .map(|&zi| taper_radius(r_ref, z_ref, zi, taper))
        .collect()
}

/// Section planes of a snout that is a plain cylinder of radius `radius`
/// around its mid-plane and flares out by `taper` above and below.
///
/// The straight part ends where the cone through `taper_start` on the
/// mid-plane reaches `radius`. The outer radius of every plane is pushed
/// out by `outer_margin` so the solid can be trimmed by an intersection.
///
/// # Errors
///
/// Returns `InvalidDimension` for a bad taper or when the straight part
/// does not fit inside `half_height`.
pub fn flared_snout_planes(
    half_height: f64,
    radius: f64,
    taper_start: f64,
    taper: f64,
    outer_margin: f64,
) -> Result<Vec<ZPlane>> {
    check_taper(taper)?;
    let z_flare = (radius - taper_start) * taper.tan();
    let z = [-half_height, -z_flare, z_flare, half_height];
    require_increasing(&z)?;

    let r_low = taper_radius(radius, z[1], z[0], -taper)?;
    let r_high = taper_radius(radius, z[2], z[3], taper)?;
    let inner = [r_low, radius, radius, r_high];
    let outer = [r_low, r_low, r_high, r_high];

    Ok((0..4)
        .map(|i| ZPlane::new(z[i], inner[i], outer[i] + outer_margin))
        .collect())
}

fn check_taper(taper: f64) -> Result<()> {
    if !taper.is_finite() || taper.abs() < TOLERANCE || taper.abs() >= FRAC_PI_2 {
        return Err(GeometryError::invalid(
            "taper",
            "angle",
            taper,
            "must be finite, non-zero and inside (-90, 90) degrees",
        )
        .into());
    }
    Ok(())
}

fn require_increasing(z: &[f64]) -> Result<()> {
    for pair in z.windows(2) {
        if pair[1] <= pair[0] {
            return Err(GeometryError::invalid(
                "taper",
                "z",
                pair[1],
                "breakpoints must be strictly increasing",
            )
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::units::{CM, DEG, INCH};
    use approx::assert_relative_eq;

    #[test]
    fn profile_follows_formula_for_several_angles() {
        let z = [-300.0, -120.0, 0.0, 45.0, 250.0];
        for angle in [15.0 * DEG, 38.81 * DEG, 60.0 * DEG, -25.0 * DEG] {
            let radii = taper_profile(600.0, 0.0, &z, angle).unwrap();
            for (zi, ri) in z.iter().zip(&radii) {
                let expected = 600.0 + zi / angle.tan();
                assert_relative_eq!(*ri, expected, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn zero_taper_is_rejected() {
        assert!(matches!(
            taper_radius(1.0, 0.0, 1.0, 0.0),
            Err(BuildError::Geometry(GeometryError::InvalidDimension { .. }))
        ));
        assert!(taper_profile(1.0, 0.0, &[0.0, 1.0], 0.0).is_err());
    }

    #[test]
    fn non_finite_and_right_angle_tapers_are_rejected() {
        assert!(taper_radius(1.0, 0.0, 1.0, f64::NAN).is_err());
        assert!(taper_radius(1.0, 0.0, 1.0, f64::INFINITY).is_err());
        assert!(taper_radius(1.0, 0.0, 1.0, 90.0 * DEG).is_err());
    }

    #[test]
    fn breakpoints_must_increase() {
        assert!(taper_profile(1.0, 0.0, &[0.0, 2.0, 2.0], 30.0 * DEG).is_err());
        assert!(taper_profile(1.0, 0.0, &[3.0, 2.0], 30.0 * DEG).is_err());
    }

    #[test]
    fn flared_snout_matches_chamber_profile() {
        let half_height = 37.75 * INCH / 2.0;
        let radius = 23.80 * INCH;
        let taper = 38.81 * DEG;
        let planes = flared_snout_planes(half_height, radius, 14.88 * INCH, taper, 40.0 * CM).unwrap();
        assert_eq!(planes.len(), 4);
        assert!(planes.windows(2).all(|p| p[1].z > p[0].z));

        let z_flare = (radius - 14.88 * INCH) * taper.tan();
        assert_relative_eq!(planes[1].z, -z_flare);
        let flare = (half_height - z_flare) / taper.tan();
        assert_relative_eq!(planes[0].r_inner, radius + flare, max_relative = 1e-9);
        assert_relative_eq!(planes[1].r_inner, radius);
        assert_relative_eq!(planes[3].r_inner, radius + flare, max_relative = 1e-9);
        assert_relative_eq!(planes[1].r_outer, radius + flare + 40.0 * CM, max_relative = 1e-9);
    }

    #[test]
    fn flared_snout_rejects_flare_beyond_height() {
        assert!(flared_snout_planes(10.0, 100.0, 0.0, 45.0 * DEG, 1.0).is_err());
    }
}
