//! Angular apertures of window cut-outs in cylindrical walls.

use crate::error::{DerivationError, Result};

/// Half-angle subtended by a chord of half-width `half_width` on a circle
/// of radius `radius`: `asin(w / R)`.
///
/// # Errors
///
/// Returns `OutOfDomain` when `radius` is not positive or `|w / R| > 1`.
pub fn aperture_asin(half_width: f64, radius: f64) -> Result<f64> {
    if radius.is_nan() || radius <= 0.0 {
        return Err(DerivationError::OutOfDomain {
            quantity: "radius",
            value: radius,
        }
        .into());
    }
    let ratio = half_width / radius;
    if !(-1.0..=1.0).contains(&ratio) {
        return Err(DerivationError::OutOfDomain {
            quantity: "half_width / radius",
            value: ratio,
        }
        .into());
    }
    Ok(ratio.asin())
}

/// Half-angle of a flat face of half-width `half_width` seen from a
/// distance `distance`: `atan(w / d)`.
///
/// # Errors
///
/// Returns `OutOfDomain` when `distance` is not positive.
pub fn aperture_atan(half_width: f64, distance: f64) -> Result<f64> {
    if distance.is_nan() || distance <= 0.0 {
        return Err(DerivationError::OutOfDomain {
            quantity: "distance",
            value: distance,
        }
        .into());
    }
    Ok((half_width / distance).atan())
}

/// Radius reaching the outer corners of a flange plate of half-length
/// `half_length` that subtends `aperture` on each side.
///
/// # Errors
///
/// Returns `OutOfDomain` when `sin(aperture)` is not positive.
pub fn flange_outer_radius(half_length: f64, aperture: f64) -> Result<f64> {
    let s = aperture.sin();
    if s.is_nan() || s <= 0.0 {
        return Err(DerivationError::OutOfDomain {
            quantity: "aperture",
            value: aperture,
        }
        .into());
    }
    Ok(half_length / s)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::units::{DEG, INCH};
    use approx::assert_relative_eq;

    #[test]
    fn asin_of_half_radius_is_thirty_degrees() {
        assert_relative_eq!(aperture_asin(5.0, 10.0).unwrap(), 30.0 * DEG, epsilon = 1e-12);
    }

    #[test]
    fn asin_rejects_chord_wider_than_circle() {
        let err = aperture_asin(10.5, 10.0).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Derivation(DerivationError::OutOfDomain { .. })
        ));
        assert!(aperture_asin(1.0, 0.0).is_err());
    }

    #[test]
    fn atan_of_equal_sides_is_forty_five_degrees() {
        assert_relative_eq!(aperture_atan(3.0, 3.0).unwrap(), 45.0 * DEG, epsilon = 1e-12);
        assert!(aperture_atan(3.0, -1.0).is_err());
    }

    #[test]
    fn flange_corner_lies_on_plate_face() {
        let half_length = 22.5 * (25.5 * DEG).sin() * INCH;
        let face = 22.5 * INCH + 1.25 * INCH;
        let aperture = aperture_atan(half_length, face).unwrap();
        let radius = flange_outer_radius(half_length, aperture).unwrap();
        // the corner (face, half_length) sits at exactly this radius
        assert_relative_eq!(radius, face.hypot(half_length), epsilon = 1e-9);
    }

    #[test]
    fn flange_rejects_zero_aperture() {
        assert!(flange_outer_radius(1.0, 0.0).is_err());
    }
}
