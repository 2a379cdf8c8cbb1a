use std::f64::consts::TAU;

use crate::math::{angle_in_sector, Point3};
use crate::solid::Aabb;

use super::{clamp_span, require_positive, require_radii, require_span, turn_fraction, ShapeResult};

/// A cylindrical tube sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    pub rmin: f64,
    pub rmax: f64,
    pub dz: f64,
    pub start_phi: f64,
    pub delta_phi: f64,
}

impl Tube {
    /// # Errors
    ///
    /// Returns `InvalidDimension` for non-positive `rmax` or `dz`, for
    /// `rmin >= rmax`, or for a span outside `(0, 2π]`.
    pub fn new(rmin: f64, rmax: f64, dz: f64, start_phi: f64, delta_phi: f64) -> ShapeResult<Self> {
        require_radii("tube", rmin, rmax)?;
        require_positive("tube", "dz", dz)?;
        require_span("tube", "delta_phi", delta_phi)?;
        Ok(Self {
            rmin,
            rmax,
            dz,
            start_phi,
            delta_phi: clamp_span(delta_phi),
        })
    }

    /// A full solid or hollow cylinder.
    ///
    /// # Errors
    ///
    /// Same as [`Tube::new`].
    pub fn full(rmin: f64, rmax: f64, dz: f64) -> ShapeResult<Self> {
        Self::new(rmin, rmax, dz, 0.0, TAU)
    }

    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        if p.z.abs() > self.dz {
            return false;
        }
        let r = p.x.hypot(p.y);
        r >= self.rmin && r <= self.rmax && angle_in_sector(p.y.atan2(p.x), self.start_phi, self.delta_phi)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::symmetric(self.rmax, self.rmax, self.dz)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        turn_fraction(self.delta_phi)
            * std::f64::consts::PI
            * (self.rmax * self.rmax - self.rmin * self.rmin)
            * 2.0
            * self.dz
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::units::DEG;

    #[test]
    fn hollow_tube_excludes_bore() {
        let t = Tube::full(1.0, 2.0, 5.0).unwrap();
        assert!(!t.contains(&Point3::new(0.5, 0.0, 0.0)));
        assert!(t.contains(&Point3::new(1.5, 0.0, 4.9)));
        assert!(!t.contains(&Point3::new(1.5, 0.0, 5.1)));
    }

    #[test]
    fn sector_excludes_other_side() {
        let t = Tube::new(0.0, 2.0, 1.0, 0.0, 90.0 * DEG).unwrap();
        assert!(t.contains(&Point3::new(1.0, 1.0, 0.0)));
        assert!(!t.contains(&Point3::new(-1.0, 1.0, 0.0)));
    }

    #[test]
    fn volume_of_half_tube() {
        let t = Tube::new(0.0, 1.0, 0.5, 0.0, 180.0 * DEG).unwrap();
        assert!((t.volume() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_radii_and_span() {
        assert!(Tube::full(2.0, 1.0, 1.0).is_err());
        assert!(Tube::new(0.0, 1.0, 1.0, 0.0, 400.0 * DEG).is_err());
        assert!(Tube::full(0.0, 1.0, 0.0).is_err());
    }
}
