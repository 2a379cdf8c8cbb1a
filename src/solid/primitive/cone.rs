use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::math::{angle_in_sector, Point3};
use crate::solid::Aabb;

use super::{
    clamp_span, require_non_negative, require_positive, require_span, turn_fraction, ShapeResult,
};

/// A conical shell sector. Radii `(rmin1, rmax1)` apply at `-dz`, `(rmin2, rmax2)` at `+dz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub rmin1: f64,
    pub rmax1: f64,
    pub rmin2: f64,
    pub rmax2: f64,
    pub dz: f64,
    pub start_phi: f64,
    pub delta_phi: f64,
}

impl Cone {
    /// # Errors
    ///
    /// Returns `InvalidDimension` for negative radii, an inner radius above
    /// the outer one at either end, a non-positive `dz`, both outer radii
    /// zero, or a bad span.
    pub fn new(
        rmin1: f64,
        rmax1: f64,
        rmin2: f64,
        rmax2: f64,
        dz: f64,
        start_phi: f64,
        delta_phi: f64,
    ) -> ShapeResult<Self> {
        for (name, r) in [("rmin1", rmin1), ("rmax1", rmax1), ("rmin2", rmin2), ("rmax2", rmax2)] {
            require_non_negative("cone", name, r)?;
        }
        require_positive("cone", "rmax1 + rmax2", rmax1 + rmax2)?;
        if rmin1 > rmax1 {
            return Err(GeometryError::invalid("cone", "rmin1", rmin1, "exceeds rmax1"));
        }
        if rmin2 > rmax2 {
            return Err(GeometryError::invalid("cone", "rmin2", rmin2, "exceeds rmax2"));
        }
        require_positive("cone", "dz", dz)?;
        require_span("cone", "delta_phi", delta_phi)?;
        Ok(Self {
            rmin1,
            rmax1,
            rmin2,
            rmax2,
            dz,
            start_phi,
            delta_phi: clamp_span(delta_phi),
        })
    }

    fn radii_at(&self, z: f64) -> (f64, f64) {
        let t = (z + self.dz) / (2.0 * self.dz);
        (
            self.rmin1 + t * (self.rmin2 - self.rmin1),
            self.rmax1 + t * (self.rmax2 - self.rmax1),
        )
    }

    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        if p.z.abs() > self.dz {
            return false;
        }
        let (rin, rout) = self.radii_at(p.z);
        let r = p.x.hypot(p.y);
        r >= rin && r <= rout && angle_in_sector(p.y.atan2(p.x), self.start_phi, self.delta_phi)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let r = self.rmax1.max(self.rmax2);
        Aabb::symmetric(r, r, self.dz)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        turn_fraction(self.delta_phi)
            * (frustum_volume(self.rmax1, self.rmax2, 2.0 * self.dz)
                - frustum_volume(self.rmin1, self.rmin2, 2.0 * self.dz))
    }
}

/// Volume of a full frustum with end radii `r1`, `r2` and height `h`.
pub(crate) fn frustum_volume(r1: f64, r2: f64, h: f64) -> f64 {
    PI * h / 3.0 * (r1 * r1 + r1 * r2 + r2 * r2)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;

    #[test]
    fn radius_interpolates_along_z() {
        let c = Cone::new(0.0, 1.0, 0.0, 3.0, 1.0, 0.0, TAU).unwrap();
        assert!(c.contains(&Point3::new(1.9, 0.0, 0.0)));
        assert!(!c.contains(&Point3::new(2.1, 0.0, 0.0)));
        assert!(c.contains(&Point3::new(2.9, 0.0, 1.0)));
    }

    #[test]
    fn full_cone_volume() {
        let c = Cone::new(0.0, 0.0, 0.0, 1.0, 0.5, 0.0, TAU).unwrap();
        assert!((c.volume() - PI / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_inverted_radii() {
        assert!(Cone::new(2.0, 1.0, 0.0, 1.0, 1.0, 0.0, TAU).is_err());
        assert!(Cone::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.0, TAU).is_err());
    }
}
