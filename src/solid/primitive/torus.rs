use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::math::{angle_in_sector, Point3};
use crate::solid::Aabb;

use super::{clamp_span, require_radii, require_span, ShapeResult};

/// A torus sector: a tube of radii `(rmin, rmax)` swept around a circle of
/// radius `rtor` in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub rmin: f64,
    pub rmax: f64,
    pub rtor: f64,
    pub start_phi: f64,
    pub delta_phi: f64,
}

impl Torus {
    /// # Errors
    ///
    /// Returns `InvalidDimension` for bad tube radii, a swept radius not
    /// larger than `rmax`, or a bad span.
    pub fn new(rmin: f64, rmax: f64, rtor: f64, start_phi: f64, delta_phi: f64) -> ShapeResult<Self> {
        require_radii("torus", rmin, rmax)?;
        if !(rtor.is_finite() && rtor > rmax) {
            return Err(GeometryError::invalid(
                "torus",
                "rtor",
                rtor,
                "swept radius must exceed the tube radius",
            ));
        }
        require_span("torus", "delta_phi", delta_phi)?;
        Ok(Self {
            rmin,
            rmax,
            rtor,
            start_phi,
            delta_phi: clamp_span(delta_phi),
        })
    }

    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        let rho = p.x.hypot(p.y);
        let d = (rho - self.rtor).hypot(p.z);
        d >= self.rmin && d <= self.rmax && angle_in_sector(p.y.atan2(p.x), self.start_phi, self.delta_phi)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let r = self.rtor + self.rmax;
        Aabb::symmetric(r, r, self.rmax)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.delta_phi * self.rtor * PI * (self.rmax * self.rmax - self.rmin * self.rmin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;
    use crate::units::DEG;

    #[test]
    fn quarter_elbow_contains_tube_centre() {
        let t = Torus::new(0.0, 1.0, 10.0, 0.0, 90.0 * DEG).unwrap();
        assert!(t.contains(&Point3::new(10.0, 0.1, 0.0)));
        assert!(t.contains(&Point3::new(0.0, 10.0, 0.5)));
        assert!(!t.contains(&Point3::new(-10.0, 0.0, 0.0)));
        assert!(!t.contains(&Point3::new(5.0, 5.0, 0.0)));
    }

    #[test]
    fn full_torus_volume() {
        let t = Torus::new(0.0, 1.0, 3.0, 0.0, TAU).unwrap();
        assert!((t.volume() - 2.0 * PI * PI * 3.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_self_intersecting() {
        assert!(Torus::new(0.0, 2.0, 1.0, 0.0, TAU).is_err());
    }
}
