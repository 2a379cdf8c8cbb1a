use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::math::{angle_in_sector, Point3, TOLERANCE};
use crate::solid::Aabb;

use super::{clamp_span, require_radii, require_span, turn_fraction, ShapeResult};

/// A spherical shell sector. θ is the polar angle from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub rmin: f64,
    pub rmax: f64,
    pub start_phi: f64,
    pub delta_phi: f64,
    pub start_theta: f64,
    pub delta_theta: f64,
}

impl Sphere {
    /// # Errors
    ///
    /// Returns `InvalidDimension` for bad radii, a φ span outside `(0, 2π]`,
    /// or a θ range leaving `[0, π]`.
    pub fn new(
        rmin: f64,
        rmax: f64,
        start_phi: f64,
        delta_phi: f64,
        start_theta: f64,
        delta_theta: f64,
    ) -> ShapeResult<Self> {
        require_radii("sphere", rmin, rmax)?;
        require_span("sphere", "delta_phi", delta_phi)?;
        if !(0.0..=PI).contains(&start_theta) {
            return Err(GeometryError::invalid(
                "sphere",
                "start_theta",
                start_theta,
                "polar angle must be in [0, 180] degrees",
            ));
        }
        if !(delta_theta > 0.0 && start_theta + delta_theta <= PI + TOLERANCE) {
            return Err(GeometryError::invalid(
                "sphere",
                "delta_theta",
                delta_theta,
                "polar range must end within 180 degrees",
            ));
        }
        Ok(Self {
            rmin,
            rmax,
            start_phi,
            delta_phi: clamp_span(delta_phi),
            start_theta,
            delta_theta: delta_theta.min(PI - start_theta),
        })
    }

    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        let r = p.coords.norm();
        if r < self.rmin || r > self.rmax {
            return false;
        }
        if r < TOLERANCE {
            return self.start_theta <= TOLERANCE || self.delta_theta >= PI - TOLERANCE;
        }
        let theta = (p.z / r).clamp(-1.0, 1.0).acos();
        theta >= self.start_theta - TOLERANCE
            && theta <= self.start_theta + self.delta_theta + TOLERANCE
            && angle_in_sector(p.y.atan2(p.x), self.start_phi, self.delta_phi)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::symmetric(self.rmax, self.rmax, self.rmax)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        let cos_band = self.start_theta.cos() - (self.start_theta + self.delta_theta).cos();
        turn_fraction(self.delta_phi) * 2.0 * PI * cos_band * (self.rmax.powi(3) - self.rmin.powi(3))
            / 3.0
    }
}
