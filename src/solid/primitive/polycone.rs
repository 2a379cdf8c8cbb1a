use crate::error::GeometryError;
use crate::math::{angle_in_sector, Point3};
use crate::solid::Aabb;

use super::cone::frustum_volume;
use super::{clamp_span, require_non_negative, require_span, turn_fraction, ShapeResult};

/// One cross-section of a polycone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZPlane {
    pub z: f64,
    pub r_inner: f64,
    pub r_outer: f64,
}

impl ZPlane {
    #[must_use]
    pub fn new(z: f64, r_inner: f64, r_outer: f64) -> Self {
        Self { z, r_inner, r_outer }
    }
}

/// A solid of revolution through an ordered list of `(z, r_inner, r_outer)`
/// sections, linear between neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Polycone {
    pub start_phi: f64,
    pub delta_phi: f64,
    planes: Vec<ZPlane>,
}

impl Polycone {
    /// # Errors
    ///
    /// Returns `InvalidDimension` for fewer than two planes, z values that
    /// decrease or never advance, negative radii, an inner radius above the
    /// outer one, or a bad span.
    pub fn new(start_phi: f64, delta_phi: f64, planes: Vec<ZPlane>) -> ShapeResult<Self> {
        require_span("polycone", "delta_phi", delta_phi)?;
        let (Some(first), Some(last)) = (planes.first(), planes.last()) else {
            return Err(GeometryError::invalid("polycone", "planes", 0.0, "needs at least two planes"));
        };
        if planes.len() < 2 || last.z <= first.z {
            return Err(GeometryError::invalid(
                "polycone",
                "z",
                last.z - first.z,
                "z planes must span a positive length",
            ));
        }
        for pair in planes.windows(2) {
            if pair[1].z < pair[0].z {
                return Err(GeometryError::invalid(
                    "polycone",
                    "z",
                    pair[1].z,
                    "z planes must be monotonic",
                ));
            }
        }
        for plane in &planes {
            require_non_negative("polycone", "r_inner", plane.r_inner)?;
            require_non_negative("polycone", "r_outer", plane.r_outer)?;
            if plane.r_inner > plane.r_outer {
                return Err(GeometryError::invalid(
                    "polycone",
                    "r_inner",
                    plane.r_inner,
                    "exceeds r_outer",
                ));
            }
        }
        Ok(Self {
            start_phi,
            delta_phi: clamp_span(delta_phi),
            planes,
        })
    }

    /// Sections in z order.
    #[must_use]
    pub fn planes(&self) -> &[ZPlane] {
        &self.planes
    }

    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        if !angle_in_sector(p.y.atan2(p.x), self.start_phi, self.delta_phi) {
            return false;
        }
        let r = p.x.hypot(p.y);
        self.planes.windows(2).any(|pair| {
            let (a, b) = (pair[0], pair[1]);
            if p.z < a.z || p.z > b.z || b.z <= a.z {
                return false;
            }
            let t = (p.z - a.z) / (b.z - a.z);
            let rin = a.r_inner + t * (b.r_inner - a.r_inner);
            let rout = a.r_outer + t * (b.r_outer - a.r_outer);
            r >= rin && r <= rout
        })
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let r = self.planes.iter().fold(0.0_f64, |acc, p| acc.max(p.r_outer));
        let zmin = self.planes.first().map_or(0.0, |p| p.z);
        let zmax = self.planes.last().map_or(0.0, |p| p.z);
        Aabb::new(Point3::new(-r, -r, zmin), Point3::new(r, r, zmax))
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        let full: f64 = self
            .planes
            .windows(2)
            .map(|pair| {
                let h = pair[1].z - pair[0].z;
                frustum_volume(pair[0].r_outer, pair[1].r_outer, h)
                    - frustum_volume(pair[0].r_inner, pair[1].r_inner, h)
            })
            .sum();
        turn_fraction(self.delta_phi) * full
    }
}
