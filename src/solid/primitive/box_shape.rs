use crate::math::Point3;
use crate::solid::Aabb;

use super::{require_positive, ShapeResult};

/// A rectangular box given by its half-lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl BoxShape {
    /// # Errors
    ///
    /// Returns `InvalidDimension` if any half-length is not positive.
    pub fn new(dx: f64, dy: f64, dz: f64) -> ShapeResult<Self> {
        require_positive("box", "dx", dx)?;
        require_positive("box", "dy", dy)?;
        require_positive("box", "dz", dz)?;
        Ok(Self { dx, dy, dz })
    }

    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        p.x.abs() <= self.dx && p.y.abs() <= self.dy && p.z.abs() <= self.dz
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::symmetric(self.dx, self.dy, self.dz)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        8.0 * self.dx * self.dy * self.dz
    }
}
