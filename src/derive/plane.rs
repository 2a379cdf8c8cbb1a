use crate::error::{DerivationError, GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// `|direction . normal|` below this fraction of `|direction|` counts as a
/// grazing ray.
pub const GRAZING_TOLERANCE: f64 = 1e-9;

/// An infinite plane given by a point on it and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from a point and a (not necessarily unit) normal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if the normal is zero-length.
    pub fn from_normal(point: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::invalid("plane", "normal", len, "must be non-zero").into());
        }
        Ok(Self {
            point,
            normal: normal / len,
        })
    }

    #[must_use]
    pub fn point(&self) -> &Point3 {
        &self.point
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from `p` to the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&(p - self.point))
    }
}

/// Where a ray `origin + s * direction` meets a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub s: f64,
    pub point: Point3,
}

/// Intersects the ray `origin + s * direction` with `plane`.
///
/// # Errors
///
/// Returns `Grazing` when the ray is parallel (or nearly so) to the plane,
/// including a zero-length direction.
pub fn intersect_ray(origin: &Point3, direction: &Vector3, plane: &Plane) -> Result<RayHit> {
    let denom = plane.normal.dot(direction);
    if denom.abs() <= GRAZING_TOLERANCE * direction.norm() {
        return Err(DerivationError::Grazing { denominator: denom }.into());
    }

    let s = plane.normal.dot(&(plane.point - origin)) / denom;
    Ok(RayHit {
        s,
        point: origin + direction * s,
    })
}
